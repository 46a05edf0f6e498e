//! N-point crossover over gene loci.
//!
//! A locus is a contiguous range of gene indices inherited as one unit. In flat mode every
//! gene is its own locus; in grouped mode each named gene group is one locus, so coupled
//! genes are never split between siblings. Cut points fall between loci, and the two
//! children alternate parents at every cut.

use core::ops::Range;
use rand::{seq::index, RngCore};

/// The loci to recombine: one per gene, or the genome's groups when `grouped`
pub fn loci(len: usize, groups: &[Range<usize>], grouped: bool) -> Vec<Range<usize>> {
    if grouped {
        groups.to_vec()
    } else {
        (0..len).map(|idx| idx..idx + 1).collect()
    }
}

/// For every locus, whether the first child takes it from the second parent.
/// `points` distinct cuts are drawn between loci, clamped to however many gaps exist.
pub(crate) fn swaps(units: usize, points: usize, rng: &mut impl RngCore) -> Vec<bool> {
    let gaps = units.saturating_sub(1);
    let mut cuts = index::sample(rng, gaps, points.min(gaps)).into_vec();
    cuts.sort_unstable();

    let mut cuts = cuts.into_iter().map(|c| c + 1).peekable();
    let mut swapped = false;
    (0..units)
        .map(|unit| {
            while cuts.next_if(|&c| c == unit).is_some() {
                swapped = !swapped;
            }
            swapped
        })
        .collect()
}

/// Recombine `l` and `r` into two siblings. Every gene of each child is copied unchanged
/// from exactly one parent, and the siblings always take opposite parents at each locus.
pub fn crossover(
    l: &[f64],
    r: &[f64],
    loci: &[Range<usize>],
    points: usize,
    rng: &mut impl RngCore,
) -> (Vec<f64>, Vec<f64>) {
    debug_assert_eq!(l.len(), r.len(), "parents have different gene layouts");

    let mut x = l.to_vec();
    let mut y = r.to_vec();
    for (locus, swapped) in loci.iter().zip(swaps(loci.len(), points, rng)) {
        if swapped {
            x[locus.clone()].copy_from_slice(&r[locus.clone()]);
            y[locus.clone()].copy_from_slice(&l[locus.clone()]);
        }
    }
    (x, y)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::random::WyRng;

    fn transitions(mask: &[bool]) -> usize {
        mask.windows(2).filter(|w| w[0] != w[1]).count()
    }

    #[test]
    fn test_swaps_cut_count() {
        let mut rng = WyRng::seeded(5);
        for units in 2..12 {
            for points in 1..units {
                let mask = swaps(units, points, &mut rng);
                assert_eq!(mask.len(), units);
                assert!(!mask[0], "first locus always comes from the first parent");
                assert_eq!(transitions(&mask), points);
            }
        }
    }

    #[test]
    fn test_swaps_clamps_points() {
        let mut rng = WyRng::seeded(6);
        assert_eq!(swaps(3, 10, &mut rng), vec![false, true, false]);
        assert_eq!(swaps(1, 4, &mut rng), vec![false]);
        assert!(swaps(0, 4, &mut rng).is_empty());
    }

    #[test]
    fn test_crossover_single_point() {
        let l = [1., 2., 3., 4.];
        let r = [-1., -2., -3., -4.];
        let loci = loci(4, &[], false);
        let (x, y) = crossover(&l, &r, &loci, 1, &mut WyRng::seeded(7));

        let cut = x.iter().position(|g| *g < 0.).unwrap();
        assert!(cut > 0);
        assert_eq!(&x[..cut], &l[..cut]);
        assert_eq!(&x[cut..], &r[cut..]);
        assert_eq!(&y[..cut], &r[..cut]);
        assert_eq!(&y[cut..], &l[cut..]);
    }

    #[test]
    fn test_crossover_grouped_keeps_groups() {
        let groups = [0..3, 3..4, 4..6];
        let l = [1., 1., 1., 1., 1., 1.];
        let r = [2., 2., 2., 2., 2., 2.];
        let loci = loci(6, &groups, true);
        let mut rng = WyRng::seeded(8);
        for _ in 0..100 {
            let (x, y) = crossover(&l, &r, &loci, 2, &mut rng);
            for group in groups.iter() {
                assert!(x[group.clone()].windows(2).all(|w| w[0] == w[1]));
                assert!(y[group.clone()].windows(2).all(|w| w[0] == w[1]));
                assert_ne!(x[group.start], y[group.start]);
            }
        }
    }

    #[test]
    fn test_self_cross_is_clone() {
        let l = [0.25, 0.5, 0.75];
        let (x, y) = crossover(&l, &l, &loci(3, &[], false), 2, &mut WyRng::seeded(9));
        assert_eq!(x, l);
        assert_eq!(y, l);
    }
}
