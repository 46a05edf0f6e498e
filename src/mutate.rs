//! Per-gene mutation.
//!
//! Each gene independently mutates with probability `chance`. A mutated gene receives an
//! offset drawn from the configured [Perturbation], scaled by `factor`. The random stream is
//! consumed in gene order (one roll per gene, plus one offset draw per mutated gene), so a
//! seeded generator always reproduces the same result.

use crate::random::Happens;
use rand::{Rng, RngCore};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

/// Distribution of the offset added to a mutated gene
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Perturbation {
    /// offset = U[-1, 1] * factor
    #[default]
    Uniform,
    /// offset = N(0, 1) * factor
    Gaussian,
}

impl Perturbation {
    pub fn offset(self, factor: f64, rng: &mut impl RngCore) -> f64 {
        match self {
            Self::Uniform => rng.random_range(-1.0..=1.0) * factor,
            Self::Gaussian => rng.sample::<f64, _>(StandardNormal) * factor,
        }
    }
}

/// Mutate `genes` in place, passing each perturbed value through `bound` with its index.
/// Returns how many genes were touched.
pub fn mutate_genes(
    genes: &mut [f64],
    factor: f64,
    chance: f64,
    perturbation: Perturbation,
    bound: impl Fn(usize, f64) -> f64,
    rng: &mut impl RngCore,
) -> usize {
    let mut touched = 0;
    for (idx, gene) in genes.iter_mut().enumerate() {
        if rng.happens(chance) {
            *gene = bound(idx, *gene + perturbation.offset(factor, rng));
            touched += 1;
        }
    }
    touched
}
