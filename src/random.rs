use core::cmp::min;
use rand::{Rng, RngCore, SeedableRng};
use std::{
    fs::File,
    io::{self, Read},
};

/// Roll a probability against any random source.
pub trait Happens: RngCore {
    /// true with probability `p`; never true for `p <= 0`
    fn happens(&mut self, p: f64) -> bool;
}

impl<T: RngCore + ?Sized> Happens for T {
    fn happens(&mut self, p: f64) -> bool {
        self.random::<f64>() < p
    }
}

/// Small, fast and seedable generator used for every random decision the controller makes.
#[derive(Debug, Clone)]
pub struct WyRng {
    state: u64,
}

impl WyRng {
    pub fn seeded(state: u64) -> Self {
        Self { state }
    }
}

impl RngCore for WyRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        const WY_CONST_0: u64 = 0x2d35_8dcc_aa6c_78a5;
        const WY_CONST_1: u64 = 0x8bb8_4b93_962e_acc9;
        self.state = self.state.wrapping_add(WY_CONST_0);
        let t = u128::from(self.state) * u128::from(self.state ^ WY_CONST_1);
        (t as u64) ^ (t >> 64) as u64
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        let mut idx = 0;
        while idx < dst.len() {
            let lim = min(8, dst.len() - idx);
            dst[idx..idx + lim].copy_from_slice(&self.next_u64().to_ne_bytes()[..lim]);
            idx += lim;
        }
    }
}

impl SeedableRng for WyRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::seeded(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::seeded(state)
    }
}

pub fn seed_urandom() -> io::Result<u64> {
    let mut file = File::open("/dev/urandom")?;
    let mut buffer = [0u8; 8];
    file.read_exact(&mut buffer)?;
    Ok(u64::from_le_bytes(buffer))
}

/// A [WyRng] seeded from `seed`, or from the OS when no seed is given
pub fn seeded_rng(seed: Option<u64>) -> WyRng {
    WyRng::seeded(seed.unwrap_or_else(|| seed_urandom().unwrap_or_else(|_| rand::random())))
}

pub fn default_rng() -> WyRng {
    seeded_rng(None)
}

#[cfg(test)]
mod test {
    use super::*;
    use core::iter::once;

    fn assert_within_deviation(chance: f64, range: f64, rng: &mut impl Happens) {
        let samples = 10_000.;
        let expected = chance * samples;
        let max_deviation = expected * range;
        for _ in 0..20 {
            let incidence = once(())
                .cycle()
                .take(samples as usize)
                .filter(|()| rng.happens(chance))
                .count() as f64;
            assert!(
                (expected - incidence).abs() < max_deviation,
                "{incidence} != {expected} +- {max_deviation}"
            );
        }
    }

    #[test]
    fn test_deviation_wyrand() {
        let mut rng = WyRng::seeded(7);
        for chance in [0.03, 0.2, 0.5, 0.8, 0.99] {
            assert_within_deviation(chance, 0.33, &mut rng);
        }
    }

    #[test]
    fn test_never_happens() {
        let mut rng = WyRng::seeded(11);
        assert!((0..10_000).all(|_| !rng.happens(0.)));
    }

    #[test]
    fn test_seeded_reproducible() {
        let mut l = seeded_rng(Some(42));
        let mut r = seeded_rng(Some(42));
        for _ in 0..100 {
            assert_eq!(l.next_u64(), r.next_u64());
        }
    }

    #[test]
    fn test_fill_bytes_tail() {
        let mut rng = WyRng::seeded(3);
        let mut dst = [0u8; 13];
        rng.fill_bytes(&mut dst);
        let mut check = WyRng::seeded(3);
        let head = check.next_u64().to_ne_bytes();
        let tail = check.next_u64().to_ne_bytes();
        assert_eq!(&dst[..8], &head);
        assert_eq!(&dst[8..], &tail[..5]);
    }
}
