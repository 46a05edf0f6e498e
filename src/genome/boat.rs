use super::Genome;
use crate::gene_accessors;
use core::ops::Range;
use serde::{Deserialize, Serialize};

pub const BOAT_GENES: usize = 11;

const STEPS: usize = 0;
const RAY_RADIUS: usize = 1;
const SIGHT: usize = 2;
const MOVING_SPEED: usize = 3;
const RANDOM_DIRECTION_VALUE: usize = 4;
const BOX_WEIGHT: usize = 5;
const DISTANCE_FACTOR: usize = 6;
const BOAT_WEIGHT: usize = 7;
const BOAT_DISTANCE_FACTOR: usize = 8;
const ENEMY_WEIGHT: usize = 9;
const ENEMY_DISTANCE_FACTOR: usize = 10;

const BOAT_GROUPS: &[(&str, Range<usize>)] = &[
    ("perception", STEPS..MOVING_SPEED),
    ("locomotion", MOVING_SPEED..BOX_WEIGHT),
    ("boxes", BOX_WEIGHT..BOAT_WEIGHT),
    ("boats", BOAT_WEIGHT..ENEMY_WEIGHT),
    ("enemies", ENEMY_WEIGHT..BOAT_GENES),
];

/// Heritable parameters of one boat: how it senses, how it moves, and how strongly it is
/// drawn to boxes, other boats and enemies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoatGenome {
    genes: [f64; BOAT_GENES],
}

gene_accessors!(BoatGenome {
    steps: STEPS,
    ray_radius: RAY_RADIUS,
    sight: SIGHT,
    moving_speed: MOVING_SPEED,
    random_direction_value: RANDOM_DIRECTION_VALUE,
    box_weight: BOX_WEIGHT,
    distance_factor: DISTANCE_FACTOR,
    boat_weight: BOAT_WEIGHT,
    boat_distance_factor: BOAT_DISTANCE_FACTOR,
    enemy_weight: ENEMY_WEIGHT,
    enemy_distance_factor: ENEMY_DISTANCE_FACTOR,
});

impl BoatGenome {
    pub fn new(genes: [f64; BOAT_GENES]) -> Self {
        Self { genes }
    }
}

impl Default for BoatGenome {
    fn default() -> Self {
        Self::new([10., 5., 10., 5., 0.5, 1., 1., 0., 1., -1., 1.])
    }
}

impl Genome for BoatGenome {
    fn groups() -> &'static [(&'static str, Range<usize>)] {
        BOAT_GROUPS
    }

    #[inline]
    fn genes(&self) -> &[f64] {
        &self.genes
    }

    #[inline]
    fn genes_mut(&mut self) -> &mut [f64] {
        &mut self.genes
    }

    /// sensing ranges and speeds cannot go negative
    fn bound(idx: usize, value: f64) -> f64 {
        if idx < BOX_WEIGHT {
            value.max(0.)
        } else {
            value
        }
    }
}
