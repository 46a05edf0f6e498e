//! Spawning agents into a bounded region.

use crate::{
    agent::{Agent, Prototype},
    genome::Genome,
};
use rand::{seq::IndexedRandom, Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::{cell::RefCell, rc::Rc};

/// Where and how an agent was spawned
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: [f64; 3],
    /// euler angles, degrees
    pub rotation: [f64; 3],
}

/// Produces a fresh set of agents each round, replacing whatever it spawned before.
pub trait AreaGenerator<G: Genome> {
    /// How many agents a regular regeneration produces
    fn capacity(&self) -> usize;

    /// Spawn `capacity()` agents, each from a prototype of the generator's choosing
    fn regenerate(&mut self, rng: &mut impl RngCore) -> Vec<Agent<G>>;

    /// Spawn one agent per roster entry, in order, up to `capacity()`
    fn regenerate_from(&mut self, roster: &[Prototype<G>], rng: &mut impl RngCore)
        -> Vec<Agent<G>>;
}

/// Anything besides agents that is rebuilt at each round boundary, like resource boxes.
pub trait Scenery {
    fn regenerate(&mut self, rng: &mut dyn RngCore);
}

/// Scenery the runtime keeps reading between rounds, like boxes being collected
impl<S: Scenery> Scenery for Rc<RefCell<S>> {
    fn regenerate(&mut self, rng: &mut dyn RngCore) {
        self.borrow_mut().regenerate(rng);
    }
}

/// An axis-aligned wall segment along one side of an area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub center: [f64; 3],
    pub size: [f64; 3],
}

/// A box-shaped region that places agents uniformly at random with a random rotation.
#[derive(Debug, Clone)]
pub struct Area<G: Genome> {
    min: [f64; 3],
    max: [f64; 3],
    rotation_min: [f64; 3],
    rotation_max: [f64; 3],
    count: usize,
    prototypes: Vec<Prototype<G>>,
    wall_height: Option<f64>,
    spawned: usize,
}

impl<G: Genome> Area<G> {
    pub fn new(min: [f64; 3], max: [f64; 3], count: usize, prototypes: Vec<Prototype<G>>) -> Self {
        Self {
            min,
            max,
            rotation_min: [0.; 3],
            rotation_max: [0., 360., 0.],
            count,
            prototypes,
            wall_height: None,
            spawned: 0,
        }
    }

    pub fn with_rotation(mut self, min: [f64; 3], max: [f64; 3]) -> Self {
        self.rotation_min = min;
        self.rotation_max = max;
        self
    }

    pub fn with_walls(mut self, height: f64) -> Self {
        self.wall_height = Some(height);
        self
    }

    /// Agents alive from the last regeneration
    pub fn spawned(&self) -> usize {
        self.spawned
    }

    /// The four walls enclosing the area on the horizontal plane, if walls are enabled
    pub fn walls(&self) -> Vec<Wall> {
        let Some(height) = self.wall_height else {
            return vec![];
        };
        let [x0, y0, z0] = self.min;
        let [x1, _, z1] = self.max;
        let (cx, cz) = ((x0 + x1) / 2., (z0 + z1) / 2.);
        let (w, d) = (x1 - x0, z1 - z0);
        let y = y0 + height / 2.;
        vec![
            Wall { center: [cx, y, z0], size: [w, height, 1.] },
            Wall { center: [cx, y, z1], size: [w, height, 1.] },
            Wall { center: [x0, y, cz], size: [1., height, d] },
            Wall { center: [x1, y, cz], size: [1., height, d] },
        ]
    }

    fn placement(&self, rng: &mut impl RngCore) -> Placement {
        let mut placement = Placement::default();
        for axis in 0..3 {
            placement.position[axis] = between(self.min[axis], self.max[axis], rng);
            placement.rotation[axis] =
                between(self.rotation_min[axis], self.rotation_max[axis], rng);
        }
        placement
    }
}

fn between(lo: f64, hi: f64, rng: &mut impl RngCore) -> f64 {
    if hi > lo {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}

/// Resource boxes scattered uniformly over a region, replaced wholesale on every regeneration
#[derive(Debug, Clone, PartialEq)]
pub struct BoxField {
    min: [f64; 3],
    max: [f64; 3],
    count: usize,
    boxes: Vec<[f64; 3]>,
}

impl BoxField {
    pub fn new(min: [f64; 3], max: [f64; 3], count: usize) -> Self {
        Self {
            min,
            max,
            count,
            boxes: vec![],
        }
    }

    pub fn boxes(&self) -> &[[f64; 3]] {
        &self.boxes
    }

    /// Take the box closest to `position` within `reach`, if any
    pub fn collect_near(&mut self, position: [f64; 3], reach: f64) -> bool {
        let found = self.boxes.iter().position(|b| {
            b.iter()
                .zip(position)
                .map(|(b, p)| (b - p).powi(2))
                .sum::<f64>()
                <= reach * reach
        });
        found.map(|idx| self.boxes.swap_remove(idx)).is_some()
    }
}

impl Scenery for BoxField {
    fn regenerate(&mut self, mut rng: &mut dyn RngCore) {
        self.boxes = (0..self.count)
            .map(|_| {
                let mut position = [0.; 3];
                for axis in 0..3 {
                    position[axis] = between(self.min[axis], self.max[axis], &mut rng);
                }
                position
            })
            .collect();
    }
}

impl<G: Genome> AreaGenerator<G> for Area<G> {
    fn capacity(&self) -> usize {
        self.count
    }

    fn regenerate(&mut self, rng: &mut impl RngCore) -> Vec<Agent<G>> {
        let agents = (0..self.count)
            .filter_map(|_| {
                let prototype = self.prototypes.choose(rng)?;
                Some(Agent::spawn(prototype, self.placement(rng)))
            })
            .collect::<Vec<_>>();
        self.spawned = agents.len();
        agents
    }

    fn regenerate_from(
        &mut self,
        roster: &[Prototype<G>],
        rng: &mut impl RngCore,
    ) -> Vec<Agent<G>> {
        let agents = roster
            .iter()
            .take(self.count)
            .map(|prototype| Agent::spawn(prototype, self.placement(rng)))
            .collect::<Vec<_>>();
        self.spawned = agents.len();
        agents
    }
}
