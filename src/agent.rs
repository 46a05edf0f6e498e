//! A live, simulated boat and the snapshots it is spawned from or archived as.

use crate::{area::Placement, genome::Genome, mutate::Perturbation};
use core::cmp::Ordering;
use rand::RngCore;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// spawned, but its runtime behavior has not started or has been halted
    Dormant,
    Active,
}

/// Something an agent can be spawned from: an area prototype, or one entry of a stored roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Prototype<G: Genome> {
    pub name: String,
    pub tag: String,
    pub genome: G,
}

impl<G: Genome> Prototype<G> {
    pub fn new(name: impl Into<String>, tag: impl Into<String>, genome: G) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
            genome,
        }
    }
}

/// What gets archived for one agent at the end of a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Snapshot<G: Genome> {
    pub name: String,
    pub tag: String,
    pub fitness: f64,
    pub genome: G,
}

impl<G: Genome> From<Snapshot<G>> for Prototype<G> {
    fn from(snapshot: Snapshot<G>) -> Self {
        Self {
            name: snapshot.name,
            tag: snapshot.tag,
            genome: snapshot.genome,
        }
    }
}

/// One spawned agent. Owned by the population; the simulation reads its genome and status,
/// accrues fitness on it, and marks it dead when its runtime object goes away.
#[derive(Debug, Clone)]
pub struct Agent<G: Genome> {
    name: String,
    tag: String,
    genome: G,
    fitness: f64,
    status: Status,
    alive: bool,
    placement: Placement,
}

impl<G: Genome> Agent<G> {
    pub fn spawn(prototype: &Prototype<G>, placement: Placement) -> Self {
        Self {
            name: prototype.name.clone(),
            tag: prototype.tag.clone(),
            genome: prototype.genome.clone(),
            fitness: 0.,
            status: Status::Dormant,
            alive: true,
            placement,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[inline]
    pub fn genome(&self) -> &G {
        &self.genome
    }

    #[inline]
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline]
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    pub fn add_points(&mut self, points: f64) {
        self.fitness += points;
    }

    /// The backing runtime object is gone; the agent is purged at the next round boundary
    pub fn kill(&mut self) {
        self.alive = false;
        self.status = Status::Dormant;
    }

    /// Take on a copy of `parent` as this agent's genome
    pub fn birth(&mut self, parent: &G) {
        self.genome = parent.clone();
        self.fitness = 0.;
    }

    /// Crossover `l` and `r`, giving one child genome to this agent and the other to `sibling`
    pub fn crossover_birth(
        &mut self,
        sibling: &mut Agent<G>,
        l: &G,
        r: &G,
        grouped: bool,
        points: usize,
        rng: &mut impl RngCore,
    ) {
        let (x, y) = l.crossover_with(r, grouped, points, rng);
        self.genome = x;
        self.fitness = 0.;
        sibling.genome = y;
        sibling.fitness = 0.;
    }

    pub fn mutate(
        &mut self,
        factor: f64,
        chance: f64,
        perturbation: Perturbation,
        rng: &mut impl RngCore,
    ) {
        self.genome = self.genome.mutated(factor, chance, perturbation, rng);
    }

    /// Start runtime behavior. Dead agents stay dormant.
    pub fn activate(&mut self) {
        if self.alive {
            self.status = Status::Active;
        }
    }

    /// Halt runtime behavior without destroying the agent
    pub fn sleep(&mut self) {
        self.status = Status::Dormant;
    }

    pub fn snapshot(&self) -> Snapshot<G> {
        Snapshot {
            name: self.name.clone(),
            tag: self.tag.clone(),
            fitness: self.fitness,
            genome: self.genome.clone(),
        }
    }
}

/// Order agents best-first. Incomparable fitness values sort last.
pub fn by_fitness<G: Genome>(l: &Agent<G>, r: &Agent<G>) -> Ordering {
    match (l.fitness.is_nan(), r.fitness.is_nan()) {
        (false, false) => r.fitness.total_cmp(&l.fitness),
        (l_nan, r_nan) => l_nan.cmp(&r_nan),
    }
}
