//! Filling a freshly spawned set of agents with offspring of the parent set.

use crate::{
    agent::Agent,
    config::SimulationConfig,
    genome::Genome,
    mutate::Perturbation,
    selection::ParentSet,
};
use rand::RngCore;
use tracing::{debug, warn};

/// The reproduction knobs of a [SimulationConfig]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breeding {
    pub mutation_factor: f64,
    pub mutation_chance: f64,
    pub perturbation: Perturbation,
    pub crossover: bool,
    pub grouped_genes: bool,
    pub crossover_points: usize,
}

impl From<&SimulationConfig> for Breeding {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            mutation_factor: config.mutation_factor,
            mutation_chance: config.mutation_chance,
            perturbation: config.perturbation,
            crossover: config.crossover,
            grouped_genes: config.grouped_genes,
            crossover_points: config.crossover_points,
        }
    }
}

/// How a round's offspring were produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reproduction {
    /// no ancestry: agents keep their prototype genome, mutated
    Unparented,
    /// each child is a mutated clone of one random parent
    Asexual,
    /// children come in sibling pairs from n-point crossover of two random parents
    Crossover,
}

impl Breeding {
    /// Whether crossover can run for this many parents and children. Both must be even.
    pub fn crossover_viable(&self, parents: usize, children: usize) -> bool {
        self.crossover && parents % 2 == 0 && children % 2 == 0
    }

    fn finish<G: Genome>(&self, agent: &mut Agent<G>, rng: &mut impl RngCore) {
        agent.mutate(
            self.mutation_factor,
            self.mutation_chance,
            self.perturbation,
            rng,
        );
        agent.activate();
    }

    /// Give every agent of `agents` its genome for the coming round, mutate it, and wake it.
    pub fn reproduce<G: Genome>(
        &self,
        agents: &mut [Agent<G>],
        parents: &ParentSet<G>,
        rng: &mut impl RngCore,
    ) -> Reproduction {
        if parents.is_empty() {
            for agent in agents.iter_mut() {
                self.finish(agent, rng);
            }
            return Reproduction::Unparented;
        }

        if self.crossover && !self.crossover_viable(parents.len(), agents.len()) {
            warn!(
                parents = parents.len(),
                children = agents.len(),
                "crossover needs an even number of parents and children, reproducing asexually this round"
            );
        }

        if !self.crossover_viable(parents.len(), agents.len()) {
            for agent in agents.iter_mut() {
                if let Some(parent) = parents.choose(rng) {
                    agent.birth(parent);
                }
                self.finish(agent, rng);
            }
            debug!(children = agents.len(), "asexual reproduction");
            return Reproduction::Asexual;
        }

        for pair in agents.chunks_exact_mut(2) {
            let [sibling, agent] = pair else {
                continue;
            };
            // a parent may be drawn twice, making both siblings plain copies of it
            if let (Some(l), Some(r)) = (parents.choose(rng), parents.choose(rng)) {
                agent.crossover_birth(
                    sibling,
                    l,
                    r,
                    self.grouped_genes,
                    self.crossover_points,
                    rng,
                );
            }
            self.finish(agent, rng);
            self.finish(sibling, rng);
        }
        debug!(children = agents.len(), "crossover reproduction");
        Reproduction::Crossover
    }
}
