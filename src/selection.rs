//! Parent selection over a population sorted fittest-first.
//!
//! Selection only reads the population; it returns the indices of the chosen agents, and
//! [ParentSet::select] snapshots them so the population can be replaced afterwards.

use crate::{
    agent::{Agent, Snapshot},
    constants::SMARTBOATS_SELECTION_BIAS,
    genome::Genome,
};
use rand::{seq::IndexedRandom, Rng, RngCore};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum Selection {
    /// the top K agents, ties kept in population order
    #[default]
    Deterministic,
    /// fitness-proportional sampling without replacement. Every score is first lowered by
    /// `bias` times the worst fitness: at 0 selection is purely proportional, at 1 the worst
    /// agent has no chance at all.
    Stochastic {
        #[serde(default = "default_bias")]
        bias: f64,
    },
}

fn default_bias() -> f64 {
    SMARTBOATS_SELECTION_BIAS
}

impl Selection {
    /// Indices of up to `count` distinct agents of `sorted`
    pub fn select<G: Genome>(
        &self,
        sorted: &[Agent<G>],
        count: usize,
        rng: &mut impl RngCore,
    ) -> Vec<usize> {
        match *self {
            Self::Deterministic => top_k(sorted.len(), count),
            Self::Stochastic { bias } => {
                let fitness = sorted.iter().map(Agent::fitness).collect::<Vec<_>>();
                stochastic(&fitness, count, bias, rng)
            }
        }
    }
}

pub fn top_k(len: usize, count: usize) -> Vec<usize> {
    (0..count.min(len)).collect()
}

/// Draw `count` distinct indices of `fitness` (sorted descending), each draw proportional to
/// the remaining truncated scores.
///
/// A draw walks the pool from worst to best, subtracting probability mass from a uniform
/// roll until it reaches zero, so floating point slack always lands on better agents; a roll
/// that survives the whole walk picks the best remaining agent. When no remaining agent has
/// a positive score the worst remaining one is taken instead of rolling. Infinite scores
/// outweigh every finite one and are drawn uniformly among themselves.
pub fn stochastic(fitness: &[f64], count: usize, bias: f64, rng: &mut impl RngCore) -> Vec<usize> {
    let worst = fitness
        .iter()
        .rev()
        .find(|f| f.is_finite())
        .copied()
        .unwrap_or(0.);

    let mut pool = fitness
        .iter()
        .map(|f| (f - worst * bias).max(0.))
        .enumerate()
        .collect::<Vec<_>>();

    let mut picked = Vec::with_capacity(count.min(pool.len()));
    while picked.len() < count && !pool.is_empty() {
        let peak = pool.iter().map(|(_, score)| *score).fold(0., f64::max);
        let slot = if peak == f64::INFINITY {
            let unbounded = (0..pool.len())
                .filter(|slot| pool[*slot].1 == f64::INFINITY)
                .collect::<Vec<_>>();
            *unbounded.choose(rng).unwrap_or(&0)
        } else if peak > 0. {
            // scaled by the peak so the sum cannot overflow
            let total = pool.iter().map(|(_, score)| score / peak).sum::<f64>();
            let mut roll = rng.random::<f64>();
            pool.iter()
                .rposition(|(_, score)| {
                    roll -= score / peak / total;
                    roll <= 0.
                })
                .unwrap_or(0)
        } else {
            pool.len() - 1
        };
        picked.push(pool.remove(slot).0);
    }

    picked
}

/// Genomes chosen to seed the next generation. Empty only before the first selection.
#[derive(Debug, Clone)]
pub struct ParentSet<G: Genome> {
    members: Vec<Snapshot<G>>,
}

impl<G: Genome> Default for ParentSet<G> {
    fn default() -> Self {
        Self { members: vec![] }
    }
}

impl<G: Genome> ParentSet<G> {
    /// Run `selection` over `sorted` and snapshot the winners, in selection order
    pub fn select(
        selection: &Selection,
        sorted: &[Agent<G>],
        count: usize,
        rng: &mut impl RngCore,
    ) -> Self {
        Self {
            members: selection
                .select(sorted, count, rng)
                .into_iter()
                .map(|idx| sorted[idx].snapshot())
                .collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn members(&self) -> &[Snapshot<G>] {
        &self.members
    }

    /// A uniformly random parent; the same parent may be drawn repeatedly
    pub fn choose(&self, rng: &mut impl RngCore) -> Option<&G> {
        self.members.choose(rng).map(|s| &s.genome)
    }
}
