//! The agents of the current round.

use crate::{
    agent::{by_fitness, Agent},
    genome::Genome,
};
use fxhash::FxHashMap;

/// Ordered collection of the agents spawned for the current round. After
/// [purge_and_sort](Population::purge_and_sort), index 0 is the fittest.
#[derive(Debug, Clone)]
pub struct Population<G: Genome> {
    agents: Vec<Agent<G>>,
}

impl<G: Genome> Default for Population<G> {
    fn default() -> Self {
        Self { agents: vec![] }
    }
}

impl<G: Genome> From<Vec<Agent<G>>> for Population<G> {
    fn from(agents: Vec<Agent<G>>) -> Self {
        Self { agents }
    }
}

impl<G: Genome> Population<G> {
    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    #[inline]
    pub fn agents(&self) -> &[Agent<G>] {
        &self.agents
    }

    #[inline]
    pub fn agents_mut(&mut self) -> &mut [Agent<G>] {
        &mut self.agents
    }

    #[inline]
    pub fn first(&self) -> Option<&Agent<G>> {
        self.agents.first()
    }

    /// Drop every agent whose runtime object has been destroyed, returning how many went
    pub fn purge(&mut self) -> usize {
        let before = self.agents.len();
        self.agents.retain(Agent::is_alive);
        before - self.agents.len()
    }

    /// Stable sort, fittest first
    pub fn sort(&mut self) {
        self.agents.sort_by(by_fitness);
    }

    pub fn purge_and_sort(&mut self) -> usize {
        let purged = self.purge();
        self.sort();
        purged
    }

    pub fn sleep_all(&mut self) {
        self.agents.iter_mut().for_each(Agent::sleep);
    }

    pub fn activate_all(&mut self) {
        self.agents.iter_mut().for_each(Agent::activate);
    }

    /// Mean fitness per agent tag, in the order tags are first seen
    pub fn tag_averages(&self) -> Vec<(String, f64)> {
        let mut slots = FxHashMap::<&str, usize>::default();
        let mut totals: Vec<(&str, f64, usize)> = vec![];
        for agent in self.agents.iter() {
            let slot = *slots.entry(agent.tag()).or_insert_with(|| {
                totals.push((agent.tag(), 0., 0));
                totals.len() - 1
            });
            totals[slot].1 += agent.fitness();
            totals[slot].2 += 1;
        }

        totals
            .into_iter()
            .map(|(tag, sum, n)| (tag.to_string(), sum / n as f64))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        agent::Prototype,
        area::Placement,
        assert_f64_approx,
        genome::BoatGenome,
    };

    fn population(entries: &[(&str, f64)]) -> Population<BoatGenome> {
        entries
            .iter()
            .map(|(tag, fit)| {
                let mut a = Agent::spawn(
                    &Prototype::new("boat", *tag, BoatGenome::default()),
                    Placement::default(),
                );
                a.set_fitness(*fit);
                a
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_purge_and_sort() {
        let mut pop = population(&[("a", 1.), ("b", 9.), ("c", 4.), ("d", 20.)]);
        pop.agents_mut()[3].kill();
        assert_eq!(pop.purge_and_sort(), 1);
        let order = pop.agents().iter().map(|a| a.tag()).collect::<Vec<_>>();
        assert_eq!(order, ["b", "c", "a"]);
        assert_eq!(pop.purge(), 0);
    }

    #[test]
    fn test_tag_averages() {
        let mut pop = population(&[("x", 3.), ("x", 5.), ("y", 7.)]);
        pop.sort();
        let averages = pop.tag_averages();
        assert_eq!(averages.len(), 2);
        assert_eq!(averages[0].0, "y");
        assert_f64_approx!(averages[0].1, 7.);
        assert_eq!(averages[1].0, "x");
        assert_f64_approx!(averages[1].1, 4.);
    }

    #[test]
    fn test_tag_averages_empty() {
        assert!(Population::<BoatGenome>::default().tag_averages().is_empty());
    }
}
