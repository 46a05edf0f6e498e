//! Property-based tests for the genetic operators and selection.

use proptest::prelude::*;
use smartboats::{
    crossover::{crossover, loci},
    genome::{boat::BOAT_GENES, BoatGenome, Genome},
    mutate::Perturbation,
    random::WyRng,
    selection::{stochastic, Selection},
    Agent, Placement, Prototype,
};
use std::collections::HashSet;

fn sorted_agents(mut fitness: Vec<f64>) -> Vec<Agent<BoatGenome>> {
    fitness.sort_by(|l, r| r.total_cmp(l));
    let prototype = Prototype::new("boat", "red", BoatGenome::default());
    fitness
        .into_iter()
        .map(|f| {
            let mut agent = Agent::spawn(&prototype, Placement::default());
            agent.set_fitness(f);
            agent
        })
        .collect()
}

proptest! {
    #[test]
    fn crossover_reconstructs_parents(
        len in 1usize..64,
        points in 1usize..8,
        seed in any::<u64>()
    ) {
        let l = (0..len).map(|idx| idx as f64 + 1.).collect::<Vec<_>>();
        let r = l.iter().map(|v| -v).collect::<Vec<_>>();
        let (x, y) = crossover(&l, &r, &loci(len, &[], false), points, &mut WyRng::seeded(seed));

        prop_assert_eq!(x.len(), len);
        prop_assert_eq!(y.len(), len);
        for idx in 0..len {
            let (from_l, from_r) = if x[idx] == l[idx] { (x[idx], y[idx]) } else { (y[idx], x[idx]) };
            prop_assert_eq!(from_l, l[idx]);
            prop_assert_eq!(from_r, r[idx]);
        }
    }

    #[test]
    fn grouped_crossover_never_splits_a_group(points in 1usize..6, seed in any::<u64>()) {
        let l = BoatGenome::new(core::array::from_fn(|idx| idx as f64 + 1.));
        let r = BoatGenome::new(core::array::from_fn(|idx| -(idx as f64) - 1.));
        let (x, y) = l.crossover_with(&r, true, points, &mut WyRng::seeded(seed));

        for (_, group) in BoatGenome::groups() {
            for child in [&x, &y] {
                let genes = &child.genes()[group.clone()];
                let all_l = genes.iter().all(|v| *v > 0.);
                let all_r = genes.iter().all(|v| *v < 0.);
                prop_assert!(all_l || all_r);
            }
            prop_assert_ne!(x.genes()[group.start] > 0., y.genes()[group.start] > 0.);
        }
    }

    #[test]
    fn mutation_without_chance_is_identity(
        genes in prop::collection::vec(-50.0..50.0f64, BOAT_GENES),
        factor in 0.0..100.0f64,
        gaussian in any::<bool>(),
        seed in any::<u64>()
    ) {
        let mut array = [0.; BOAT_GENES];
        array.copy_from_slice(&genes);
        let genome = BoatGenome::new(array);
        let perturbation = if gaussian { Perturbation::Gaussian } else { Perturbation::Uniform };
        prop_assert_eq!(genome.mutated(factor, 0., perturbation, &mut WyRng::seeded(seed)), genome);
    }

    #[test]
    fn deterministic_selection_takes_the_top(
        fitness in prop::collection::vec(-100.0..100.0f64, 1..40),
        count in 1usize..50
    ) {
        let agents = sorted_agents(fitness);
        let picked = Selection::Deterministic.select(&agents, count, &mut WyRng::seeded(0));

        prop_assert_eq!(picked.len(), count.min(agents.len()));
        prop_assert_eq!(picked.iter().collect::<HashSet<_>>().len(), picked.len());
        for pair in picked.windows(2) {
            prop_assert!(agents[pair[0]].fitness() >= agents[pair[1]].fitness());
        }
        let floor = agents[*picked.last().unwrap()].fitness();
        prop_assert!(agents.iter().enumerate().all(|(idx, a)| picked.contains(&idx) || a.fitness() <= floor));
    }

    #[test]
    fn stochastic_selection_returns_distinct_agents(
        mut fitness in prop::collection::vec(-100.0..100.0f64, 0..40),
        count in 0usize..50,
        bias in 0.0..=1.0f64,
        seed in any::<u64>()
    ) {
        fitness.sort_by(|l, r| r.total_cmp(l));
        let picked = stochastic(&fitness, count, bias, &mut WyRng::seeded(seed));

        prop_assert_eq!(picked.len(), count.min(fitness.len()));
        prop_assert_eq!(picked.iter().collect::<HashSet<_>>().len(), picked.len());
        prop_assert!(picked.iter().all(|idx| *idx < fitness.len()));
    }
}
