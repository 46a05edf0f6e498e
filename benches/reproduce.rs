use criterion::Criterion;
use smartboats::{
    config::SimulationConfig,
    random::default_rng,
    reproduce::Breeding,
    selection::{ParentSet, Selection},
    Agent, BoatGenome, Placement, Prototype,
};

fn population(size: usize) -> Vec<Agent<BoatGenome>> {
    let prototype = Prototype::new("boat", "red", BoatGenome::default());
    (0..size)
        .map(|idx| {
            let mut agent = Agent::spawn(&prototype, Placement::default());
            agent.set_fitness((size - idx) as f64);
            agent
        })
        .collect()
}

fn bench_reproduce(bench: &mut Criterion) {
    let mut rng = default_rng();
    let sorted = population(100);
    let parents = ParentSet::select(&Selection::Deterministic, &sorted, 10, &mut rng);

    let asexual = Breeding::from(&SimulationConfig::default());
    bench.bench_function("reproduce-asexual", |b| {
        b.iter(|| asexual.reproduce(&mut population(100), &parents, &mut rng))
    });

    let paired = Breeding::from(&SimulationConfig {
        crossover: true,
        grouped_genes: true,
        ..Default::default()
    });
    bench.bench_function("reproduce-crossover", |b| {
        b.iter(|| paired.reproduce(&mut population(100), &parents, &mut rng))
    });
}

pub fn benches() {
    #[cfg(not(feature = "smol_bench"))]
    let mut criterion: criterion::Criterion<_> = Criterion::default()
        .sample_size(1000)
        .significance_level(0.1);
    #[cfg(feature = "smol_bench")]
    let mut criterion: criterion::Criterion<_> = {
        use core::time::Duration;
        Criterion::default()
            .measurement_time(Duration::from_millis(1))
            .sample_size(10)
            .nresamples(1)
            .without_plots()
            .configure_from_args()
    };
    bench_reproduce(&mut criterion);
}

fn main() {
    benches();
    criterion::Criterion::default()
        .configure_from_args()
        .final_summary();
}
