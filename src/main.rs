use rand::{Rng, RngCore};
use smartboats::{
    random::Happens, roster_from_dir, seeded_rng, Area, BoatGenome, BoxField, DirArchive,
    Error, FileLedger, GenerationController, Prototype, SimulationConfig, State, Status,
};
use std::{cell::RefCell, env, rc::Rc};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const ROUNDS: u64 = 50;
const TICK: f64 = 0.1;
const DEATH_CHANCE: f64 = 0.0005;

/// Stand-in for a physics runtime: every active boat scores by how well its genes would
/// find boxes, with some noise, and occasionally sinks. Boxes within sight of a boat's
/// spawn point are collected outright.
fn simulate(genome: &BoatGenome, rng: &mut impl RngCore) -> f64 {
    let reach = genome.sight().min(20.) * genome.ray_radius().min(10.) / 50.;
    let pace = genome.moving_speed().min(10.) * (1. - genome.random_direction_value().abs().min(1.));
    let greed = genome.box_weight() * genome.distance_factor().max(0.1);
    let wasted = (genome.steps() - 8.).abs() / 10.;
    (reach * pace * greed - wasted + rng.random_range(-0.5..0.5)).max(0.) * TICK
}

fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = env::args().skip(1);
    let config = match args.next() {
        Some(path) => SimulationConfig::from_file(path)?,
        None => SimulationConfig::default(),
    };
    let roster = args
        .next()
        .map(roster_from_dir::<BoatGenome, _>)
        .transpose()?;

    let prototypes = vec![
        Prototype::new("boat", "red", BoatGenome::default()),
        Prototype::new("boat", "blue", BoatGenome::default()),
    ];
    let area = Area::new([-50., 0., -50.], [50., 0., 50.], config.population, prototypes)
        .with_rotation([0., -180., 0.], [0., 180., 0.])
        .with_walls(5.);
    let ledger = FileLedger::open(&config.score_path)?;
    let archive = DirArchive::new(&config.archive_dir);
    let rng = seeded_rng(config.seed);

    let boxes = Rc::new(RefCell::new(BoxField::new([-50., 0., -50.], [50., 0., 50.], 40)));
    let mut controller =
        GenerationController::new(config, area, ledger, archive, rng).with_scenery(boxes.clone());
    let mut runtime = seeded_rng(controller.config().seed.map(|s| s.wrapping_add(1)));

    match roster {
        Some(roster) => {
            controller.set_roster(roster);
            controller.start_play_mode();
        }
        None if controller.state() == State::Idle => controller.start_simulation(),
        None => {}
    }

    let last = controller.round() + ROUNDS;
    while controller.round() < last && controller.state() != State::Idle {
        for agent in controller.population_mut().agents_mut().iter_mut() {
            if agent.status() != Status::Active {
                continue;
            }
            if runtime.happens(DEATH_CHANCE) {
                agent.kill();
                continue;
            }
            let mut points = simulate(agent.genome(), &mut runtime);
            let reach = agent.genome().sight().clamp(0., 20.);
            if boxes
                .borrow_mut()
                .collect_near(agent.placement().position, reach)
            {
                points += agent.genome().box_weight().max(0.);
            }
            agent.add_points(points);
        }
        controller.tick(TICK);
    }

    match controller.state() {
        State::PlayMode => controller.stop_play_mode(),
        _ => controller.stop_simulation(),
    }

    if let Some(winner) = controller.last_winner() {
        info!(
            round = controller.round(),
            best = winner.fitness,
            genome = ?winner.genome,
            "finished"
        );
    }
    Ok(())
}
