//! The round-based evolution loop: a tick-driven state machine owning the population.
//!
//! ```text
//!          start_simulation / continue_simulation / start_simulation_stored
//!   Idle ─────────────────────────────────────────────────────────────────▶ Running
//!    ▲ ◀──────────────────────────── stop_simulation ────────────────────────┘
//!    │
//!    └──── stop_play_mode ──── PlayMode ◀──── start_play_mode (any state)
//! ```
//!
//! While running, [tick](GenerationController::tick) accumulates time and performs one
//! round transition every `interval` seconds: a generation in `Running`, a repeated
//! evaluation of the stored roster in `PlayMode`. Collaborator failures (ledger, archive)
//! are logged and skipped; nothing here returns an error.

use crate::{
    agent::{Agent, Prototype, Snapshot},
    archive::Archive,
    area::{AreaGenerator, Scenery},
    config::SimulationConfig,
    constants::{SMARTBOATS_PLAY_HEADER, SMARTBOATS_SCORES_HEADER},
    genome::Genome,
    ledger::{Ledger, ScoreEntry},
    population::Population,
    random::WyRng,
    reproduce::{Breeding, Reproduction},
    selection::ParentSet,
};
use rand::RngCore;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Running,
    PlayMode,
}

pub struct GenerationController<G, A, L, S, R = WyRng>
where
    G: Genome,
    A: AreaGenerator<G>,
    L: Ledger,
    S: Archive<G>,
    R: RngCore,
{
    config: SimulationConfig,
    breeding: Breeding,
    state: State,
    round: u64,
    elapsed: f64,
    population: Population<G>,
    parents: ParentSet<G>,
    roster: Vec<Prototype<G>>,
    last_winner: Option<Snapshot<G>>,
    area: A,
    scenery: Vec<Box<dyn Scenery>>,
    ledger: L,
    archive: S,
    rng: R,
}

impl<G, A, L, S, R> GenerationController<G, A, L, S, R>
where
    G: Genome,
    A: AreaGenerator<G>,
    L: Ledger,
    S: Archive<G>,
    R: RngCore,
{
    /// Build an idle controller, or a running one if `config.run_on_start` is set.
    /// `config` is [normalized](SimulationConfig::normalized) first.
    pub fn new(config: SimulationConfig, area: A, ledger: L, archive: S, rng: R) -> Self {
        let config = config.normalized();
        let mut controller = Self {
            breeding: Breeding::from(&config),
            state: State::Idle,
            round: config.initial_round,
            elapsed: 0.,
            population: Population::default(),
            parents: ParentSet::default(),
            roster: vec![],
            last_winner: None,
            area,
            scenery: vec![],
            ledger,
            archive,
            rng,
            config,
        };

        if controller.config.run_on_start {
            controller.start_simulation();
        }
        controller
    }

    pub fn with_roster(mut self, roster: Vec<Prototype<G>>) -> Self {
        self.roster = roster;
        self
    }

    pub fn with_scenery(mut self, scenery: impl Scenery + 'static) -> Self {
        self.add_scenery(scenery);
        self
    }

    pub fn add_scenery(&mut self, scenery: impl Scenery + 'static) {
        self.scenery.push(Box::new(scenery));
    }

    /// Replace the stored roster used by play mode and stored starts
    pub fn set_roster(&mut self, roster: Vec<Prototype<G>>) {
        self.roster = roster;
    }

    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    #[inline]
    pub fn round(&self) -> u64 {
        self.round
    }

    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    #[inline]
    pub fn population(&self) -> &Population<G> {
        &self.population
    }

    /// Where the simulation writes fitness and kills agents between ticks
    #[inline]
    pub fn population_mut(&mut self) -> &mut Population<G> {
        &mut self.population
    }

    #[inline]
    pub fn parents(&self) -> &ParentSet<G> {
        &self.parents
    }

    #[inline]
    pub fn roster(&self) -> &[Prototype<G>] {
        &self.roster
    }

    /// Best agent of the last finished round
    #[inline]
    pub fn last_winner(&self) -> Option<&Snapshot<G>> {
        self.last_winner.as_ref()
    }

    #[inline]
    pub fn area(&self) -> &A {
        &self.area
    }

    #[inline]
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    #[inline]
    pub fn archive(&self) -> &S {
        &self.archive
    }

    pub fn scenery_mut(&mut self) -> &mut [Box<dyn Scenery>] {
        &mut self.scenery
    }

    /// Start evolving from scratch: fresh ledger, round and timer, and an unparented population
    pub fn start_simulation(&mut self) {
        self.clear_scores(SMARTBOATS_SCORES_HEADER);
        self.elapsed = 0.;
        self.round = self.config.initial_round;
        self.parents = ParentSet::default();
        self.regenerate_scenery();
        self.repopulate(false);
        self.state = State::Running;
        info!(agents = self.population.len(), "simulation started");
    }

    /// Resume evolving the current population, finishing its round right away
    pub fn continue_simulation(&mut self) {
        if self.state != State::Idle || self.population.len() <= self.config.parent_count {
            warn!(
                state = ?self.state,
                agents = self.population.len(),
                parent_count = self.config.parent_count,
                "no simulation to continue, or one is still running"
            );
            return;
        }

        self.elapsed = 0.;
        self.make_new_generation();
        self.state = State::Running;
    }

    /// Stop the clock, drop dead agents and put the rest to sleep
    pub fn stop_simulation(&mut self) {
        self.state = State::Idle;
        let purged = self.population.purge();
        self.population.sleep_all();
        info!(purged, agents = self.population.len(), "simulation stopped");
    }

    /// Throw away the current run and keep evolving from the stored roster
    pub fn start_simulation_stored(&mut self) {
        if self.roster.len() <= self.config.parent_count {
            warn!(
                roster = self.roster.len(),
                parent_count = self.config.parent_count,
                "not enough stored agents to simulate"
            );
            return;
        }

        self.stop_simulation();
        self.regenerate_scenery();
        self.elapsed = 0.;
        self.parents = ParentSet::default();
        self.spawn_roster();
        self.state = State::Running;
        info!(agents = self.population.len(), "simulation started from stored agents");
    }

    /// Evaluate the stored roster round after round, logging mean fitness per tag
    pub fn start_play_mode(&mut self) {
        if self.roster.is_empty() {
            warn!("no stored agents to play with");
            return;
        }

        self.clear_scores(SMARTBOATS_PLAY_HEADER);
        self.regenerate_scenery();
        self.elapsed = 0.;
        self.parents = ParentSet::default();
        self.spawn_roster();
        self.state = State::PlayMode;
        info!(agents = self.population.len(), "entered play mode");
    }

    pub fn stop_play_mode(&mut self) {
        if self.state != State::PlayMode {
            warn!(state = ?self.state, "not in play mode");
            return;
        }

        self.stop_simulation();
        info!("exited play mode");
    }

    /// Advance the clock by `dt` seconds, running at most one round transition
    pub fn tick(&mut self, dt: f64) {
        if self.state == State::Idle {
            return;
        }

        self.elapsed += dt;
        if self.elapsed < self.config.interval {
            return;
        }
        self.elapsed -= self.config.interval;

        match self.state {
            State::Running => self.make_new_generation(),
            State::PlayMode => self.save_game_and_play_again(),
            State::Idle => {}
        }
    }

    /// Finish the current generation: rank it, log and archive it, select parents and
    /// breed the next population. Advances the round counter.
    pub fn make_new_generation(&mut self) {
        self.regenerate_scenery();

        let purged = self.population.purge();
        if self.population.is_empty() {
            warn!(
                round = self.round,
                purged, "no agent survived the round, starting over without parents"
            );
            self.repopulate(true);
            self.round += 1;
            return;
        }

        self.population.sort();
        let winner = self.population.agents()[0].snapshot();
        info!(
            round = self.round,
            best = winner.fitness,
            name = %winner.name,
            purged,
            "generation finished"
        );
        self.record(&ScoreEntry::best(self.round, winner.fitness));
        self.archive_generation(&winner);
        self.last_winner = Some(winner);

        self.parents = ParentSet::select(
            &self.config.selection,
            self.population.agents(),
            self.config.parent_count,
            &mut self.rng,
        );
        let how = self.repopulate(false);
        debug!(
            round = self.round,
            parents = self.parents.len(),
            agents = self.population.len(),
            ?how,
            "next generation spawned"
        );
        self.round += 1;
    }

    /// Finish a play round: log the best fitness and the mean per tag, then respawn the
    /// roster unchanged. Advances the round counter.
    pub fn save_game_and_play_again(&mut self) {
        self.population.purge_and_sort();

        match self.population.first().map(Agent::snapshot) {
            Some(winner) => {
                info!(
                    round = self.round,
                    best = winner.fitness,
                    tag = %winner.tag,
                    "play round finished"
                );
                let entry = ScoreEntry::averages(
                    self.round,
                    winner.fitness,
                    self.population.tag_averages(),
                );
                self.record(&entry);
                self.last_winner = Some(winner);
            }
            None => warn!(round = self.round, "no agent survived the play round"),
        }

        self.regenerate_scenery();
        self.spawn_roster();
        self.round += 1;
    }

    /// Start the score log over with `header`
    pub fn clear_scores(&mut self, header: &str) {
        match self.ledger.clear(header) {
            Ok(()) => debug!(header, "scores cleared"),
            Err(e) => warn!(error = %e, "could not clear the scores"),
        }
    }

    fn record(&mut self, entry: &ScoreEntry) {
        if let Err(e) = self.ledger.record(entry) {
            warn!(round = entry.round, error = %e, "score not recorded");
        }
    }

    /// Expects the population sorted, `winner` being its first agent
    fn archive_generation(&mut self, winner: &Snapshot<G>) {
        let round = self.round;
        let saved = if self.config.save_complete_generations {
            self.population
                .agents()
                .iter()
                .enumerate()
                .try_for_each(|(idx, agent)| {
                    let name = format!("Complete Gen-{round}/({}){}Gen-{round}", idx + 1, agent.name());
                    self.archive.save(&agent.snapshot(), &name)
                })
        } else {
            self.archive
                .save(winner, &format!("{}Gen-{round}", winner.name))
        };

        if let Err(e) = saved {
            warn!(round, error = %e, "generation not archived");
        }
    }

    fn regenerate_scenery(&mut self) {
        for scenery in self.scenery.iter_mut() {
            scenery.regenerate(&mut self.rng);
        }
    }

    /// Spawn a full area and breed it from the parent set, or from nothing if `unparented`
    fn repopulate(&mut self, unparented: bool) -> Reproduction {
        let mut agents = self.area.regenerate(&mut self.rng);
        let orphans = ParentSet::default();
        let parents = if unparented { &orphans } else { &self.parents };
        let how = self.breeding.reproduce(&mut agents, parents, &mut self.rng);
        self.population = agents.into();
        how
    }

    fn spawn_roster(&mut self) {
        let agents = self.area.regenerate_from(&self.roster, &mut self.rng);
        self.population = agents.into();
        self.population.activate_all();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        agent::Status, archive::MemoryArchive, area::Area, assert_f64_approx,
        genome::BoatGenome, ledger::MemoryLedger,
    };
    use std::{cell::Cell, rc::Rc};

    type Controller =
        GenerationController<BoatGenome, Area<BoatGenome>, MemoryLedger, MemoryArchive<BoatGenome>>;

    fn controller(config: SimulationConfig) -> Controller {
        let area = Area::new(
            [0.; 3],
            [10., 0., 10.],
            config.population,
            vec![Prototype::new("boat", "boat", BoatGenome::default())],
        );
        GenerationController::new(
            config,
            area,
            MemoryLedger::default(),
            MemoryArchive::default(),
            WyRng::seeded(81),
        )
    }

    fn config() -> SimulationConfig {
        SimulationConfig {
            interval: 1.,
            population: 6,
            parent_count: 2,
            ..Default::default()
        }
    }

    fn score(controller: &mut Controller) {
        for (idx, agent) in controller.population_mut().agents_mut().iter_mut().enumerate() {
            agent.set_fitness(idx as f64);
        }
    }

    #[test]
    fn test_new_is_idle() {
        let c = controller(config());
        assert_eq!(c.state(), State::Idle);
        assert!(c.population().is_empty());
        assert!(c.ledger().lines.is_empty());
    }

    #[test]
    fn test_run_on_start() {
        let c = controller(SimulationConfig {
            run_on_start: true,
            ..config()
        });
        assert_eq!(c.state(), State::Running);
        assert_eq!(c.population().len(), 6);
        assert_eq!(c.ledger().lines, vec![SMARTBOATS_SCORES_HEADER]);
    }

    #[test]
    fn test_start_activates_unparented() {
        let mut c = controller(config());
        c.start_simulation();
        assert!(c.parents().is_empty());
        assert!(c
            .population()
            .agents()
            .iter()
            .all(|a| a.status() == Status::Active));
    }

    #[test]
    fn test_tick_carries_overshoot() {
        let mut c = controller(config());
        c.start_simulation();
        c.tick(0.6);
        assert_eq!(c.round(), 0);
        c.tick(0.6);
        assert_eq!(c.round(), 1);
        assert_f64_approx!(c.elapsed(), 0.2);

        // one transition per tick, however late
        c.tick(5.);
        assert_eq!(c.round(), 2);
        assert_f64_approx!(c.elapsed(), 4.2);
    }

    #[test]
    fn test_idle_tick_does_nothing() {
        let mut c = controller(config());
        c.tick(100.);
        assert_eq!(c.round(), 0);
        assert_eq!(c.elapsed(), 0.);
    }

    #[test]
    fn test_archives_winner_by_round() {
        let mut c = controller(config());
        c.start_simulation();
        score(&mut c);
        c.make_new_generation();
        score(&mut c);
        c.make_new_generation();

        let names = c
            .archive()
            .saved
            .iter()
            .map(|(n, _)| n.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, ["boatGen-0", "boatGen-1"]);
        assert_eq!(c.last_winner().map(|w| w.fitness), Some(5.));
        assert_eq!(c.ledger().lines, vec!["Scores", "0 5", "1 5"]);
    }

    #[test]
    fn test_archives_complete_generation() {
        let mut c = controller(SimulationConfig {
            save_complete_generations: true,
            ..config()
        });
        c.start_simulation();
        score(&mut c);
        c.make_new_generation();

        let saved = &c.archive().saved;
        assert_eq!(saved.len(), 6);
        assert_eq!(saved[0].0, "Complete Gen-0/(1)boatGen-0");
        assert_eq!(saved[5].0, "Complete Gen-0/(6)boatGen-0");
        assert_eq!(saved[0].1.fitness, 5.);
        assert_eq!(saved[5].1.fitness, 0.);
    }

    #[test]
    fn test_all_dead_starts_over() {
        let mut c = controller(config());
        c.start_simulation();
        c.population_mut().agents_mut().iter_mut().for_each(Agent::kill);
        c.make_new_generation();

        assert_eq!(c.round(), 1);
        assert_eq!(c.population().len(), 6);
        assert!(c.archive().saved.is_empty());
        assert_eq!(c.ledger().lines, vec!["Scores"]);
    }

    struct Counted(Rc<Cell<usize>>);

    impl Scenery for Counted {
        fn regenerate(&mut self, _: &mut dyn RngCore) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_scenery_regenerated_each_round() {
        let count = Rc::new(Cell::new(0));
        let mut c = controller(config()).with_scenery(Counted(count.clone()));
        c.start_simulation();
        assert_eq!(count.get(), 1);
        c.make_new_generation();
        c.tick(1.);
        assert_eq!(count.get(), 3);
        assert_eq!(c.round(), 2);
    }
}
