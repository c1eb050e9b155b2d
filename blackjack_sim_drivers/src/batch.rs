use std::thread;

use blackjack_sim::{
    strategy::{BasicStrategy, CopyDealer, DealerHitsBelow17},
    PlayerStrategy, RoundResult, Rule, SimulationError, Simulator, SimulatorEventHandler,
};
use log::info;

use crate::{ConfigBlackjackSimulator, PlayerStrategyKind};

/// Money and hand counts accumulated over many rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Statistics {
    rounds: u64,
    total_bet: u64,
    total_wagered: u64,
    current_money: i64,

    hands_won: u64,
    hands_pushed: u64,
    hands_lost: u64,
}

impl Statistics {
    /// Adds one round played with the given initial bet.
    pub fn record(&mut self, bet: u32, result: &RoundResult) {
        self.rounds += 1;
        self.total_bet += bet as u64;
        self.total_wagered += result.wagered;
        self.current_money += result.net;
        self.hands_won += result.hands_won as u64;
        self.hands_pushed += result.hands_pushed as u64;
        self.hands_lost += result.hands_lost as u64;
    }

    pub fn merge(&mut self, other: &Statistics) {
        self.rounds += other.rounds;
        self.total_bet += other.total_bet;
        self.total_wagered += other.total_wagered;
        self.current_money += other.current_money;
        self.hands_won += other.hands_won;
        self.hands_pushed += other.hands_pushed;
        self.hands_lost += other.hands_lost;
    }

    pub fn get_rounds(&self) -> u64 {
        self.rounds
    }

    /// Sum of the initial bets, one per round.
    pub fn get_total_bet(&self) -> u64 {
        self.total_bet
    }

    /// Sum of every bet, doubles and splits included.
    pub fn get_total_wagered(&self) -> u64 {
        self.total_wagered
    }

    pub fn get_current_money(&self) -> i64 {
        self.current_money
    }

    pub fn get_hands(&self) -> (u64, u64, u64) {
        (self.hands_won, self.hands_pushed, self.hands_lost)
    }

    /// Net money per round.
    pub fn get_average(&self) -> f64 {
        if self.rounds == 0 {
            return 0.0;
        }
        self.current_money as f64 / self.rounds as f64
    }

    /// Net money per unit actually wagered.
    pub fn get_rate(&self) -> f64 {
        if self.total_wagered == 0 {
            return 0.0;
        }
        self.current_money as f64 / self.total_wagered as f64
    }

    /// Player edge in percent of the initial bet. Negative means the house wins.
    pub fn get_edge(&self, bet: u32) -> f64 {
        self.get_average() / bet as f64 * 100.0
    }

    pub fn describe_edge(&self, bet: u32) -> String {
        let edge = self.get_edge(bet);
        if edge > 0.0 {
            format!("This is a +{:.2}% edge", edge)
        } else if edge == 0.0 {
            String::from("This is a net neutral strategy")
        } else {
            format!("This is a -{:.2}% edge", -edge)
        }
    }
}

/// Logs every `games_in_period` finished rounds of one worker.
struct ProgressHandler {
    worker: usize,
    games_in_period: u64,
    finished: u64,
}

impl SimulatorEventHandler for ProgressHandler {
    fn on_summary_game(&mut self, _: &RoundResult) {
        self.finished += 1;
        if self.games_in_period > 0 && self.finished % self.games_in_period == 0 {
            info!("worker {} finished {} rounds", self.worker, self.finished);
        }
    }
}

/// Plays `number_of_rounds` independent rounds spread over worker threads.
/// Each worker owns its simulator and shoe, so nothing is shared until the
/// statistics are merged.
pub fn run_batch(
    rule: &Rule,
    simulator_config: &ConfigBlackjackSimulator,
) -> Result<Statistics, SimulationError> {
    let number_of_threads = resolve_number_of_threads(simulator_config.number_of_threads);
    info!(
        "playing {} rounds of {:?} on {} threads",
        simulator_config.number_of_rounds, simulator_config.player_strategy, number_of_threads
    );

    let results: Vec<Result<Statistics, SimulationError>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..number_of_threads)
            .map(|worker| {
                let rounds =
                    rounds_for_worker(simulator_config.number_of_rounds, number_of_threads, worker);
                scope.spawn(move || run_worker(rule, simulator_config, worker, rounds))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect()
    });

    let mut statistics = Statistics::default();
    for result in results {
        statistics.merge(&result?);
    }
    Ok(statistics)
}

fn resolve_number_of_threads(number_of_threads: usize) -> usize {
    if number_of_threads == 0 {
        match thread::available_parallelism() {
            Ok(n) => n.get(),
            Err(_) => 1,
        }
    } else {
        number_of_threads
    }
}

fn rounds_for_worker(number_of_rounds: u64, number_of_threads: usize, worker: usize) -> u64 {
    let number_of_threads = number_of_threads as u64;
    let worker = worker as u64;
    number_of_rounds / number_of_threads + u64::from(worker < number_of_rounds % number_of_threads)
}

fn run_worker(
    rule: &Rule,
    simulator_config: &ConfigBlackjackSimulator,
    worker: usize,
    rounds: u64,
) -> Result<Statistics, SimulationError> {
    let seed = simulator_config
        .seed
        .map(|seed| seed.wrapping_add(worker as u64));
    let mut handler = ProgressHandler {
        worker,
        games_in_period: simulator_config.games_in_period,
        finished: 0,
    };
    match simulator_config.player_strategy {
        PlayerStrategyKind::BasicStrategy => play_rounds(
            rule,
            seed,
            BasicStrategy::new(),
            rounds,
            simulator_config.bet,
            &mut handler,
        ),
        PlayerStrategyKind::CopyDealer => play_rounds(
            rule,
            seed,
            CopyDealer,
            rounds,
            simulator_config.bet,
            &mut handler,
        ),
    }
}

fn play_rounds<P: PlayerStrategy>(
    rule: &Rule,
    seed: Option<u64>,
    player_strategy: P,
    rounds: u64,
    bet: u32,
    handler: &mut ProgressHandler,
) -> Result<Statistics, SimulationError> {
    let mut simulator = match seed {
        Some(seed) => Simulator::with_seed(rule, seed, player_strategy, DealerHitsBelow17)?,
        None => Simulator::new(rule, player_strategy, DealerHitsBelow17)?,
    };

    let mut statistics = Statistics::default();
    for _ in 0..rounds {
        let result = simulator.play_round_with_handler(bet, handler)?;
        statistics.record(bet, &result);
    }
    Ok(statistics)
}
