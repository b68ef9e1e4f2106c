//! A caller side driver that plays whole games with random dice, either inline
//! or on a background thread that streams every turn over a channel.
//!
//! The board only applies moves. Rolling, picking a token and deciding who
//! plays next all live here.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::{Board, MoveOutcome};
use crate::error::{AutoplayError, BoardError, ConfigError};
use crate::types::{
    HouseColor, HouseQueryableGame, MoveInstruments, TokenId, EXIT_ROLL, MAX_ROLL,
};

mod policy;

pub use policy::{DefaultPolicy, TokenSelector};

/// Settings for an autoplayed game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplayConfig {
    /// fixed rng seed, games are drawn from entropy without one
    pub seed: Option<u64>,
    /// chance of bringing a new token out on a six while others are in play
    pub new_token_probability: f64,
    /// the loop gives up after this many turns
    pub max_turns: u32,
    /// pause between turns on the background runner
    pub move_delay_ms: u64,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        AutoplayConfig {
            seed: None,
            new_token_probability: 0.5,
            max_turns: 10_000,
            move_delay_ms: 0,
        }
    }
}

impl AutoplayConfig {
    /// parses a json document, missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AutoplayConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[allow(missing_docs)]
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.policy()?;
        if self.max_turns == 0 {
            return Err(ConfigError::Validation(
                "max_turns must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// the rng this config asks for
    pub fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }

    /// the token selection policy this config asks for
    pub fn policy(&self) -> Result<DefaultPolicy, ConfigError> {
        DefaultPolicy::new(self.new_token_probability)
    }
}

/// a fair six sided die
pub fn roll_die<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(1..=MAX_ROLL)
}

/// Instruments that throw every observation away
#[derive(Debug, Clone, Copy, Default)]
pub struct NullInstruments;

impl MoveInstruments for NullInstruments {
    fn observe_move(&self, _: Duration) {}
}

/// What happened during one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    /// 1 based turn number
    pub turn: u32,
    /// the house that rolled
    pub house: HouseColor,
    #[allow(missing_docs)]
    pub roll: u8,
    /// the token that was moved, absent when the house had nothing to move
    pub token: Option<TokenId>,
    #[allow(missing_docs)]
    pub outcome: Option<MoveOutcome>,
    /// the house that rolls next
    pub next_house: HouseColor,
}

/// How an autoplayed game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    #[allow(missing_docs)]
    pub winner: Option<HouseColor>,
    /// number of turns played
    pub turns: u32,
    /// false when the game hit `max_turns` or was stopped early
    pub completed: bool,
}

/// Plays a game turn by turn. Blue rolls first.
#[derive(Debug, Clone)]
pub struct Autoplay<S: TokenSelector = DefaultPolicy> {
    board: Board,
    current: HouseColor,
    turns: u32,
    max_turns: u32,
    selector: S,
}

impl Autoplay<DefaultPolicy> {
    /// a fresh board played with the default policy, once `config` validates
    pub fn new(config: &AutoplayConfig) -> Result<Self, AutoplayError> {
        config.validate()?;
        Ok(Autoplay::with_selector(
            Board::new()?,
            config.policy()?,
            config.max_turns,
        ))
    }
}

impl<S: TokenSelector> Autoplay<S> {
    /// plays on from an existing board, blue first
    pub fn with_selector(board: Board, selector: S, max_turns: u32) -> Self {
        Autoplay {
            board,
            current: HouseColor::Blue,
            turns: 0,
            max_turns,
            selector,
        }
    }

    #[allow(missing_docs)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// the house about to roll
    pub fn current_house(&self) -> HouseColor {
        self.current
    }

    #[allow(missing_docs)]
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Rolls for the current house and plays the selected token. A six or a
    /// capture earns another roll, a finished house always passes the turn.
    pub fn play_next_move<R: Rng, I: MoveInstruments>(
        &mut self,
        rng: &mut R,
        instruments: &I,
    ) -> Result<TurnReport, BoardError> {
        let house = self.current;
        let roll = roll_die(rng);

        let token = if self.board.all_tokens_arrived_at_end(house) {
            None
        } else {
            self.selector.select(&self.board, house, roll, rng)
        };

        let outcome = match token {
            Some(token) => {
                let start = Instant::now();
                let outcome = self.board.move_token(token, roll)?;
                instruments.observe_move(start.elapsed());
                Some(outcome)
            }
            None => None,
        };

        let captured = outcome
            .as_ref()
            .map(|o| !o.captured().is_empty())
            .unwrap_or(false);
        let keeps_turn = !self.board.all_tokens_arrived_at_end(house)
            && (roll == EXIT_ROLL || captured);
        let next_house = if keeps_turn {
            house
        } else {
            self.board.next_turn(house)
        };

        self.turns += 1;
        self.current = next_house;
        debug!(turn = self.turns, %house, roll, ?token, ?outcome, %next_house, "turn");

        Ok(TurnReport {
            turn: self.turns,
            house,
            roll,
            token,
            outcome,
            next_house,
        })
    }

    /// whether the game is over or out of turns
    pub fn is_finished(&mut self) -> bool {
        self.board.completed() || self.turns >= self.max_turns
    }

    #[allow(missing_docs)]
    pub fn summary(&mut self) -> GameSummary {
        let completed = self.board.completed();
        GameSummary {
            winner: self.board.winner(),
            turns: self.turns,
            completed,
        }
    }

    /// plays until three houses are home or `max_turns` is reached
    pub fn play_to_completion<R: Rng, I: MoveInstruments>(
        &mut self,
        rng: &mut R,
        instruments: &I,
    ) -> Result<GameSummary, BoardError> {
        while !self.is_finished() {
            self.play_next_move(rng, instruments)?;
        }
        let summary = self.summary();
        info!(
            winner = ?summary.winner,
            turns = summary.turns,
            completed = summary.completed,
            "game finished"
        );
        Ok(summary)
    }
}

/// A game running on its own thread
#[derive(Debug)]
pub struct AutoplayHandle {
    handle: JoinHandle<Result<GameSummary, BoardError>>,
    reports: mpsc::Receiver<TurnReport>,
    stop: Arc<AtomicBool>,
}

impl AutoplayHandle {
    /// every turn played, in order. The channel closes when the game ends.
    pub fn reports(&self) -> &mpsc::Receiver<TurnReport> {
        &self.reports
    }

    /// asks the game to stop before its next turn
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// waits for the game thread and returns its summary
    pub fn join(self) -> Result<GameSummary, BoardError> {
        drop(self.reports);
        match self.handle.join() {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

/// Plays a game with the default policy on a background thread. The board is
/// owned by that thread, callers only see the turn reports. Fails before any
/// thread starts when `config` does not validate.
pub fn spawn(config: AutoplayConfig) -> Result<AutoplayHandle, AutoplayError> {
    let mut game = Autoplay::new(&config)?;
    let (tx, rx) = mpsc::channel();
    let stop = Arc::new(AtomicBool::new(false));
    let thread_stop = stop.clone();

    let handle = thread::spawn(move || -> Result<GameSummary, BoardError> {
        let mut rng = config.rng();
        let instruments = NullInstruments;

        while !thread_stop.load(Ordering::Relaxed) && !game.is_finished() {
            let report = game.play_next_move(&mut rng, &instruments)?;
            if tx.send(report).is_err() {
                debug!("report receiver dropped, stopping");
                break;
            }
            if config.move_delay_ms > 0 {
                thread::sleep(Duration::from_millis(config.move_delay_ms));
            }
        }

        let summary = game.summary();
        info!(
            winner = ?summary.winner,
            turns = summary.turns,
            completed = summary.completed,
            "background game finished"
        );
        Ok(summary)
    });

    Ok(AutoplayHandle {
        handle,
        reports: rx,
        stop,
    })
}
