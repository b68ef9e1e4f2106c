#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! Types for playing four player [ludo](https://en.wikipedia.org/wiki/Ludo).
//! The goal is to provide a small rules engine that a UI or a bot can drive:
//! the board enforces the topology, movement, capture and completion rules,
//! while dice and token selection stay with the caller.
//!
//! You will likely be most interested in the [`board::Board`] type, which
//! implements all the traits in [`types`], and in [`autoplay`] if you just
//! want games played out with random dice. `benches/autoplay.rs` times a
//! whole random game and a single move.
//! ```
//! use ludo_game_types::autoplay::{Autoplay, AutoplayConfig, NullInstruments};
//!
//! let config = AutoplayConfig {
//!     seed: Some(42),
//!     max_turns: 100_000,
//!     ..AutoplayConfig::default()
//! };
//! let summary = Autoplay::new(&config)
//!     .unwrap()
//!     .play_to_completion(&mut config.rng(), &NullInstruments)
//!     .unwrap();
//! assert!(summary.completed);
//! assert!(summary.winner.is_some());
//! ```

pub mod autoplay;
pub mod board;
pub mod error;
pub mod types;
