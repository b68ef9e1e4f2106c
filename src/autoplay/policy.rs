use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::Board;
use crate::error::ConfigError;
use crate::types::{HouseColor, HouseQueryableGame, TokenId, EXIT_ROLL, TOKENS_PER_HOUSE};

/// Picks which token of a house moves for a given roll.
pub trait TokenSelector {
    /// the token to move, or `None` when the house has nothing that can use the roll
    fn select<R: Rng>(&self, board: &Board, house: HouseColor, roll: u8, rng: &mut R)
        -> Option<TokenId>;
}

/// Random play: bring tokens out on a six now and then, otherwise move any
/// token that is already on the track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultPolicy {
    new_token_probability: f64,
}

impl DefaultPolicy {
    /// `new_token_probability` is the chance of bringing a new token out on a
    /// six while others are in play, it has to lie within [0, 1]
    pub fn new(new_token_probability: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&new_token_probability) {
            return Err(ConfigError::Validation(format!(
                "new_token_probability must be within [0, 1], got {}",
                new_token_probability
            )));
        }
        Ok(DefaultPolicy {
            new_token_probability,
        })
    }

    #[allow(missing_docs)]
    pub fn new_token_probability(&self) -> f64 {
        self.new_token_probability
    }
}

impl Default for DefaultPolicy {
    fn default() -> Self {
        DefaultPolicy {
            new_token_probability: 0.5,
        }
    }
}

impl TokenSelector for DefaultPolicy {
    fn select<R: Rng>(
        &self,
        board: &Board,
        house: HouseColor,
        roll: u8,
        rng: &mut R,
    ) -> Option<TokenId> {
        let at_home = board.tokens_currently_in_house(house);
        let in_play = board.token_ids_in_play(house);

        if roll == EXIT_ROLL && !at_home.is_empty() {
            let bring_out = at_home.len() == TOKENS_PER_HOUSE
                || in_play.is_empty()
                || rng.gen_bool(self.new_token_probability);
            if bring_out {
                return at_home.choose(rng).copied();
            }
        }

        in_play.choose(rng).copied()
    }
}
