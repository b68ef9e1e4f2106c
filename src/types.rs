//! various types that are useful for working with the ludo board
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

use crate::board::MoveOutcome;
use crate::error::BoardError;

/// Number of houses on a board
pub const N_HOUSES: usize = 4;

/// Number of tokens each house owns
pub const TOKENS_PER_HOUSE: usize = 4;

/// Number of houses that have to bring every token home before the game is over
pub const HOUSES_TO_FINISH: usize = 3;

/// The die value that lets a token leave its home slot
pub const EXIT_ROLL: u8 = 6;

/// Largest value a die can show
pub const MAX_ROLL: u8 = 6;

/// token to represent a node on the board, it is the node's index in the board arena
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct NodeId(pub u16);

impl NodeId {
    /// convert this node ID to a usize
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }

    /// build a NodeId from an arena index
    pub fn from_usize(u: usize) -> Self {
        Self(u as u16)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.0)
    }
}

/// token to represent a player piece, it is the token's index in the board arena
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct TokenId(pub u8);

impl TokenId {
    /// convert this token ID to a usize
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }

    /// build a TokenId from an arena index
    pub fn from_usize(u: usize) -> Self {
        Self(u as u8)
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for TokenId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

/// The four houses. The declaration order is both the ring order of the
/// track and the order in which houses are checked for completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HouseColor {
    #[allow(missing_docs)]
    Blue,
    #[allow(missing_docs)]
    Red,
    #[allow(missing_docs)]
    Green,
    #[allow(missing_docs)]
    Yellow,
}

impl fmt::Display for HouseColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HouseColor::Blue => write!(f, "blue"),
            HouseColor::Red => write!(f, "red"),
            HouseColor::Green => write!(f, "green"),
            HouseColor::Yellow => write!(f, "yellow"),
        }
    }
}

impl HouseColor {
    /// all houses in ring order
    pub const ALL: [HouseColor; N_HOUSES] = [
        HouseColor::Blue,
        HouseColor::Red,
        HouseColor::Green,
        HouseColor::Yellow,
    ];

    /// converts this house to a usize index. indices are the same order as `HouseColor::ALL`
    pub fn as_index(&self) -> usize {
        match self {
            HouseColor::Blue => 0,
            HouseColor::Red => 1,
            HouseColor::Green => 2,
            HouseColor::Yellow => 3,
        }
    }

    /// converts a usize index to a house
    pub fn from_index(index: usize) -> HouseColor {
        match index % N_HOUSES {
            0 => HouseColor::Blue,
            1 => HouseColor::Red,
            2 => HouseColor::Green,
            _ => HouseColor::Yellow,
        }
    }

    /// the house that follows this one around the ring
    pub fn successor(&self) -> HouseColor {
        Self::from_index(self.as_index() + 1)
    }
}

/// Category of a node on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// plain shared track cell
    Regular,
    /// the cell a token lands on when it leaves its home slot
    Entry,
    /// the shared cell where a house's own tokens turn off into the home stretch
    Branch,
    /// safe shared cell
    Star,
    /// private run leading to the end cell
    HomeStretch,
    /// a token's origin while it waits in house
    HomeSlot,
    /// terminal cell of a house
    End,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Regular => write!(f, "regular"),
            NodeKind::Entry => write!(f, "entry"),
            NodeKind::Branch => write!(f, "branch"),
            NodeKind::Star => write!(f, "star"),
            NodeKind::HomeStretch => write!(f, "home stretch"),
            NodeKind::HomeSlot => write!(f, "home slot"),
            NodeKind::End => write!(f, "end"),
        }
    }
}

impl NodeKind {
    /// capture never happens on a safe node
    pub fn is_safe(&self) -> bool {
        !matches!(self, NodeKind::Regular | NodeKind::Branch)
    }

    /// whether a node of this kind has to belong to a house
    pub fn requires_owner(&self) -> bool {
        matches!(
            self,
            NodeKind::HomeSlot | NodeKind::HomeStretch | NodeKind::Branch | NodeKind::End
        )
    }
}

/// A game which can have it's winner determined
pub trait VictorDeterminableGame: std::fmt::Debug {
    #[allow(missing_docs)]
    fn is_over(&self) -> bool;

    /// get the winner for a given game, will return None if no house has finished yet
    fn get_winner(&self) -> Option<HouseColor>;
}

/// A game for which the state of each house's tokens can be queried. These
/// are the inputs a move selection policy works from.
pub trait HouseQueryableGame {
    /// ids of the tokens still waiting in their home slots
    fn tokens_currently_in_house(&self, house: HouseColor) -> Vec<TokenId>;

    /// ids of the tokens that are neither in house nor arrived
    fn token_ids_in_play(&self, house: HouseColor) -> Vec<TokenId>;

    /// ids of the home slots that still hold a token
    fn home_slot_node_ids_in_use(&self, house: HouseColor) -> Vec<NodeId>;

    /// whether every token of the house sits on the house's own end node
    fn all_tokens_arrived_at_end(&self, house: HouseColor) -> bool;
}

/// A game whose tokens can be moved by a die roll
pub trait TokenMovableGame: HouseQueryableGame {
    /// move a token by `steps`, see `MoveOutcome` for what can happen
    fn move_token(&mut self, token: TokenId, steps: u8) -> Result<MoveOutcome, BoardError>;
}

/// Instruments to be used when driving moves
pub trait MoveInstruments: std::fmt::Debug {
    #[allow(missing_docs)]
    fn observe_move(&self, duration: Duration);
}
