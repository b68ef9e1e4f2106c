//! The board: an arena owning every node and token, wired into one shared
//! ring of track with a private home stretch branching off for each house.
//!
//! ```
//! # use ludo_game_types::board::{Board, MoveOutcome};
//! # use ludo_game_types::types::{HouseColor, HouseQueryableGame};
//! let mut board = Board::new().unwrap();
//! let token = board.house(HouseColor::Blue).token_ids()[0];
//! assert_eq!(board.move_token(token, 3).unwrap(), MoveOutcome::StayedInHouse);
//! assert!(matches!(board.move_token(token, 6).unwrap(), MoveOutcome::LeftHouse { .. }));
//! assert_eq!(board.token_ids_in_play(HouseColor::Blue), vec![token]);
//! ```
use std::fmt;

use itertools::Itertools;

use crate::error::BoardError;
use crate::types::{
    HouseColor, HouseQueryableGame, NodeId, NodeKind, TokenId, VictorDeterminableGame,
    HOUSES_TO_FINISH, N_HOUSES, TOKENS_PER_HOUSE,
};

mod house;
mod movement;
mod node;
mod token;

pub use house::{
    House, BRANCH_INDEX, CHAIN_LEN, END_INDEX, ENTRY_INDEX, FIRST_HOME_STRETCH_INDEX,
    HOME_STRETCH_LEN, LAST_TRACK_INDEX, STAR_INDEX,
};
pub use node::Node;
pub use token::{MoveOutcome, Token};

/// total number of nodes on a board
pub const NODE_COUNT: usize = N_HOUSES * (TOKENS_PER_HOUSE + CHAIN_LEN);

/// total number of tokens on a board
pub const TOKEN_COUNT: usize = N_HOUSES * TOKENS_PER_HOUSE;

/// A ludo board for one game. Membership of nodes and tokens is fixed at
/// construction, only occupancy, token state and turn cursors change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    nodes: Vec<Node>,
    tokens: Vec<Token>,
    houses: [House; N_HOUSES],
    winner: Option<HouseColor>,
}

impl Board {
    /// builds the four houses and wires them into a ring, blue -> red -> green -> yellow -> blue
    pub fn new() -> Result<Self, BoardError> {
        let mut nodes = Vec::with_capacity(NODE_COUNT);
        let mut tokens = Vec::with_capacity(TOKEN_COUNT);
        let [blue, red, green, yellow] = HouseColor::ALL;
        let mut houses = [
            House::build(blue, &mut nodes, &mut tokens)?,
            House::build(red, &mut nodes, &mut tokens)?,
            House::build(green, &mut nodes, &mut tokens)?,
            House::build(yellow, &mut nodes, &mut tokens)?,
        ];

        for i in 0..N_HOUSES {
            let next = houses[(i + 1) % N_HOUSES].color();
            let next_branch = houses[(i + 1) % N_HOUSES].branch_node();
            houses[i].link_to_next_area(next, next_branch, &mut nodes);
        }

        Ok(Board {
            nodes,
            tokens,
            houses,
            winner: None,
        })
    }

    /// look up a node by id
    pub fn get_node(&self, id: NodeId) -> Result<&Node, BoardError> {
        self.nodes
            .get(id.as_usize())
            .ok_or(BoardError::NodeNotFound(id))
    }

    /// look up a token by id
    pub fn get_token(&self, id: TokenId) -> Result<&Token, BoardError> {
        self.tokens
            .get(id.as_usize())
            .ok_or(BoardError::TokenNotFound(id))
    }

    #[allow(missing_docs)]
    pub fn house(&self, color: HouseColor) -> &House {
        &self.houses[color.as_index()]
    }

    /// houses in ring order
    pub fn houses(&self) -> &[House] {
        &self.houses
    }

    /// every node, indexed by `NodeId`
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// every token, indexed by `TokenId`
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// the winner recorded by `completed`, if any
    pub fn winner(&self) -> Option<HouseColor> {
        self.winner
    }

    /// whether the token stands on its own house's end node
    pub fn reached_end(&self, token: TokenId) -> Result<bool, BoardError> {
        Ok(self.has_arrived(self.get_token(token)?))
    }

    /// Recomputes on every call. The first finished house in ring order is
    /// recorded as winner when no winner is recorded yet, and the game is
    /// complete once three houses have finished.
    pub fn completed(&mut self) -> bool {
        let finished = self.finished_houses();
        if self.winner.is_none() {
            self.winner = finished.first().copied();
        }
        finished.len() >= HOUSES_TO_FINISH
    }

    /// The house that plays after `house`. This is the house's turn cursor,
    /// moved past any house that has finished since the cursor was written.
    pub fn next_turn(&self, house: HouseColor) -> HouseColor {
        let mut candidate = self.house(house).next_turn();
        for _ in 0..N_HOUSES {
            if candidate == house || !self.all_tokens_arrived_at_end(candidate) {
                return candidate;
            }
            candidate = self.house(candidate).ring_successor();
        }
        house
    }

    fn finished_houses(&self) -> Vec<HouseColor> {
        HouseColor::ALL
            .iter()
            .copied()
            .filter(|house| self.all_tokens_arrived_at_end(*house))
            .collect_vec()
    }

    pub(crate) fn token_index(&self, id: TokenId) -> Result<usize, BoardError> {
        self.get_token(id).map(|_| id.as_usize())
    }

    pub(crate) fn has_arrived(&self, token: &Token) -> bool {
        let node = &self.nodes[token.current_node().as_usize()];
        node.kind() == NodeKind::End && node.house() == Some(token.house())
    }

    fn tokens_of(&self, house: HouseColor) -> impl Iterator<Item = &Token> + '_ {
        self.house(house)
            .token_ids()
            .iter()
            .map(move |id| &self.tokens[id.as_usize()])
    }

    /// Puts a token straight on a node, bypassing the movement rules.
    #[cfg(test)]
    pub(crate) fn place_token(&mut self, token: TokenId, node: NodeId) -> Result<(), BoardError> {
        let index = self.token_index(token)?;
        self.get_node(node)?;
        self.relocate(index, node)?;
        self.tokens[index].in_house = node == self.tokens[index].home_slot();
        Ok(())
    }
}

impl HouseQueryableGame for Board {
    fn tokens_currently_in_house(&self, house: HouseColor) -> Vec<TokenId> {
        self.tokens_of(house)
            .filter(|t| t.in_house())
            .map(|t| t.id())
            .collect()
    }

    fn token_ids_in_play(&self, house: HouseColor) -> Vec<TokenId> {
        self.tokens_of(house)
            .filter(|t| !t.in_house() && !self.has_arrived(t))
            .map(|t| t.id())
            .collect()
    }

    fn home_slot_node_ids_in_use(&self, house: HouseColor) -> Vec<NodeId> {
        self.tokens_of(house)
            .filter(|t| t.in_house())
            .map(|t| t.home_slot())
            .collect()
    }

    fn all_tokens_arrived_at_end(&self, house: HouseColor) -> bool {
        self.tokens_of(house).all(|t| self.has_arrived(t))
    }
}

impl VictorDeterminableGame for Board {
    fn is_over(&self) -> bool {
        self.finished_houses().len() >= HOUSES_TO_FINISH
    }

    fn get_winner(&self) -> Option<HouseColor> {
        self.winner
            .or_else(|| self.finished_houses().first().copied())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for house in self.houses.iter() {
            write!(f, "{:>6} ", house.color().to_string())?;
            for slot in house.home_slots() {
                let occupied = self.nodes[slot.as_usize()].occupancy() > 0;
                write!(f, "{}", if occupied { "o" } else { "_" })?;
            }
            write!(f, " |")?;
            for id in house.chain() {
                let node = &self.nodes[id.as_usize()];
                if node.occupancy() > 0 {
                    write!(f, " {}", node.occupancy())?;
                } else {
                    let c = match node.kind() {
                        NodeKind::Branch => "b",
                        NodeKind::Entry => "e",
                        NodeKind::Star => "*",
                        NodeKind::HomeStretch => "h",
                        NodeKind::End => "E",
                        NodeKind::Regular | NodeKind::HomeSlot => ".",
                    };
                    write!(f, " {}", c)?;
                }
            }
            writeln!(f)?;
        }
        if let Some(winner) = self.winner {
            writeln!(f, "winner: {}", winner)?;
        }
        Ok(())
    }
}
