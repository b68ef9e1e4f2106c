use itertools::Itertools;
use tracing::{debug, instrument, trace};

use crate::error::BoardError;
use crate::types::{
    HouseColor, HouseQueryableGame, NodeId, NodeKind, TokenId, TokenMovableGame, EXIT_ROLL,
    MAX_ROLL, N_HOUSES,
};

use super::{Board, MoveOutcome};

impl Board {
    /// Moves a token by a die value.
    ///
    /// An in-house token only leaves on a six, onto its entry node. Any other
    /// token walks `steps` links, turning into its own home stretch at its own
    /// branch node, and sends every opponent home when it lands on an unsafe
    /// node. A walk that would run past the token's end node moves nothing and
    /// reports `Overshoot`. Ordinary moves and overshoots hand the house's turn
    /// cursor on, captures and exits from the house keep it.
    ///
    /// Every check happens before the board is touched, so an `Err` leaves the
    /// board exactly as it was.
    #[instrument(level = "trace", skip(self))]
    pub fn move_token(&mut self, token: TokenId, steps: u8) -> Result<MoveOutcome, BoardError> {
        let index = self.token_index(token)?;
        if !(1..=MAX_ROLL).contains(&steps) {
            return Err(BoardError::InvalidRoll(steps));
        }
        self.tokens[index].clear_move_result();

        let from = self.tokens[index].current_node();
        let house = self.tokens[index].house();

        if self.tokens[index].in_house() {
            if steps != EXIT_ROLL {
                return Ok(MoveOutcome::StayedInHouse);
            }
            let entry = self.house(house).entry_node();
            self.relocate(index, entry)?;
            self.tokens[index].in_house = false;
            trace!(%token, %entry, "left house");
            return Ok(MoveOutcome::LeftHouse { from, to: entry });
        }

        let to = match self.destination(from, house, steps) {
            Some(to) => to,
            None => {
                debug!(%token, %from, steps, "overshoot");
                self.advance_turn(house);
                return Ok(MoveOutcome::Overshoot { at: from });
            }
        };

        self.nodes[to.as_usize()].check_accepts(&self.tokens[index])?;
        let captured = self.capture_victims(to, house)?;
        for victim in captured.iter() {
            self.reset_token(*victim)?;
        }
        self.relocate(index, to)?;

        if captured.is_empty() {
            self.advance_turn(house);
        } else {
            debug!(%token, %to, ?captured, "captured");
            self.tokens[index].killed_other_tokens = true;
            self.tokens[index].killed_other_token_ids = captured.clone();
        }

        Ok(MoveOutcome::Moved { from, to, captured })
    }

    /// sends a token back to its home slot
    pub fn reset_token(&mut self, token: TokenId) -> Result<(), BoardError> {
        let index = self.token_index(token)?;
        let home = self.tokens[index].home_slot();
        self.relocate(index, home)?;
        self.tokens[index].in_house = true;
        Ok(())
    }

    /// Takes a token off its current node and puts it on `to`, after checking
    /// that `to` accepts it.
    pub(crate) fn relocate(&mut self, index: usize, to: NodeId) -> Result<(), BoardError> {
        let from = self.tokens[index].current_node();
        if from == to {
            return Ok(());
        }
        self.nodes[to.as_usize()].check_accepts(&self.tokens[index])?;
        self.nodes[from.as_usize()].remove_token(self.tokens[index].id())?;
        self.nodes[to.as_usize()].add_token(&self.tokens[index])?;
        self.tokens[index].current = to;
        Ok(())
    }

    /// Where a walk of `steps` links from `from` ends for a token of `house`,
    /// or `None` when it would run off the end of a home stretch.
    fn destination(&self, from: NodeId, house: HouseColor, steps: u8) -> Option<NodeId> {
        let start = self.nodes.get(from.as_usize())?;
        let on_own_stretch = matches!(start.kind(), NodeKind::HomeStretch | NodeKind::End)
            && start.house() == Some(house);
        if on_own_stretch && !start.has_n_reachable_steps(steps, &self.nodes) {
            return None;
        }

        let mut at = from;
        for step in 1..=steps {
            let node = self.nodes.get(at.as_usize())?;
            let next = match node.kind() {
                NodeKind::Branch if node.house() == Some(house) => node.next_home_stretch(),
                _ => node.next(),
            }?;
            trace!(step, from = %at, to = %next, "step");
            at = next;
        }
        Some(at)
    }

    /// The opponents a token of `house` would capture by landing on `to`, in
    /// ascending id order. Safe nodes never capture.
    fn capture_victims(&self, to: NodeId, house: HouseColor) -> Result<Vec<TokenId>, BoardError> {
        let node = self.get_node(to)?;
        if node.is_safe() {
            return Ok(Vec::new());
        }
        let victims = node
            .token_ids()
            .into_iter()
            .filter(|id| self.tokens[id.as_usize()].house() != house)
            .collect_vec();
        for victim in victims.iter() {
            let victim = &self.tokens[victim.as_usize()];
            self.nodes[victim.home_slot().as_usize()].check_accepts(victim)?;
        }
        Ok(victims)
    }

    /// Points the house's turn cursor at the first house after it in ring
    /// order that still has tokens to bring home. The ring itself is never
    /// touched.
    fn advance_turn(&mut self, house: HouseColor) {
        let successor = self.house(house).ring_successor();
        let mut candidate = successor;
        for _ in 0..N_HOUSES {
            if candidate == house {
                return;
            }
            if !self.all_tokens_arrived_at_end(candidate) {
                if candidate != successor {
                    debug!(%house, next = %candidate, "skipped finished houses");
                }
                self.houses[house.as_index()].next_turn = candidate;
                return;
            }
            candidate = self.house(candidate).ring_successor();
        }
    }
}

impl TokenMovableGame for Board {
    fn move_token(&mut self, token: TokenId, steps: u8) -> Result<MoveOutcome, BoardError> {
        Board::move_token(self, token, steps)
    }
}
