use serde::Serialize;

use crate::types::{HouseColor, NodeId, TokenId};

/// A player piece. The owning house and home slot are fixed at construction,
/// everything else is updated by the board as the token moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    id: TokenId,
    house: HouseColor,
    home_slot: NodeId,
    pub(crate) current: NodeId,
    pub(crate) in_house: bool,
    pub(crate) killed_other_tokens: bool,
    pub(crate) killed_other_token_ids: Vec<TokenId>,
}

impl Token {
    /// a fresh token waiting on its home slot
    pub fn new(id: TokenId, house: HouseColor, home_slot: NodeId) -> Self {
        Token {
            id,
            house,
            home_slot,
            current: home_slot,
            in_house: true,
            killed_other_tokens: false,
            killed_other_token_ids: Vec::new(),
        }
    }

    #[allow(missing_docs)]
    pub fn id(&self) -> TokenId {
        self.id
    }

    #[allow(missing_docs)]
    pub fn house(&self) -> HouseColor {
        self.house
    }

    /// the token's permanent origin
    pub fn home_slot(&self) -> NodeId {
        self.home_slot
    }

    #[allow(missing_docs)]
    pub fn current_node(&self) -> NodeId {
        self.current
    }

    /// true until the token first leaves its home slot, and again after a capture
    pub fn in_house(&self) -> bool {
        self.in_house
    }

    /// whether the last move of this token captured anything
    pub fn killed_other_tokens(&self) -> bool {
        self.killed_other_tokens
    }

    /// the tokens captured by the last move of this token
    pub fn killed_other_token_ids(&self) -> &[TokenId] {
        &self.killed_other_token_ids
    }

    pub(crate) fn clear_move_result(&mut self) {
        self.killed_other_tokens = false;
        self.killed_other_token_ids.clear();
    }
}

/// What a call to `move_token` did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MoveOutcome {
    /// the token is in house and the roll was not a six, nothing changed
    StayedInHouse,
    /// the token left its home slot for its house's entry node
    LeftHouse {
        #[allow(missing_docs)]
        from: NodeId,
        #[allow(missing_docs)]
        to: NodeId,
    },
    /// the roll would carry the token past its end node, nothing moved but the
    /// house's turn cursor still advanced
    Overshoot {
        #[allow(missing_docs)]
        at: NodeId,
    },
    /// the token walked `from` -> `to`, resetting every opponent in `captured`
    Moved {
        #[allow(missing_docs)]
        from: NodeId,
        #[allow(missing_docs)]
        to: NodeId,
        #[allow(missing_docs)]
        captured: Vec<TokenId>,
    },
}

impl MoveOutcome {
    /// the tokens this move sent back home
    pub fn captured(&self) -> &[TokenId] {
        match self {
            MoveOutcome::Moved { captured, .. } => captured,
            _ => &[],
        }
    }

    /// whether any token changed position
    pub fn changed_board(&self) -> bool {
        matches!(
            self,
            MoveOutcome::LeftHouse { .. } | MoveOutcome::Moved { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_token_waits_at_home() {
        let token = Token::new(TokenId(3), HouseColor::Green, NodeId(49));
        assert!(token.in_house());
        assert_eq!(token.current_node(), token.home_slot());
        assert!(!token.killed_other_tokens());
        assert!(token.killed_other_token_ids().is_empty());
    }

    #[test]
    fn test_outcome_serializes_with_tag() {
        let outcome = MoveOutcome::Moved {
            from: NodeId(6),
            to: NodeId(9),
            captured: vec![TokenId(5)],
        };
        assert_eq!(
            serde_json::to_string(&outcome).unwrap(),
            r#"{"type":"moved","from":6,"to":9,"captured":[5]}"#
        );
        assert_eq!(outcome.captured(), &[TokenId(5)]);
        assert!(!MoveOutcome::Overshoot { at: NodeId(20) }.changed_board());
    }
}
