//! errors raised by the board and by the autoplay configuration
use crate::types::{HouseColor, NodeId, NodeKind, TokenId};

/// Errors raised by board operations. They all signal a caller bug, either a
/// malformed topology or an invalid move request, and are never recovered
/// from inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// a node kind that has to belong to a house was created without one
    #[error("cannot create {kind} node without a house")]
    MissingOwner {
        #[allow(missing_docs)]
        kind: NodeKind,
    },

    /// a fifth token was added to a house
    #[error("cannot add token {token} to {house} house, it already has {count} tokens")]
    HouseFull {
        #[allow(missing_docs)]
        house: HouseColor,
        #[allow(missing_docs)]
        token: TokenId,
        #[allow(missing_docs)]
        count: usize,
    },

    /// a second token was added to a home slot
    #[error("cannot add token {token} to home slot {node}, it already holds token {occupant}")]
    HomeSlotOccupied {
        #[allow(missing_docs)]
        node: NodeId,
        #[allow(missing_docs)]
        token: TokenId,
        #[allow(missing_docs)]
        occupant: TokenId,
    },

    /// a token was added to another house's home stretch
    #[error("cannot add {token_house} token {token} to home stretch node {node} of {node_house} house")]
    ForeignHomeStretch {
        #[allow(missing_docs)]
        node: NodeId,
        #[allow(missing_docs)]
        node_house: HouseColor,
        #[allow(missing_docs)]
        token: TokenId,
        #[allow(missing_docs)]
        token_house: HouseColor,
    },

    /// a move was requested with a value a die cannot show
    #[error("die value {0} is outside 1..=6")]
    InvalidRoll(u8),

    /// a token was removed from a node it is not on
    #[error("token {token} is not on node {node}")]
    TokenNotOnNode {
        #[allow(missing_docs)]
        node: NodeId,
        #[allow(missing_docs)]
        token: TokenId,
    },

    #[allow(missing_docs)]
    #[error("no node with id {0}")]
    NodeNotFound(NodeId),

    #[allow(missing_docs)]
    #[error("no token with id {0}")]
    TokenNotFound(TokenId),
}

impl BoardError {
    /// the request broke a rule of the board's topology or of the dice
    pub fn is_precondition_violation(&self) -> bool {
        matches!(
            self,
            BoardError::MissingOwner { .. }
                | BoardError::HouseFull { .. }
                | BoardError::HomeSlotOccupied { .. }
                | BoardError::ForeignHomeStretch { .. }
                | BoardError::InvalidRoll(_)
        )
    }

    /// the request referred to something that does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            BoardError::TokenNotOnNode { .. }
                | BoardError::NodeNotFound(_)
                | BoardError::TokenNotFound(_)
        )
    }
}

/// Errors that can occur when loading autoplay configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[allow(missing_docs)]
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[allow(missing_docs)]
    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors that can occur when setting up or running an autoplayed game.
#[derive(Debug, thiserror::Error)]
pub enum AutoplayError {
    #[allow(missing_docs)]
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[allow(missing_docs)]
    #[error("board error: {0}")]
    Board(#[from] BoardError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_error_display() {
        let err = BoardError::HomeSlotOccupied {
            node: NodeId(3),
            token: TokenId(1),
            occupant: TokenId(0),
        };
        assert_eq!(
            err.to_string(),
            "cannot add token 1 to home slot 3, it already holds token 0"
        );

        let err = BoardError::ForeignHomeStretch {
            node: NodeId(17),
            node_house: HouseColor::Blue,
            token: TokenId(5),
            token_house: HouseColor::Red,
        };
        assert_eq!(
            err.to_string(),
            "cannot add red token 5 to home stretch node 17 of blue house"
        );
    }

    #[test]
    fn test_error_kinds() {
        assert!(BoardError::InvalidRoll(7).is_precondition_violation());
        assert!(!BoardError::InvalidRoll(7).is_not_found());
        assert!(BoardError::TokenNotFound(TokenId(99)).is_not_found());
        assert!(BoardError::MissingOwner {
            kind: NodeKind::End
        }
        .is_precondition_violation());
    }

    #[test]
    fn test_board_error_is_a_plain_value() {
        let err = BoardError::InvalidRoll(9);
        let copied = err;
        assert_eq!(err, copied);
        assert_eq!(err.to_string(), copied.to_string());
    }

    #[test]
    fn test_autoplay_error_wraps_sources() {
        let err: AutoplayError = BoardError::TokenNotFound(TokenId(20)).into();
        assert_eq!(err.to_string(), "board error: no token with id 20");
        let err: AutoplayError = ConfigError::Validation("bad".to_string()).into();
        assert!(matches!(err, AutoplayError::Config(_)));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("max_turns must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: max_turns must be > 0"
        );
    }
}
