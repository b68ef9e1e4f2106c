use fxhash::FxHashSet;
use itertools::Itertools;

use crate::error::BoardError;
use crate::types::{HouseColor, NodeId, NodeKind, TokenId};

use super::Token;

/// A single position on the board. Nodes never own each other, links are
/// arena ids into the board's node table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    house: Option<HouseColor>,
    tokens: FxHashSet<TokenId>,
    pub(crate) next: Option<NodeId>,
    pub(crate) next_home_stretch: Option<NodeId>,
}

impl Node {
    /// makes a new unlinked node, kinds that belong to a house fail without one
    pub fn new(id: NodeId, kind: NodeKind, house: Option<HouseColor>) -> Result<Self, BoardError> {
        if kind.requires_owner() && house.is_none() {
            return Err(BoardError::MissingOwner { kind });
        }
        Ok(Node {
            id,
            kind,
            house,
            tokens: FxHashSet::default(),
            next: None,
            next_home_stretch: None,
        })
    }

    #[allow(missing_docs)]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[allow(missing_docs)]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// the owning house, absent for shared track cells
    pub fn house(&self) -> Option<HouseColor> {
        self.house
    }

    /// capture never happens here
    pub fn is_safe(&self) -> bool {
        self.kind.is_safe()
    }

    /// the next node in shared traversal order, absent only for end nodes
    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    /// for branch nodes, the first node of the owning house's home stretch
    pub fn next_home_stretch(&self) -> Option<NodeId> {
        self.next_home_stretch
    }

    /// ids of the tokens on this node, in ascending order
    pub fn token_ids(&self) -> Vec<TokenId> {
        self.tokens.iter().copied().sorted().collect()
    }

    #[allow(missing_docs)]
    pub fn occupancy(&self) -> usize {
        self.tokens.len()
    }

    #[allow(missing_docs)]
    pub fn contains(&self, token: TokenId) -> bool {
        self.tokens.contains(&token)
    }

    /// checks that `token` may be put on this node without changing anything
    pub fn check_accepts(&self, token: &Token) -> Result<(), BoardError> {
        match self.kind {
            NodeKind::HomeSlot => match self.tokens.iter().next() {
                Some(occupant) => Err(BoardError::HomeSlotOccupied {
                    node: self.id,
                    token: token.id(),
                    occupant: *occupant,
                }),
                None => Ok(()),
            },
            NodeKind::HomeStretch => match self.house {
                Some(house) if house == token.house() => Ok(()),
                Some(house) => Err(BoardError::ForeignHomeStretch {
                    node: self.id,
                    node_house: house,
                    token: token.id(),
                    token_house: token.house(),
                }),
                None => Err(BoardError::MissingOwner { kind: self.kind }),
            },
            _ => Ok(()),
        }
    }

    /// put a token on this node. Shared cells take any mix of houses, which is
    /// exactly what makes a capture possible.
    pub fn add_token(&mut self, token: &Token) -> Result<(), BoardError> {
        self.check_accepts(token)?;
        self.tokens.insert(token.id());
        Ok(())
    }

    #[allow(missing_docs)]
    pub fn remove_token(&mut self, token: TokenId) -> Result<(), BoardError> {
        if self.tokens.remove(&token) {
            Ok(())
        } else {
            Err(BoardError::TokenNotOnNode {
                node: self.id,
                token,
            })
        }
    }

    /// walks the forward links `n` times and reports whether every step exists.
    /// `nodes` is the arena this node's links point into.
    pub fn has_n_reachable_steps(&self, n: u8, nodes: &[Node]) -> bool {
        let mut current = self;
        for _ in 0..n {
            match current.next.and_then(|id| nodes.get(id.as_usize())) {
                Some(next) => current = next,
                None => return false,
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(id: u8, house: HouseColor, home: u16) -> Token {
        Token::new(TokenId(id), house, NodeId(home))
    }

    fn chain(len: usize) -> Vec<Node> {
        let mut nodes = (0..len)
            .map(|i| Node::new(NodeId::from_usize(i), NodeKind::Regular, None).unwrap())
            .collect_vec();
        for i in 1..len {
            nodes[i - 1].next = Some(NodeId::from_usize(i));
        }
        nodes
    }

    #[test]
    fn test_owned_kinds_need_a_house() {
        for kind in [
            NodeKind::HomeSlot,
            NodeKind::HomeStretch,
            NodeKind::Branch,
            NodeKind::End,
        ] {
            assert_eq!(
                Node::new(NodeId(0), kind, None),
                Err(BoardError::MissingOwner { kind })
            );
            assert!(Node::new(NodeId(0), kind, Some(HouseColor::Blue)).is_ok());
        }
        for kind in [NodeKind::Regular, NodeKind::Entry, NodeKind::Star] {
            assert!(Node::new(NodeId(0), kind, None).is_ok());
        }
    }

    #[test]
    fn test_shared_node_takes_mixed_houses() {
        let mut node = Node::new(NodeId(0), NodeKind::Regular, None).unwrap();
        node.add_token(&token(0, HouseColor::Blue, 10)).unwrap();
        node.add_token(&token(1, HouseColor::Blue, 11)).unwrap();
        node.add_token(&token(4, HouseColor::Red, 12)).unwrap();
        assert_eq!(node.occupancy(), 3);
        assert_eq!(node.token_ids(), vec![TokenId(0), TokenId(1), TokenId(4)]);
    }

    #[test]
    fn test_remove_token() {
        let mut node = Node::new(NodeId(5), NodeKind::Regular, None).unwrap();
        node.add_token(&token(0, HouseColor::Blue, 10)).unwrap();
        node.add_token(&token(1, HouseColor::Blue, 11)).unwrap();
        node.remove_token(TokenId(0)).unwrap();
        assert_eq!(node.occupancy(), 1);
        assert_eq!(
            node.remove_token(TokenId(0)),
            Err(BoardError::TokenNotOnNode {
                node: NodeId(5),
                token: TokenId(0)
            })
        );
    }

    #[test]
    fn test_home_slot_holds_one_token() {
        let mut slot = Node::new(NodeId(2), NodeKind::HomeSlot, Some(HouseColor::Blue)).unwrap();
        slot.add_token(&token(0, HouseColor::Blue, 2)).unwrap();
        let err = slot.add_token(&token(1, HouseColor::Blue, 2)).unwrap_err();
        assert!(err.is_precondition_violation());
        assert_eq!(slot.occupancy(), 1);
    }

    #[test]
    fn test_home_stretch_only_takes_own_house() {
        let mut stretch =
            Node::new(NodeId(20), NodeKind::HomeStretch, Some(HouseColor::Blue)).unwrap();
        stretch.add_token(&token(0, HouseColor::Blue, 0)).unwrap();
        assert_eq!(
            stretch.add_token(&token(4, HouseColor::Red, 1)),
            Err(BoardError::ForeignHomeStretch {
                node: NodeId(20),
                node_house: HouseColor::Blue,
                token: TokenId(4),
                token_house: HouseColor::Red,
            })
        );
        assert_eq!(stretch.token_ids(), vec![TokenId(0)]);
    }

    #[test]
    fn test_has_n_reachable_steps() {
        let nodes = chain(4);
        assert!(nodes[0].has_n_reachable_steps(0, &nodes));
        assert!(nodes[0].has_n_reachable_steps(3, &nodes));
        assert!(!nodes[0].has_n_reachable_steps(4, &nodes));
        assert!(nodes[2].has_n_reachable_steps(1, &nodes));
        assert!(!nodes[3].has_n_reachable_steps(1, &nodes));
    }
}
