use crate::error::BoardError;
use crate::types::{HouseColor, NodeId, NodeKind, TokenId, TOKENS_PER_HOUSE};

use super::{Node, Token};

/// index of the branch node in a house's chain
pub const BRANCH_INDEX: usize = 0;
/// index of the entry node, where tokens land when leaving their home slot
pub const ENTRY_INDEX: usize = 2;
/// index of the star node
pub const STAR_INDEX: usize = 10;
/// index of the last shared track node, it links on to the next house's branch
pub const LAST_TRACK_INDEX: usize = 12;
/// index of the first home stretch node
pub const FIRST_HOME_STRETCH_INDEX: usize = 13;
/// index of the end node
pub const END_INDEX: usize = 18;
/// number of nodes in a house's chain
pub const CHAIN_LEN: usize = 19;
/// number of private nodes between the branch and the end node
pub const HOME_STRETCH_LEN: usize = 5;

/// the kinds of a house's chain, in link order
const CHAIN_KINDS: [NodeKind; CHAIN_LEN] = [
    NodeKind::Branch,
    NodeKind::Regular,
    NodeKind::Entry,
    NodeKind::Regular,
    NodeKind::Regular,
    NodeKind::Regular,
    NodeKind::Regular,
    NodeKind::Regular,
    NodeKind::Regular,
    NodeKind::Regular,
    NodeKind::Star,
    NodeKind::Regular,
    NodeKind::Regular,
    NodeKind::HomeStretch,
    NodeKind::HomeStretch,
    NodeKind::HomeStretch,
    NodeKind::HomeStretch,
    NodeKind::HomeStretch,
    NodeKind::End,
];

/// A player area: four tokens, their home slots and the house's stretch of
/// track. The node and token values live in the board arena, a house only
/// holds their ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct House {
    color: HouseColor,
    tokens: Vec<TokenId>,
    home_slots: Vec<NodeId>,
    chain: Vec<NodeId>,
    ring_successor: HouseColor,
    pub(crate) next_turn: HouseColor,
}

impl House {
    pub(crate) fn empty(color: HouseColor) -> Self {
        House {
            color,
            tokens: Vec::with_capacity(TOKENS_PER_HOUSE),
            home_slots: Vec::with_capacity(TOKENS_PER_HOUSE),
            chain: Vec::with_capacity(CHAIN_LEN),
            ring_successor: color.successor(),
            next_turn: color.successor(),
        }
    }

    /// Creates the house's home slots, tokens and 19 node chain, appending
    /// them to the board arena. Ids are the arena positions, so the arena
    /// lengths act as the id counters. Every node goes through `Node::new`
    /// and every token through `add_token`.
    pub(crate) fn build(
        color: HouseColor,
        nodes: &mut Vec<Node>,
        tokens: &mut Vec<Token>,
    ) -> Result<Self, BoardError> {
        let mut house = House::empty(color);

        for _ in 0..TOKENS_PER_HOUSE {
            let slot_id = NodeId::from_usize(nodes.len());
            let token = Token::new(TokenId::from_usize(tokens.len()), color, slot_id);
            let mut slot = Node::new(slot_id, NodeKind::HomeSlot, Some(color))?;
            slot.add_token(&token)?;
            house.add_token(token.id())?;
            house.home_slots.push(slot_id);
            nodes.push(slot);
            tokens.push(token);
        }

        for kind in CHAIN_KINDS {
            let id = NodeId::from_usize(nodes.len());
            let owner = if kind.requires_owner() { Some(color) } else { None };
            nodes.push(Node::new(id, kind, owner)?);
            house.chain.push(id);
        }

        // the last track node is linked on to the next house later
        for i in 1..=LAST_TRACK_INDEX {
            nodes[house.chain[i - 1].as_usize()].next = Some(house.chain[i]);
        }
        for i in (FIRST_HOME_STRETCH_INDEX + 1)..CHAIN_LEN {
            nodes[house.chain[i - 1].as_usize()].next = Some(house.chain[i]);
        }

        let entry = house.entry_node();
        for slot in house.home_slots.iter() {
            nodes[slot.as_usize()].next = Some(entry);
        }
        nodes[house.branch_node().as_usize()].next_home_stretch =
            Some(house.first_home_stretch_node());

        Ok(house)
    }

    /// Sets the ring successor and links this house's last track node into
    /// the next house's branch node. The turn cursor starts at the successor.
    pub(crate) fn link_to_next_area(
        &mut self,
        next: HouseColor,
        next_branch: NodeId,
        nodes: &mut [Node],
    ) {
        self.ring_successor = next;
        self.next_turn = next;
        nodes[self.last_track_node().as_usize()].next = Some(next_branch);
    }

    /// register a token with this house, a house never holds more than four
    pub fn add_token(&mut self, token: TokenId) -> Result<(), BoardError> {
        if self.tokens.len() >= TOKENS_PER_HOUSE {
            return Err(BoardError::HouseFull {
                house: self.color,
                token,
                count: self.tokens.len(),
            });
        }
        if !self.tokens.contains(&token) {
            self.tokens.push(token);
        }
        Ok(())
    }

    #[allow(missing_docs)]
    pub fn color(&self) -> HouseColor {
        self.color
    }

    #[allow(missing_docs)]
    pub fn token_ids(&self) -> &[TokenId] {
        &self.tokens
    }

    #[allow(missing_docs)]
    pub fn home_slots(&self) -> &[NodeId] {
        &self.home_slots
    }

    /// all 19 nodes of the house's chain in link order
    pub fn chain(&self) -> &[NodeId] {
        &self.chain
    }

    /// the five private nodes leading to the end node
    pub fn home_stretch(&self) -> &[NodeId] {
        &self.chain[FIRST_HOME_STRETCH_INDEX..END_INDEX]
    }

    /// the fixed next house around the track, set once when the board is wired
    pub fn ring_successor(&self) -> HouseColor {
        self.ring_successor
    }

    /// the house this one hands its turn to, skipping houses that finished
    pub fn next_turn(&self) -> HouseColor {
        self.next_turn
    }

    #[allow(missing_docs)]
    pub fn branch_node(&self) -> NodeId {
        self.chain[BRANCH_INDEX]
    }

    #[allow(missing_docs)]
    pub fn entry_node(&self) -> NodeId {
        self.chain[ENTRY_INDEX]
    }

    #[allow(missing_docs)]
    pub fn star_node(&self) -> NodeId {
        self.chain[STAR_INDEX]
    }

    #[allow(missing_docs)]
    pub fn last_track_node(&self) -> NodeId {
        self.chain[LAST_TRACK_INDEX]
    }

    #[allow(missing_docs)]
    pub fn first_home_stretch_node(&self) -> NodeId {
        self.chain[FIRST_HOME_STRETCH_INDEX]
    }

    #[allow(missing_docs)]
    pub fn end_node(&self) -> NodeId {
        self.chain[END_INDEX]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built(color: HouseColor) -> (House, Vec<Node>, Vec<Token>) {
        let mut nodes = Vec::new();
        let mut tokens = Vec::new();
        let house = House::build(color, &mut nodes, &mut tokens).unwrap();
        (house, nodes, tokens)
    }

    #[test]
    fn test_house_has_four_tokens_and_slots() {
        let (house, nodes, tokens) = built(HouseColor::Blue);
        assert_eq!(house.token_ids().len(), 4);
        assert_eq!(house.home_slots().len(), 4);
        assert_eq!(tokens.len(), 4);
        assert_eq!(nodes.len(), 4 + CHAIN_LEN);
        for (token, slot) in tokens.iter().zip(house.home_slots()) {
            assert_eq!(token.home_slot(), *slot);
            assert!(nodes[slot.as_usize()].contains(token.id()));
            assert_eq!(nodes[slot.as_usize()].kind(), NodeKind::HomeSlot);
        }
    }

    #[test]
    fn test_house_rejects_fifth_token() {
        let (mut house, _, _) = built(HouseColor::Red);
        let err = house.add_token(TokenId(99)).unwrap_err();
        assert_eq!(
            err,
            BoardError::HouseFull {
                house: HouseColor::Red,
                token: TokenId(99),
                count: 4
            }
        );
        assert_eq!(house.token_ids().len(), 4);
    }

    #[test]
    fn test_empty_house_takes_tokens_up_to_four() {
        let mut house = House::empty(HouseColor::Green);
        for i in 0..4 {
            house.add_token(TokenId(i)).unwrap();
        }
        assert!(house.add_token(TokenId(4)).is_err());
    }

    #[test]
    fn test_build_registers_tokens_through_the_cap() {
        let (mut house, nodes, tokens) = built(HouseColor::Red);
        let ids: Vec<TokenId> = tokens.iter().map(|t| t.id()).collect();
        assert_eq!(house.token_ids(), ids.as_slice());
        // re-registering an existing token is not a fifth token
        house.add_token(ids[0]).unwrap();
        assert_eq!(house.token_ids().len(), 4);

        for node in nodes.iter() {
            assert_eq!(
                Node::new(node.id(), node.kind(), node.house()).map(|n| n.kind()),
                Ok(node.kind())
            );
            if node.kind().requires_owner() {
                assert_eq!(node.house(), Some(HouseColor::Red));
            }
        }
    }

    #[test]
    fn test_second_build_into_the_same_arena_keeps_ids_unique() {
        let mut nodes = Vec::new();
        let mut tokens = Vec::new();
        let blue = House::build(HouseColor::Blue, &mut nodes, &mut tokens).unwrap();
        let red = House::build(HouseColor::Red, &mut nodes, &mut tokens).unwrap();
        assert_eq!(red.home_slots()[0].as_usize(), 4 + CHAIN_LEN);
        assert_eq!(red.token_ids()[0], TokenId(4));
        assert!(blue.chain().iter().all(|id| !red.chain().contains(id)));
    }

    #[test]
    fn test_chain_layout() {
        let (house, nodes, _) = built(HouseColor::Yellow);
        let kinds: Vec<NodeKind> = house
            .chain()
            .iter()
            .map(|id| nodes[id.as_usize()].kind())
            .collect();
        assert_eq!(kinds, CHAIN_KINDS.to_vec());
        assert_eq!(house.home_stretch().len(), HOME_STRETCH_LEN);

        let branch = &nodes[house.branch_node().as_usize()];
        assert_eq!(branch.next(), Some(house.chain()[1]));
        assert_eq!(branch.next_home_stretch(), Some(house.first_home_stretch_node()));
        assert!(nodes[house.end_node().as_usize()].next().is_none());
        // not wired to the next house yet
        assert!(nodes[house.last_track_node().as_usize()].next().is_none());

        for slot in house.home_slots() {
            assert_eq!(nodes[slot.as_usize()].next(), Some(house.entry_node()));
        }
        for id in house.home_stretch() {
            assert_eq!(nodes[id.as_usize()].house(), Some(HouseColor::Yellow));
        }
        assert!(nodes[house.entry_node().as_usize()].house().is_none());
        assert!(nodes[house.star_node().as_usize()].is_safe());
    }
}
