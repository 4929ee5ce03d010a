//! MCTS tree node representation.
//!
//! Each node owns the league state reached by applying its trade to the
//! parent's state. Nodes store the visit statistics used for UCT selection.

use league_core::{LeagueState, TradeAction};

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Trade that led here from the parent. `None` only at the root.
    pub action: Option<TradeAction>,

    pub state: LeagueState,

    pub visit_count: u32,

    /// Sum of rollout rewards backpropagated through this node.
    pub reward_sum: f64,

    /// Depth budget exhausted or no team has anything left to offer.
    pub is_terminal: bool,

    /// Admissible children have been materialized. An expanded node with no
    /// children is a dead end.
    pub is_expanded: bool,

    /// Children in admissible-action order. Empty until expanded.
    pub children: Vec<NodeId>,
}

impl MctsNode {
    /// Create a new root node.
    pub fn new_root(state: LeagueState) -> Self {
        let is_terminal = state.is_terminal();
        Self {
            parent: NodeId::NONE,
            action: None,
            state,
            visit_count: 0,
            reward_sum: 0.0,
            is_terminal,
            is_expanded: false,
            children: Vec::new(),
        }
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, action: TradeAction, state: LeagueState) -> Self {
        let is_terminal = state.is_terminal();
        Self {
            parent,
            action: Some(action),
            state,
            visit_count: 0,
            reward_sum: 0.0,
            is_terminal,
            is_expanded: false,
            children: Vec::new(),
        }
    }

    /// Average backpropagated reward. Returns 0.0 if never visited.
    #[inline]
    pub fn mean_reward(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.reward_sum / self.visit_count as f64
        }
    }

    /// `reward / (visits + eps)`
    #[inline]
    pub fn exploitation(&self, epsilon: f64) -> f64 {
        self.reward_sum / (self.visit_count as f64 + epsilon)
    }

    /// `sqrt(ln(parent_visits + 1) / (visits + eps))`
    #[inline]
    pub fn exploration(&self, parent_visits: u32, epsilon: f64) -> f64 {
        ((parent_visits as f64 + 1.0).ln() / (self.visit_count as f64 + epsilon)).sqrt()
    }

    /// UCT score used during selection. Higher is more promising.
    #[inline]
    pub fn uct_score(&self, parent_visits: u32, c: f64, epsilon: f64) -> f64 {
        self.exploitation(epsilon) + c * self.exploration(parent_visits, epsilon)
    }

    /// Selection stops here.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.is_terminal || !self.is_expanded || self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use league_core::fixtures;

    #[test]
    fn test_node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(!NodeId(0).is_none());
        assert!(NodeId(0).is_some());
    }

    #[test]
    fn test_new_root() {
        let node = MctsNode::new_root(fixtures::market_league());

        assert!(node.parent.is_none());
        assert!(node.action.is_none());
        assert_eq!(node.visit_count, 0);
        assert!(!node.is_terminal);
        assert!(!node.is_expanded);
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_mean_reward() {
        let mut node = MctsNode::new_root(fixtures::market_league());
        assert_eq!(node.mean_reward(), 0.0);

        node.visit_count = 4;
        node.reward_sum = 2.0;
        assert!((node.mean_reward() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_uct_score() {
        let mut node = MctsNode::new_root(fixtures::market_league());
        node.visit_count = 10;
        node.reward_sum = 5.0;
        let eps = 1e-6;

        // exploit = 5 / 10, explore = sqrt(ln(101) / 10)
        let expected = 0.5 + 1.41 * (101f64.ln() / 10.0).sqrt();
        assert!((node.uct_score(100, 1.41, eps) - expected).abs() < 1e-5);
        assert!((node.uct_score(100, 0.0, eps) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_unvisited_child_dominates() {
        let visited = {
            let mut n = MctsNode::new_root(fixtures::market_league());
            n.visit_count = 3;
            n.reward_sum = 30.0;
            n
        };
        let fresh = MctsNode::new_root(fixtures::market_league());
        assert!(fresh.uct_score(3, 1.41, 1e-6) > visited.uct_score(3, 1.41, 1e-6));
    }

    #[test]
    fn test_is_leaf() {
        let mut node = MctsNode::new_root(fixtures::market_league());
        assert!(node.is_leaf());

        // Expanded dead end is still a leaf.
        node.is_expanded = true;
        assert!(node.is_leaf());

        node.children.push(NodeId(1));
        assert!(!node.is_leaf());

        node.is_terminal = true;
        assert!(node.is_leaf());
    }
}
