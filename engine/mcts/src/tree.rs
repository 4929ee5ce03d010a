//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices, so parent links never form
//! ownership cycles.

use league_core::{LeagueState, TradeAction};

use crate::node::{MctsNode, NodeId};

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree {
    /// Arena storing all nodes
    nodes: Vec<MctsNode>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl MctsTree {
    /// Create a new tree rooted at `state`.
    pub fn new(state: LeagueState) -> Self {
        Self {
            nodes: vec![MctsNode::new_root(state)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    pub fn allocate(&mut self, node: MctsNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[MctsNode] {
        &self.nodes
    }

    /// Child with the highest UCT score. Ties go to the earliest child.
    pub fn select_child(&self, node_id: NodeId, c: f64, epsilon: f64) -> Option<NodeId> {
        let node = self.get(node_id);
        let parent_visits = node.visit_count;
        first_max(node.children.iter().copied(), |id| {
            self.get(id).uct_score(parent_visits, c, epsilon)
        })
    }

    /// Add a child to a parent node.
    /// Returns the new child's NodeId.
    pub fn add_child(&mut self, parent_id: NodeId, action: TradeAction, state: LeagueState) -> NodeId {
        let child_id = self.allocate(MctsNode::new_child(parent_id, action, state));
        self.get_mut(parent_id).children.push(child_id);
        child_id
    }

    /// Add one visit and `reward` to every node from `leaf_id` up to the root.
    /// Every node scores the same focal team, so the reward is never negated.
    pub fn backpropagate(&mut self, leaf_id: NodeId, reward: f64) {
        let mut current_id = leaf_id;
        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.visit_count += 1;
            node.reward_sum += reward;
            current_id = node.parent;
        }
    }

    /// Visited root child with the highest exploitation score (exploration
    /// weight zero). Ties go to the earliest child.
    pub fn best_child(&self, epsilon: f64) -> Option<NodeId> {
        let visited = self
            .get(self.root)
            .children
            .iter()
            .copied()
            .filter(|&id| self.get(id).visit_count > 0);
        first_max(visited, |id| self.get(id).exploitation(epsilon))
    }

    /// Visits and reward sums of the root's children, in child order.
    pub fn root_child_stats(&self) -> Vec<ChildStats> {
        self.get(self.root)
            .children
            .iter()
            .map(|&id| {
                let node = self.get(id);
                ChildStats {
                    visits: node.visit_count,
                    reward_sum: node.reward_sum,
                }
            })
            .collect()
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            root_value: root.mean_reward(),
            root_children: root.children.len(),
            max_depth: self.compute_max_depth(self.root, 0),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId, current_depth: u32) -> u32 {
        let node = self.get(node_id);
        if node.children.is_empty() {
            return current_depth;
        }

        node.children
            .iter()
            .map(|id| self.compute_max_depth(*id, current_depth + 1))
            .max()
            .unwrap_or(current_depth)
    }
}

/// First item with the highest score. `Iterator::max_by` keeps the last one.
pub(crate) fn first_max<T: Copy>(
    items: impl IntoIterator<Item = T>,
    score: impl Fn(T) -> f64,
) -> Option<T> {
    let mut best: Option<(T, f64)> = None;
    for item in items {
        let s = score(item);
        match best {
            Some((_, best_score)) if s <= best_score => {}
            _ => best = Some((item, s)),
        }
    }
    best.map(|(item, _)| item)
}

/// Visit statistics of one root child, summed across root-parallel trees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChildStats {
    pub visits: u32,
    pub reward_sum: f64,
}

impl ChildStats {
    pub fn merge(&mut self, other: ChildStats) {
        self.visits += other.visits;
        self.reward_sum += other.reward_sum;
    }

    pub fn mean_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.reward_sum / self.visits as f64
        }
    }

    pub fn exploitation(&self, epsilon: f64) -> f64 {
        self.reward_sum / (self.visits as f64 + epsilon)
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_value: f64,
    pub root_children: usize,
    pub max_depth: u32,
}
