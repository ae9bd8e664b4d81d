use crate::graph::EdgeId;

use std::collections::HashMap;

/// Edges claimed by the current wave, grouped by the level that claimed them
/// Maintains both the edge -> level map and the ordered level groups
#[derive(Debug, Clone, Default)]
pub struct ClaimedEdges {
    /// For O(1) "already claimed?" checks
    level_of: HashMap<EdgeId, usize>,
    /// Level groups in discovery order, each in claim order
    levels: Vec<Vec<EdgeId>>,
}

impl ClaimedEdges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim an edge for `level` in a single check-and-set
    /// Returns true if the edge was newly claimed, false if it already belonged to a level
    pub fn try_claim(&mut self, edge: EdgeId, level: usize) -> bool {
        if self.level_of.contains_key(&edge) {
            return false;
        }

        debug_assert!(
            level + 1 >= self.levels.len(),
            "levels are claimed in increasing order"
        );
        if self.levels.len() <= level {
            self.levels.resize_with(level + 1, Vec::new);
        }

        self.level_of.insert(edge, level);
        self.levels[level].push(edge);
        true
    }

    pub fn contains(&self, edge: EdgeId) -> bool {
        self.level_of.contains_key(&edge)
    }

    pub fn level_of(&self, edge: EdgeId) -> Option<usize> {
        self.level_of.get(&edge).copied()
    }

    /// Edges of one level in claim order; empty past the deepest level
    pub fn level(&self, level: usize) -> &[EdgeId] {
        self.levels.get(level).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn levels(&self) -> &[Vec<EdgeId>] {
        &self.levels
    }

    /// Number of levels
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Number of claimed edges
    pub fn len(&self) -> usize {
        self.level_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.level_of.is_empty()
    }

    pub fn clear(&mut self) {
        self.level_of.clear();
        self.levels.clear();
    }
}
