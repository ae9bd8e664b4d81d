use super::node::NodeId;

use std::fmt;

/// Edge identifier: the index of the pair in the constructing edge list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

impl EdgeId {
    pub const fn index(&self) -> usize {
        self.0
    }
}

/// The fixed part of an edge: its id and the two nodes it joins
/// Endpoints keep the order of the source pair (no canonical form), so
/// parallel edges stay distinguishable by id alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeSpec {
    pub id: EdgeId,
    pub a: NodeId,
    pub b: NodeId,
}

impl EdgeSpec {
    pub fn new(id: EdgeId, a: NodeId, b: NodeId) -> Self {
        EdgeSpec { id, a, b }
    }
}
