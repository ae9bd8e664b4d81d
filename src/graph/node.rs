use bevy::math::Vec3;
use std::fmt;

use super::edge::EdgeId;

/// Node identifier, as supplied by the catalog (star id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl NodeId {
    pub const fn index(&self) -> usize {
        self.0
    }
}

/// A visual point of the graph together with its incident edges
///
/// Incident pairs keep the order in which the edge list named them.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    position: Vec3,
    incident: Vec<(EdgeId, NodeId)>,
}

impl Node {
    pub(super) fn new(id: NodeId, position: Vec3) -> Self {
        Node {
            id,
            position,
            incident: Vec::new(),
        }
    }

    pub(super) fn connect(&mut self, edge: EdgeId, neighbor: NodeId) {
        self.incident.push((edge, neighbor));
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// (edge, neighbor) pairs touching this node
    pub fn incident(&self) -> &[(EdgeId, NodeId)] {
        &self.incident
    }
}
