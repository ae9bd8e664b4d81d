use bevy::math::Vec3;
use std::collections::HashMap;

use super::edge::{EdgeId, EdgeSpec};
use super::node::{Node, NodeId};
use crate::error::WaveError;

/// Immutable adjacency structure over the nodes and edges of one constellation
/// This represents ONLY positions and adjacency, never animation state
#[derive(Debug, Clone)]
pub struct GraphModel {
    /// Nodes in insertion order
    nodes: Vec<Node>,
    /// NodeId -> position in `nodes`
    index: HashMap<NodeId, usize>,
    /// Edges indexed by EdgeId
    edges: Vec<EdgeSpec>,
}

impl GraphModel {
    /// Build the graph from node positions and an edge list, O(V+E)
    ///
    /// Edge ids are assigned from the position of each pair in `edges`.
    /// Fails with [`WaveError::Config`] when either set is empty, a node id
    /// repeats, an edge names an unknown node, or an edge loops on one node.
    pub fn new<N, E>(nodes: N, edges: E) -> Result<Self, WaveError>
    where
        N: IntoIterator<Item = (NodeId, Vec3)>,
        E: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let mut model = GraphModel {
            nodes: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
        };

        for (id, position) in nodes {
            if model.index.insert(id, model.nodes.len()).is_some() {
                return Err(WaveError::Config(format!("node {} is listed twice", id)));
            }
            model.nodes.push(Node::new(id, position));
        }

        for (a, b) in edges {
            let id = EdgeId(model.edges.len());
            if a == b {
                return Err(WaveError::Config(format!("edge {} loops on node {}", id, a)));
            }
            let (Some(&ia), Some(&ib)) = (model.index.get(&a), model.index.get(&b)) else {
                return Err(WaveError::Config(format!(
                    "edge {} joins unknown node ({}-{})",
                    id, a, b
                )));
            };

            model.nodes[ia].connect(id, b);
            model.nodes[ib].connect(id, a);
            model.edges.push(EdgeSpec::new(id, a, b));
        }

        if model.nodes.is_empty() {
            return Err(WaveError::Config("graph has no nodes".to_string()));
        }
        if model.edges.is_empty() {
            return Err(WaveError::Config("graph has no edges".to_string()));
        }

        Ok(model)
    }

    /// Node minimizing `metric`; ties go to the node inserted first
    pub fn select_root<F>(&self, mut metric: F) -> NodeId
    where
        F: FnMut(&Node) -> f32,
    {
        let mut best = &self.nodes[0];
        let mut best_score = metric(best);

        for node in &self.nodes[1..] {
            let score = metric(node);
            // NaN never compares less, and neither does a tie
            if score < best_score || (best_score.is_nan() && !score.is_nan()) {
                best = node;
                best_score = score;
            }
        }

        best.id()
    }

    /// Node closest to a reference point
    pub fn select_root_nearest(&self, point: Vec3) -> NodeId {
        self.select_root(|node| node.position().distance(point))
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    /// Get all (edge, neighbor) pairs of a node; empty for unknown ids
    pub fn incident(&self, id: NodeId) -> &[(EdgeId, NodeId)] {
        self.node(id).map(Node::incident).unwrap_or(&[])
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeSpec] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
