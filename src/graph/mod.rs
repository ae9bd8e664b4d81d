mod edge;
mod model;
mod node;

pub use edge::{EdgeId, EdgeSpec};
pub use model::GraphModel;
pub use node::{Node, NodeId};
