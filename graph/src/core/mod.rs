pub mod node;
pub mod edge;
pub mod dag;

pub use node::CommitNode;
pub use edge::{Edge, EdgeType};
pub use dag::{Dag, DagStats};
