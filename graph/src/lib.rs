pub mod core;
pub mod error;
pub mod fastforward;

pub use core::{Dag, CommitNode, Edge, EdgeType, DagStats};
pub use error::{ValidationError, Result};
pub use fastforward::can_fastforward;
