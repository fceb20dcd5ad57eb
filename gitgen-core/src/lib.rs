pub mod command;
pub mod config;
pub mod emitter;
pub mod error;
pub mod generator;

pub use command::{Command, Tree, TreeNode, parse_commands, parse_commands_from_reader};
pub use config::GeneratorConfig;
pub use emitter::CommandEmitter;
pub use error::{GenerateError, Result};
pub use generator::{AncestryPath, GraphGenerator, GraphParams, IdAllocator, NodeId};
