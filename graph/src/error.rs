use thiserror::Error;

pub type Result<T> = std::result::Result<T, ValidationError>;

/// A command log that a repository builder could not replay
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("command {index}: commit `{id}` is defined twice")]
    DuplicateCommit { index: usize, id: String },

    #[error("command {index}: commit `{id}` has unknown parent `{parent}`")]
    UnknownParent { index: usize, id: String, parent: String },

    #[error("command {index}: `{name}` points at unknown commit `{on}`")]
    UnknownTarget { index: usize, name: String, on: String },
}
