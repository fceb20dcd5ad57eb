use smallvec::SmallVec;

/// A commit node in the DAG
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitNode {
    /// Commit ID as written in the command log
    pub id: String,
    /// Parent commit IDs
    pub parents: SmallVec<[String; 2]>,
    /// Commit message
    pub message: String,
    /// Tags pointing at this commit
    pub tags: Vec<String>,
    /// Branches pointing at this commit
    pub branches: Vec<String>,
}

impl CommitNode {
    pub fn new<I>(id: String, parents: I, message: String) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            id,
            parents: parents.into_iter().collect(),
            message,
            tags: Vec::new(),
            branches: Vec::new(),
        }
    }

    /// Check if this is a root commit (no parents)
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Check if this is a merge commit (multiple parents)
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn is_tagged(&self) -> bool {
        !self.tags.is_empty()
    }
}
