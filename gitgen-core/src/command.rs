use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;

use crate::error::Result;

/// File tree attached to a commit, keyed by path
pub type Tree = BTreeMap<String, TreeNode>;

/// Either a UTF-8 file or a nested directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    File(String),
    Tree(Tree),
}

/// One instruction for a repository builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Command {
    Commit {
        id: String,

        #[serde(default)]
        message: String,

        #[serde(default)]
        parents: Vec<String>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        tree: Option<Tree>,

        // Refs attached directly to the commit
        #[serde(default, skip_serializing_if = "Option::is_none")]
        branches: Option<Vec<String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tags: Option<Vec<String>>,
    },

    Branch {
        name: String,
        on: String,
    },

    Tag {
        name: String,
        on: String,

        #[serde(default, skip_serializing_if = "is_false")]
        lightweight: bool,
    },

    Config {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        all_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        all_email: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        author_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        author_email: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        committer_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        committer_email: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tagger_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tagger_email: Option<String>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        tree: Option<Tree>,
    },
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Command {
    /// Commit with a single file in its tree and no attached refs
    pub fn commit(id: String, message: String, parents: Vec<String>, file_name: &str, contents: String) -> Self {
        let mut tree = Tree::new();
        tree.insert(file_name.to_string(), TreeNode::File(contents));

        Command::Commit {
            id,
            message,
            parents,
            tree: Some(tree),
            branches: None,
            tags: None,
        }
    }

    /// Annotated tag pointing at `on`
    pub fn tag(name: String, on: String) -> Self {
        Command::Tag {
            name,
            on,
            lightweight: false,
        }
    }

    /// Id defined by this command, if it is a commit
    pub fn commit_id(&self) -> Option<&str> {
        match self {
            Command::Commit { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Commit id referenced by a branch or tag command
    pub fn target(&self) -> Option<&str> {
        match self {
            Command::Branch { on, .. } | Command::Tag { on, .. } => Some(on),
            _ => None,
        }
    }

    pub fn is_commit(&self) -> bool {
        matches!(self, Command::Commit { .. })
    }

    pub fn is_tag(&self) -> bool {
        matches!(self, Command::Tag { .. })
    }
}

/// Parse a JSON array of commands
pub fn parse_commands(input: &str) -> Result<Vec<Command>> {
    Ok(serde_json::from_str(input)?)
}

/// Parse a JSON array of commands from a reader (file or stdin)
pub fn parse_commands_from_reader<R: Read>(reader: R) -> Result<Vec<Command>> {
    Ok(serde_json::from_reader(reader)?)
}
