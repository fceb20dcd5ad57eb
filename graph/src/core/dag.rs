use super::{node::CommitNode, edge::Edge};
use crate::error::{Result, ValidationError};
use crate::fastforward::can_fastforward;
use gitgen_core::Command;
use std::collections::{HashMap, HashSet, VecDeque};

/// Directed Acyclic Graph replayed from a command log
#[derive(Debug, Clone)]
pub struct Dag {
    /// All nodes indexed by commit ID
    pub nodes: HashMap<String, CommitNode>,
    /// Commit IDs in the order they were defined
    pub order: Vec<String>,
    /// All edges in the graph
    pub edges: Vec<Edge>,
    /// Quick lookup: commit ID -> children IDs
    pub children: HashMap<String, Vec<String>>,
    /// Generation of each commit, roots being 1
    depths: HashMap<String, usize>,
}

impl Dag {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            order: Vec::new(),
            edges: Vec::new(),
            children: HashMap::new(),
            depths: HashMap::new(),
        }
    }

    /// Replay a command log the way a repository builder would, checking
    /// that every reference points at a commit defined earlier.
    pub fn from_commands(commands: &[Command]) -> Result<Self> {
        let mut dag = Self::default();

        for (index, command) in commands.iter().enumerate() {
            match command {
                Command::Commit { id, message, parents, branches, tags, .. } => {
                    if dag.nodes.contains_key(id) {
                        return Err(ValidationError::DuplicateCommit { index, id: id.clone() });
                    }
                    if let Some(parent) = parents.iter().find(|p| !dag.nodes.contains_key(*p)) {
                        return Err(ValidationError::UnknownParent {
                            index,
                            id: id.clone(),
                            parent: parent.clone(),
                        });
                    }

                    dag.add_node(CommitNode::new(id.clone(), parents.iter().cloned(), message.clone()));

                    for name in tags.iter().flatten() {
                        dag.add_tag(index, name, id)?;
                    }
                    for name in branches.iter().flatten() {
                        dag.add_branch(index, name, id)?;
                    }
                }
                Command::Tag { name, on, .. } => dag.add_tag(index, name, on)?,
                Command::Branch { name, on } => dag.add_branch(index, name, on)?,
                // Only affects signatures and default trees
                Command::Config { .. } => {}
            }
        }

        Ok(dag)
    }

    /// Add a commit node to the DAG. Parents must already be present.
    pub fn add_node(&mut self, node: CommitNode) {
        let id = node.id.clone();

        // Add edges for each parent
        for parent_id in &node.parents {
            let edge = if node.parents.len() > 1 {
                Edge::merge(id.clone(), parent_id.clone())
            } else {
                Edge::new(id.clone(), parent_id.clone())
            };
            self.edges.push(edge);

            // Update children map
            self.children
                .entry(parent_id.clone())
                .or_default()
                .push(id.clone());
        }

        let depth = node
            .parents
            .iter()
            .filter_map(|p| self.depths.get(p))
            .max()
            .map_or(1, |d| d + 1);
        self.depths.insert(id.clone(), depth);

        self.order.push(id.clone());
        self.nodes.insert(id, node);
    }

    fn add_tag(&mut self, index: usize, name: &str, on: &str) -> Result<()> {
        // Tags are force-created, so a later one replaces an earlier one
        for node in self.nodes.values_mut() {
            node.tags.retain(|t| t != name);
        }
        let node = self.target_mut(index, name, on)?;
        node.tags.push(name.to_string());
        Ok(())
    }

    fn add_branch(&mut self, index: usize, name: &str, on: &str) -> Result<()> {
        // Branches are force-moved the same way
        for node in self.nodes.values_mut() {
            node.branches.retain(|b| b != name);
        }
        let node = self.target_mut(index, name, on)?;
        node.branches.push(name.to_string());
        Ok(())
    }

    fn target_mut(&mut self, index: usize, name: &str, on: &str) -> Result<&mut CommitNode> {
        self.nodes.get_mut(on).ok_or_else(|| ValidationError::UnknownTarget {
            index,
            name: name.to_string(),
            on: on.to_string(),
        })
    }

    /// Get all root commits (no parents), in definition order
    pub fn roots(&self) -> Vec<&CommitNode> {
        self.in_order()
            .filter(|node| node.is_root())
            .collect()
    }

    /// Get all leaf commits (no children), in definition order
    pub fn leaves(&self) -> Vec<&CommitNode> {
        self.in_order()
            .filter(|node| !self.children.contains_key(&node.id))
            .collect()
    }

    fn in_order(&self) -> impl Iterator<Item = &CommitNode> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Get children of a commit
    pub fn get_children(&self, commit_id: &str) -> Vec<&CommitNode> {
        self.children
            .get(commit_id)
            .map(|child_ids| {
                child_ids
                    .iter()
                    .filter_map(|id| self.nodes.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get parents of a commit
    pub fn get_parents(&self, commit_id: &str) -> Vec<&CommitNode> {
        self.nodes
            .get(commit_id)
            .map(|node| {
                node.parents
                    .iter()
                    .filter_map(|id| self.nodes.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Tags attached to a commit
    pub fn tags_on(&self, commit_id: &str) -> &[String] {
        self.nodes
            .get(commit_id)
            .map(|node| node.tags.as_slice())
            .unwrap_or_default()
    }

    /// Longest distance from a root, counting both ends
    pub fn depth_of(&self, commit_id: &str) -> Option<usize> {
        self.depths.get(commit_id).copied()
    }

    /// Whether `ancestor` is reachable from `descendant` through parent
    /// links. A commit is its own ancestor.
    pub fn is_ancestor(&self, ancestor: &str, descendant: &str) -> bool {
        if !self.nodes.contains_key(ancestor) {
            return false;
        }

        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([descendant]);

        while let Some(id) = queue.pop_front() {
            if id == ancestor {
                return true;
            }
            if !seen.insert(id) {
                continue;
            }
            if let Some(node) = self.nodes.get(id) {
                queue.extend(node.parents.iter().map(String::as_str));
            }
        }

        false
    }

    /// Commit all of `ids` could be fast-forwarded to, if they lie on one
    /// line of history
    pub fn fastforward_target<'a>(&self, ids: &[&'a str]) -> Option<&'a str> {
        can_fastforward(ids, |a, b| self.is_ancestor(a, b))
    }

    /// Count of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Count of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Check if DAG contains orphan branches
    pub fn has_orphan_branches(&self) -> bool {
        self.roots().len() > 1
    }

    /// Get statistics about the DAG
    pub fn stats(&self) -> DagStats {
        let merge_commits = self.nodes.values().filter(|n| n.is_merge()).count();
        let tagged_commits = self.nodes.values().filter(|n| n.is_tagged()).count();
        let merge_edges = self.edges.iter().filter(|e| e.is_merge()).count();
        let root_commits = self.roots().len();
        let leaf_commits = self.leaves().len();

        DagStats {
            total_commits: self.nodes.len(),
            total_edges: self.edges.len(),
            merge_commits,
            merge_edges,
            root_commits,
            leaf_commits,
            tagged_commits,
            max_depth: self.depths.values().copied().max().unwrap_or(0),
            has_orphans: self.has_orphan_branches(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DagStats {
    pub total_commits: usize,
    pub total_edges: usize,
    pub merge_commits: usize,
    /// Edges leaving a merge commit
    pub merge_edges: usize,
    pub root_commits: usize,
    pub leaf_commits: usize,
    pub tagged_commits: usize,
    pub max_depth: usize,
    pub has_orphans: bool,
}

impl Default for Dag {
    fn default() -> Self {
        Self::new()
    }
}
