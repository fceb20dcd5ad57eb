//! Synthetic commit graph generation.
//!
//! A run starts from a single root commit. Every commit above the last
//! generation gets `branching` children, and every commit in the last
//! generation is a leaf that receives a tag. Each commit carries one file
//! whose content is its ancestry path, e.g. `1 -> 2 -> 4`.

use std::fmt;
use std::rc::Rc;

use crate::command::Command;
use crate::config::GeneratorConfig;
use crate::error::{GenerateError, Result};

/// Sequential identifier of a generated commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out identifiers for a single run, starting at 1
#[derive(Debug, Default)]
pub struct IdAllocator {
    current: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> NodeId {
        self.current += 1;
        NodeId(self.current)
    }

    /// Number of identifiers handed out so far
    pub fn allocated(&self) -> u64 {
        self.current
    }
}

/// Identifiers from the root down to a node, inclusive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AncestryPath(Vec<NodeId>);

impl AncestryPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// This path extended by `id`
    pub fn child(&self, id: NodeId) -> Self {
        let mut ids = Vec::with_capacity(self.0.len() + 1);
        ids.extend_from_slice(&self.0);
        ids.push(id);
        Self(ids)
    }

    pub fn ids(&self) -> &[NodeId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Identifiers joined by `" -> "`
    pub fn render(&self) -> String {
        self.0
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

/// Validated generation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphParams {
    depth: u32,
    branching: u32,
    commits: u64,
}

impl GraphParams {
    /// Check both values are positive and the resulting graph fits the
    /// configured limits.
    pub fn new(depth: u32, branching: u32, config: &GeneratorConfig) -> Result<Self> {
        if depth == 0 {
            return Err(GenerateError::InvalidParameter { name: "depth", value: 0 });
        }
        if branching == 0 {
            return Err(GenerateError::InvalidParameter { name: "branching", value: 0 });
        }

        if depth > config.max_depth {
            return Err(GenerateError::DepthLimit { depth, max: config.max_depth });
        }

        let too_large = GenerateError::TooLarge {
            depth,
            branching,
            max: config.max_commits,
        };

        // Sum of branching^k for k < depth, bailing out once past the cap
        let mut commits: u64 = 0;
        let mut level: u64 = 1;
        for generation in 0..depth {
            commits = match commits.checked_add(level) {
                Some(total) if total <= config.max_commits => total,
                _ => return Err(too_large),
            };
            if generation + 1 < depth {
                level = match level.checked_mul(u64::from(branching)) {
                    Some(next) => next,
                    None => return Err(too_large),
                };
            }
        }

        Ok(Self { depth, branching, commits })
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn branching(&self) -> u32 {
        self.branching
    }

    /// Number of commit commands a run will emit
    pub fn commit_count(&self) -> u64 {
        self.commits
    }

    /// Number of leaves, and therefore tag commands
    pub fn leaf_count(&self) -> u64 {
        // Bounded by commit_count, so this cannot overflow
        u64::from(self.branching).pow(self.depth - 1)
    }
}

/// Builds the command log for a synthetic commit tree
#[derive(Debug, Clone, Default)]
pub struct GraphGenerator {
    config: GeneratorConfig,
}

impl GraphGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the command log for a tree `depth` generations deep where
    /// each non-leaf commit has `branching` children.
    ///
    /// Parameters are validated before anything is emitted, so an error
    /// never comes with a partial log.
    pub fn generate(&self, depth: u32, branching: u32) -> Result<Vec<Command>> {
        let params = GraphParams::new(depth, branching, &self.config)?;
        self.generate_with(params)
    }

    /// Generate from already validated parameters. Fails with `TooLarge`
    /// when the command log cannot be allocated.
    pub fn generate_with(&self, params: GraphParams) -> Result<Vec<Command>> {
        tracing::debug!(
            depth = params.depth,
            branching = params.branching,
            commits = params.commit_count(),
            tags = params.leaf_count(),
            "generating commit graph"
        );

        let mut run = Run::new(&self.config, params)?;
        run.build();

        tracing::debug!(commands = run.log.len(), ids = run.ids.allocated(), "generation finished");
        Ok(run.log)
    }
}

/// Pending subtree: a node at `level` below `parent`
struct Frame {
    level: u32,
    parent: Option<NodeId>,
    path: Rc<AncestryPath>,
}

/// State owned by one generation run
struct Run<'a> {
    config: &'a GeneratorConfig,
    params: GraphParams,
    ids: IdAllocator,
    log: Vec<Command>,
}

impl<'a> Run<'a> {
    /// Reserve the whole log up front so an oversized run fails here
    /// instead of aborting part way through.
    fn new(config: &'a GeneratorConfig, params: GraphParams) -> Result<Self> {
        let too_large = || GenerateError::TooLarge {
            depth: params.depth,
            branching: params.branching,
            max: config.max_commits,
        };

        let capacity = params
            .commit_count()
            .checked_add(params.leaf_count())
            .and_then(|total| usize::try_from(total).ok())
            .ok_or_else(too_large)?;

        let mut log = Vec::new();
        log.try_reserve_exact(capacity).map_err(|err| {
            tracing::warn!(capacity, %err, "cannot allocate command log");
            too_large()
        })?;

        Ok(Self {
            config,
            params,
            ids: IdAllocator::new(),
            log,
        })
    }

    /// Depth-first pre-order walk with an explicit stack.
    ///
    /// Sibling frames are identical, so popping them in stack order assigns
    /// ids exactly as a recursive descent would.
    fn build(&mut self) {
        let mut stack = vec![Frame {
            level: self.params.depth,
            parent: None,
            path: Rc::new(AncestryPath::new()),
        }];

        while let Some(frame) = stack.pop() {
            let id = self.ids.allocate();
            let path = frame.path.child(id);
            let parents = frame.parent.map(|p| vec![p.to_string()]).unwrap_or_default();

            self.log.push(Command::commit(
                id.to_string(),
                format!("{}{}", self.config.message_prefix, id),
                parents,
                &self.config.file_name,
                path.render(),
            ));

            if frame.level <= 1 {
                self.log.push(Command::tag(
                    format!("{}{}", self.config.tag_prefix, id),
                    id.to_string(),
                ));
                continue;
            }

            let path = Rc::new(path);
            for _ in 0..self.params.branching {
                stack.push(Frame {
                    level: frame.level - 1,
                    parent: Some(id),
                    path: Rc::clone(&path),
                });
            }
        }
    }
}
