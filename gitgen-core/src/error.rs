use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenerateError>;

/// Errors raised while generating, reading or writing a command log
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A generation parameter is outside its accepted range
    #[error("invalid parameter `{name}`: {value} (must be a positive integer)")]
    InvalidParameter { name: &'static str, value: u64 },

    /// The requested graph would exceed the configured commit cap
    #[error("depth {depth} with {branching} children exceeds the limit of {max} commits")]
    TooLarge { depth: u32, branching: u32, max: u64 },

    /// The requested depth is beyond the configured generation cap
    #[error("depth {depth} exceeds the limit of {max} generations")]
    DepthLimit { depth: u32, max: u32 },

    #[error("failed to serialize command log: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}
