//! Error types for shardcache

use std::fmt;

/// Result type alias for shardcache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a cache
///
/// Lookups and removals never fail: a missing key is reported through
/// `Option`/`bool`, and eviction is a normal side effect of `put`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Shard count must be at least 1
    InvalidShardCount(usize),

    /// Per-shard capacity must be at least 1
    InvalidCapacity(usize),

    /// Config document could not be parsed
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidShardCount(n) => {
                write!(f, "Invalid shard count: {} (must be greater than 0)", n)
            }
            Error::InvalidCapacity(n) => {
                write!(f, "Invalid per-shard capacity: {} (must be greater than 0)", n)
            }
            Error::Config(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::InvalidShardCount(0).to_string(),
            "Invalid shard count: 0 (must be greater than 0)"
        );
        assert_eq!(
            Error::InvalidCapacity(0).to_string(),
            "Invalid per-shard capacity: 0 (must be greater than 0)"
        );
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(matches!(Error::from(err), Error::Config(_)));
    }
}
