//! Unified error types for tabnav
//!
//! Host primitives on the tree report failures through [`NavError`];
//! callers that process many items (paste, close) log and skip instead of aborting.

use crate::tree::ItemId;

/// Unified error type for navigation and tree operations
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// I/O errors (config and fixture files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The item is not (or no longer) part of the tree
    #[error("Item not found: {0}")]
    NotFound(ItemId),

    /// Moving a container into its own subtree
    #[error("Circular nesting: {item} cannot be placed inside {target}")]
    CircularNesting { item: ItemId, target: ItemId },

    /// Nesting a container would exceed the maximum depth
    #[error("Nesting too deep: {item} would reach depth {depth}")]
    NestingTooDeep { item: ItemId, depth: usize },

    /// Operation requires a container
    #[error("Not a container: {0}")]
    NotAContainer(ItemId),

    /// Operation requires a leaf
    #[error("Not a leaf: {0}")]
    NotALeaf(ItemId),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Tree fixture errors
    #[error("Fixture error: {0}")]
    Fixture(String),
}

/// Convenience Result type using NavError
pub type Result<T> = std::result::Result<T, NavError>;

impl NavError {
    /// Create a Config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a Fixture error
    pub fn fixture(msg: impl Into<String>) -> Self {
        Self::Fixture(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NavError::NotFound(ItemId(7));
        assert_eq!(format!("{}", err), "Item not found: #7");

        let err = NavError::CircularNesting {
            item: ItemId(1),
            target: ItemId(2),
        };
        assert_eq!(
            format!("{}", err),
            "Circular nesting: #1 cannot be placed inside #2"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: NavError = io_err.into();
        assert!(matches!(err, NavError::Io(_)));
    }

    #[test]
    fn test_helper_constructors() {
        assert!(matches!(NavError::config("bad"), NavError::Config(m) if m == "bad"));
        assert!(matches!(NavError::fixture("x"), NavError::Fixture(m) if m == "x"));
    }
}
