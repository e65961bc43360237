//! Error types for value-analysis
//!
//! The analyser itself is total: imprecision is expressed as Top, never as an
//! error. The variants below report defects in the graph or configuration fed
//! to the analyser.

use crate::config::ConfigError;
use crate::shared::models::{NodeId, Symbol};
use thiserror::Error;

/// Main error type for value-analysis operations
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// An instruction names a successor outside the graph
    #[error("Analysis defect: node {node} has successor {successor} outside the graph")]
    DanglingSuccessor { node: NodeId, successor: NodeId },

    /// Entry node outside the graph
    #[error("Analysis defect: entry node {entry} outside the graph")]
    MissingEntry { entry: NodeId },

    /// A byte width no chunk or block copy can express
    #[error("Analysis defect: unsupported access width {width}")]
    UnsupportedWidth { width: i64 },

    /// Initializer list that cannot be laid out
    #[error("Analysis defect: malformed initializer for {symbol}: {reason}")]
    MalformedInitializer { symbol: Symbol, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AnalysisError {
    /// Structural defect in the analyser's input (as opposed to bad configuration)
    pub fn is_defect(&self) -> bool {
        !matches!(self, AnalysisError::Config(_))
    }

    pub fn malformed(symbol: Symbol, reason: impl Into<String>) -> Self {
        AnalysisError::MalformedInitializer {
            symbol,
            reason: reason.into(),
        }
    }
}

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defect_classification() {
        let err = AnalysisError::DanglingSuccessor {
            node: NodeId(1),
            successor: NodeId(9),
        };
        assert!(err.is_defect());
        assert!(err.to_string().contains("n9"));

        let err = AnalysisError::Config(ConfigError::MissingVersion);
        assert!(!err.is_defect());
    }
}
