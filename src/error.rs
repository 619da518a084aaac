use std::io;
use thiserror::Error;

/// Errors surfaced by the pattern demos.
///
/// Everything not listed here (command dispatch, visitor dispatch, eviction
/// delegation) is total over a closed set of variants and cannot fail.
#[derive(Error, Debug)]
pub enum PatternError {
    #[error("unsupported {kind} type: '{selector}'")]
    InvalidSelector { kind: &'static str, selector: String },

    #[error("cannot {operation} while {state}")]
    InvalidStateOperation {
        state: &'static str,
        operation: &'static str,
    },

    #[error("broken chain: handler '{handler}' has no successor and is not a terminal")]
    BrokenChain { handler: &'static str },

    #[error("cache capacity must be greater than 0, got {0}")]
    InvalidCapacity(usize),

    #[error("unknown demo '{0}' (run `pattern-catalog list` to see the catalog)")]
    UnknownDemo(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl PatternError {
    pub fn invalid_selector(kind: &'static str, selector: impl Into<String>) -> Self {
        Self::InvalidSelector {
            kind,
            selector: selector.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

pub type Result<T> = std::result::Result<T, PatternError>;
