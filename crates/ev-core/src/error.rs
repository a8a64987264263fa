//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `EvError` as one variant
//! where they need to surface core failures.

use thiserror::Error;

/// The base error type for `ev-core` and a common variant for sub-crates.
#[derive(Debug, Error)]
pub enum EvError {
    #[error("duplicate village {0:?}")]
    DuplicateVillage(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `ev-*` crates.
pub type EvResult<T> = Result<T, EvError>;
