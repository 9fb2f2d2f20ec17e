use thiserror::Error;

use crate::LoadError;

/// Unified error type covering configuration parsing, ruleset loading, and
/// I/O.
///
/// Returned by convenience methods like
/// [`RuleSet::from_json()`](crate::RuleSet::from_json) and
/// [`RuleSet::from_file()`](crate::RuleSet::from_file).
#[derive(Debug, Error)]
pub enum TagsiftError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
