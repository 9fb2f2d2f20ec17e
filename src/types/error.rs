use thiserror::Error;

/// Errors raised while registering classes or loading a ruleset from
/// configuration. All of these are fatal to the load: no partial ruleset is
/// ever activated.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unknown class name '{name}'")]
    UnknownClass { name: String },

    #[error("class name '{name}' is already registered")]
    DuplicateClass { name: String },

    #[error("invalid structure for '{class}': {reason}")]
    InvalidStructure { class: String, reason: String },

    #[error("missing required parameter '{param}' for '{class}'")]
    MissingParam { class: String, param: String },

    #[error("bad parameter '{param}' for '{class}': {reason}")]
    BadParam {
        class: String,
        param: String,
        reason: String,
    },

    #[error("rule '{rule}' has no condition")]
    MissingCondition { rule: String },
}
