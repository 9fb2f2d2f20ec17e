mod action;
mod condition;
mod dataset;
mod error;
mod report;
mod rule;
mod ruleset;
mod value;

pub use action::{
    Action, ActionError, DeleteElement, EmptyElement, SetElement, delete_element, empty_element,
    set_element,
};
pub use condition::{
    All, Any, CompareOp, Condition, ElementExists, ElementMatch, False, Not, True, all, always,
    any, element_exists, element_match, never, not,
};
pub use dataset::{Dataset, DatasetError, MemoryDataset};
pub use error::LoadError;
pub use report::{ExecutionReport, RuleOutcome};
pub use rule::Rule;
pub use ruleset::{RuleBuilder, RuleSet, RuleSetBuilder};
pub use value::Value;

pub(crate) use action::{
    delete_element_from_config, empty_element_from_config, set_element_from_config,
};
pub(crate) use condition::{
    all_from_config, any_from_config, element_exists_from_config, element_match_from_config,
    false_from_config, not_from_config, true_from_config,
};
