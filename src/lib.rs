mod engine;
mod error;
mod load;
mod registry;
mod types;

pub use error::TagsiftError;
pub use load::{ActionConfig, ConditionConfig, RuleConfig, RuleSetConfig};
pub use registry::{ActionCtor, ConditionCtor, Params, Registry};
pub use types::{
    Action, ActionError, All, Any, CompareOp, Condition, Dataset, DatasetError, DeleteElement,
    ElementExists, ElementMatch, EmptyElement, ExecutionReport, False, LoadError, MemoryDataset,
    Not, Rule, RuleBuilder, RuleOutcome, RuleSet, RuleSetBuilder, SetElement, True, Value, all,
    always, any, delete_element, element_exists, element_match, empty_element, never, not,
    set_element,
};
