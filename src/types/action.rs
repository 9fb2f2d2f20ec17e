use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use super::dataset::{Dataset, DatasetError};
use super::error::LoadError;
use super::Value;
use crate::registry::{self, Params};

/// An action failed against a specific dataset. Recorded in the execution
/// report against the owning rule; never aborts the pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{action} failed on tag '{tag}': {source}")]
pub struct ActionError {
    pub action: &'static str,
    pub tag: String,
    #[source]
    pub source: DatasetError,
}

/// A mutation applied to a dataset.
///
/// Parameters (the target tag, the value to write) are fixed at
/// construction; instances carry no per-invocation state, so one action can
/// be reused across every dataset in a batch. An action never touches tags
/// other than its declared target.
pub trait Action: fmt::Debug + Send + Sync {
    fn run(&self, dataset: &mut dyn Dataset) -> Result<(), ActionError>;
}

/// Remove the tag if present. Absent tags are a documented no-op.
#[derive(Debug, Clone)]
pub struct DeleteElement {
    tag: String,
}

impl DeleteElement {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_owned(),
        }
    }
}

impl Action for DeleteElement {
    fn run(&self, dataset: &mut dyn Dataset) -> Result<(), ActionError> {
        dataset.delete(&self.tag).map_err(|source| ActionError {
            action: "DeleteElement",
            tag: self.tag.clone(),
            source,
        })
    }
}

/// Force the tag to hold an empty value, creating it when absent.
///
/// Creation-on-absence is deliberate: emptying a tag guarantees it exists
/// afterward with a zero-length value.
#[derive(Debug, Clone)]
pub struct EmptyElement {
    tag: String,
}

impl EmptyElement {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_owned(),
        }
    }
}

impl Action for EmptyElement {
    fn run(&self, dataset: &mut dyn Dataset) -> Result<(), ActionError> {
        dataset
            .set(&self.tag, Value::empty())
            .map_err(|source| ActionError {
                action: "EmptyElement",
                tag: self.tag.clone(),
                source,
            })
    }
}

/// Create or overwrite the tag with a configured value.
#[derive(Debug, Clone)]
pub struct SetElement {
    tag: String,
    value: Value,
}

impl SetElement {
    #[must_use]
    pub fn new(tag: &str, value: impl Into<Value>) -> Self {
        Self {
            tag: tag.to_owned(),
            value: value.into(),
        }
    }
}

impl Action for SetElement {
    fn run(&self, dataset: &mut dyn Dataset) -> Result<(), ActionError> {
        dataset
            .set(&self.tag, self.value.clone())
            .map_err(|source| ActionError {
                action: "SetElement",
                tag: self.tag.clone(),
                source,
            })
    }
}

#[must_use]
pub fn delete_element(tag: &str) -> Arc<dyn Action> {
    Arc::new(DeleteElement::new(tag))
}

#[must_use]
pub fn empty_element(tag: &str) -> Arc<dyn Action> {
    Arc::new(EmptyElement::new(tag))
}

#[must_use]
pub fn set_element(tag: &str, value: impl Into<Value>) -> Arc<dyn Action> {
    Arc::new(SetElement::new(tag, value))
}

// Configuration constructors wired into the registry builtins.

pub(crate) fn delete_element_from_config(params: &Params) -> Result<Arc<dyn Action>, LoadError> {
    let tag = registry::str_param(params, "DeleteElement", "tag")?;
    Ok(delete_element(tag))
}

pub(crate) fn empty_element_from_config(params: &Params) -> Result<Arc<dyn Action>, LoadError> {
    let tag = registry::str_param(params, "EmptyElement", "tag")?;
    Ok(empty_element(tag))
}

pub(crate) fn set_element_from_config(params: &Params) -> Result<Arc<dyn Action>, LoadError> {
    let tag = registry::str_param(params, "SetElement", "tag")?;
    let value = registry::value_param(params, "SetElement", "value")?;
    Ok(set_element(tag, value))
}
