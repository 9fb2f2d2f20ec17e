use std::collections::HashMap;

use thiserror::Error;

use super::Value;

/// Raised when a concrete dataset cannot honor a read or write, e.g. because
/// the tag identifier cannot be represented in its schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    #[error("malformed tag identifier '{tag}'")]
    MalformedTag { tag: String },
}

/// Tag-keyed element store inspected by conditions and mutated by actions.
///
/// Implemented by the surrounding domain layer; one instance represents one
/// record and is exclusively owned by its caller for the duration of a pass.
/// Conditions receive `&dyn Dataset` and therefore cannot mutate it.
///
/// `set` and `delete` are fallible because a concrete record schema may
/// reject a tag identifier outright; deleting an absent tag is a no-op, not
/// an error.
pub trait Dataset {
    /// Whether the tag is present.
    fn exists(&self, tag: &str) -> bool;

    /// Read the tag's value, or `None` if absent.
    fn get(&self, tag: &str) -> Option<&Value>;

    /// Create or overwrite the tag's value.
    fn set(&mut self, tag: &str, value: Value) -> Result<(), DatasetError>;

    /// Remove the tag. Absent tags are left absent without error.
    fn delete(&mut self, tag: &str) -> Result<(), DatasetError>;
}

/// In-memory [`Dataset`] backed by a `HashMap`.
///
/// Used by the test suites and by batch callers that have no domain-specific
/// store. Tags are arbitrary non-empty strings; the empty tag is rejected as
/// malformed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryDataset {
    elements: HashMap<String, Value>,
}

impl MemoryDataset {
    /// Create an empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, chaining style. Intended for literal tags in tests
    /// and fixtures; the empty tag is ignored. Use [`Dataset::set`] when the
    /// tag comes from input.
    #[must_use]
    pub fn with(mut self, tag: &str, value: impl Into<Value>) -> Self {
        if !tag.is_empty() {
            self.elements.insert(tag.to_owned(), value.into());
        }
        self
    }

    /// The number of elements present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the dataset holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over all (tag, value) pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.elements.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Dataset for MemoryDataset {
    fn exists(&self, tag: &str) -> bool {
        self.elements.contains_key(tag)
    }

    fn get(&self, tag: &str) -> Option<&Value> {
        self.elements.get(tag)
    }

    fn set(&mut self, tag: &str, value: Value) -> Result<(), DatasetError> {
        if tag.is_empty() {
            return Err(DatasetError::MalformedTag { tag: tag.to_owned() });
        }
        self.elements.insert(tag.to_owned(), value);
        Ok(())
    }

    fn delete(&mut self, tag: &str) -> Result<(), DatasetError> {
        if tag.is_empty() {
            return Err(DatasetError::MalformedTag { tag: tag.to_owned() });
        }
        self.elements.remove(tag);
        Ok(())
    }
}
