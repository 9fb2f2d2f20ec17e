use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::types::{self, Action, Condition, LoadError, Value};

/// Parsed configuration parameters for one condition or action node.
pub type Params = serde_json::Map<String, serde_json::Value>;

/// Constructor for a condition class: receives the node's params and its
/// already-built children, returns a configured instance.
pub type ConditionCtor = Box<
    dyn Fn(&Params, Vec<Arc<dyn Condition>>) -> Result<Arc<dyn Condition>, LoadError>
        + Send
        + Sync,
>;

/// Constructor for an action class.
pub type ActionCtor = Box<dyn Fn(&Params) -> Result<Arc<dyn Action>, LoadError> + Send + Sync>;

/// String-keyed table of condition and action constructors.
///
/// Built explicitly during application setup and threaded into ruleset
/// loading by reference; there is no ambient global instance. Names are
/// unique across conditions and actions. Once registration stops the table
/// is read-only, so `&Registry` can be shared across concurrent loaders
/// without locking.
pub struct Registry {
    conditions: HashMap<String, ConditionCtor>,
    actions: HashMap<String, ActionCtor>,
}

impl Registry {
    /// An empty registry with no classes bound.
    #[must_use]
    pub fn new() -> Self {
        Self {
            conditions: HashMap::new(),
            actions: HashMap::new(),
        }
    }

    /// A registry with every built-in class pre-registered: `True`, `False`,
    /// `Any`, `All`, `Not`, `ElementExists`, `ElementMatch`,
    /// `DeleteElement`, `EmptyElement`, `SetElement`.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        let conditions: [(&str, ConditionCtor); 7] = [
            ("True", Box::new(types::true_from_config)),
            ("False", Box::new(types::false_from_config)),
            ("Any", Box::new(types::any_from_config)),
            ("All", Box::new(types::all_from_config)),
            ("Not", Box::new(types::not_from_config)),
            ("ElementExists", Box::new(types::element_exists_from_config)),
            ("ElementMatch", Box::new(types::element_match_from_config)),
        ];
        let actions: [(&str, ActionCtor); 3] = [
            ("DeleteElement", Box::new(types::delete_element_from_config)),
            ("EmptyElement", Box::new(types::empty_element_from_config)),
            ("SetElement", Box::new(types::set_element_from_config)),
        ];
        for (name, ctor) in conditions {
            registry.conditions.insert(name.to_owned(), ctor);
        }
        for (name, ctor) in actions {
            registry.actions.insert(name.to_owned(), ctor);
        }
        registry
    }

    /// Bind a condition class name to a constructor.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::DuplicateClass`] if the name is already bound to
    /// any class. Duplicate registration is a setup error, detected before
    /// any ruleset loads.
    pub fn register_condition(&mut self, name: &str, ctor: ConditionCtor) -> Result<(), LoadError> {
        self.check_unbound(name)?;
        self.conditions.insert(name.to_owned(), ctor);
        Ok(())
    }

    /// Bind an action class name to a constructor.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::DuplicateClass`] if the name is already bound.
    pub fn register_action(&mut self, name: &str, ctor: ActionCtor) -> Result<(), LoadError> {
        self.check_unbound(name)?;
        self.actions.insert(name.to_owned(), ctor);
        Ok(())
    }

    /// Construct a condition instance by class name.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::UnknownClass`] if the name is unbound, or
    /// whatever the constructor reports for bad params or arity.
    pub fn build_condition(
        &self,
        name: &str,
        params: &Params,
        children: Vec<Arc<dyn Condition>>,
    ) -> Result<Arc<dyn Condition>, LoadError> {
        let ctor = self
            .conditions
            .get(name)
            .ok_or_else(|| LoadError::UnknownClass {
                name: name.to_owned(),
            })?;
        ctor(params, children)
    }

    /// Construct an action instance by class name.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::UnknownClass`] if the name is unbound, or
    /// whatever the constructor reports for bad params.
    pub fn build_action(&self, name: &str, params: &Params) -> Result<Arc<dyn Action>, LoadError> {
        let ctor = self
            .actions
            .get(name)
            .ok_or_else(|| LoadError::UnknownClass {
                name: name.to_owned(),
            })?;
        ctor(params)
    }

    /// Whether the name is bound to a condition or action class.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.conditions.contains_key(name) || self.actions.contains_key(name)
    }

    /// Registered condition class names, sorted.
    #[must_use]
    pub fn condition_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.conditions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Registered action class names, sorted.
    #[must_use]
    pub fn action_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn check_unbound(&self, name: &str) -> Result<(), LoadError> {
        if self.contains(name) {
            return Err(LoadError::DuplicateClass {
                name: name.to_owned(),
            });
        }
        Ok(())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("conditions", &self.condition_names())
            .field("actions", &self.action_names())
            .finish()
    }
}

// Parameter accessors shared by the built-in constructors.

pub(crate) fn str_param<'a>(params: &'a Params, class: &str, key: &str) -> Result<&'a str, LoadError> {
    let raw = params.get(key).ok_or_else(|| LoadError::MissingParam {
        class: class.to_owned(),
        param: key.to_owned(),
    })?;
    raw.as_str().ok_or_else(|| LoadError::BadParam {
        class: class.to_owned(),
        param: key.to_owned(),
        reason: "expected a string".to_owned(),
    })
}

pub(crate) fn value_param(params: &Params, class: &str, key: &str) -> Result<Value, LoadError> {
    let raw = params.get(key).ok_or_else(|| LoadError::MissingParam {
        class: class.to_owned(),
        param: key.to_owned(),
    })?;
    Value::try_from(raw).map_err(|()| LoadError::BadParam {
        class: class.to_owned(),
        param: key.to_owned(),
        reason: "expected a scalar".to_owned(),
    })
}

pub(crate) fn expect_no_children(
    class: &str,
    children: &[Arc<dyn Condition>],
) -> Result<(), LoadError> {
    if children.is_empty() {
        return Ok(());
    }
    Err(LoadError::InvalidStructure {
        class: class.to_owned(),
        reason: format!("expected no children, got {}", children.len()),
    })
}
