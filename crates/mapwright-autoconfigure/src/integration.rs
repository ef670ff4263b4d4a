//! Built-in provider backed by registered prototypes

use std::collections::HashMap;

use mapwright_core::{Provider, ProvisionRequest, TypeName};
use serde_json::Value;

/// Registry of destination prototypes keyed by type name.
///
/// As a [`Provider`] it answers each request with a clone of the prototype
/// registered for the requested type, or `None` when nothing is registered.
#[derive(Debug, Clone, Default)]
pub struct InstanceRegistry {
    instances: HashMap<TypeName, Value>,
}

impl InstanceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the prototype for `type_name`
    pub fn register(&mut self, type_name: impl Into<TypeName>, prototype: Value) -> &mut Self {
        self.instances.insert(type_name.into(), prototype);
        self
    }

    /// Builder form of [`register`](Self::register)
    pub fn with_instance(mut self, type_name: impl Into<TypeName>, prototype: Value) -> Self {
        self.register(type_name, prototype);
        self
    }

    /// Prototype registered for `type_name`
    pub fn get(&self, type_name: &TypeName) -> Option<&Value> {
        self.instances.get(type_name)
    }

    /// Number of registered prototypes
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl Provider for InstanceRegistry {
    fn provide(&self, request: &ProvisionRequest<'_>) -> Option<Value> {
        let instance = self.get(request.requested).cloned();
        if instance.is_some() {
            tracing::trace!(requested = %request.requested, "Providing registered instance");
        }
        instance
    }

    fn name(&self) -> &str {
        "InstanceRegistry"
    }
}
