//! Collaborator-supplied extension points

use std::fmt;
use std::sync::Arc;

use mapwright_core::{Condition, Converter, Module, Provider};

use crate::configurer::TypeMapConfigurer;
use crate::integration::InstanceRegistry;

/// Everything other code contributes to engine initialization.
///
/// Every slot is optional; empty collections are skipped.
#[derive(Default)]
pub struct Extensions {
    provider: Option<Arc<dyn Provider>>,
    property_condition: Option<Arc<dyn Condition>>,
    type_map_configurers: Vec<Box<dyn TypeMapConfigurer>>,
    converters: Vec<Arc<dyn Converter>>,
    modules: Vec<Box<dyn Module>>,
    instance_registry: Option<InstanceRegistry>,
}

impl Extensions {
    /// No extensions
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the provider slot
    pub fn with_provider(mut self, provider: impl Provider + 'static) -> Self {
        self.provider = Some(Arc::new(provider));
        self
    }

    /// Set the global property condition
    pub fn with_property_condition(mut self, condition: impl Condition + 'static) -> Self {
        self.property_condition = Some(Arc::new(condition));
        self
    }

    /// Append a type-map configurer
    pub fn with_type_map_configurer(
        mut self,
        configurer: impl TypeMapConfigurer + 'static,
    ) -> Self {
        self.type_map_configurers.push(Box::new(configurer));
        self
    }

    /// Append a converter
    pub fn with_converter(mut self, converter: impl Converter + 'static) -> Self {
        self.converters.push(Arc::new(converter));
        self
    }

    /// Append a module
    pub fn with_module(mut self, module: impl Module + 'static) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    /// Registry installed as the provider when provider integration is enabled
    pub fn with_instance_registry(mut self, registry: InstanceRegistry) -> Self {
        self.instance_registry = Some(registry);
        self
    }

    /// Provider slot
    pub fn provider(&self) -> Option<&Arc<dyn Provider>> {
        self.provider.as_ref()
    }

    /// Property condition slot
    pub fn property_condition(&self) -> Option<&Arc<dyn Condition>> {
        self.property_condition.as_ref()
    }

    /// Configurers in insertion order
    pub fn type_map_configurers(&self) -> &[Box<dyn TypeMapConfigurer>] {
        &self.type_map_configurers
    }

    /// Converters in insertion order
    pub fn converters(&self) -> &[Arc<dyn Converter>] {
        &self.converters
    }

    /// Modules in insertion order
    pub fn modules(&self) -> &[Box<dyn Module>] {
        &self.modules
    }

    /// Attached instance registry
    pub fn instance_registry(&self) -> Option<&InstanceRegistry> {
        self.instance_registry.as_ref()
    }
}

impl fmt::Debug for Extensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let configurers: Vec<_> = self.type_map_configurers.iter().map(|c| c.name()).collect();
        let converters: Vec<_> = self.converters.iter().map(|c| c.name()).collect();
        let modules: Vec<_> = self.modules.iter().map(|m| m.name()).collect();
        f.debug_struct("Extensions")
            .field("provider", &self.provider.as_ref().map(|p| p.name()))
            .field(
                "property_condition",
                &self.property_condition.as_ref().map(|c| c.name()),
            )
            .field("type_map_configurers", &configurers)
            .field("converters", &converters)
            .field("modules", &modules)
            .field("instance_registry", &self.instance_registry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configurer::PairConfigurer;
    use mapwright_core::{FnConverter, PropertyContext, ProvisionRequest, TypePair};
    use serde_json::Value;

    #[test]
    fn test_empty_by_default() {
        let extensions = Extensions::new();
        assert!(extensions.provider().is_none());
        assert!(extensions.property_condition().is_none());
        assert!(extensions.type_map_configurers().is_empty());
        assert!(extensions.converters().is_empty());
        assert!(extensions.modules().is_empty());
        assert!(extensions.instance_registry().is_none());
    }

    #[test]
    fn test_builders_keep_insertion_order() {
        let pair = TypePair::new("A", "B");
        let extensions = Extensions::new()
            .with_provider(|_: &ProvisionRequest<'_>| None::<Value>)
            .with_property_condition(|_: &PropertyContext<'_>| true)
            .with_type_map_configurer(PairConfigurer::new(pair.clone(), |_| {}))
            .with_converter(FnConverter::new("first", pair.clone(), |c| Ok(c.source.clone())))
            .with_converter(FnConverter::new("second", pair, |c| Ok(c.source.clone())));

        assert!(extensions.provider().is_some());
        assert!(extensions.property_condition().is_some());
        assert_eq!(extensions.type_map_configurers().len(), 1);
        let names: Vec<_> = extensions.converters().iter().map(|c| c.name()).collect();
        assert_eq!(names, ["first", "second"]);

        let debug = format!("{extensions:?}");
        assert!(debug.contains("first"));
    }
}
