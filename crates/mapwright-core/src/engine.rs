//! The mapping engine and its settings
//!
//! [`Settings`] is the mutable configuration surface: seventeen scalar options,
//! the provider and property-condition slots, and the ordered converter list.
//! [`Engine`] owns the settings together with one [`TypeMap`] per pair.
//!
//! The access levels and the field-matching, full-type-matching,
//! collections-merge, class-loader-bridging and deep-copy flags are carried
//! for callers and diagnostics only. Neither [`Engine::map`] nor
//! [`Engine::validate`] reads them.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::conventions::{
    AccessLevel, MatchingStrategy, NameTokenizer, NameTransformer, NamingConvention,
};
use crate::error::{Error, Result};
use crate::mapping;
use crate::spi::{Condition, Converter, Module, Provider};
use crate::type_map::{TypeMap, TypePair};

/// Mutable engine configuration.
#[derive(Clone)]
pub struct Settings {
    source_name_tokenizer: NameTokenizer,
    source_name_transformer: NameTransformer,
    source_naming_convention: NamingConvention,
    destination_name_tokenizer: NameTokenizer,
    destination_name_transformer: NameTransformer,
    destination_naming_convention: NamingConvention,
    matching_strategy: MatchingStrategy,
    field_access_level: AccessLevel,
    method_access_level: AccessLevel,
    field_matching_enabled: bool,
    ambiguity_ignored: bool,
    full_type_matching_required: bool,
    implicit_mapping_enabled: bool,
    skip_null_enabled: bool,
    collections_merge_enabled: bool,
    use_osgi_class_loader_bridging: bool,
    deep_copy_enabled: bool,
    provider: Option<Arc<dyn Provider>>,
    property_condition: Option<Arc<dyn Condition>>,
    converters: Vec<Arc<dyn Converter>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_name_tokenizer: NameTokenizer::CamelCase,
            source_name_transformer: NameTransformer::JavaBeansAccessor,
            source_naming_convention: NamingConvention::JavaBeansAccessor,
            destination_name_tokenizer: NameTokenizer::CamelCase,
            destination_name_transformer: NameTransformer::JavaBeansMutator,
            destination_naming_convention: NamingConvention::JavaBeansMutator,
            matching_strategy: MatchingStrategy::Standard,
            field_access_level: AccessLevel::Public,
            method_access_level: AccessLevel::Public,
            field_matching_enabled: false,
            ambiguity_ignored: false,
            full_type_matching_required: false,
            implicit_mapping_enabled: true,
            skip_null_enabled: false,
            collections_merge_enabled: true,
            use_osgi_class_loader_bridging: false,
            deep_copy_enabled: false,
            provider: None,
            property_condition: None,
            converters: Vec::new(),
        }
    }
}

impl Settings {
    /// Tokenizer for source property names
    pub fn source_name_tokenizer(&self) -> NameTokenizer {
        self.source_name_tokenizer
    }

    /// Set the tokenizer for source property names
    pub fn set_source_name_tokenizer(&mut self, value: NameTokenizer) -> &mut Self {
        self.source_name_tokenizer = value;
        self
    }

    /// Transformer for source property names
    pub fn source_name_transformer(&self) -> NameTransformer {
        self.source_name_transformer
    }

    /// Set the transformer for source property names
    pub fn set_source_name_transformer(&mut self, value: NameTransformer) -> &mut Self {
        self.source_name_transformer = value;
        self
    }

    /// Naming convention for source property names
    pub fn source_naming_convention(&self) -> NamingConvention {
        self.source_naming_convention
    }

    /// Set the naming convention for source property names
    pub fn set_source_naming_convention(&mut self, value: NamingConvention) -> &mut Self {
        self.source_naming_convention = value;
        self
    }

    /// Tokenizer for destination property names
    pub fn destination_name_tokenizer(&self) -> NameTokenizer {
        self.destination_name_tokenizer
    }

    /// Set the tokenizer for destination property names
    pub fn set_destination_name_tokenizer(&mut self, value: NameTokenizer) -> &mut Self {
        self.destination_name_tokenizer = value;
        self
    }

    /// Transformer for destination property names
    pub fn destination_name_transformer(&self) -> NameTransformer {
        self.destination_name_transformer
    }

    /// Set the transformer for destination property names
    pub fn set_destination_name_transformer(&mut self, value: NameTransformer) -> &mut Self {
        self.destination_name_transformer = value;
        self
    }

    /// Naming convention for destination property names
    pub fn destination_naming_convention(&self) -> NamingConvention {
        self.destination_naming_convention
    }

    /// Set the naming convention for destination property names
    pub fn set_destination_naming_convention(&mut self, value: NamingConvention) -> &mut Self {
        self.destination_naming_convention = value;
        self
    }

    /// Token matching strategy
    pub fn matching_strategy(&self) -> MatchingStrategy {
        self.matching_strategy
    }

    /// Set the token matching strategy
    pub fn set_matching_strategy(&mut self, value: MatchingStrategy) -> &mut Self {
        self.matching_strategy = value;
        self
    }

    /// Field access level
    pub fn field_access_level(&self) -> AccessLevel {
        self.field_access_level
    }

    /// Set the field access level
    pub fn set_field_access_level(&mut self, value: AccessLevel) -> &mut Self {
        self.field_access_level = value;
        self
    }

    /// Method access level
    pub fn method_access_level(&self) -> AccessLevel {
        self.method_access_level
    }

    /// Set the method access level
    pub fn set_method_access_level(&mut self, value: AccessLevel) -> &mut Self {
        self.method_access_level = value;
        self
    }

    /// Whether fields take part in matching
    pub fn is_field_matching_enabled(&self) -> bool {
        self.field_matching_enabled
    }

    /// Enable or disable field matching
    pub fn set_field_matching_enabled(&mut self, value: bool) -> &mut Self {
        self.field_matching_enabled = value;
        self
    }

    /// Whether ambiguous matches are skipped instead of reported
    pub fn is_ambiguity_ignored(&self) -> bool {
        self.ambiguity_ignored
    }

    /// Skip ambiguous matches instead of reporting them
    pub fn set_ambiguity_ignored(&mut self, value: bool) -> &mut Self {
        self.ambiguity_ignored = value;
        self
    }

    /// Whether full type matching is required
    pub fn is_full_type_matching_required(&self) -> bool {
        self.full_type_matching_required
    }

    /// Require full type matching
    pub fn set_full_type_matching_required(&mut self, value: bool) -> &mut Self {
        self.full_type_matching_required = value;
        self
    }

    /// Whether unmapped properties are matched implicitly
    pub fn is_implicit_mapping_enabled(&self) -> bool {
        self.implicit_mapping_enabled
    }

    /// Enable or disable implicit matching
    pub fn set_implicit_mapping_enabled(&mut self, value: bool) -> &mut Self {
        self.implicit_mapping_enabled = value;
        self
    }

    /// Whether null source values are skipped
    pub fn is_skip_null_enabled(&self) -> bool {
        self.skip_null_enabled
    }

    /// Skip null source values
    pub fn set_skip_null_enabled(&mut self, value: bool) -> &mut Self {
        self.skip_null_enabled = value;
        self
    }

    /// Whether collections are merged into existing destinations
    pub fn is_collections_merge_enabled(&self) -> bool {
        self.collections_merge_enabled
    }

    /// Merge collections into existing destinations
    pub fn set_collections_merge_enabled(&mut self, value: bool) -> &mut Self {
        self.collections_merge_enabled = value;
        self
    }

    /// Whether class-loader bridging is used
    pub fn is_use_osgi_class_loader_bridging(&self) -> bool {
        self.use_osgi_class_loader_bridging
    }

    /// Use class-loader bridging
    pub fn set_use_osgi_class_loader_bridging(&mut self, value: bool) -> &mut Self {
        self.use_osgi_class_loader_bridging = value;
        self
    }

    /// Whether values are deep-copied
    pub fn is_deep_copy_enabled(&self) -> bool {
        self.deep_copy_enabled
    }

    /// Deep-copy values
    pub fn set_deep_copy_enabled(&mut self, value: bool) -> &mut Self {
        self.deep_copy_enabled = value;
        self
    }

    /// Installed destination provider
    pub fn provider(&self) -> Option<&Arc<dyn Provider>> {
        self.provider.as_ref()
    }

    /// Install the destination provider, replacing any previous one
    pub fn set_provider(&mut self, provider: Arc<dyn Provider>) -> &mut Self {
        self.provider = Some(provider);
        self
    }

    /// Installed global property condition
    pub fn property_condition(&self) -> Option<&Arc<dyn Condition>> {
        self.property_condition.as_ref()
    }

    /// Install the global property condition, replacing any previous one
    pub fn set_property_condition(&mut self, condition: Arc<dyn Condition>) -> &mut Self {
        self.property_condition = Some(condition);
        self
    }

    /// Registered converters in registration order
    pub fn converters(&self) -> &[Arc<dyn Converter>] {
        &self.converters
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("source_name_tokenizer", &self.source_name_tokenizer)
            .field("source_name_transformer", &self.source_name_transformer)
            .field("source_naming_convention", &self.source_naming_convention)
            .field(
                "destination_name_tokenizer",
                &self.destination_name_tokenizer,
            )
            .field(
                "destination_name_transformer",
                &self.destination_name_transformer,
            )
            .field(
                "destination_naming_convention",
                &self.destination_naming_convention,
            )
            .field("matching_strategy", &self.matching_strategy)
            .field("field_access_level", &self.field_access_level)
            .field("method_access_level", &self.method_access_level)
            .field("field_matching_enabled", &self.field_matching_enabled)
            .field("ambiguity_ignored", &self.ambiguity_ignored)
            .field(
                "full_type_matching_required",
                &self.full_type_matching_required,
            )
            .field("implicit_mapping_enabled", &self.implicit_mapping_enabled)
            .field("skip_null_enabled", &self.skip_null_enabled)
            .field("collections_merge_enabled", &self.collections_merge_enabled)
            .field(
                "use_osgi_class_loader_bridging",
                &self.use_osgi_class_loader_bridging,
            )
            .field("deep_copy_enabled", &self.deep_copy_enabled)
            .field("provider", &self.provider.as_ref().map(|p| p.name()))
            .field(
                "property_condition",
                &self.property_condition.as_ref().map(|c| c.name()),
            )
            .field(
                "converters",
                &self.converters.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Object-to-object mapping engine.
#[derive(Default)]
pub struct Engine {
    settings: Settings,
    type_maps: Vec<TypeMap>,
}

impl Engine {
    /// Create an engine with default settings and no type maps
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Mutable engine settings
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Get the type map for `pair`, creating an empty one if none exists
    pub fn type_map(&mut self, pair: TypePair) -> &mut TypeMap {
        let index = match self.type_maps.iter().position(|t| t.pair() == &pair) {
            Some(index) => index,
            None => {
                tracing::debug!(pair = %pair, "Creating type map");
                self.type_maps.push(TypeMap::new(pair));
                self.type_maps.len() - 1
            }
        };
        &mut self.type_maps[index]
    }

    /// The type map for `pair`, if one exists
    pub fn get_type_map(&self, pair: &TypePair) -> Option<&TypeMap> {
        self.type_maps.iter().find(|t| t.pair() == pair)
    }

    /// All type maps in creation order
    pub fn type_maps(&self) -> &[TypeMap] {
        &self.type_maps
    }

    /// Register a converter after those already registered
    pub fn add_converter(&mut self, converter: Arc<dyn Converter>) -> &mut Self {
        tracing::debug!(converter = converter.name(), "Registering converter");
        self.settings.converters.push(converter);
        self
    }

    /// Run `module` against this engine
    pub fn register_module(&mut self, module: &dyn Module) -> Result<()> {
        tracing::debug!(module = module.name(), "Registering module");
        module.setup(self)
    }

    /// Whether some converter supports `pair`
    pub fn has_converter_for(&self, pair: &TypePair) -> bool {
        self.settings.converters.iter().any(|c| c.supports(pair))
    }

    /// Check that every type map is consistent with the current settings.
    ///
    /// All problems are collected and reported together.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        for type_map in &self.type_maps {
            let pair = type_map.pair();
            let mut seen: Vec<&str> = Vec::new();

            for mapping in type_map.mappings() {
                let destination = mapping.destination.as_str();
                if type_map.is_skipped(destination) {
                    errors.push(format!(
                        "{pair}: destination '{destination}' is both mapped and skipped"
                    ));
                }
                if seen.contains(&destination) && !self.settings.ambiguity_ignored {
                    errors.push(format!(
                        "{pair}: destination '{destination}' is mapped more than once"
                    ));
                }
                seen.push(destination);

                if let Some(nested) = &mapping.pair
                    && self.get_type_map(nested).is_none()
                    && !self.has_converter_for(nested)
                {
                    errors.push(format!(
                        "{pair}: no type map or converter for nested pair {nested}"
                    ));
                }
            }

            if type_map.mappings().is_empty() && !self.settings.implicit_mapping_enabled {
                errors.push(format!(
                    "{pair}: no explicit mappings while implicit mapping is disabled"
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation { errors })
        }
    }

    /// Map `source` from `pair.source` to `pair.destination`
    pub fn map(&self, source: &Value, pair: &TypePair) -> Result<Value> {
        mapping::map_value(self, source, pair)
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("settings", &self.settings)
            .field(
                "type_maps",
                &self
                    .type_maps
                    .iter()
                    .map(|t| t.pair().to_string())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
