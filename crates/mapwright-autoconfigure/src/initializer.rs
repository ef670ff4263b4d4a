//! Engine initialization
//!
//! [`initialize`] builds an [`Engine`] in four phases:
//!
//! 1. Apply each configured option through its setter; unset options keep
//!    the engine default.
//! 2. Wire extension points: provider, property condition, type-map
//!    configurers, converters and modules.
//! 3. Validate, when `validate-enabled` is set.
//! 4. Dump the resulting configuration at TRACE.
//!
//! Any failure in phases 1 to 3 aborts initialization.

use std::sync::Arc;

use mapwright_core::{Engine, Settings};

use crate::diagnostics;
use crate::error::Result;
use crate::extensions::Extensions;
use crate::properties::{EngineProperties, MapperProperties};

/// Trace message emitted after successful validation
pub const VALIDATION_SUCCEEDED: &str = "Validate mapping engine configuration succeed.";

/// Build an engine from bound properties and collaborator extensions.
pub fn initialize(properties: &MapperProperties, extensions: &Extensions) -> Result<Engine> {
    tracing::trace!("Initializing mapping engine");
    let mut engine = Engine::new();

    apply_configuration(engine.settings_mut(), &properties.configuration);
    apply_extensions(&mut engine, properties, extensions)?;

    if properties.validate_enabled {
        engine.validate()?;
        tracing::trace!("{}", VALIDATION_SUCCEEDED);
    }

    diagnostics::log_configuration(&engine);
    Ok(engine)
}

fn apply_configuration(settings: &mut Settings, c: &EngineProperties) {
    if let Some(v) = c.source_name_tokenizer {
        settings.set_source_name_tokenizer(v);
    }
    if let Some(v) = c.source_name_transformer {
        settings.set_source_name_transformer(v);
    }
    if let Some(v) = c.source_naming_convention {
        settings.set_source_naming_convention(v);
    }
    if let Some(v) = c.destination_name_tokenizer {
        settings.set_destination_name_tokenizer(v);
    }
    if let Some(v) = c.destination_name_transformer {
        settings.set_destination_name_transformer(v);
    }
    if let Some(v) = c.destination_naming_convention {
        settings.set_destination_naming_convention(v);
    }
    if let Some(v) = c.matching_strategy {
        settings.set_matching_strategy(v);
    }
    if let Some(v) = c.field_access_level {
        settings.set_field_access_level(v);
    }
    if let Some(v) = c.method_access_level {
        settings.set_method_access_level(v);
    }
    if let Some(v) = c.field_matching_enabled {
        settings.set_field_matching_enabled(v);
    }
    if let Some(v) = c.ambiguity_ignored {
        settings.set_ambiguity_ignored(v);
    }
    if let Some(v) = c.full_type_matching_required {
        settings.set_full_type_matching_required(v);
    }
    if let Some(v) = c.implicit_mapping_enabled {
        settings.set_implicit_mapping_enabled(v);
    }
    if let Some(v) = c.skip_null_enabled {
        settings.set_skip_null_enabled(v);
    }
    if let Some(v) = c.collections_merge_enabled {
        settings.set_collections_merge_enabled(v);
    }
    if let Some(v) = c.use_osgi_class_loader_bridging {
        settings.set_use_osgi_class_loader_bridging(v);
    }
    if let Some(v) = c.deep_copy_enabled {
        settings.set_deep_copy_enabled(v);
    }
}

fn apply_extensions(
    engine: &mut Engine,
    properties: &MapperProperties,
    extensions: &Extensions,
) -> Result<()> {
    if properties.provider_integration_enabled {
        let registry = extensions.instance_registry().cloned().unwrap_or_default();
        tracing::debug!(
            instances = registry.len(),
            "Installing instance registry provider"
        );
        engine.settings_mut().set_provider(Arc::new(registry));
    }
    if let Some(provider) = extensions.provider() {
        engine.settings_mut().set_provider(Arc::clone(provider));
    }
    if let Some(condition) = extensions.property_condition() {
        engine
            .settings_mut()
            .set_property_condition(Arc::clone(condition));
    }
    for configurer in extensions.type_map_configurers() {
        configurer.apply(engine)?;
    }
    for converter in extensions.converters() {
        engine.add_converter(Arc::clone(converter));
    }
    for module in extensions.modules() {
        engine.register_module(module.as_ref())?;
    }
    Ok(())
}
