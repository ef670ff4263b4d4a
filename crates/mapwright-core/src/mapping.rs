//! JSON mapping interpreter
//!
//! Maps JSON objects between type pairs using an engine's settings, type maps
//! and extension points.

use serde_json::{Map, Value};

use crate::engine::{Engine, Settings};
use crate::error::{Error, Result};
use crate::spi::{ConversionContext, PropertyContext, ProvisionRequest};
use crate::type_map::{TypeMap, TypePair};

/// Map `source` through `pair`.
pub(crate) fn map_value(engine: &Engine, source: &Value, pair: &TypePair) -> Result<Value> {
    let settings = engine.settings();

    if let Some(converter) = settings.converters().iter().find(|c| c.supports(pair)) {
        tracing::trace!(pair = %pair, converter = converter.name(), "Converting");
        return converter.convert(&ConversionContext { pair, source });
    }

    let obj = source
        .as_object()
        .ok_or_else(|| Error::mapping(pair, "source is not a JSON object"))?;

    let request = ProvisionRequest {
        requested: &pair.destination,
        source,
    };
    let mut output = match settings.provider().and_then(|p| p.provide(&request)) {
        Some(Value::Object(instance)) => instance,
        Some(_) => {
            return Err(Error::mapping(
                pair,
                "provider returned an instance that is not a JSON object",
            ));
        }
        None => Map::new(),
    };
    let template: Vec<String> = output.keys().cloned().collect();

    let type_map = engine.get_type_map(pair);
    if let Some(type_map) = type_map {
        apply_explicit(engine, type_map, obj, &mut output)?;
    }

    if settings.is_implicit_mapping_enabled() {
        let handled = |destination: &str| {
            type_map.is_some_and(|t| t.is_mapped(destination) || t.is_skipped(destination))
        };

        if template.is_empty() {
            for (key, value) in obj {
                let destination = implicit_name(settings, key);
                if !handled(&destination) {
                    write(
                        settings,
                        pair,
                        &mut output,
                        key,
                        &destination,
                        value.clone(),
                    );
                }
            }
        } else {
            for destination in &template {
                if handled(destination) {
                    continue;
                }
                if let Some((key, value)) = find_source(settings, pair, obj, destination)? {
                    write(settings, pair, &mut output, key, destination, value.clone());
                }
            }
        }
    }

    Ok(Value::Object(output))
}

fn apply_explicit(
    engine: &Engine,
    type_map: &TypeMap,
    obj: &Map<String, Value>,
    output: &mut Map<String, Value>,
) -> Result<()> {
    let pair = type_map.pair();
    for mapping in type_map.mappings() {
        if type_map.is_skipped(&mapping.destination) {
            continue;
        }
        let mut value = lookup(obj, &mapping.source)
            .cloned()
            .unwrap_or(Value::Null);
        if let Some(nested) = &mapping.pair
            && !value.is_null()
        {
            value = map_value(engine, &value, nested)?;
        }
        write(
            engine.settings(),
            pair,
            output,
            &mapping.source,
            &mapping.destination,
            value,
        );
    }
    Ok(())
}

/// Resolve a dotted path like `customer.address.city`.
fn lookup<'a>(obj: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let first = obj.get(parts.next()?)?;
    parts.try_fold(first, |current, part| current.get(part))
}

fn write(
    settings: &Settings,
    pair: &TypePair,
    output: &mut Map<String, Value>,
    source_property: &str,
    destination: &str,
    value: Value,
) {
    if value.is_null() && settings.is_skip_null_enabled() {
        return;
    }
    if let Some(condition) = settings.property_condition() {
        let context = PropertyContext {
            pair,
            source_property,
            destination_property: destination,
            value: &value,
        };
        if !condition.applies(&context) {
            tracing::trace!(pair = %pair, destination, "Property condition rejected write");
            return;
        }
    }
    output.insert(destination.to_string(), value);
}

fn transformed_source_name(settings: &Settings, key: &str) -> String {
    if settings.source_naming_convention().applies(key) {
        settings.source_name_transformer().transform(key)
    } else {
        key.to_string()
    }
}

fn source_tokens(settings: &Settings, key: &str) -> Vec<String> {
    settings
        .source_name_tokenizer()
        .tokenize(&transformed_source_name(settings, key))
}

/// Destination key for a source key when no destination template exists.
fn implicit_name(settings: &Settings, key: &str) -> String {
    let name = transformed_source_name(settings, key);
    let source = settings.source_name_tokenizer();
    let destination = settings.destination_name_tokenizer();
    if source == destination {
        name
    } else {
        destination.join(&source.tokenize(&name))
    }
}

fn find_source<'a>(
    settings: &Settings,
    pair: &TypePair,
    obj: &'a Map<String, Value>,
    destination: &str,
) -> Result<Option<(&'a str, &'a Value)>> {
    if let Some((key, value)) = obj.iter().find(|(key, _)| key.as_str() == destination) {
        return Ok(Some((key.as_str(), value)));
    }

    let destination_tokens = settings.destination_name_tokenizer().tokenize(destination);
    let candidates: Vec<(&'a str, &'a Value)> = obj
        .iter()
        .filter(|(key, _)| {
            settings
                .matching_strategy()
                .matches(&source_tokens(settings, key), &destination_tokens)
        })
        .map(|(key, value)| (key.as_str(), value))
        .collect();

    match candidates.as_slice() {
        [] => Ok(None),
        [single] => Ok(Some(*single)),
        _ if settings.is_ambiguity_ignored() => {
            tracing::debug!(pair = %pair, destination, "Skipping ambiguous destination");
            Ok(None)
        }
        many => Err(Error::mapping(
            pair,
            format!(
                "destination '{}' matches multiple source properties: {}",
                destination,
                many.iter()
                    .map(|(key, _)| *key)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        )),
    }
}
