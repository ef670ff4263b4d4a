//! Extension-point traits
//!
//! These are the hooks an engine consults while mapping:
//!
//! - [`Provider`] - supplies the initial destination instance
//! - [`Condition`] - gates every property write
//! - [`Converter`] - replaces mapping for the pairs it supports
//! - [`Module`] - configures an engine in one step
//!
//! Closures with the matching signature implement [`Provider`], [`Condition`]
//! and [`Module`] directly. [`FnConverter`] adapts a closure into a converter
//! for a single pair.

use serde_json::Value;

use crate::engine::Engine;
use crate::error::Result;
use crate::type_map::{TypeName, TypePair};

/// Request for a destination instance
#[derive(Debug, Clone, Copy)]
pub struct ProvisionRequest<'a> {
    /// Destination type being created
    pub requested: &'a TypeName,
    /// Source value being mapped
    pub source: &'a Value,
}

/// Supplies destination instances.
pub trait Provider: Send + Sync {
    /// Return an instance of the requested type, or `None` to let the engine
    /// start from an empty object
    fn provide(&self, request: &ProvisionRequest<'_>) -> Option<Value>;

    /// Name shown in diagnostics
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F> Provider for F
where
    F: Fn(&ProvisionRequest<'_>) -> Option<Value> + Send + Sync,
{
    fn provide(&self, request: &ProvisionRequest<'_>) -> Option<Value> {
        self(request)
    }
}

/// A single property write the engine is about to perform
#[derive(Debug, Clone, Copy)]
pub struct PropertyContext<'a> {
    /// Pair being mapped
    pub pair: &'a TypePair,
    /// Source property path
    pub source_property: &'a str,
    /// Destination key
    pub destination_property: &'a str,
    /// Value about to be written
    pub value: &'a Value,
}

/// Gates property writes.
pub trait Condition: Send + Sync {
    /// Whether the property should be written
    fn applies(&self, context: &PropertyContext<'_>) -> bool;

    /// Name shown in diagnostics
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F> Condition for F
where
    F: Fn(&PropertyContext<'_>) -> bool + Send + Sync,
{
    fn applies(&self, context: &PropertyContext<'_>) -> bool {
        self(context)
    }
}

/// Input handed to a converter
#[derive(Debug, Clone, Copy)]
pub struct ConversionContext<'a> {
    /// Pair being converted
    pub pair: &'a TypePair,
    /// Source value
    pub source: &'a Value,
}

/// Converts whole values for the pairs it supports.
///
/// The engine consults converters in registration order and uses the first
/// one that supports the pair.
pub trait Converter: Send + Sync {
    /// Whether this converter handles `pair`
    fn supports(&self, pair: &TypePair) -> bool;

    /// Convert the source value
    fn convert(&self, context: &ConversionContext<'_>) -> Result<Value>;

    /// Name shown in diagnostics
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// A converter for exactly one pair, backed by a closure.
pub struct FnConverter<F> {
    name: String,
    pair: TypePair,
    convert: F,
}

impl<F> FnConverter<F>
where
    F: Fn(&ConversionContext<'_>) -> Result<Value> + Send + Sync,
{
    /// Create a named converter for `pair`
    pub fn new(name: impl Into<String>, pair: TypePair, convert: F) -> Self {
        Self {
            name: name.into(),
            pair,
            convert,
        }
    }
}

impl<F> Converter for FnConverter<F>
where
    F: Fn(&ConversionContext<'_>) -> Result<Value> + Send + Sync,
{
    fn supports(&self, pair: &TypePair) -> bool {
        &self.pair == pair
    }

    fn convert(&self, context: &ConversionContext<'_>) -> Result<Value> {
        (self.convert)(context)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Configures an engine in one step.
pub trait Module: Send + Sync {
    /// Apply this module to `engine`
    fn setup(&self, engine: &mut Engine) -> Result<()>;

    /// Name shown in diagnostics and errors
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F> Module for F
where
    F: Fn(&mut Engine) -> Result<()> + Send + Sync,
{
    fn setup(&self, engine: &mut Engine) -> Result<()> {
        self(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fn_converter_supports_only_its_pair() {
        let converter = FnConverter::new(
            "upper",
            TypePair::new("String", "Upper"),
            |ctx: &ConversionContext<'_>| {
                Ok(json!(ctx.source.as_str().unwrap_or_default().to_uppercase()))
            },
        );

        assert!(converter.supports(&TypePair::new("String", "Upper")));
        assert!(!converter.supports(&TypePair::new("String", "Lower")));
        assert_eq!(converter.name(), "upper");

        let pair = TypePair::new("String", "Upper");
        let source = json!("abc");
        let out = converter
            .convert(&ConversionContext {
                pair: &pair,
                source: &source,
            })
            .unwrap();
        assert_eq!(out, json!("ABC"));
    }

    #[test]
    fn test_closure_condition() {
        let not_empty = |ctx: &PropertyContext<'_>| ctx.value.as_str() != Some("");
        let pair = TypePair::new("A", "B");
        let value = json!("");
        let ctx = PropertyContext {
            pair: &pair,
            source_property: "id",
            destination_property: "id",
            value: &value,
        };
        assert!(!Condition::applies(&not_empty, &ctx));
    }
}
