//! Mapwright Core Library
//!
//! This crate provides the object-mapping engine that Mapwright configures:
//! - Engine settings and the strategy values they hold
//! - Type maps with explicit per-property rules
//! - Extension-point traits (providers, conditions, converters, modules)
//! - A JSON mapping interpreter driven by the settings above
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Settings   │────▶│   Engine    │────▶│   Mapped    │
//! │ + TypeMaps  │     │  (map/val.) │     │   Values    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use mapwright_core::{Engine, MatchingStrategy, TypePair};
//! use serde_json::json;
//!
//! let mut engine = Engine::new();
//! engine.settings_mut().set_matching_strategy(MatchingStrategy::Loose);
//! engine
//!     .type_map(TypePair::new("User", "UserDto"))
//!     .add_mapping("name", "username");
//!
//! let dto = engine.map(&json!({"name": "alice"}), &TypePair::new("User", "UserDto"))?;
//! assert_eq!(dto["username"], "alice");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod conventions;
pub mod engine;
pub mod error;
pub mod mapping;
pub mod spi;
pub mod type_map;

pub use conventions::{
    AccessLevel, Convention, MatchingStrategy, NameTokenizer, NameTransformer, NamingConvention,
};
pub use engine::{Engine, Settings};
pub use error::{Error, Result};
pub use spi::{
    Condition, ConversionContext, Converter, FnConverter, Module, PropertyContext,
    ProvisionRequest, Provider,
};
pub use type_map::{PropertyMapping, TypeMap, TypeName, TypePair};
