//! Mapwright Auto-Configuration
//!
//! This crate turns externalized key/value configuration into a ready-to-use
//! [`mapwright_core::Engine`]:
//! - Binding `mapwright.*` keys into [`MapperProperties`]
//! - Converting strategy names leniently (unknown text falls back to the
//!   engine default with a warning)
//! - Wiring providers, conditions, type-map configurers, converters and
//!   modules into the engine
//! - Optional validation and a trace-level configuration dump
//!
//! # Example
//!
//! ```rust,ignore
//! use mapwright_autoconfigure::{Extensions, MapperProperties, TypedConfigurer, initialize};
//!
//! let properties = MapperProperties::bind([
//!     ("mapwright.configuration.matching-strategy", "loose"),
//!     ("mapwright.validate-enabled", "true"),
//! ])?;
//!
//! let extensions = Extensions::new().with_type_map_configurer(
//!     TypedConfigurer::<User, UserDto, _>::new(|type_map| {
//!         type_map.add_mapping("name", "username");
//!     }),
//! );
//!
//! let engine = initialize(&properties, &extensions)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod binding;
pub mod configurer;
pub mod diagnostics;
pub mod error;
pub mod extensions;
pub mod initializer;
pub mod integration;
pub mod properties;

#[cfg(test)]
pub(crate) mod test_support;

pub use configurer::{PairConfigurer, TypeMapConfigurer, TypedConfigurer};
pub use error::{Error, Result};
pub use extensions::Extensions;
pub use initializer::{VALIDATION_SUCCEEDED, initialize};
pub use integration::InstanceRegistry;
pub use properties::{EngineProperties, MapperProperties, PROPERTIES_PREFIX};
