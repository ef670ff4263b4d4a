//! Type-map configurers
//!
//! A configurer customizes the engine's type map for one declared
//! source/destination pair. The pair is resolved when the configurer is
//! applied; a configurer without a concrete pair fails initialization.

use std::fmt;
use std::marker::PhantomData;

use mapwright_core::{Engine, TypeMap, TypePair};

use crate::error::{Error, Result};

/// Customizes the type map of one source/destination pair.
pub trait TypeMapConfigurer: Send + Sync {
    /// The declared pair, or `None` if the configurer cannot name one
    fn type_pair(&self) -> Option<TypePair>;

    /// Customize the type map for [`type_pair`](Self::type_pair)
    fn configure(&self, type_map: &mut TypeMap);

    /// Name shown in diagnostics and errors
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Resolve the pair, get or create its type map and run [`configure`](Self::configure) once.
    fn apply(&self, engine: &mut Engine) -> Result<()> {
        let pair = self
            .type_pair()
            .filter(TypePair::is_concrete)
            .ok_or_else(|| Error::UnresolvedTypePair {
                configurer: self.name().to_string(),
            })?;
        tracing::debug!(configurer = self.name(), pair = %pair, "Applying type map configurer");
        self.configure(engine.type_map(pair));
        Ok(())
    }
}

/// Configurer whose pair comes from Rust types `S` and `D`.
pub struct TypedConfigurer<S, D, F> {
    configure: F,
    types: PhantomData<fn() -> (S, D)>,
}

impl<S, D, F> TypedConfigurer<S, D, F>
where
    F: Fn(&mut TypeMap) + Send + Sync,
{
    /// Wrap `configure` for the pair `S -> D`
    pub fn new(configure: F) -> Self {
        Self {
            configure,
            types: PhantomData,
        }
    }
}

impl<S, D, F> TypeMapConfigurer for TypedConfigurer<S, D, F>
where
    S: 'static,
    D: 'static,
    F: Fn(&mut TypeMap) + Send + Sync,
{
    fn type_pair(&self) -> Option<TypePair> {
        Some(TypePair::of::<S, D>())
    }

    fn configure(&self, type_map: &mut TypeMap) {
        (self.configure)(type_map)
    }
}

impl<S, D, F> fmt::Debug for TypedConfigurer<S, D, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedConfigurer")
            .field("source", &std::any::type_name::<S>())
            .field("destination", &std::any::type_name::<D>())
            .finish()
    }
}

/// Configurer with an explicitly named pair.
pub struct PairConfigurer<F> {
    name: String,
    pair: Option<TypePair>,
    configure: F,
}

impl<F> PairConfigurer<F>
where
    F: Fn(&mut TypeMap) + Send + Sync,
{
    /// Configurer for `pair`
    pub fn new(pair: TypePair, configure: F) -> Self {
        Self {
            name: format!("PairConfigurer[{pair}]"),
            pair: Some(pair),
            configure,
        }
    }

    /// Configurer that declares no pair; applying it always fails
    pub fn unresolved(name: impl Into<String>, configure: F) -> Self {
        Self {
            name: name.into(),
            pair: None,
            configure,
        }
    }
}

impl<F> TypeMapConfigurer for PairConfigurer<F>
where
    F: Fn(&mut TypeMap) + Send + Sync,
{
    fn type_pair(&self) -> Option<TypePair> {
        self.pair.clone()
    }

    fn configure(&self, type_map: &mut TypeMap) {
        (self.configure)(type_map)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<F> fmt::Debug for PairConfigurer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PairConfigurer")
            .field("name", &self.name)
            .field("pair", &self.pair)
            .finish()
    }
}
