//! Type pairs and per-pair mapping rules
//!
//! A [`TypeMap`] holds the explicit rules for mapping one source type to one
//! destination type. The engine keeps at most one type map per [`TypePair`].

use std::fmt;

/// Name of a mapped type.
///
/// Names are opaque strings. [`TypeName::of`] derives one from a Rust type,
/// and the wildcard `?` marks a type that was never declared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName(String);

impl TypeName {
    const WILDCARD: &'static str = "?";

    /// Create a type name from any string
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Type name of a Rust type
    pub fn of<T: ?Sized>() -> Self {
        Self(std::any::type_name::<T>().to_string())
    }

    /// The undeclared wildcard type
    pub fn wildcard() -> Self {
        Self(Self::WILDCARD.to_string())
    }

    /// The name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this names an actual type rather than a blank or wildcard
    pub fn is_concrete(&self) -> bool {
        let name = self.0.trim();
        !name.is_empty() && name != Self::WILDCARD
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A (source, destination) type pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypePair {
    /// Source type
    pub source: TypeName,
    /// Destination type
    pub destination: TypeName,
}

impl TypePair {
    /// Create a pair from two type names
    pub fn new(source: impl Into<TypeName>, destination: impl Into<TypeName>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// Pair of two Rust types
    pub fn of<S: ?Sized, D: ?Sized>() -> Self {
        Self {
            source: TypeName::of::<S>(),
            destination: TypeName::of::<D>(),
        }
    }

    /// Whether both sides name actual types
    pub fn is_concrete(&self) -> bool {
        self.source.is_concrete() && self.destination.is_concrete()
    }
}

impl fmt::Display for TypePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.destination)
    }
}

/// One explicit property rule: read `source` (a dotted path), write `destination`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMapping {
    /// Dotted path into the source object
    pub source: String,
    /// Destination key
    pub destination: String,
    /// Nested pair the value is mapped through, if any
    pub pair: Option<TypePair>,
}

/// Explicit mapping rules for one [`TypePair`].
#[derive(Debug, Clone)]
pub struct TypeMap {
    pair: TypePair,
    mappings: Vec<PropertyMapping>,
    skipped: Vec<String>,
}

impl TypeMap {
    /// Create an empty type map for `pair`
    pub fn new(pair: TypePair) -> Self {
        Self {
            pair,
            mappings: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// The pair this type map applies to
    pub fn pair(&self) -> &TypePair {
        &self.pair
    }

    /// Copy `source` into `destination` as-is
    pub fn add_mapping(
        &mut self,
        source: impl Into<String>,
        destination: impl Into<String>,
    ) -> &mut Self {
        self.mappings.push(PropertyMapping {
            source: source.into(),
            destination: destination.into(),
            pair: None,
        });
        self
    }

    /// Map `source` into `destination` through the nested `pair`
    pub fn add_nested_mapping(
        &mut self,
        source: impl Into<String>,
        destination: impl Into<String>,
        pair: TypePair,
    ) -> &mut Self {
        self.mappings.push(PropertyMapping {
            source: source.into(),
            destination: destination.into(),
            pair: Some(pair),
        });
        self
    }

    /// Never write `destination`
    pub fn skip(&mut self, destination: impl Into<String>) -> &mut Self {
        self.skipped.push(destination.into());
        self
    }

    /// Explicit mappings in insertion order
    pub fn mappings(&self) -> &[PropertyMapping] {
        &self.mappings
    }

    /// Skipped destination keys
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Whether `destination` is skipped
    pub fn is_skipped(&self, destination: &str) -> bool {
        self.skipped.iter().any(|s| s == destination)
    }

    /// Whether an explicit mapping writes `destination`
    pub fn is_mapped(&self, destination: &str) -> bool {
        self.mappings.iter().any(|m| m.destination == destination)
    }
}

impl fmt::Display for TypeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TypeMap[{}] mappings={} skipped={}",
            self.pair,
            self.mappings.len(),
            self.skipped.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Order;

    #[test]
    fn test_type_name_of_rust_type() {
        let name = TypeName::of::<Order>();
        assert!(name.as_str().ends_with("Order"));
        assert!(name.is_concrete());
    }

    #[test]
    fn test_wildcard_and_blank_names_are_not_concrete() {
        assert!(!TypeName::wildcard().is_concrete());
        assert!(!TypeName::new("  ").is_concrete());
        assert!(!TypePair::new("Order", TypeName::wildcard()).is_concrete());
        assert!(TypePair::new("Order", "OrderDto").is_concrete());
    }

    #[test]
    fn test_type_map_rules() {
        let mut type_map = TypeMap::new(TypePair::new("Order", "OrderDto"));
        type_map
            .add_mapping("customer.name", "customerName")
            .add_nested_mapping("total", "total", TypePair::new("Money", "MoneyDto"))
            .skip("internalId");

        assert_eq!(type_map.mappings().len(), 2);
        assert!(type_map.is_mapped("customerName"));
        assert!(type_map.is_skipped("internalId"));
        assert!(!type_map.is_mapped("internalId"));
        assert_eq!(
            type_map.mappings()[1].pair,
            Some(TypePair::new("Money", "MoneyDto"))
        );
    }

    #[test]
    fn test_display() {
        let type_map = TypeMap::new(TypePair::new("Order", "OrderDto"));
        assert_eq!(
            type_map.to_string(),
            "TypeMap[Order -> OrderDto] mappings=0 skipped=0"
        );
    }
}
