//! Externalized mapping-engine configuration
//!
//! All keys live under the `mapwright` prefix:
//!
//! ```yaml
//! mapwright:
//!   validate-enabled: true
//!   provider-integration-enabled: false
//!   configuration:
//!     matching-strategy: loose
//!     field-matching-enabled: true
//!     skip-null-enabled: true
//! ```
//!
//! The same tree can be supplied as flat key/value pairs
//! (`mapwright.configuration.matching-strategy=loose`) or as environment
//! variables (`MAPWRIGHT_CONFIGURATION_MATCHING_STRATEGY=loose`). Keys are
//! compared in relaxed form, see [`binding::normalize_key`].

use mapwright_core::{
    AccessLevel, MatchingStrategy, NameTokenizer, NameTransformer, NamingConvention,
};
use serde::Deserialize;
use std::ffi::OsString;
use std::path::Path;

use crate::binding;
use crate::error::{Error, Result};

/// Root prefix of every configuration key
pub const PROPERTIES_PREFIX: &str = "mapwright";

/// Bound configuration snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct MapperProperties {
    /// Per-option engine settings
    pub configuration: EngineProperties,

    /// Install the [`InstanceRegistry`](crate::InstanceRegistry) as the engine provider
    pub provider_integration_enabled: bool,

    /// Validate the engine after wiring
    pub validate_enabled: bool,
}

/// One optional value per engine setting. `None` leaves the engine default alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EngineProperties {
    /// Splits source property names into tokens
    #[serde(deserialize_with = "binding::deserialize_lenient")]
    pub source_name_tokenizer: Option<NameTokenizer>,
    /// Rewrites source accessor names
    #[serde(deserialize_with = "binding::deserialize_lenient")]
    pub source_name_transformer: Option<NameTransformer>,
    /// Which source names are eligible
    #[serde(deserialize_with = "binding::deserialize_lenient")]
    pub source_naming_convention: Option<NamingConvention>,
    /// Splits destination property names into tokens
    #[serde(deserialize_with = "binding::deserialize_lenient")]
    pub destination_name_tokenizer: Option<NameTokenizer>,
    /// Rewrites destination mutator names
    #[serde(deserialize_with = "binding::deserialize_lenient")]
    pub destination_name_transformer: Option<NameTransformer>,
    /// Which destination names are eligible
    #[serde(deserialize_with = "binding::deserialize_lenient")]
    pub destination_naming_convention: Option<NamingConvention>,
    /// How tokenized names are matched
    #[serde(deserialize_with = "binding::deserialize_lenient")]
    pub matching_strategy: Option<MatchingStrategy>,
    /// Field access level; stored on the engine settings, not read by mapping
    #[serde(deserialize_with = "binding::deserialize_access_level")]
    pub field_access_level: Option<AccessLevel>,
    /// Method access level; stored on the engine settings, not read by mapping
    #[serde(deserialize_with = "binding::deserialize_access_level")]
    pub method_access_level: Option<AccessLevel>,
    /// Field matching flag; stored on the engine settings, not read by mapping
    pub field_matching_enabled: Option<bool>,
    /// Skip destinations with several candidate sources
    pub ambiguity_ignored: Option<bool>,
    /// Full type matching flag; stored on the engine settings, not read by mapping
    pub full_type_matching_required: Option<bool>,
    /// Match unmapped properties by name
    pub implicit_mapping_enabled: Option<bool>,
    /// Never write null source values
    pub skip_null_enabled: Option<bool>,
    /// Collections merge flag; stored on the engine settings, not read by mapping
    pub collections_merge_enabled: Option<bool>,
    /// Class-loader bridging flag; stored on the engine settings, not read by mapping
    pub use_osgi_class_loader_bridging: Option<bool>,
    /// Deep copy flag; stored on the engine settings, not read by mapping
    pub deep_copy_enabled: Option<bool>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Document {
    mapwright: MapperProperties,
}

impl MapperProperties {
    /// Bind flat key/value pairs. Pairs outside the `mapwright` prefix are skipped.
    pub fn bind<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut properties = Self::default();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            let Some(rest) = strip_prefix(key) else {
                continue;
            };
            properties.bind_one(key, &binding::normalize_key(rest), value)?;
        }
        Ok(properties)
    }

    /// Bind from the process environment. Variables that are not valid
    /// Unicode are skipped.
    pub fn from_env() -> Result<Self> {
        Self::bind_os(std::env::vars_os())
    }

    fn bind_os<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        Self::bind(vars.into_iter().filter_map(unicode_var))
    }

    /// Parse a YAML document with a `mapwright:` root. A missing root binds defaults.
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let document: Document = serde_yaml::from_str(contents)?;
        Ok(document.mapwright)
    }

    /// Load a YAML configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    fn bind_one(&mut self, key: &str, normalized: &str, value: &str) -> Result<()> {
        let c = &mut self.configuration;
        match normalized {
            "providerintegrationenabled" => {
                self.provider_integration_enabled =
                    binding::boolean(key, value)?.unwrap_or_default();
            }
            "validateenabled" => {
                self.validate_enabled = binding::boolean(key, value)?.unwrap_or_default();
            }
            "configurationsourcenametokenizer" => {
                c.source_name_tokenizer = binding::convert(Some(value));
            }
            "configurationsourcenametransformer" => {
                c.source_name_transformer = binding::convert(Some(value));
            }
            "configurationsourcenamingconvention" => {
                c.source_naming_convention = binding::convert(Some(value));
            }
            "configurationdestinationnametokenizer" => {
                c.destination_name_tokenizer = binding::convert(Some(value));
            }
            "configurationdestinationnametransformer" => {
                c.destination_name_transformer = binding::convert(Some(value));
            }
            "configurationdestinationnamingconvention" => {
                c.destination_naming_convention = binding::convert(Some(value));
            }
            "configurationmatchingstrategy" => {
                c.matching_strategy = binding::convert(Some(value));
            }
            "configurationfieldaccesslevel" => {
                c.field_access_level = binding::access_level(key, value)?;
            }
            "configurationmethodaccesslevel" => {
                c.method_access_level = binding::access_level(key, value)?;
            }
            "configurationfieldmatchingenabled" => {
                c.field_matching_enabled = binding::boolean(key, value)?;
            }
            "configurationambiguityignored" => {
                c.ambiguity_ignored = binding::boolean(key, value)?;
            }
            "configurationfulltypematchingrequired" => {
                c.full_type_matching_required = binding::boolean(key, value)?;
            }
            "configurationimplicitmappingenabled" => {
                c.implicit_mapping_enabled = binding::boolean(key, value)?;
            }
            "configurationskipnullenabled" => {
                c.skip_null_enabled = binding::boolean(key, value)?;
            }
            "configurationcollectionsmergeenabled" => {
                c.collections_merge_enabled = binding::boolean(key, value)?;
            }
            "configurationuseosgiclassloaderbridging" => {
                c.use_osgi_class_loader_bridging = binding::boolean(key, value)?;
            }
            "configurationdeepcopyenabled" => {
                c.deep_copy_enabled = binding::boolean(key, value)?;
            }
            _ => tracing::debug!(key, "ignoring unrecognized configuration key"),
        }
        Ok(())
    }
}

/// Keep a variable only when both its key and value are valid Unicode.
fn unicode_var((key, value): (OsString, OsString)) -> Option<(String, String)> {
    match (key.into_string(), value.into_string()) {
        (Ok(key), Ok(value)) => Some((key, value)),
        (Ok(key), Err(_)) if strip_prefix(&key).is_some() => {
            tracing::warn!(key = %key, "ignoring environment variable with a non-Unicode value");
            None
        }
        _ => None,
    }
}

/// `mapwright.rest`, `MAPWRIGHT_REST` and `mapwright-rest` all yield `rest`.
fn strip_prefix(key: &str) -> Option<&str> {
    let head = key.get(..PROPERTIES_PREFIX.len())?;
    if !head.eq_ignore_ascii_case(PROPERTIES_PREFIX) {
        return None;
    }
    let rest = &key[PROPERTIES_PREFIX.len()..];
    let mut chars = rest.chars();
    match chars.next() {
        Some('.' | '_' | '-') => Some(chars.as_str()),
        _ => None,
    }
}
