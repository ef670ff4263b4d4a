//! String-to-strategy conversion
//!
//! Configuration arrives as text. The four lenient families ([`NameTokenizer`],
//! [`NameTransformer`], [`NamingConvention`], [`MatchingStrategy`]) convert as
//! follows:
//!
//! - empty or absent text converts to `None` silently;
//! - text equal to a canonical name, ignoring case, converts to that value;
//! - anything else converts to `None` and logs one warning, so the engine
//!   keeps its own default.
//!
//! [`AccessLevel`] and booleans are strict: bad text is an error.

use mapwright_core::{
    AccessLevel, Convention, MatchingStrategy, NameTokenizer, NameTransformer, NamingConvention,
};
use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

/// Convert `raw` to a value of family `T`, falling back to `None` with a warning.
pub fn convert<T: Convention>(raw: Option<&str>) -> Option<T> {
    let raw = raw.filter(|s| !s.is_empty())?;
    let value = T::from_canonical_name(raw);
    if value.is_none() {
        tracing::warn!("{} not allow [{}], use default.", T::FAMILY, raw);
    }
    value
}

/// Convert text to a [`NameTokenizer`]
pub fn name_tokenizer(raw: &str) -> Option<NameTokenizer> {
    convert(Some(raw))
}

/// Convert text to a [`NameTransformer`]
pub fn name_transformer(raw: &str) -> Option<NameTransformer> {
    convert(Some(raw))
}

/// Convert text to a [`NamingConvention`]
pub fn naming_convention(raw: &str) -> Option<NamingConvention> {
    convert(Some(raw))
}

/// Convert text to a [`MatchingStrategy`]
pub fn matching_strategy(raw: &str) -> Option<MatchingStrategy> {
    convert(Some(raw))
}

/// Strict [`AccessLevel`] parsing; empty text is unset.
pub fn access_level(key: &str, raw: &str) -> Result<Option<AccessLevel>> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<AccessLevel>()
        .map(Some)
        .map_err(|e| Error::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

/// Strict boolean parsing; empty text is unset.
pub fn boolean(key: &str, raw: &str) -> Result<Option<bool>> {
    match raw.trim() {
        "" => Ok(None),
        s if s.eq_ignore_ascii_case("true") => Ok(Some(true)),
        s if s.eq_ignore_ascii_case("false") => Ok(Some(false)),
        _ => Err(Error::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

/// Relaxed key form: lower-case with `.`, `-` and `_` removed.
///
/// `mapwright.configuration.matching-strategy`,
/// `MAPWRIGHT_CONFIGURATION_MATCHING_STRATEGY` and
/// `mapwright.configuration.matchingStrategy` all normalize to
/// `mapwrightconfigurationmatchingstrategy`.
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| !matches!(c, '.' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Serde adapter for lenient families.
pub(crate) fn deserialize_lenient<'de, D, T>(
    deserializer: D,
) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Convention,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(convert(raw.as_deref()))
}

/// Serde adapter for [`AccessLevel`].
pub(crate) fn deserialize_access_level<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<AccessLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(text) => text
            .parse::<AccessLevel>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CapturedLogs;
    use rstest::rstest;

    #[rstest]
    #[case("camel case", NameTokenizer::CamelCase)]
    #[case("CAMEL CASE", NameTokenizer::CamelCase)]
    #[case("Camel Case", NameTokenizer::CamelCase)]
    #[case("underscore", NameTokenizer::Underscore)]
    #[case("UnderScore", NameTokenizer::Underscore)]
    fn test_name_tokenizer_any_casing(#[case] raw: &str, #[case] expected: NameTokenizer) {
        let (value, logs) = CapturedLogs::capture(|| name_tokenizer(raw));
        assert_eq!(value, Some(expected));
        assert_eq!(logs.count("not allow"), 0);
    }

    #[rstest]
    #[case("javabeans accessor", NameTransformer::JavaBeansAccessor)]
    #[case("JAVABEANS MUTATOR", NameTransformer::JavaBeansMutator)]
    fn test_name_transformer_any_casing(#[case] raw: &str, #[case] expected: NameTransformer) {
        assert_eq!(name_transformer(raw), Some(expected));
    }

    #[rstest]
    #[case("Javabeans Accessor", NamingConvention::JavaBeansAccessor)]
    #[case("javabeans mutator", NamingConvention::JavaBeansMutator)]
    #[case("NONE", NamingConvention::None)]
    fn test_naming_convention_any_casing(
        #[case] raw: &str,
        #[case] expected: NamingConvention,
    ) {
        assert_eq!(naming_convention(raw), Some(expected));
    }

    #[rstest]
    #[case("LOOSE", MatchingStrategy::Loose)]
    #[case("loose", MatchingStrategy::Loose)]
    #[case("Standard", MatchingStrategy::Standard)]
    #[case("sTrIcT", MatchingStrategy::Strict)]
    fn test_matching_strategy_any_casing(#[case] raw: &str, #[case] expected: MatchingStrategy) {
        assert_eq!(matching_strategy(raw), Some(expected));
    }

    #[rstest]
    #[case::tokenizer("NameTokenizer", |s: &str| name_tokenizer(s).is_none())]
    #[case::transformer("NameTransformer", |s: &str| name_transformer(s).is_none())]
    #[case::convention("NamingConvention", |s: &str| naming_convention(s).is_none())]
    #[case::strategy("MatchingStrategy", |s: &str| matching_strategy(s).is_none())]
    fn test_invalid_text_warns_once(#[case] family: &str, #[case] rejects: fn(&str) -> bool) {
        let (was_none, logs) = CapturedLogs::capture(|| rejects("bogus"));
        assert!(was_none);
        let expected = format!("{family} not allow [bogus], use default.");
        assert_eq!(logs.count(&expected), 1, "logs were: {}", logs.contents());
        assert!(logs.contents().contains("WARN"));
    }

    #[test]
    fn test_empty_and_absent_are_silent() {
        let (values, logs) = CapturedLogs::capture(|| {
            (
                convert::<MatchingStrategy>(None),
                convert::<MatchingStrategy>(Some("")),
            )
        });
        assert_eq!(values, (None, None));
        assert!(logs.contents().is_empty());
    }

    #[test]
    fn test_underscored_name_is_not_canonical() {
        let (value, logs) = CapturedLogs::capture(|| name_tokenizer("camel_case"));
        assert_eq!(value, None);
        assert_eq!(
            logs.count("NameTokenizer not allow [camel_case], use default."),
            1
        );
    }

    #[test]
    fn test_access_level_is_strict() {
        assert_eq!(
            access_level("k", "package_private").unwrap(),
            Some(AccessLevel::PackagePrivate)
        );
        assert_eq!(access_level("k", "").unwrap(), None);
        let err = access_level("mapwright.configuration.field-access-level", "friendly")
            .unwrap_err()
            .to_string();
        assert!(err.contains("field-access-level"));
        assert!(err.contains("friendly"));
    }

    #[rstest]
    #[case("true", Some(true))]
    #[case("TRUE", Some(true))]
    #[case(" false ", Some(false))]
    #[case("", None)]
    fn test_boolean(#[case] raw: &str, #[case] expected: Option<bool>) {
        assert_eq!(boolean("k", raw).unwrap(), expected);
    }

    #[test]
    fn test_boolean_rejects_other_text() {
        assert!(boolean("k", "yes").is_err());
    }

    #[test]
    fn test_normalize_key() {
        let expected = "mapwrightconfigurationmatchingstrategy";
        assert_eq!(
            normalize_key("mapwright.configuration.matching-strategy"),
            expected
        );
        assert_eq!(
            normalize_key("MAPWRIGHT_CONFIGURATION_MATCHING_STRATEGY"),
            expected
        );
        assert_eq!(
            normalize_key("mapwright.configuration.matchingStrategy"),
            expected
        );
    }
}
