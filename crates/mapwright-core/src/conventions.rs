//! Strategy values held by engine settings
//!
//! Each family is a closed set of named values. The canonical name of a value
//! is what configuration text is matched against and what diagnostics print.
//!
//! | Family | Values |
//! |--------|--------|
//! | [`NameTokenizer`] | `Camel Case`, `Underscore` |
//! | [`NameTransformer`] | `Javabeans Accessor`, `Javabeans Mutator` |
//! | [`NamingConvention`] | `Javabeans Accessor`, `Javabeans Mutator`, `None` |
//! | [`MatchingStrategy`] | `Loose`, `Standard`, `Strict` |
//! | [`AccessLevel`] | `Public`, `Protected`, `Package Private`, `Private` |

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A closed family of named strategy values.
pub trait Convention: Copy + Eq + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Family name used in log records and errors
    const FAMILY: &'static str;

    /// Every legal value, in declared order
    const VALUES: &'static [Self];

    /// Canonical display name of this value
    fn canonical_name(self) -> &'static str;

    /// Case-insensitive exact lookup by canonical name, tried in declared order.
    fn from_canonical_name(name: &str) -> Option<Self> {
        Self::VALUES
            .iter()
            .copied()
            .find(|value| value.canonical_name().eq_ignore_ascii_case(name))
    }
}

/// Splits property names into tokens and joins tokens back into names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameTokenizer {
    /// `firstName`, `URLValue`, `address2`
    CamelCase,
    /// `first_name`
    Underscore,
}

impl Convention for NameTokenizer {
    const FAMILY: &'static str = "NameTokenizer";
    const VALUES: &'static [Self] = &[Self::CamelCase, Self::Underscore];

    fn canonical_name(self) -> &'static str {
        match self {
            Self::CamelCase => "Camel Case",
            Self::Underscore => "Underscore",
        }
    }
}

impl NameTokenizer {
    /// Split a property name into tokens
    pub fn tokenize(self, name: &str) -> Vec<String> {
        match self {
            Self::CamelCase => split_camel_case(name),
            Self::Underscore => name
                .split('_')
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Join tokens into a property name following this tokenizer's style
    pub fn join(self, tokens: &[String]) -> String {
        match self {
            Self::CamelCase => {
                let mut name = String::new();
                for (i, token) in tokens.iter().enumerate() {
                    if i == 0 {
                        name.push_str(&token.to_lowercase());
                    } else {
                        name.push_str(&capitalize(&token.to_lowercase()));
                    }
                }
                name
            }
            Self::Underscore => tokens
                .iter()
                .map(|token| token.to_lowercase())
                .collect::<Vec<_>>()
                .join("_"),
        }
    }
}

fn split_camel_case(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            flush(&mut tokens, &mut current);
            continue;
        }
        if let Some(&prev) = i.checked_sub(1).and_then(|p| chars.get(p)) {
            let next = chars.get(i + 1).copied();
            let lower_to_upper =
                c.is_uppercase() && (prev.is_lowercase() || prev.is_numeric());
            // "URLValue": split before the 'V' that starts a new word
            let acronym_end = c.is_uppercase()
                && prev.is_uppercase()
                && next.is_some_and(char::is_lowercase);
            let letter_digit = prev.is_alphanumeric() && c.is_numeric() != prev.is_numeric();
            if lower_to_upper || acronym_end || letter_digit {
                flush(&mut tokens, &mut current);
            }
        }
        current.push(c);
    }
    flush(&mut tokens, &mut current);
    tokens
}

fn flush(tokens: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        tokens.push(std::mem::take(current));
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Java-bean style decapitalization: `Name` -> `name`, but `URL` stays `URL`.
fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(a), Some(b)) if a.is_uppercase() && b.is_uppercase() => s.to_string(),
        (Some(a), _) => a.to_lowercase().chain(s.chars().skip(1)).collect(),
        (None, _) => String::new(),
    }
}

/// Strip `prefix` when it is followed by an upper-case letter.
fn strip_bean_prefix<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    name.strip_prefix(prefix)
        .filter(|rest| rest.chars().next().is_some_and(char::is_uppercase))
}

/// Turns accessor or mutator names into plain property names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameTransformer {
    /// `getName` / `isActive` -> `name` / `active`
    JavaBeansAccessor,
    /// `setName` -> `name`
    JavaBeansMutator,
}

impl Convention for NameTransformer {
    const FAMILY: &'static str = "NameTransformer";
    const VALUES: &'static [Self] = &[Self::JavaBeansAccessor, Self::JavaBeansMutator];

    fn canonical_name(self) -> &'static str {
        match self {
            Self::JavaBeansAccessor => "Javabeans Accessor",
            Self::JavaBeansMutator => "Javabeans Mutator",
        }
    }
}

impl NameTransformer {
    /// Transform a property name; names without a bean prefix pass through.
    pub fn transform(self, name: &str) -> String {
        let stripped = match self {
            Self::JavaBeansAccessor => {
                strip_bean_prefix(name, "get").or_else(|| strip_bean_prefix(name, "is"))
            }
            Self::JavaBeansMutator => strip_bean_prefix(name, "set"),
        };
        match stripped {
            Some(rest) => decapitalize(rest),
            None => name.to_string(),
        }
    }
}

/// Decides which property names count as accessors or mutators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamingConvention {
    /// `getX` / `isX`
    JavaBeansAccessor,
    /// `setX`
    JavaBeansMutator,
    /// Every name applies
    None,
}

impl Convention for NamingConvention {
    const FAMILY: &'static str = "NamingConvention";
    const VALUES: &'static [Self] = &[Self::JavaBeansAccessor, Self::JavaBeansMutator, Self::None];

    fn canonical_name(self) -> &'static str {
        match self {
            Self::JavaBeansAccessor => "Javabeans Accessor",
            Self::JavaBeansMutator => "Javabeans Mutator",
            Self::None => "None",
        }
    }
}

impl NamingConvention {
    /// Whether `name` follows this convention
    pub fn applies(self, name: &str) -> bool {
        match self {
            Self::JavaBeansAccessor => {
                strip_bean_prefix(name, "get").is_some() || strip_bean_prefix(name, "is").is_some()
            }
            Self::JavaBeansMutator => strip_bean_prefix(name, "set").is_some(),
            Self::None => true,
        }
    }
}

/// How source and destination name tokens are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchingStrategy {
    /// The last destination token appears among the source tokens
    Loose,
    /// Every token on each side is matched by the other side
    Standard,
    /// Same tokens in the same order
    Strict,
}

impl Convention for MatchingStrategy {
    const FAMILY: &'static str = "MatchingStrategy";
    const VALUES: &'static [Self] = &[Self::Loose, Self::Standard, Self::Strict];

    fn canonical_name(self) -> &'static str {
        match self {
            Self::Loose => "Loose",
            Self::Standard => "Standard",
            Self::Strict => "Strict",
        }
    }
}

impl MatchingStrategy {
    /// Whether a source property with `source` tokens matches a destination
    /// property with `destination` tokens. Comparison ignores ASCII case.
    pub fn matches(self, source: &[String], destination: &[String]) -> bool {
        if source.is_empty() || destination.is_empty() {
            return false;
        }
        let contains = |haystack: &[String], needle: &str| {
            haystack.iter().any(|t| t.eq_ignore_ascii_case(needle))
        };
        match self {
            Self::Loose => destination
                .last()
                .is_some_and(|last| contains(source, last)),
            Self::Standard => {
                destination.iter().all(|t| contains(source, t))
                    && source.iter().all(|t| contains(destination, t))
            }
            Self::Strict => {
                source.len() == destination.len()
                    && source
                        .iter()
                        .zip(destination)
                        .all(|(s, d)| s.eq_ignore_ascii_case(d))
            }
        }
    }
}

/// Visibility level for field and method matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AccessLevel {
    /// Only public members
    Public,
    /// Public and protected members
    Protected,
    /// Public, protected and package-private members
    PackagePrivate,
    /// All members
    Private,
}

impl Convention for AccessLevel {
    const FAMILY: &'static str = "AccessLevel";
    const VALUES: &'static [Self] = &[
        Self::Public,
        Self::Protected,
        Self::PackagePrivate,
        Self::Private,
    ];

    fn canonical_name(self) -> &'static str {
        match self {
            Self::Public => "Public",
            Self::Protected => "Protected",
            Self::PackagePrivate => "Package Private",
            Self::Private => "Private",
        }
    }
}

/// Parses leniently on spelling (`PACKAGE_PRIVATE`, `package-private`,
/// `Package Private`) but strictly on the value itself.
impl FromStr for AccessLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = squash(s);
        Self::VALUES
            .iter()
            .copied()
            .find(|level| squash(level.canonical_name()) == wanted)
            .ok_or_else(|| Error::UnknownConvention {
                family: Self::FAMILY,
                value: s.to_string(),
            })
    }
}

fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

macro_rules! display_canonical_name {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.canonical_name())
                }
            }
        )*
    };
}

display_canonical_name!(
    NameTokenizer,
    NameTransformer,
    NamingConvention,
    MatchingStrategy,
    AccessLevel,
);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case("firstName", &["first", "Name"])]
    #[case("URLValue", &["URL", "Value"])]
    #[case("userID", &["user", "ID"])]
    #[case("address2", &["address", "2"])]
    #[case("id", &["id"])]
    #[case("", &[])]
    fn test_camel_case_tokenize(#[case] name: &str, #[case] expected: &[&str]) {
        assert_eq!(NameTokenizer::CamelCase.tokenize(name), tokens(expected));
    }

    #[test]
    fn test_underscore_tokenize_skips_empty_tokens() {
        assert_eq!(
            NameTokenizer::Underscore.tokenize("__first__name_"),
            tokens(&["first", "name"])
        );
    }

    #[test]
    fn test_join_between_styles() {
        assert_eq!(
            NameTokenizer::CamelCase.join(&tokens(&["first", "name"])),
            "firstName"
        );
        assert_eq!(
            NameTokenizer::Underscore.join(&tokens(&["URL", "Value"])),
            "url_value"
        );
    }

    #[test]
    fn test_transformer_strips_bean_prefixes() {
        assert_eq!(
            NameTransformer::JavaBeansAccessor.transform("getName"),
            "name"
        );
        assert_eq!(
            NameTransformer::JavaBeansAccessor.transform("isActive"),
            "active"
        );
        assert_eq!(
            NameTransformer::JavaBeansAccessor.transform("getURL"),
            "URL"
        );
        assert_eq!(
            NameTransformer::JavaBeansAccessor.transform("getaway"),
            "getaway"
        );
        assert_eq!(
            NameTransformer::JavaBeansMutator.transform("setEmail"),
            "email"
        );
        assert_eq!(
            NameTransformer::JavaBeansMutator.transform("getEmail"),
            "getEmail"
        );
    }

    #[test]
    fn test_naming_convention_applies() {
        assert!(NamingConvention::JavaBeansAccessor.applies("getName"));
        assert!(NamingConvention::JavaBeansAccessor.applies("isActive"));
        assert!(!NamingConvention::JavaBeansAccessor.applies("name"));
        assert!(NamingConvention::JavaBeansMutator.applies("setName"));
        assert!(NamingConvention::None.applies("anything"));
    }

    #[test]
    fn test_matching_strategies() {
        let source = tokens(&["user", "Name"]);
        let destination = tokens(&["name"]);

        assert!(MatchingStrategy::Loose.matches(&source, &destination));
        assert!(!MatchingStrategy::Standard.matches(&source, &destination));
        assert!(!MatchingStrategy::Strict.matches(&source, &destination));

        let same = tokens(&["user", "name"]);
        assert!(MatchingStrategy::Strict.matches(&source, &same));
        assert!(MatchingStrategy::Standard.matches(&tokens(&["name", "user"]), &same));
        assert!(!MatchingStrategy::Strict.matches(&tokens(&["name", "user"]), &same));
    }

    #[test]
    fn test_from_canonical_name_ignores_case() {
        assert_eq!(
            MatchingStrategy::from_canonical_name("LOOSE"),
            Some(MatchingStrategy::Loose)
        );
        assert_eq!(
            NameTokenizer::from_canonical_name("camel case"),
            Some(NameTokenizer::CamelCase)
        );
        assert_eq!(NameTokenizer::from_canonical_name("camel_case"), None);
    }

    #[rstest]
    #[case("PUBLIC", AccessLevel::Public)]
    #[case("protected", AccessLevel::Protected)]
    #[case("PACKAGE_PRIVATE", AccessLevel::PackagePrivate)]
    #[case("package-private", AccessLevel::PackagePrivate)]
    #[case("Private", AccessLevel::Private)]
    fn test_access_level_from_str(#[case] text: &str, #[case] expected: AccessLevel) {
        assert_eq!(text.parse::<AccessLevel>().unwrap(), expected);
    }

    #[test]
    fn test_access_level_rejects_unknown() {
        let err = "friendly".parse::<AccessLevel>().unwrap_err();
        assert!(err.to_string().contains("AccessLevel"));
    }

    #[test]
    fn test_display_uses_canonical_name() {
        assert_eq!(
            NameTransformer::JavaBeansMutator.to_string(),
            "Javabeans Mutator"
        );
        assert_eq!(AccessLevel::PackagePrivate.to_string(), "Package Private");
    }
}
