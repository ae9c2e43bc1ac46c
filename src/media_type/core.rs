use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;

use super::error::InvalidMediaTypeError;

/// The wildcard token accepted for the type and subtype positions.
pub const WILDCARD: &str = "*";

/// The quality parameter name, excluded from parameter-count specificity.
const PARAM_QUALITY: &str = "q";

/// The `*/*` media type.
pub static ALL: Lazy<MediaType> = Lazy::new(|| MediaType {
    type_: WILDCARD.to_string(),
    subtype: WILDCARD.to_string(),
    parameters: BTreeMap::new(),
});

/// An immutable media type: `type/subtype` plus optional parameters.
///
/// Type and subtype are stored lowercase. A wildcard type (`*`) is only
/// permitted together with a wildcard subtype. The optional `q` parameter
/// must be a decimal in `[0, 1]` and defaults to `1.0`.
///
/// Constructed once from a string at registration time via [`MediaType::parse`];
/// never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaType {
    type_: String,
    subtype: String,
    parameters: BTreeMap<String, String>,
}

impl MediaType {
    /// Parse a single media-type specification.
    ///
    /// Accepts `type "/" subtype (";" attr "=" value)*`. A bare `*` is
    /// shorthand for `*/*`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMediaTypeError`] if the string is empty, lacks a
    /// `/`, has an empty or malformed type/subtype token, pairs a wildcard
    /// type with a concrete subtype, or contains a malformed parameter
    /// (including an out-of-range quality value).
    pub fn parse(value: &str) -> Result<Self, InvalidMediaTypeError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(InvalidMediaTypeError::new(value, "must not be empty"));
        }

        let mut sections = split_outside_quotes(trimmed, ';').into_iter();
        let full_type = sections.next().unwrap_or_default().trim();
        // "*" on its own means "*/*" (shorthand seen in Accept headers).
        let full_type = if full_type == WILDCARD {
            "*/*"
        } else {
            full_type
        };

        let Some((type_, subtype)) = full_type.split_once('/') else {
            return Err(InvalidMediaTypeError::new(value, "does not contain '/'"));
        };
        if type_.is_empty() || subtype.is_empty() {
            return Err(InvalidMediaTypeError::new(
                value,
                "type and subtype must not be empty",
            ));
        }
        check_token(type_, value)?;
        check_token(subtype, value)?;
        if type_ == WILDCARD && subtype != WILDCARD {
            return Err(InvalidMediaTypeError::new(
                value,
                "wildcard type is only allowed with wildcard subtype",
            ));
        }

        let mut parameters = BTreeMap::new();
        for section in sections {
            let parameter = section.trim();
            let Some((attr, val)) = parameter.split_once('=') else {
                return Err(InvalidMediaTypeError::new(
                    value,
                    "parameter does not contain '='",
                ));
            };
            let attr = attr.trim().to_ascii_lowercase();
            if attr.is_empty() {
                return Err(InvalidMediaTypeError::new(
                    value,
                    "parameter attribute must not be empty",
                ));
            }
            let val = unquote(val.trim());
            if attr == PARAM_QUALITY {
                let quality: f64 = val.parse().map_err(|_| {
                    InvalidMediaTypeError::new(value, "quality value is not a number")
                })?;
                if !(0.0..=1.0).contains(&quality) {
                    return Err(InvalidMediaTypeError::new(
                        value,
                        "quality value must be between 0.0 and 1.0",
                    ));
                }
            }
            parameters.insert(attr, val.to_string());
        }

        Ok(Self {
            type_: type_.to_ascii_lowercase(),
            subtype: subtype.to_ascii_lowercase(),
            parameters,
        })
    }

    /// Parse a comma-separated list of media types, as found in an `Accept`
    /// header. Commas inside quoted parameter values do not split.
    ///
    /// An empty or blank input yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidMediaTypeError`] encountered.
    pub fn parse_list(value: &str) -> Result<Vec<Self>, InvalidMediaTypeError> {
        split_outside_quotes(value, ',')
            .into_iter()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Self::parse)
            .collect()
    }

    /// The primary type, lowercase (`application` in `application/json`).
    #[must_use]
    pub fn type_(&self) -> &str {
        &self.type_
    }

    /// The subtype, lowercase (`json` in `application/json`).
    #[must_use]
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// Look up a parameter value by (lowercase) attribute name.
    #[must_use]
    pub fn parameter(&self, attr: &str) -> Option<&str> {
        self.parameters.get(attr).map(String::as_str)
    }

    /// The declared quality value, or `1.0` when absent.
    #[must_use]
    pub fn quality(&self) -> f64 {
        self.parameters
            .get(PARAM_QUALITY)
            .and_then(|q| q.parse().ok())
            .unwrap_or(1.0)
    }

    #[must_use]
    pub fn is_wildcard_type(&self) -> bool {
        self.type_ == WILDCARD
    }

    #[must_use]
    pub fn is_wildcard_subtype(&self) -> bool {
        self.subtype == WILDCARD
    }

    /// Whether this media type names a concrete `type/subtype` pair.
    #[must_use]
    pub fn is_concrete(&self) -> bool {
        !self.is_wildcard_type() && !self.is_wildcard_subtype()
    }

    /// Wildcard-aware compatibility: type and subtype each match if equal
    /// or if either side is `*`. The relation is symmetric.
    #[must_use]
    pub fn is_compatible_with(&self, other: &MediaType) -> bool {
        let type_ok = self.type_ == WILDCARD || other.type_ == WILDCARD || self.type_ == other.type_;
        let subtype_ok =
            self.subtype == WILDCARD || other.subtype == WILDCARD || self.subtype == other.subtype;
        type_ok && subtype_ok
    }

    fn parameter_count_excluding_quality(&self) -> usize {
        self.parameters
            .keys()
            .filter(|attr| attr.as_str() != PARAM_QUALITY)
            .count()
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.type_, self.subtype)?;
        for (attr, val) in &self.parameters {
            if is_token(val) {
                write!(f, ";{attr}={val}")?;
            } else {
                // Values holding separators were accepted quoted; re-quote
                // them so the rendering stays parseable.
                write!(f, ";{attr}=\"{}\"", val.replace('\\', "\\\\").replace('"', "\\\""))?;
            }
        }
        Ok(())
    }
}

/// Specificity ordering from most specific to least specific.
///
/// Returns [`Ordering::Less`] when `a` is more specific than `b`, so sorting
/// a slice with this comparator puts the most specific candidate first.
/// Applied in order until a difference is found:
///
/// 1. a concrete subtype outranks a wildcard subtype
/// 2. a concrete type outranks a wildcard type
/// 3. a higher declared quality value outranks a lower one
/// 4. more parameters (excluding quality) outrank fewer
#[must_use]
pub fn specificity_cmp(a: &MediaType, b: &MediaType) -> Ordering {
    match (a.is_wildcard_subtype(), b.is_wildcard_subtype()) {
        (false, true) => return Ordering::Less,
        (true, false) => return Ordering::Greater,
        _ => {}
    }
    match (a.is_wildcard_type(), b.is_wildcard_type()) {
        (false, true) => return Ordering::Less,
        (true, false) => return Ordering::Greater,
        _ => {}
    }
    // Higher quality sorts first; quality values were range-checked at parse.
    if let Some(by_quality) = b.quality().partial_cmp(&a.quality()) {
        if by_quality != Ordering::Equal {
            return by_quality;
        }
    }
    b.parameter_count_excluding_quality()
        .cmp(&a.parameter_count_excluding_quality())
}

/// Split on `delim` outside of double-quoted regions. A backslash escapes
/// the next character inside quotes.
fn split_outside_quotes(value: &str, delim: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;
    for (i, c) in value.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            c if c == delim && !in_quotes => {
                parts.push(&value[start..i]);
                start = i + delim.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&value[start..]);
    parts
}

fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

const SEPARATORS: &str = "()<>@,;:\\\"/[]?=";

/// Token characters per RFC 7230: no whitespace, control characters, or
/// separators. `*` is valid so wildcards pass unchanged.
fn is_token_char(c: char) -> bool {
    c.is_ascii() && !c.is_ascii_control() && !c.is_ascii_whitespace() && !SEPARATORS.contains(c)
}

fn is_token(value: &str) -> bool {
    !value.is_empty() && value.chars().all(is_token_char)
}

fn check_token(token: &str, original: &str) -> Result<(), InvalidMediaTypeError> {
    if token.chars().all(is_token_char) {
        Ok(())
    } else {
        Err(InvalidMediaTypeError::new(
            original,
            "invalid character in token",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_type_subtype_and_parameters() {
        let mt = MediaType::parse("Application/JSON;charset=UTF-8").unwrap();
        assert_eq!(mt.type_(), "application");
        assert_eq!(mt.subtype(), "json");
        assert_eq!(mt.parameter("charset"), Some("UTF-8"));
    }

    #[test]
    fn bare_star_means_all() {
        let mt = MediaType::parse("*").unwrap();
        assert_eq!(mt, *ALL);
    }

    #[test]
    fn rejects_malformed_specs() {
        assert!(MediaType::parse("").is_err());
        assert!(MediaType::parse("   ").is_err());
        assert!(MediaType::parse("application").is_err());
        assert!(MediaType::parse("/json").is_err());
        assert!(MediaType::parse("application/").is_err());
        assert!(MediaType::parse("*/json").is_err());
        assert!(MediaType::parse("application/json;charset").is_err());
        assert!(MediaType::parse("appli cation/json").is_err());
    }

    #[test]
    fn rejects_bad_quality_values() {
        assert!(MediaType::parse("text/plain;q=abc").is_err());
        assert!(MediaType::parse("text/plain;q=1.5").is_err());
        assert!(MediaType::parse("text/plain;q=-0.1").is_err());
        let mt = MediaType::parse("text/plain;q=0.5").unwrap();
        assert!((mt.quality() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn quality_defaults_to_one() {
        let mt = MediaType::parse("text/plain").unwrap();
        assert!((mt.quality() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn parses_list_with_quoted_comma() {
        let list = MediaType::parse_list("text/plain;note=\"a,b\", application/json").unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].parameter("note"), Some("a,b"));
        assert_eq!(list[1].subtype(), "json");
    }

    #[test]
    fn empty_list_is_ok() {
        assert!(MediaType::parse_list("").unwrap().is_empty());
        assert!(MediaType::parse_list("  ").unwrap().is_empty());
    }

    #[test]
    fn compatibility_is_wildcard_aware() {
        let json = MediaType::parse("application/json").unwrap();
        let any_app = MediaType::parse("application/*").unwrap();
        let plain = MediaType::parse("text/plain").unwrap();
        assert!(json.is_compatible_with(&json));
        assert!(json.is_compatible_with(&any_app));
        assert!(any_app.is_compatible_with(&json));
        assert!(ALL.is_compatible_with(&plain));
        assert!(!json.is_compatible_with(&plain));
    }

    #[test]
    fn specificity_orders_concrete_before_wildcards() {
        let json = MediaType::parse("application/json").unwrap();
        let any_app = MediaType::parse("application/*").unwrap();
        let all = MediaType::parse("*/*").unwrap();
        assert_eq!(specificity_cmp(&json, &any_app), Ordering::Less);
        assert_eq!(specificity_cmp(&any_app, &all), Ordering::Less);
        assert_eq!(specificity_cmp(&all, &json), Ordering::Greater);
    }

    #[test]
    fn specificity_is_reflexively_equal() {
        let mt = MediaType::parse("text/html;level=1").unwrap();
        assert_eq!(specificity_cmp(&mt, &mt), Ordering::Equal);
    }

    #[test]
    fn specificity_uses_quality_then_parameter_count() {
        let low_q = MediaType::parse("text/html;q=0.7").unwrap();
        let high_q = MediaType::parse("text/html;q=0.9").unwrap();
        assert_eq!(specificity_cmp(&high_q, &low_q), Ordering::Less);

        let plain = MediaType::parse("text/html").unwrap();
        let with_param = MediaType::parse("text/html;level=1").unwrap();
        assert_eq!(specificity_cmp(&with_param, &plain), Ordering::Less);
    }

    #[test]
    fn display_round_trips() {
        let mt = MediaType::parse("application/json;charset=utf-8").unwrap();
        assert_eq!(mt.to_string(), "application/json;charset=utf-8");
        assert_eq!(MediaType::parse(&mt.to_string()).unwrap(), mt);
    }

    #[test]
    fn display_requotes_values_holding_separators() {
        let mt = MediaType::parse("text/plain;note=\"a,b;c\"").unwrap();
        assert_eq!(mt.parameter("note"), Some("a,b;c"));
        assert_eq!(mt.to_string(), "text/plain;note=\"a,b;c\"");
        assert_eq!(MediaType::parse(&mt.to_string()).unwrap(), mt);

        let list = MediaType::parse_list(&format!("{mt}, application/json")).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], mt);
    }
}
