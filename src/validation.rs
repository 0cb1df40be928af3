//! Validation Helpers
//!
//! Stateless predicates plus [`Validator`], an accumulator that records at
//! most one message per field so callers get every failure in one response.
//!
//! ```rust
//! use gas_wells_api::validation::{self, Validator};
//!
//! let mut v = Validator::new();
//! v.check(validation::not_blank("  "), "name", "name is required");
//! v.check(validation::between(1500.0, 0.1, 1000.0), "pbuf", "pbuf out of range");
//! assert!(!v.is_valid());
//! assert_eq!(v.errors().len(), 2);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// Minimum password length accepted by [`is_password`]
pub const PASSWORD_MIN_LEN: usize = 8;

// ============ Accumulator ============

/// Field key -> message map
///
/// Ordered by key so error bodies are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{key}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Collects per-field errors without short-circuiting
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff no field has been recorded
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record `message` under `key` unless the key already has one
    pub fn add_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.errors.0.entry(key.into()).or_insert_with(|| message.into());
    }

    /// Record `message` under `key` when `ok` is false
    pub fn check(&mut self, ok: bool, key: impl Into<String>, message: impl Into<String>) {
        if !ok {
            self.add_error(key, message);
        }
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// `Ok(())` when valid, otherwise every recorded error
    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

// ============ Predicates ============

pub fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Length in characters, not bytes
pub fn min_length(value: &str, n: usize) -> bool {
    value.chars().count() >= n
}

pub fn max_length(value: &str, n: usize) -> bool {
    value.chars().count() <= n
}

/// Inclusive range check
pub fn between(value: f64, min: f64, max: f64) -> bool {
    value >= min && value <= max
}

pub fn matches(value: &str, re: &Regex) -> bool {
    re.is_match(value)
}

pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// At least [`PASSWORD_MIN_LEN`] characters with upper, lower, digit and
/// punctuation/symbol classes all present.
pub fn is_password(value: &str) -> bool {
    let mut upper = false;
    let mut lower = false;
    let mut digit = false;
    let mut special = false;

    for c in value.chars() {
        if c.is_uppercase() {
            upper = true;
        } else if c.is_lowercase() {
            lower = true;
        } else if c.is_numeric() {
            digit = true;
        } else if c.is_ascii_punctuation() || (!c.is_alphanumeric() && !c.is_whitespace()) {
            special = true;
        }
    }

    min_length(value, PASSWORD_MIN_LEN) && upper && lower && digit && special
}

/// Equality-based membership
pub fn is_in<T: PartialEq>(value: &T, allowed: &[T]) -> bool {
    allowed.iter().any(|candidate| candidate == value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_error_per_key_wins() {
        let mut v = Validator::new();
        v.add_error("name", "first");
        v.add_error("name", "second");
        assert_eq!(v.errors().get("name"), Some("first"));
        assert_eq!(v.errors().len(), 1);
    }

    #[test]
    fn test_valid_iff_no_keys() {
        let mut v = Validator::new();
        assert!(v.is_valid());
        v.check(true, "name", "unused");
        assert!(v.is_valid());
        v.check(false, "diameter", "must be positive");
        assert!(!v.is_valid());

        let errors = v.finish().unwrap_err();
        assert!(errors.contains("diameter"));
        assert_eq!(errors.to_string(), "diameter: must be positive");
    }

    #[test]
    fn test_string_predicates() {
        assert!(not_blank("well"));
        assert!(!not_blank("  \t"));
        assert!(min_length("ÅÅÅ", 3));
        assert!(!min_length("ab", 3));
        assert!(max_length("abc", 3));
        assert!(!max_length("abcd", 3));

        let re = Regex::new(r"^W-\d+$").unwrap();
        assert!(matches("W-12", &re));
        assert!(!matches("X-12", &re));
    }

    #[test]
    fn test_between_is_inclusive() {
        assert!(between(0.1, 0.1, 1000.0));
        assert!(between(1000.0, 0.1, 1000.0));
        assert!(!between(1000.01, 0.1, 1000.0));
        assert!(!between(f64::NAN, 0.0, 1.0));
    }

    #[test]
    fn test_email() {
        assert!(is_email("engineer@field.example.com"));
        assert!(!is_email("engineer@field"));
        assert!(!is_email("not an email"));
    }

    #[test]
    fn test_password_strength() {
        assert!(is_password("Str0ng!pass"));
        assert!(is_password("Abcdef1+"));
        assert!(!is_password("Sh0rt!"));
        assert!(!is_password("alllower1!"));
        assert!(!is_password("ALLUPPER1!"));
        assert!(!is_password("NoDigits!!"));
        assert!(!is_password("NoSymbol12"));
    }

    #[test]
    fn test_is_in() {
        assert!(is_in(&"active", &["active", "inactive"]));
        assert!(!is_in(&"archived", &["active", "inactive"]));
        assert!(is_in(&3, &[1, 2, 3]));
        assert!(!is_in(&4, &[]));
    }
}
