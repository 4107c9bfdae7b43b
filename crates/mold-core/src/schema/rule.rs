//! Composable per-field validation rules.
//!
//! A [`Rule`] is an ordered chain of checks, each pairing a predicate
//! with the message reported when it fails. Checks compose through the
//! builder; evaluation reports the first failing check in the chain.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use crate::condition::value_eq;

/// Predicate type for [`Rule::custom`].
pub type CustomCheck = dyn Fn(&Value) -> bool + Send + Sync;

/// The built-in predicates a check can apply.
#[derive(Clone)]
pub enum CheckKind {
    /// Value must be present: not null, not an empty string, not an
    /// empty array.
    Required,
    /// Minimum length, in characters for strings and elements for arrays.
    MinLength(usize),
    /// Maximum length, in characters for strings and elements for arrays.
    MaxLength(usize),
    /// String must match the regex.
    Pattern(Regex),
    /// Numeric lower bound, inclusive.
    Min(f64),
    /// Numeric upper bound, inclusive.
    Max(f64),
    /// Value must equal one of the allowed values.
    OneOf(Vec<Value>),
    /// Arbitrary predicate.
    Custom(Arc<CustomCheck>),
}

impl CheckKind {
    /// Stable name, reported as the error type of a violation.
    pub fn name(&self) -> &'static str {
        match self {
            CheckKind::Required => "required",
            CheckKind::MinLength(_) => "min_length",
            CheckKind::MaxLength(_) => "max_length",
            CheckKind::Pattern(_) => "pattern",
            CheckKind::Min(_) => "min",
            CheckKind::Max(_) => "max",
            CheckKind::OneOf(_) => "one_of",
            CheckKind::Custom(_) => "custom",
        }
    }

    /// Apply the predicate. A value of the wrong shape for the check
    /// (e.g. a number under `min_length`) fails it.
    pub fn passes(&self, value: &Value) -> bool {
        match self {
            CheckKind::Required => !value_is_missing(value),
            CheckKind::MinLength(n) => text_len(value).is_some_and(|len| len >= *n),
            CheckKind::MaxLength(n) => text_len(value).is_some_and(|len| len <= *n),
            CheckKind::Pattern(re) => value.as_str().is_some_and(|s| re.is_match(s)),
            CheckKind::Min(bound) => value.as_f64().is_some_and(|v| v >= *bound),
            CheckKind::Max(bound) => value.as_f64().is_some_and(|v| v <= *bound),
            CheckKind::OneOf(allowed) => allowed.iter().any(|a| value_eq(value, a)),
            CheckKind::Custom(predicate) => predicate(value),
        }
    }
}

impl fmt::Debug for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckKind::Required => write!(f, "Required"),
            CheckKind::MinLength(n) => write!(f, "MinLength({n})"),
            CheckKind::MaxLength(n) => write!(f, "MaxLength({n})"),
            CheckKind::Pattern(re) => write!(f, "Pattern({})", re.as_str()),
            CheckKind::Min(n) => write!(f, "Min({n})"),
            CheckKind::Max(n) => write!(f, "Max({n})"),
            CheckKind::OneOf(values) => write!(f, "OneOf({values:?})"),
            CheckKind::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// One predicate plus its failure message.
#[derive(Debug, Clone)]
pub struct Check {
    kind: CheckKind,
    message: String,
}

impl Check {
    /// The predicate.
    pub fn kind(&self) -> &CheckKind {
        &self.kind
    }

    /// The message reported when the predicate fails.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// An ordered chain of checks applied to one field's value.
#[derive(Debug, Clone, Default)]
pub struct Rule {
    checks: Vec<Check>,
}

impl Rule {
    /// Start an empty rule.
    pub fn new() -> Self {
        Self::default()
    }

    fn check(mut self, kind: CheckKind, message: impl Into<String>) -> Self {
        self.checks.push(Check {
            kind,
            message: message.into(),
        });
        self
    }

    /// Value must be present.
    #[must_use]
    pub fn required(self, message: impl Into<String>) -> Self {
        self.check(CheckKind::Required, message)
    }

    /// Minimum string/array length.
    #[must_use]
    pub fn min_length(self, min: usize, message: impl Into<String>) -> Self {
        self.check(CheckKind::MinLength(min), message)
    }

    /// Maximum string/array length.
    #[must_use]
    pub fn max_length(self, max: usize, message: impl Into<String>) -> Self {
        self.check(CheckKind::MaxLength(max), message)
    }

    /// String must match the regex.
    #[must_use]
    pub fn pattern(self, pattern: Regex, message: impl Into<String>) -> Self {
        self.check(CheckKind::Pattern(pattern), message)
    }

    /// Numeric lower bound, inclusive.
    #[must_use]
    pub fn min(self, bound: f64, message: impl Into<String>) -> Self {
        self.check(CheckKind::Min(bound), message)
    }

    /// Numeric upper bound, inclusive.
    #[must_use]
    pub fn max(self, bound: f64, message: impl Into<String>) -> Self {
        self.check(CheckKind::Max(bound), message)
    }

    /// Value must equal one of the allowed values.
    #[must_use]
    pub fn one_of(self, allowed: Vec<Value>, message: impl Into<String>) -> Self {
        self.check(CheckKind::OneOf(allowed), message)
    }

    /// Arbitrary predicate; `true` passes.
    #[must_use]
    pub fn custom(
        self,
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
        message: impl Into<String>,
    ) -> Self {
        self.check(CheckKind::Custom(Arc::new(predicate)), message)
    }

    /// First check in the chain the value fails, if any.
    pub fn first_failure(&self, value: &Value) -> Option<&Check> {
        self.checks.iter().find(|check| !check.kind.passes(value))
    }

    /// Number of checks in the chain.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Whether the chain holds no checks.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

fn value_is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

fn text_len(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(a) => Some(a.len()),
        _ => None,
    }
}
