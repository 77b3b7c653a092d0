//! # Checkout Error Types
//!
//! Typed error handling for the checkout acceptance gate.
//! Validation and invariant checks return `Result<T, CheckoutError>`.

use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

/// Core error type for the checkout gate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckoutError {
    /// One or more field-level schema violations
    #[error("schema validation failed with {} violation(s)", .0.len())]
    Schema(Vec<Violation>),

    /// Cross-field total invariant violation
    #[error("declared total {declared} does not match computed total {computed}")]
    TotalMismatch { declared: i64, computed: i128 },
}

impl CheckoutError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CheckoutError::Schema(_) => 422,
            CheckoutError::TotalMismatch { .. } => 422,
        }
    }
}

/// Result type alias for checkout gate operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;

/// One segment of a field path: an object key or an array index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSeg {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSeg {
    fn from(key: &str) -> Self {
        PathSeg::Key(key.to_string())
    }
}

impl From<String> for PathSeg {
    fn from(key: String) -> Self {
        PathSeg::Key(key)
    }
}

impl From<usize> for PathSeg {
    fn from(index: usize) -> Self {
        PathSeg::Index(index)
    }
}

/// The constraint a field violated. The display string is the
/// human-readable message reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rule {
    #[error("field is required")]
    Missing,

    #[error("unknown field")]
    UnknownField,

    #[error("expected {expected}")]
    InvalidType { expected: &'static str },

    #[error("must not be empty")]
    Empty,

    #[error("must have at least {min} characters")]
    TooShort { min: usize },

    #[error("must contain at least one item")]
    EmptyItems,

    #[error("must be between {min} and {max}")]
    OutOfRange { min: i64, max: i64 },

    #[error("must be greater than or equal to {min}")]
    TooSmall { min: i64 },

    #[error("must match pattern {pattern}")]
    PatternMismatch { pattern: &'static str },

    #[error("must equal \"{expected}\"")]
    LiteralMismatch { expected: &'static str },

    #[error("body is not valid JSON: {detail}")]
    InvalidJson { detail: String },

    #[error("declared total {declared} does not match computed total {computed}")]
    TotalMismatch { declared: i64, computed: i128 },
}

impl Rule {
    /// Stable machine-readable slug for this rule
    pub fn code(&self) -> &'static str {
        match self {
            Rule::Missing => "missing",
            Rule::UnknownField => "unknown_field",
            Rule::InvalidType { .. } => "invalid_type",
            Rule::Empty | Rule::TooShort { .. } | Rule::EmptyItems => "too_short",
            Rule::OutOfRange { .. } | Rule::TooSmall { .. } => "out_of_range",
            Rule::PatternMismatch { .. } => "pattern_mismatch",
            Rule::LiteralMismatch { .. } => "literal_mismatch",
            Rule::InvalidJson { .. } => "invalid_json",
            Rule::TotalMismatch { .. } => "total_mismatch",
        }
    }
}

/// One field-level violation record, serialized as
/// `{"type": ..., "loc": [...], "msg": ..., "input": ...}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Rule slug (e.g. "missing", "invalid_type")
    #[serde(rename = "type", serialize_with = "rule_code")]
    pub rule: Rule,

    /// Path to the offending field (keys and array indexes)
    pub loc: Vec<PathSeg>,

    /// Human-readable message
    pub msg: String,

    /// The offending value, omitted for missing-field violations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
}

impl Violation {
    /// Create a violation; the message is derived from the rule
    pub fn new(loc: Vec<PathSeg>, rule: Rule) -> Self {
        let msg = rule.to_string();
        Self {
            rule,
            loc,
            msg,
            input: None,
        }
    }

    /// Attach the offending input value
    pub fn with_input(mut self, input: &Value) -> Self {
        self.input = Some(input.clone());
        self
    }
}

fn rule_code<S>(rule: &Rule, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(rule.code())
}
