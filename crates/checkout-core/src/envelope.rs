//! # Error Envelope
//!
//! The one stable JSON shape every validation failure is normalized into,
//! whatever stage produced it. No stack traces or internal detail leak
//! past this boundary.

use crate::error::{CheckoutError, Rule, Violation};
use serde::Serialize;

/// Envelope code shared by schema and invariant failures
pub const VALIDATION_ERROR_CODE: &str = "VALIDATION_ERROR";

/// Stable error response body:
/// `{"code": "VALIDATION_ERROR", "errors": [...]}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorEnvelope {
    /// Always `VALIDATION_ERROR`
    pub code: &'static str,

    /// Ordered violation records, never truncated
    pub errors: Vec<Violation>,
}

impl ErrorEnvelope {
    /// Wrap an ordered violation list in the envelope
    pub fn new(errors: Vec<Violation>) -> Self {
        Self {
            code: VALIDATION_ERROR_CODE,
            errors,
        }
    }
}

impl From<CheckoutError> for ErrorEnvelope {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::Schema(violations) => Self::new(violations),
            CheckoutError::TotalMismatch { declared, computed } => Self::new(vec![Violation::new(
                vec!["total_cents".into()],
                Rule::TotalMismatch { declared, computed },
            )]),
        }
    }
}
