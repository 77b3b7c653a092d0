//! # checkout-core
//!
//! Core types and validation for the checkout-gate acceptance API.
//!
//! This crate provides:
//! - `CheckoutRequest`, `LineItem`, and `Address` typed request records
//! - `validate_checkout` for structural validation of raw JSON input
//! - `verify_total` for the declared-vs-computed total invariant
//! - `CheckoutError` and `Violation` for typed error handling
//! - `ErrorEnvelope` for the stable error response shape
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{validate_checkout, verify_total, ErrorEnvelope};
//!
//! // Decode the request body, then run both gates
//! let raw: serde_json::Value = serde_json::from_slice(&body)?;
//! let request = validate_checkout(&raw)?;
//! verify_total(&request)?;
//!
//! // Any failure normalizes to the one envelope shape
//! let envelope = ErrorEnvelope::from(err);
//! ```

pub mod checkout;
pub mod envelope;
pub mod error;
pub mod invariant;
pub mod validate;

// Re-exports for convenience
pub use checkout::{Address, CheckoutRequest, LineItem};
pub use envelope::{ErrorEnvelope, VALIDATION_ERROR_CODE};
pub use error::{CheckoutError, CheckoutResult, PathSeg, Rule, Violation};
pub use invariant::verify_total;
pub use validate::validate_checkout;
