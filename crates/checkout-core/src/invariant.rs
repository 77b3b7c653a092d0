//! # Total Invariant
//!
//! Cross-field business rule: the declared order total must equal the sum
//! of line-item subtotals. Checked only after schema validation passes.

use crate::checkout::CheckoutRequest;
use crate::error::{CheckoutError, CheckoutResult};

/// Verify that `total_cents` equals the computed sum of item subtotals.
///
/// Integer arithmetic only; the sum is carried in `i128` so the comparison
/// itself cannot overflow for any input the validator accepts.
pub fn verify_total(request: &CheckoutRequest) -> CheckoutResult<()> {
    let computed = request.computed_total_cents();
    if i128::from(request.total_cents) == computed {
        Ok(())
    } else {
        Err(CheckoutError::TotalMismatch {
            declared: request.total_cents,
            computed,
        })
    }
}
