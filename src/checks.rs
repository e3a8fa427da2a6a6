//! Argument validation primitives
//!
//! Each check returns an error naming the offending argument so callers can
//! propagate it with `?`.

use anyhow::{ensure, Result};

/// Fails when `number` is negative
pub fn is_positive(number: f64, name: &str) -> Result<()> {
    ensure!(number >= 0.0, "{} must be non-negative (got {})!", name, number);
    Ok(())
}

/// Fails when `number` has a fractional part (or is not finite)
pub fn is_integer(number: f64, name: &str) -> Result<()> {
    ensure!(
        number.is_finite() && number.fract() == 0.0,
        "{} must be an integer (got {})!",
        name,
        number
    );
    Ok(())
}

/// Fails when `number` is zero
pub fn is_non_zero(number: f64, name: &str) -> Result<()> {
    ensure!(number != 0.0, "{} must be non-zero!", name);
    Ok(())
}
