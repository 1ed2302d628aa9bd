//! Custom field validators used by the request payloads

use rust_decimal::Decimal;
use validator::ValidationError;

/// Required text must contain something besides whitespace
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("must not be empty".into());
        return Err(error);
    }
    Ok(())
}

/// Upper bound (exclusive) of a `NUMERIC(18,2)` amount
const CURRENCY_LIMIT: i64 = 10_000_000_000_000_000;

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Amount that fits a `NUMERIC(18,2)` column without rounding: not
/// negative, at most two decimal places, below 10^16
pub fn currency(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(invalid("range", "must not be negative"));
    }
    if value.normalize().scale() > 2 {
        return Err(invalid("scale", "must have at most 2 decimal places"));
    }
    if value.abs() >= Decimal::from(CURRENCY_LIMIT) {
        return Err(invalid("range", "must be less than 10000000000000000"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Dune").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank(" \t").is_err());
    }

    #[test]
    fn test_currency_sign() {
        assert!(currency(&Decimal::new(2500, 2)).is_ok());
        assert!(currency(&Decimal::ZERO).is_ok());
        assert!(currency(&Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn test_currency_scale() {
        assert!(currency(&Decimal::new(25005, 3)).is_err());
        // Trailing zeros do not count
        assert!(currency(&Decimal::new(25500, 3)).is_ok());
        assert!(currency(&Decimal::new(25, 0)).is_ok());
    }

    #[test]
    fn test_currency_magnitude() {
        let limit = Decimal::from(CURRENCY_LIMIT);
        assert!(currency(&limit).is_err());
        assert!(currency(&Decimal::from(100_000_000_000_000_000_i64)).is_err());
        assert!(currency(&(limit - Decimal::new(1, 2))).is_ok());
    }
}
