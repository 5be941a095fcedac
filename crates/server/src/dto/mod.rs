//! Request and response data transfer objects.

pub mod auth;
pub mod companies;
pub mod materials;
pub mod orders;
pub mod products;
pub mod users;

use rust_decimal::Decimal;
use validator::ValidationError;

/// Shared custom validator: monetary amounts cannot be negative.
pub fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        let mut err = ValidationError::new("negative_amount");
        err.message = Some("Price must be at least 0".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative(&Decimal::new(4599, 2)).is_ok());
        assert!(validate_non_negative(&Decimal::new(-1, 2)).is_err());
    }
}
