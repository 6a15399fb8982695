//! # Validation Module
//!
//! Field-level validation rules, applied by the ledger store before any
//! persistence attempt and by the ticket while staging lines.
//!
//! Presentation-layer niceties (trimming as-you-type, range widgets) are a
//! collaborator concern; what lives here is the floor the store itself
//! enforces: a product record must carry a non-empty name, non-negative
//! prices and a sane quantity, and a sale line quantity must be positive.

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::NewProduct;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length accepted for product names and codes.
pub const MAX_TEXT_LEN: usize = 200;

/// Validates a product name.
///
/// ```rust
/// use mercadito_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Pan Amasado").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_TEXT_LEN,
        });
    }

    Ok(())
}

/// Validates a price. Zero is allowed (giveaway items); negative is not.
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a stock quantity as entered on a product record.
///
/// Zero is fine (out of stock); NaN and infinities are not. Negative input
/// is rejected here — stock only goes negative through reconciliation,
/// never through data entry.
pub fn validate_stock_quantity(quantity: f64) -> ValidationResult<()> {
    if !quantity.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "quantity".to_string(),
        });
    }

    if quantity < 0.0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a quantity being sold: strictly positive and finite.
pub fn validate_sale_quantity(quantity: f64) -> ValidationResult<()> {
    if !quantity.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "quantity".to_string(),
        });
    }

    if quantity <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a complete product record before insert/update.
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<()> {
    validate_product_name(&product.name)?;

    if let Some(code) = &product.code {
        if code.len() > MAX_TEXT_LEN {
            return Err(ValidationError::TooLong {
                field: "code".to_string(),
                max: MAX_TEXT_LEN,
            });
        }
    }

    validate_price("purchase price", product.purchase_price)?;
    validate_price("sale price", product.sale_price)?;
    validate_stock_quantity(product.quantity)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewProduct {
        NewProduct {
            name: "Leche Entera 1L".to_string(),
            code: Some("7802900000011".to_string()),
            purchase_price: Money::from_units(850),
            sale_price: Money::from_units(1200),
            quantity: 24.0,
        }
    }

    #[test]
    fn valid_product_passes() {
        assert!(validate_new_product(&sample()).is_ok());
    }

    #[test]
    fn name_required() {
        let mut p = sample();
        p.name = "  ".to_string();
        assert!(matches!(
            validate_new_product(&p),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn prices_must_not_be_negative() {
        let mut p = sample();
        p.sale_price = Money::from_units(-1);
        assert!(matches!(
            validate_new_product(&p),
            Err(ValidationError::Negative { .. })
        ));

        // zero is a legal price
        let mut p = sample();
        p.sale_price = Money::zero();
        assert!(validate_new_product(&p).is_ok());
    }

    #[test]
    fn stock_quantity_bounds() {
        assert!(validate_stock_quantity(0.0).is_ok());
        assert!(validate_stock_quantity(2.5).is_ok());
        assert!(validate_stock_quantity(-1.0).is_err());
        assert!(validate_stock_quantity(f64::NAN).is_err());
        assert!(validate_stock_quantity(f64::INFINITY).is_err());
    }

    #[test]
    fn sale_quantity_strictly_positive() {
        assert!(validate_sale_quantity(0.25).is_ok());
        assert!(validate_sale_quantity(0.0).is_err());
        assert!(validate_sale_quantity(-2.0).is_err());
        assert!(validate_sale_quantity(f64::NAN).is_err());
    }
}
