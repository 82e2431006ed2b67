//! Validation utilities for the Inventory & Order Management Platform

use rust_decimal::Decimal;

/// Validate an order quantity (must be strictly positive)
pub fn validate_order_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Quantity must be positive");
    }
    Ok(())
}

/// Validate a price (must be strictly positive)
pub fn validate_price(price: Decimal) -> Result<(), &'static str> {
    if price <= Decimal::ZERO {
        return Err("Price must be positive");
    }
    Ok(())
}

/// Validate a product's minimum-stock threshold (zero allowed)
pub fn validate_minimum_stock(minimum_stock: i32) -> Result<(), &'static str> {
    if minimum_stock < 0 {
        return Err("Minimum stock cannot be negative");
    }
    Ok(())
}

/// Validate a batch quantity (zero allowed; batches drain to zero and stay)
pub fn validate_batch_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity < 0 {
        return Err("Batch quantity cannot be negative");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_quantity() {
        assert!(validate_order_quantity(1).is_ok());
        assert!(validate_order_quantity(0).is_err());
        assert!(validate_order_quantity(-3).is_err());
    }

    #[test]
    fn test_price() {
        assert!(validate_price(Decimal::from(10)).is_ok());
        assert!(validate_price(Decimal::ZERO).is_err());
    }

    #[test]
    fn test_batch_quantity_zero_allowed() {
        assert!(validate_batch_quantity(0).is_ok());
        assert!(validate_batch_quantity(-1).is_err());
    }
}
