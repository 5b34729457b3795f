//! # Validation Module
//!
//! Input validation utilities for Bistro.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Validation Happens                           │
//! │                                                                         │
//! │  Boundary (CLI args, menu snapshot)                                    │
//! │  ├── Decimal prices → validate_price_decimal                           │
//! │  └── Enum tokens → FromStr (types.rs)                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Construction (LineItem, MenuItemEntry, PaymentTransaction)            │
//! │  ├── THIS MODULE: names, prices, quantities, rates                     │
//! │  └── Fails fast, before any state is touched                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Mutation (Order::add_item / remove_item)                              │
//! │  └── Quantity re-checked, no partial updates                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bistro_core::validation::{validate_item_name, validate_quantity};
//!
//! assert_eq!(validate_item_name("  Refresco ").unwrap(), "Refresco");
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a menu item / line item name.
///
/// ## Rules
/// - Surrounding whitespace is trimmed
/// - Must not be empty after trimming
///
/// ## Returns
/// The trimmed name.
pub fn validate_item_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    Ok(name.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Order: Add Item                                                        │
/// │                                                                         │
/// │  Waiter enters quantity: 2                                              │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(2) ← THIS FUNCTION                                   │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "quantity must be positive"                │
/// │       │                                                                 │
/// │       └── OK → Proceed with add_item / price_for_quantity               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<i64> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(qty)
}

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (complimentary items)
pub fn validate_price(price: Money) -> ValidationResult<Money> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: "0".to_string(),
            max: "unbounded".to_string(),
        });
    }

    Ok(price)
}

/// Validates a decimal price and converts it to Money, rounded to the cent.
///
/// ## Example
/// ```rust
/// use bistro_core::validation::validate_price_decimal;
///
/// assert_eq!(validate_price_decimal(2.5).unwrap().cents(), 250);
/// assert!(validate_price_decimal(-0.5).is_err());
/// assert!(validate_price_decimal(f64::NAN).is_err());
/// ```
pub fn validate_price_decimal(amount: f64) -> ValidationResult<Money> {
    let money = Money::from_decimal(amount).ok_or_else(|| ValidationError::InvalidFormat {
        field: "price".to_string(),
        reason: format!("{} is not a representable amount", amount),
    })?;

    validate_price(money)
}

/// Validates a probability in `[0, 1]` (payment success rate).
pub fn validate_probability(field: &str, value: f64) -> ValidationResult<f64> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: "0".to_string(),
            max: "1".to_string(),
        });
    }

    Ok(value)
}

// =============================================================================
// Unit Tests
// =============================================================================
