//! # Error Types
//!
//! Domain-specific error types for bistro-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bistro-core errors (this file)                                        │
//! │  ├── ValidationError  - Every pricing/order/payment failure            │
//! │  └── CoreError        - ValidationError + storage port failures        │
//! │                                                                         │
//! │  bistro-store errors (separate crate)                                  │
//! │  └── StoreError       - File / JSON failures, mapped into CoreError    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → exit code              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, value, item name)
//! 3. Errors are enum variants, never String
//! 4. Failures are raised before any state is mutated

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// This is the single error kind raised by line items, orders and payment
/// transactions. It is returned synchronously to the immediate caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: String, max: String },

    /// Invalid format (e.g., non-finite price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in the allowed set.
    ///
    /// ## When This Occurs
    /// - Beverage size "jumbo"
    /// - Course type "brunch"
    /// - Payment method "cheque"
    #[error("{field} '{value}' is not valid, options: {}", .allowed.join(", "))]
    NotAllowed {
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    /// Duplicate value (e.g., menu item name already in the catalog).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// The referenced entity does not exist.
    ///
    /// ## When This Occurs
    /// - Removing a line that is not in the order
    /// - Ordering a name that is not on the menu
    /// - Addressing an order id that is not queued
    #[error("{entity} not found: {name}")]
    NotFound { entity: String, name: String },
}

impl ValidationError {
    /// Creates a Required error for a field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates a NotFound error for a given entity type and name.
    pub fn not_found(entity: impl Into<String>, name: impl Into<String>) -> Self {
        ValidationError::NotFound {
            entity: entity.into(),
            name: name.into(),
        }
    }

    /// Creates an OutOfRange error for a value whose amount in cents would
    /// not fit in an `i64`.
    pub fn too_large(field: impl Into<String>) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min: "1".to_string(),
            max: i64::MAX.to_string(),
        }
    }

    /// Creates a NotAllowed error listing the accepted values.
    pub fn not_allowed(field: impl Into<String>, value: impl Into<String>, allowed: &[&str]) -> Self {
        ValidationError::NotAllowed {
            field: field.into(),
            value: value.into(),
            allowed: allowed.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Errors returned across the menu storage port.
///
/// The catalog is the only core component that talks to a collaborator which
/// can fail for reasons other than bad input, so it reports `CoreError`.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The storage backend failed to load or save the menu snapshot.
    #[error("Storage error: {0}")]
    Storage(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
