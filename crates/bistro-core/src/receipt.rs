//! # Invoice & Receipt Rendering
//!
//! Plain-text documents handed to the customer. Both types implement
//! `Display`; writing them anywhere is the caller's job.
//!
//! ## Invoice Layout
//! ```text
//! === INVOICE ===
//! 1. Refresco x2 - $5.00
//! 2. Pizza x1 - $10.80
//!
//! SUMMARY:
//! Subtotal: $15.55
//! Tax (19%): +$2.95          ← "Discount (10%): -$x" above it when > 0
//! TOTAL: $18.50
//! ===============
//! ```
//!
//! Line amounts are `price_for_quantity`, so they do not include the
//! beverage bundling discount; the subtotal does.

use serde::Serialize;
use std::fmt;

use crate::money::Money;
use crate::order::PricingPolicy;
use crate::types::{LineSummary, OrderTotals, PaymentMethod, PaymentStatus, Rate};

const DEFAULT_SYMBOL: &str = "$";

// =============================================================================
// Invoice
// =============================================================================

/// Itemized bill for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invoice {
    pub lines: Vec<LineSummary>,
    pub totals: OrderTotals,
    pub discount_rate: Rate,
    pub tax_rate: Rate,
    currency_symbol: String,
}

impl Invoice {
    pub fn new(lines: Vec<LineSummary>, totals: OrderTotals, policy: &PricingPolicy) -> Self {
        Invoice {
            lines,
            totals,
            discount_rate: policy.discount_rate,
            tax_rate: policy.tax_rate,
            currency_symbol: DEFAULT_SYMBOL.to_string(),
        }
    }

    /// Renders amounts with another currency symbol.
    pub fn with_currency(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    fn money(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol)
    }
}

impl fmt::Display for Invoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== INVOICE ===")?;
        for (i, line) in self.lines.iter().enumerate() {
            writeln!(
                f,
                "{}. {} x{} - {}",
                i + 1,
                line.name,
                line.quantity,
                self.money(line.line_total)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "SUMMARY:")?;
        writeln!(f, "Subtotal: {}", self.money(self.totals.subtotal))?;
        if self.totals.discount.is_positive() {
            writeln!(
                f,
                "Discount ({}): -{}",
                self.discount_rate,
                self.money(self.totals.discount)
            )?;
        }
        writeln!(f, "Tax ({}): +{}", self.tax_rate, self.money(self.totals.tax))?;
        writeln!(f, "TOTAL: {}", self.money(self.totals.total))?;
        write!(f, "===============")
    }
}

// =============================================================================
// Payment Receipt
// =============================================================================

/// Proof of a settlement attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentReceipt {
    pub method: PaymentMethod,
    pub amount: Money,
    pub status: PaymentStatus,
    currency_symbol: String,
}

impl PaymentReceipt {
    pub fn new(method: PaymentMethod, amount: Money, status: PaymentStatus) -> Self {
        PaymentReceipt {
            method,
            amount,
            status,
            currency_symbol: DEFAULT_SYMBOL.to_string(),
        }
    }

    pub fn with_currency(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }
}

impl fmt::Display for PaymentReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--PAYMENT RECEIPT--")?;
        writeln!(f, "Payment method: {}", self.method)?;
        writeln!(f, "Total paid: {}", self.amount.format_with(&self.currency_symbol))?;
        writeln!(f, "Status: {}", self.status)?;
        match self.status {
            PaymentStatus::Completed => write!(f, "Thank you for your purchase!"),
            _ => write!(f, "Please try again"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
