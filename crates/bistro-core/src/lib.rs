//! # bistro-core: Pure Business Logic for Bistro
//!
//! This crate is the **heart** of Bistro. It contains the menu model, the
//! order aggregate, the pricing and invoicing rules and the simulated
//! payment settlement, all with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bistro Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    bistro-cli (app)                             │   │
//! │  │    menu ──► order ──► invoice ──► pay ──► receipt              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bistro-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ line_item │  │   order   │  │  payment  │  │  catalog  │  │   │
//! │  │   │ Beverage  │  │  Order    │  │ Payment-  │  │ MenuStor- │  │   │
//! │  │   │ Dish      │  │  Totals   │  │ Trans-    │  │ age port  │  │   │
//! │  │   │ Dessert   │  │  Invoice  │  │ action    │  │ Catalog   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO GLOBAL RNG • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │ MenuStorage trait                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 bistro-store (JSON snapshot)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Enumerations, rates, catalog entries and totals
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//! - [`line_item`] - Typed order line items and per-category pricing
//! - [`order`] - The order aggregate and total computation
//! - [`payment`] - Payment transactions and settlement sources
//! - [`catalog`] - Menu catalog behind a storage port
//! - [`dispatcher`] - FIFO queue of pending orders
//! - [`receipt`] - Invoice and payment receipt rendering
//!
//! ## Example Usage
//!
//! ```rust
//! use bistro_core::line_item::LineItem;
//! use bistro_core::money::Money;
//! use bistro_core::order::Order;
//!
//! let mut order = Order::new();
//! order
//!     .add_item(LineItem::beverage("Refresco", Money::from_cents(250), "mediano").unwrap(), 2)
//!     .unwrap();
//! order
//!     .add_item(LineItem::dish("Pizza", Money::from_cents(1200), "principal").unwrap(), 1)
//!     .unwrap();
//!
//! let totals = order.calculate_total();
//! assert_eq!(totals.subtotal.cents(), 1555);
//! assert_eq!(totals.tax.cents(), 295);
//! assert_eq!(totals.total.cents(), 1850);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod dispatcher;
pub mod error;
pub mod line_item;
pub mod money;
pub mod order;
pub mod payment;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{InMemoryStorage, MenuCatalog, MenuSnapshot, MenuStorage};
pub use dispatcher::OrderDispatcher;
pub use error::{CoreError, CoreResult, ValidationError};
pub use line_item::LineItem;
pub use money::Money;
pub use order::{Order, PricingPolicy};
pub use payment::{
    FixedSettlement, PaymentTransaction, SeededSettlement, SettlementSource, ThreadSettlement,
};
pub use receipt::{Invoice, PaymentReceipt};
pub use types::*;
