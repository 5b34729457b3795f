//! # Order Aggregate
//!
//! An order is an insertion-ordered, name-unique collection of
//! `(LineItem, quantity)` lines plus the rules that price it.
//!
//! ## Order Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Operations                                     │
//! │                                                                         │
//! │  add_item(item, qty) ───► name known?  ── yes ─► replace item, qty += n │
//! │                                         └─ no ──► append line           │
//! │                                                                         │
//! │  remove_item(name, qty) ► qty >= stored ─► drop line                    │
//! │                           otherwise ─────► stored -= qty                │
//! │                                                                         │
//! │  calculate_total() ─────► lines ─► bundling ─► subtotal                 │
//! │                                               ├─► discount (> 50.00)    │
//! │                                               ├─► tax (19%)             │
//! │                                               └─► total                 │
//! │                                                                         │
//! │  iter_items() ──────────► snapshot of lines (unaffected by later edits) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Storage
//! Lines live in a `Vec` (iteration order) with a `HashMap` from name to
//! position, so lookups on add/remove do not scan the lines.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::line_item::LineItem;
use crate::money::Money;
use crate::receipt::Invoice;
use crate::types::{LineSummary, OrderTotals, Rate};
use crate::validation::{validate_quantity, ValidationResult};

// =============================================================================
// Pricing Policy
// =============================================================================

/// Order-level pricing rates.
///
/// The default is the house policy; it is the only one the application
/// uses, other values exist for what-if pricing in tests and tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Multiplier applied to every beverage line when the order contains a
    /// main dish.
    pub bundling_rate: Rate,
    /// Discount rate applied to the subtotal once it passes the threshold.
    pub discount_rate: Rate,
    /// Subtotal must be strictly greater than this for the discount.
    pub discount_threshold: Money,
    /// Tax rate, always applied to the pre-discount subtotal.
    pub tax_rate: Rate,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy {
            bundling_rate: Rate::from_bps(9_500),
            discount_rate: Rate::from_bps(1_000),
            discount_threshold: Money::from_cents(5_000),
            tax_rate: Rate::from_bps(1_900),
        }
    }
}

// =============================================================================
// Order Line
// =============================================================================

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item: LineItem,
    pub quantity: i64,
}

impl OrderLine {
    fn summary(&self) -> LineSummary {
        LineSummary {
            name: self.item.name().to_string(),
            unit_price: self.item.unit_price(),
            quantity: self.quantity,
            // Order::add_item keeps every line total in range.
            line_total: self.item.adjusted_total(self.quantity).unwrap_or_default(),
            category: self.item.category(),
            subtype: self.item.subtype_str().to_string(),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A customer order.
///
/// ## Invariants
/// - Lines are unique by item name
/// - Every stored quantity is > 0
/// - `index[name]` is the position of that name in `lines`
#[derive(Debug, Clone)]
pub struct Order {
    id: Uuid,
    created_at: DateTime<Utc>,
    lines: Vec<OrderLine>,
    index: HashMap<String, usize>,
}

impl Order {
    /// Creates a new empty order.
    pub fn new() -> Self {
        Order {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            lines: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Adds an item or increases its quantity if the name is already present.
    ///
    /// ## Behavior
    /// - Name already in order: the stored item is replaced by `item`
    ///   (last write wins) and the quantities are summed
    /// - Name not in order: a new line is appended
    ///
    /// Fails with `MustBePositive` when `quantity <= 0` and with
    /// `OutOfRange` when the line quantity or the order totals would no
    /// longer fit; the order is unchanged in both cases.
    pub fn add_item(&mut self, item: LineItem, quantity: i64) -> ValidationResult<()> {
        let quantity = validate_quantity(quantity)?;

        if let Some(&pos) = self.index.get(item.name()) {
            let merged = self.lines[pos]
                .quantity
                .checked_add(quantity)
                .ok_or_else(|| ValidationError::too_large("quantity"))?;
            let previous = std::mem::replace(
                &mut self.lines[pos],
                OrderLine {
                    item,
                    quantity: merged,
                },
            );
            if self.checked_totals(&PricingPolicy::default()).is_none() {
                self.lines[pos] = previous;
                return Err(ValidationError::too_large("quantity"));
            }
            let line = &self.lines[pos];
            debug!(order_id = %self.id, item = %line.item.name(), quantity = line.quantity, "Order line increased");
            return Ok(());
        }

        self.lines.push(OrderLine { item, quantity });
        if self.checked_totals(&PricingPolicy::default()).is_none() {
            self.lines.pop();
            return Err(ValidationError::too_large("quantity"));
        }
        let pos = self.lines.len() - 1;
        let name = self.lines[pos].item.name().to_string();
        debug!(order_id = %self.id, item = %name, quantity, "Order line added");
        self.index.insert(name, pos);
        Ok(())
    }

    /// Removes `quantity` units of the named item.
    ///
    /// ## Behavior
    /// - `quantity >= stored`: the whole line is removed
    /// - otherwise: the stored quantity is decremented
    /// - name not in order: `NotFound`
    pub fn remove_item(&mut self, name: &str, quantity: i64) -> ValidationResult<()> {
        let quantity = validate_quantity(quantity)?;
        let pos = *self
            .index
            .get(name)
            .ok_or_else(|| ValidationError::not_found("order line", name))?;

        if quantity >= self.lines[pos].quantity {
            self.lines.remove(pos);
            self.reindex();
            debug!(order_id = %self.id, item = %name, "Order line removed");
        } else {
            self.lines[pos].quantity -= quantity;
            debug!(order_id = %self.id, item = %name, quantity = self.lines[pos].quantity, "Order line decreased");
        }

        Ok(())
    }

    fn reindex(&mut self) {
        self.index = self
            .lines
            .iter()
            .enumerate()
            .map(|(pos, line)| (line.item.name().to_string(), pos))
            .collect();
    }

    /// True iff any line is a main-course dish.
    pub fn has_main_dish(&self) -> bool {
        self.lines.iter().any(|line| line.item.is_main_dish())
    }

    /// Computes subtotal, discount, tax and total with the house policy.
    pub fn calculate_total(&self) -> OrderTotals {
        // add_item rejects any change that would take these out of range.
        self.checked_totals(&PricingPolicy::default())
            .unwrap_or_default()
    }

    /// Computes the order totals with an explicit policy.
    ///
    /// ## Steps
    /// 1. Each line: `price_for_quantity(qty)`
    /// 2. If the order has a main dish, beverage lines × `bundling_rate`
    /// 3. Subtotal = sum of adjusted lines
    /// 4. Discount = subtotal × `discount_rate` if subtotal > threshold
    /// 5. Tax = subtotal × `tax_rate` (pre-discount)
    /// 6. Total = subtotal - discount + tax
    ///
    /// ## Errors
    /// `OutOfRange` when a policy rate pushes an amount past `i64` cents.
    pub fn calculate_total_with(&self, policy: &PricingPolicy) -> ValidationResult<OrderTotals> {
        self.checked_totals(policy)
            .ok_or_else(|| ValidationError::too_large("order total"))
    }

    fn checked_totals(&self, policy: &PricingPolicy) -> Option<OrderTotals> {
        let bundled = self.has_main_dish();

        let mut subtotal = Money::zero();
        for line in &self.lines {
            let mut price = line.item.adjusted_total(line.quantity)?;
            if bundled && line.item.is_beverage() {
                price = price.checked_apply_rate(policy.bundling_rate)?;
            }
            subtotal = subtotal.checked_add(price)?;
        }

        let discount = if subtotal > policy.discount_threshold {
            subtotal.checked_apply_rate(policy.discount_rate)?
        } else {
            Money::zero()
        };
        let tax = subtotal.checked_apply_rate(policy.tax_rate)?;

        Some(OrderTotals {
            subtotal,
            discount,
            tax,
            total: subtotal.checked_sub(discount)?.checked_add(tax)?,
        })
    }

    /// Returns a snapshot of the lines for iteration.
    ///
    /// The snapshot owns a copy of the lines, so it can be iterated any
    /// number of times and is not affected by later changes to the order.
    pub fn iter_items(&self) -> ItemsSnapshot {
        ItemsSnapshot {
            lines: self.lines.clone(),
        }
    }

    /// Returns an owned copy of the lines.
    pub fn items(&self) -> Vec<OrderLine> {
        self.lines.clone()
    }

    /// Stored quantity for `name`, if the order has that line.
    pub fn quantity_of(&self, name: &str) -> Option<i64> {
        self.index.get(name).map(|&pos| self.lines[pos].quantity)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line quantities, saturating at `i64::MAX`.
    pub fn total_quantity(&self) -> i64 {
        self.lines
            .iter()
            .fold(0i64, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Builds the printable invoice for this order.
    pub fn invoice(&self) -> Invoice {
        let policy = PricingPolicy::default();
        Invoice::new(
            self.iter_items().iter().collect(),
            self.calculate_total(),
            &policy,
        )
    }
}

impl Default for Order {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Items Snapshot
// =============================================================================

/// Point-in-time copy of an order's lines.
///
/// Summaries are computed lazily while iterating.
#[derive(Debug, Clone)]
pub struct ItemsSnapshot {
    lines: Vec<OrderLine>,
}

impl ItemsSnapshot {
    /// Iterates the summaries from the first line. Can be called repeatedly.
    pub fn iter(&self) -> impl Iterator<Item = LineSummary> + '_ {
        self.lines.iter().map(OrderLine::summary)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl IntoIterator for ItemsSnapshot {
    type Item = LineSummary;
    type IntoIter = std::iter::Map<std::vec::IntoIter<OrderLine>, fn(OrderLine) -> LineSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines
            .into_iter()
            .map(into_summary as fn(OrderLine) -> LineSummary)
    }
}

fn into_summary(line: OrderLine) -> LineSummary {
    line.summary()
}

// =============================================================================
// Unit Tests
// =============================================================================
