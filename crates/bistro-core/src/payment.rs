//! # Payment Transactions
//!
//! Simulated settlement of an order's total.
//!
//! ## Settlement Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  PaymentTransaction::new(&order, method)                                │
//! │       │  amount = order.calculate_total().total   (captured once)       │
//! │       ▼                                                                 │
//! │  status: Pending                                                        │
//! │       │                                                                 │
//! │       │  process_payment(&mut source)                                   │
//! │       │      draw = source.draw()          ∈ [0, 1)                     │
//! │       │      draw > failure_rate ?                                      │
//! │       ▼                                                                 │
//! │  Completed (true)  |  Failed (false)                                    │
//! │                                                                         │
//! │  Calling process_payment again draws again and may flip the status.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Randomness never comes from a global: callers pass a [`SettlementSource`].
//! Tests use [`FixedSettlement`] or a closure, the CLI uses
//! [`SeededSettlement`] or [`ThreadSettlement`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::money::Money;
use crate::order::Order;
use crate::receipt::PaymentReceipt;
use crate::types::{PaymentMethod, PaymentStatus};
use crate::validation::{validate_probability, ValidationResult};

/// Nominal probability that a settlement succeeds.
pub const DEFAULT_SUCCESS_RATE: f64 = 0.9;

/// Draws at or below this value fail. Kept as its own literal since
/// `1.0 - DEFAULT_SUCCESS_RATE` lands just under 0.1 in `f64`.
pub const DEFAULT_FAILURE_RATE: f64 = 0.1;

/// Failure rates are kept to nine decimals.
const RATE_SCALE: f64 = 1e9;

// =============================================================================
// Settlement Sources
// =============================================================================

/// Supplies the pseudo-random value a settlement is decided on.
pub trait SettlementSource {
    /// Returns a value in `[0, 1)`.
    fn draw(&mut self) -> f64;
}

/// Any `FnMut() -> f64` closure is a source.
impl<F> SettlementSource for F
where
    F: FnMut() -> f64,
{
    fn draw(&mut self) -> f64 {
        self()
    }
}

/// Always returns the same value.
#[derive(Debug, Clone, Copy)]
pub struct FixedSettlement(pub f64);

impl SettlementSource for FixedSettlement {
    fn draw(&mut self) -> f64 {
        self.0
    }
}

/// Reproducible source backed by a seeded `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededSettlement {
    rng: StdRng,
}

impl SeededSettlement {
    pub fn new(seed: u64) -> Self {
        SeededSettlement {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl SettlementSource for SeededSettlement {
    fn draw(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Non-reproducible source backed by the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSettlement;

impl SettlementSource for ThreadSettlement {
    fn draw(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

// =============================================================================
// Payment Transaction
// =============================================================================

/// A payment for one order.
///
/// Borrows the order: the order must outlive the transaction and cannot be
/// edited while the transaction exists. The amount is captured at
/// construction and never recomputed.
#[derive(Debug, Clone)]
pub struct PaymentTransaction<'a> {
    order: &'a Order,
    method: PaymentMethod,
    amount: Money,
    status: PaymentStatus,
    failure_rate: f64,
}

impl<'a> PaymentTransaction<'a> {
    /// Creates a pending transaction for the order's current total.
    /// An empty order yields an amount of zero.
    pub fn new(order: &'a Order, method: PaymentMethod) -> Self {
        PaymentTransaction {
            order,
            method,
            amount: order.calculate_total().total,
            status: PaymentStatus::Pending,
            failure_rate: DEFAULT_FAILURE_RATE,
        }
    }

    /// Same as [`new`](Self::new), parsing the method case-insensitively
    /// (`"card"`, `"Tarjeta"`, ...).
    pub fn with_method_name(order: &'a Order, method: &str) -> ValidationResult<Self> {
        let method = method.parse::<PaymentMethod>()?;
        Ok(Self::new(order, method))
    }

    /// Overrides the nominal success probability (`[0, 1]`).
    pub fn with_success_rate(mut self, rate: f64) -> ValidationResult<Self> {
        let rate = validate_probability("payment success rate", rate)?;
        self.failure_rate = ((1.0 - rate) * RATE_SCALE).round() / RATE_SCALE;
        Ok(self)
    }

    pub fn order(&self) -> &Order {
        self.order
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    /// Attempts settlement with one draw from `source`.
    ///
    /// Returns `true` and moves to `Completed` when the draw is above the
    /// failure rate, otherwise moves to `Failed` and returns `false`.
    /// There is no guard against calling it again.
    pub fn process_payment<S>(&mut self, source: &mut S) -> bool
    where
        S: SettlementSource + ?Sized,
    {
        let draw = source.draw();
        let settled = draw > self.failure_rate;

        self.status = if settled {
            PaymentStatus::Completed
        } else {
            PaymentStatus::Failed
        };

        info!(
            order_id = %self.order.id(),
            method = %self.method,
            amount = %self.amount,
            status = %self.status,
            "Payment processed"
        );

        settled
    }

    /// Builds the customer receipt for the current status.
    pub fn receipt(&self) -> PaymentReceipt {
        PaymentReceipt::new(self.method, self.amount, self.status)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::line_item::LineItem;

    fn sample_order() -> Order {
        let mut order = Order::new();
        order
            .add_item(LineItem::beverage("Refresco", Money::from_cents(250), "mediano").unwrap(), 2)
            .unwrap();
        order
            .add_item(LineItem::dish("Pizza", Money::from_cents(1200), "principal").unwrap(), 1)
            .unwrap();
        order
    }

    #[test]
    fn test_new_captures_total_and_is_pending() {
        let order = sample_order();
        let payment = PaymentTransaction::new(&order, PaymentMethod::Card);

        assert_eq!(payment.amount(), Money::from_cents(1850));
        assert_eq!(payment.status(), PaymentStatus::Pending);
        assert_eq!(payment.method(), PaymentMethod::Card);
        assert_eq!(payment.order().id(), order.id());
    }

    #[test]
    fn test_method_name_parsing() {
        let order = sample_order();
        let payment = PaymentTransaction::with_method_name(&order, "TARJETA").unwrap();
        assert_eq!(payment.method(), PaymentMethod::Card);

        assert!(matches!(
            PaymentTransaction::with_method_name(&order, "bitcoin"),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_empty_order_pays_zero() {
        let order = Order::new();
        let mut payment = PaymentTransaction::new(&order, PaymentMethod::Cash);

        assert_eq!(payment.amount(), Money::zero());
        assert_eq!(payment.status(), PaymentStatus::Pending);
        assert!(payment.process_payment(&mut FixedSettlement(0.5)));
        assert_eq!(payment.receipt().amount, Money::zero());
    }

    #[test]
    fn test_fixed_draws_decide_outcome() {
        let order = sample_order();

        let mut payment = PaymentTransaction::new(&order, PaymentMethod::Cash);
        assert!(payment.process_payment(&mut FixedSettlement(0.5)));
        assert_eq!(payment.status(), PaymentStatus::Completed);

        let mut payment = PaymentTransaction::new(&order, PaymentMethod::Cash);
        assert!(!payment.process_payment(&mut FixedSettlement(0.05)));
        assert_eq!(payment.status(), PaymentStatus::Failed);
    }

    #[test]
    fn test_draw_at_failure_rate_fails() {
        let order = sample_order();

        let mut payment = PaymentTransaction::new(&order, PaymentMethod::Cash);
        assert!(!payment.process_payment(&mut FixedSettlement(0.1)));
        assert!(payment.process_payment(&mut FixedSettlement(0.100_000_1)));

        let mut payment = PaymentTransaction::new(&order, PaymentMethod::Cash)
            .with_success_rate(DEFAULT_SUCCESS_RATE)
            .unwrap();
        assert!(!payment.process_payment(&mut FixedSettlement(0.1)));

        let mut payment = PaymentTransaction::new(&order, PaymentMethod::Cash)
            .with_success_rate(0.7)
            .unwrap();
        assert!(!payment.process_payment(&mut FixedSettlement(0.3)));
        assert!(payment.process_payment(&mut FixedSettlement(0.300_001)));
    }

    #[test]
    fn test_reprocessing_can_change_status() {
        let order = sample_order();
        let mut payment = PaymentTransaction::new(&order, PaymentMethod::Transfer);

        let mut draws = vec![0.01, 0.99].into_iter();
        let mut source = move || draws.next().unwrap_or(0.0);

        assert!(!payment.process_payment(&mut source));
        assert_eq!(payment.status(), PaymentStatus::Failed);
        assert!(payment.process_payment(&mut source));
        assert_eq!(payment.status(), PaymentStatus::Completed);
    }

    #[test]
    fn test_success_rate_override() {
        let order = sample_order();

        let mut always = PaymentTransaction::new(&order, PaymentMethod::Card)
            .with_success_rate(1.0)
            .unwrap();
        assert!(always.process_payment(&mut FixedSettlement(0.0001)));

        let mut never = PaymentTransaction::new(&order, PaymentMethod::Card)
            .with_success_rate(0.0)
            .unwrap();
        assert!(!never.process_payment(&mut FixedSettlement(0.9999)));

        assert!(PaymentTransaction::new(&order, PaymentMethod::Card)
            .with_success_rate(1.2)
            .is_err());
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let mut a = SeededSettlement::new(42);
        let mut b = SeededSettlement::new(42);
        for _ in 0..10 {
            let x = a.draw();
            assert_eq!(x, b.draw());
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_seeded_success_rate_is_near_nominal() {
        let order = sample_order();
        let mut payment = PaymentTransaction::new(&order, PaymentMethod::Card);
        let mut source = SeededSettlement::new(7);

        let successes = (0..10_000)
            .filter(|_| payment.process_payment(&mut source))
            .count();
        assert!((8_700..=9_300).contains(&successes), "{}", successes);
    }

    #[test]
    fn test_receipt_reflects_status() {
        let order = sample_order();
        let mut payment = PaymentTransaction::new(&order, PaymentMethod::Card);
        payment.process_payment(&mut FixedSettlement(0.95));

        let receipt = payment.receipt();
        assert_eq!(receipt.status, PaymentStatus::Completed);
        assert_eq!(receipt.amount, Money::from_cents(1850));
    }
}
