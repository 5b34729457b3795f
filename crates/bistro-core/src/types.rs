//! # Domain Types
//!
//! Core value types used throughout Bistro.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  MenuItemEntry  │   │   OrderTotals   │   │  LineSummary    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name (key)     │   │  subtotal       │   │  name, qty      │       │
//! │  │  price          │   │  discount       │   │  unit_price     │       │
//! │  │  category       │   │  tax            │   │  line_total     │       │
//! │  │  subtype        │   │  total          │   │  category/sub   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌───────────┐ ┌──────────────┐ ┌────────────┐ ┌─────────────┐        │
//! │  │ Category  │ │ BeverageSize │ │ CourseType │ │ DessertKind │        │
//! │  │ beverage  │ │ small        │ │ starter    │ │ dessert     │        │
//! │  │ dish      │ │ medium       │ │ main       │ │ special     │        │
//! │  │ dessert   │ │ large        │ │ side       │ └─────────────┘        │
//! │  └───────────┘ └──────────────┘ └────────────┘                         │
//! │                                                                         │
//! │  ┌───────────────┐ ┌───────────────┐ ┌──────────────────┐              │
//! │  │ PaymentMethod │ │ PaymentStatus │ │ Rate (bps)       │              │
//! │  │ cash          │ │ pending       │ │ 1900 = 19%       │              │
//! │  │ card          │ │ completed     │ │ 9500 = × 0.95    │              │
//! │  │ transfer      │ │ failed        │ └──────────────────┘              │
//! │  └───────────────┘ └───────────────┘                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Parsing Enumerations
//! Every enumeration parses case-insensitively after trimming, and accepts
//! both the canonical English token and the Spanish token found in existing
//! menu files (`"GRANDE"` → [`BeverageSize::Large`]). The parsed variant is
//! the normalized value; `as_str()` returns the canonical token.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{validate_item_name, validate_price, ValidationResult};

// =============================================================================
// Rate
// =============================================================================

/// A multiplier represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1900 bps = 19% (tax), 9500 bps = × 0.95 (large beverage)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// The identity multiplier (× 1.0).
    #[inline]
    pub const fn one() -> Self {
        Rate(10_000)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}%", self.0 / 100)
        } else {
            write!(f, "{}%", self.percentage())
        }
    }
}

// =============================================================================
// Enumeration Parsing
// =============================================================================

/// Matches a raw token against `(variant, aliases)` pairs.
///
/// The first alias of each pair is the canonical token reported back in
/// error messages.
fn parse_choice<T: Copy>(
    field: &str,
    raw: &str,
    choices: &[(T, &[&str])],
) -> ValidationResult<T> {
    let needle = raw.trim().to_lowercase();

    choices
        .iter()
        .find(|(_, aliases)| aliases.iter().any(|a| *a == needle))
        .map(|(variant, _)| *variant)
        .ok_or_else(|| {
            let canonical: Vec<&str> = choices.iter().map(|(_, aliases)| aliases[0]).collect();
            ValidationError::not_allowed(field, raw, &canonical)
        })
}

// =============================================================================
// Category
// =============================================================================

/// The menu category of an item. Drives which line item variant is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Beverage,
    Dish,
    Dessert,
}

impl Category {
    const CHOICES: &'static [(Category, &'static [&'static str])] = &[
        (Category::Beverage, &["beverage", "bebida", "drink"]),
        (Category::Dish, &["dish", "plato"]),
        (Category::Dessert, &["dessert", "postre"]),
    ];

    /// Returns the canonical lowercase token.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Beverage => "beverage",
            Category::Dish => "dish",
            Category::Dessert => "dessert",
        }
    }

    /// Validates a raw subtype for this category and returns its canonical
    /// token.
    ///
    /// ## Rules
    /// - Beverage: size is required
    /// - Dish: course type is required
    /// - Dessert: defaults to "dessert" when absent
    pub fn normalize_subtype(&self, raw: Option<&str>) -> ValidationResult<&'static str> {
        let raw = raw.map(str::trim).filter(|s| !s.is_empty());

        match (self, raw) {
            (Category::Beverage, Some(s)) => Ok(s.parse::<BeverageSize>()?.as_str()),
            (Category::Beverage, None) => Err(ValidationError::required("size")),
            (Category::Dish, Some(s)) => Ok(s.parse::<CourseType>()?.as_str()),
            (Category::Dish, None) => Err(ValidationError::required("course type")),
            (Category::Dessert, Some(s)) => Ok(s.parse::<DessertKind>()?.as_str()),
            (Category::Dessert, None) => Ok(DessertKind::default().as_str()),
        }
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("category", s, Self::CHOICES)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Beverage Size
// =============================================================================

/// Size of a beverage. Large beverages are priced at × 0.95.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BeverageSize {
    Small,
    Medium,
    Large,
}

impl BeverageSize {
    const CHOICES: &'static [(BeverageSize, &'static [&'static str])] = &[
        (BeverageSize::Small, &["small", "pequeño", "pequeno"]),
        (BeverageSize::Medium, &["medium", "mediano"]),
        (BeverageSize::Large, &["large", "grande"]),
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            BeverageSize::Small => "small",
            BeverageSize::Medium => "medium",
            BeverageSize::Large => "large",
        }
    }
}

impl FromStr for BeverageSize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("size", s, Self::CHOICES)
    }
}

// =============================================================================
// Course Type
// =============================================================================

/// Course of a dish. Main courses are priced at × 0.90 and unlock the
/// beverage bundling discount for the whole order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseType {
    Starter,
    Main,
    Side,
}

impl CourseType {
    const CHOICES: &'static [(CourseType, &'static [&'static str])] = &[
        (CourseType::Starter, &["starter", "entrada"]),
        (CourseType::Main, &["main", "principal"]),
        (CourseType::Side, &["side", "acompañamiento", "acompanamiento"]),
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            CourseType::Starter => "starter",
            CourseType::Main => "main",
            CourseType::Side => "side",
        }
    }
}

impl FromStr for CourseType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("course type", s, Self::CHOICES)
    }
}

// =============================================================================
// Dessert Kind
// =============================================================================

/// Kind of dessert. Desserts have no price adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DessertKind {
    #[default]
    Dessert,
    Special,
}

impl DessertKind {
    const CHOICES: &'static [(DessertKind, &'static [&'static str])] = &[
        (DessertKind::Dessert, &["dessert", "postre"]),
        (DessertKind::Special, &["special", "especial"]),
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            DessertKind::Dessert => "dessert",
            DessertKind::Special => "special",
        }
    }
}

impl FromStr for DessertKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("dessert type", s, Self::CHOICES)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment.
    Card,
    /// Bank transfer.
    Transfer,
}

impl PaymentMethod {
    const CHOICES: &'static [(PaymentMethod, &'static [&'static str])] = &[
        (PaymentMethod::Cash, &["cash", "efectivo"]),
        (PaymentMethod::Card, &["card", "tarjeta"]),
        (PaymentMethod::Transfer, &["transfer", "transferencia"]),
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Transfer => "transfer",
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("payment method", s, Self::CHOICES)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Payment Status
// =============================================================================

/// Settlement state of a payment transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Created, not settled yet.
    #[default]
    Pending,
    /// Settlement succeeded.
    Completed,
    /// Settlement failed.
    Failed,
}

impl PaymentStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Menu Item Entry
// =============================================================================

/// A sellable item as stored in the menu catalog.
///
/// Immutable once created: editing an item means replacing the entry.
/// The constructor guarantees the subtype belongs to the category, so every
/// entry can be turned into a [`crate::line_item::LineItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemEntry {
    name: String,
    price: Money,
    category: Category,
    subtype: String,
}

impl MenuItemEntry {
    /// Creates a validated catalog entry.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::money::Money;
    /// use bistro_core::types::{Category, MenuItemEntry};
    ///
    /// let entry = MenuItemEntry::new("Refresco", Money::from_cents(250), Category::Beverage, Some("MEDIANO")).unwrap();
    /// assert_eq!(entry.subtype(), "medium");
    /// ```
    pub fn new(
        name: &str,
        price: Money,
        category: Category,
        subtype: Option<&str>,
    ) -> ValidationResult<Self> {
        let name = validate_item_name(name)?;
        let price = validate_price(price)?;
        let subtype = category.normalize_subtype(subtype)?;

        Ok(MenuItemEntry {
            name,
            price,
            category,
            subtype: subtype.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Canonical subtype token (e.g. "large", "main", "dessert").
    pub fn subtype(&self) -> &str {
        &self.subtype
    }
}

// =============================================================================
// Order Totals
// =============================================================================

/// The four values computed for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of adjusted line prices (bundling included).
    pub subtotal: Money,
    /// Volume discount, zero unless the subtotal passes the threshold.
    pub discount: Money,
    /// Tax on the pre-discount subtotal.
    pub tax: Money,
    /// `subtotal - discount + tax`.
    pub total: Money,
}

// =============================================================================
// Line Summary
// =============================================================================

/// Descriptive record for one order line, produced by
/// [`crate::order::Order::iter_items`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSummary {
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    /// `price_for_quantity(quantity)`, without the bundling discount.
    pub line_total: Money,
    pub category: Category,
    pub subtype: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_display() {
        assert_eq!(Rate::from_bps(1900).to_string(), "19%");
        assert_eq!(Rate::from_bps(825).to_string(), "8.25%");
        assert_eq!(Rate::one().bps(), 10_000);
    }

    #[test]
    fn test_parse_is_case_insensitive_and_bilingual() {
        assert_eq!("GRANDE".parse::<BeverageSize>().unwrap(), BeverageSize::Large);
        assert_eq!(" Large ".parse::<BeverageSize>().unwrap(), BeverageSize::Large);
        assert_eq!("principal".parse::<CourseType>().unwrap(), CourseType::Main);
        assert_eq!("Acompañamiento".parse::<CourseType>().unwrap(), CourseType::Side);
        assert_eq!("especial".parse::<DessertKind>().unwrap(), DessertKind::Special);
        assert_eq!("Bebida".parse::<Category>().unwrap(), Category::Beverage);
        assert_eq!("tarjeta".parse::<PaymentMethod>().unwrap(), PaymentMethod::Card);
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        let err = "jumbo".parse::<BeverageSize>().unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotAllowed {
                field: "size".to_string(),
                value: "jumbo".to_string(),
                allowed: vec!["small".into(), "medium".into(), "large".into()],
            }
        );
        assert!("cheque".parse::<PaymentMethod>().is_err());
        assert!("brunch".parse::<CourseType>().is_err());
    }

    #[test]
    fn test_normalize_subtype() {
        assert_eq!(Category::Beverage.normalize_subtype(Some("mediano")), Ok("medium"));
        assert_eq!(Category::Dessert.normalize_subtype(None), Ok("dessert"));
        assert_eq!(Category::Dessert.normalize_subtype(Some("  ")), Ok("dessert"));
        assert!(matches!(
            Category::Dish.normalize_subtype(None),
            Err(ValidationError::Required { .. })
        ));
        // A course type is not a beverage size
        assert!(Category::Beverage.normalize_subtype(Some("main")).is_err());
    }

    #[test]
    fn test_menu_item_entry_validation() {
        let entry =
            MenuItemEntry::new("  Pizza  ", Money::from_cents(1250), Category::Dish, Some("Principal"))
                .unwrap();
        assert_eq!(entry.name(), "Pizza");
        assert_eq!(entry.subtype(), "main");

        assert!(MenuItemEntry::new("", Money::from_cents(100), Category::Dessert, None).is_err());
        assert!(MenuItemEntry::new("Flan", Money::from_cents(-1), Category::Dessert, None).is_err());
    }

    #[test]
    fn test_status_defaults() {
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
        assert_eq!(PaymentMethod::default(), PaymentMethod::Cash);
        assert_eq!(DessertKind::default(), DessertKind::Dessert);
    }
}
