//! # Line Items
//!
//! Typed items that can be placed on an order.
//!
//! ## Pricing Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  price_for_quantity(qty)                                                │
//! │                                                                         │
//! │  unit_price × qty ──► category adjustment ──► rounded to the cent      │
//! │                                                                         │
//! │  Beverage   large        × 0.95                                         │
//! │             small/medium × 1.00                                         │
//! │  Dish       main         × 0.90                                         │
//! │             starter/side × 1.00                                         │
//! │  Dessert    any          × 1.00                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All adjustments live in the single `match` of [`LineItem::adjustment`].

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{BeverageSize, Category, CourseType, DessertKind, MenuItemEntry, Rate};
use crate::validation::{validate_item_name, validate_price, validate_quantity, ValidationResult};

/// Multiplier for large beverages.
pub const LARGE_BEVERAGE_RATE: Rate = Rate::from_bps(9_500);

/// Multiplier for main-course dishes.
pub const MAIN_DISH_RATE: Rate = Rate::from_bps(9_000);

/// A menu item placed on an order, tagged by category.
///
/// ## Invariants
/// - `name` is trimmed and non-empty
/// - `unit_price` is non-negative, in whole cents
/// - the subtype is one of its category's values (enforced by the type)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum LineItem {
    Beverage {
        name: String,
        unit_price: Money,
        size: BeverageSize,
    },
    Dish {
        name: String,
        unit_price: Money,
        course: CourseType,
    },
    Dessert {
        name: String,
        unit_price: Money,
        kind: DessertKind,
    },
}

impl LineItem {
    /// Creates a beverage. `size` is matched case-insensitively.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::line_item::LineItem;
    /// use bistro_core::money::Money;
    ///
    /// let beer = LineItem::beverage("Cerveza", Money::from_cents(400), "GRANDE").unwrap();
    /// assert_eq!(beer.subtype_str(), "large");
    /// assert!(LineItem::beverage("Cerveza", Money::from_cents(400), "jumbo").is_err());
    /// ```
    pub fn beverage(name: &str, unit_price: Money, size: &str) -> ValidationResult<Self> {
        Ok(LineItem::Beverage {
            name: validate_item_name(name)?,
            unit_price: validate_price(unit_price)?,
            size: size.parse()?,
        })
    }

    /// Creates a dish. `course` is matched case-insensitively.
    pub fn dish(name: &str, unit_price: Money, course: &str) -> ValidationResult<Self> {
        Ok(LineItem::Dish {
            name: validate_item_name(name)?,
            unit_price: validate_price(unit_price)?,
            course: course.parse()?,
        })
    }

    /// Creates a dessert of the given kind.
    pub fn dessert(name: &str, unit_price: Money, kind: &str) -> ValidationResult<Self> {
        Ok(LineItem::Dessert {
            name: validate_item_name(name)?,
            unit_price: validate_price(unit_price)?,
            kind: kind.parse()?,
        })
    }

    /// Creates a plain dessert (kind "dessert").
    pub fn plain_dessert(name: &str, unit_price: Money) -> ValidationResult<Self> {
        Ok(LineItem::Dessert {
            name: validate_item_name(name)?,
            unit_price: validate_price(unit_price)?,
            kind: DessertKind::default(),
        })
    }

    /// Builds the typed line item for a catalog entry.
    pub fn from_entry(entry: &MenuItemEntry) -> ValidationResult<Self> {
        match entry.category() {
            Category::Beverage => LineItem::beverage(entry.name(), entry.price(), entry.subtype()),
            Category::Dish => LineItem::dish(entry.name(), entry.price(), entry.subtype()),
            Category::Dessert => LineItem::dessert(entry.name(), entry.price(), entry.subtype()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            LineItem::Beverage { name, .. }
            | LineItem::Dish { name, .. }
            | LineItem::Dessert { name, .. } => name,
        }
    }

    pub fn unit_price(&self) -> Money {
        match self {
            LineItem::Beverage { unit_price, .. }
            | LineItem::Dish { unit_price, .. }
            | LineItem::Dessert { unit_price, .. } => *unit_price,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            LineItem::Beverage { .. } => Category::Beverage,
            LineItem::Dish { .. } => Category::Dish,
            LineItem::Dessert { .. } => Category::Dessert,
        }
    }

    /// Canonical subtype token ("large", "main", "special", ...).
    pub fn subtype_str(&self) -> &'static str {
        match self {
            LineItem::Beverage { size, .. } => size.as_str(),
            LineItem::Dish { course, .. } => course.as_str(),
            LineItem::Dessert { kind, .. } => kind.as_str(),
        }
    }

    pub fn is_beverage(&self) -> bool {
        matches!(self, LineItem::Beverage { .. })
    }

    pub fn is_main_dish(&self) -> bool {
        matches!(
            self,
            LineItem::Dish {
                course: CourseType::Main,
                ..
            }
        )
    }

    /// The category-specific multiplier applied to `unit_price × qty`.
    pub fn adjustment(&self) -> Rate {
        match self {
            LineItem::Beverage {
                size: BeverageSize::Large,
                ..
            } => LARGE_BEVERAGE_RATE,
            LineItem::Beverage { .. } => Rate::one(),
            LineItem::Dish {
                course: CourseType::Main,
                ..
            } => MAIN_DISH_RATE,
            LineItem::Dish { .. } => Rate::one(),
            LineItem::Dessert { .. } => Rate::one(),
        }
    }

    /// Price of `quantity` units after the category adjustment.
    ///
    /// ## Errors
    /// `ValidationError::MustBePositive` when `quantity <= 0`,
    /// `ValidationError::OutOfRange` when the price does not fit in cents.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::line_item::LineItem;
    /// use bistro_core::money::Money;
    ///
    /// let pizza = LineItem::dish("Pizza", Money::from_cents(1200), "main").unwrap();
    /// assert_eq!(pizza.price_for_quantity(1).unwrap().cents(), 1080);
    /// ```
    pub fn price_for_quantity(&self, quantity: i64) -> ValidationResult<Money> {
        let quantity = validate_quantity(quantity)?;
        self.adjusted_total(quantity)
            .ok_or_else(|| ValidationError::too_large("quantity"))
    }

    /// Same as [`price_for_quantity`](Self::price_for_quantity) for a
    /// quantity the caller already validated (order lines). `None` on overflow.
    pub(crate) fn adjusted_total(&self, quantity: i64) -> Option<Money> {
        self.unit_price()
            .checked_multiply_quantity(quantity)
            .map(|gross| gross.apply_rate(self.adjustment()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    #[test]
    fn test_construction_trims_name() {
        let item = LineItem::beverage("  Refresco ", cents(250), "mediano").unwrap();
        assert_eq!(item.name(), "Refresco");
        assert_eq!(item.unit_price(), cents(250));
        assert_eq!(item.category(), Category::Beverage);
        assert_eq!(item.subtype_str(), "medium");
    }

    #[test]
    fn test_construction_rejects_bad_input() {
        assert!(matches!(
            LineItem::dish("   ", cents(100), "main"),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            LineItem::dish("Pizza", cents(-100), "main"),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            LineItem::beverage("Refresco", cents(250), "jumbo"),
            Err(ValidationError::NotAllowed { .. })
        ));
        assert!(LineItem::dessert("Flan", cents(300), "cake").is_err());
    }

    #[test]
    fn test_size_is_case_insensitive() {
        for raw in ["GRANDE", "grande", "Grande", "LARGE"] {
            let item = LineItem::beverage("Cerveza", cents(400), raw).unwrap();
            assert_eq!(item.subtype_str(), "large");
        }
    }

    #[test]
    fn test_large_beverage_is_five_percent_off() {
        let large = LineItem::beverage("Cerveza", cents(400), "large").unwrap();
        let medium = LineItem::beverage("Cerveza", cents(400), "medium").unwrap();
        let small = LineItem::beverage("Cerveza", cents(400), "small").unwrap();

        assert_eq!(large.price_for_quantity(1).unwrap(), cents(380));
        assert_eq!(large.price_for_quantity(3).unwrap(), cents(1140));
        assert_eq!(medium.price_for_quantity(3).unwrap(), cents(1200));
        assert_eq!(small.price_for_quantity(3).unwrap(), cents(1200));
    }

    #[test]
    fn test_main_dish_is_ten_percent_off() {
        let main = LineItem::dish("Pizza", cents(1200), "principal").unwrap();
        let starter = LineItem::dish("Ensalada", cents(650), "entrada").unwrap();
        let side = LineItem::dish("Papas", cents(350), "side").unwrap();

        assert_eq!(main.price_for_quantity(2).unwrap(), cents(2160));
        assert_eq!(starter.price_for_quantity(2).unwrap(), cents(1300));
        assert_eq!(side.price_for_quantity(1).unwrap(), cents(350));
        assert!(main.is_main_dish());
        assert!(!starter.is_main_dish());
    }

    #[test]
    fn test_dessert_has_no_adjustment() {
        let split = LineItem::plain_dessert("Banana split", cents(500)).unwrap();
        let special = LineItem::dessert("Tarta", cents(725), "ESPECIAL").unwrap();

        assert_eq!(split.subtype_str(), "dessert");
        assert_eq!(split.price_for_quantity(3).unwrap(), cents(1500));
        assert_eq!(special.price_for_quantity(1).unwrap(), cents(725));
    }

    #[test]
    fn test_quantity_must_be_positive() {
        let item = LineItem::plain_dessert("Flan", cents(300)).unwrap();
        assert!(matches!(
            item.price_for_quantity(0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(item.price_for_quantity(-1).is_err());
    }

    #[test]
    fn test_price_overflow_is_rejected() {
        let item = LineItem::dish("Pizza", cents(1200), "main").unwrap();
        assert!(matches!(
            item.price_for_quantity(i64::MAX / 2),
            Err(ValidationError::OutOfRange { .. })
        ));

        // Free items never overflow.
        let free = LineItem::beverage("Agua", cents(0), "small").unwrap();
        assert_eq!(free.price_for_quantity(i64::MAX).unwrap(), Money::zero());
    }

    #[test]
    fn test_price_is_monotonic_in_quantity() {
        let items = [
            LineItem::beverage("A", cents(333), "large").unwrap(),
            LineItem::dish("B", cents(999), "main").unwrap(),
            LineItem::dessert("C", cents(1), "special").unwrap(),
            LineItem::beverage("D", cents(0), "small").unwrap(),
        ];

        for item in &items {
            let mut previous = Money::zero();
            for qty in 1..=50 {
                let price = item.price_for_quantity(qty).unwrap();
                assert!(price >= previous, "{} at qty {}", item.name(), qty);
                previous = price;
            }
        }
    }

    #[test]
    fn test_serializes_with_category_tag() {
        let item = LineItem::beverage("Cerveza", cents(400), "grande").unwrap();
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["category"], "beverage");
        assert_eq!(value["size"], "large");
        assert_eq!(value["unit_price"], 400);

        let back: LineItem = serde_json::from_value(value).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_from_entry() {
        let entry = MenuItemEntry::new("Pizza Hawaiana", cents(1250), Category::Dish, Some("principal"))
            .unwrap();
        let item = LineItem::from_entry(&entry).unwrap();
        assert!(item.is_main_dish());
        assert_eq!(item.unit_price(), cents(1250));
    }
}
