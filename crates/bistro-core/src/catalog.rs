//! # Menu Catalog
//!
//! The set of sellable items, keyed by name, kept in sync with a storage
//! backend.
//!
//! ## Persistence Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How the Catalog Talks to Storage                     │
//! │                                                                         │
//! │  MenuCatalog::open(storage)                                             │
//! │       │  storage.load() ──► full snapshot (missing source = empty)      │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │ entries: BTreeMap<name, MenuItemEntry>  │  ← sorted by name         │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       │  add_item("Flan", ...)                                          │
//! │       │      1. validate + reject duplicates                           │
//! │       │      2. insert in memory                                       │
//! │       │      3. storage.save(&entries)   ← whole snapshot every time   │
//! │       │      4. save failed? remove the insert, return the error       │
//! │       ▼                                                                 │
//! │  get_item / line_item read the in-memory map only                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage is a trait so tests use [`InMemoryStorage`] and the CLI uses the
//! JSON file store from `bistro-store`.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::line_item::LineItem;
use crate::money::Money;
use crate::types::{Category, MenuItemEntry};
use crate::validation::{validate_item_name, ValidationResult};

/// Snapshot of the catalog as exchanged with storage.
pub type MenuSnapshot = BTreeMap<String, MenuItemEntry>;

// =============================================================================
// Storage Port
// =============================================================================

/// Persistence backend for the menu.
///
/// Implementations exchange whole snapshots: `load` returns everything,
/// `save` replaces everything.
pub trait MenuStorage {
    /// Loads the stored snapshot. A missing source is an empty menu.
    fn load(&self) -> CoreResult<MenuSnapshot>;

    /// Replaces the stored snapshot.
    fn save(&mut self, entries: &MenuSnapshot) -> CoreResult<()>;
}

/// Volatile storage, mostly for tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    snapshot: MenuSnapshot,
    saves: usize,
    fail_saves: bool,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing snapshot.
    pub fn with_entries(entries: impl IntoIterator<Item = MenuItemEntry>) -> Self {
        InMemoryStorage {
            snapshot: entries
                .into_iter()
                .map(|entry| (entry.name().to_string(), entry))
                .collect(),
            ..Self::default()
        }
    }

    /// Makes every subsequent `save` fail.
    pub fn failing(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    /// What was last saved.
    pub fn snapshot(&self) -> &MenuSnapshot {
        &self.snapshot
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl MenuStorage for InMemoryStorage {
    fn load(&self) -> CoreResult<MenuSnapshot> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, entries: &MenuSnapshot) -> CoreResult<()> {
        if self.fail_saves {
            return Err(CoreError::Storage("in-memory storage is read-only".to_string()));
        }
        self.snapshot = entries.clone();
        self.saves += 1;
        Ok(())
    }
}

// =============================================================================
// Menu Catalog
// =============================================================================

/// Named menu items backed by a [`MenuStorage`].
///
/// ## Usage
/// ```rust
/// use bistro_core::catalog::{InMemoryStorage, MenuCatalog};
/// use bistro_core::money::Money;
/// use bistro_core::types::Category;
///
/// let mut menu = MenuCatalog::open(InMemoryStorage::new()).unwrap();
/// menu.add_item("Flan", Money::from_cents(300), Category::Dessert, None).unwrap();
///
/// let flan = menu.line_item("Flan").unwrap();
/// assert_eq!(flan.subtype_str(), "dessert");
/// assert!(menu.line_item("Tiramisu").is_err());
/// ```
#[derive(Debug)]
pub struct MenuCatalog<S: MenuStorage> {
    storage: S,
    entries: MenuSnapshot,
}

impl<S: MenuStorage> MenuCatalog<S> {
    /// Opens the catalog, loading whatever the storage holds.
    pub fn open(storage: S) -> CoreResult<Self> {
        let entries = storage.load()?;
        info!(items = entries.len(), "Menu loaded");
        Ok(MenuCatalog { storage, entries })
    }

    /// Discards the in-memory state and loads it again from storage.
    pub fn reload(&mut self) -> CoreResult<()> {
        self.entries = self.storage.load()?;
        debug!(items = self.entries.len(), "Menu reloaded");
        Ok(())
    }

    /// Adds an item and persists the full menu.
    ///
    /// ## Errors
    /// - `Validation(Duplicate)` if the name is already on the menu
    /// - `Validation(..)` for an empty name, negative price or a subtype
    ///   outside the category
    /// - `Storage(..)` if the save fails; the catalog is left unchanged
    pub fn add_item(
        &mut self,
        name: &str,
        price: Money,
        category: Category,
        subtype: Option<&str>,
    ) -> CoreResult<&MenuItemEntry> {
        let entry = MenuItemEntry::new(name, price, category, subtype)?;
        let key = entry.name().to_string();

        if self.entries.contains_key(&key) {
            return Err(ValidationError::Duplicate {
                field: "menu item".to_string(),
                value: key,
            }
            .into());
        }

        self.entries.insert(key.clone(), entry);

        if let Err(e) = self.storage.save(&self.entries) {
            warn!(name = %key, error = %e, "Menu save failed, item not added");
            self.entries.remove(&key);
            return Err(e);
        }

        info!(name = %key, category = %category, "Menu item added");

        Ok(&self.entries[&key])
    }

    /// Looks up an entry by exact name (surrounding whitespace ignored).
    pub fn get_item(&self, name: &str) -> Option<&MenuItemEntry> {
        self.entries.get(name.trim())
    }

    /// Builds an orderable line item for the named entry.
    ///
    /// ## Errors
    /// `ValidationError::NotFound` when the name is not on the menu.
    pub fn line_item(&self, name: &str) -> ValidationResult<LineItem> {
        let name = validate_item_name(name)?;
        let entry = self
            .entries
            .get(&name)
            .ok_or_else(|| ValidationError::not_found("menu item", name.as_str()))?;
        LineItem::from_entry(entry)
    }

    /// All entries, sorted by name.
    pub fn entries(&self) -> impl Iterator<Item = &MenuItemEntry> + '_ {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
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
    fn test_open_empty_storage() {
        let menu = MenuCatalog::open(InMemoryStorage::new()).unwrap();
        assert!(menu.is_empty());
        assert_eq!(menu.entries().count(), 0);
    }

    #[test]
    fn test_open_loads_existing_entries() {
        let storage = InMemoryStorage::with_entries(vec![
            MenuItemEntry::new("Refresco", cents(250), Category::Beverage, Some("medium")).unwrap(),
            MenuItemEntry::new("Banana split", cents(500), Category::Dessert, None).unwrap(),
        ]);
        let menu = MenuCatalog::open(storage).unwrap();

        assert_eq!(menu.len(), 2);
        let names: Vec<&str> = menu.entries().map(|e| e.name()).collect();
        assert_eq!(names, vec!["Banana split", "Refresco"]);
    }

    #[test]
    fn test_add_item_persists_snapshot() {
        let mut menu = MenuCatalog::open(InMemoryStorage::new()).unwrap();

        let entry = menu
            .add_item(" Pizza Hawaiana ", cents(1250), Category::Dish, Some("Principal"))
            .unwrap();
        assert_eq!(entry.name(), "Pizza Hawaiana");
        assert_eq!(entry.subtype(), "main");

        menu.add_item("Flan", cents(300), Category::Dessert, None).unwrap();

        assert_eq!(menu.storage().save_count(), 2);
        assert_eq!(menu.storage().snapshot().len(), 2);
        assert!(menu.storage().snapshot().contains_key("Pizza Hawaiana"));
    }

    #[test]
    fn test_add_duplicate_is_rejected() {
        let mut menu = MenuCatalog::open(InMemoryStorage::new()).unwrap();
        menu.add_item("Flan", cents(300), Category::Dessert, None).unwrap();

        let err = menu
            .add_item("Flan", cents(999), Category::Dessert, Some("special"))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { .. })
        ));

        assert_eq!(menu.get_item("Flan").unwrap().price(), cents(300));
        assert_eq!(menu.storage().save_count(), 1);
    }

    #[test]
    fn test_add_invalid_entry_is_rejected() {
        let mut menu = MenuCatalog::open(InMemoryStorage::new()).unwrap();

        assert!(menu.add_item("", cents(100), Category::Dessert, None).is_err());
        assert!(menu.add_item("Agua", cents(-1), Category::Beverage, Some("small")).is_err());
        assert!(menu.add_item("Agua", cents(100), Category::Beverage, None).is_err());
        assert!(menu.add_item("Agua", cents(100), Category::Beverage, Some("main")).is_err());
        assert!(menu.is_empty());
        assert_eq!(menu.storage().save_count(), 0);
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let mut menu = MenuCatalog::open(InMemoryStorage::new().failing()).unwrap();

        let err = menu
            .add_item("Flan", cents(300), Category::Dessert, None)
            .unwrap_err();
        assert!(matches!(err, CoreError::Storage(_)));
        assert!(menu.get_item("Flan").is_none());
        assert!(menu.is_empty());
    }

    #[test]
    fn test_line_item_lookup() {
        let mut menu = MenuCatalog::open(InMemoryStorage::new()).unwrap();
        menu.add_item("Cerveza", cents(400), Category::Beverage, Some("grande"))
            .unwrap();

        let item = menu.line_item("Cerveza").unwrap();
        assert!(item.is_beverage());
        assert_eq!(item.price_for_quantity(1).unwrap(), cents(380));

        assert!(matches!(
            menu.line_item("Vino"),
            Err(ValidationError::NotFound { .. })
        ));
    }

    #[test]
    fn test_reload_picks_up_storage_state() {
        let mut menu = MenuCatalog::open(InMemoryStorage::new()).unwrap();
        menu.add_item("Flan", cents(300), Category::Dessert, None).unwrap();
        menu.reload().unwrap();
        assert_eq!(menu.len(), 1);
        assert!(menu.get_item(" Flan ").is_some());
    }
}
