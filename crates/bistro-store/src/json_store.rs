//! # JSON Menu Store
//!
//! File-backed [`MenuStorage`]: the whole menu lives in one pretty-printed
//! JSON object keyed by item name.
//!
//! ## File Format
//! ```text
//! {
//!   "Banana split": { "price": 5.0,  "category": "dessert",  "subtype": "dessert" },
//!   "Refresco":     { "price": 2.5,  "category": "beverage", "subtype": "medium" }
//! }
//! ```
//! `category` is also accepted under the older key `type`, and any token the
//! core parsers know (`"bebida"`, `"Principal"`, ...) is accepted on load.
//! Saves always write canonical English tokens.
//!
//! ## Write Path
//! ```text
//! save(snapshot)
//!   │  create parent dirs
//!   │  write  menu.json.tmp
//!   ▼  rename menu.json.tmp → menu.json   (readers never see half a file)
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bistro_core::validation::validate_price_decimal;
use bistro_core::{Category, CoreResult, MenuItemEntry, MenuSnapshot, MenuStorage};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

/// Where the CLI keeps the menu unless configured otherwise.
pub const DEFAULT_MENU_PATH: &str = "data/menu.json";

/// One item as written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct MenuRecord {
    price: f64,
    #[serde(alias = "type")]
    category: String,
    #[serde(default)]
    subtype: Option<String>,
}

impl MenuRecord {
    fn from_entry(entry: &MenuItemEntry) -> Self {
        MenuRecord {
            price: entry.price().to_decimal(),
            category: entry.category().as_str().to_string(),
            subtype: Some(entry.subtype().to_string()),
        }
    }

    fn into_entry(self, name: &str) -> StoreResult<MenuItemEntry> {
        let invalid = |reason: String| StoreError::InvalidEntry {
            name: name.to_string(),
            reason,
        };

        let price = validate_price_decimal(self.price).map_err(|e| invalid(e.to_string()))?;
        let category = self
            .category
            .parse::<Category>()
            .map_err(|e| invalid(e.to_string()))?;

        MenuItemEntry::new(name, price, category, self.subtype.as_deref())
            .map_err(|e| invalid(e.to_string()))
    }
}

/// Menu storage on a JSON file.
///
/// ## Usage
/// ```rust,ignore
/// let store = JsonMenuStore::new("data/menu.json");
/// let mut menu = MenuCatalog::open(store)?;
/// menu.add_item("Flan", Money::from_cents(300), Category::Dessert, None)?;
/// ```
#[derive(Debug, Clone)]
pub struct JsonMenuStore {
    path: PathBuf,
}

impl JsonMenuStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonMenuStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "menu.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Reads and converts the file. A missing file is an empty menu.
    pub fn read_snapshot(&self) -> StoreResult<MenuSnapshot> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Menu file missing, starting empty");
                return Ok(MenuSnapshot::new());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let records: BTreeMap<String, MenuRecord> =
            serde_json::from_str(&raw).map_err(|e| StoreError::json(&self.path, e))?;

        let mut snapshot = MenuSnapshot::new();
        for (name, record) in records {
            let entry = record.into_entry(&name)?;
            snapshot.insert(entry.name().to_string(), entry);
        }

        Ok(snapshot)
    }

    /// Replaces the file with `entries`.
    pub fn write_snapshot(&self, entries: &MenuSnapshot) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
        }

        let records: BTreeMap<&str, MenuRecord> = entries
            .values()
            .map(|entry| (entry.name(), MenuRecord::from_entry(entry)))
            .collect();
        let json =
            serde_json::to_string_pretty(&records).map_err(|e| StoreError::json(&self.path, e))?;

        let temp = self.temp_path();
        fs::write(&temp, json).map_err(|e| StoreError::io(&temp, e))?;
        fs::rename(&temp, &self.path).map_err(|e| StoreError::io(&self.path, e))?;

        info!(path = %self.path.display(), items = entries.len(), "Menu saved");
        Ok(())
    }
}

impl Default for JsonMenuStore {
    fn default() -> Self {
        JsonMenuStore::new(DEFAULT_MENU_PATH)
    }
}

impl MenuStorage for JsonMenuStore {
    fn load(&self) -> CoreResult<MenuSnapshot> {
        Ok(self.read_snapshot()?)
    }

    fn save(&mut self, entries: &MenuSnapshot) -> CoreResult<()> {
        Ok(self.write_snapshot(entries)?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bistro_core::{CoreError, MenuCatalog, Money, ValidationError};
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonMenuStore {
        JsonMenuStore::new(dir.path().join("data").join("menu.json"))
    }

    #[test]
    fn test_missing_file_is_empty_menu() {
        let dir = TempDir::new().unwrap();
        let menu = MenuCatalog::open(store_in(&dir)).unwrap();
        assert!(menu.is_empty());
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = TempDir::new().unwrap();

        {
            let mut menu = MenuCatalog::open(store_in(&dir)).unwrap();
            menu.add_item("Refresco", Money::from_cents(250), Category::Beverage, Some("mediano"))
                .unwrap();
            menu.add_item("Pizza Hawaiana", Money::from_cents(1250), Category::Dish, Some("principal"))
                .unwrap();
            menu.add_item("Banana split", Money::from_cents(500), Category::Dessert, None)
                .unwrap();
        }

        let reopened = MenuCatalog::open(store_in(&dir)).unwrap();
        assert_eq!(reopened.len(), 3);

        let pizza = reopened.get_item("Pizza Hawaiana").unwrap();
        assert_eq!(pizza.price(), Money::from_cents(1250));
        assert_eq!(pizza.category(), Category::Dish);
        assert_eq!(pizza.subtype(), "main");

        let names: Vec<&str> = reopened.entries().map(|e| e.name()).collect();
        assert_eq!(names, vec!["Banana split", "Pizza Hawaiana", "Refresco"]);
    }

    #[test]
    fn test_file_is_pretty_json_with_canonical_tokens() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut menu = MenuCatalog::open(store.clone()).unwrap();
        menu.add_item("Refresco", Money::from_cents(250), Category::Beverage, Some("MEDIANO"))
            .unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["Refresco"]["price"], 2.5);
        assert_eq!(value["Refresco"]["category"], "beverage");
        assert_eq!(value["Refresco"]["subtype"], "medium");
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_duplicate_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut menu = MenuCatalog::open(store.clone()).unwrap();
        menu.add_item("Flan", Money::from_cents(300), Category::Dessert, None)
            .unwrap();
        let before = fs::read_to_string(store.path()).unwrap();

        let err = menu
            .add_item("Flan", Money::from_cents(450), Category::Dessert, Some("special"))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { .. })
        ));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn test_loads_legacy_keys_and_spanish_tokens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("menu.json");
        fs::write(
            &path,
            r#"{
                "Cerveza": { "price": 4.0, "type": "bebida", "subtype": "grande" },
                "Flan": { "price": 3.0, "category": "postre", "subtype": null }
            }"#,
        )
        .unwrap();

        let snapshot = JsonMenuStore::new(&path).read_snapshot().unwrap();
        assert_eq!(snapshot["Cerveza"].category(), Category::Beverage);
        assert_eq!(snapshot["Cerveza"].subtype(), "large");
        assert_eq!(snapshot["Flan"].subtype(), "dessert");
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("menu.json");
        fs::write(&path, "not json").unwrap();

        let store = JsonMenuStore::new(&path);
        assert!(matches!(store.read_snapshot(), Err(StoreError::Json { .. })));
        assert!(matches!(
            MenuCatalog::open(store),
            Err(CoreError::Storage(_))
        ));
    }

    #[test]
    fn test_invalid_record_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("menu.json");
        fs::write(&path, r#"{ "Agua": { "price": 1.0, "category": "beverage", "subtype": "main" } }"#)
            .unwrap();

        assert!(matches!(
            JsonMenuStore::new(&path).read_snapshot(),
            Err(StoreError::InvalidEntry { .. })
        ));
    }
}
