//! # bistro-store: Menu Persistence for Bistro
//!
//! Implements the catalog's [`MenuStorage`](bistro_core::MenuStorage) port on
//! a JSON file.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bistro Menu Data Flow                            │
//! │                                                                         │
//! │  bistro add-item "Flan" 3.00 postre                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  MenuCatalog::add_item (bistro-core)                                   │
//! │       │  storage.save(&snapshot)                                        │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  bistro-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────────┐          ┌───────────────────┐         │   │
//! │  │   │   JsonMenuStore   │          │    StoreError     │         │   │
//! │  │   │  (json_store.rs)  │ ───────► │    (error.rs)     │         │   │
//! │  │   │ load / save       │          │ → CoreError       │         │   │
//! │  │   └───────────────────┘          └───────────────────┘         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  data/menu.json                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bistro_core::MenuCatalog;
//! use bistro_store::JsonMenuStore;
//!
//! let menu = MenuCatalog::open(JsonMenuStore::new("data/menu.json"))?;
//! for entry in menu.entries() {
//!     println!("{} {}", entry.name(), entry.price());
//! }
//! ```

pub mod error;
pub mod json_store;

pub use error::{StoreError, StoreResult};
pub use json_store::{JsonMenuStore, DEFAULT_MENU_PATH};
