//! Integration tests for Tienda.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tienda-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Shopping through order confirmation
//! - `admin_orders` - Order panel over orders placed by the storefront
//! - `persistence` - Reloading state from the file store
//!
//! Tests that touch the disk get their own directory under the system temp
//! dir via [`TempDataDir`], removed on drop.

use std::path::{Path, PathBuf};

use tienda_admin::{AdminConfig, AdminState};
use tienda_core::{CustomerInfo, FileStore, KeyValueStore, MemoryStore, StorageError};
use tienda_storefront::routes::cart::ProductData;
use tienda_storefront::{AppState, StorefrontConfig};

/// A uniquely named scratch directory, deleted on drop.
#[derive(Debug)]
pub struct TempDataDir {
    path: PathBuf,
}

impl TempDataDir {
    /// Create a fresh directory.
    ///
    /// # Panics
    ///
    /// Panics if the directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new(label: &str) -> Self {
        let path = std::env::temp_dir().join(format!("tienda-{label}-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&path).expect("create temp data dir");
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a file store over this directory, as a page reload would.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored lists cannot be read.
    pub fn page(&self) -> Result<AppState<FileStore>, StorageError> {
        let config = StorefrontConfig {
            data_dir: self.path.clone(),
            ..StorefrontConfig::default()
        };
        AppState::new(config, FileStore::open(&self.path)?)
    }

    /// Admin panel exporting into this directory.
    #[must_use]
    pub fn admin(&self) -> AdminState {
        AdminState::new(AdminConfig {
            export_dir: self.path.clone(),
            ..AdminConfig::default()
        })
    }
}

impl Drop for TempDataDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// A fresh in-memory page with default configuration.
///
/// # Panics
///
/// Panics if the empty store cannot be loaded.
#[must_use]
#[allow(clippy::expect_used)]
pub fn memory_page() -> AppState<MemoryStore> {
    AppState::new(StorefrontConfig::default(), MemoryStore::new()).expect("empty store loads")
}

/// Button data for a catalog product.
#[must_use]
pub fn product(id: &str, name: &str, price: &str) -> ProductData {
    ProductData {
        id: id.to_string(),
        name: name.to_string(),
        price: price.to_string(),
        image: format!("img/{id}.jpg"),
    }
}

/// A customer with every checkout field filled.
#[must_use]
pub fn customer(name: &str) -> CustomerInfo {
    CustomerInfo::new(
        name,
        format!("{}@example.com", name.to_lowercase()),
        "5555-0101",
        "6a Avenida 9-15, Zona 1",
    )
}

/// Raw value persisted under `key`.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn stored<S: KeyValueStore>(page: &AppState<S>, key: &str) -> Result<Option<String>, StorageError> {
    page.repo().store().get(key)
}
