use crate::adapters::{ApiClient, FileStore};
use crate::config::AppConfig;
use crate::core::listings::ListingStore;
use crate::core::view::ViewState;
use crate::core::{ConfigProvider, KeyValueStore, View};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::sync::Arc;

pub type SharedStore = Arc<dyn KeyValueStore>;

/// Everything a command needs, passed explicitly instead of living in globals.
pub struct AppContext {
    config: AppConfig,
    store: SharedStore,
    client: ApiClient,
}

impl AppContext {
    /// File-backed storage under `storage.data_dir`.
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let store: SharedStore = Arc::new(FileStore::new(config.data_dir()));
        Self::with_store(config, store)
    }

    pub fn with_store(config: AppConfig, store: SharedStore) -> Result<Self> {
        config.validate()?;
        let client = ApiClient::from_config(&config)?;
        tracing::debug!(
            "Context ready: api={}, data_dir={}, namespace={}",
            config.api_base_url(),
            config.data_dir(),
            config.namespace()
        );
        Ok(Self {
            config,
            store,
            client,
        })
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn listings(&self) -> ListingStore<SharedStore> {
        ListingStore::load(self.store.clone(), self.config.namespace())
    }

    pub fn view_state(&self) -> ViewState<SharedStore> {
        ViewState::new(self.store.clone(), self.config.namespace())
    }

    /// Records `view` as the active tool.
    pub fn enter(&self, view: View) {
        self.view_state().save(view);
    }
}
