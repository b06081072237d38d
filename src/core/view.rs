use crate::domain::model::View;
use crate::domain::ports::KeyValueStore;

pub const VIEW_KEY: &str = "view";

/// Remembers which tool was open last. Storage problems never surface.
pub struct ViewState<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> ViewState<S> {
    pub fn new(store: S, namespace: &str) -> Self {
        Self {
            store,
            key: format!("{}.{}", namespace, VIEW_KEY),
        }
    }

    pub fn load(&self) -> View {
        match self.store.get(&self.key) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|_| {
                tracing::debug!("Ignoring unknown stored view {:?}", raw);
                View::default()
            }),
            Ok(None) => View::default(),
            Err(e) => {
                tracing::warn!("Could not read {}: {}", self.key, e);
                View::default()
            }
        }
    }

    pub fn save(&self, view: View) {
        if let Err(e) = self.store.set(&self.key, view.id()) {
            tracing::warn!("Could not persist view to {}: {}", self.key, e);
        }
    }
}
