use std::sync::Arc;

use blazeink_core::ContentStore;

use crate::config::AppConfig;
use crate::crew::ArticleGenerator;

/// Shared application state, passed to all handlers via Axum's `State` extractor.
/// Wrapped in `Arc` so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    store: ContentStore,
    generator: Arc<dyn ArticleGenerator>,
    config: AppConfig,
}

impl AppState {
    pub fn new(store: ContentStore, generator: Arc<dyn ArticleGenerator>, config: AppConfig) -> Self {
        Self {
            inner: Arc::new(InnerState {
                store,
                generator,
                config,
            }),
        }
    }

    pub fn store(&self) -> &ContentStore {
        &self.inner.store
    }

    pub fn generator(&self) -> &dyn ArticleGenerator {
        self.inner.generator.as_ref()
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }
}
