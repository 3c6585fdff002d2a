use crate::{
    config::AppConfig,
    models::Resource,
    services::records::RecordService,
    store::SharedStore,
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: SharedStore,
}

impl AppState {
    pub fn new(config: AppConfig, store: SharedStore) -> Self {
        Self { config, store }
    }

    pub fn records<T: Resource>(&self) -> RecordService<T> {
        RecordService::new(self.store.clone(), self.config.store_timeout)
    }
}
