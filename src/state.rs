use std::sync::Arc;
use tokio::sync::Mutex;

use crate::api::ApiClient;
use crate::config::Config;
use crate::history::{self, HistoryPager};
use crate::identity::IdentityStore;

#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub identity: IdentityStore,
    pub pager: Arc<Mutex<HistoryPager>>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            api: ApiClient::new(config.api_base_url.clone()),
            identity: IdentityStore::new(config.identity_path.clone()),
            pager: Arc::new(Mutex::new(HistoryPager::new(history::PAGE_SIZE))),
        }
    }
}
