use std::sync::Arc;

use store::ItemStore;

use super::config::Config;

pub struct State {
    pub config: Config,
    pub store: ItemStore,
}

impl State {
    pub fn new(config: Config) -> Arc<Self> {
        let store = ItemStore::new(&config.items_path);

        Arc::new(Self { config, store })
    }
}
