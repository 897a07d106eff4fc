use crate::store::EntryStore;
use crate::tracker::Tracker;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub tracker: Arc<Mutex<Tracker>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, store: EntryStore) -> Self {
        Self {
            data_path,
            tracker: Arc::new(Mutex::new(Tracker::new(store))),
        }
    }
}
