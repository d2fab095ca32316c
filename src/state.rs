use crate::session::Session;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// One running instance serves one session; the lock serialises intents.
#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(data_path: PathBuf) -> Self {
        Self {
            data_path,
            session: Arc::new(Mutex::new(Session::default())),
        }
    }
}
