use crate::models::Activity;
use crate::session::Session;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(seed: Vec<Activity>) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::new(seed))),
        }
    }
}
