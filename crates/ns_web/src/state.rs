use std::sync::Arc;
use ns_sources::NewsManager;

pub struct AppState {
    pub manager: Arc<NewsManager>,
}
