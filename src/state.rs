use std::sync::Arc;

use crate::config::Config;
use crate::feed::FeedProcessor;
use crate::feed::log::FeedErrorLog;
use crate::forms::FormRegistry;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub processor: FeedProcessor,
    pub feed_log: Arc<FeedErrorLog>,
    pub forms: FormRegistry,
}
