//! Shared application state passed to every session task.
//! Built once in main and cloned per connection; no static state anywhere.

use std::sync::Arc;

use crate::config::Config;
use crate::history::HistoryLog;
use crate::registry::Registry;

#[derive(Clone)]
pub struct AppState {
    /// Username -> connection sender map, bounded by `max_clients`.
    pub registry: Arc<Registry>,
    /// Append-only chat archive.
    pub history: Arc<HistoryLog>,
    /// Number of trailing history entries replayed to a new client.
    pub history_size: usize,
    /// Per-connection idle read timeout in seconds. 0 disables it.
    pub idle_timeout_secs: u64,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            registry: Arc::new(Registry::new(config.max_clients)),
            history: Arc::new(HistoryLog::new()),
            history_size: config.history_size,
            idle_timeout_secs: config.idle_timeout_secs,
        }
    }
}
