use parking_lot::RwLock;
use std::sync::Arc;

use crate::config::{Config, MatcherConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub http_client: reqwest::Client,
    /// Matcher settings; requests rank against a snapshot, updates are last-write-wins.
    pub matcher: Arc<RwLock<MatcherConfig>>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let matcher = config.matcher.clone();

        Ok(Self {
            config,
            // The overall deadline is applied per request from MatcherConfig::timeout.
            http_client: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .build()?,
            matcher: Arc::new(RwLock::new(matcher)),
        })
    }

    pub fn matcher_snapshot(&self) -> MatcherConfig {
        self.matcher.read().clone()
    }
}
