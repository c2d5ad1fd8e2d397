use std::time::Duration;

use meetup_query_handlers::EventCache;
use tokio::{task::JoinHandle, time::interval};
use tracing::{debug, info};

#[derive(Clone)]
pub struct CacheSweeper {
    cache: EventCache,
    every: Duration,
}

impl CacheSweeper {
    pub fn new(cache: EventCache, every: Duration) -> Self {
        Self { cache, every }
    }

    /// Start background job evicting expired cache entries
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut sweep_interval = interval(self.every);
            sweep_interval.tick().await; // Skip first immediate tick

            info!(every = ?self.every, "Starting cache sweep job");

            loop {
                sweep_interval.tick().await;
                self.sweep_now().await;
            }
        })
    }

    /// Run one sweep immediately.
    pub async fn sweep_now(&self) {
        let before = self.cache.entry_count();
        self.cache.sweep().await;
        debug!(before, after = self.cache.entry_count(), "cache swept");
    }
}
