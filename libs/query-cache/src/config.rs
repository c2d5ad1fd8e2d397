use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct MemoryConfig {
    #[serde(default = "default_memory_capacity")]
    pub capacity: u64,
    #[serde(default = "default_memory_ttl_secs")]
    pub ttl_secs: u64,
    /// How often the background sweep evicts expired entries.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

fn default_memory_capacity() -> u64 { 10_000 }
fn default_memory_ttl_secs() -> u64 { 300 }
fn default_sweep_interval_secs() -> u64 { 30 }

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_memory_capacity(),
            ttl_secs: default_memory_ttl_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl MemoryConfig {
    pub fn ttl(&self) -> Duration { Duration::from_secs(self.ttl_secs) }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_config_default() {
        let config: MemoryConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config.capacity, 10_000);
        assert_eq!(config.ttl(), Duration::from_secs(300));
        assert_eq!(config.sweep_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_zero_sweep_interval_is_clamped() {
        let config = MemoryConfig {
            sweep_interval_secs: 0,
            ..Default::default()
        };

        assert_eq!(config.sweep_interval(), Duration::from_secs(1));
    }
}
