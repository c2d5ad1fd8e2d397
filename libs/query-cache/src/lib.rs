pub mod config;
pub mod key;
pub mod macros;
pub mod memory;

pub use config::MemoryConfig;
pub use key::{CacheKey, ScopedKey};
pub use memory::{CachedEntry, QueryCache};
