pub mod callback;
pub mod classify;
pub mod config;
pub mod driver;
pub mod format;
pub mod inspect;
pub mod report;
pub mod stats;
pub mod store;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export commonly used items
pub use config::InspectorConfig;
pub use report::Report;
pub use store::{KeyType, RedisStore, Store, StoreError};
