//! Persistence adapter for the slip.
//!
//! A scoped string key-value capability: the slip manager writes on every
//! mutation and reads once at construction so in-progress selections
//! survive a restart. Two keys are used, one for the serialized selection
//! sequence (a JSON array) and one for the bare currency code.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::SlipResult;

/// Store key for the serialized selection sequence
pub const SELECTIONS_KEY: &str = "betslip.selections";

/// Store key for the display currency code
pub const CURRENCY_KEY: &str = "betslip.currency";

/// Durable key-value capability consumed by the slip manager
pub trait SlipStore: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> SlipResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> SlipResult<()>;
}
