// Storage Jar
// Expiring key-value storage for the browser: localStorage with cookie fallback

#![warn(clippy::all)]

// Модули
pub mod api;
pub mod config;
pub mod storage;
pub mod utils;

// Re-exports для удобства
pub use api::StorageJar;
pub use config::Config;
pub use storage::{Backend, CookieMedium, DurableMedium, Entry, MemoryBackend, StoredItem};
pub use utils::error::{Result, StorageJarError};
pub use utils::time::{Clock, ManualClock, SystemClock};

#[cfg(target_arch = "wasm32")]
pub use storage::WebBackend;

// WASM-specific bindings
#[cfg(target_arch = "wasm32")]
pub mod wasm;
