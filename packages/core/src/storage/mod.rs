// Модуль хранилища: носители (localStorage / cookie) и их модели

pub mod cookie;
pub mod medium;
pub mod memory;
pub mod models;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use medium::{Backend, CookieMedium, DurableMedium};
pub use memory::MemoryBackend;
pub use models::{Entry, StoredItem};

#[cfg(target_arch = "wasm32")]
pub use web::WebBackend;
