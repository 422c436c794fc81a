// Utils compartidos

pub mod constants;
pub mod dates;
pub mod storage;

pub use constants::*;
pub use storage::{load_json, save_json, KeyValueStorage, MemoryStorage};

#[cfg(target_arch = "wasm32")]
pub use storage::BrowserSessionStorage;
