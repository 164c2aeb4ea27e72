//! Pick the best available storage backend.
//!
//! Priority: window.localStorage → Memory (fallback, e.g. storage disabled
//! in private browsing or running under Node).

use std::rc::Rc;
use chat_core::ports::StoragePort;
use super::{LocalStorage, MemoryStorage};

/// Returns a trait object so callers are backend-agnostic.
pub fn auto_detect_storage() -> Rc<dyn StoragePort> {
    match LocalStorage::open() {
        Ok(storage) => {
            log::info!("Storage backend: localStorage");
            Rc::new(storage)
        }
        Err(e) => {
            log::warn!("localStorage unavailable ({}), falling back to memory", e);
            Rc::new(MemoryStorage::new())
        }
    }
}
