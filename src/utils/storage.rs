// ============================================================================
// STORAGE - Almacenamiento clave/valor textual
// ============================================================================
// En el navegador: `sessionStorage` (se borra al cerrar la pestaña).
// Fuera del navegador (tests): mapa en memoria con la misma semántica.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{ApiError, ApiResult};

pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> ApiResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> ApiResult<()>;
    fn remove_item(&self, key: &str) -> ApiResult<()>;
    /// Vacía todo el espacio de nombres, no solo las claves de la app
    fn clear(&self) -> ApiResult<()>;
}

/// Guarda `value` serializado como JSON
pub fn save_json<T: Serialize>(
    storage: &dyn KeyValueStorage,
    key: &str,
    value: &T,
) -> ApiResult<()> {
    let json = serde_json::to_string(value)
        .map_err(|e| ApiError::Storage(format!("Error serializando '{}': {}", key, e)))?;
    storage.remove_item(key)?;
    storage.set_item(key, &json)
}

/// Lee y deserializa una clave. Un valor corrupto cuenta como ausente.
pub fn load_json<T: DeserializeOwned>(storage: &dyn KeyValueStorage, key: &str) -> Option<T> {
    let json = match storage.get_item(key) {
        Ok(Some(json)) => json,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("⚠️ [STORAGE] No se pudo leer '{}': {}", key, e);
            return None;
        }
    };
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("⚠️ [STORAGE] Valor inválido en '{}': {}", key, e);
            None
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> ApiResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> ApiResult<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> ApiResult<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    fn clear(&self) -> ApiResult<()> {
        self.items.borrow_mut().clear();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserSessionStorage;

#[cfg(target_arch = "wasm32")]
mod browser {
    use gloo_storage::{SessionStorage, Storage};

    use super::KeyValueStorage;
    use crate::error::{ApiError, ApiResult};

    /// `window.sessionStorage` vía gloo-storage
    #[derive(Debug, Default, Clone, Copy)]
    pub struct BrowserSessionStorage;

    impl KeyValueStorage for BrowserSessionStorage {
        fn get_item(&self, key: &str) -> ApiResult<Option<String>> {
            SessionStorage::raw()
                .get_item(key)
                .map_err(|_| ApiError::Storage(format!("Error leyendo '{}' de sessionStorage", key)))
        }

        fn set_item(&self, key: &str, value: &str) -> ApiResult<()> {
            SessionStorage::raw()
                .set_item(key, value)
                .map_err(|_| ApiError::Storage(format!("Error guardando '{}' en sessionStorage", key)))
        }

        fn remove_item(&self, key: &str) -> ApiResult<()> {
            SessionStorage::delete(key);
            Ok(())
        }

        fn clear(&self) -> ApiResult<()> {
            SessionStorage::clear();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Pref {
        name: String,
        count: u32,
    }

    #[test]
    fn test_json_roundtrip() {
        let storage = MemoryStorage::new();
        let pref = Pref {
            name: "dryer".to_string(),
            count: 2,
        };
        save_json(&storage, "pref", &pref).unwrap();
        assert_eq!(load_json::<Pref>(&storage, "pref"), Some(pref));
        assert_eq!(load_json::<Pref>(&storage, "missing"), None);
    }

    #[test]
    fn test_corrupt_value_is_absent() {
        let storage = MemoryStorage::new();
        storage.set_item("pref", "{not json").unwrap();
        assert_eq!(load_json::<Pref>(&storage, "pref"), None);
    }

    #[test]
    fn test_clear_wipes_everything() {
        let storage = MemoryStorage::new();
        storage.set_item("a", "1").unwrap();
        storage.set_item("b", "2").unwrap();
        storage.clear().unwrap();
        assert!(storage.is_empty());
    }
}
