// ============================================================================
// TOKEN STORAGE SERVICE - Token y usuario en sessionStorage
// ============================================================================
// Claves `auth-token` / `auth-user`, JSON. `clear()` vacía todo el storage.
// ============================================================================

use std::rc::Rc;

use crate::error::ApiResult;
use crate::models::{Token, User};
use crate::utils::constants::{TOKEN_KEY, USER_KEY};
use crate::utils::storage::{load_json, save_json, KeyValueStorage, MemoryStorage};

/// Persistencia del token y del usuario en el storage de sesión
#[derive(Clone)]
pub struct TokenStorageService {
    storage: Rc<dyn KeyValueStorage>,
}

impl TokenStorageService {
    pub fn new(storage: Rc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// `window.sessionStorage`
    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Self {
        Self::new(Rc::new(crate::utils::storage::BrowserSessionStorage))
    }

    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStorage::new()))
    }

    pub fn save_token(&self, token: &Token) -> ApiResult<()> {
        save_json(self.storage.as_ref(), TOKEN_KEY, token)
    }

    pub fn get_token(&self) -> Option<Token> {
        load_json(self.storage.as_ref(), TOKEN_KEY)
    }

    pub fn save_user(&self, user: &User) -> ApiResult<()> {
        save_json(self.storage.as_ref(), USER_KEY, user)
    }

    pub fn get_user(&self) -> Option<User> {
        load_json(self.storage.as_ref(), USER_KEY)
    }

    /// Vacía todo el storage de sesión, no solo las dos claves de auth
    pub fn clear(&self) -> ApiResult<()> {
        log::info!("🗑️ [STORAGE] Limpiando storage de sesión");
        self.storage.clear()
    }

    pub fn storage(&self) -> Rc<dyn KeyValueStorage> {
        self.storage.clone()
    }
}
