// ============================================================================
// LAUNDRY BOOKING - FRONTEND MVVM (RUST + WASM)
// ============================================================================
// - Views: funciones que renderizan DOM (sin lógica)
// - ViewModels: estado + lógica UI
// - Services: comunicación con el API
// - State: sesión reactiva (Rc<RefCell> + suscripciones)
// - Models: estructuras compartidas con el backend
// ============================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod views;

pub use error::{ApiError, ApiResult};

#[cfg(target_arch = "wasm32")]
mod entry {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    use crate::app::App;
    use crate::config::CONFIG;

    thread_local! {
        static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::new(CONFIG.log_level()));
        log::info!("🚀 Laundry Booking - Rust + MVVM ({})", CONFIG.environment);

        let app = App::new()?;
        app.render()?;

        APP.with(|cell| *cell.borrow_mut() = Some(app));
        Ok(())
    }

    pub fn rerender_app() {
        APP.with(|cell| match cell.borrow().as_ref() {
            Some(app) => {
                if let Err(e) = app.render() {
                    log::error!("❌ [RERENDER] Error re-renderizando: {:?}", e);
                }
            }
            None => log::warn!("⚠️ [RERENDER] App no está inicializada"),
        });
    }

    /// Re-render completo (llamable desde JavaScript)
    #[wasm_bindgen]
    pub fn rerender_app_wasm() {
        rerender_app();
    }
}

#[cfg(target_arch = "wasm32")]
pub(crate) use entry::rerender_app;
