// ============================================================================
// APP - Aplicación principal
// ============================================================================
// Construye sesión, servicios y viewmodels; re-renderiza cuando cambia el
// estado de cualquier viewmodel (varios cambios seguidos = un solo render).
// ============================================================================

use std::cell::Cell;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, clear_children, get_element_by_id, release_listeners};
use crate::services::{ApiClient, AuthService, BookingService, TokenStorageService};
use crate::state::SessionState;
use crate::viewmodels::{BookingTableViewModel, LoginViewModel};
use crate::views::render_app;

thread_local! {
    static RENDER_SCHEDULED: Cell<bool> = const { Cell::new(false) };
}

/// Programa un re-render en el próximo tick (agrupa updates)
fn schedule_rerender() {
    if RENDER_SCHEDULED.with(|flag| flag.replace(true)) {
        return;
    }
    Timeout::new(0, move || {
        RENDER_SCHEDULED.with(|flag| flag.set(false));
        crate::rerender_app();
    })
    .forget();
}

pub struct App {
    session: SessionState,
    login: LoginViewModel,
    table: BookingTableViewModel,
    root: Element,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let session = SessionState::new(TokenStorageService::browser());
        let api = ApiClient::from_config(session.clone());
        log::info!("🌐 [APP] API: {}", api.base_url());

        let login = LoginViewModel::new(AuthService::new(api.clone()));
        let table = BookingTableViewModel::new(BookingService::new(api));

        login.bind_session();
        table.bind_session(|vm| {
            spawn_local(async move { vm.refresh().await });
        });

        login.state().subscribe(|_| schedule_rerender());
        table.state().subscribe(|_| schedule_rerender());

        Ok(Self {
            session,
            login,
            table,
            root,
        })
    }

    pub fn render(&self) -> Result<(), JsValue> {
        // Otra pestaña pudo cerrar la sesión
        self.session.check_status();
        clear_children(&self.root);
        // Los elementos viejos ya no están en el DOM
        release_listeners();
        let view = render_app(&self.login, &self.table)?;
        append_child(&self.root, &view)
    }
}
