// ============================================================================
// EVENT HANDLING
// ============================================================================
// Los closures de los listeners se guardan en LISTENERS hasta el siguiente
// render, que los suelta con `release_listeners()` antes de reconstruir.
// ============================================================================

use std::cell::RefCell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, MouseEvent};

type Listener = Closure<dyn FnMut(Event)>;

thread_local! {
    static LISTENERS: RefCell<Vec<Listener>> = const { RefCell::new(Vec::new()) };
}

fn listen<F>(element: &Element, event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure: Listener = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    element.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    LISTENERS.with(|listeners| listeners.borrow_mut().push(closure));
    Ok(())
}

/// Suelta los closures de la vista anterior (y lo que capturan).
/// No llamar desde dentro de un listener.
pub fn release_listeners() {
    let released = LISTENERS.with(|listeners| std::mem::take(&mut *listeners.borrow_mut()));
    log::debug!("🧹 [DOM] {} listeners liberados", released.len());
}

pub fn on_click<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    listen(element, "click", move |event: Event| {
        if let Ok(event) = event.dyn_into::<MouseEvent>() {
            handler(event);
        }
    })
}

/// `submit` de un `<form>`; evita la recarga de la página
pub fn on_submit<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    listen(element, "submit", move |event: Event| {
        event.prevent_default();
        handler();
    })
}
