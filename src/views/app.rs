// ============================================================================
// APP VIEW - Layout principal
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::ElementBuilder;
use crate::viewmodels::{BookingTableViewModel, LoginViewModel};
use crate::views::{render_booking_table, render_login};

pub fn render_app(
    login: &LoginViewModel,
    table: &BookingTableViewModel,
) -> Result<Element, JsValue> {
    let logged_in = login.model().is_logged_in();

    let header = ElementBuilder::new("header")?
        .class("app-header")
        .child(ElementBuilder::new("h1")?.text("Laundry Booking").build())?
        .child(render_login(login)?)?
        .build();

    ElementBuilder::new("div")?
        .class("app-container")
        .child(header)?
        .child(render_booking_table(table, logged_in)?)
        .map(|builder| builder.build())
}
