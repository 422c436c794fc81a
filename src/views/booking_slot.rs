// ============================================================================
// BOOKING SLOT VIEW - Celda del grid semanal
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{on_click, ElementBuilder};
use crate::viewmodels::{BookingSlotViewModel, BookingTableViewModel, SlotAction};

pub fn render_booking_slot(
    cell: &BookingSlotViewModel,
    table: &BookingTableViewModel,
    interactive: bool,
) -> Result<Element, JsValue> {
    let td = ElementBuilder::new("td")?
        .class(cell.css_class())
        .attr("data-date", &cell.slot.date)?
        .attr("data-slot", &cell.slot.id.to_string())?
        .build();

    let action = cell.action();
    if !interactive || action == SlotAction::None {
        td.set_text_content(Some(cell.button_text()));
        return Ok(td);
    }

    let button = ElementBuilder::new("button")?
        .class("slot-button")
        .attr("type", "button")?
        .attr("title", &cell.time_label())?
        .text(cell.button_text())
        .build();

    let table = table.clone();
    let date = cell.slot.date.clone();
    let slot_id = cell.slot.id;
    on_click(&button, move |_| {
        let table = table.clone();
        let date = date.clone();
        spawn_local(async move {
            let result = match action {
                SlotAction::Book => table.book(&date, slot_id).await,
                SlotAction::Unbook => table.unbook(&date, slot_id).await,
                SlotAction::None => Ok(()),
            };
            if let Err(e) = result {
                log::warn!("⚠️ [SLOT] {} slot {}: {}", date, slot_id, e);
            }
        });
    })?;

    td.append_child(&button)?;
    Ok(td)
}
