// ============================================================================
// BOOKING TABLE VIEW - Navegación de semanas + grid días x franjas
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{on_click, ElementBuilder};
use crate::viewmodels::BookingTableViewModel;
use crate::views::booking_slot::render_booking_slot;

pub fn render_booking_table(
    vm: &BookingTableViewModel,
    logged_in: bool,
) -> Result<Element, JsValue> {
    let model = vm.model();
    let headers = model.headers();

    let previous = ElementBuilder::new("button")?
        .class("btn week-nav")
        .attr("type", "button")?
        .flag("disabled", !logged_in || model.loading)?
        .text("◀")
        .build();
    let vm_previous = vm.clone();
    on_click(&previous, move |_| {
        let vm = vm_previous.clone();
        spawn_local(async move { vm.previous_week().await });
    })?;

    let next = ElementBuilder::new("button")?
        .class("btn week-nav")
        .attr("type", "button")?
        .flag("disabled", !logged_in || model.loading)?
        .text("▶")
        .build();
    let vm_next = vm.clone();
    on_click(&next, move |_| {
        let vm = vm_next.clone();
        spawn_local(async move { vm.next_week().await });
    })?;

    let range = match (headers.first(), headers.last()) {
        (Some(first), Some(last)) => format!("{} - {}", first.date, last.date),
        _ => String::new(),
    };

    let mut container = ElementBuilder::new("section")?
        .class("booking-table")
        .child(
            ElementBuilder::new("div")?
                .class("week-header")
                .child(previous)?
                .child(ElementBuilder::new("span")?.class("week-range").text(&range).build())?
                .child(next)?
                .build(),
        )?;

    if model.loading {
        container = container.child(
            ElementBuilder::new("p")?
                .class("table-loading")
                .text("Loading...")
                .build(),
        )?;
    }
    if let Some(error) = &model.error {
        container = container.child(
            ElementBuilder::new("p")?
                .class("table-error")
                .text(error)
                .build(),
        )?;
    }

    // Cabecera: columna de horas + un día por columna
    let mut head_row = ElementBuilder::new("tr")?.child(ElementBuilder::new("th")?.build())?;
    for header in &headers {
        head_row = head_row.child(
            ElementBuilder::new("th")?
                .child(ElementBuilder::new("div")?.class("day-name").text(header.name).build())?
                .child(ElementBuilder::new("div")?.class("day-date").text(&header.date).build())?
                .build(),
        )?;
    }

    let mut body = ElementBuilder::new("tbody")?;
    for row in model.rows() {
        let mut tr = ElementBuilder::new("tr")?.child(
            ElementBuilder::new("th")?
                .class("slot-time")
                .text(&row.time_label)
                .build(),
        )?;
        for cell in &row.cells {
            tr = tr.child(render_booking_slot(cell, vm, logged_in && !model.loading)?)?;
        }
        body = body.child(tr.build())?;
    }

    let table = ElementBuilder::new("table")?
        .class("slots")
        .child(ElementBuilder::new("thead")?.child(head_row.build())?.build())?
        .child(body.build())?
        .build();

    Ok(container.child(table)?.build())
}
