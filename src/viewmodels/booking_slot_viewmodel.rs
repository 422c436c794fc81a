// ============================================================================
// BOOKING SLOT VIEWMODEL - Una celda del grid
// ============================================================================

use crate::models::{Slot, SlotStatus, SlotTime};
use crate::utils::constants::slot_time;

/// Acción disponible sobre un slot
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SlotAction {
    Book,
    Unbook,
    None,
}

#[derive(Clone, PartialEq, Debug)]
pub struct BookingSlotViewModel {
    pub slot: Slot,
    pub time: Option<SlotTime>,
}

impl BookingSlotViewModel {
    pub fn new(slot: Slot) -> Self {
        let time = slot_time(slot.id);
        Self { slot, time }
    }

    pub fn time_label(&self) -> String {
        self.time.map(|t| t.label()).unwrap_or_default()
    }

    pub fn action(&self) -> SlotAction {
        if self.slot.status.is_bookable() {
            SlotAction::Book
        } else if self.slot.status.is_booked_by_user() {
            SlotAction::Unbook
        } else {
            SlotAction::None
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self.slot.status {
            SlotStatus::Unavailable => "slot slot--unavailable",
            SlotStatus::Available => "slot slot--available",
            SlotStatus::BookedByOther => "slot slot--taken",
            SlotStatus::BookedByUser => "slot slot--mine",
            SlotStatus::Other(_) => "slot slot--unknown",
        }
    }

    pub fn button_text(&self) -> &'static str {
        match self.action() {
            SlotAction::Book => "Book",
            SlotAction::Unbook => "Cancel",
            SlotAction::None => match self.slot.status {
                SlotStatus::BookedByOther => "Taken",
                _ => "-",
            },
        }
    }
}
