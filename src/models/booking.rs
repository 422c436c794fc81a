use serde::{Deserialize, Serialize};

use crate::models::slot::SlotId;

/// Cuerpo JSON de `/booking/book_slot` y `/booking/unbook_slot`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct BookSlotRequest {
    pub date_str: String,
    pub slot_id: SlotId,
}

impl BookSlotRequest {
    pub fn new(date: &str, slot_id: SlotId) -> Self {
        Self {
            date_str: date.to_string(),
            slot_id,
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct BookingResult {
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    pub date: String,
    pub slot_id: SlotId,
    /// Registros modificados por la escritura. 0 = el slot ya no estaba libre.
    pub matched_count: u32,
}

impl BookingResult {
    pub fn matched(&self) -> bool {
        self.matched_count > 0
    }
}
