use crate::models::slot::{SlotId, SlotTime};

/// Claves de `sessionStorage`
pub const TOKEN_KEY: &str = "auth-token";
pub const USER_KEY: &str = "auth-user";

/// Formato de las claves de día del grid semanal
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// Formatos de fecha que puede enviar el API (la clave se conserva tal cual)
pub const SERVER_DATE_FORMATS: [&str; 2] = [DATE_FORMAT, "%Y-%m-%d"];

/// Horario diario fijo: 5 franjas de 3 horas
pub const SLOT_SCHEDULE: [SlotTime; 5] = [
    SlotTime::new(7, 10),
    SlotTime::new(10, 13),
    SlotTime::new(13, 16),
    SlotTime::new(16, 19),
    SlotTime::new(19, 22),
];

pub const DAYS_OF_WEEK: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// IDs de slot válidos, en orden de render
pub fn slot_ids() -> impl Iterator<Item = SlotId> {
    0..SLOT_SCHEDULE.len() as SlotId
}

pub fn slot_time(id: SlotId) -> Option<SlotTime> {
    SLOT_SCHEDULE.get(id as usize).copied()
}
