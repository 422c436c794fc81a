use serde::{Deserialize, Serialize};

/// Índice dentro del horario diario fijo (0..=4)
pub type SlotId = u8;

// ============================================================================
// SLOT STATUS - Códigos definidos por el servidor
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug, Default)]
#[serde(from = "i64", into = "i64")]
pub enum SlotStatus {
    #[default]
    Unavailable,
    Available,
    BookedByOther,
    BookedByUser,
    /// Código que el cliente no conoce, se conserva tal cual
    Other(i64),
}

impl SlotStatus {
    pub fn code(&self) -> i64 {
        match self {
            SlotStatus::Unavailable => 0,
            SlotStatus::Available => 1,
            SlotStatus::BookedByOther => 2,
            SlotStatus::BookedByUser => 3,
            SlotStatus::Other(code) => *code,
        }
    }

    /// Libre: el usuario puede reservarlo
    pub fn is_bookable(&self) -> bool {
        matches!(self, SlotStatus::Available)
    }

    pub fn is_booked_by_user(&self) -> bool {
        matches!(self, SlotStatus::BookedByUser)
    }
}

impl From<i64> for SlotStatus {
    fn from(code: i64) -> Self {
        match code {
            0 => SlotStatus::Unavailable,
            1 => SlotStatus::Available,
            2 => SlotStatus::BookedByOther,
            3 => SlotStatus::BookedByUser,
            other => SlotStatus::Other(other),
        }
    }
}

impl From<SlotStatus> for i64 {
    fn from(status: SlotStatus) -> Self {
        status.code()
    }
}

// ============================================================================
// SLOT - Unidad reservable
// ============================================================================

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct Slot {
    /// Clave de día, formato `YYYY/MM/DD`
    pub date: String,
    pub id: SlotId,
    pub status: SlotStatus,
}

impl Slot {
    pub fn new(date: &str, id: SlotId, status: SlotStatus) -> Self {
        Self {
            date: date.to_string(),
            id,
            status,
        }
    }
}

/// Franja horaria de un slot
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct SlotTime {
    pub start_hour: u8,
    pub end_hour: u8,
}

impl SlotTime {
    pub const fn new(start_hour: u8, end_hour: u8) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    pub fn label(&self) -> String {
        format!("{:02}:00 - {:02}:00", self.start_hour, self.end_hour)
    }
}
