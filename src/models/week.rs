// ============================================================================
// WEEK GRID - Fecha -> (slot id -> Slot)
// ============================================================================
// El API devuelve un mapa compacto fecha -> (id como string -> status) o, en
// backends más nuevos, objetos slot completos. Aquí se normaliza siempre a
// registros `Slot` completos.
// ============================================================================

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::models::slot::{Slot, SlotId, SlotStatus};
use crate::utils::constants::{slot_ids, slot_time};
use crate::utils::dates::{format_date, week_dates};

/// Entrada cruda de un slot en la respuesta de `/booking/getweek`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(untagged)]
pub enum RawSlotEntry {
    Status(i64),
    Slot {
        #[serde(default)]
        date: Option<String>,
        #[serde(default)]
        id: Option<SlotId>,
        status: i64,
    },
}

impl RawSlotEntry {
    pub fn status(&self) -> SlotStatus {
        match self {
            RawSlotEntry::Status(code) | RawSlotEntry::Slot { status: code, .. } => {
                SlotStatus::from(*code)
            }
        }
    }
}

/// Respuesta cruda: fecha -> (id como string -> entrada)
pub type RawWeek = BTreeMap<String, BTreeMap<String, RawSlotEntry>>;

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
#[serde(transparent)]
pub struct WeekGrid {
    days: BTreeMap<String, BTreeMap<SlotId, Slot>>,
}

impl WeekGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normaliza la respuesta cruda. Fecha e id de cada `Slot` salen siempre
    /// de su posición en el grid.
    pub fn from_raw(raw: RawWeek) -> ApiResult<Self> {
        let mut days = BTreeMap::new();
        for (date, entries) in raw {
            let mut slots = BTreeMap::new();
            for (slot_key, entry) in entries {
                let id: SlotId = slot_key.trim().parse().map_err(|_| {
                    ApiError::Parse(format!("Invalid slot id '{}' for {}", slot_key, date))
                })?;
                if slot_time(id).is_none() {
                    log::warn!(
                        "⚠️ [WEEK] Slot {} fuera del horario diario en {}, se ignora",
                        id,
                        date
                    );
                    continue;
                }
                if let RawSlotEntry::Slot {
                    date: Some(entry_date),
                    ..
                } = &entry
                {
                    if entry_date != &date {
                        log::warn!(
                            "⚠️ [WEEK] Slot {} dice fecha {} pero está bajo {}, se usa la clave",
                            id,
                            entry_date,
                            date
                        );
                    }
                }
                slots.insert(id, Slot::new(&date, id, entry.status()));
            }
            days.insert(date, slots);
        }
        Ok(Self { days })
    }

    /// Grid vacío de la semana en `offset`: 7 días x 5 slots con status 0
    pub fn placeholder(reference: NaiveDate, offset: i64) -> Self {
        let days = week_dates(reference, offset)
            .into_iter()
            .map(format_date)
            .map(|date| {
                let slots = slot_ids()
                    .map(|id| (id, Slot::new(&date, id, SlotStatus::default())))
                    .collect();
                (date, slots)
            })
            .collect();
        Self { days }
    }

    pub fn get(&self, date: &str, id: SlotId) -> Option<&Slot> {
        self.days.get(date)?.get(&id)
    }

    /// Cambia el status de un slot existente. Devuelve `false` si no existe.
    pub fn set_status(&mut self, date: &str, id: SlotId, status: SlotStatus) -> bool {
        match self.days.get_mut(date).and_then(|slots| slots.get_mut(&id)) {
            Some(slot) => {
                slot.status = status;
                true
            }
            None => false,
        }
    }

    /// Fechas en orden cronológico (`YYYY/MM/DD` y `YYYY-MM-DD` ordenan bien)
    pub fn dates(&self) -> Vec<String> {
        self.days.keys().cloned().collect()
    }

    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.days.values().flat_map(|slots| slots.values())
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
