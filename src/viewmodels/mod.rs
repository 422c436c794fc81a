// ============================================================================
// VIEWMODELS - Estado + lógica de UI (sin DOM)
// ============================================================================

pub mod booking_slot_viewmodel;
pub mod booking_table_viewmodel;
pub mod login_viewmodel;

pub use booking_slot_viewmodel::{BookingSlotViewModel, SlotAction};
pub use booking_table_viewmodel::{BookingTableViewModel, DayHeader, SlotRow, TableModel};
pub use login_viewmodel::{LoginModel, LoginViewModel};
