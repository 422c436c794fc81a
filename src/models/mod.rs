pub mod auth;
pub mod booking;
pub mod slot;
pub mod week;

pub use auth::{
    ErrorBody, Expiration, LoginForm, RegisterRequest, RegisterResponse, Token, User, UserProfile,
};
pub use booking::{BookSlotRequest, BookingResult};
pub use slot::{Slot, SlotId, SlotStatus, SlotTime};
pub use week::{RawSlotEntry, RawWeek, WeekGrid};
