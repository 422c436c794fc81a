pub mod app;
pub mod booking_slot;
pub mod booking_table;
pub mod login;

pub use app::render_app;
pub use booking_slot::render_booking_slot;
pub use booking_table::render_booking_table;
pub use login::render_login;
