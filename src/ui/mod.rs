//! Terminal output for the HRMS client.
//!
//! Holds the color theme and display settings, and renders employee and
//! attendance tables. Notification panels live in [`crate::notification`].

mod colors;
mod display;
mod table;

pub use colors::Theme;
pub use display::HrmsDisplay;
pub use table::{format_record_date, TableRenderer};
