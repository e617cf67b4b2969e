//! HRMS Lite client
//!
//! A typed client for the HRMS Lite REST backend: employee and attendance
//! records, form validation with server error attribution, and an
//! application state container with auto-dismissing notifications.

pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod logging;
pub mod notification;
pub mod state;
pub mod ui;
