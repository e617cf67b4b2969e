//! HRMS backend API
//!
//! This module defines the REST surface the client consumes and a
//! `reqwest`-based implementation of it.

pub mod client;
pub mod traits;
pub mod types;

pub use client::ApiClient;
pub use traits::HrmsApi;
pub use types::{
    AttendanceQuery, AttendanceRecord, AttendanceStats, AttendanceStatus, Employee, NewAttendance,
    NewEmployee, UnknownStatus,
};
