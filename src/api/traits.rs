//! The HRMS API surface
//!
//! This trait is the seam between the state/form layer and the transport, so
//! flows can be driven against the real backend or an in-memory double.

use async_trait::async_trait;

use super::types::{
    AttendanceQuery, AttendanceRecord, AttendanceStats, Employee, NewAttendance, NewEmployee,
};
use crate::error::ApiResult;

/// Operations exposed by the HRMS backend.
///
/// Every failure is reported as an [`ApiError`](crate::error::ApiError) whose
/// message is already normalized for display.
#[async_trait]
pub trait HrmsApi: Send + Sync {
    /// `GET /api/employees`
    async fn list_employees(&self) -> ApiResult<Vec<Employee>>;

    /// `GET /api/employees/{id}`
    async fn get_employee(&self, id: &str) -> ApiResult<Employee>;

    /// `POST /api/employees`
    async fn create_employee(&self, employee: &NewEmployee) -> ApiResult<Employee>;

    /// `DELETE /api/employees/{id}`
    async fn delete_employee(&self, id: &str) -> ApiResult<()>;

    /// `GET /api/attendance` with optional filters as query parameters
    async fn list_attendance(&self, query: &AttendanceQuery) -> ApiResult<Vec<AttendanceRecord>>;

    /// `GET /api/attendance/employee/{employeeId}`
    async fn attendance_for_employee(&self, employee_id: &str)
        -> ApiResult<Vec<AttendanceRecord>>;

    /// `POST /api/attendance`
    async fn create_attendance(&self, attendance: &NewAttendance) -> ApiResult<AttendanceRecord>;

    /// `GET /api/attendance/stats/{employeeId}`
    async fn attendance_stats(&self, employee_id: &str) -> ApiResult<AttendanceStats>;
}
