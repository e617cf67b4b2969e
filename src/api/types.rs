//! Wire types for the HRMS REST API
//!
//! Records are owned by the backend; the client only reads the handful of
//! fields it renders and keeps everything else intact in `extra`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An employee record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Backend-assigned record id, used for deletion.
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Human-assigned employee code (e.g. "EMP001").
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    /// Fields the client does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for creating an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
}

/// Attendance status for a single day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
}

impl AttendanceStatus {
    /// All accepted statuses, in display order.
    pub const ALL: [AttendanceStatus; 2] = [AttendanceStatus::Present, AttendanceStatus::Absent];

    /// Returns the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known attendance status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown attendance status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for AttendanceStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// An attendance record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub employee_id: String,
    /// Date as sent by the backend (`YYYY-MM-DD` or an ISO timestamp).
    pub date: String,
    /// Kept as text so unexpected statuses still render.
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AttendanceRecord {
    /// Returns true if the record marks the employee present.
    pub fn is_present(&self) -> bool {
        self.status == AttendanceStatus::Present.as_str()
    }
}

/// Payload for marking attendance.
///
/// The status is always sent; it defaults to `Present`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAttendance {
    pub employee_id: String,
    pub date: String,
    #[serde(default)]
    pub status: AttendanceStatus,
}

/// Optional filters for listing attendance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AttendanceStatus>,
}

impl AttendanceQuery {
    /// Returns true if no filter is set.
    pub fn is_empty(&self) -> bool {
        self.employee_id.is_none() && self.date.is_none() && self.status.is_none()
    }
}

/// Per-employee attendance totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStats {
    pub total_days: u32,
    pub present_days: u32,
    pub absent_days: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_deserialize_keeps_extra_fields() {
        let json = r#"{
            "_id": "65f1c0",
            "employeeId": "EMP001",
            "fullName": "Ada Lovelace",
            "email": "ada@example.com",
            "department": "Engineering",
            "createdAt": "2025-01-05T10:00:00Z"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "65f1c0");
        assert_eq!(employee.employee_id, "EMP001");
        assert_eq!(employee.full_name, "Ada Lovelace");
        assert_eq!(
            employee.extra.get("createdAt"),
            Some(&Value::String("2025-01-05T10:00:00Z".to_string()))
        );
    }

    #[test]
    fn test_employee_accepts_plain_id() {
        let json = r#"{"id": "7", "employeeId": "E7", "fullName": "N", "email": "n@x.io", "department": "HR"}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "7");
    }

    #[test]
    fn test_new_employee_serializes_camel_case() {
        let payload = NewEmployee {
            employee_id: "EMP002".to_string(),
            full_name: "Grace Hopper".to_string(),
            email: "grace@example.com".to_string(),
            department: "Research".to_string(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["employeeId"], "EMP002");
        assert_eq!(json["fullName"], "Grace Hopper");
        assert_eq!(json["email"], "grace@example.com");
        assert_eq!(json["department"], "Research");
    }

    #[test]
    fn test_new_attendance_defaults_to_present() {
        let payload = NewAttendance {
            employee_id: "EMP001".to_string(),
            date: "2025-01-05".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["status"], "Present");

        let parsed: NewAttendance =
            serde_json::from_str(r#"{"employeeId": "EMP001", "date": "2025-01-05"}"#).unwrap();
        assert_eq!(parsed.status, AttendanceStatus::Present);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("Present".parse::<AttendanceStatus>(), Ok(AttendanceStatus::Present));
        assert_eq!("Absent".parse::<AttendanceStatus>(), Ok(AttendanceStatus::Absent));
        assert_eq!(
            "Late".parse::<AttendanceStatus>(),
            Err(UnknownStatus("Late".to_string()))
        );
        assert_eq!(AttendanceStatus::Absent.to_string(), "Absent");
    }

    #[test]
    fn test_attendance_query_skips_unset_filters() {
        let query = AttendanceQuery {
            employee_id: Some("EMP001".to_string()),
            ..Default::default()
        };
        assert!(!query.is_empty());
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json, serde_json::json!({"employeeId": "EMP001"}));
        assert!(AttendanceQuery::default().is_empty());
    }

    #[test]
    fn test_attendance_record_and_stats_deserialize() {
        let record: AttendanceRecord = serde_json::from_str(
            r#"{"_id": "a1", "employeeId": "EMP001", "date": "2025-01-05", "status": "Absent"}"#,
        )
        .unwrap();
        assert!(!record.is_present());

        let stats: AttendanceStats =
            serde_json::from_str(r#"{"totalDays": 10, "presentDays": 8, "absentDays": 2}"#)
                .unwrap();
        assert_eq!(stats.total_days, 10);
        assert_eq!(stats.present_days, 8);
        assert_eq!(stats.absent_days, 2);
    }
}
