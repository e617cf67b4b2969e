//! Per-employee attendance listing.

use crate::api::{AttendanceRecord, AttendanceStats, HrmsApi};

/// Attendance records and totals for the selected employee.
///
/// Records failures are shown in the view; a stats failure is only logged
/// and leaves the totals unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceView {
    selected: Option<String>,
    records: Vec<AttendanceRecord>,
    stats: Option<AttendanceStats>,
    loading: bool,
    error: Option<String>,
    /// Refresh key the current data was loaded for.
    loaded_key: Option<u64>,
}

impl AttendanceView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn stats(&self) -> Option<&AttendanceStats> {
        self.stats.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Selects an employee by employee code; an empty code clears the view.
    pub fn select(&mut self, employee_id: impl Into<String>) {
        let employee_id = employee_id.into();
        let employee_id = employee_id.trim();
        if employee_id.is_empty() {
            *self = Self::default();
            return;
        }
        if self.selected.as_deref() != Some(employee_id) {
            self.selected = Some(employee_id.to_string());
            self.loaded_key = None;
        }
    }

    /// Returns true if the data is missing or older than `refresh_key`.
    pub fn needs_refresh(&self, refresh_key: u64) -> bool {
        self.selected.is_some() && self.loaded_key != Some(refresh_key)
    }

    /// Loads records and totals for the selected employee.
    pub async fn refresh<A: HrmsApi + ?Sized>(&mut self, api: &A, refresh_key: u64) {
        let Some(employee_id) = self.selected.clone() else {
            self.records.clear();
            self.stats = None;
            return;
        };

        self.loading = true;
        self.error = None;
        let (records, stats) = tokio::join!(
            api.attendance_for_employee(&employee_id),
            api.attendance_stats(&employee_id)
        );
        self.loading = false;

        match records {
            Ok(records) => self.records = records,
            Err(error) => self.error = Some(error.message),
        }
        match stats {
            Ok(stats) => self.stats = Some(stats),
            Err(error) => {
                tracing::warn!(employee_id = %employee_id, error = %error, "Failed to load stats");
            }
        }
        self.loaded_key = Some(refresh_key);
    }
}
