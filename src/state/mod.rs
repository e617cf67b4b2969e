//! Application state and its transitions.
//!
//! All mutations of [`AppState`] go through [`AppState::apply`] with a typed
//! [`Action`], so every transition is visible in the logs. [`App`] drives the
//! API calls and dispatches the resulting actions; [`AttendanceView`] holds
//! the per-employee attendance listing.

mod app;
mod attendance;

pub use app::App;
pub use attendance::AttendanceView;

use std::fmt;

use crate::api::Employee;
use crate::notification::{Notification, NotificationId};

/// Top-level views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Employees,
    Attendance,
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tab::Employees => write!(f, "employees"),
            Tab::Attendance => write!(f, "attendance"),
        }
    }
}

/// A state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectTab(Tab),
    /// Shows or hides the add-employee form.
    ToggleEmployeeForm,
    /// Shows or hides the mark-attendance form.
    ToggleAttendanceForm,
    /// An employee list request was dispatched.
    LoadStarted,
    /// The employee list arrived.
    Loaded(Vec<Employee>),
    /// The employee list request failed with this message.
    LoadFailed(String),
    /// The backend created this employee.
    EmployeeAdded(Employee),
    /// The employee with this record id was deleted.
    EmployeeDeleted(String),
    /// Attendance was recorded; attendance listings must reload.
    AttendanceMarked,
    /// Shows a notification, replacing the current one.
    Notify(Notification),
    /// Dismisses the notification with this id, if it is still shown.
    DismissNotification(NotificationId),
}

/// Everything the top-level view renders.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub active_tab: Tab,
    pub employees: Vec<Employee>,
    /// True while the employee list is loading.
    pub loading: bool,
    /// Message from the last failed list load.
    pub error: Option<String>,
    pub notification: Option<Notification>,
    pub employee_form_open: bool,
    pub attendance_form_open: bool,
    /// Bumped whenever attendance listings must reload.
    pub attendance_refresh_key: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            active_tab: Tab::default(),
            employees: Vec::new(),
            // The list is fetched on start.
            loading: true,
            error: None,
            notification: None,
            employee_form_open: false,
            attendance_form_open: false,
            attendance_refresh_key: 0,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a single action.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SelectTab(tab) => {
                tracing::debug!(tab = %tab, "Selected tab");
                self.active_tab = tab;
            }
            Action::ToggleEmployeeForm => {
                self.employee_form_open = !self.employee_form_open;
            }
            Action::ToggleAttendanceForm => {
                self.attendance_form_open = !self.attendance_form_open;
            }
            Action::LoadStarted => {
                self.loading = true;
                self.error = None;
            }
            Action::Loaded(employees) => {
                tracing::debug!(count = employees.len(), "Loaded employees");
                self.employees = employees;
                self.loading = false;
            }
            Action::LoadFailed(message) => {
                tracing::debug!(message = %message, "Employee list failed to load");
                self.error = Some(message);
                self.loading = false;
            }
            Action::EmployeeAdded(employee) => {
                tracing::debug!(employee_id = %employee.employee_id, "Employee added");
                self.employees.push(employee);
                self.employee_form_open = false;
            }
            Action::EmployeeDeleted(id) => {
                let before = self.employees.len();
                self.employees.retain(|e| e.id != id);
                tracing::debug!(
                    id = %id,
                    removed = before - self.employees.len(),
                    "Employee deleted"
                );
            }
            Action::AttendanceMarked => {
                self.attendance_form_open = false;
                self.attendance_refresh_key += 1;
                tracing::debug!(
                    refresh_key = self.attendance_refresh_key,
                    "Attendance marked"
                );
            }
            Action::Notify(notification) => {
                tracing::debug!(
                    notification = %notification.id,
                    error = notification.is_error(),
                    "Showing notification"
                );
                self.notification = Some(notification);
            }
            Action::DismissNotification(id) => {
                if self.notification.as_ref().map(|n| n.id) == Some(id) {
                    tracing::trace!(notification = %id, "Dismissed notification");
                    self.notification = None;
                } else {
                    tracing::trace!(notification = %id, "Ignoring stale dismissal");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn employee(id: &str, code: &str) -> Employee {
        Employee {
            id: id.to_string(),
            employee_id: code.to_string(),
            full_name: "Test Person".to_string(),
            email: "test@example.com".to_string(),
            department: "Ops".to_string(),
            extra: Map::new(),
        }
    }

    #[test]
    fn test_initial_state() {
        let state = AppState::new();
        assert_eq!(state.active_tab, Tab::Employees);
        assert!(state.loading);
        assert!(state.employees.is_empty());
        assert_eq!(state.attendance_refresh_key, 0);
    }

    #[test]
    fn test_load_cycle() {
        let mut state = AppState::new();
        state.apply(Action::LoadFailed("Network error.".to_string()));
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Network error."));

        state.apply(Action::LoadStarted);
        assert!(state.loading);
        assert_eq!(state.error, None);

        state.apply(Action::Loaded(vec![employee("r1", "EMP001")]));
        assert!(!state.loading);
        assert_eq!(state.employees.len(), 1);
    }

    #[test]
    fn test_add_and_delete() {
        let mut state = AppState::new();
        state.apply(Action::Loaded(vec![employee("r1", "EMP001")]));
        state.apply(Action::ToggleEmployeeForm);
        assert!(state.employee_form_open);

        state.apply(Action::EmployeeAdded(employee("r2", "EMP002")));
        assert_eq!(state.employees.len(), 2);
        assert!(!state.employee_form_open);

        state.apply(Action::EmployeeDeleted("r1".to_string()));
        assert_eq!(state.employees, vec![employee("r2", "EMP002")]);

        // Unknown ids leave the list alone.
        state.apply(Action::EmployeeDeleted("missing".to_string()));
        assert_eq!(state.employees.len(), 1);
    }

    #[test]
    fn test_attendance_marked_bumps_refresh_key() {
        let mut state = AppState::new();
        state.apply(Action::ToggleAttendanceForm);
        state.apply(Action::AttendanceMarked);
        state.apply(Action::AttendanceMarked);
        assert_eq!(state.attendance_refresh_key, 2);
        assert!(!state.attendance_form_open);
    }

    #[test]
    fn test_stale_dismissal_is_ignored() {
        let mut state = AppState::new();
        state.apply(Action::Notify(Notification::success(NotificationId(1), "first")));
        state.apply(Action::Notify(Notification::error(NotificationId(2), "second")));

        state.apply(Action::DismissNotification(NotificationId(1)));
        assert_eq!(
            state.notification.as_ref().map(|n| n.message.as_str()),
            Some("second")
        );

        state.apply(Action::DismissNotification(NotificationId(2)));
        assert_eq!(state.notification, None);
    }

    #[test]
    fn test_select_tab() {
        let mut state = AppState::new();
        state.apply(Action::SelectTab(Tab::Attendance));
        assert_eq!(state.active_tab, Tab::Attendance);
        assert_eq!(Tab::Attendance.to_string(), "attendance");
    }
}
