//! The application controller.

use std::time::Duration;

use tokio::sync::mpsc;

use super::{Action, AppState};
use crate::api::{AttendanceRecord, Employee, HrmsApi};
use crate::error::ApiResult;
use crate::forms::{AttendanceField, AttendanceForm, EmployeeField, EmployeeForm, SubmitOutcome};
use crate::notification::{Notification, NotificationId, NotificationKind, NotificationTimer};

pub const EMPLOYEE_ADDED_MESSAGE: &str = "Employee added successfully!";
pub const EMPLOYEE_DELETED_MESSAGE: &str = "Employee deleted successfully!";
pub const ATTENDANCE_MARKED_MESSAGE: &str = "Attendance marked successfully!";

/// Runs user operations against an [`HrmsApi`] and keeps [`AppState`] in sync.
///
/// Notifications are dismissed automatically after the configured lifetime.
/// Methods that show a notification must be called within a tokio runtime.
pub struct App<A> {
    api: A,
    state: AppState,
    timer: NotificationTimer,
    expired: mpsc::UnboundedReceiver<NotificationId>,
    next_notification: u64,
}

impl<A: HrmsApi> App<A> {
    pub fn new(api: A, notification_ttl: Duration) -> Self {
        let (timer, expired) = NotificationTimer::new(notification_ttl);
        Self {
            api,
            state: AppState::new(),
            timer,
            expired,
            next_notification: 0,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Applies an action to the state.
    pub fn dispatch(&mut self, action: Action) {
        self.state.apply(action);
    }

    /// Fetches the employee list.
    ///
    /// A failure is recorded in the state and shown as an error notification.
    pub async fn load_employees(&mut self) -> ApiResult<()> {
        self.dispatch(Action::LoadStarted);
        match self.api.list_employees().await {
            Ok(employees) => {
                self.dispatch(Action::Loaded(employees));
                Ok(())
            }
            Err(error) => {
                self.dispatch(Action::LoadFailed(error.message.clone()));
                self.show_notification(NotificationKind::Error, error.message.clone());
                Err(error)
            }
        }
    }

    /// Submits the employee form; on success the new employee is appended.
    pub async fn add_employee(
        &mut self,
        form: &mut EmployeeForm,
    ) -> SubmitOutcome<Employee, EmployeeField> {
        let api = &self.api;
        let outcome = form
            .submit(|payload| async move { api.create_employee(&payload).await })
            .await;

        if let SubmitOutcome::Submitted(employee) = &outcome {
            self.dispatch(Action::EmployeeAdded(employee.clone()));
            self.show_notification(NotificationKind::Success, EMPLOYEE_ADDED_MESSAGE);
        }
        outcome
    }

    /// Deletes an employee by record id.
    ///
    /// On failure the list is left unchanged and an error notification is shown.
    pub async fn delete_employee(&mut self, id: &str) -> ApiResult<()> {
        match self.api.delete_employee(id).await {
            Ok(()) => {
                self.dispatch(Action::EmployeeDeleted(id.to_string()));
                self.show_notification(NotificationKind::Success, EMPLOYEE_DELETED_MESSAGE);
                Ok(())
            }
            Err(error) => {
                tracing::warn!(id = %id, error = %error, "Failed to delete employee");
                self.show_notification(NotificationKind::Error, error.message.clone());
                Err(error)
            }
        }
    }

    /// Submits the attendance form; on success the employee list is reloaded
    /// and attendance listings are told to refresh.
    pub async fn mark_attendance(
        &mut self,
        form: &mut AttendanceForm,
    ) -> SubmitOutcome<AttendanceRecord, AttendanceField> {
        let api = &self.api;
        let outcome = form
            .submit(|payload| async move { api.create_attendance(&payload).await })
            .await;

        if outcome.is_submitted() {
            self.show_notification(NotificationKind::Success, ATTENDANCE_MARKED_MESSAGE);
            // The reload failure is already in the state and notified.
            let _ = self.load_employees().await;
            self.dispatch(Action::AttendanceMarked);
        }
        outcome
    }

    /// Shows a notification and arms its auto-dismiss timer, superseding the
    /// current one.
    pub fn show_notification(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
    ) -> NotificationId {
        self.next_notification += 1;
        let id = NotificationId(self.next_notification);
        let notification = match kind {
            NotificationKind::Success => Notification::success(id, message),
            NotificationKind::Error => Notification::error(id, message),
        };
        self.dispatch(Action::Notify(notification));
        self.timer.arm(id);
        id
    }

    /// Applies any expiries that have already fired, without waiting.
    pub fn poll_expired(&mut self) {
        while let Ok(id) = self.expired.try_recv() {
            self.dismiss(id);
        }
    }

    /// Waits for the next expiry and applies it.
    ///
    /// Returns `None` if no countdown is running.
    pub async fn expire_next(&mut self) -> Option<NotificationId> {
        self.timer.pending()?;
        let id = self.expired.recv().await?;
        self.dismiss(id);
        Some(id)
    }

    fn dismiss(&mut self, id: NotificationId) {
        self.timer.settle(id);
        self.dispatch(Action::DismissNotification(id));
    }
}
