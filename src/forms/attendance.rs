//! The "mark attendance" form.

use std::fmt;
use std::future::Future;

use chrono::{Local, NaiveDate};

use super::{FieldErrorMap, FormField, FormState, SubmitBlocked, SubmitOutcome};
use crate::api::{AttendanceStatus, Employee, NewAttendance};
use crate::error::{ApiError, FieldRule};

/// Fields of the attendance form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttendanceField {
    EmployeeId,
    Date,
    Status,
}

const ATTENDANCE_RULES: &[FieldRule<AttendanceField>] = &[
    FieldRule::new(&["employee"], AttendanceField::EmployeeId),
    FieldRule::new(&["date"], AttendanceField::Date),
    FieldRule::new(&["status"], AttendanceField::Status),
];

impl FormField for AttendanceField {
    fn name(&self) -> &'static str {
        match self {
            AttendanceField::EmployeeId => "employeeId",
            AttendanceField::Date => "date",
            AttendanceField::Status => "status",
        }
    }

    fn rules() -> &'static [FieldRule<Self>] {
        ATTENDANCE_RULES
    }
}

impl fmt::Display for AttendanceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shown when a failed submission carries no message.
pub const ATTENDANCE_FALLBACK_MESSAGE: &str = "Failed to mark attendance. Please try again.";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Input and error state for marking attendance.
///
/// Values are held as entered; the status is parsed only when validating.
#[derive(Debug, Clone)]
pub struct AttendanceForm {
    employee_id: String,
    date: String,
    status: String,
    /// The latest date that may be marked.
    today: NaiveDate,
    state: FormState<AttendanceField>,
}

impl Default for AttendanceForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AttendanceForm {
    /// Creates a form dated today in local time, with status `Present`.
    pub fn new() -> Self {
        Self::with_today(Local::now().date_naive())
    }

    /// Creates a form that treats `today` as the current date.
    pub fn with_today(today: NaiveDate) -> Self {
        Self {
            employee_id: String::new(),
            date: today.format(DATE_FORMAT).to_string(),
            status: AttendanceStatus::default().as_str().to_string(),
            today,
            state: FormState::new(ATTENDANCE_FALLBACK_MESSAGE),
        }
    }

    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn state(&self) -> &FormState<AttendanceField> {
        &self.state
    }

    pub fn errors(&self) -> &FieldErrorMap<AttendanceField> {
        self.state.errors()
    }

    /// Updates a field and clears the errors it invalidates.
    pub fn set(&mut self, field: AttendanceField, value: impl Into<String>) {
        let value = value.into();
        match field {
            AttendanceField::EmployeeId => self.employee_id = value,
            AttendanceField::Date => self.date = value,
            AttendanceField::Status => self.status = value,
        }
        self.state.field_edited(field);
    }

    /// Preselects the first employee if none is chosen yet.
    pub fn select_default_employee(&mut self, employees: &[Employee]) {
        if !self.employee_id.trim().is_empty() {
            return;
        }
        if let Some(first) = employees.first() {
            self.employee_id = first.employee_id.clone();
        }
    }

    /// Validates the current input without touching form state.
    pub fn validate(&self) -> FieldErrorMap<AttendanceField> {
        let mut errors = FieldErrorMap::new();

        if self.employee_id.trim().is_empty() {
            errors.set(AttendanceField::EmployeeId, "Please select an employee");
        }

        let date = self.date.trim();
        if date.is_empty() {
            errors.set(AttendanceField::Date, "Date is required");
        } else {
            match NaiveDate::parse_from_str(date, DATE_FORMAT) {
                Ok(parsed) if parsed > self.today => {
                    errors.set(AttendanceField::Date, "Date cannot be in the future");
                }
                Ok(_) => {}
                Err(_) => errors.set(AttendanceField::Date, "Invalid date format"),
            }
        }

        let status = self.status.trim();
        if status.is_empty() {
            errors.set(AttendanceField::Status, "Status is required");
        } else if status.parse::<AttendanceStatus>().is_err() {
            errors.set(AttendanceField::Status, "Status must be Present or Absent");
        }

        errors
    }

    /// Starts a submission and returns the payload to send.
    pub fn begin_submit(&mut self) -> Result<NewAttendance, SubmitBlocked<AttendanceField>> {
        self.state.begin()?;
        let errors = self.validate();
        // Only used once validation has passed.
        let status = self.status.trim().parse().unwrap_or_default();
        self.state.validated(errors)?;
        Ok(NewAttendance {
            employee_id: self.employee_id.trim().to_string(),
            date: self.date.trim().to_string(),
            status,
        })
    }

    /// Records the request outcome. Input is kept either way so several
    /// days can be marked in a row.
    pub fn complete_submit<T>(
        &mut self,
        result: Result<T, ApiError>,
    ) -> SubmitOutcome<T, AttendanceField> {
        self.state.complete(result)
    }

    /// Validates, sends the payload through `on_submit`, and records the outcome.
    pub async fn submit<T, Fut>(
        &mut self,
        on_submit: impl FnOnce(NewAttendance) -> Fut,
    ) -> SubmitOutcome<T, AttendanceField>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let payload = match self.begin_submit() {
            Ok(payload) => payload,
            Err(SubmitBlocked::Invalid(errors)) => return SubmitOutcome::Invalid(errors),
            Err(SubmitBlocked::InFlight) => return SubmitOutcome::InFlight,
        };
        let result = on_submit(payload).await;
        self.complete_submit(result)
    }
}
