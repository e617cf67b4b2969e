//! The "add employee" form.

use std::fmt;
use std::future::Future;
use std::sync::OnceLock;

use regex::Regex;

use super::{FieldErrorMap, FormField, FormState, SubmitBlocked, SubmitOutcome};
use crate::api::NewEmployee;
use crate::error::{ApiError, FieldRule};

/// Fields of the employee form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EmployeeField {
    EmployeeId,
    FullName,
    Email,
    Department,
}

// Checked in order; "email" before "name" so "name and email" maps to Email.
const EMPLOYEE_RULES: &[FieldRule<EmployeeField>] = &[
    FieldRule::new(&["employee id", "employeeid"], EmployeeField::EmployeeId),
    FieldRule::new(&["email"], EmployeeField::Email),
    FieldRule::new(&["name"], EmployeeField::FullName),
    FieldRule::new(&["department"], EmployeeField::Department),
];

impl FormField for EmployeeField {
    fn name(&self) -> &'static str {
        match self {
            EmployeeField::EmployeeId => "employeeId",
            EmployeeField::FullName => "fullName",
            EmployeeField::Email => "email",
            EmployeeField::Department => "department",
        }
    }

    fn rules() -> &'static [FieldRule<Self>] {
        EMPLOYEE_RULES
    }
}

impl fmt::Display for EmployeeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shown when a failed submission carries no message.
pub const EMPLOYEE_FALLBACK_MESSAGE: &str = "Failed to add employee. Please try again.";

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").expect("Invalid regex pattern"))
}

/// Returns true if `email` has a local part, an `@`, and a dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// Input and error state for creating an employee.
#[derive(Debug, Clone)]
pub struct EmployeeForm {
    data: NewEmployee,
    state: FormState<EmployeeField>,
}

impl Default for EmployeeForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeForm {
    pub fn new() -> Self {
        Self {
            data: NewEmployee::default(),
            state: FormState::new(EMPLOYEE_FALLBACK_MESSAGE),
        }
    }

    /// Creates a form pre-filled with `data`.
    pub fn with_data(data: NewEmployee) -> Self {
        Self {
            data,
            ..Self::new()
        }
    }

    pub fn data(&self) -> &NewEmployee {
        &self.data
    }

    pub fn state(&self) -> &FormState<EmployeeField> {
        &self.state
    }

    pub fn errors(&self) -> &FieldErrorMap<EmployeeField> {
        self.state.errors()
    }

    /// Updates a field and clears the errors it invalidates.
    pub fn set(&mut self, field: EmployeeField, value: impl Into<String>) {
        let value = value.into();
        match field {
            EmployeeField::EmployeeId => self.data.employee_id = value,
            EmployeeField::FullName => self.data.full_name = value,
            EmployeeField::Email => self.data.email = value,
            EmployeeField::Department => self.data.department = value,
        }
        self.state.field_edited(field);
    }

    /// Validates the current input without touching form state.
    pub fn validate(&self) -> FieldErrorMap<EmployeeField> {
        let mut errors = FieldErrorMap::new();
        let data = &self.data;

        if data.employee_id.trim().is_empty() {
            errors.set(EmployeeField::EmployeeId, "Employee ID is required");
        }
        if data.full_name.trim().is_empty() {
            errors.set(EmployeeField::FullName, "Full Name is required");
        }
        if data.email.trim().is_empty() {
            errors.set(EmployeeField::Email, "Email is required");
        } else if !is_valid_email(data.email.trim()) {
            errors.set(EmployeeField::Email, "Invalid email format");
        }
        if data.department.trim().is_empty() {
            errors.set(EmployeeField::Department, "Department is required");
        }

        errors
    }

    /// Starts a submission and returns the payload to send.
    pub fn begin_submit(&mut self) -> Result<NewEmployee, SubmitBlocked<EmployeeField>> {
        self.state.begin()?;
        self.state.validated(self.validate())?;
        Ok(NewEmployee {
            employee_id: self.data.employee_id.trim().to_string(),
            full_name: self.data.full_name.trim().to_string(),
            email: self.data.email.trim().to_string(),
            department: self.data.department.trim().to_string(),
        })
    }

    /// Records the request outcome; a success clears the input.
    pub fn complete_submit<T>(
        &mut self,
        result: Result<T, ApiError>,
    ) -> SubmitOutcome<T, EmployeeField> {
        let outcome = self.state.complete(result);
        if outcome.is_submitted() {
            self.data = NewEmployee::default();
        }
        outcome
    }

    /// Validates, sends the payload through `on_submit`, and records the outcome.
    pub async fn submit<T, Fut>(
        &mut self,
        on_submit: impl FnOnce(NewEmployee) -> Fut,
    ) -> SubmitOutcome<T, EmployeeField>
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
