//! Form models with client-side validation and server error attribution.
//!
//! Each form owns its input, a [`FieldErrorMap`], an optional form-level
//! server error, and a `submitting` flag. A submission runs in three steps:
//! [`begin`](FormState::begin) rejects duplicates and clears old errors,
//! validation either blocks the request or yields the payload, and
//! [`complete`](FormState::complete) records the outcome. Client validation
//! errors and server errors never coexist for one submission.

pub mod attendance;
pub mod employee;

pub use attendance::{AttendanceField, AttendanceForm};
pub use employee::{EmployeeField, EmployeeForm};

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{map_to_field, ApiError, FieldRule};

/// A field of a form, with its keyword rules for server error attribution.
pub trait FormField: Copy + Ord + fmt::Debug + 'static {
    /// Wire name of the field (e.g. `employeeId`).
    fn name(&self) -> &'static str;

    /// Keyword rules in priority order.
    fn rules() -> &'static [FieldRule<Self>];
}

/// Per-field error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrorMap<F: Ord> {
    errors: BTreeMap<F, String>,
}

impl<F: Ord> Default for FieldErrorMap<F> {
    fn default() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }
}

impl<F: Ord + Copy> FieldErrorMap<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the message for a field, replacing any previous one.
    pub fn set(&mut self, field: F, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: F) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Removes the message for a field.
    pub fn clear(&mut self, field: F) {
        self.errors.remove(&field);
    }

    pub fn clear_all(&mut self) {
        self.errors.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterates over fields and messages in field order.
    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> {
        self.errors.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// Why a submission did not dispatch a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocked<F: Ord> {
    /// Client-side validation failed.
    Invalid(FieldErrorMap<F>),
    /// A submission from this form is already in flight.
    InFlight,
}

/// Result of a submission attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<T, F: Ord> {
    /// The request succeeded.
    Submitted(T),
    /// Client-side validation failed; no request was sent.
    Invalid(FieldErrorMap<F>),
    /// The request failed. The message is also the form-level banner; `field`
    /// is set when the message could be attributed to a field.
    Rejected { message: String, field: Option<F> },
    /// Another submission was in flight; nothing was sent.
    InFlight,
}

impl<T, F: Ord> SubmitOutcome<T, F> {
    /// Returns true if the request succeeded.
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted(_))
    }
}

/// Error and submission state shared by all forms.
#[derive(Debug, Clone)]
pub struct FormState<F: FormField> {
    errors: FieldErrorMap<F>,
    server_error: Option<String>,
    submitting: bool,
    /// Shown when a failure carries no message.
    fallback_message: &'static str,
}

impl<F: FormField> FormState<F> {
    pub fn new(fallback_message: &'static str) -> Self {
        Self {
            errors: FieldErrorMap::new(),
            server_error: None,
            submitting: false,
            fallback_message,
        }
    }

    pub fn errors(&self) -> &FieldErrorMap<F> {
        &self.errors
    }

    /// The form-level banner from the last failed submission.
    pub fn server_error(&self) -> Option<&str> {
        self.server_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Clears the errors invalidated by editing `field`.
    pub fn field_edited(&mut self, field: F) {
        self.errors.clear(field);
        self.server_error = None;
    }

    /// Starts a submission: rejects duplicates and clears previous errors.
    pub fn begin(&mut self) -> Result<(), SubmitBlocked<F>> {
        if self.submitting {
            tracing::debug!("Ignoring duplicate submission");
            return Err(SubmitBlocked::InFlight);
        }
        self.server_error = None;
        self.errors.clear_all();
        Ok(())
    }

    /// Records validation results; marks the form as submitting when valid.
    pub fn validated(&mut self, errors: FieldErrorMap<F>) -> Result<(), SubmitBlocked<F>> {
        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(SubmitBlocked::Invalid(errors));
        }
        self.submitting = true;
        Ok(())
    }

    /// Records the outcome of the dispatched request.
    pub fn complete<T>(&mut self, result: Result<T, ApiError>) -> SubmitOutcome<T, F> {
        self.submitting = false;
        match result {
            Ok(value) => SubmitOutcome::Submitted(value),
            Err(error) => {
                let message = if error.message.trim().is_empty() {
                    self.fallback_message.to_string()
                } else {
                    error.message
                };
                let field = map_to_field(F::rules(), &message);
                if let Some(field) = field {
                    self.errors.set(field, message.clone());
                }
                tracing::debug!(field = ?field, message = %message, "Submission rejected");
                self.server_error = Some(message.clone());
                SubmitOutcome::Rejected { message, field }
            }
        }
    }
}
