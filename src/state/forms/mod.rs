//! Form domain layer
//!
//! Type-safe form handling for the auth pages: inputs, validation rules and
//! the submission lifecycle each page instance owns.

mod field;
mod form_state;
mod lifecycle;
mod rules;

pub use field::FormField;
pub use form_state::{Form, FormModel};
pub use lifecycle::{dispatch, SubmissionLifecycle, SubmissionPhase, SubmitAttempt, SubmitTicket};
pub use rules::{email_pattern, FieldRules, FieldValidationRule};
