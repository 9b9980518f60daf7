//! Form state: fields, rules, validation errors and the submission lifecycle

use super::field::FormField;
use super::lifecycle::{FormSubmissionState, SubmissionLifecycle, SubmitAttempt, SubmitTicket};
use super::rules::{FieldRules, FieldValues, ValidationErrors, ValidationResult};
use crate::api::ApiError;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// One mounted form: owns its inputs, rule table and submission state
#[derive(Debug, Clone)]
pub struct FormModel {
    fields: Vec<FormField>,
    rules: FieldRules,
    errors: ValidationErrors,
    /// Re-validate on edit once the user has tried to submit
    submit_attempted: bool,
    active_field_index: usize,
    lifecycle: SubmissionLifecycle,
}

impl FormModel {
    pub fn new(fields: Vec<FormField>, rules: FieldRules, lifecycle: SubmissionLifecycle) -> Self {
        Self {
            fields,
            rules,
            errors: ValidationErrors::default(),
            submit_attempted: false,
            active_field_index: 0,
            lifecycle,
        }
    }

    #[cfg(test)]
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Current value of `name` (empty for unknown fields)
    pub fn value(&self, name: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(FormField::as_text)
            .unwrap_or_default()
    }

    pub fn values(&self) -> FieldValues {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }

    /// Replace the value of `name` as if the user had typed it
    #[cfg(test)]
    pub fn set_value(&mut self, name: &str, value: &str) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
            field.set_text(value);
            self.after_edit(name.to_string());
        }
    }

    /// Empty `name` without re-validating it
    pub fn clear_field(&mut self, name: &str) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
            field.clear();
        }
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.get_active_field_mut() {
            field.push_char(c);
            let name = field.name.clone();
            self.after_edit(name);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.get_active_field_mut() {
            field.pop_char();
            let name = field.name.clone();
            self.after_edit(name);
        }
    }

    fn after_edit(&mut self, name: String) {
        if self.submit_attempted {
            let values = self.values();
            self.rules.revalidate(&name, &values, &mut self.errors);
        }
    }

    /// Run every rule and record the resulting per-field messages
    pub fn validate(&mut self) -> ValidationResult {
        let result = self.rules.validate(&self.values());
        self.errors = match &result {
            Ok(()) => ValidationErrors::default(),
            Err(errors) => errors.clone(),
        };
        result
    }

    #[cfg(test)]
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.message_for(field)
    }

    /// Validate and, if clean, move to `Submitting`
    pub fn begin_submit(&mut self) -> SubmitAttempt {
        if self.lifecycle.is_submitting() {
            return SubmitAttempt::Suppressed;
        }

        self.submit_attempted = true;
        if let Err(errors) = self.validate() {
            return SubmitAttempt::Invalid(errors);
        }

        match self.lifecycle.begin() {
            Some(ticket) => SubmitAttempt::Dispatched(ticket),
            None => SubmitAttempt::Suppressed,
        }
    }

    pub fn settle(&mut self, ticket: SubmitTicket, outcome: Result<(), &ApiError>) -> bool {
        self.lifecycle.settle(ticket, outcome)
    }

    pub fn submission(&self) -> &FormSubmissionState {
        self.lifecycle.state()
    }

    pub fn is_submitting(&self) -> bool {
        self.lifecycle.is_submitting()
    }
}

impl Form for FormModel {
    fn field_count(&self) -> usize {
        self.fields.len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len().saturating_sub(1));
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.active_field_index)
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }
}
