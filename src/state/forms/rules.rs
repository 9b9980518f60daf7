//! Client-side field validation
//!
//! Each field carries an ordered list of rules. Rules run in declaration order
//! and the first failing rule decides the field's message. `Pattern` and
//! `MinLength` leave empty values to `Required`; `MatchesField` always runs.
//!
//! These checks are for the user's benefit only. The gateway validates again.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Current field values keyed by field name
pub type FieldValues = HashMap<String, String>;

/// Outcome of validating a whole form
pub type ValidationResult = Result<(), ValidationErrors>;

const EMAIL_PATTERN: &str = r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$";

/// Address pattern shared by the email inputs
pub fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

#[derive(Debug, Clone)]
pub enum RuleKind {
    Required,
    Pattern(Regex),
    /// Minimum length in characters
    MinLength(usize),
    /// Byte-for-byte equality with another field of the same form
    MatchesField(String),
}

/// A single rule with the message shown when it fails
#[derive(Debug, Clone)]
pub struct FieldValidationRule {
    pub kind: RuleKind,
    pub message: String,
}

impl FieldValidationRule {
    pub fn required(message: &str) -> Self {
        Self::new(RuleKind::Required, message)
    }

    pub fn pattern(pattern: Regex, message: &str) -> Self {
        Self::new(RuleKind::Pattern(pattern), message)
    }

    pub fn min_length(length: usize, message: &str) -> Self {
        Self::new(RuleKind::MinLength(length), message)
    }

    pub fn matches_field(other: &str, message: &str) -> Self {
        Self::new(RuleKind::MatchesField(other.to_string()), message)
    }

    fn new(kind: RuleKind, message: &str) -> Self {
        Self {
            kind,
            message: message.to_string(),
        }
    }

    /// Whether `value` satisfies this rule given the rest of the form
    pub fn passes(&self, value: &str, values: &FieldValues) -> bool {
        match &self.kind {
            RuleKind::Required => !value.is_empty(),
            RuleKind::Pattern(_) | RuleKind::MinLength(_) if value.is_empty() => true,
            RuleKind::Pattern(pattern) => pattern.is_match(value),
            RuleKind::MinLength(length) => value.chars().count() >= *length,
            RuleKind::MatchesField(other) => {
                value.as_bytes() == values.get(other).map(String::as_bytes).unwrap_or_default()
            }
        }
    }

    /// Name of the field this rule reads besides its own
    pub fn depends_on(&self) -> Option<&str> {
        match &self.kind {
            RuleKind::MatchesField(other) => Some(other),
            _ => None,
        }
    }
}

/// A failed field with its user-facing message
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

/// Per-field failures in field declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(Vec<ValidationError>);

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Message for `field`, if it failed
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Replace the entry for `field`, keeping `order` as the field ordering
    fn replace(&mut self, field: &str, error: Option<ValidationError>, order: &[&str]) {
        self.0.retain(|e| e.field != field);
        if let Some(error) = error {
            self.0.push(error);
            self.0.sort_by_key(|e| {
                order
                    .iter()
                    .position(|name| *name == e.field)
                    .unwrap_or(usize::MAX)
            });
        }
    }
}

/// Rule table of a form: field name to rules, in declaration order
#[derive(Debug, Clone, Default)]
pub struct FieldRules {
    fields: Vec<(String, Vec<FieldValidationRule>)>,
}

impl FieldRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `field` with its rules
    pub fn field(mut self, field: &str, rules: Vec<FieldValidationRule>) -> Self {
        self.fields.push((field.to_string(), rules));
        self
    }

    pub fn rules_for(&self, field: &str) -> &[FieldValidationRule] {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, rules)| rules.as_slice())
            .unwrap_or_default()
    }

    /// Run every field's rules
    pub fn validate(&self, values: &FieldValues) -> ValidationResult {
        let errors: Vec<ValidationError> = self
            .fields
            .iter()
            .filter_map(|(name, _)| self.validate_field(name, values))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    /// First failing rule of `field`, if any
    pub fn validate_field(&self, field: &str, values: &FieldValues) -> Option<ValidationError> {
        let value = values.get(field).map(String::as_str).unwrap_or_default();
        self.rules_for(field)
            .iter()
            .find(|rule| !rule.passes(value, values))
            .map(|rule| ValidationError {
                field: field.to_string(),
                message: rule.message.clone(),
            })
    }

    /// Fields whose rules read `field`
    pub fn dependents_of(&self, field: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(_, rules)| rules.iter().any(|r| r.depends_on() == Some(field)))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Re-check `field` and its dependents, updating `errors` in place
    pub fn revalidate(&self, field: &str, values: &FieldValues, errors: &mut ValidationErrors) {
        let order: Vec<&str> = self.fields.iter().map(|(name, _)| name.as_str()).collect();

        let mut targets = vec![field];
        targets.extend(self.dependents_of(field));

        for target in targets {
            errors.replace(target, self.validate_field(target, values), &order);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(pairs: &[(&str, &str)]) -> FieldValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn email_rules() -> FieldRules {
        FieldRules::new().field(
            "email",
            vec![
                FieldValidationRule::required("Email is required"),
                FieldValidationRule::pattern(email_pattern().clone(), "Invalid email address"),
            ],
        )
    }

    fn password_rules() -> FieldRules {
        FieldRules::new()
            .field(
                "password",
                vec![
                    FieldValidationRule::required("Password is required"),
                    FieldValidationRule::min_length(8, "Password must be at least 8 characters"),
                ],
            )
            .field(
                "confirm_password",
                vec![
                    FieldValidationRule::required("Please confirm your password"),
                    FieldValidationRule::matches_field("password", "Passwords do not match"),
                ],
            )
    }

    mod email {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_valid_address_passes() {
            assert!(email_rules()
                .validate(&values(&[("email", "user@example.com")]))
                .is_ok());
        }

        #[test]
        fn test_pattern_is_case_insensitive() {
            assert!(email_pattern().is_match("First.Last+tag@Example.CO"));
        }

        #[test]
        fn test_malformed_address_fails() {
            let errors = email_rules()
                .validate(&values(&[("email", "not-an-email")]))
                .unwrap_err();
            assert_eq!(errors.message_for("email"), Some("Invalid email address"));
        }

        #[test]
        fn test_empty_reports_required_not_pattern() {
            let errors = email_rules()
                .validate(&values(&[("email", "")]))
                .unwrap_err();
            assert_eq!(errors.len(), 1);
            assert_eq!(errors.message_for("email"), Some("Email is required"));
        }

        #[test]
        fn test_missing_value_counts_as_empty() {
            let errors = email_rules().validate(&FieldValues::new()).unwrap_err();
            assert_eq!(errors.message_for("email"), Some("Email is required"));
        }

        #[test]
        fn test_single_letter_tld_fails() {
            assert!(!email_pattern().is_match("user@example.c"));
        }
    }

    mod passwords {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_mismatch_fails() {
            let errors = password_rules()
                .validate(&values(&[
                    ("password", "abcdefgh"),
                    ("confirm_password", "abcdefgi"),
                ]))
                .unwrap_err();
            assert_eq!(errors.len(), 1);
            assert_eq!(
                errors.message_for("confirm_password"),
                Some("Passwords do not match")
            );
        }

        #[test]
        fn test_identical_passes() {
            assert!(password_rules()
                .validate(&values(&[
                    ("password", "abcdefgh"),
                    ("confirm_password", "abcdefgh"),
                ]))
                .is_ok());
        }

        #[test]
        fn test_short_password_reports_min_length() {
            let errors = password_rules()
                .validate(&values(&[("password", "abc"), ("confirm_password", "abc")]))
                .unwrap_err();
            assert_eq!(
                errors.message_for("password"),
                Some("Password must be at least 8 characters")
            );
            assert_eq!(errors.message_for("confirm_password"), None);
        }

        #[test]
        fn test_min_length_counts_characters() {
            let rule = FieldValidationRule::min_length(8, "too short");
            assert!(rule.passes("ääääääää", &FieldValues::new()));
            assert!(!rule.passes("äääää", &FieldValues::new()));
        }

        #[test]
        fn test_equality_is_exact() {
            let rule = FieldValidationRule::matches_field("password", "mismatch");
            let form = values(&[("password", "Secret12")]);
            assert!(rule.passes("Secret12", &form));
            assert!(!rule.passes("secret12", &form));
            assert!(!rule.passes("Secret12 ", &form));
        }

        #[test]
        fn test_errors_follow_declaration_order() {
            let errors = password_rules().validate(&FieldValues::new()).unwrap_err();
            let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
            assert_eq!(fields, vec!["password", "confirm_password"]);
        }

        #[test]
        fn test_dependents_of_password() {
            assert_eq!(password_rules().dependents_of("password"), vec!["confirm_password"]);
            assert!(password_rules().dependents_of("confirm_password").is_empty());
        }

        #[test]
        fn test_revalidate_rechecks_confirmation_when_password_changes() {
            let rules = password_rules();
            let mut form = values(&[
                ("password", "abcdefgh"),
                ("confirm_password", "abcdefgh"),
            ]);
            let mut errors = ValidationErrors::default();

            form.insert("password".to_string(), "abcdefgX".to_string());
            rules.revalidate("password", &form, &mut errors);
            assert_eq!(
                errors.message_for("confirm_password"),
                Some("Passwords do not match")
            );

            form.insert("confirm_password".to_string(), "abcdefgX".to_string());
            rules.revalidate("confirm_password", &form, &mut errors);
            assert!(errors.is_empty());
        }
    }

    #[test]
    fn test_unknown_field_has_no_rules() {
        assert!(email_rules().rules_for("nope").is_empty());
        assert!(email_rules().validate_field("nope", &FieldValues::new()).is_none());
    }

    #[test]
    fn test_errors_display_joins_messages() {
        let errors = password_rules().validate(&FieldValues::new()).unwrap_err();
        assert_eq!(
            errors.to_string(),
            "password: Password is required; confirm_password: Please confirm your password"
        );
    }
}
