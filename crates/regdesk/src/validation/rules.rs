//! Built-in field rules.
//!
//! Each rule pairs one registration field with a check and the message shown
//! when the check fails. Rules are listed in the order their messages are
//! reported.

use regex::Regex;

use crate::registration::Field;

/// Email shape: something, `@`, something, `.`, something.
///
/// Anchored at the start only, so trailing text after a matching prefix is
/// accepted.
pub const EMAIL_PATTERN: &str = r"^[^@]+@[^@]+\.[^@]+";

/// Phone shape: 10 to 12 decimal digits (any script), optionally followed by
/// a single trailing newline.
pub const PHONE_PATTERN: &str = r"^\d{10,12}\n?$";

/// How a rule decides whether a value is acceptable.
#[derive(Debug)]
pub enum Check {
    /// The value must not be empty.
    Required,
    /// The value must match the regex.
    Pattern(Regex),
}

/// A compiled check bound to one field.
#[derive(Debug)]
pub struct FieldRule {
    /// The field this rule inspects.
    pub field: Field,

    /// Message reported when the check fails.
    pub message: &'static str,

    check: Check,
}

impl FieldRule {
    /// Create a rule that only requires a non-empty value.
    #[must_use]
    pub fn required(field: Field, message: &'static str) -> Self {
        Self {
            field,
            message,
            check: Check::Required,
        }
    }

    /// Create a rule that requires the value to match a pattern.
    ///
    /// # Panics
    ///
    /// Panics if the regex pattern is invalid.
    #[must_use]
    pub fn pattern(field: Field, message: &'static str, pattern: &str) -> Self {
        Self {
            field,
            message,
            check: Check::Pattern(Regex::new(pattern).expect("Invalid regex pattern")),
        }
    }

    /// Check whether the value satisfies this rule.
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        match &self.check {
            Check::Required => !value.is_empty(),
            Check::Pattern(regex) => regex.is_match(value),
        }
    }
}

/// Get the built-in rules, one per field, in reporting order.
#[must_use]
pub fn builtin_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::required(Field::FullName, "Full Name is required."),
        FieldRule::pattern(Field::Email, "Invalid email format.", EMAIL_PATTERN),
        FieldRule::required(Field::StudentId, "Student ID is required."),
        FieldRule::pattern(Field::Phone, "Phone must be 10\u{2013}12 digits.", PHONE_PATTERN),
        FieldRule::required(Field::YearOfStudy, "Year of Study is required."),
        FieldRule::required(Field::Faculty, "Faculty is required."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_for(field: Field) -> FieldRule {
        builtin_rules()
            .into_iter()
            .find(|r| r.field == field)
            .unwrap()
    }

    #[test]
    fn test_one_rule_per_field_in_column_order() {
        let fields: Vec<_> = builtin_rules().iter().map(|r| r.field).collect();
        assert_eq!(fields, Field::ALL);
    }

    #[test]
    fn test_required_rule() {
        let rule = FieldRule::required(Field::FullName, "required");
        assert!(rule.accepts("Ana"));
        assert!(rule.accepts(" "));
        assert!(!rule.accepts(""));
    }

    #[test]
    fn test_email_rule_accepts_valid_shapes() {
        let rule = rule_for(Field::Email);
        assert!(rule.accepts("ana@x.edu"));
        assert!(rule.accepts("first.last@mail.example.org"));
        assert!(rule.accepts("a@b.c"));
    }

    #[test]
    fn test_email_rule_rejects_bad_shapes() {
        let rule = rule_for(Field::Email);
        assert!(!rule.accepts(""));
        assert!(!rule.accepts("ana.at.x"));
        assert!(!rule.accepts("ana@xedu"));
        assert!(!rule.accepts("@x.edu"));
        assert!(!rule.accepts("ana@.edu"));
        assert!(!rule.accepts("ana@x."));
        assert!(!rule.accepts("ana@@x.edu"));
    }

    #[test]
    fn test_email_rule_is_prefix_match() {
        let rule = rule_for(Field::Email);
        assert!(rule.accepts("ana@x.edu@extra"));
    }

    #[test]
    fn test_phone_rule_lengths() {
        let rule = rule_for(Field::Phone);
        assert!(!rule.accepts("123456789"));
        assert!(rule.accepts("1234567890"));
        assert!(rule.accepts("12345678901"));
        assert!(rule.accepts("123456789012"));
        assert!(!rule.accepts("1234567890123"));
    }

    #[test]
    fn test_phone_rule_rejects_non_digits() {
        let rule = rule_for(Field::Phone);
        assert!(!rule.accepts("012-345-6789"));
        assert!(!rule.accepts("+0123456789"));
        assert!(!rule.accepts("01234567 89"));
        assert!(!rule.accepts("0123456789\n\n"));
        assert!(!rule.accepts("\n0123456789"));
    }

    #[test]
    fn test_phone_rule_accepts_unicode_digits_and_trailing_newline() {
        let rule = rule_for(Field::Phone);
        // Arabic-Indic digits
        assert!(rule.accepts("\u{0660}\u{0661}\u{0662}\u{0663}\u{0664}\u{0665}\u{0666}\u{0667}\u{0668}\u{0669}"));
        assert!(rule.accepts("0123456789\n"));
        assert!(!rule.accepts("123456789\n"));
    }

    #[test]
    fn test_phone_message_uses_en_dash() {
        let rule = rule_for(Field::Phone);
        assert_eq!(rule.message, "Phone must be 10–12 digits.");
    }
}
