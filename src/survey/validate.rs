//! Required-field rule derivation and checking.
//!
//! One rule per required question, chosen by question type. Derivation is
//! pure; the set is rebuilt whenever a schema is (re)loaded.

use std::collections::HashMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::form::FormValues;
use super::schema::{QuestionKind, Survey};
use super::value::Value;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("phone regex is valid"));

const DATE_FORMAT: &str = "%Y-%m-%d";

/// What a required question's value must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    NonEmpty,
    Email,
    Phone,
    Numeric,
    Date,
    AnySelected,
}

impl Constraint {
    /// The constraint a required question of this kind carries.
    pub fn for_kind(kind: QuestionKind) -> Self {
        match kind {
            QuestionKind::Email => Constraint::Email,
            QuestionKind::Phone => Constraint::Phone,
            QuestionKind::Number => Constraint::Numeric,
            QuestionKind::Date => Constraint::Date,
            QuestionKind::Checkbox | QuestionKind::MultipleSelect => Constraint::AnySelected,
            QuestionKind::Text
            | QuestionKind::Textarea
            | QuestionKind::Select
            | QuestionKind::NumberSelect
            | QuestionKind::Radio
            | QuestionKind::File => Constraint::NonEmpty,
        }
    }

    fn satisfied_by(self, value: &Value) -> bool {
        match self {
            Constraint::NonEmpty => !value.is_empty(),
            // The draft overlay can leave a scalar for a multi kind; any
            // non-empty shape counts as a selection.
            Constraint::AnySelected => !value.is_empty(),
            Constraint::Email => matches!(value, Value::Text(s) if EMAIL_RE.is_match(s)),
            Constraint::Phone => matches!(value, Value::Text(s) if PHONE_RE.is_match(s)),
            Constraint::Numeric => matches!(value, Value::Text(s) if s.parse::<f64>().is_ok()),
            Constraint::Date => {
                matches!(value, Value::Text(s) if NaiveDate::parse_from_str(s, DATE_FORMAT).is_ok())
            }
        }
    }

    fn mismatch_message(self) -> &'static str {
        match self {
            Constraint::NonEmpty => "This field is required",
            Constraint::Email => "Enter a valid email address",
            Constraint::Phone => "Enter a valid 10-digit phone number",
            Constraint::Numeric => "Enter a valid number",
            Constraint::Date => "Enter a valid date (YYYY-MM-DD)",
            Constraint::AnySelected => "Select at least one option",
        }
    }
}

/// One required question's rule: its constraint plus both surfaced messages.
/// The generic required message backs the inline "Required" marker; the
/// mismatch message goes to the status line for the focused question.
#[derive(Debug, Clone)]
pub struct Rule {
    pub constraint: Constraint,
    pub required_message: &'static str,
    pub mismatch_message: &'static str,
}

impl Rule {
    fn for_kind(kind: QuestionKind) -> Self {
        let constraint = Constraint::for_kind(kind);
        Rule {
            constraint,
            required_message: "This field is required",
            mismatch_message: constraint.mismatch_message(),
        }
    }

    /// Check a value against the rule; `None` means it passes.
    pub fn violation(&self, value: &Value) -> Option<&'static str> {
        if value.is_empty() {
            Some(self.required_message)
        } else if !self.constraint.satisfied_by(value) {
            Some(self.mismatch_message)
        } else {
            None
        }
    }
}

/// The validation rules for one loaded schema, keyed by question id.
/// Entries exist only for `question_required` questions.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: HashMap<String, Rule>,
}

impl RuleSet {
    pub fn build(survey: &Survey) -> Self {
        let mut rules = HashMap::new();
        for question in survey.questions() {
            if question.question_required {
                rules.insert(
                    question.question_id.clone(),
                    Rule::for_kind(question.question_type),
                );
            }
        }
        log::debug!(
            "Built {} validation rules for survey {}",
            rules.len(),
            survey.survey_id
        );
        Self { rules }
    }

    pub fn get(&self, question_id: &str) -> Option<&Rule> {
        self.rules.get(question_id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rule's verdict for one question; `None` when the question is not
    /// required or the value passes.
    pub fn check_question(&self, question_id: &str, value: &Value) -> Option<&'static str> {
        self.rules.get(question_id).and_then(|r| r.violation(value))
    }

    /// All violations across the form, keyed by question id. An id missing
    /// from the value map counts as unanswered.
    pub fn check(&self, values: &FormValues) -> HashMap<String, &'static str> {
        let empty = Value::Text(String::new());
        self.rules
            .iter()
            .filter_map(|(id, rule)| {
                let value = values.get(id).unwrap_or(&empty);
                rule.violation(value).map(|message| (id.clone(), message))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_constraint() {
        let rule = Rule::for_kind(QuestionKind::Email);
        assert_eq!(rule.violation(&Value::Text("a@b.com".into())), None);
        assert_eq!(
            rule.violation(&Value::Text("not-an-email".into())),
            Some("Enter a valid email address")
        );
        assert_eq!(
            rule.violation(&Value::Text(String::new())),
            Some("This field is required")
        );
    }

    #[test]
    fn phone_constraint_wants_exactly_ten_digits() {
        let rule = Rule::for_kind(QuestionKind::Phone);
        assert_eq!(rule.violation(&Value::Text("1234567890".into())), None);
        assert!(rule.violation(&Value::Text("12345".into())).is_some());
        assert!(rule.violation(&Value::Text("12345678901".into())).is_some());
        assert!(rule.violation(&Value::Text("123456789a".into())).is_some());
    }

    #[test]
    fn numeric_and_date_constraints() {
        let number = Rule::for_kind(QuestionKind::Number);
        assert_eq!(number.violation(&Value::Text("-12.5".into())), None);
        assert!(number.violation(&Value::Text("twelve".into())).is_some());

        let date = Rule::for_kind(QuestionKind::Date);
        assert_eq!(date.violation(&Value::Text("2024-02-29".into())), None);
        assert!(date.violation(&Value::Text("2023-02-29".into())).is_some());
        assert!(date.violation(&Value::Text("29/02/2024".into())).is_some());
    }

    #[test]
    fn multi_kinds_need_a_selection() {
        let rule = Rule::for_kind(QuestionKind::MultipleSelect);
        assert!(rule.violation(&Value::Many(Vec::new())).is_some());
        assert_eq!(rule.violation(&Value::Many(vec!["Sports".into()])), None);
        // Overlayed drafts hold a scalar; it still counts as answered.
        assert_eq!(rule.violation(&Value::Text("Sports".into())), None);
    }

    #[test]
    fn file_and_choice_kinds_fall_back_to_non_empty() {
        for kind in [
            QuestionKind::Text,
            QuestionKind::Textarea,
            QuestionKind::Select,
            QuestionKind::NumberSelect,
            QuestionKind::Radio,
            QuestionKind::File,
        ] {
            assert_eq!(Constraint::for_kind(kind), Constraint::NonEmpty);
        }
        let rule = Rule::for_kind(QuestionKind::File);
        assert!(rule.violation(&Value::File(None)).is_some());
        assert_eq!(
            rule.violation(&Value::File(Some("/tmp/evidence.pdf".into()))),
            None
        );
    }
}
