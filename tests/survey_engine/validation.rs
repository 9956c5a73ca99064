//! The required-field rule set, as checked on submit.

use std::collections::HashSet;

use grc_cli::survey::{FormValues, ResponseStatus, RuleSet};

use super::{assessment_survey, saved_response};

#[test]
fn only_required_questions_carry_rules() {
    let survey = assessment_survey();
    let rules = RuleSet::build(&survey);

    let required: Vec<&str> = survey
        .questions()
        .filter(|q| q.question_required)
        .map(|q| q.question_id.as_str())
        .collect();
    assert_eq!(rules.len(), required.len());
    for id in required {
        assert!(rules.get(id).is_some(), "{id} should have a rule");
    }
    assert!(rules.get("q-phone").is_none());
    assert!(rules.get("q-notes").is_none());
}

#[test]
fn untouched_required_questions_are_all_reported() {
    let survey = assessment_survey();
    let rules = RuleSet::build(&survey);
    let values = FormValues::initial(&survey, None);

    let violations = rules.check(&values);
    let flagged: HashSet<&str> = violations.keys().map(String::as_str).collect();
    assert_eq!(
        flagged,
        HashSet::from(["q-name", "q-email", "q-severity", "q-controls"])
    );
    assert_eq!(violations["q-name"], "This field is required");
    assert_eq!(violations["q-controls"], "This field is required");
}

#[test]
fn answering_clears_the_violation() {
    let survey = assessment_survey();
    let rules = RuleSet::build(&survey);
    let mut values = FormValues::initial(&survey, None);

    values.set_text("q-name", "Initech GmbH");
    values.set_text("q-severity", "High");
    values.toggle("q-controls", "Encryption");
    values.set_text("q-email", "security@initech.example");

    assert!(rules.check(&values).is_empty());
}

#[test]
fn email_format_is_enforced() {
    let survey = assessment_survey();
    let rules = RuleSet::build(&survey);
    let mut values = FormValues::initial(&survey, None);

    values.set_text("q-email", "not-an-email");
    let violations = rules.check(&values);
    assert_eq!(violations["q-email"], "Enter a valid email address");

    values.set_text("q-email", "a@b.com");
    let violations = rules.check(&values);
    assert!(!violations.contains_key("q-email"));
}

#[test]
fn check_question_agrees_with_the_full_check() {
    let survey = assessment_survey();
    let rules = RuleSet::build(&survey);
    let mut values = FormValues::initial(&survey, None);
    values.set_text("q-name", "Initech GmbH");

    let name = values.get("q-name").unwrap();
    assert_eq!(rules.check_question("q-name", name), None);
    let email = values.get("q-email").unwrap();
    assert_eq!(
        rules.check_question("q-email", email),
        Some("This field is required")
    );
    // Optional questions never report
    let phone = values.get("q-phone").unwrap();
    assert_eq!(rules.check_question("q-phone", phone), None);
}

/// An overlaid draft leaves a scalar where a multi kind expects a sequence;
/// the selection rule accepts either non-empty shape.
#[test]
fn scalar_overlay_satisfies_the_selection_rule() {
    let survey = assessment_survey();
    let rules = RuleSet::build(&survey);
    let prior = saved_response(
        &survey,
        ResponseStatus::Draft,
        &[("q-controls", &["Encryption", "Backups"])],
    );

    let values = FormValues::initial(&survey, Some(&prior));
    let violations = rules.check(&values);
    assert!(!violations.contains_key("q-controls"));
}

#[test]
fn whitespace_only_text_counts_as_answered() {
    // The engine stores keystrokes verbatim and does not trim on check.
    let survey = assessment_survey();
    let rules = RuleSet::build(&survey);
    let mut values = FormValues::initial(&survey, None);
    values.set_text("q-name", "   ");

    let violations = rules.check(&values);
    assert!(!violations.contains_key("q-name"));
}
