//! Seeding the form value map from a schema, with and without a prior
//! saved response.

use std::collections::HashSet;
use std::path::PathBuf;

use grc_cli::survey::{FormValues, QuestionKind, ResponseStatus, Value};

use super::{assessment_survey, saved_response};

#[test]
fn seeding_covers_every_schema_question() {
    let survey = assessment_survey();
    let values = FormValues::initial(&survey, None);

    let schema_ids: HashSet<&str> = survey.questions().map(|q| q.question_id.as_str()).collect();
    let seeded_ids: HashSet<&str> = values.question_ids().collect();
    assert_eq!(seeded_ids, schema_ids);
    assert_eq!(values.len(), survey.question_count());

    for question in survey.questions() {
        let value = values.get(&question.question_id).unwrap();
        assert!(value.is_empty(), "{} should start unanswered", question.question_id);
        match question.question_type {
            QuestionKind::Checkbox | QuestionKind::MultipleSelect => {
                assert_eq!(value, &Value::Many(Vec::new()));
            }
            QuestionKind::File => assert_eq!(value, &Value::File(None)),
            _ => assert_eq!(value, &Value::Text(String::new())),
        }
    }
}

#[test]
fn prior_answers_overlay_as_scalars() {
    let survey = assessment_survey();
    let prior = saved_response(
        &survey,
        ResponseStatus::Draft,
        &[
            ("q-name", &["Initech GmbH"]),
            ("q-severity", &["High"]),
            ("q-score", &["87"]),
        ],
    );

    let values = FormValues::initial(&survey, Some(&prior));
    assert_eq!(values.get("q-name"), Some(&Value::Text("Initech GmbH".into())));
    assert_eq!(values.get("q-severity"), Some(&Value::Text("High".into())));
    assert_eq!(values.get("q-score"), Some(&Value::Text("87".into())));
    // Unanswered questions keep their seeded empties
    assert_eq!(values.get("q-email"), Some(&Value::Text(String::new())));
    assert_eq!(values.get("q-evidence"), Some(&Value::File(None)));
}

/// A drafted multi-valued answer comes back as only its first element, as a
/// scalar. Every consumer shares this truncation, so it is part of the
/// engine's contract rather than a local bug to patch over.
#[test]
fn multi_valued_answers_collapse_to_their_first_element() {
    let survey = assessment_survey();
    let prior = saved_response(
        &survey,
        ResponseStatus::Draft,
        &[("q-controls", &["Encryption", "Backups", "Access reviews"])],
    );

    let values = FormValues::initial(&survey, Some(&prior));
    let value = values.get("q-controls").unwrap();
    assert_eq!(value, &Value::Text("Encryption".into()));
    assert!(value.has_selected("Encryption"));
    assert!(!value.has_selected("Backups"));
}

#[test]
fn empty_answer_sequences_do_not_overlay() {
    let survey = assessment_survey();
    let prior = saved_response(&survey, ResponseStatus::Draft, &[("q-name", &[])]);

    let values = FormValues::initial(&survey, Some(&prior));
    assert_eq!(values.get("q-name"), Some(&Value::Text(String::new())));
}

#[test]
fn draft_ids_missing_from_the_schema_are_skipped() {
    let survey = assessment_survey();
    let mut prior = saved_response(&survey, ResponseStatus::Draft, &[("q-name", &["Initech"])]);
    // A question that was removed from the schema after the draft was saved
    prior.sections[0].questions[0].question_id = "q-retired".to_string();
    prior.sections[0].questions[0].response = vec!["stale".to_string()];

    let values = FormValues::initial(&survey, Some(&prior));
    assert_eq!(values.get("q-retired"), None);
    assert_eq!(values.len(), survey.question_count());
}

#[test]
fn toggling_an_option_twice_restores_the_selection() {
    let survey = assessment_survey();
    let mut values = FormValues::initial(&survey, None);

    values.toggle("q-controls", "Backups");
    assert_eq!(values.get("q-controls"), Some(&Value::Many(vec!["Backups".into()])));

    values.toggle("q-controls", "Encryption");
    values.toggle("q-controls", "Backups");
    assert_eq!(
        values.get("q-controls"),
        Some(&Value::Many(vec!["Encryption".into()]))
    );
}

#[test]
fn file_answers_replace_wholesale() {
    let survey = assessment_survey();
    let mut values = FormValues::initial(&survey, None);

    values.set_file("q-evidence", PathBuf::from("/tmp/soc2-2024.pdf"));
    values.set_file("q-evidence", PathBuf::from("/tmp/soc2-2025.pdf"));
    assert_eq!(
        values.get("q-evidence"),
        Some(&Value::File(Some(PathBuf::from("/tmp/soc2-2025.pdf"))))
    );
}
