//! Serialization of form values into the response wire shape.

use std::path::PathBuf;

use serde_json::json;

use grc_cli::survey::{
    FormValues, QuestionKind, ResponseStatus, Survey, SurveySection, build_response,
};

use super::{assessment_survey, question, submitter};

#[test]
fn response_tree_mirrors_the_schema() {
    let survey = assessment_survey();
    let values = FormValues::initial(&survey, None);
    let response = build_response(&survey, &values, &submitter(), ResponseStatus::Draft);

    assert_eq!(response.survey_id, survey.survey_id);
    assert_eq!(response.user_id, "user-7");
    assert_eq!(response.sections.len(), survey.sections.len());
    for (schema_section, response_section) in survey.sections.iter().zip(&response.sections) {
        assert_eq!(response_section.section_id, schema_section.section_id);
        let schema_ids: Vec<&str> = schema_section
            .questions
            .iter()
            .map(|q| q.question_id.as_str())
            .collect();
        let response_ids: Vec<&str> = response_section
            .questions
            .iter()
            .map(|q| q.question_id.as_str())
            .collect();
        assert_eq!(response_ids, schema_ids);
    }
    // Nothing answered yet: every question rides along with an empty sequence
    assert!(response.questions().all(|q| q.response.is_empty()));
}

#[test]
fn answers_serialize_by_value_shape() {
    let survey = assessment_survey();
    let mut values = FormValues::initial(&survey, None);
    values.set_text("q-name", "Initech GmbH");
    values.toggle("q-controls", "Encryption");
    values.toggle("q-controls", "Backups");
    values.set_file("q-evidence", PathBuf::from("/tmp/soc2-2025.pdf"));

    let response = build_response(&survey, &values, &submitter(), ResponseStatus::Submitted);
    let answer = |id: &str| {
        response
            .questions()
            .find(|q| q.question_id == id)
            .unwrap()
            .response
            .clone()
    };

    assert_eq!(answer("q-name"), vec!["Initech GmbH"]);
    assert_eq!(answer("q-controls"), vec!["Encryption", "Backups"]);
    assert_eq!(answer("q-evidence"), vec!["/tmp/soc2-2025.pdf"]);
    assert_eq!(answer("q-phone"), Vec::<String>::new());
}

#[test]
fn draft_and_submit_bodies_differ_only_in_status() {
    let survey = assessment_survey();
    let mut values = FormValues::initial(&survey, None);
    values.set_text("q-name", "Initech GmbH");

    let draft = build_response(&survey, &values, &submitter(), ResponseStatus::Draft);
    let submitted = build_response(&survey, &values, &submitter(), ResponseStatus::Submitted);

    let mut draft_body = serde_json::to_value(&draft).unwrap();
    draft_body["response_status"] = json!("submitted");
    assert_eq!(draft_body, serde_json::to_value(&submitted).unwrap());
}

#[test]
fn wire_shape_matches_the_platform_contract() {
    let survey = Survey {
        survey_id: "srv-mini".to_string(),
        survey_name: "Mini".to_string(),
        description: String::new(),
        domain: "third-party".to_string(),
        subject_type: "vendor".to_string(),
        sections: vec![SurveySection {
            section_id: "sec-1".to_string(),
            section_name: "One".to_string(),
            questions: vec![
                question("q-name", QuestionKind::Text, true, &[]),
                question("q-controls", QuestionKind::Checkbox, false, &["Encryption", "Backups"]),
                question("q-evidence", QuestionKind::File, false, &[]),
            ],
        }],
    };
    let mut values = FormValues::initial(&survey, None);
    values.set_text("q-name", "Initech GmbH");
    values.toggle("q-controls", "Encryption");
    values.toggle("q-controls", "Backups");

    let response = build_response(&survey, &values, &submitter(), ResponseStatus::Submitted);
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({
            "survey_id": "srv-mini",
            "user_id": "user-7",
            "user_name": "Avery Quinn",
            "survey_name": "Mini",
            "domain": "third-party",
            "subject_type": "vendor",
            "sections": [{
                "section_id": "sec-1",
                "section_name": "One",
                "questions": [
                    {
                        "question_id": "q-name",
                        "question_text": "Question q-name",
                        "question_type": "text",
                        "response": ["Initech GmbH"]
                    },
                    {
                        "question_id": "q-controls",
                        "question_text": "Question q-controls",
                        "question_type": "checkbox",
                        "response": ["Encryption", "Backups"]
                    },
                    {
                        "question_id": "q-evidence",
                        "question_text": "Question q-evidence",
                        "question_type": "file",
                        "response": []
                    }
                ]
            }],
            "response_status": "submitted"
        })
    );
}

/// Draft, reload, submit. The multi-valued answer survives the save but
/// comes back scalarized, so the final submission carries only its first
/// element. The truncation is shared platform behavior; this pins it.
#[test]
fn draft_reload_submit_keeps_scalars_and_truncates_multis() {
    let survey = assessment_survey();
    let mut values = FormValues::initial(&survey, None);
    values.set_text("q-name", "Initech GmbH");
    values.toggle("q-controls", "Encryption");
    values.toggle("q-controls", "Backups");

    let draft = build_response(&survey, &values, &submitter(), ResponseStatus::Draft);
    assert!(draft.is_draft());

    let reloaded = FormValues::initial(&survey, Some(&draft));
    let resubmitted = build_response(&survey, &reloaded, &submitter(), ResponseStatus::Submitted);
    let answer = |id: &str| {
        resubmitted
            .questions()
            .find(|q| q.question_id == id)
            .unwrap()
            .response
            .clone()
    };

    assert_eq!(answer("q-name"), vec!["Initech GmbH"]);
    assert_eq!(answer("q-controls"), vec!["Encryption"]);
}
