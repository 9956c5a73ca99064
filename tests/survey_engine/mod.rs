/// Survey engine tests
///
/// Exercises the schema-driven form pipeline end to end: seeding the value
/// map, the required-field rules, and serialization back into the response
/// wire shape. Each area has its own module; the fixtures below are shared.
pub mod initial_values;
pub mod submission;
pub mod validation;

use grc_cli::survey::{
    QuestionKind, ResponseQuestion, ResponseSection, ResponseStatus, SelectOption, Submitter,
    Survey, SurveyQuestion, SurveyResponse, SurveySection,
};

pub fn question(
    id: &str,
    kind: QuestionKind,
    required: bool,
    options: &[&str],
) -> SurveyQuestion {
    SurveyQuestion {
        question_id: id.to_string(),
        question_text: format!("Question {id}"),
        question_type: kind,
        question_required: required,
        options: options
            .iter()
            .map(|value| SelectOption {
                option_id: None,
                option_value: value.to_string(),
            })
            .collect(),
        placeholder: None,
    }
}

/// A vendor assessment covering every question kind the engine interprets.
pub fn assessment_survey() -> Survey {
    Survey {
        survey_id: "srv-vendor".to_string(),
        survey_name: "Vendor Assessment".to_string(),
        description: "Annual review of third-party vendors".to_string(),
        domain: "third-party".to_string(),
        subject_type: "vendor".to_string(),
        sections: vec![
            SurveySection {
                section_id: "sec-contact".to_string(),
                section_name: "Contact".to_string(),
                questions: vec![
                    question("q-name", QuestionKind::Text, true, &[]),
                    question("q-email", QuestionKind::Email, true, &[]),
                    question("q-phone", QuestionKind::Phone, false, &[]),
                ],
            },
            SurveySection {
                section_id: "sec-risk".to_string(),
                section_name: "Risk".to_string(),
                questions: vec![
                    question(
                        "q-severity",
                        QuestionKind::Radio,
                        true,
                        &["Low", "Medium", "High"],
                    ),
                    question(
                        "q-controls",
                        QuestionKind::Checkbox,
                        true,
                        &["Encryption", "Backups", "Access reviews"],
                    ),
                    question(
                        "q-frameworks",
                        QuestionKind::MultipleSelect,
                        false,
                        &["SOC 2", "ISO 27001", "PCI DSS"],
                    ),
                    question("q-headcount", QuestionKind::NumberSelect, false, &["10", "50", "250"]),
                ],
            },
            SurveySection {
                section_id: "sec-evidence".to_string(),
                section_name: "Evidence".to_string(),
                questions: vec![
                    question("q-owner", QuestionKind::Select, false, &["Security", "Legal"]),
                    question("q-reviewed", QuestionKind::Date, false, &[]),
                    question("q-score", QuestionKind::Number, false, &[]),
                    question("q-notes", QuestionKind::Textarea, false, &[]),
                    question("q-evidence", QuestionKind::File, false, &[]),
                ],
            },
        ],
    }
}

pub fn submitter() -> Submitter {
    Submitter {
        user_id: "user-7".to_string(),
        user_name: "Avery Quinn".to_string(),
    }
}

/// A saved response for `survey` carrying the given answers, shaped the way
/// the platform returns it: the full section tree with one `response`
/// sequence per question.
pub fn saved_response(
    survey: &Survey,
    status: ResponseStatus,
    answers: &[(&str, &[&str])],
) -> SurveyResponse {
    let answer_for = |id: &str| -> Vec<String> {
        answers
            .iter()
            .find(|(answered, _)| *answered == id)
            .map(|(_, values)| values.iter().map(|v| v.to_string()).collect())
            .unwrap_or_default()
    };

    SurveyResponse {
        survey_id: survey.survey_id.clone(),
        user_id: "user-7".to_string(),
        user_name: "Avery Quinn".to_string(),
        survey_name: survey.survey_name.clone(),
        domain: survey.domain.clone(),
        subject_type: survey.subject_type.clone(),
        sections: survey
            .sections
            .iter()
            .map(|section| ResponseSection {
                section_id: section.section_id.clone(),
                section_name: section.section_name.clone(),
                questions: section
                    .questions
                    .iter()
                    .map(|q| ResponseQuestion {
                        question_id: q.question_id.clone(),
                        question_text: q.question_text.clone(),
                        question_type: q.question_type,
                        response: answer_for(&q.question_id),
                    })
                    .collect(),
            })
            .collect(),
        response_status: status,
    }
}
