//! Serialization of in-memory values back into the wire response shape.

use super::form::FormValues;
use super::response::{ResponseQuestion, ResponseSection, ResponseStatus, SurveyResponse};
use super::schema::Survey;
use super::value::Value;

/// Identity attached to a persisted response.
#[derive(Debug, Clone)]
pub struct Submitter {
    pub user_id: String,
    pub user_name: String,
}

/// Rebuild the full response tree for a draft-save or submit.
///
/// The walk follows the schema, never the value map alone, so the output
/// carries every schema question in order and nothing else. Draft and
/// submit bodies differ only in `status`.
pub fn build_response(
    survey: &Survey,
    values: &FormValues,
    submitter: &Submitter,
    status: ResponseStatus,
) -> SurveyResponse {
    SurveyResponse {
        survey_id: survey.survey_id.clone(),
        user_id: submitter.user_id.clone(),
        user_name: submitter.user_name.clone(),
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
                    .map(|question| ResponseQuestion {
                        question_id: question.question_id.clone(),
                        question_text: question.question_text.clone(),
                        question_type: question.question_type,
                        response: values
                            .get(&question.question_id)
                            .map(Value::to_wire)
                            .unwrap_or_default(),
                    })
                    .collect(),
            })
            .collect(),
        response_status: status,
    }
}
