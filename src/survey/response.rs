//! Wire shapes for survey responses.
//!
//! A response mirrors the schema tree structurally, but every question node
//! carries the answered `response` sequence instead of options.

use serde::{Deserialize, Serialize};

use super::schema::QuestionKind;

/// The two persistence states a response can be in. Carried on the wire as
/// `response_status`; any other string fails deserialization instead of
/// passing through to persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Draft,
    Submitted,
}

impl ResponseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
        }
    }
}

/// One respondent's answer tree for one survey instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub survey_id: String,
    pub user_id: String,
    pub user_name: String,
    pub survey_name: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub subject_type: String,
    #[serde(default)]
    pub sections: Vec<ResponseSection>,
    pub response_status: ResponseStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSection {
    pub section_id: String,
    pub section_name: String,
    #[serde(default)]
    pub questions: Vec<ResponseQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseQuestion {
    pub question_id: String,
    pub question_text: String,
    pub question_type: QuestionKind,
    #[serde(default)]
    pub response: Vec<String>,
}

impl SurveyResponse {
    pub fn is_draft(&self) -> bool {
        self.response_status == ResponseStatus::Draft
    }

    /// All answered question nodes in response order.
    pub fn questions(&self) -> impl Iterator<Item = &ResponseQuestion> {
        self.sections.iter().flat_map(|s| s.questions.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_is_rejected() {
        let body = r#"{
            "survey_id": "s-1", "user_id": "u-1", "user_name": "Ada",
            "survey_name": "S", "sections": [], "response_status": "archived"
        }"#;
        assert!(serde_json::from_str::<SurveyResponse>(body).is_err());
    }

    #[test]
    fn status_round_trips_as_lowercase() {
        assert_eq!(
            serde_json::to_string(&ResponseStatus::Submitted).unwrap(),
            "\"submitted\""
        );
        assert_eq!(ResponseStatus::Draft.as_str(), "draft");
    }
}
