//! Wire shapes for survey schemas.
//!
//! Produced by the platform's schema service and consumed read-only for the
//! session. Field names match the flat snake_case JSON the API emits.

use serde::{Deserialize, Serialize};

/// A published survey: ordered sections of questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Survey {
    pub survey_id: String,
    pub survey_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub subject_type: String,
    #[serde(default)]
    pub sections: Vec<SurveySection>,
}

/// One titled group of questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveySection {
    pub section_id: String,
    pub section_name: String,
    #[serde(default)]
    pub questions: Vec<SurveyQuestion>,
}

/// A single question. `question_id` is the identity key everywhere in the
/// engine; `question_text` is display-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyQuestion {
    pub question_id: String,
    pub question_text: String,
    pub question_type: QuestionKind,
    #[serde(default)]
    pub question_required: bool,
    #[serde(default)]
    pub options: Vec<SelectOption>,
    #[serde(default)]
    pub placeholder: Option<String>,
}

/// One selectable literal for the option-backed question kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub option_id: Option<String>,
    pub option_value: String,
}

/// The closed set of question types the engine interprets.
///
/// Seeding, validation, rendering and mutation all dispatch on this enum,
/// so a new type is a single compiler-enforced edit site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Text,
    Email,
    Phone,
    Number,
    Textarea,
    Date,
    Select,
    NumberSelect,
    Radio,
    Checkbox,
    MultipleSelect,
    File,
}

impl QuestionKind {
    /// Kinds whose value is a sequence of selections rather than a scalar.
    pub fn is_multi(self) -> bool {
        matches!(self, Self::Checkbox | Self::MultipleSelect)
    }

    /// Kinds answered by picking from the question's option list.
    pub fn has_options(self) -> bool {
        matches!(
            self,
            Self::Select | Self::NumberSelect | Self::Radio | Self::Checkbox | Self::MultipleSelect
        )
    }

    /// Kinds edited as free text through the text input widget.
    pub fn is_text_entry(self) -> bool {
        matches!(
            self,
            Self::Text | Self::Email | Self::Phone | Self::Number | Self::Textarea | Self::Date
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Number => "number",
            Self::Textarea => "textarea",
            Self::Date => "date",
            Self::Select => "select",
            Self::NumberSelect => "numberselect",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::MultipleSelect => "multipleselect",
            Self::File => "file",
        }
    }
}

impl Survey {
    /// All questions in schema order, flattened across sections.
    pub fn questions(&self) -> impl Iterator<Item = &SurveyQuestion> {
        self.sections.iter().flat_map(|s| s.questions.iter())
    }

    /// Look up a question anywhere in the tree by its stable id.
    pub fn question(&self, question_id: &str) -> Option<&SurveyQuestion> {
        self.questions().find(|q| q.question_id == question_id)
    }

    pub fn first_section_id(&self) -> Option<&str> {
        self.sections.first().map(|s| s.section_id.as_str())
    }

    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_kind_tags_match_the_platform() {
        let survey: Survey = serde_json::from_str(
            r#"{
                "survey_id": "s-1",
                "survey_name": "Vendor assessment",
                "sections": [{
                    "section_id": "sec-1",
                    "section_name": "General",
                    "questions": [
                        {"question_id": "q1", "question_text": "Interests",
                         "question_type": "multipleselect", "question_required": true,
                         "options": [{"option_value": "Sports"}]},
                        {"question_id": "q2", "question_text": "Team size",
                         "question_type": "numberselect",
                         "options": [{"option_id": "o1", "option_value": "10"}]}
                    ]
                }]
            }"#,
        )
        .unwrap();

        let q1 = survey.question("q1").unwrap();
        assert_eq!(q1.question_type, QuestionKind::MultipleSelect);
        assert!(q1.question_required);
        assert_eq!(q1.options[0].option_id, None);

        let q2 = survey.question("q2").unwrap();
        assert_eq!(q2.question_type, QuestionKind::NumberSelect);
        assert!(!q2.question_required);
        assert_eq!(q2.options[0].option_id.as_deref(), Some("o1"));
    }

    #[test]
    fn questions_flatten_in_schema_order() {
        let survey = Survey {
            survey_id: "s".into(),
            survey_name: "S".into(),
            description: String::new(),
            domain: String::new(),
            subject_type: String::new(),
            sections: vec![
                SurveySection {
                    section_id: "a".into(),
                    section_name: "A".into(),
                    questions: vec![question("q1"), question("q2")],
                },
                SurveySection {
                    section_id: "b".into(),
                    section_name: "B".into(),
                    questions: vec![question("q3")],
                },
            ],
        };

        let ids: Vec<&str> = survey.questions().map(|q| q.question_id.as_str()).collect();
        assert_eq!(ids, ["q1", "q2", "q3"]);
        assert_eq!(survey.first_section_id(), Some("a"));
        assert_eq!(survey.question_count(), 3);
    }

    fn question(id: &str) -> SurveyQuestion {
        SurveyQuestion {
            question_id: id.into(),
            question_text: id.to_uppercase(),
            question_type: QuestionKind::Text,
            question_required: false,
            options: Vec::new(),
            placeholder: None,
        }
    }
}
