//! In-memory form state: the editing session's value map, the accordion
//! navigator, and the mode flag that unifies the fill/review consumers.

use std::collections::HashMap;
use std::path::PathBuf;

use super::response::SurveyResponse;
use super::schema::Survey;
use super::value::Value;

/// What the form component is being used for. One component serves the
/// respondent filler and both read-only review surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Fill,
    ReviewResponse,
    ReviewTemplate,
}

impl FormMode {
    /// Review modes present every field identically but reject mutation.
    pub fn editable(self) -> bool {
        matches!(self, FormMode::Fill)
    }

    pub fn title(self) -> &'static str {
        match self {
            FormMode::Fill => "Fill Survey",
            FormMode::ReviewResponse => "View Response",
            FormMode::ReviewTemplate => "Review Template",
        }
    }
}

/// The session's value map, keyed by question id.
///
/// Seeded for every question in the schema before any interaction; the key
/// set never drifts from the schema's question-id set afterwards, so a
/// lookup can only miss for ids outside the loaded schema.
#[derive(Debug, Clone, Default)]
pub struct FormValues {
    values: HashMap<String, Value>,
}

impl FormValues {
    /// Seed a type-appropriate empty value for every question in schema
    /// order, then overlay the first element of each non-empty answer in
    /// `prior`.
    ///
    /// The overlay keeps only `response[0]` and writes it as a plain scalar
    /// even for multi-valued kinds. Every production consumer shares this
    /// truncation; callers must not repair it locally.
    pub fn initial(survey: &Survey, prior: Option<&SurveyResponse>) -> Self {
        let mut values = HashMap::new();
        for question in survey.questions() {
            values.insert(
                question.question_id.clone(),
                Value::empty_for(question.question_type),
            );
        }
        if let Some(response) = prior {
            for answered in response.questions() {
                let Some(first) = answered.response.first() else {
                    continue;
                };
                // Ids absent from the current schema are stale draft
                // entries; skip them.
                if let Some(value) = values.get_mut(&answered.question_id) {
                    *value = Value::Text(first.clone());
                }
            }
        }
        Self { values }
    }

    pub fn get(&self, question_id: &str) -> Option<&Value> {
        self.values.get(question_id)
    }

    /// Replace a scalar answer.
    pub fn set_text(&mut self, question_id: &str, text: impl Into<String>) {
        if let Some(value) = self.values.get_mut(question_id) {
            value.set_text(text);
        }
    }

    /// Toggle one option of a multi-valued answer.
    pub fn toggle(&mut self, question_id: &str, option: &str) {
        if let Some(value) = self.values.get_mut(question_id) {
            value.toggle(option);
        }
    }

    /// Replace a file handle.
    pub fn set_file(&mut self, question_id: &str, path: PathBuf) {
        if let Some(value) = self.values.get_mut(question_id) {
            value.set_file(path);
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The ids currently carried by the map, for key-set checks.
    pub fn question_ids(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// Accordion state: at most one section open at a time, client-local only.
#[derive(Debug, Clone, Default)]
pub struct SectionNavigator {
    open: Option<String>,
}

impl SectionNavigator {
    /// Navigator for a freshly loaded schema, with its first section open.
    pub fn first_open(survey: &Survey) -> Self {
        Self {
            open: survey.first_section_id().map(str::to_string),
        }
    }

    pub fn open_id(&self) -> Option<&str> {
        self.open.as_deref()
    }

    pub fn is_open(&self, section_id: &str) -> bool {
        self.open.as_deref() == Some(section_id)
    }

    /// Close the section if it is the open one, otherwise open exactly it
    /// (closing any other).
    pub fn toggle(&mut self, section_id: &str) {
        if self.is_open(section_id) {
            self.open = None;
        } else {
            self.open = Some(section_id.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::schema::{QuestionKind, SurveyQuestion, SurveySection};

    fn survey_with_sections(names: &[&str]) -> Survey {
        Survey {
            survey_id: "s".into(),
            survey_name: "S".into(),
            description: String::new(),
            domain: String::new(),
            subject_type: String::new(),
            sections: names
                .iter()
                .map(|name| SurveySection {
                    section_id: format!("sec-{name}"),
                    section_name: name.to_string(),
                    questions: vec![SurveyQuestion {
                        question_id: format!("q-{name}"),
                        question_text: name.to_string(),
                        question_type: QuestionKind::Text,
                        question_required: false,
                        options: Vec::new(),
                        placeholder: None,
                    }],
                })
                .collect(),
        }
    }

    #[test]
    fn navigator_opens_first_section_on_load() {
        let survey = survey_with_sections(&["general", "scope"]);
        let nav = SectionNavigator::first_open(&survey);
        assert!(nav.is_open("sec-general"));
        assert!(!nav.is_open("sec-scope"));
    }

    #[test]
    fn navigator_open_set_has_cardinality_at_most_one() {
        let survey = survey_with_sections(&["general", "scope"]);
        let mut nav = SectionNavigator::first_open(&survey);

        nav.toggle("sec-scope");
        assert!(nav.is_open("sec-scope"));
        assert!(!nav.is_open("sec-general"));

        nav.toggle("sec-scope");
        assert_eq!(nav.open_id(), None);
    }

    #[test]
    fn navigator_on_empty_schema_has_nothing_open() {
        let survey = survey_with_sections(&[]);
        let nav = SectionNavigator::first_open(&survey);
        assert_eq!(nav.open_id(), None);
    }

    #[test]
    fn review_modes_are_not_editable() {
        assert!(FormMode::Fill.editable());
        assert!(!FormMode::ReviewResponse.editable());
        assert!(!FormMode::ReviewTemplate.editable());
    }

    #[test]
    fn mutation_of_unknown_ids_is_a_no_op() {
        let survey = survey_with_sections(&["general"]);
        let mut values = FormValues::initial(&survey, None);
        values.set_text("q-unknown", "x");
        values.toggle("q-unknown", "x");
        assert_eq!(values.len(), 1);
        assert_eq!(values.get("q-unknown"), None);
    }
}
