//! Per-question value representation and mutation.

use std::path::PathBuf;

use super::schema::QuestionKind;

/// The current value of a single question.
///
/// Scalar kinds (including select/radio, which store the chosen option
/// literal) hold `Text`; checkbox/multipleselect hold `Many`; file holds a
/// local handle until the external upload transport takes over.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Many(Vec<String>),
    File(Option<PathBuf>),
}

impl Value {
    /// The type-appropriate empty value a question is seeded with.
    pub fn empty_for(kind: QuestionKind) -> Self {
        match kind {
            QuestionKind::Checkbox | QuestionKind::MultipleSelect => Value::Many(Vec::new()),
            QuestionKind::File => Value::File(None),
            _ => Value::Text(String::new()),
        }
    }

    /// Whether the value counts as unanswered.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Text(s) => s.is_empty(),
            Value::Many(selected) => selected.is_empty(),
            Value::File(handle) => handle.is_none(),
        }
    }

    /// Replace a scalar answer outright. Text-entry kinds call this per
    /// keystroke; select/radio call it when a choice is made.
    pub fn set_text(&mut self, text: impl Into<String>) {
        *self = Value::Text(text.into());
    }

    /// Toggle one option of a multi-valued answer: present is removed,
    /// absent is appended. A non-sequence value is left untouched — the
    /// draft overlay can leave a scalar behind for a multi kind.
    pub fn toggle(&mut self, option: &str) {
        if let Value::Many(selected) = self {
            if let Some(pos) = selected.iter().position(|s| s == option) {
                selected.remove(pos);
            } else {
                selected.push(option.to_string());
            }
        }
    }

    /// Replace the file handle wholesale; no multi-file support.
    pub fn set_file(&mut self, path: PathBuf) {
        *self = Value::File(Some(path));
    }

    /// Whether an option literal is currently selected.
    pub fn has_selected(&self, option: &str) -> bool {
        match self {
            Value::Text(s) => s == option,
            Value::Many(selected) => selected.iter().any(|s| s == option),
            Value::File(_) => false,
        }
    }

    /// The value as shown in a widget: the scalar itself, selections joined
    /// with commas, or the file handle's path.
    pub fn display_text(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Many(selected) => selected.join(", "),
            Value::File(Some(path)) => path.display().to_string(),
            Value::File(None) => String::new(),
        }
    }

    /// The wire form of the answer: scalar wrapped in a singleton sequence
    /// (empty sequence when unanswered), sequence passed through unchanged,
    /// file handle as its display string.
    pub fn to_wire(&self) -> Vec<String> {
        match self {
            Value::Text(s) if s.is_empty() => Vec::new(),
            Value::Text(s) => vec![s.clone()],
            Value::Many(selected) => selected.clone(),
            Value::File(Some(path)) => vec![path.display().to_string()],
            Value::File(None) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_match_kind_shape() {
        assert_eq!(
            Value::empty_for(QuestionKind::Checkbox),
            Value::Many(Vec::new())
        );
        assert_eq!(Value::empty_for(QuestionKind::File), Value::File(None));
        assert_eq!(
            Value::empty_for(QuestionKind::Select),
            Value::Text(String::new())
        );
        assert!(Value::empty_for(QuestionKind::Phone).is_empty());
    }

    #[test]
    fn toggle_appends_then_removes() {
        let mut value = Value::Many(vec!["Sports".into()]);
        value.toggle("Music");
        assert_eq!(value, Value::Many(vec!["Sports".into(), "Music".into()]));
        value.toggle("Sports");
        assert_eq!(value, Value::Many(vec!["Music".into()]));
    }

    #[test]
    fn toggle_ignores_scalar_values() {
        // A drafted multi answer overlays back as its first element only.
        let mut value = Value::Text("Sports".into());
        value.toggle("Music");
        assert_eq!(value, Value::Text("Sports".into()));
    }

    #[test]
    fn file_replacement_is_wholesale() {
        let mut value = Value::File(Some(PathBuf::from("/tmp/old.pdf")));
        value.set_file(PathBuf::from("/tmp/new.pdf"));
        assert_eq!(value.to_wire(), vec!["/tmp/new.pdf".to_string()]);
    }

    #[test]
    fn wire_form_drops_unanswered() {
        assert!(Value::Text(String::new()).to_wire().is_empty());
        assert!(Value::File(None).to_wire().is_empty());
        assert_eq!(Value::Text("Ada".into()).to_wire(), vec!["Ada".to_string()]);
        assert_eq!(
            Value::Many(vec!["a".into(), "b".into()]).to_wire(),
            vec!["a".to_string(), "b".to_string()]
        );
    }
}
