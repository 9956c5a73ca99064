use std::collections::HashMap;

use crossterm::event::KeyCode;

use crate::api::GrcClient;
use crate::survey::{
    FormMode, FormValues, ResponseStatus, RuleSet, SectionNavigator, Submitter, Survey,
    SurveyResponse,
};
use crate::tui::Resource;
use crate::tui::widgets::{ChoiceState, SelectState, TextInputState};

/// Parameters handed over by the browser (or a future deep link).
///
/// `survey`/`response` carry data the opener already holds so review modes
/// skip redundant fetches; fill mode fetches both schema and the latest
/// saved response itself.
pub struct FormParams {
    pub client: Option<GrcClient>,
    pub submitter: Option<Submitter>,
    pub page_size: usize,
    pub mode: FormMode,
    pub doc_id: String,
    pub survey: Option<Survey>,
    pub response: Option<SurveyResponse>,
}

impl Default for FormParams {
    fn default() -> Self {
        Self {
            client: None,
            submitter: None,
            page_size: 25,
            mode: FormMode::Fill,
            doc_id: String::new(),
            survey: None,
            response: None,
        }
    }
}

/// One navigable line of the accordion: a section header, or a question
/// inside the open section. Recomputed from the schema and navigator on
/// demand, so indices never go stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Header(usize),
    Question(usize, usize),
}

/// Flatten the accordion into its currently visible rows.
pub fn visible_rows(survey: &Survey, navigator: &SectionNavigator) -> Vec<Row> {
    let mut rows = Vec::new();
    for (s, section) in survey.sections.iter().enumerate() {
        rows.push(Row::Header(s));
        if navigator.is_open(&section.section_id) {
            for q in 0..section.questions.len() {
                rows.push(Row::Question(s, q));
            }
        }
    }
    rows
}

/// Where the last persist attempt stands. Draft and submit share this;
/// concurrent saves are allowed and the later completion wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveState {
    Idle,
    Saving(ResponseStatus),
    Finished(ResponseStatus),
    Failed(String),
}

pub struct State {
    pub client: Option<GrcClient>,
    pub submitter: Option<Submitter>,
    pub page_size: usize,
    pub mode: FormMode,
    pub doc_id: String,

    pub schema: Resource<Survey>,
    pub prior: Resource<Option<SurveyResponse>>,

    /// Engine state, valid once `engine_ready` is set.
    pub values: FormValues,
    pub rules: RuleSet,
    pub navigator: SectionNavigator,
    pub engine_ready: bool,

    /// Cursor over the visible rows.
    pub cursor: usize,
    pub scroll: usize,
    pub text_state: TextInputState,
    pub select_state: SelectState,
    pub choice_state: ChoiceState,
    /// Path buffer while a file question is being edited.
    pub file_input: Option<String>,

    /// Per-question messages from the last blocked submit.
    pub violations: HashMap<String, &'static str>,
    pub save_state: SaveState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            client: None,
            submitter: None,
            page_size: 25,
            mode: FormMode::Fill,
            doc_id: String::new(),
            schema: Resource::NotAsked,
            prior: Resource::NotAsked,
            values: FormValues::default(),
            rules: RuleSet::default(),
            navigator: SectionNavigator::default(),
            engine_ready: false,
            cursor: 0,
            scroll: 0,
            text_state: TextInputState::new(),
            select_state: SelectState::new(0),
            choice_state: ChoiceState::new(0),
            file_input: None,
            violations: HashMap::new(),
            save_state: SaveState::Idle,
        }
    }
}

#[derive(Clone)]
pub enum Msg {
    SchemaLoaded(Result<Survey, String>),
    PriorLoaded(Result<Option<SurveyResponse>, String>),
    Retry,

    CursorUp,
    CursorDown,
    /// Enter on the current row: toggle a section, open a dropdown,
    /// pick/toggle an option, start or commit a file path edit.
    Activate,
    /// Space on an option-group row.
    ToggleOption,
    OptionNext,
    OptionPrev,
    /// A key routed into the focused text (or file path) input.
    FieldKey(KeyCode),
    CancelEdit,

    DropdownNext,
    DropdownPrev,
    DropdownCommit,
    DropdownClose,

    NextSection,
    SaveDraft,
    Submit,
    SaveFinished {
        status: ResponseStatus,
        outcome: Result<u16, String>,
    },
    Back,
}

impl Msg {
    /// Messages that change answers or persist them; dropped centrally
    /// when the form is in a read-only mode.
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Msg::ToggleOption
                | Msg::OptionNext
                | Msg::OptionPrev
                | Msg::FieldKey(_)
                | Msg::CancelEdit
                | Msg::DropdownNext
                | Msg::DropdownPrev
                | Msg::DropdownCommit
                | Msg::DropdownClose
                | Msg::SaveDraft
                | Msg::Submit
        )
    }
}
