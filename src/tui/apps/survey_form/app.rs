use crossterm::event::KeyCode;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::api::GrcClient;
use crate::survey::{
    FormMode, FormValues, QuestionKind, ResponseStatus, RuleSet, SectionNavigator, build_response,
};
use crate::tui::apps::survey_browser::BrowserParams;
use crate::tui::widgets::{ChoiceState, SelectState, TextInputState};
use crate::tui::{App, AppId, Command, Resource, Subscription, Theme};

use super::models::{FormParams, Msg, Row, SaveState, State, visible_rows};
use super::view;

/// The unified form component: the same app fills surveys and reviews
/// responses or templates, differing only in `FormMode`.
pub struct SurveyForm;

fn fetch_schema(client: &GrcClient, doc_id: &str) -> Command<Msg> {
    let client = client.clone();
    let doc_id = doc_id.to_string();
    Command::perform(
        async move { client.fetch_survey(&doc_id).await.map_err(|e| e.to_string()) },
        Msg::SchemaLoaded,
    )
}

fn fetch_prior(client: &GrcClient, survey_id: &str) -> Command<Msg> {
    let client = client.clone();
    let survey_id = survey_id.to_string();
    Command::perform(
        async move {
            client
                .fetch_latest_response(&survey_id)
                .await
                .map_err(|e| e.to_string())
        },
        Msg::PriorLoaded,
    )
}

/// Build the engine once both the schema and the saved response have
/// arrived. Runs at most once per form instance.
fn try_init_engine(state: &mut State) {
    if state.engine_ready {
        return;
    }
    let (Resource::Success(survey), Resource::Success(prior)) = (&state.schema, &state.prior)
    else {
        return;
    };

    state.values = FormValues::initial(survey, prior.as_ref());
    state.rules = RuleSet::build(survey);
    state.navigator = SectionNavigator::first_open(survey);
    state.cursor = 0;
    state.scroll = 0;
    state.engine_ready = true;
    log::info!(
        "Form ready: {} questions, {} required, mode {:?}",
        survey.question_count(),
        state.rules.len(),
        state.mode
    );
    sync_focus(state);
}

/// Prime the editing widget for whatever row the cursor sits on.
fn sync_focus(state: &mut State) {
    state.file_input = None;
    state.select_state = SelectState::new(0);

    let Resource::Success(survey) = &state.schema else {
        return;
    };
    let rows = visible_rows(survey, &state.navigator);
    let Some(Row::Question(s, q)) = rows.get(state.cursor).copied() else {
        return;
    };
    let question = &survey.sections[s].questions[q];
    let current = state
        .values
        .get(&question.question_id)
        .map(|v| v.display_text())
        .unwrap_or_default();

    match question.question_type {
        QuestionKind::Text
        | QuestionKind::Email
        | QuestionKind::Phone
        | QuestionKind::Number
        | QuestionKind::Textarea
        | QuestionKind::Date => {
            state.text_state = TextInputState::new();
            state.text_state.set_cursor_to_end(&current);
        }
        QuestionKind::Select | QuestionKind::NumberSelect => {
            let picked = question.options.iter().position(|o| o.option_value == current);
            state.select_state = match picked {
                Some(i) => SelectState::with_selected(question.options.len(), i),
                None => SelectState::new(question.options.len()),
            };
        }
        QuestionKind::Radio | QuestionKind::Checkbox | QuestionKind::MultipleSelect => {
            state.choice_state = ChoiceState::new(question.options.len());
        }
        QuestionKind::File => {}
    }
}

fn move_cursor(state: &mut State, delta: i64) {
    let Resource::Success(survey) = &state.schema else {
        return;
    };
    let rows = visible_rows(survey, &state.navigator);
    if rows.is_empty() {
        return;
    }
    let len = rows.len() as i64;
    state.cursor = (state.cursor as i64 + delta).rem_euclid(len) as usize;
    sync_focus(state);
}

/// Per-character limits where the rules bound the answer length anyway.
fn entry_limit(kind: QuestionKind) -> Option<usize> {
    match kind {
        QuestionKind::Phone | QuestionKind::Date => Some(10),
        _ => None,
    }
}

fn activate(state: &mut State) {
    let Resource::Success(survey) = &state.schema else {
        return;
    };
    let rows = visible_rows(survey, &state.navigator);
    match rows.get(state.cursor).copied() {
        Some(Row::Header(s)) => {
            let section_id = survey.sections[s].section_id.clone();
            state.navigator.toggle(&section_id);
            let rows = visible_rows(survey, &state.navigator);
            state.cursor = rows
                .iter()
                .position(|r| *r == Row::Header(s))
                .unwrap_or(0);
            sync_focus(state);
        }
        Some(Row::Question(s, q)) => {
            if !state.mode.editable() {
                return;
            }
            let question = &survey.sections[s].questions[q];
            let qid = question.question_id.clone();
            match question.question_type {
                QuestionKind::Text
                | QuestionKind::Email
                | QuestionKind::Phone
                | QuestionKind::Number
                | QuestionKind::Textarea
                | QuestionKind::Date => {}
                QuestionKind::Select | QuestionKind::NumberSelect => {
                    state.select_state.open();
                }
                QuestionKind::Radio | QuestionKind::Checkbox | QuestionKind::MultipleSelect => {
                    choice_interact(state);
                }
                QuestionKind::File => match state.file_input.take() {
                    None => {
                        let current = state
                            .values
                            .get(&qid)
                            .map(|v| v.display_text())
                            .unwrap_or_default();
                        state.text_state = TextInputState::new();
                        state.text_state.set_cursor_to_end(&current);
                        state.file_input = Some(current);
                    }
                    Some(buf) => {
                        let path = buf.trim();
                        if !path.is_empty() {
                            state.values.set_file(&qid, path.into());
                            state.violations.remove(&qid);
                        }
                    }
                },
            }
        }
        None => {}
    }
}

/// Apply the highlighted option of a radio or checkbox group.
fn choice_interact(state: &mut State) {
    let Resource::Success(survey) = &state.schema else {
        return;
    };
    let rows = visible_rows(survey, &state.navigator);
    let Some(Row::Question(s, q)) = rows.get(state.cursor).copied() else {
        return;
    };
    let question = &survey.sections[s].questions[q];
    let Some(option) = question.options.get(state.choice_state.cursor()) else {
        return;
    };
    let qid = question.question_id.clone();
    let option_value = option.option_value.clone();

    match question.question_type {
        QuestionKind::Radio => state.values.set_text(&qid, option_value),
        QuestionKind::Checkbox | QuestionKind::MultipleSelect => {
            state.values.toggle(&qid, &option_value)
        }
        QuestionKind::Text
        | QuestionKind::Email
        | QuestionKind::Phone
        | QuestionKind::Number
        | QuestionKind::Textarea
        | QuestionKind::Date
        | QuestionKind::Select
        | QuestionKind::NumberSelect
        | QuestionKind::File => return,
    }
    state.violations.remove(&qid);
}

fn field_key(state: &mut State, key: KeyCode) {
    // A file path edit-in-progress takes the keys first.
    if let Some(buf) = state.file_input.clone() {
        if let Some(new_buf) = state.text_state.handle_key(key, &buf, None) {
            state.file_input = Some(new_buf);
        }
        return;
    }

    let Resource::Success(survey) = &state.schema else {
        return;
    };
    let rows = visible_rows(survey, &state.navigator);
    let Some(Row::Question(s, q)) = rows.get(state.cursor).copied() else {
        return;
    };
    let question = &survey.sections[s].questions[q];
    if !question.question_type.is_text_entry() {
        return;
    }
    let qid = question.question_id.clone();
    let limit = entry_limit(question.question_type);
    let current = state
        .values
        .get(&qid)
        .map(|v| v.display_text())
        .unwrap_or_default();
    if let Some(new_value) = state.text_state.handle_key(key, &current, limit) {
        state.values.set_text(&qid, new_value);
        state.violations.remove(&qid);
    }
}

fn dropdown_commit(state: &mut State) {
    let Some(picked) = state.select_state.select_highlighted() else {
        return;
    };
    let Resource::Success(survey) = &state.schema else {
        return;
    };
    let rows = visible_rows(survey, &state.navigator);
    let Some(Row::Question(s, q)) = rows.get(state.cursor).copied() else {
        return;
    };
    let question = &survey.sections[s].questions[q];
    let Some(option) = question.options.get(picked) else {
        return;
    };
    let qid = question.question_id.clone();
    let value = option.option_value.clone();
    state.values.set_text(&qid, value);
    state.violations.remove(&qid);
}

fn next_section(state: &mut State) {
    let Resource::Success(survey) = &state.schema else {
        return;
    };
    if survey.sections.is_empty() {
        return;
    }
    let open_idx = state
        .navigator
        .open_id()
        .and_then(|id| survey.sections.iter().position(|s| s.section_id == id));
    let next_idx = match open_idx {
        Some(i) => (i + 1) % survey.sections.len(),
        None => 0,
    };
    let next_id = survey.sections[next_idx].section_id.clone();
    if !state.navigator.is_open(&next_id) {
        state.navigator.toggle(&next_id);
    }
    let rows = visible_rows(survey, &state.navigator);
    state.cursor = rows
        .iter()
        .position(|r| *r == Row::Header(next_idx))
        .unwrap_or(0);
    sync_focus(state);
}

/// Serialize the whole answer tree and PUT it. Draft saves skip
/// validation entirely; submit is gated by the caller.
fn persist(state: &mut State, status: ResponseStatus) -> Command<Msg> {
    if !state.engine_ready {
        return Command::None;
    }
    let (Some(client), Some(submitter)) = (state.client.clone(), state.submitter.clone()) else {
        state.save_state = SaveState::Failed("no environment configured".into());
        return Command::None;
    };
    let Resource::Success(survey) = &state.schema else {
        return Command::None;
    };

    let body = build_response(survey, &state.values, &submitter, status);
    state.save_state = SaveState::Saving(status);
    log::info!("Persisting {} for survey {}", status.as_str(), body.survey_id);

    Command::perform(
        async move { client.put_response(&body).await.map_err(|e| e.to_string()) },
        move |outcome| Msg::SaveFinished { status, outcome },
    )
}

/// The kind of the question under the cursor, if any.
fn focused_kind(state: &State) -> Option<QuestionKind> {
    let survey = state.schema.to_option()?;
    let rows = visible_rows(survey, &state.navigator);
    match rows.get(state.cursor)? {
        Row::Question(s, q) => Some(survey.sections[*s].questions[*q].question_type),
        Row::Header(_) => None,
    }
}

/// The validation message for the question under the cursor, if it was
/// flagged by the last submit attempt.
fn focused_violation(state: &State) -> Option<&'static str> {
    let survey = state.schema.to_option()?;
    let rows = visible_rows(survey, &state.navigator);
    match rows.get(state.cursor)? {
        Row::Question(s, q) => {
            let qid = &survey.sections[*s].questions[*q].question_id;
            state.violations.get(qid.as_str()).copied()
        }
        Row::Header(_) => None,
    }
}

impl App for SurveyForm {
    type State = State;
    type Msg = Msg;
    type InitParams = FormParams;

    fn init(params: FormParams) -> (State, Command<Msg>) {
        let mut state = State {
            client: params.client,
            submitter: params.submitter,
            page_size: params.page_size,
            mode: params.mode,
            doc_id: params.doc_id,
            ..State::default()
        };

        let mut commands = Vec::new();

        state.schema = match params.survey {
            Some(survey) => Resource::Success(survey),
            None => match &state.client {
                Some(client) if !state.doc_id.is_empty() => {
                    commands.push(fetch_schema(client, &state.doc_id));
                    Resource::Loading
                }
                _ => Resource::Failure("no survey to load".into()),
            },
        };

        state.prior = match (state.mode, params.response) {
            (_, Some(response)) => Resource::Success(Some(response)),
            (FormMode::Fill, None) => match &state.client {
                Some(client) if !state.doc_id.is_empty() => {
                    commands.push(fetch_prior(client, &state.doc_id));
                    Resource::Loading
                }
                _ => Resource::Success(None),
            },
            _ => Resource::Success(None),
        };

        try_init_engine(&mut state);
        (state, Command::batch(commands))
    }

    fn update(state: &mut State, msg: Msg) -> Command<Msg> {
        if msg.mutates() && !state.mode.editable() {
            log::debug!("Edit ignored: form is read-only");
            return Command::None;
        }

        match msg {
            Msg::SchemaLoaded(result) => {
                match result {
                    Ok(survey) => {
                        state.schema = Resource::Success(survey);
                        try_init_engine(state);
                    }
                    Err(e) => {
                        log::error!("Schema fetch failed: {}", e);
                        state.schema = Resource::Failure(e);
                    }
                }
                Command::None
            }
            Msg::PriorLoaded(result) => {
                match result {
                    Ok(prior) => {
                        state.prior = Resource::Success(prior);
                        try_init_engine(state);
                    }
                    Err(e) => {
                        log::error!("Saved response fetch failed: {}", e);
                        state.prior = Resource::Failure(e);
                    }
                }
                Command::None
            }
            Msg::Retry => {
                let Some(client) = state.client.clone() else {
                    return Command::None;
                };
                let mut commands = Vec::new();
                if state.schema.is_failure() {
                    state.schema = Resource::Loading;
                    commands.push(fetch_schema(&client, &state.doc_id));
                }
                if state.prior.is_failure() {
                    state.prior = Resource::Loading;
                    commands.push(fetch_prior(&client, &state.doc_id));
                }
                Command::batch(commands)
            }

            Msg::CursorUp => {
                move_cursor(state, -1);
                Command::None
            }
            Msg::CursorDown => {
                move_cursor(state, 1);
                Command::None
            }
            Msg::Activate => {
                activate(state);
                Command::None
            }
            Msg::ToggleOption => {
                choice_interact(state);
                Command::None
            }
            Msg::OptionNext => {
                state.choice_state.next();
                Command::None
            }
            Msg::OptionPrev => {
                state.choice_state.prev();
                Command::None
            }
            Msg::FieldKey(key) => {
                field_key(state, key);
                Command::None
            }
            Msg::CancelEdit => {
                state.file_input = None;
                Command::None
            }

            Msg::DropdownNext => {
                state.select_state.navigate_next();
                Command::None
            }
            Msg::DropdownPrev => {
                state.select_state.navigate_prev();
                Command::None
            }
            Msg::DropdownCommit => {
                dropdown_commit(state);
                Command::None
            }
            Msg::DropdownClose => {
                state.select_state.close();
                Command::None
            }

            Msg::NextSection => {
                next_section(state);
                Command::None
            }

            Msg::SaveDraft => persist(state, ResponseStatus::Draft),
            Msg::Submit => {
                if !state.engine_ready {
                    return Command::None;
                }
                let violations = state.rules.check(&state.values);
                if !violations.is_empty() {
                    log::info!("Submit blocked: {} answers missing or invalid", violations.len());
                    state.violations = violations;
                    return Command::None;
                }
                state.violations.clear();
                persist(state, ResponseStatus::Submitted)
            }
            Msg::SaveFinished { status, outcome } => {
                match outcome {
                    Ok(code) => {
                        log::info!("{} persisted (HTTP {})", status.as_str(), code);
                        state.save_state = SaveState::Finished(status);
                    }
                    Err(e) => {
                        log::error!("Persist failed: {}", e);
                        state.save_state = SaveState::Failed(e);
                    }
                }
                Command::None
            }

            Msg::Back => Command::navigate(
                AppId::SurveyBrowser,
                BrowserParams {
                    client: state.client.clone(),
                    submitter: state.submitter.clone(),
                    page_size: state.page_size,
                },
            ),
        }
    }

    fn view(state: &mut State, frame: &mut Frame, area: Rect, theme: &Theme) {
        view::render(state, frame, area, theme);
    }

    fn subscriptions(state: &State) -> Vec<Subscription<Msg>> {
        if !state.engine_ready {
            let mut subs = Vec::new();
            if state.schema.is_failure() || state.prior.is_failure() {
                subs.push(Subscription::keyboard(KeyCode::Char('r'), "Retry", Msg::Retry));
            }
            subs.push(Subscription::keyboard(KeyCode::Esc, "Back", Msg::Back));
            return subs;
        }

        // An open dropdown owns the keyboard.
        if state.select_state.is_open() {
            return vec![Subscription::keys(|key| match key {
                KeyCode::Up => Some(Msg::DropdownPrev),
                KeyCode::Down => Some(Msg::DropdownNext),
                KeyCode::Enter => Some(Msg::DropdownCommit),
                KeyCode::Esc => Some(Msg::DropdownClose),
                _ => None,
            })];
        }

        let mut subs = Vec::new();

        if state.mode.editable() {
            if state.file_input.is_some() {
                subs.push(Subscription::keys(|key| match key {
                    KeyCode::Char(_)
                    | KeyCode::Backspace
                    | KeyCode::Delete
                    | KeyCode::Left
                    | KeyCode::Right
                    | KeyCode::Home
                    | KeyCode::End => Some(Msg::FieldKey(key)),
                    KeyCode::Esc => Some(Msg::CancelEdit),
                    _ => None,
                }));
            } else if let Some(kind) = focused_kind(state) {
                if kind.is_text_entry() {
                    subs.push(Subscription::keys(|key| match key {
                        KeyCode::Char(_)
                        | KeyCode::Backspace
                        | KeyCode::Delete
                        | KeyCode::Left
                        | KeyCode::Right
                        | KeyCode::Home
                        | KeyCode::End => Some(Msg::FieldKey(key)),
                        _ => None,
                    }));
                } else if matches!(
                    kind,
                    QuestionKind::Radio | QuestionKind::Checkbox | QuestionKind::MultipleSelect
                ) {
                    subs.push(Subscription::keys(|key| match key {
                        KeyCode::Left => Some(Msg::OptionPrev),
                        KeyCode::Right => Some(Msg::OptionNext),
                        KeyCode::Char(' ') => Some(Msg::ToggleOption),
                        _ => None,
                    }));
                }
            }
            subs.push(Subscription::keyboard(KeyCode::F(2), "Save draft", Msg::SaveDraft));
            subs.push(Subscription::keyboard(KeyCode::F(3), "Submit", Msg::Submit));
        }

        subs.push(Subscription::keyboard(KeyCode::Up, "Up", Msg::CursorUp));
        subs.push(Subscription::keyboard(KeyCode::Down, "Down", Msg::CursorDown));
        subs.push(Subscription::keyboard(KeyCode::Enter, "Interact", Msg::Activate));
        subs.push(Subscription::keyboard(KeyCode::Tab, "Next section", Msg::NextSection));
        subs.push(Subscription::keyboard(KeyCode::Esc, "Back", Msg::Back));
        subs
    }

    fn title() -> &'static str {
        "Survey Form"
    }

    fn status(state: &State, theme: &Theme) -> Option<Line<'static>> {
        let mut spans = vec![Span::styled(
            state.mode.title().to_string(),
            Style::default().fg(theme.subtext1),
        )];

        match &state.save_state {
            SaveState::Idle => {}
            SaveState::Saving(status) => spans.push(Span::styled(
                format!("  saving {}…", status.as_str()),
                theme.info_style(),
            )),
            SaveState::Finished(ResponseStatus::Draft) => {
                spans.push(Span::styled("  draft saved".to_string(), theme.success_style()))
            }
            SaveState::Finished(ResponseStatus::Submitted) => {
                spans.push(Span::styled("  submitted".to_string(), theme.success_style()))
            }
            SaveState::Failed(e) => spans.push(Span::styled(
                format!("  save failed: {}", e),
                theme.error_style(),
            )),
        }

        if !state.violations.is_empty() {
            spans.push(Span::styled(
                format!("  {} answers need attention", state.violations.len()),
                theme.warning_style(),
            ));
        }
        if let Some(message) = focused_violation(state) {
            spans.push(Span::styled(format!("  {}", message), theme.error_style()));
        }

        Some(Line::from(spans))
    }
}
