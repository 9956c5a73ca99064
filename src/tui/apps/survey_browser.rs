use crossterm::event::KeyCode;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::api::{GrcClient, Page};
use crate::config::Config;
use crate::survey::{FormMode, Submitter, Survey, SurveyResponse};
use crate::tui::apps::survey_form::FormParams;
use crate::tui::widgets::ListState;
use crate::tui::{App, AppId, Command, Resource, Subscription, Theme};

pub struct SurveyBrowser;

/// Which listing the browser is showing. Surveys and Templates read the
/// same endpoint; they differ in which form mode selection opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserTab {
    Surveys,
    Responses,
    Templates,
}

impl BrowserTab {
    fn label(self) -> &'static str {
        match self {
            BrowserTab::Surveys => "Surveys",
            BrowserTab::Responses => "Responses",
            BrowserTab::Templates => "Templates",
        }
    }

    fn next(self) -> Self {
        match self {
            BrowserTab::Surveys => BrowserTab::Responses,
            BrowserTab::Responses => BrowserTab::Templates,
            BrowserTab::Templates => BrowserTab::Surveys,
        }
    }
}

pub struct BrowserParams {
    pub client: Option<GrcClient>,
    pub submitter: Option<Submitter>,
    pub page_size: usize,
}

impl Default for BrowserParams {
    fn default() -> Self {
        Self {
            client: None,
            submitter: None,
            page_size: 25,
        }
    }
}

pub struct State {
    client: Option<GrcClient>,
    submitter: Option<Submitter>,
    page_size: usize,

    tab: BrowserTab,
    templates: Resource<Page<Survey>>,
    responses: Resource<Page<SurveyResponse>>,
    template_page: usize,
    response_page: usize,

    list_state: ListState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            client: None,
            submitter: None,
            page_size: 25,
            tab: BrowserTab::Surveys,
            templates: Resource::NotAsked,
            responses: Resource::NotAsked,
            template_page: 1,
            response_page: 1,
            list_state: ListState::with_selection(),
        }
    }
}

impl State {
    /// Item count of the listing behind the active tab.
    fn active_len(&self) -> usize {
        match self.tab {
            BrowserTab::Surveys | BrowserTab::Templates => self
                .templates
                .to_option()
                .map(|page| page.items.len())
                .unwrap_or(0),
            BrowserTab::Responses => self
                .responses
                .to_option()
                .map(|page| page.items.len())
                .unwrap_or(0),
        }
    }

    fn active_total(&self) -> usize {
        match self.tab {
            BrowserTab::Surveys | BrowserTab::Templates => self
                .templates
                .to_option()
                .map(|page| page.total_count)
                .unwrap_or(0),
            BrowserTab::Responses => self
                .responses
                .to_option()
                .map(|page| page.total_count)
                .unwrap_or(0),
        }
    }

    fn active_page(&self) -> usize {
        match self.tab {
            BrowserTab::Surveys | BrowserTab::Templates => self.template_page,
            BrowserTab::Responses => self.response_page,
        }
    }

    fn page_count(&self) -> usize {
        let total = self.active_total();
        if total == 0 {
            1
        } else {
            total.div_ceil(self.page_size)
        }
    }
}

#[derive(Clone)]
pub enum Msg {
    TemplatesLoaded(Result<Page<Survey>, String>),
    ResponsesLoaded(Result<Page<SurveyResponse>, String>),
    SwitchTab,
    ListKey(KeyCode),
    NextPage,
    PrevPage,
    Refresh,
    Open,
    Quit,
}

fn load_templates(client: &GrcClient, page: usize, page_size: usize) -> Command<Msg> {
    let client = client.clone();
    Command::perform(
        async move {
            client
                .list_templates(page, page_size)
                .await
                .map_err(|e| e.to_string())
        },
        Msg::TemplatesLoaded,
    )
}

fn load_responses(client: &GrcClient, page: usize, page_size: usize) -> Command<Msg> {
    let client = client.clone();
    Command::perform(
        async move {
            client
                .list_responses(page, page_size)
                .await
                .map_err(|e| e.to_string())
        },
        Msg::ResponsesLoaded,
    )
}

/// Build a client and submitter from the saved config. Used when the
/// browser is started without params, so the console works no matter
/// which app the driver boots first.
fn connect_from_config() -> anyhow::Result<(GrcClient, Submitter, usize)> {
    let config = Config::load()?;
    let env = config.current_environment()?;
    let client = GrcClient::new(env.host, env.api_token)?;
    let submitter = Submitter {
        user_id: env.user_id,
        user_name: env.user_name,
    };
    Ok((client, submitter, config.get_settings().page_size))
}

impl App for SurveyBrowser {
    type State = State;
    type Msg = Msg;
    type InitParams = BrowserParams;

    fn init(params: BrowserParams) -> (State, Command<Msg>) {
        let mut state = State {
            page_size: params.page_size,
            ..State::default()
        };

        match (params.client, params.submitter) {
            (Some(client), Some(submitter)) => {
                state.client = Some(client);
                state.submitter = Some(submitter);
            }
            _ => match connect_from_config() {
                Ok((client, submitter, page_size)) => {
                    state.client = Some(client);
                    state.submitter = Some(submitter);
                    state.page_size = page_size;
                }
                Err(e) => {
                    log::error!("No usable environment: {:#}", e);
                    state.templates = Resource::Failure(format!("{:#}", e));
                    state.responses = Resource::Failure(format!("{:#}", e));
                    return (state, Command::None);
                }
            },
        }

        state.templates = Resource::Loading;
        state.responses = Resource::Loading;
        let cmd = match state.client.clone() {
            Some(client) => Command::batch(vec![
                load_templates(&client, 1, state.page_size),
                load_responses(&client, 1, state.page_size),
            ]),
            None => Command::None,
        };

        (state, cmd)
    }

    fn update(state: &mut State, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::TemplatesLoaded(result) => {
                if let Err(e) = &result {
                    log::error!("Template listing failed: {}", e);
                }
                state.templates = Resource::from_result(result);
                clamp_selection(state);
                Command::None
            }
            Msg::ResponsesLoaded(result) => {
                if let Err(e) = &result {
                    log::error!("Response listing failed: {}", e);
                }
                state.responses = Resource::from_result(result);
                clamp_selection(state);
                Command::None
            }
            Msg::SwitchTab => {
                state.tab = state.tab.next();
                state.list_state.select(if state.active_len() > 0 {
                    Some(0)
                } else {
                    None
                });
                Command::None
            }
            Msg::ListKey(key) => {
                let visible_height = 20;
                state.list_state.handle_key(key, state.active_len(), visible_height);
                Command::None
            }
            Msg::NextPage => turn_page(state, 1),
            Msg::PrevPage => turn_page(state, -1),
            Msg::Refresh => {
                let Some(client) = state.client.clone() else {
                    return Command::None;
                };
                match state.tab {
                    BrowserTab::Surveys | BrowserTab::Templates => {
                        state.templates = Resource::Loading;
                        load_templates(&client, state.template_page, state.page_size)
                    }
                    BrowserTab::Responses => {
                        state.responses = Resource::Loading;
                        load_responses(&client, state.response_page, state.page_size)
                    }
                }
            }
            Msg::Open => open_selection(state),
            Msg::Quit => Command::Quit,
        }
    }

    fn view(state: &mut State, frame: &mut Frame, area: Rect, theme: &Theme) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        render_tab_bar(state, frame, chunks[0], theme);
        render_listing(state, frame, chunks[1], theme);
    }

    fn subscriptions(state: &State) -> Vec<Subscription<Msg>> {
        let mut subs = vec![Subscription::keys(|key| match key {
            KeyCode::Up
            | KeyCode::Down
            | KeyCode::PageUp
            | KeyCode::PageDown
            | KeyCode::Home
            | KeyCode::End => Some(Msg::ListKey(key)),
            _ => None,
        })];

        subs.push(Subscription::keyboard(KeyCode::Tab, "Switch tab", Msg::SwitchTab));
        if state.active_len() > 0 {
            subs.push(Subscription::keyboard(KeyCode::Enter, "Open", Msg::Open));
        }
        if state.page_count() > 1 {
            subs.push(Subscription::keyboard(KeyCode::Right, "Next page", Msg::NextPage));
            subs.push(Subscription::keyboard(KeyCode::Left, "Prev page", Msg::PrevPage));
        }
        subs.push(Subscription::keyboard(KeyCode::Char('r'), "Refresh", Msg::Refresh));
        subs.push(Subscription::keyboard(KeyCode::Esc, "Quit", Msg::Quit));
        subs
    }

    fn title() -> &'static str {
        "Survey Console"
    }

    fn status(state: &State, theme: &Theme) -> Option<Line<'static>> {
        let total = state.active_total();
        let noun = match state.tab {
            BrowserTab::Surveys => "surveys",
            BrowserTab::Responses => "responses",
            BrowserTab::Templates => "templates",
        };
        Some(Line::from(vec![
            Span::styled(
                format!("{} {}", total, noun),
                Style::default().fg(theme.text),
            ),
            Span::styled(
                format!("  page {}/{}", state.active_page(), state.page_count()),
                Style::default().fg(theme.subtext0),
            ),
        ]))
    }
}

fn clamp_selection(state: &mut State) {
    let len = state.active_len();
    match state.list_state.selected() {
        Some(_) if len == 0 => state.list_state.select(None),
        Some(sel) if sel >= len => state.list_state.select(Some(len - 1)),
        None if len > 0 => state.list_state.select(Some(0)),
        _ => {}
    }
}

fn turn_page(state: &mut State, delta: i64) -> Command<Msg> {
    let Some(client) = state.client.clone() else {
        return Command::None;
    };
    let current = state.active_page() as i64;
    let target = current + delta;
    if target < 1 || target > state.page_count() as i64 {
        return Command::None;
    }
    let target = target as usize;
    match state.tab {
        BrowserTab::Surveys | BrowserTab::Templates => {
            state.template_page = target;
            state.templates = Resource::Loading;
            load_templates(&client, target, state.page_size)
        }
        BrowserTab::Responses => {
            state.response_page = target;
            state.responses = Resource::Loading;
            load_responses(&client, target, state.page_size)
        }
    }
}

fn open_selection(state: &mut State) -> Command<Msg> {
    let Some(selected) = state.list_state.selected() else {
        return Command::None;
    };

    let params = match state.tab {
        BrowserTab::Surveys => {
            let Some(page) = state.templates.to_option() else {
                return Command::None;
            };
            let Some(survey) = page.items.get(selected) else {
                return Command::None;
            };
            log::info!("Opening survey {} to fill", survey.survey_id);
            FormParams {
                client: state.client.clone(),
                submitter: state.submitter.clone(),
                page_size: state.page_size,
                mode: FormMode::Fill,
                doc_id: survey.survey_id.clone(),
                survey: None,
                response: None,
            }
        }
        BrowserTab::Responses => {
            let Some(page) = state.responses.to_option() else {
                return Command::None;
            };
            let Some(response) = page.items.get(selected) else {
                return Command::None;
            };
            log::info!("Opening response for survey {}", response.survey_id);
            FormParams {
                client: state.client.clone(),
                submitter: state.submitter.clone(),
                page_size: state.page_size,
                mode: FormMode::ReviewResponse,
                doc_id: response.survey_id.clone(),
                survey: None,
                response: Some(response.clone()),
            }
        }
        BrowserTab::Templates => {
            let Some(page) = state.templates.to_option() else {
                return Command::None;
            };
            let Some(survey) = page.items.get(selected) else {
                return Command::None;
            };
            log::info!("Opening template {} for review", survey.survey_id);
            FormParams {
                client: state.client.clone(),
                submitter: state.submitter.clone(),
                page_size: state.page_size,
                mode: FormMode::ReviewTemplate,
                doc_id: survey.survey_id.clone(),
                survey: Some(survey.clone()),
                response: None,
            }
        }
    };

    Command::navigate(AppId::SurveyForm, params)
}

fn render_tab_bar(state: &State, frame: &mut Frame, area: Rect, theme: &Theme) {
    let mut spans = Vec::new();
    for (i, tab) in [BrowserTab::Surveys, BrowserTab::Responses, BrowserTab::Templates]
        .into_iter()
        .enumerate()
    {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(theme.overlay0)));
        }
        let style = if tab == state.tab {
            Style::default().fg(theme.mauve).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.subtext0)
        };
        spans.push(Span::styled(format!(" {} ", tab.label()), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_listing(state: &mut State, frame: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.overlay0))
        .title(state.tab.label());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = match state.tab {
        BrowserTab::Surveys | BrowserTab::Templates => match &state.templates {
            Resource::Success(page) if page.items.is_empty() => {
                vec![Line::from(Span::styled(
                    "  No surveys published",
                    theme.muted_style(),
                ))]
            }
            Resource::Success(page) => page
                .items
                .iter()
                .map(|survey| {
                    Line::from(vec![
                        Span::raw(format!("  {}", survey.survey_name)),
                        Span::styled(
                            format!("  {} · {} questions", survey.domain, survey.question_count()),
                            Style::default().fg(theme.subtext0),
                        ),
                    ])
                })
                .collect(),
            Resource::Failure(e) => {
                vec![Line::from(Span::styled(
                    format!("  {}", e),
                    theme.error_style(),
                ))]
            }
            _ => vec![Line::from(Span::styled("  Loading…", theme.muted_style()))],
        },
        BrowserTab::Responses => match &state.responses {
            Resource::Success(page) if page.items.is_empty() => {
                vec![Line::from(Span::styled(
                    "  No responses yet",
                    theme.muted_style(),
                ))]
            }
            Resource::Success(page) => page
                .items
                .iter()
                .map(|response| {
                    let (badge, badge_style) = if response.is_draft() {
                        ("draft", theme.warning_style())
                    } else {
                        ("submitted", theme.success_style())
                    };
                    Line::from(vec![
                        Span::raw(format!("  {}", response.survey_name)),
                        Span::styled(format!("  [{}]", badge), badge_style),
                        Span::styled(
                            format!("  {}", response.user_name),
                            Style::default().fg(theme.subtext0),
                        ),
                    ])
                })
                .collect(),
            Resource::Failure(e) => {
                vec![Line::from(Span::styled(
                    format!("  {}", e),
                    theme.error_style(),
                ))]
            }
            _ => vec![Line::from(Span::styled("  Loading…", theme.muted_style()))],
        },
    };

    let item_count = state.active_len();
    let visible = inner.height as usize;
    state.list_state.update_scroll(visible, item_count);
    let offset = state.list_state.scroll_offset().min(lines.len());
    let end = (offset + visible).min(lines.len());

    let mut visible_lines: Vec<Line> = Vec::with_capacity(end - offset);
    for (i, line) in lines.into_iter().enumerate().take(end).skip(offset) {
        if state.list_state.selected() == Some(i) && item_count > 0 {
            visible_lines.push(line.style(Style::default().bg(theme.surface0).fg(theme.lavender)));
        } else {
            visible_lines.push(line);
        }
    }

    frame.render_widget(Paragraph::new(visible_lines), inner);
}
