use anyhow::Result;
use clap::{Args, Subcommand};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use std::io;

use crate::tui::apps::{SurveyBrowser, SurveyForm};
use crate::tui::{AppId, AppRuntime, Runtime, Theme};

#[derive(Args)]
pub struct TuiCommands {
    #[command(subcommand)]
    pub command: Option<TuiSubcommands>,
}

#[derive(Subcommand)]
pub enum TuiSubcommands {
    /// Launch the interactive console (default)
    Launch,
}

pub async fn tui_command(args: TuiCommands) -> Result<()> {
    match args.command {
        Some(TuiSubcommands::Launch) | None => {
            launch_tui().await?;
        }
    }
    Ok(())
}

async fn launch_tui() -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = Theme::default();
    // The browser is the entry app; it connects from the saved config.
    let mut runtime: Box<dyn AppRuntime> = Box::new(Runtime::<SurveyBrowser>::new());

    // Run the TUI loop
    let result = run_tui(&mut terminal, &mut runtime, &theme).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    runtime: &mut Box<dyn AppRuntime>,
    theme: &Theme,
) -> Result<()> {
    loop {
        let frame_start = std::time::Instant::now();

        // Process all pending events FIRST for minimal input latency
        let mut should_quit = false;
        while event::poll(std::time::Duration::from_millis(0))? {
            let event_read = event::read()?;

            if let Event::Key(key) = &event_read {
                // Global quit, reachable even when the active app routes
                // every other key to a focused field
                if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    should_quit = true;
                    break;
                }

                if !runtime.handle_key(*key)? {
                    should_quit = true;
                    break;
                }
            }
        }

        if should_quit {
            break;
        }

        // Poll async commands
        if !runtime.poll_async().await? {
            break;
        }

        // A Navigate command swaps which app lives behind the trait object
        if let Some((app, params)) = runtime.take_navigation() {
            log::debug!("Switching to {:?}", app);
            *runtime = match app {
                AppId::SurveyBrowser => {
                    Box::new(Runtime::<SurveyBrowser>::from_any_params(params))
                }
                AppId::SurveyForm => Box::new(Runtime::<SurveyForm>::from_any_params(params)),
            };
        }

        // Render the TUI with updated state (shows input immediately)
        terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Min(0),
                    Constraint::Length(1),
                ])
                .split(frame.area());

            render_header(frame, runtime.as_ref(), theme, chunks[0]);
            runtime.render(frame, chunks[1], theme);
            render_footer(frame, runtime.as_ref(), theme, chunks[2]);
        })?;

        // Sleep for remainder of 16ms frame (60 FPS)
        let elapsed = frame_start.elapsed();
        if let Some(remaining) = std::time::Duration::from_millis(16).checked_sub(elapsed) {
            tokio::time::sleep(remaining).await;
        }
    }

    Ok(())
}

fn render_header(
    frame: &mut ratatui::Frame,
    runtime: &dyn AppRuntime,
    theme: &Theme,
    area: ratatui::layout::Rect,
) {
    let mut spans = vec![Span::styled(
        format!(" {} ", runtime.title()),
        Style::default()
            .fg(theme.base)
            .bg(theme.mauve)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(status) = runtime.status(theme) {
        spans.push(Span::raw("  "));
        spans.extend(status.spans);
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.mantle)),
        area,
    );
}

fn render_footer(
    frame: &mut ratatui::Frame,
    runtime: &dyn AppRuntime,
    theme: &Theme,
    area: ratatui::layout::Rect,
) {
    let mut spans = Vec::new();
    for (key, description) in runtime.key_bindings() {
        if !spans.is_empty() {
            spans.push(Span::styled(" │ ", Style::default().fg(theme.surface2)));
        }
        spans.push(Span::styled(
            key_label(key),
            Style::default().fg(theme.mauve).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", description),
            Style::default().fg(theme.subtext0),
        ));
    }
    if !spans.is_empty() {
        spans.push(Span::styled(" │ ", Style::default().fg(theme.surface2)));
    }
    spans.push(Span::styled(
        "^Q",
        Style::default().fg(theme.mauve).add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled(" Quit", Style::default().fg(theme.subtext0)));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.mantle)),
        area,
    );
}

fn key_label(key: KeyCode) -> String {
    match key {
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        other => format!("{:?}", other),
    }
}
