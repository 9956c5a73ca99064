use std::collections::HashMap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::survey::{FormValues, QuestionKind, SurveyQuestion, SurveySection};
use crate::tui::widgets::{ChoiceState, SelectState, TextInputState};
use crate::tui::{Resource, Theme};

use super::models::{Row, State, visible_rows};

pub(super) fn render(state: &mut State, frame: &mut Frame, area: Rect, theme: &Theme) {
    if !state.engine_ready {
        let (message, failed) = if let Resource::Failure(e) = &state.schema {
            (format!("Could not load survey: {}", e), true)
        } else if let Resource::Failure(e) = &state.prior {
            (format!("Could not load saved response: {}", e), true)
        } else {
            ("Loading survey…".to_string(), false)
        };
        render_blocked(state, frame, area, theme, &message, failed);
        return;
    }

    let Resource::Success(survey) = &state.schema else {
        return;
    };

    let title = if survey.domain.is_empty() {
        survey.survey_name.clone()
    } else {
        format!("{} ({})", survey.survey_name, survey.domain)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.overlay0))
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let editable = state.mode.editable();
    let entry_width = (inner.width as usize).saturating_sub(6).max(8);
    let rows = visible_rows(survey, &state.navigator);

    // Every rendered line is tagged with the row it belongs to, so the
    // scroll can keep the whole cursor block visible.
    let mut lines: Vec<(usize, Line<'static>)> = Vec::new();

    if !survey.description.is_empty() {
        lines.push((
            0,
            Line::from(Span::styled(
                survey.description.clone(),
                theme.muted_style(),
            )),
        ));
        lines.push((0, Line::default()));
    }
    if rows.is_empty() {
        lines.push((
            0,
            Line::from(Span::styled(
                "This survey has no sections".to_string(),
                theme.muted_style(),
            )),
        ));
    }

    for (i, row) in rows.iter().enumerate() {
        let focused = i == state.cursor;
        match *row {
            Row::Header(s) => {
                let section = &survey.sections[s];
                let open = state.navigator.is_open(&section.section_id);
                lines.push((i, header_line(section, open, focused, theme)));
            }
            Row::Question(s, q) => {
                let question = &survey.sections[s].questions[q];
                let produced = question_lines(
                    question,
                    &state.values,
                    &state.violations,
                    focused,
                    editable,
                    &mut state.text_state,
                    &state.select_state,
                    &state.choice_state,
                    state.file_input.as_deref(),
                    entry_width,
                    theme,
                );
                for line in produced {
                    lines.push((i, line));
                }
                lines.push((i, Line::default()));
            }
        }
    }

    // Scroll so the cursor's block of lines stays on screen.
    let height = inner.height as usize;
    let first = lines.iter().position(|(row, _)| *row == state.cursor);
    let last = lines.iter().rposition(|(row, _)| *row == state.cursor);
    if let (Some(first), Some(last)) = (first, last) {
        if first < state.scroll {
            state.scroll = first;
        } else if height > 0 && last + 1 > state.scroll + height {
            state.scroll = (last + 1).saturating_sub(height);
        }
    }
    state.scroll = state.scroll.min(lines.len().saturating_sub(height));

    let visible: Vec<Line> = lines
        .into_iter()
        .skip(state.scroll)
        .take(height)
        .map(|(_, line)| line)
        .collect();
    frame.render_widget(Paragraph::new(visible), inner);
}

fn render_blocked(
    state: &State,
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    message: &str,
    failed: bool,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.overlay0))
        .title(state.mode.title());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let style = if failed {
        theme.error_style()
    } else {
        theme.muted_style()
    };
    let mut text = vec![Line::default(), Line::from(Span::styled(message.to_string(), style))];
    if failed {
        text.push(Line::default());
        text.push(Line::from(Span::styled(
            "Press r to retry, Esc to go back".to_string(),
            theme.muted_style(),
        )));
    }
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), inner);
}

fn header_line(
    section: &SurveySection,
    open: bool,
    focused: bool,
    theme: &Theme,
) -> Line<'static> {
    let marker = if open { "▾ " } else { "▸ " };
    let name_style = if open {
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.subtext1).add_modifier(Modifier::BOLD)
    };
    let line = Line::from(vec![
        Span::styled(marker.to_string(), Style::default().fg(theme.mauve)),
        Span::styled(section.section_name.clone(), name_style),
        Span::styled(
            format!("  {} questions", section.questions.len()),
            Style::default().fg(theme.overlay1),
        ),
    ]);
    if focused {
        line.style(Style::default().bg(theme.surface0))
    } else {
        line
    }
}

/// Render one question: its text line, then its value per kind. This match
/// is the rendering dispatch point; adding a kind fails to compile until
/// it is handled here.
#[allow(clippy::too_many_arguments)]
fn question_lines(
    question: &SurveyQuestion,
    values: &FormValues,
    violations: &HashMap<String, &'static str>,
    focused: bool,
    editable: bool,
    text_state: &mut TextInputState,
    select_state: &SelectState,
    choice_state: &ChoiceState,
    file_input: Option<&str>,
    entry_width: usize,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let qid = question.question_id.as_str();
    let mut out = Vec::new();

    let text_style = if focused {
        Style::default().fg(theme.lavender)
    } else {
        Style::default().fg(theme.text)
    };
    let mut title = vec![
        Span::raw("  "),
        Span::styled(question.question_text.clone(), text_style),
    ];
    if question.question_required {
        title.push(Span::styled(" *".to_string(), theme.required_style()));
    }
    if violations.contains_key(qid) {
        title.push(Span::styled("  Required".to_string(), theme.required_style()));
    }
    out.push(Line::from(title));

    let current = values
        .get(qid)
        .map(|v| v.display_text())
        .unwrap_or_default();

    match question.question_type {
        QuestionKind::Text
        | QuestionKind::Email
        | QuestionKind::Phone
        | QuestionKind::Number
        | QuestionKind::Textarea
        | QuestionKind::Date => {
            let mut spans = vec![Span::raw("    ")];
            if focused && editable {
                spans.extend(entry_spans(&current, text_state, entry_width, theme));
            } else if current.is_empty() {
                spans.push(Span::styled(hint_text(question), theme.muted_style()));
            } else {
                spans.push(Span::styled(current, Style::default().fg(theme.text)));
            }
            out.push(Line::from(spans));
        }

        QuestionKind::Select | QuestionKind::NumberSelect => {
            let shown = if current.is_empty() {
                Span::styled(hint_text(question), theme.muted_style())
            } else {
                Span::styled(current, Style::default().fg(theme.text))
            };
            out.push(Line::from(vec![
                Span::raw("    "),
                Span::styled("[ ".to_string(), Style::default().fg(theme.overlay1)),
                shown,
                Span::styled(" ▾ ]".to_string(), Style::default().fg(theme.overlay1)),
            ]));

            if focused && select_state.is_open() {
                if question.options.is_empty() {
                    out.push(Line::from(vec![
                        Span::raw("      "),
                        Span::styled("(no options)".to_string(), theme.muted_style()),
                    ]));
                }
                for (j, option) in question.options.iter().enumerate() {
                    let highlighted = j == select_state.highlighted();
                    let style = if highlighted {
                        Style::default().bg(theme.surface0).fg(theme.lavender)
                    } else {
                        Style::default().fg(theme.subtext0)
                    };
                    out.push(Line::from(vec![
                        Span::raw("      "),
                        Span::styled(option.option_value.clone(), style),
                    ]));
                }
            }
        }

        QuestionKind::Radio | QuestionKind::Checkbox | QuestionKind::MultipleSelect => {
            if question.options.is_empty() {
                out.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled("(no options)".to_string(), theme.muted_style()),
                ]));
            }
            let is_multi = question.question_type.is_multi();
            for (j, option) in question.options.iter().enumerate() {
                let picked = values
                    .get(qid)
                    .map(|v| v.has_selected(&option.option_value))
                    .unwrap_or(false);
                let mark = match (is_multi, picked) {
                    (true, true) => "[x] ",
                    (true, false) => "[ ] ",
                    (false, true) => "(•) ",
                    (false, false) => "( ) ",
                };
                let on_option = focused && editable && j == choice_state.cursor();
                let style = if on_option {
                    Style::default()
                        .fg(theme.lavender)
                        .add_modifier(Modifier::UNDERLINED)
                } else if picked {
                    Style::default().fg(theme.green)
                } else {
                    Style::default().fg(theme.subtext0)
                };
                out.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(format!("{}{}", mark, option.option_value), style),
                ]));
            }
        }

        QuestionKind::File => {
            let mut spans = vec![Span::raw("    ")];
            if focused && editable {
                if let Some(buf) = file_input {
                    spans.extend(entry_spans(buf, text_state, entry_width, theme));
                    out.push(Line::from(spans));
                    out.push(Line::from(vec![
                        Span::raw("    "),
                        Span::styled(
                            "Enter attaches the path, Esc cancels".to_string(),
                            theme.muted_style(),
                        ),
                    ]));
                    return out;
                }
            }
            if current.is_empty() {
                spans.push(Span::styled("no file attached".to_string(), theme.muted_style()));
            } else {
                spans.push(Span::styled(current, Style::default().fg(theme.teal)));
            }
            out.push(Line::from(spans));
        }
    }

    out
}

fn hint_text(question: &SurveyQuestion) -> String {
    match &question.placeholder {
        Some(placeholder) if !placeholder.is_empty() => placeholder.clone(),
        _ => "not answered".to_string(),
    }
}

/// A focused single-line input with a visible cursor, windowed to `width`.
fn entry_spans(
    text: &str,
    text_state: &mut TextInputState,
    width: usize,
    theme: &Theme,
) -> Vec<Span<'static>> {
    text_state.update_scroll(width, text);
    let chars: Vec<char> = text.chars().collect();
    let offset = text_state.scroll_offset().min(chars.len());
    let cursor = text_state.cursor_pos().min(chars.len()).max(offset);
    let end = (offset + width).min(chars.len());

    let before: String = chars[offset..cursor.min(end)].iter().collect();
    let at_cursor: String = if cursor < end {
        chars[cursor].to_string()
    } else {
        " ".to_string()
    };
    let after: String = if cursor + 1 <= end {
        chars[(cursor + 1).min(chars.len())..end].iter().collect()
    } else {
        String::new()
    };

    vec![
        Span::styled(before, Style::default().fg(theme.text)),
        Span::styled(at_cursor, theme.cursor_style()),
        Span::styled(after, Style::default().fg(theme.text)),
    ]
}
