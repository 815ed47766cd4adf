/* src/ui.rs */

use crate::app::{App, MenuRow, SPINNER_FRAMES, Screen};
use crate::settings::{DialogKind, FIELDS, SettingsApp, SettingsRow};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

const MAX_VISIBLE_FILES: usize = 6;
const MESSAGE_DISPLAY_LIMIT: usize = 65;

pub fn render_commit(frame: &mut Frame, app: &App) {
    match app.screen {
        Screen::Success => render_success(frame, app),
        Screen::Error => render_error(frame, app),
        _ => render_main(frame, app),
    }
}

fn render_main(frame: &mut Frame, app: &App) {
    let staged_height = if app.staged_files.is_empty() {
        3
    } else {
        let shown = app.staged_files.len().min(MAX_VISIBLE_FILES);
        let more_row = usize::from(app.staged_files.len() > MAX_VISIBLE_FILES);
        (shown + more_row + 2) as u16
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(staged_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_staged_files(frame, app, chunks[1]);

    match app.screen {
        Screen::CustomInput => render_custom_input(frame, app, chunks[2]),
        _ => render_suggestions(frame, app, chunks[2]),
    }

    if app.screen != Screen::CustomInput {
        render_footer(frame, chunks[3]);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Line::from(vec![
        Span::styled(
            "Better-Commit",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" • AI-Powered Commit Suggestions", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn render_staged_files(frame: &mut Frame, app: &App, area: Rect) {
    if app.staged_files.is_empty() {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red));
        let paragraph = Paragraph::new(Span::styled(
            "No staged files found",
            Style::default().fg(Color::Red),
        ))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let mut lines: Vec<Line> = app
        .staged_files
        .iter()
        .take(MAX_VISIBLE_FILES)
        .map(|file| {
            let bullet = if file.is_staged {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(vec![
                Span::styled(" • ", bullet),
                Span::raw(file.path.clone()),
            ])
        })
        .collect();

    if app.staged_files.len() > MAX_VISIBLE_FILES {
        lines.push(Line::from(Span::styled(
            format!("   +{} more files", app.staged_files.len() - MAX_VISIBLE_FILES),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!("Staged Files ({})", app.staged_files.len()));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_suggestions(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title("Commit Messages");

    if app.screen == Screen::Loading {
        let spinner = Line::from(Span::styled(
            format!(
                "{} Generating commit suggestions...",
                SPINNER_FRAMES[app.spinner_frame]
            ),
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(Paragraph::new(spinner).block(block), area);
        return;
    }

    if app.suggestions.is_empty() {
        let paragraph = Paragraph::new(Span::styled(
            "No suggestions available",
            Style::default().fg(Color::Red),
        ))
        .block(block.border_style(Style::default().fg(Color::Red)));
        frame.render_widget(paragraph, area);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (i, row) in app.visible_rows().into_iter().enumerate() {
        let is_selected = i == app.selected;
        let marker = if is_selected { "❯ " } else { "  " };

        // Blank spacer before the action rows.
        if row == MenuRow::TryAgain {
            lines.push(Line::from(""));
        }

        match row {
            MenuRow::Suggestion(index) => {
                let suggestion = &app.suggestions[index];
                let style = if is_selected {
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                lines.push(Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Green)),
                    Span::styled(display_message(&suggestion.message), style),
                ]));
                if is_selected {
                    lines.push(Line::from(Span::styled(
                        format!(
                            "    [{}] {}",
                            suggestion.kind,
                            display_message(&suggestion.description)
                        ),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
            }
            MenuRow::TryAgain => {
                lines.push(action_row(marker, "↻ Try again", Color::Blue, is_selected))
            }
            MenuRow::CustomInput => {
                lines.push(action_row(marker, "✎ Custom input", Color::Yellow, is_selected))
            }
        }
    }

    if app.is_using_fallback() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "⚠ Groq API unavailable - showing static fallback suggestions.",
            Style::default().fg(Color::Yellow),
        )));
        lines.push(Line::from(Span::styled(
            "  Run \"better-commit config\" to set your API key.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn action_row(marker: &str, label: &str, color: Color, is_selected: bool) -> Line<'static> {
    let style = if is_selected {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::from(vec![
        Span::styled(marker.to_string(), Style::default().fg(Color::Green)),
        Span::styled(label.to_string(), style),
    ])
}

fn display_message(message: &str) -> String {
    if message.chars().count() > MESSAGE_DISPLAY_LIMIT {
        let truncated: String = message.chars().take(MESSAGE_DISPLAY_LIMIT - 3).collect();
        format!("{truncated}...")
    } else {
        message.to_string()
    }
}

fn render_custom_input(frame: &mut Frame, app: &App, area: Rect) {
    let input_line = if app.input.is_empty() {
        Line::from(Span::styled(
            "type your commit message...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(Span::raw(app.input.clone()))
    };

    let lines = vec![
        input_line,
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::styled(" submit  ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::styled(" cancel", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Magenta))
        .title("Custom Message");
    frame.render_widget(Paragraph::new(lines).block(block), area);

    frame.set_cursor_position((area.x + 1 + app.input_cursor as u16, area.y + 1));
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Line::from(vec![
        Span::styled("↑↓", Style::default().fg(Color::Blue)),
        Span::styled(" navigate  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Enter", Style::default().fg(Color::Green)),
        Span::styled(" select  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Red)),
        Span::styled(" exit", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(footer), area);
}

fn render_success(frame: &mut Frame, app: &App) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::raw(format!("\"{}\"", app.success_message))).centered(),
        Line::from(""),
        Line::from(Span::styled(
            "Changes have been committed successfully!",
            Style::default().fg(Color::Green),
        ))
        .centered(),
    ];

    if !app.push_logs.is_empty() {
        lines.push(Line::from(""));
        let title = if app.push_pending { "Pushing..." } else { "Push Logs:" };
        lines.push(
            Line::from(Span::styled(
                title,
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ))
            .centered(),
        );
        for log in &app.push_logs {
            let color = if log.contains("Failed") || log.contains("failed") {
                Color::Red
            } else {
                Color::DarkGray
            };
            lines.push(Line::from(Span::styled(log.clone(), Style::default().fg(color))).centered());
        }
    }

    let height = (lines.len() + 2) as u16;
    let area = centered_box(60, height, frame.area());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Green))
        .title("Commit Successful");
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_error(frame: &mut Frame, app: &App) {
    let text = Text::from(vec![
        Line::from(Span::styled(
            "Error",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::raw(app.error.clone().unwrap_or_default())),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    frame.render_widget(Paragraph::new(text).block(block), frame.area());
}

pub fn render_settings(frame: &mut Frame, app: &SettingsApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    let header = Line::from(vec![
        Span::styled(
            "Better-Commit",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" • Configuration", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(header), chunks[0]);

    render_settings_menu(frame, app, chunks[1]);

    let footer = Line::from(vec![
        Span::styled("Use ", Style::default().fg(Color::DarkGray)),
        Span::styled("↑↓", Style::default().fg(Color::Blue)),
        Span::styled(" to navigate, ", Style::default().fg(Color::DarkGray)),
        Span::styled("Enter", Style::default().fg(Color::Green)),
        Span::styled(" to edit/select", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(footer), chunks[2]);

    if app.dialog.is_some() {
        render_settings_dialog(frame, app);
    }
}

fn render_settings_menu(frame: &mut Frame, app: &SettingsApp, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    for (i, row) in app.rows().into_iter().enumerate() {
        let is_selected = i == app.selected && app.dialog.is_none();
        let marker = if is_selected { "› " } else { "  " };

        let line = match row {
            SettingsRow::Field(field) => {
                let label_style = if is_selected {
                    Style::default().fg(Color::Black).bg(Color::Blue)
                } else {
                    Style::default()
                };
                Line::from(vec![
                    Span::styled(
                        format!("{marker}{:<16}", field.label()),
                        label_style.add_modifier(if is_selected {
                            Modifier::BOLD
                        } else {
                            Modifier::empty()
                        }),
                    ),
                    Span::raw("  "),
                    Span::styled(app.display_value(field), Style::default().fg(Color::Gray)),
                ])
            }
            SettingsRow::Save => {
                let style = if is_selected {
                    Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Green)
                };
                Line::from(Span::styled(format!("{marker}Save & Exit"), style))
            }
            SettingsRow::Cancel => {
                let style = if is_selected {
                    Style::default().fg(Color::Black).bg(Color::Red).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Red)
                };
                Line::from(Span::styled(format!("{marker}Cancel"), style))
            }
        };

        // Blank spacer between the fields and the action rows.
        if row == SettingsRow::Save {
            lines.push(Line::from(""));
        }
        lines.push(line);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title("Settings");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_settings_dialog(frame: &mut Frame, app: &SettingsApp) {
    let Some(dialog) = &app.dialog else {
        return;
    };

    let area = centered_rect(70, 50, frame.area());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Magenta))
        .title(dialog.title.clone());

    let mut lines: Vec<Line> = Vec::new();
    match dialog.kind {
        DialogKind::Select => {
            for (i, option) in dialog.options.iter().enumerate() {
                let is_selected = i == dialog.selected;
                let marker = if is_selected { "› " } else { "  " };
                let style = if is_selected {
                    Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default()
                };
                lines.push(Line::from(Span::styled(format!("{marker}{option}"), style)));
            }
            lines.push(Line::from(""));
            lines.push(hint_line(&[("↑↓", "Navigate"), ("Enter", "Confirm"), ("Esc", "Cancel")]));
        }
        DialogKind::Password => {
            let masked = "•".repeat(dialog.buffer.chars().count());
            lines.push(Line::from(Span::raw(masked)));
            lines.push(Line::from(""));
            lines.push(hint_line(&[("←→", "Move"), ("Enter", "Confirm"), ("Esc", "Cancel")]));
            frame.render_widget(Clear, area);
            frame.render_widget(Paragraph::new(lines).block(block), area);
            frame.set_cursor_position((area.x + 1 + dialog.cursor as u16, area.y + 1));
            return;
        }
        DialogKind::Textarea => {
            for text_line in dialog.buffer.split('\n') {
                lines.push(Line::from(Span::raw(text_line.to_string())));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Enter for new line • Tab to submit",
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(hint_line(&[("←→", "Move"), ("Tab", "Submit"), ("Esc", "Cancel")]));

            let (row, col) = cursor_line_col(&dialog.buffer, dialog.cursor);
            frame.render_widget(Clear, area);
            frame.render_widget(Paragraph::new(lines).block(block), area);
            frame.set_cursor_position((area.x + 1 + col as u16, area.y + 1 + row as u16));
            return;
        }
    }

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn hint_line(hints: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled((*key).to_string(), Style::default().fg(Color::Blue)));
        spans.push(Span::styled(format!(" {action}"), Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}

/// Row and column of a char-indexed cursor within a multi-line buffer.
fn cursor_line_col(buffer: &str, cursor: usize) -> (usize, usize) {
    let mut row = 0;
    let mut col = 0;
    for c in buffer.chars().take(cursor) {
        if c == '\n' {
            row += 1;
            col = 0;
        } else {
            col += 1;
        }
    }
    (row, col)
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn centered_box(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + r.width.saturating_sub(width) / 2;
    let y = r.y + r.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(r.width),
        height: height.min(r.height),
    }
}
