//! Editor views and rendering
//!
//! All rendering logic is contained here. The views module draws the UI
//! from the App's state, but never modifies state.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table, Wrap};
use tracing::trace;

use super::app::App;
use super::state::{
    AppState, ConfirmDialog, FORM_FIELDS, FormField, InteractionMode, StatusKind, TOP_LEVEL_VIEWS, View,
};

/// Colors
mod colors {
    use ratatui::style::Color;

    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const LABEL: Color = Color::Rgb(255, 215, 0); // Gold
    pub const SUCCESS: Color = Color::Rgb(50, 205, 50); // Lime green
    pub const ERROR: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const SELECTED_BG: Color = Color::Rgb(40, 40, 40);
    pub const ITEM_BG: Color = Color::Rgb(70, 70, 70);
    pub const DIM: Color = Color::DarkGray;
}

/// Draw the whole UI
pub fn render(app: &App, frame: &mut Frame) {
    let state = app.state();
    trace!(?state.current_view, "render: called");
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(state, frame, chunks[0]);

    match state.current_view {
        View::Editor => render_editor_view(app, frame, chunks[1]),
        View::Library => render_library_view(app, frame, chunks[1]),
        View::Preview => render_preview_view(app, frame, chunks[1]),
    }

    render_footer(state, frame, chunks[2]);

    // Overlays
    match &state.interaction_mode {
        InteractionMode::Help => render_help_overlay(frame, frame.area()),
        InteractionMode::Confirm(dialog) => render_confirm_dialog(dialog, frame, frame.area()),
        _ => {}
    }
}

/// Render header with view tabs and library size
fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_header: called");
    let mut left_spans = vec![
        Span::styled(
            " Promptcraft",
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
    ];

    for (i, view) in TOP_LEVEL_VIEWS.iter().enumerate() {
        if i > 0 {
            left_spans.push(Span::styled(" · ", Style::default().fg(colors::DIM)));
        }
        let style = if *view == state.current_view {
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors::DIM)
        };
        left_spans.push(Span::styled(view.display_name(), style));
    }

    let right_line = Line::from(Span::styled(
        format!("{} saved ", state.store.len()),
        Style::default().fg(colors::DIM),
    ));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(right_line.width() as u16)])
        .split(inner);

    frame.render_widget(Paragraph::new(Line::from(left_spans)), chunks[0]);
    frame.render_widget(Paragraph::new(right_line), chunks[1]);
}

/// Render the form, with the live preview beside it when enabled
fn render_editor_view(app: &App, frame: &mut Frame, area: Rect) {
    let state = app.state();
    trace!(show_preview = state.show_preview, "render_editor_view: called");

    let (form_area, preview_area) = if state.show_preview {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    render_form(state, frame, form_area);

    if let Some(preview_area) = preview_area {
        let text = app.preview_of(state.store.current());
        render_document(frame, preview_area, " Preview ", &text, 0);
    }
}

/// Render the seven form fields
fn render_form(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_form: called");
    let current = state.store.current();
    let selected_field = state.selected_form_field();
    let selected_item = state.selected_item();

    let mut lines: Vec<Line> = Vec::new();
    let mut selected_line = 0usize;

    for field in FORM_FIELDS.iter() {
        let is_selected = *field == selected_field;
        if is_selected {
            selected_line = lines.len();
        }

        let (marker, label_style) = if is_selected {
            (
                "▶ ",
                Style::default()
                    .fg(colors::LABEL)
                    .bg(colors::SELECTED_BG)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("  ", Style::default().fg(colors::LABEL))
        };
        lines.push(Line::from(vec![
            Span::styled(marker, label_style),
            Span::styled(field.label(), label_style),
        ]));

        match field {
            FormField::Text(text_field) => {
                let value = current.text(*text_field);
                if value.is_empty() {
                    lines.push(placeholder_line(field.placeholder()));
                } else {
                    for text_line in value.lines() {
                        lines.push(Line::from(format!("    {}", text_line)));
                    }
                }
            }
            FormField::List(list_field) => {
                let items = current.items(*list_field);
                if items.is_empty() {
                    lines.push(placeholder_line(field.placeholder()));
                }
                for (i, item) in items.iter().enumerate() {
                    let style = if selected_item == Some((*list_field, i)) {
                        Style::default().bg(colors::ITEM_BG)
                    } else {
                        Style::default()
                    };
                    let number = format!("{}. ", i + 1);
                    for (n, item_line) in item.split('\n').enumerate() {
                        let text = if n == 0 {
                            format!("    {}{}", number, item_line)
                        } else {
                            format!("    {:width$}{}", "", item_line, width = number.len())
                        };
                        lines.push(Line::from(Span::styled(text, style)));
                    }
                }
            }
        }
        lines.push(Line::from(""));
    }

    // Keep the selected field in view
    let visible = area.height.saturating_sub(2) as usize;
    let offset = selected_line.saturating_sub(visible / 2) as u16;

    let form = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Prompt ")
                .border_style(Style::default().fg(colors::HEADER)),
        )
        .scroll((offset, 0));

    frame.render_widget(form, area);
}

fn placeholder_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("    {}", text),
        Style::default().fg(colors::DIM).add_modifier(Modifier::ITALIC),
    ))
}

/// Render saved prompts with a preview of the selected one
fn render_library_view(app: &App, frame: &mut Frame, area: Rect) {
    let state = app.state();
    trace!(saved = state.store.len(), "render_library_view: called");

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_library_table(state, frame, chunks[0]);

    match state.selected_prompt() {
        Some((_, prompt)) => {
            let title = format!(" {} ", prompt.name);
            render_document(frame, chunks[1], &title, &app.preview_of(prompt), 0);
        }
        None => {
            let block = Block::default()
                .borders(Borders::ALL)
                .title(" Preview ")
                .border_style(Style::default().fg(colors::DIM));
            frame.render_widget(block, chunks[1]);
        }
    }
}

/// Render the saved prompt summary table
fn render_library_table(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_library_table: called");
    let summaries = state.store.summaries(state.role_preview_width);
    let selected_idx = state.library_selection.selected_index;

    let rows: Vec<Row> = summaries
        .iter()
        .enumerate()
        .map(|(i, summary)| {
            let row_style = if i == selected_idx {
                Style::default().bg(colors::SELECTED_BG)
            } else {
                Style::default()
            };

            Row::new(vec![
                summary.name.clone(),
                summary.role.clone(),
                summary.created_at.clone(),
                summary.instruction_count.to_string(),
                summary.constraint_count.to_string(),
                summary.verification_count.to_string(),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Min(20),    // NAME
        Constraint::Min(20),    // ROLE
        Constraint::Length(19), // CREATED
        Constraint::Length(6),  // INSTR
        Constraint::Length(6),  // CONSTR
        Constraint::Length(6),  // VERIF
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["NAME", "ROLE", "CREATED", "INSTR", "CONSTR", "VERIF"])
                .style(Style::default().add_modifier(Modifier::BOLD).fg(colors::HEADER)),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Saved Prompts ({}) ", summaries.len()))
                .border_style(Style::default().fg(colors::HEADER)),
        );

    frame.render_widget(table, area);

    if summaries.is_empty() {
        render_empty_message(
            frame,
            area,
            "No saved prompts yet. Create and save a prompt to see it here.",
        );
    }
}

/// Render the full-screen preview
fn render_preview_view(app: &App, frame: &mut Frame, area: Rect) {
    let state = app.state();
    trace!(?state.preview_target, scroll = state.preview_scroll, "render_preview_view: called");

    let title = match state.preview_target.and_then(|i| state.store.get(i)) {
        Some(prompt) => format!(" {} ", prompt.name),
        None => " Current Prompt ".to_string(),
    };
    render_document(frame, area, &title, &app.preview_text(), state.preview_scroll);
}

/// Render an exported document in a bordered box
fn render_document(frame: &mut Frame, area: Rect, title: &str, text: &str, scroll: u16) {
    trace!(%title, len = text.len(), "render_document: called");
    let doc = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(colors::HEADER)),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(doc, area);
}

/// Render footer with input line, status or keybinds
fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!(?state.interaction_mode, "render_footer: called");
    let content = match &state.interaction_mode {
        InteractionMode::Editing { target, buffer } => {
            // Only the last line of a multi-line buffer fits
            let tail = buffer.rsplit('\n').next().unwrap_or_default();
            let mut spans = vec![Span::styled(
                format!("{}: ", target.prompt_label()),
                Style::default().fg(colors::KEYBIND).add_modifier(Modifier::BOLD),
            )];
            if buffer.contains('\n') {
                spans.push(Span::styled("… ", Style::default().fg(colors::DIM)));
            }
            spans.push(Span::raw(tail));
            spans.push(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
            spans.push(Span::styled(
                "  (Enter to accept, Alt+Enter newline, Esc to cancel)",
                Style::default().fg(colors::DIM),
            ));
            Line::from(spans)
        }
        _ => {
            if let Some(status) = &state.status {
                let color = match status.kind {
                    StatusKind::Info => colors::SUCCESS,
                    StatusKind::Error => colors::ERROR,
                };
                Line::from(Span::styled(format!(" {}", status.text), Style::default().fg(color)))
            } else {
                let keybinds = match state.current_view {
                    View::Editor => {
                        let mut keys = vec![("[Enter]", "Edit"), ("[s]", "Save")];
                        if state.selected_list_field().is_some() {
                            keys.extend([("[ ]", "Item"), ("[e]", "Edit Item"), ("[x]", "Remove")]);
                        }
                        keys.extend([("[p]", "Preview"), ("[y]", "Copy"), ("[n]", "New")]);
                        keys
                    }
                    View::Library => vec![
                        ("[Enter]", "Preview"),
                        ("[l]", "Load"),
                        ("[y]", "Copy"),
                        ("[D]", "Delete"),
                    ],
                    View::Preview => {
                        let mut keys = vec![("[↑↓]", "Scroll"), ("[y]", "Copy")];
                        if state.preview_target.is_some() {
                            keys.push(("[Esc]", "Back"));
                        }
                        keys
                    }
                };

                let mut left_spans = vec![Span::raw(" ")];
                for (key, action) in keybinds {
                    left_spans.push(Span::styled(
                        key,
                        Style::default().fg(colors::KEYBIND).add_modifier(Modifier::BOLD),
                    ));
                    left_spans.push(Span::raw(format!(" {} ", action)));
                }

                let right_line = Line::from(vec![
                    Span::styled(
                        "[Tab]",
                        Style::default().fg(colors::KEYBIND).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" Views "),
                    Span::styled("[?]", Style::default().fg(colors::KEYBIND).add_modifier(Modifier::BOLD)),
                    Span::raw(" Help "),
                    Span::styled("[q]", Style::default().fg(colors::KEYBIND).add_modifier(Modifier::BOLD)),
                    Span::raw(" Quit "),
                ]);

                let footer_block = Block::default().borders(Borders::ALL);
                let inner = footer_block.inner(area);
                frame.render_widget(footer_block, area);

                let chunks = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Min(0), Constraint::Length(right_line.width() as u16)])
                    .split(inner);

                frame.render_widget(Paragraph::new(Line::from(left_spans)), chunks[0]);
                frame.render_widget(Paragraph::new(right_line), chunks[1]);
                return;
            }
        }
    };

    let footer = Paragraph::new(content).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    trace!("render_help_overlay: called");
    let popup_area = centered_rect(60, 80, area);
    frame.render_widget(Clear, popup_area);

    let section = |title: &'static str| {
        Line::from(vec![Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                .fg(colors::HEADER),
        )]),
        Line::from(""),
        section("Global"),
        key_line("Tab/←→", "Switch view (Editor → Library → Preview)"),
        key_line("?", "Toggle help"),
        key_line("q", "Quit"),
        Line::from(""),
        section("Editor"),
        key_line("j/↓ k/↑", "Select field"),
        key_line("Enter", "Edit field / add list item"),
        key_line("[ ]", "Select list item"),
        key_line("e", "Edit selected item"),
        key_line("x", "Remove selected item"),
        key_line("s", "Save prompt to library"),
        key_line("p", "Toggle live preview"),
        key_line("y", "Copy prompt to clipboard"),
        key_line("n", "Start a new prompt"),
        Line::from(""),
        section("While typing"),
        key_line("Enter", "Accept"),
        key_line("Alt+Enter", "Insert newline"),
        key_line("Ctrl+U", "Clear input"),
        key_line("Esc", "Cancel"),
        Line::from(""),
        section("Library"),
        key_line("Enter", "Preview selected"),
        key_line("l", "Load into editor"),
        key_line("y", "Copy to clipboard"),
        key_line("D", "Delete selected"),
        Line::from(""),
        section("Preview"),
        key_line("↑↓ PgUp/PgDn", "Scroll"),
        key_line("Esc", "Back to library"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help (? to close) ")
                .style(Style::default().bg(Color::Black)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(help, popup_area);
}

/// Helper to create a key binding line
fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{:<14}", key), Style::default().fg(colors::KEYBIND)),
        Span::raw(desc),
    ])
}

/// Render confirmation dialog
fn render_confirm_dialog(dialog: &ConfirmDialog, frame: &mut Frame, area: Rect) {
    trace!("render_confirm_dialog: called");
    let popup_area = centered_rect(50, 20, area);
    frame.render_widget(Clear, popup_area);

    let yes_style = if dialog.selected_button {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };

    let no_style = if !dialog.selected_button {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Red)
    };

    let content = vec![
        Line::from(""),
        Line::from(dialog.message.as_str()),
        Line::from(""),
        Line::from(vec![
            Span::raw("       "),
            Span::styled(" No ", no_style),
            Span::raw("    "),
            Span::styled(" Yes ", yes_style),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Tab/←→: switch  Enter: confirm  Esc: cancel",
            Style::default().fg(Color::DarkGray),
        )]),
    ];

    let dialog_widget = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Confirm ")
                .style(Style::default().bg(Color::Black)),
        )
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);

    frame.render_widget(dialog_widget, popup_area);
}

/// Render empty state message
fn render_empty_message(frame: &mut Frame, area: Rect, message: &str) {
    trace!(%message, "render_empty_message: called");
    let inner = area.inner(Margin {
        horizontal: 2,
        vertical: 2,
    });

    let empty = Paragraph::new(message)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);

    frame.render_widget(empty, inner);
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_editor_shows_all_fields() {
        let app = App::default();
        let screen = draw(&app);
        for field in FORM_FIELDS.iter() {
            assert!(screen.contains(field.label()), "missing {}", field.label());
        }
    }

    #[test]
    fn test_multiline_item_continues_under_its_number() {
        let mut app = App::default();
        let store = &mut app.state_mut().store;
        store.add_list_item(promptstore::ListField::Instructions, "Summarize\nthen rank");
        store.add_list_item(promptstore::ListField::Instructions, "Cite");

        let screen = draw(&app);
        let rows: Vec<&str> = screen.lines().collect();
        let first = rows.iter().position(|row| row.contains("    1. Summarize")).unwrap();
        assert!(rows[first + 1].contains("       then rank"), "row: {}", rows[first + 1]);
        assert!(rows[first + 2].contains("    2. Cite"), "row: {}", rows[first + 2]);
    }

    #[test]
    fn test_empty_library_message() {
        let mut app = App::default();
        app.state_mut().switch_view(View::Library);
        let screen = draw(&app);
        assert!(screen.contains("No saved prompts yet."));
        assert!(screen.contains("0 saved"));
    }

    #[test]
    fn test_library_lists_saved_prompt() {
        let mut app = App::default();
        let store = &mut app.state_mut().store;
        store.current_mut().name = "Weekly report".to_string();
        store.save().unwrap();
        app.state_mut().switch_view(View::Library);

        let screen = draw(&app);
        assert!(screen.contains("Weekly report"));
        assert!(screen.contains("1 saved"));
    }

    #[test]
    fn test_preview_shows_layout() {
        let mut app = App::default();
        app.state_mut().switch_view(View::Preview);
        let screen = draw(&app);
        assert!(screen.contains("<Output Format>"));
        assert!(screen.contains("Current Prompt"));
    }

    #[test]
    fn test_help_overlay_draws() {
        let mut app = App::default();
        app.state_mut().interaction_mode = InteractionMode::Help;
        let screen = draw(&app);
        assert!(screen.contains("Keyboard Shortcuts"));
    }
}
