use crate::state::{AppState, EXAMPLE_PROMPTS};
use ratatui::layout::{Constraint, Direction, Layout, Position};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Render the project description form
pub fn render_with_area(frame: &mut Frame, state: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Description input
            Constraint::Length(3), // Style selector
            Constraint::Length(2 + EXAMPLE_PROMPTS.len() as u16), // Examples
        ])
        .split(area);

    render_description(frame, state, chunks[0]);
    render_style(frame, state, chunks[1]);
    render_examples(frame, chunks[2]);
}

fn render_description(frame: &mut Frame, state: &AppState, area: Rect) {
    let border_color = if state.input_error.is_some() {
        Color::Red
    } else {
        Color::Yellow
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Describe your project (Enter to generate) ")
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Reserve the last row for validation errors
    let text_height = inner.height.saturating_sub(1);
    let text_area = Rect::new(inner.x, inner.y, inner.width, text_height);
    let error_area = Rect::new(inner.x, inner.y + text_height, inner.width, inner.height - text_height);

    let buffer = state.input_buffer();
    let (cursor_x, cursor_y) = buffer.cursor_coords(text_area.width);
    let scroll = cursor_y.saturating_sub(text_area.height.saturating_sub(1));

    if buffer.is_empty() {
        let hint = Paragraph::new(Span::styled(
            "e.g. A marketplace connecting local farmers with restaurants...",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(hint, text_area);
    } else {
        let lines: Vec<Line> = buffer
            .display_lines(text_area.width)
            .into_iter()
            .map(Line::from)
            .collect();
        frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), text_area);
    }

    if let Some(error) = &state.input_error {
        let error = Paragraph::new(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(error, error_area);
    }

    if text_area.width > 0 && text_area.height > 0 {
        let x = text_area.x + cursor_x.min(text_area.width - 1);
        let y = text_area.y + (cursor_y - scroll).min(text_area.height - 1);
        frame.set_cursor_position(Position::new(x, y));
    }
}

fn render_style(frame: &mut Frame, state: &AppState, area: Rect) {
    let style_line = Line::from(vec![
        Span::styled("Style: ", Style::default().fg(Color::Gray)),
        Span::styled(
            state.style_label(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  (Tab / Shift+Tab to change)", Style::default().fg(Color::DarkGray)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Architecture style ")
        .border_style(Style::default().fg(Color::Gray));
    frame.render_widget(Paragraph::new(style_line).block(block), area);
}

fn render_examples(frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = EXAMPLE_PROMPTS
        .iter()
        .map(|example| {
            Line::from(vec![
                Span::styled("• ", Style::default().fg(Color::DarkGray)),
                Span::raw(*example),
            ])
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Need inspiration? Ctrl+E inserts an example ")
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
