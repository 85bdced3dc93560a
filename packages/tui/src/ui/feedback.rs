use crate::state::AppState;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Centered box of `height` rows inside `area`
fn centered(area: Rect, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height.min(area.height)),
            Constraint::Fill(1),
        ])
        .split(area);
    vertical[1]
}

pub fn render_loading(frame: &mut Frame, state: &AppState, area: Rect) {
    let description = state.session.last_description().unwrap_or_default();
    let lines = vec![
        Line::from(Span::styled(
            format!("{} Designing your architecture...", state.spinner()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            description.to_string(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "This usually takes 20-60 seconds. Press Esc to cancel.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Generating ")
        .border_style(Style::default().fg(Color::Cyan));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, centered(area, 9));
}

pub fn render_failed(frame: &mut Frame, message: &str, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "r: Try again • n: New project • q: Quit",
            Style::default().fg(Color::Gray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Something went wrong ")
        .border_style(Style::default().fg(Color::Red));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, centered(area, 7));
}

#[cfg(test)]
mod tests {
    use crate::state::AppState;
    use crate::ui::test_support::render_to_string;
    use archiai_plan::PlanError;

    #[test]
    fn test_loading_view_shows_description() {
        let mut state = AppState::new("gemini-2.5-flash");
        state.session.begin("A real-time chat app");
        let screen = render_to_string(&state, 100, 24);

        assert!(screen.contains("Designing your architecture"));
        assert!(screen.contains("A real-time chat app"));
    }

    #[test]
    fn test_failed_view_shows_user_message() {
        let mut state = AppState::new("gemini-2.5-flash");
        let ticket = state.session.begin("A real-time chat app");
        state
            .session
            .complete(ticket, Err(PlanError::SafetyBlocked("SAFETY".into())));
        let screen = render_to_string(&state, 140, 24);

        assert!(screen.contains("The request was blocked due to safety settings."));
        assert!(screen.contains("r: Try again"));
    }
}
