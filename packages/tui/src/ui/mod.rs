pub mod feedback;
pub mod input_form;
pub mod plan_view;
pub mod widgets;

use crate::state::AppState;
use archiai_plan::RequestState;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use widgets::StatusBarWidget;

/// Main UI rendering function
pub fn render(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(3),    // Main content area (flexible)
            Constraint::Length(1), // Status bar (fixed height)
        ])
        .split(frame.area());

    render_title(frame, state, chunks[0]);

    let main_area = chunks[1];
    match state.request_state() {
        RequestState::Idle => input_form::render_with_area(frame, state, main_area),
        RequestState::Loading { .. } => feedback::render_loading(frame, state, main_area),
        RequestState::Failed { message } => feedback::render_failed(frame, message, main_area),
        RequestState::Success(plan) => plan_view::render_with_area(frame, state, plan, main_area),
    }

    frame.render_widget(StatusBarWidget::new(state), chunks[2]);
}

fn render_title(frame: &mut Frame, state: &AppState, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            " ArchiAI ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " Architecture & PRD planner",
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!("  [{}]", state.model),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::state::AppState;
    use ratatui::{backend::TestBackend, Terminal};

    /// Render the whole UI into an in-memory terminal and return its text, one row per line
    pub fn render_to_string(state: &AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| super::render(frame, state)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for row in buffer.content.chunks(usize::from(buffer.area.width)) {
            for cell in row {
                out.push_str(cell.symbol());
            }
            out.push('\n');
        }
        out
    }
}
