use crate::state::AppState;
use archiai_plan::RequestState;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

/// Status bar widget that displays context-aware information
pub struct StatusBarWidget<'a> {
    state: &'a AppState,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Get the current mode indicator text and style
    fn get_mode_info(&self) -> (&'static str, Style) {
        match self.state.request_state() {
            RequestState::Idle => ("INPUT", Style::default().fg(Color::White)),
            RequestState::Loading { .. } => (
                "WORKING",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            RequestState::Success(_) => (
                "PLAN",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            RequestState::Failed { .. } => (
                "ERROR",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
        }
    }

    /// Get navigation breadcrumb text
    fn get_navigation_breadcrumb(&self) -> String {
        match self.state.request_state() {
            RequestState::Idle => format!(" New Project • {}", self.state.style_label()),
            RequestState::Loading { ticket } => format!(" Generating (request #{})", ticket),
            RequestState::Success(plan) => {
                format!(" {} › {}", plan.project_name, self.state.current_tab)
            }
            RequestState::Failed { .. } => " Generation failed".to_string(),
        }
    }

    /// Get context-aware keyboard shortcuts
    fn get_shortcuts(&self) -> &'static str {
        match self.state.request_state() {
            RequestState::Idle => "Enter: Generate • Tab: Style • Ctrl+E: Example • Esc: Clear/Quit",
            RequestState::Loading { .. } => "Esc: Cancel • Ctrl+C: Quit",
            RequestState::Success(_) => {
                "Tab/1-8: Sections • ↑↓: Scroll • m/t/p: Export • n: New • q: Quit"
            }
            RequestState::Failed { .. } => "r: Try again • n: New • q: Quit",
        }
    }
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (mode_text, mode_style) = self.get_mode_info();
        let shortcuts = self.get_shortcuts();

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(mode_text.len() as u16 + 2), // Mode indicator
                Constraint::Min(20),                            // Breadcrumb and status (flexible)
                Constraint::Length(shortcuts.width() as u16),   // Shortcuts (right-aligned)
            ])
            .split(area);

        Paragraph::new(format!(" {} ", mode_text))
            .style(mode_style)
            .block(Block::default())
            .render(chunks[0], buf);

        let mut middle_content = self.get_navigation_breadcrumb();
        if let Some(status) = &self.state.status_message {
            middle_content = format!("{} • {}", middle_content, status);
        }

        Paragraph::new(middle_content)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default())
            .render(chunks[1], buf);

        Paragraph::new(shortcuts)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default())
            .render(chunks[2], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    fn render_line(state: &AppState) -> String {
        let area = Rect::new(0, 0, 160, 1);
        let mut buf = Buffer::empty(area);
        StatusBarWidget::new(state).render(area, &mut buf);
        buf.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_idle_status_shows_style_and_shortcuts() {
        let state = AppState::new("gemini-2.5-flash");
        let line = render_line(&state);
        assert!(line.contains("INPUT"));
        assert!(line.contains("New Project"));
        assert!(line.contains("Enter: Generate"));
    }

    #[test]
    fn test_status_message_is_appended() {
        let mut state = AppState::new("gemini-2.5-flash");
        state.session.begin("A chat app");
        state.set_status("Saved architecture-plan.md (10 bytes)");
        let line = render_line(&state);
        assert!(line.contains("WORKING"));
        assert!(line.contains("Saved architecture-plan.md"));
    }
}
