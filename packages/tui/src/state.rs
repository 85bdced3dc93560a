use archiai_plan::{ArchitecturePlan, PlanError, PlanSession, RequestState};
use archiai_prompts::ArchitectureStyle;
use std::sync::Arc;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::input::InputBuffer;

/// Example descriptions offered on the input form (Ctrl+E cycles through them)
pub const EXAMPLE_PROMPTS: [&str; 3] = [
    "A social media app for pet owners to share photos and schedule playdates.",
    "An e-commerce site for sustainable, handmade clothing with a recommendation engine.",
    "A real-time language translation app that works offline for travelers.",
];

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Sections of a generated plan, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Tab {
    #[strum(to_string = "Overview")]
    Overview,
    #[strum(to_string = "Diagram")]
    Diagram,
    #[strum(to_string = "Tech Stack")]
    TechStack,
    #[strum(to_string = "Pros & Cons")]
    ProsCons,
    #[strum(to_string = "Considerations")]
    Considerations,
    #[strum(to_string = "Roadmap")]
    Roadmap,
    #[strum(to_string = "Cost")]
    Cost,
    #[strum(to_string = "PRD")]
    Prd,
}

impl Tab {
    pub fn all() -> Vec<Tab> {
        Tab::iter().collect()
    }

    pub fn index(self) -> usize {
        Tab::iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Tab> {
        Tab::iter().nth(index)
    }

    pub fn next(self) -> Tab {
        let tabs = Tab::all();
        tabs[(self.index() + 1) % tabs.len()]
    }

    pub fn previous(self) -> Tab {
        let tabs = Tab::all();
        tabs[(self.index() + tabs.len() - 1) % tabs.len()]
    }
}

/// Application state management
#[derive(Debug)]
pub struct AppState {
    pub session: PlanSession,
    pub input_buffer: InputBuffer,
    /// `None` lets the model pick the style
    pub style: Option<ArchitectureStyle>,
    pub current_tab: Tab,
    pub scroll_offset: u16,
    /// Transient feedback shown in the status bar (exports, cancellation)
    pub status_message: Option<String>,
    /// Validation error shown under the input form
    pub input_error: Option<String>,
    pub model: String,
    example_index: usize,
    spinner_frame: usize,
}

impl AppState {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            session: PlanSession::new(),
            input_buffer: InputBuffer::new(),
            style: None,
            current_tab: Tab::Overview,
            scroll_offset: 0,
            status_message: None,
            input_error: None,
            model: model.into(),
            example_index: 0,
            spinner_frame: 0,
        }
    }

    pub fn request_state(&self) -> &RequestState {
        self.session.state()
    }

    pub fn plan(&self) -> Option<&Arc<ArchitecturePlan>> {
        self.session.plan()
    }

    pub fn input_buffer(&self) -> &InputBuffer {
        &self.input_buffer
    }

    pub fn input_buffer_mut(&mut self) -> &mut InputBuffer {
        self.input_error = None;
        &mut self.input_buffer
    }

    /// Validate the current input. Returns the trimmed description when submittable.
    pub fn take_submission(&mut self) -> Option<String> {
        let description = self.input_buffer.content().trim().to_string();
        if description.is_empty() {
            self.input_error = Some(PlanError::EmptyDescription.user_message().to_string());
            return None;
        }
        self.input_error = None;
        self.status_message = None;
        Some(description)
    }

    /// Cycle Auto -> first style -> ... -> last style -> Auto
    pub fn cycle_style(&mut self, forward: bool) {
        let styles = ArchitectureStyle::all();
        let position = self
            .style
            .and_then(|current| styles.iter().position(|s| *s == current));

        self.style = match (position, forward) {
            (None, true) => styles.first().copied(),
            (None, false) => styles.last().copied(),
            (Some(i), true) => styles.get(i + 1).copied(),
            (Some(0), false) => None,
            (Some(i), false) => styles.get(i - 1).copied(),
        };
    }

    pub fn style_label(&self) -> String {
        self.style
            .map(|s| s.to_string())
            .unwrap_or_else(|| "Auto (let the architect decide)".to_string())
    }

    /// Replace the input with the next example description
    pub fn insert_next_example(&mut self) {
        let example = EXAMPLE_PROMPTS[self.example_index % EXAMPLE_PROMPTS.len()];
        self.example_index += 1;
        self.input_buffer_mut().set_content(example);
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if self.current_tab != tab {
            self.current_tab = tab;
            self.scroll_offset = 0;
        }
    }

    pub fn next_tab(&mut self) {
        self.select_tab(self.current_tab.next());
    }

    pub fn previous_tab(&mut self) {
        self.select_tab(self.current_tab.previous());
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    /// A fresh result always opens on the first tab
    pub fn show_new_result(&mut self) {
        self.current_tab = Tab::Overview;
        self.scroll_offset = 0;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn tick(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }

    /// Forget the result and description, keeping the chosen style
    pub fn start_new_project(&mut self) {
        self.session.reset();
        self.input_buffer.clear();
        self.input_error = None;
        self.status_message = None;
        self.show_new_result();
    }
}
