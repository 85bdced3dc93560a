use crate::events::{AppEvent, EventHandler};
use crate::state::{AppState, Tab};
use crate::ui;
use anyhow::Result;
use archiai_ai::GenerationClient;
use archiai_plan::{export_plan, generate_plan, ArchitecturePlan, ExportFormat, RequestState, Ticket};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::Backend, Terminal};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Result of a background generation task, tagged with its request ticket
#[derive(Debug)]
pub struct GenerationOutcome {
    pub ticket: Ticket,
    pub result: archiai_plan::Result<ArchitecturePlan>,
}

/// Main TUI application struct
pub struct App {
    pub state: AppState,
    pub should_quit: bool,
    client: Arc<dyn GenerationClient>,
    export_dir: PathBuf,
    in_flight: Option<JoinHandle<()>>,
    outcome_tx: mpsc::UnboundedSender<GenerationOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<GenerationOutcome>,
}

impl App {
    pub fn new(client: Arc<dyn GenerationClient>, model: impl Into<String>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(model),
            should_quit: false,
            client,
            export_dir: PathBuf::from("."),
            in_flight: None,
            outcome_tx,
            outcome_rx,
        }
    }

    /// Directory export files are written to (defaults to the working directory)
    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut event_handler = EventHandler::new(120);

        while !self.should_quit {
            terminal.draw(|frame| ui::render(frame, &self.state))?;

            tokio::select! {
                event = event_handler.next() => match event {
                    Some(AppEvent::Key(key)) => self.handle_key_event(key).await?,
                    Some(AppEvent::Tick) => self.state.tick(),
                    Some(AppEvent::Resize) => {}
                    None => self.quit(),
                },
                Some(outcome) = self.outcome_rx.recv() => self.apply_outcome(outcome),
            }
        }

        self.abort_in_flight();
        Ok(())
    }

    /// Handle keyboard input according to the current request state
    pub async fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return Ok(());
        }

        match self.state.request_state().clone() {
            RequestState::Idle => self.handle_input_key(key),
            RequestState::Loading { .. } => {
                if key.code == KeyCode::Esc {
                    self.cancel_generation();
                }
            }
            RequestState::Success(_) => self.handle_result_key(key).await?,
            RequestState::Failed { .. } => match key.code {
                KeyCode::Char('r') | KeyCode::Enter => self.state.session.try_again(),
                KeyCode::Char('n') => self.state.start_new_project(),
                KeyCode::Char('q') | KeyCode::Esc => self.quit(),
                _ => {}
            },
        }

        Ok(())
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('e') if ctrl => self.state.insert_next_example(),
            KeyCode::Char('u') if ctrl => self.state.input_buffer_mut().clear(),
            KeyCode::Char(c) => self.state.input_buffer_mut().insert_char(c),
            KeyCode::Backspace => {
                self.state.input_buffer_mut().backspace();
            }
            KeyCode::Delete => {
                self.state.input_buffer_mut().delete_char();
            }
            KeyCode::Left if ctrl => {
                self.state.input_buffer_mut().move_word_left();
            }
            KeyCode::Right if ctrl => {
                self.state.input_buffer_mut().move_word_right();
            }
            KeyCode::Left => {
                self.state.input_buffer_mut().move_left();
            }
            KeyCode::Right => {
                self.state.input_buffer_mut().move_right();
            }
            KeyCode::Home => self.state.input_buffer_mut().move_to_start(),
            KeyCode::End => self.state.input_buffer_mut().move_to_end(),
            KeyCode::Tab => self.state.cycle_style(true),
            KeyCode::BackTab => self.state.cycle_style(false),
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => {
                if self.state.input_buffer().is_empty() {
                    self.quit();
                } else {
                    self.state.input_buffer_mut().clear();
                }
            }
            _ => {}
        }
    }

    async fn handle_result_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Tab | KeyCode::Right => self.state.next_tab(),
            KeyCode::BackTab | KeyCode::Left => self.state.previous_tab(),
            KeyCode::Char(c @ '1'..='8') => {
                let index = c as usize - '1' as usize;
                if let Some(tab) = Tab::from_index(index) {
                    self.state.select_tab(tab);
                }
            }
            KeyCode::Up => self.state.scroll_up(1),
            KeyCode::Down => self.state.scroll_down(1),
            KeyCode::PageUp => self.state.scroll_up(10),
            KeyCode::PageDown => self.state.scroll_down(10),
            KeyCode::Home => self.state.scroll_offset = 0,
            KeyCode::Char('m') => self.export(ExportFormat::Markdown).await,
            KeyCode::Char('t') => self.export(ExportFormat::Text).await,
            KeyCode::Char('p') => self.export(ExportFormat::PrdMarkdown).await,
            KeyCode::Char('n') => self.state.start_new_project(),
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            _ => {}
        }
        Ok(())
    }

    /// Validate the input and start a generation request in the background
    pub fn submit(&mut self) {
        let Some(description) = self.state.take_submission() else {
            debug!("Ignoring empty submission");
            return;
        };

        self.abort_in_flight();

        let ticket = self.state.session.begin(&description);
        let style = self.state.style;
        let client = Arc::clone(&self.client);
        let outcome_tx = self.outcome_tx.clone();

        info!("Submitting request {} (style: {})", ticket, self.state.style_label());

        self.in_flight = Some(tokio::spawn(async move {
            let result = generate_plan(client.as_ref(), &description, style).await;
            // Receiver is gone only when the app is shutting down.
            let _ = outcome_tx.send(GenerationOutcome { ticket, result });
        }));
    }

    /// Stop waiting for the current request; a late reply is discarded
    pub fn cancel_generation(&mut self) {
        self.abort_in_flight();
        if self.state.session.cancel() {
            self.state.set_status("Generation cancelled");
        }
    }

    pub fn apply_outcome(&mut self, outcome: GenerationOutcome) {
        let succeeded = outcome.result.is_ok();
        if self.state.session.complete(outcome.ticket, outcome.result) {
            self.in_flight = None;
            if succeeded {
                self.state.show_new_result();
            }
        }
    }

    /// Wait for the next background generation to report back and apply it
    pub async fn await_outcome(&mut self) -> bool {
        match self.outcome_rx.recv().await {
            Some(outcome) => {
                self.apply_outcome(outcome);
                true
            }
            None => false,
        }
    }

    async fn export(&mut self, format: ExportFormat) {
        let Some(plan) = self.state.plan().cloned() else {
            return;
        };

        let export = export_plan(&plan, format);
        let path = self.export_dir.join(&export.file_name);

        match tokio::fs::write(&path, export.content.as_bytes()).await {
            Ok(()) => {
                info!("Exported {} to {}", format, path.display());
                self.state.set_status(format!(
                    "Saved {} ({} bytes)",
                    path.display(),
                    export.size_bytes
                ));
            }
            Err(e) => {
                error!("Failed to write {}: {}", path.display(), e);
                self.state
                    .set_status(format!("Could not save {}: {}", export.file_name, e));
            }
        }
    }

    fn abort_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
