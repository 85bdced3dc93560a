// ABOUTME: Request lifecycle state machine for interactive front-ends
// ABOUTME: Idle -> Loading -> Success | Failed, with tickets that drop stale completions

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::Result;
use crate::types::ArchitecturePlan;

/// Identifies one submitted request
pub type Ticket = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum RequestState {
    Idle,
    Loading { ticket: Ticket },
    Success(Arc<ArchitecturePlan>),
    Failed { message: String },
}

#[derive(Debug)]
pub struct PlanSession {
    state: RequestState,
    next_ticket: Ticket,
    /// Description of the last submitted request, kept for "Try Again"
    last_description: Option<String>,
}

impl Default for PlanSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanSession {
    pub fn new() -> Self {
        Self {
            state: RequestState::Idle,
            next_ticket: 1,
            last_description: None,
        }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, RequestState::Loading { .. })
    }

    pub fn plan(&self) -> Option<&Arc<ArchitecturePlan>> {
        match &self.state {
            RequestState::Success(plan) => Some(plan),
            _ => None,
        }
    }

    pub fn last_description(&self) -> Option<&str> {
        self.last_description.as_deref()
    }

    /// Start a request, superseding any in flight. Returns its ticket.
    pub fn begin(&mut self, description: &str) -> Ticket {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.last_description = Some(description.to_string());
        self.state = RequestState::Loading { ticket };
        debug!("Request {} started", ticket);
        ticket
    }

    /// Record a request outcome. Returns false if `ticket` is not the current request.
    pub fn complete(&mut self, ticket: Ticket, result: Result<ArchitecturePlan>) -> bool {
        match self.state {
            RequestState::Loading { ticket: current } if current == ticket => {}
            _ => {
                debug!("Dropping stale completion for request {}", ticket);
                return false;
            }
        }

        self.state = match result {
            Ok(plan) => {
                info!("Request {} succeeded", ticket);
                RequestState::Success(Arc::new(plan))
            }
            Err(err) => {
                info!("Request {} failed: {}", ticket, err);
                RequestState::Failed {
                    message: err.user_message().to_string(),
                }
            }
        };
        true
    }

    /// Abandon the in-flight request, if any, and return to idle
    pub fn cancel(&mut self) -> bool {
        if self.is_loading() {
            self.state = RequestState::Idle;
            true
        } else {
            false
        }
    }

    /// Discard the error and return to the input form with the description kept
    pub fn try_again(&mut self) {
        self.state = RequestState::Idle;
    }

    /// Discard everything and return to an empty input form
    pub fn reset(&mut self) {
        self.state = RequestState::Idle;
        self.last_description = None;
    }
}
