// ABOUTME: Orchestrates one architecture plan generation request
// ABOUTME: Validates input, composes the prompt, calls the client and parses the result

use std::sync::Arc;

use tracing::{error, info, warn};

use archiai_ai::{GenerationClient, GenerationRequest};
use archiai_prompts::{architecture_response_schema, compose_architecture_prompt, ArchitectureStyle};

use crate::error::{PlanError, Result};
use crate::parser::parse_plan;
use crate::types::ArchitecturePlan;

/// Generate a plan for `description`.
///
/// Blank descriptions are rejected before any network call. Exactly one
/// generation request is made otherwise; nothing is retried.
pub async fn generate_plan(
    client: &dyn GenerationClient,
    description: &str,
    style: Option<ArchitectureStyle>,
) -> Result<ArchitecturePlan> {
    let description = description.trim();
    if description.is_empty() {
        warn!("Rejected empty project description");
        return Err(PlanError::EmptyDescription);
    }

    info!(
        "Generating architecture plan: description_len={}, style={}",
        description.chars().count(),
        style.map(|s| s.to_string()).unwrap_or_else(|| "auto".to_string())
    );

    let request = GenerationRequest::new(compose_architecture_prompt(description, style))
        .with_response_schema(architecture_response_schema());

    let response = client.generate(request).await.map_err(|e| {
        error!("Generation request failed: {}", e);
        PlanError::from(e)
    })?;

    let plan = parse_plan(&response.data)?;

    info!(
        "Generated plan '{}' ({} roadmap phases, {} cost items, {} tokens)",
        plan.project_name,
        plan.roadmap.len(),
        plan.cost_estimation.breakdown.len(),
        response.usage.total_tokens()
    );

    Ok(plan)
}

/// Holds a shared client so callers can issue requests without threading it through
#[derive(Clone)]
pub struct PlanGenerator {
    client: Arc<dyn GenerationClient>,
}

impl PlanGenerator {
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self { client }
    }

    pub async fn generate(
        &self,
        description: &str,
        style: Option<ArchitectureStyle>,
    ) -> Result<ArchitecturePlan> {
        generate_plan(self.client.as_ref(), description, style).await
    }
}
