// ABOUTME: Validation and decoding of raw model output into an ArchitecturePlan
// ABOUTME: Strips code fences, checks essential fields, then deserializes

use serde_json::Value;
use tracing::{debug, error};

use archiai_prompts::architecture_plan_schema;

use crate::error::{PlanError, Result};
use crate::types::ArchitecturePlan;

/// Remove a surrounding Markdown code fence (```json ... ``` or ```` ... ````)
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    let fence_len = trimmed.chars().take_while(|&c| c == '`').count();
    let after_fence = &trimmed[fence_len..];

    // Skip the language tag, if any
    let body_start = after_fence
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(after_fence.len());
    let body = &after_fence[body_start..];

    let body = body.trim_end();
    let body = body.trim_end_matches('`');
    body.trim()
}

/// Parse raw model output into a plan.
///
/// Every failure is reported as [`PlanError::MalformedOutput`]; a partially
/// shaped record never escapes.
pub fn parse_plan(raw: &str) -> Result<ArchitecturePlan> {
    let json_text = strip_code_fences(raw);

    debug!(
        "Parsing model output ({} chars): {}",
        json_text.len(),
        preview(json_text, 500)
    );

    let value: Value = serde_json::from_str(json_text).map_err(|e| {
        error!(
            "JSON parsing failed: {}. JSON snippet: {}",
            e,
            preview(json_text, 500)
        );
        PlanError::MalformedOutput(format!("invalid JSON: {}", e))
    })?;

    if !value.is_object() {
        error!("Model output is JSON but not an object");
        return Err(PlanError::MalformedOutput(
            "top-level value is not an object".to_string(),
        ));
    }

    let missing = architecture_plan_schema().missing_essentials(&value);
    if !missing.is_empty() {
        error!("Model output is missing essential fields: {:?}", missing);
        return Err(PlanError::MalformedOutput(format!(
            "missing essential fields: {}",
            missing.join(", ")
        )));
    }

    let plan: ArchitecturePlan = serde_json::from_value(value).map_err(|e| {
        error!("Model output does not match the plan shape: {}", e);
        PlanError::MalformedOutput(format!("unexpected shape: {}", e))
    })?;

    if plan.tech_stack.is_empty() {
        error!("Model output has a tech stack with no technologies");
        return Err(PlanError::MalformedOutput(
            "tech stack lists no technologies".to_string(),
        ));
    }

    Ok(plan)
}

fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
