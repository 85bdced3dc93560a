// ABOUTME: Canonical response schema and prompt composition for ArchiAI
// ABOUTME: Both the provider schema and the prompt's shape text come from one schema definition

pub mod schema;
pub mod style;
pub mod templates;

pub use schema::{architecture_plan_schema, Field, Requirement, SchemaKind, SchemaNode, SCHEMA_VERSION};
pub use style::ArchitectureStyle;
pub use templates::{architecture_prompt, builtin_prompt, Prompt, PromptError, ARCHITECTURE_PROMPT_ID};

/// Build the instruction sent to the generative service.
///
/// Callers reject blank descriptions before getting here; the description is
/// embedded verbatim.
pub fn compose_architecture_prompt(description: &str, style: Option<ArchitectureStyle>) -> String {
    let style_clause = style_clause(style);
    let schema_version = SCHEMA_VERSION.to_string();
    let shape = architecture_plan_schema().shape_description();

    architecture_prompt().fill(&architecture_prompt_parameters(
        &style_clause,
        description,
        &schema_version,
        &shape,
    ))
}

/// Machine-readable response schema sent alongside the prompt
pub fn architecture_response_schema() -> serde_json::Value {
    architecture_plan_schema().to_provider_schema()
}

fn architecture_prompt_parameters<'a>(
    style_clause: &'a str,
    description: &'a str,
    schema_version: &'a str,
    shape: &'a str,
) -> [(&'static str, &'a str); 4] {
    [
        ("style_clause", style_clause),
        ("description", description),
        ("schema_version", schema_version),
        ("schema", shape),
    ]
}

fn style_clause(style: Option<ArchitectureStyle>) -> String {
    match style {
        Some(style) => format!(
            "The user has specified an interest in a \"{}\" architecture; design around it unless it is clearly unsuitable, and say why in the overview.",
            style
        ),
        None => "Choose the architecture style that best fits the project and justify the choice in the overview.".to_string(),
    }
}
