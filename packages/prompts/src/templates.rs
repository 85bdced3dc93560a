// ABOUTME: Built-in prompt templates with {{parameter}} placeholders
// ABOUTME: Strict rendering validates parameters; substitution is single-pass

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::schema::SCHEMA_VERSION;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Prompt not found: {0}")]
    NotFound(String),

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid prompt format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub name: String,
    pub category: String,
    pub template: String,
    pub parameters: Vec<String>,
    pub version: u32,
}

impl Prompt {
    /// Render the template, failing if a declared parameter is not supplied
    pub fn render(&self, parameters: &[(&str, &str)]) -> Result<String, PromptError> {
        if self.template.trim().is_empty() {
            return Err(PromptError::InvalidFormat(format!(
                "Prompt {} has an empty template",
                self.id
            )));
        }

        for required in &self.parameters {
            if !parameters.iter().any(|(key, _)| *key == required.as_str()) {
                return Err(PromptError::MissingParameter(required.clone()));
            }
        }

        Ok(self.fill(parameters))
    }

    /// Replace `{{key}}` placeholders in one pass.
    ///
    /// Substituted values are never rescanned, so user text containing
    /// braces is embedded verbatim. Unknown placeholders are left as-is.
    pub fn fill(&self, parameters: &[(&str, &str)]) -> String {
        let values: HashMap<&str, &str> = parameters.iter().copied().collect();
        let mut result = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(open) = rest.find("{{") {
            result.push_str(&rest[..open]);
            let after_open = &rest[open + 2..];

            match after_open.find("}}") {
                Some(close) => {
                    let key = &after_open[..close];
                    match values.get(key) {
                        Some(value) => result.push_str(value),
                        None => {
                            result.push_str("{{");
                            result.push_str(key);
                            result.push_str("}}");
                        }
                    }
                    rest = &after_open[close + 2..];
                }
                None => {
                    result.push_str(&rest[open..]);
                    rest = "";
                }
            }
        }

        result.push_str(rest);
        result
    }
}

pub const ARCHITECTURE_PROMPT_ID: &str = "architecture-plan";

const ARCHITECTURE_TEMPLATE: &str = r#"You are an expert software architect and product manager. Turn the project idea below into a launch-ready plan: a system architecture, a technology stack, trade-offs, scalability and security considerations, a phased roadmap, a monthly cost estimate and a product requirements document.
{{style_clause}}
Your analysis must be comprehensive, practical and tailored to the project description.

Project Description: "{{description}}"

Respond with a single JSON object that matches this shape exactly (schema version {{schema_version}}):
{{schema}}

Rules:
- Output raw JSON only. Do not wrap it in Markdown code fences and do not add any text before or after it.
- The "diagram" field must be a valid Mermaid.js graph definition using "graph TD" or "graph LR" that shows the core components and data flow.
- Every cost is a monthly estimate in US dollars given as a plain number.
- Leave out "techStack.messaging" unless a message broker or event stream is relevant."#;

lazy_static::lazy_static! {
    static ref BUILTIN_PROMPTS: Vec<Prompt> = vec![Prompt {
        id: ARCHITECTURE_PROMPT_ID.to_string(),
        name: "Architecture plan".to_string(),
        category: "architecture".to_string(),
        template: ARCHITECTURE_TEMPLATE.to_string(),
        parameters: vec![
            "style_clause".to_string(),
            "description".to_string(),
            "schema_version".to_string(),
            "schema".to_string(),
        ],
        version: SCHEMA_VERSION,
    }];
}

/// Look up a built-in prompt by id
pub fn builtin_prompt(id: &str) -> Result<&'static Prompt, PromptError> {
    BUILTIN_PROMPTS
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| PromptError::NotFound(id.to_string()))
}

/// The architecture plan prompt
pub fn architecture_prompt() -> &'static Prompt {
    // Index 0 is the architecture prompt; see BUILTIN_PROMPTS.
    &BUILTIN_PROMPTS[0]
}
