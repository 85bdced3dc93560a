// ABOUTME: Export of generated plans as Markdown, plain text and PRD documents
// ABOUTME: All formatters are pure; empty sections render a placeholder instead of failing

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::types::{ArchitecturePlan, Consideration, Prd};

pub const PLAN_MARKDOWN_FILE_NAME: &str = "architecture-plan.md";
pub const PLAN_TEXT_FILE_NAME: &str = "architecture-plan.txt";

const PLACEHOLDER_SUFFIX: &str = "not available.";

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    Markdown,
    Text,
    PrdMarkdown,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Markdown => write!(f, "markdown"),
            ExportFormat::Text => write!(f, "text"),
            ExportFormat::PrdMarkdown => write!(f, "prd-markdown"),
        }
    }
}

impl ExportFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Markdown | ExportFormat::PrdMarkdown => "text/markdown",
            ExportFormat::Text => "text/plain",
        }
    }
}

/// Export result with content and metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResult {
    pub format: ExportFormat,
    pub content: String,
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: usize,
}

/// Render `plan` in `format` together with its suggested file name
pub fn export_plan(plan: &ArchitecturePlan, format: ExportFormat) -> ExportResult {
    info!("Exporting plan '{}' as {}", plan.project_name, format);

    let (content, file_name) = match format {
        ExportFormat::Markdown => (
            format_plan_markdown(plan),
            PLAN_MARKDOWN_FILE_NAME.to_string(),
        ),
        ExportFormat::Text => (format_plan_text(plan), PLAN_TEXT_FILE_NAME.to_string()),
        ExportFormat::PrdMarkdown => (
            format_prd_markdown(&plan.prd, &plan.project_name),
            prd_file_name(&plan.project_name),
        ),
    };

    let size_bytes = content.len();
    ExportResult {
        format,
        content,
        file_name,
        mime_type: format.mime_type().to_string(),
        size_bytes,
    }
}

/// `<Project_Name>_PRD.md`, with whitespace runs collapsed to `_`.
///
/// The name comes from model output, so path separators and characters that
/// are invalid in file names become `_` and leading dots are dropped. The
/// result is always a single path component.
pub fn prd_file_name(project_name: &str) -> String {
    let cleaned: String = project_name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => ' ',
            c => c,
        })
        .collect();
    let joined = cleaned.split_whitespace().collect::<Vec<_>>().join("_");
    let stem = joined.trim_start_matches(['.', '_']);
    if stem.is_empty() {
        "Project_PRD.md".to_string()
    } else {
        format!("{}_PRD.md", stem)
    }
}

/// Format a dollar amount like `$1,234` or `$12.50`
pub fn format_usd(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if fraction == 0 {
        format!("{}${}", sign, grouped)
    } else {
        format!("{}${}.{:02}", sign, grouped, fraction)
    }
}

/// Placeholder line for an empty section, e.g. "Roadmap data not available."
pub fn placeholder(subject: &str) -> String {
    format!("{} {}", subject, PLACEHOLDER_SUFFIX)
}

fn non_empty(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn consideration_heading<'a>(consideration: &'a Consideration, fallback: &'a str) -> &'a str {
    consideration.title().unwrap_or(fallback)
}

/// Full architecture plan as Markdown
pub fn format_plan_markdown(plan: &ArchitecturePlan) -> String {
    let mut md = String::new();

    md.push_str(&format!(
        "# {}\n\n",
        non_empty(&plan.project_name).unwrap_or("Architecture Plan")
    ));
    if let Some(summary) = non_empty(&plan.project_summary) {
        md.push_str(&format!("_{}_\n\n", summary));
    }

    md.push_str("## Overview\n");
    md.push_str(non_empty(&plan.overview).unwrap_or(&placeholder("Overview")));
    md.push_str("\n\n");

    md.push_str("## Tech Stack\n");
    let mut any_tech = false;
    for (label, items) in plan.tech_stack.categories() {
        if items.is_empty() {
            continue;
        }
        any_tech = true;
        md.push_str(&format!("- **{}:** {}\n", label, items.join(", ")));
    }
    if !any_tech {
        md.push_str(&placeholder("Tech stack"));
        md.push('\n');
    }

    push_markdown_list(&mut md, "Pros", &plan.pros);
    push_markdown_list(&mut md, "Cons", &plan.cons);

    for (consideration, fallback) in [
        (&plan.scalability, "Scalability"),
        (&plan.security, "Security"),
    ] {
        md.push_str(&format!(
            "\n## {}\n",
            consideration_heading(consideration, fallback)
        ));
        let points = consideration.points();
        if points.is_empty() {
            md.push_str(&placeholder(&format!("{} plan", fallback)));
            md.push('\n');
        }
        for point in points {
            md.push_str(&format!("- {}\n", point));
        }
    }

    md.push_str("\n## Roadmap\n");
    if plan.roadmap.is_empty() {
        md.push_str(&placeholder("Roadmap data"));
        md.push('\n');
    }
    for phase in &plan.roadmap {
        match non_empty(&phase.duration) {
            Some(duration) => md.push_str(&format!("\n### {} ({})\n", phase.phase, duration)),
            None => md.push_str(&format!("\n### {}\n", phase.phase)),
        }
        for task in &phase.tasks {
            md.push_str(&format!("- {}\n", task));
        }
    }

    let cost = &plan.cost_estimation;
    md.push_str(&format!(
        "\n## {}\n",
        non_empty(&cost.title).unwrap_or("Cost Estimation")
    ));
    if cost.breakdown.is_empty() {
        md.push_str(&placeholder("Cost estimation"));
        md.push('\n');
    } else {
        md.push_str("| Category | Monthly Cost | Details |\n");
        md.push_str("|----------|--------------|---------|\n");
        for item in &cost.breakdown {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                item.category,
                format_usd(item.cost),
                item.details
            ));
        }
        md.push_str(&format!(
            "\n**Estimated total:** {}/month\n",
            format_usd(cost.total())
        ));
    }

    md.push_str("\n## Mermaid Diagram\n\n");
    match non_empty(&plan.diagram) {
        Some(diagram) => md.push_str(&format!("```mermaid\n{}\n```\n", diagram)),
        None => {
            md.push_str(&placeholder("Diagram"));
            md.push('\n');
        }
    }

    md
}

fn push_markdown_list(md: &mut String, heading: &str, items: &[String]) {
    md.push_str(&format!("\n## {}\n", heading));
    if items.is_empty() {
        md.push_str(&placeholder(&format!("{} data", heading)));
        md.push('\n');
    }
    for item in items {
        md.push_str(&format!("- {}\n", item));
    }
}

/// Full architecture plan as plain text
pub fn format_plan_text(plan: &ArchitecturePlan) -> String {
    let mut txt = String::new();

    let title = non_empty(&plan.project_name).unwrap_or("Architecture Plan");
    txt.push_str(title);
    txt.push('\n');
    txt.push_str(&"=".repeat(title.chars().count()));
    txt.push_str("\n\n");
    if let Some(summary) = non_empty(&plan.project_summary) {
        txt.push_str(summary);
        txt.push_str("\n\n");
    }

    txt.push_str("Overview\n");
    txt.push_str(non_empty(&plan.overview).unwrap_or(&placeholder("Overview")));
    txt.push_str("\n\n");

    txt.push_str("Tech Stack\n");
    let mut any_tech = false;
    for (label, items) in plan.tech_stack.categories() {
        if items.is_empty() {
            continue;
        }
        any_tech = true;
        txt.push_str(&format!("  {}: {}\n", label, items.join(", ")));
    }
    if !any_tech {
        txt.push_str(&format!("  {}\n", placeholder("Tech stack")));
    }

    push_text_list(&mut txt, "Pros", &plan.pros);
    push_text_list(&mut txt, "Cons", &plan.cons);

    for (consideration, fallback) in [
        (&plan.scalability, "Scalability"),
        (&plan.security, "Security"),
    ] {
        txt.push_str(&format!(
            "\n{}\n",
            consideration_heading(consideration, fallback)
        ));
        let points = consideration.points();
        if points.is_empty() {
            txt.push_str(&format!("  {}\n", placeholder(&format!("{} plan", fallback))));
        }
        for point in points {
            txt.push_str(&format!("  - {}\n", point));
        }
    }

    txt.push_str("\nRoadmap\n");
    if plan.roadmap.is_empty() {
        txt.push_str(&format!("  {}\n", placeholder("Roadmap data")));
    }
    for phase in &plan.roadmap {
        match non_empty(&phase.duration) {
            Some(duration) => txt.push_str(&format!("  {} ({})\n", phase.phase, duration)),
            None => txt.push_str(&format!("  {}\n", phase.phase)),
        }
        for task in &phase.tasks {
            txt.push_str(&format!("    - {}\n", task));
        }
    }

    let cost = &plan.cost_estimation;
    txt.push_str(&format!(
        "\n{}\n",
        non_empty(&cost.title).unwrap_or("Cost Estimation")
    ));
    if cost.breakdown.is_empty() {
        txt.push_str(&format!("  {}\n", placeholder("Cost estimation")));
    } else {
        for item in &cost.breakdown {
            txt.push_str(&format!(
                "  {}: {}/month - {}\n",
                item.category,
                format_usd(item.cost),
                item.details
            ));
        }
        txt.push_str(&format!("  Total: {}/month\n", format_usd(cost.total())));
    }

    txt.push_str("\nMermaid Diagram\n");
    txt.push_str(non_empty(&plan.diagram).unwrap_or(&placeholder("Diagram")));
    txt.push('\n');

    txt
}

fn push_text_list(txt: &mut String, heading: &str, items: &[String]) {
    txt.push_str(&format!("\n{}\n", heading));
    if items.is_empty() {
        txt.push_str(&format!("  {}\n", placeholder(&format!("{} data", heading))));
    }
    for (i, item) in items.iter().enumerate() {
        txt.push_str(&format!("  {}. {}\n", i + 1, item));
    }
}

/// Product requirements document as Markdown with numbered sections
pub fn format_prd_markdown(prd: &Prd, project_name: &str) -> String {
    let mut md = String::new();

    md.push_str(&format!(
        "# Product Requirements Document (PRD) for {}\n\n",
        non_empty(project_name).unwrap_or("Untitled Project")
    ));

    md.push_str("## 1. Introduction\n");
    md.push_str(non_empty(&prd.introduction).unwrap_or(&placeholder("Introduction")));
    md.push_str("\n\n");

    md.push_str("## 2. User Personas\n");
    if prd.user_personas.is_empty() {
        md.push_str(&placeholder("User personas"));
        md.push_str("\n\n");
    }
    for (idx, persona) in prd.user_personas.iter().enumerate() {
        md.push_str(&format!(
            "### 2.{}. {}\n{}\n\n",
            idx + 1,
            persona.name,
            persona.description
        ));
    }

    md.push_str("## 3. Features\n");
    if prd.features.is_empty() {
        md.push_str(&placeholder("Features"));
        md.push_str("\n\n");
    }
    for (idx, feature) in prd.features.iter().enumerate() {
        md.push_str(&format!(
            "### 3.{}. {}\n**Description:** {}\n\n",
            idx + 1,
            feature.title,
            feature.description
        ));
        if !feature.user_stories.is_empty() {
            md.push_str("**User Stories:**\n");
            for story in &feature.user_stories {
                md.push_str(&format!("* {}\n", story));
            }
            md.push('\n');
        }
    }

    md.push_str("## 4. Non-Functional Requirements\n");
    if prd.non_functional_requirements.is_empty() {
        md.push_str(&placeholder("Non-functional requirements"));
        md.push_str("\n\n");
    }
    for (idx, nfr) in prd.non_functional_requirements.iter().enumerate() {
        md.push_str(&format!("### 4.{}. {}\n{}\n\n", idx + 1, nfr.kind, nfr.details));
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, "$0")]
    #[case(45.0, "$45")]
    #[case(12.5, "$12.50")]
    #[case(1234.0, "$1,234")]
    #[case(1234567.891, "$1,234,567.89")]
    #[case(-20.0, "-$20")]
    fn test_format_usd(#[case] amount: f64, #[case] expected: &str) {
        assert_eq!(format_usd(amount), expected);
    }

    #[rstest]
    #[case("Pet Pals", "Pet_Pals_PRD.md")]
    #[case("  Eco   Threads\tShop ", "Eco_Threads_Shop_PRD.md")]
    #[case("Solo", "Solo_PRD.md")]
    #[case("   ", "Project_PRD.md")]
    #[case("../../etc/Chat/Hub", "etc_Chat_Hub_PRD.md")]
    #[case("A/B", "A_B_PRD.md")]
    #[case("C:\\Users\\me", "C__Users_me_PRD.md")]
    #[case(".hidden", "hidden_PRD.md")]
    #[case("..", "Project_PRD.md")]
    #[case("What? <Really>", "What___Really__PRD.md")]
    fn test_prd_file_name(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(prd_file_name(name), expected);
    }

    #[test]
    fn test_export_metadata() {
        let plan = ArchitecturePlan {
            project_name: "Pet Pals".into(),
            ..Default::default()
        };

        let md = export_plan(&plan, ExportFormat::Markdown);
        assert_eq!(md.file_name, PLAN_MARKDOWN_FILE_NAME);
        assert_eq!(md.mime_type, "text/markdown");
        assert_eq!(md.size_bytes, md.content.len());

        let txt = export_plan(&plan, ExportFormat::Text);
        assert_eq!(txt.file_name, PLAN_TEXT_FILE_NAME);
        assert_eq!(txt.mime_type, "text/plain");

        let prd = export_plan(&plan, ExportFormat::PrdMarkdown);
        assert_eq!(prd.file_name, "Pet_Pals_PRD.md");
        assert!(prd.content.starts_with("# Product Requirements Document (PRD) for Pet Pals"));
    }

    #[test]
    fn test_empty_plan_renders_placeholders() {
        let plan = ArchitecturePlan::default();
        let md = format_plan_markdown(&plan);

        assert!(md.contains("Tech stack not available."));
        assert!(md.contains("Roadmap data not available."));
        assert!(md.contains("Cost estimation not available."));
        assert!(md.contains("Scalability plan not available."));

        let txt = format_plan_text(&plan);
        assert!(txt.contains("Cons data not available."));
        assert!(txt.starts_with("Architecture Plan\n================="));
    }

    #[test]
    fn test_prose_consideration_is_exported_as_single_point() {
        let plan = ArchitecturePlan {
            security: Consideration::Prose("Encrypt data at rest.".into()),
            ..Default::default()
        };
        let md = format_plan_markdown(&plan);
        assert!(md.contains("## Security\n- Encrypt data at rest.\n"));
    }
}
