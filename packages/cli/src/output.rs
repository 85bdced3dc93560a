// ABOUTME: Command-line rendering of generated plans
// ABOUTME: Maps --format values onto the plan exporters and writes the result

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use tracing::info;

use archiai_plan::{export_plan, ArchitecturePlan, ExportFormat};
use archiai_prompts::ArchitectureStyle;

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Full plan as Markdown
    Markdown,
    /// Full plan as plain text
    Text,
    /// Product requirements document only
    Prd,
    /// The parsed plan as pretty-printed JSON
    Json,
}

impl OutputFormat {
    fn export_format(self) -> Option<ExportFormat> {
        match self {
            OutputFormat::Markdown => Some(ExportFormat::Markdown),
            OutputFormat::Text => Some(ExportFormat::Text),
            OutputFormat::Prd => Some(ExportFormat::PrdMarkdown),
            OutputFormat::Json => None,
        }
    }
}

pub fn render_plan(plan: &ArchitecturePlan, format: OutputFormat) -> Result<String> {
    match format.export_format() {
        Some(export_format) => Ok(export_plan(plan, export_format).content),
        None => serde_json::to_string_pretty(plan).context("Failed to serialize plan"),
    }
}

/// Write `content` to `path`, or to stdout when no path is given
pub async fn write_output(content: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            tokio::fs::write(path, content)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} bytes to {}", content.len(), path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

/// Table of the architecture styles accepted by `--style`
pub fn styles_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec!["Slug", "Style"]);
    for style in ArchitectureStyle::all() {
        table.add_row(vec![style.slug().to_string(), style.to_string()]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use archiai_plan::{format_plan_markdown, format_plan_text, Feature};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_plan() -> ArchitecturePlan {
        let mut plan = ArchitecturePlan {
            project_name: "Habit Tracker".to_string(),
            project_summary: "Track daily habits.".to_string(),
            overview: "A single service with a relational store.".to_string(),
            ..Default::default()
        };
        plan.prd.features.push(Feature {
            title: "Streaks".to_string(),
            description: "Show consecutive completion days.".to_string(),
            user_stories: vec!["As a user I want to see my streak.".to_string()],
        });
        plan
    }

    #[test]
    fn test_markdown_and_text_match_exporters() {
        let plan = sample_plan();
        assert_eq!(
            render_plan(&plan, OutputFormat::Markdown).unwrap(),
            format_plan_markdown(&plan)
        );
        assert_eq!(
            render_plan(&plan, OutputFormat::Text).unwrap(),
            format_plan_text(&plan)
        );
    }

    #[test]
    fn test_prd_format_renders_requirements_document() {
        let rendered = render_plan(&sample_plan(), OutputFormat::Prd).unwrap();
        assert!(rendered.contains("Habit Tracker"));
        assert!(rendered.contains("Streaks"));
        assert!(!rendered.contains("A single service with a relational store."));
    }

    #[test]
    fn test_json_format_round_trips() {
        let plan = sample_plan();
        let rendered = render_plan(&plan, OutputFormat::Json).unwrap();
        let parsed: ArchitecturePlan = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, plan);
        assert!(rendered.contains("\"projectName\": \"Habit Tracker\""));
    }

    #[tokio::test]
    async fn test_write_output_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.md");
        write_output("# Plan", Some(&path)).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Plan");
    }

    #[tokio::test]
    async fn test_write_output_reports_missing_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("plan.md");
        let err = write_output("# Plan", Some(&path)).await.unwrap_err();
        assert!(err.to_string().contains("Failed to write"));
    }

    #[test]
    fn test_styles_table_lists_every_style() {
        let rendered = styles_table().to_string();
        for style in ArchitectureStyle::all() {
            assert!(rendered.contains(style.slug()));
        }
    }
}
