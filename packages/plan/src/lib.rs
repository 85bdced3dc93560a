// ABOUTME: Architecture plan generation library for ArchiAI
// ABOUTME: Result types, response parsing, request orchestration, lifecycle and export

pub mod error;
pub mod export;
pub mod generator;
pub mod parser;
pub mod session;
pub mod types;

pub use error::{PlanError, Result};
pub use export::{
    export_plan, format_plan_markdown, format_plan_text, format_prd_markdown, format_usd,
    placeholder, prd_file_name, ExportFormat, ExportResult, PLAN_MARKDOWN_FILE_NAME,
    PLAN_TEXT_FILE_NAME,
};
pub use generator::{generate_plan, PlanGenerator};
pub use parser::{parse_plan, strip_code_fences};
pub use session::{PlanSession, RequestState, Ticket};
pub use types::{
    ArchitecturePlan, Consideration, CostEstimation, CostItem, Feature, NonFunctionalRequirement,
    Prd, RoadmapPhase, TechStack, TitledPoints, UserPersona,
};
