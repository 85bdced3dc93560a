// ABOUTME: Type definitions for generated architecture plans
// ABOUTME: Mirrors the canonical response schema with camelCase JSON keys

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A complete generated plan. Produced once per request and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArchitecturePlan {
    pub project_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub project_summary: String,
    pub overview: String,
    pub tech_stack: TechStack,
    #[serde(deserialize_with = "null_as_default")]
    pub pros: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub cons: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub scalability: Consideration,
    #[serde(deserialize_with = "null_as_default")]
    pub security: Consideration,
    pub diagram: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cost_estimation: CostEstimation,
    #[serde(deserialize_with = "null_as_default")]
    pub roadmap: Vec<RoadmapPhase>,
    #[serde(deserialize_with = "null_as_default")]
    pub prd: Prd,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechStack {
    #[serde(deserialize_with = "null_as_default")]
    pub frontend: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub backend: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub database: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub devops: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messaging: Option<Vec<String>>,
}

impl TechStack {
    /// Labelled categories in display order. Messaging appears only when present.
    pub fn categories(&self) -> Vec<(&'static str, &[String])> {
        let mut categories: Vec<(&'static str, &[String])> = vec![
            ("Frontend", &self.frontend),
            ("Backend", &self.backend),
            ("Database", &self.database),
            ("DevOps", &self.devops),
        ];
        if let Some(messaging) = &self.messaging {
            categories.push(("Messaging", messaging));
        }
        categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories().iter().all(|(_, items)| items.is_empty())
    }
}

/// Scalability or security notes.
///
/// Older responses carried a prose paragraph instead of a titled list; both
/// decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Consideration {
    Titled(TitledPoints),
    Prose(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitledPoints {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub points: Vec<String>,
}

impl Default for Consideration {
    fn default() -> Self {
        Consideration::Titled(TitledPoints::default())
    }
}

impl Consideration {
    pub fn title(&self) -> Option<&str> {
        match self {
            Consideration::Titled(t) if !t.title.trim().is_empty() => Some(&t.title),
            _ => None,
        }
    }

    /// Bullet points; a prose variant yields a single point
    pub fn points(&self) -> Vec<&str> {
        match self {
            Consideration::Titled(t) => t
                .points
                .iter()
                .map(String::as_str)
                .filter(|p| !p.trim().is_empty())
                .collect(),
            Consideration::Prose(text) if !text.trim().is_empty() => vec![text.as_str()],
            Consideration::Prose(_) => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostEstimation {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub breakdown: Vec<CostItem>,
}

impl CostEstimation {
    /// Estimated monthly total in US dollars
    pub fn total(&self) -> f64 {
        self.breakdown.iter().map(|item| item.cost).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostItem {
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cost: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadmapPhase {
    #[serde(deserialize_with = "null_as_default")]
    pub phase: String,
    #[serde(deserialize_with = "null_as_default")]
    pub duration: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Prd {
    #[serde(deserialize_with = "null_as_default")]
    pub introduction: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user_personas: Vec<UserPersona>,
    #[serde(deserialize_with = "null_as_default")]
    pub features: Vec<Feature>,
    #[serde(deserialize_with = "null_as_default")]
    pub non_functional_requirements: Vec<NonFunctionalRequirement>,
}

impl Prd {
    pub fn is_empty(&self) -> bool {
        self.introduction.trim().is_empty()
            && self.user_personas.is_empty()
            && self.features.is_empty()
            && self.non_functional_requirements.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPersona {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Feature {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user_stories: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NonFunctionalRequirement {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub details: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_consideration_accepts_both_shapes() {
        let titled: Consideration = serde_json::from_value(json!({
            "title": "Scalability Plan",
            "points": ["Horizontal scaling", "Read replicas"]
        }))
        .unwrap();
        assert_eq!(titled.title(), Some("Scalability Plan"));
        assert_eq!(titled.points(), vec!["Horizontal scaling", "Read replicas"]);

        let prose: Consideration =
            serde_json::from_value(json!("Use autoscaling groups behind a load balancer.")).unwrap();
        assert_eq!(prose.title(), None);
        assert_eq!(
            prose.points(),
            vec!["Use autoscaling groups behind a load balancer."]
        );
    }

    #[test]
    fn test_missing_and_null_fields_default() {
        let plan: ArchitecturePlan = serde_json::from_value(json!({
            "projectName": "Chatter",
            "overview": "A chat service",
            "techStack": {"frontend": ["React"], "backend": null},
            "diagram": "graph TD; A-->B;",
            "cons": null,
            "prd": null
        }))
        .unwrap();

        assert!(plan.cons.is_empty());
        assert!(plan.tech_stack.backend.is_empty());
        assert!(plan.tech_stack.messaging.is_none());
        assert!(plan.prd.is_empty());
        assert!(plan.security.is_empty());
    }

    #[test]
    fn test_tech_stack_categories_include_messaging_only_when_present() {
        let mut stack = TechStack {
            frontend: vec!["React".into()],
            ..Default::default()
        };
        let labels: Vec<&str> = stack.categories().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["Frontend", "Backend", "Database", "DevOps"]);

        stack.messaging = Some(vec!["Kafka".into()]);
        assert_eq!(stack.categories().last().unwrap().0, "Messaging");
        assert!(!stack.is_empty());
        assert!(TechStack::default().is_empty());
    }

    #[test]
    fn test_cost_total() {
        let estimation = CostEstimation {
            title: "Monthly Cost Estimation".into(),
            breakdown: vec![
                CostItem {
                    category: "Hosting".into(),
                    cost: 120.5,
                    details: "Two app servers".into(),
                },
                CostItem {
                    category: "Database".into(),
                    cost: 79.5,
                    details: "Managed Postgres".into(),
                },
            ],
        };
        assert_eq!(estimation.total(), 200.0);
        assert_eq!(CostEstimation::default().total(), 0.0);
    }

    #[test]
    fn test_cost_type_mismatch_fails() {
        let result: std::result::Result<CostItem, _> =
            serde_json::from_value(json!({"category": "Hosting", "cost": "lots"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_serializes_camel_case() {
        let plan = ArchitecturePlan {
            project_name: "Chatter".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&plan).unwrap();
        assert_eq!(value["projectName"], "Chatter");
        assert!(value["techStack"].get("messaging").is_none());
        assert!(value["prd"]["nonFunctionalRequirements"].is_array());
    }

    #[test]
    fn test_nested_nulls_default_instead_of_failing() {
        let plan: ArchitecturePlan = serde_json::from_value(json!({
            "projectName": "Chatter",
            "overview": "A chat service",
            "techStack": {"frontend": ["React"]},
            "diagram": "graph TD; A-->B;",
            "costEstimation": {"title": "Monthly", "breakdown": [
                {"category": "Hosting", "cost": null, "details": "TBD"}
            ]},
            "prd": {
                "userPersonas": [{"name": null, "description": "Remote teams"}],
                "features": [{"title": "Rooms", "description": null, "userStories": null}],
                "nonFunctionalRequirements": [{"type": null, "details": null}]
            }
        }))
        .unwrap();

        assert_eq!(plan.cost_estimation.breakdown[0].cost, 0.0);
        assert_eq!(plan.cost_estimation.total(), 0.0);
        assert_eq!(plan.prd.user_personas[0].name, "");
        assert_eq!(plan.prd.features[0].title, "Rooms");
        assert_eq!(plan.prd.features[0].description, "");
        assert!(plan.prd.features[0].user_stories.is_empty());
        assert_eq!(plan.prd.non_functional_requirements[0].kind, "");
    }
}
