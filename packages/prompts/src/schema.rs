// ABOUTME: Canonical, versioned definition of the architecture plan response shape
// ABOUTME: Derives the provider response schema, the inline prompt shape and validation rules

use serde_json::{json, Map, Value};

/// Version of the response shape. Bump whenever a field is added, removed or renamed.
pub const SCHEMA_VERSION: u32 = 2;

/// How strongly a field is demanded from the generative service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Must be present and non-empty or the response is rejected
    Essential,
    /// Requested from the provider; tolerated when missing
    Expected,
    /// Nullable; only included when relevant
    Optional,
}

#[derive(Debug, Clone)]
pub enum SchemaKind {
    String,
    Number,
    Array(Box<SchemaNode>),
    Object(Vec<Field>),
}

#[derive(Debug, Clone)]
pub struct SchemaNode {
    pub kind: SchemaKind,
    pub description: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: &'static str,
    pub requirement: Requirement,
    pub node: SchemaNode,
}

impl SchemaNode {
    pub fn string() -> Self {
        Self {
            kind: SchemaKind::String,
            description: None,
        }
    }

    pub fn number() -> Self {
        Self {
            kind: SchemaKind::Number,
            description: None,
        }
    }

    pub fn array_of(items: SchemaNode) -> Self {
        Self {
            kind: SchemaKind::Array(Box::new(items)),
            description: None,
        }
    }

    pub fn object(fields: Vec<Field>) -> Self {
        Self {
            kind: SchemaKind::Object(fields),
            description: None,
        }
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    /// Top-level fields of an object node (empty for other kinds)
    pub fn fields(&self) -> &[Field] {
        match &self.kind {
            SchemaKind::Object(fields) => fields,
            _ => &[],
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields().iter().find(|f| f.name == name)
    }

    /// Names of the top-level fields that must be present and non-empty
    pub fn essential_fields(&self) -> Vec<&'static str> {
        self.fields()
            .iter()
            .filter(|f| f.requirement == Requirement::Essential)
            .map(|f| f.name)
            .collect()
    }

    /// Essential top-level fields that are absent, null or empty in `value`
    ///
    /// An object counts as populated only when one of its declared fields is.
    pub fn missing_essentials(&self, value: &Value) -> Vec<&'static str> {
        self.fields()
            .iter()
            .filter(|f| f.requirement == Requirement::Essential)
            .filter(|f| !value.get(f.name).is_some_and(|v| f.node.is_populated(v)))
            .map(|f| f.name)
            .collect()
    }

    fn is_populated(&self, value: &Value) -> bool {
        match (&self.kind, value) {
            (SchemaKind::Object(fields), Value::Object(map)) => fields.iter().any(|f| {
                map.get(f.name)
                    .is_some_and(|child| f.node.is_populated(child))
            }),
            _ => is_populated(value),
        }
    }

    /// Render as the provider's OpenAPI-subset schema object
    pub fn to_provider_schema(&self) -> Value {
        let mut schema = Map::new();

        match &self.kind {
            SchemaKind::String => {
                schema.insert("type".into(), json!("STRING"));
            }
            SchemaKind::Number => {
                schema.insert("type".into(), json!("NUMBER"));
            }
            SchemaKind::Array(items) => {
                schema.insert("type".into(), json!("ARRAY"));
                schema.insert("items".into(), items.to_provider_schema());
            }
            SchemaKind::Object(fields) => {
                let mut properties = Map::new();
                for field in fields {
                    let mut property = field.node.to_provider_schema();
                    if field.requirement == Requirement::Optional {
                        if let Value::Object(map) = &mut property {
                            map.insert("nullable".into(), json!(true));
                        }
                    }
                    properties.insert(field.name.to_string(), property);
                }

                let required: Vec<&str> = fields
                    .iter()
                    .filter(|f| f.requirement != Requirement::Optional)
                    .map(|f| f.name)
                    .collect();
                let ordering: Vec<&str> = fields.iter().map(|f| f.name).collect();

                schema.insert("type".into(), json!("OBJECT"));
                schema.insert("properties".into(), Value::Object(properties));
                schema.insert("required".into(), json!(required));
                schema.insert("propertyOrdering".into(), json!(ordering));
            }
        }

        if let Some(description) = self.description {
            schema.insert("description".into(), json!(description));
        }

        Value::Object(schema)
    }

    /// Render as an inline TypeScript-like shape for embedding in a prompt
    pub fn shape_description(&self) -> String {
        let mut out = String::new();
        self.write_shape(&mut out, 0);
        out
    }

    fn write_shape(&self, out: &mut String, indent: usize) {
        match &self.kind {
            SchemaKind::String => out.push_str("string"),
            SchemaKind::Number => out.push_str("number"),
            SchemaKind::Array(items) => match items.kind {
                SchemaKind::Object(_) => {
                    out.push_str("Array<");
                    items.write_shape(out, indent);
                    out.push('>');
                }
                _ => {
                    items.write_shape(out, indent);
                    out.push_str("[]");
                }
            },
            SchemaKind::Object(fields) => {
                out.push_str("{\n");
                let pad = "  ".repeat(indent + 1);
                for (i, field) in fields.iter().enumerate() {
                    out.push_str(&pad);
                    out.push('"');
                    out.push_str(field.name);
                    out.push('"');
                    if field.requirement == Requirement::Optional {
                        out.push('?');
                    }
                    out.push_str(": ");
                    field.node.write_shape(out, indent + 1);
                    if i + 1 < fields.len() {
                        out.push(',');
                    }
                    if let Some(description) = field.node.description {
                        out.push_str(" // ");
                        out.push_str(description);
                    }
                    out.push('\n');
                }
                out.push_str(&"  ".repeat(indent));
                out.push('}');
            }
        }
    }
}

impl Field {
    pub fn essential(name: &'static str, node: SchemaNode) -> Self {
        Self {
            name,
            requirement: Requirement::Essential,
            node,
        }
    }

    pub fn expected(name: &'static str, node: SchemaNode) -> Self {
        Self {
            name,
            requirement: Requirement::Expected,
            node,
        }
    }

    pub fn optional(name: &'static str, node: SchemaNode) -> Self {
        Self {
            name,
            requirement: Requirement::Optional,
            node,
        }
    }
}

fn is_populated(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

fn string_list(description: &'static str) -> SchemaNode {
    SchemaNode::array_of(SchemaNode::string()).describe(description)
}

fn titled_points(title: &'static str, points: &'static str) -> SchemaNode {
    SchemaNode::object(vec![
        Field::expected("title", SchemaNode::string().describe(title)),
        Field::expected("points", string_list(points)),
    ])
}

fn build_architecture_plan_schema() -> SchemaNode {
    let tech_stack = SchemaNode::object(vec![
        Field::expected(
            "frontend",
            string_list("Frontend technologies, e.g. 'React with TypeScript'"),
        ),
        Field::expected(
            "backend",
            string_list("Backend technologies, e.g. 'Node.js with Express'"),
        ),
        Field::expected(
            "database",
            string_list("Databases and storage, e.g. 'PostgreSQL'"),
        ),
        Field::expected(
            "devops",
            string_list("DevOps and deployment tools, e.g. 'Docker', 'GitHub Actions'"),
        ),
        Field::optional(
            "messaging",
            string_list("Message brokers or event streams, only if relevant, e.g. 'Apache Kafka'"),
        ),
    ])
    .describe("Recommended technologies grouped by layer");

    let cost_estimation = SchemaNode::object(vec![
        Field::expected(
            "title",
            SchemaNode::string().describe("Heading for the estimate, e.g. 'Monthly Cost Estimation'"),
        ),
        Field::expected(
            "breakdown",
            SchemaNode::array_of(SchemaNode::object(vec![
                Field::expected("category", SchemaNode::string().describe("Cost category, e.g. 'Hosting'")),
                Field::expected("cost", SchemaNode::number().describe("Monthly cost in US dollars")),
                Field::expected("details", SchemaNode::string().describe("What the cost covers")),
            ])),
        ),
    ]);

    let roadmap = SchemaNode::array_of(SchemaNode::object(vec![
        Field::expected("phase", SchemaNode::string().describe("Phase name, e.g. 'Phase 1: MVP'")),
        Field::expected("duration", SchemaNode::string().describe("Expected duration, e.g. '4-6 weeks'")),
        Field::expected("tasks", string_list("Key tasks in delivery order")),
    ]))
    .describe("Ordered delivery phases");

    let prd = SchemaNode::object(vec![
        Field::expected(
            "introduction",
            SchemaNode::string().describe("Purpose, problem statement and goals of the product"),
        ),
        Field::expected(
            "userPersonas",
            SchemaNode::array_of(SchemaNode::object(vec![
                Field::expected("name", SchemaNode::string()),
                Field::expected("description", SchemaNode::string()),
            ])),
        ),
        Field::expected(
            "features",
            SchemaNode::array_of(SchemaNode::object(vec![
                Field::expected("title", SchemaNode::string()),
                Field::expected("description", SchemaNode::string()),
                Field::expected(
                    "userStories",
                    string_list("'As a <persona>, I want <goal> so that <benefit>' statements"),
                ),
            ])),
        ),
        Field::expected(
            "nonFunctionalRequirements",
            SchemaNode::array_of(SchemaNode::object(vec![
                Field::expected("type", SchemaNode::string().describe("e.g. 'Performance', 'Accessibility'")),
                Field::expected("details", SchemaNode::string()),
            ])),
        ),
    ])
    .describe("Product requirements document");

    SchemaNode::object(vec![
        Field::essential(
            "projectName",
            SchemaNode::string().describe("Short, memorable name for the project"),
        ),
        Field::expected(
            "projectSummary",
            SchemaNode::string().describe("One-sentence summary of what the project does"),
        ),
        Field::essential(
            "overview",
            SchemaNode::string()
                .describe("High-level overview of the proposed architecture and why it fits the project"),
        ),
        Field::essential("techStack", tech_stack),
        Field::expected("pros", string_list("Key advantages of this architecture for the project")),
        Field::expected("cons", string_list("Key disadvantages or trade-offs of this architecture")),
        Field::expected(
            "scalability",
            titled_points("Heading, e.g. 'Scalability Plan'", "How the architecture scales"),
        ),
        Field::expected(
            "security",
            titled_points("Heading, e.g. 'Security Considerations'", "Security measures and best practices"),
        ),
        Field::essential(
            "diagram",
            SchemaNode::string().describe(
                "Mermaid.js graph definition ('graph TD' or 'graph LR') of the main components and their interactions",
            ),
        ),
        Field::expected("costEstimation", cost_estimation),
        Field::expected("roadmap", roadmap),
        Field::expected("prd", prd),
    ])
}

lazy_static::lazy_static! {
    static ref ARCHITECTURE_PLAN_SCHEMA: SchemaNode = build_architecture_plan_schema();
}

/// The canonical architecture plan schema
pub fn architecture_plan_schema() -> &'static SchemaNode {
    &ARCHITECTURE_PLAN_SCHEMA
}
