//! The closed set of tools this gateway implements and the visibility
//! policy deciding which of them callers may reach.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{json, Value};

use crate::schema::{ArgumentValidator, SchemaError};

/// Every tool with a handler. Adding a variant forces updates to
/// [`ToolName::descriptor`] and the dispatch match in `handlers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ToolName {
    ListProjects,
    ListSkills,
    GetProject,
    CreateProject,
    UpdateProject,
    DeleteProject,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown tool: {0}")]
pub struct UnknownTool(pub String);

impl ToolName {
    /// Registration order, which is also the `tools/list` order.
    pub const ALL: [ToolName; 6] = [
        ToolName::ListProjects,
        ToolName::ListSkills,
        ToolName::GetProject,
        ToolName::CreateProject,
        ToolName::UpdateProject,
        ToolName::DeleteProject,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ListProjects => "list_projects",
            Self::ListSkills => "list_skills",
            Self::GetProject => "get_project",
            Self::CreateProject => "create_project",
            Self::UpdateProject => "update_project",
            Self::DeleteProject => "delete_project",
        }
    }

    /// Read-only tools; the only ones public out of the box.
    pub fn default_public() -> BTreeSet<ToolName> {
        [Self::ListProjects, Self::ListSkills].into_iter().collect()
    }

    pub fn descriptor(self) -> ToolDescriptor {
        let (description, input_schema) = match self {
            Self::ListProjects => (
                "List all portfolio projects",
                json!({ "type": "object", "properties": {} }),
            ),
            Self::ListSkills => (
                "List all skills",
                json!({ "type": "object", "properties": {} }),
            ),
            Self::GetProject => (
                "Get a single project by id",
                json!({
                    "type": "object",
                    "required": ["project_id"],
                    "properties": { "project_id": project_id_schema() }
                }),
            ),
            Self::CreateProject => (
                "Create a new project",
                json!({
                    "type": "object",
                    "required": ["title", "description", "link"],
                    "properties": {
                        "title": { "type": "string", "description": "Project title" },
                        "description": { "type": "string", "description": "Project description" },
                        "link": { "type": "string", "description": "Public URL of the project" },
                        "github_link": { "type": "string", "description": "Source repository URL" },
                        "image_url": { "type": "string", "description": "Preview image URL" },
                        "technologies": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Technologies used"
                        },
                        "featured": { "type": "boolean", "description": "Show on the front page" }
                    }
                }),
            ),
            Self::UpdateProject => (
                "Update fields of an existing project; null fields are left unchanged",
                json!({
                    "type": "object",
                    "required": ["project_id"],
                    "properties": {
                        "project_id": project_id_schema(),
                        "title": { "type": ["string", "null"] },
                        "description": { "type": ["string", "null"] },
                        "link": { "type": ["string", "null"] },
                        "github_link": { "type": ["string", "null"] },
                        "image_url": { "type": ["string", "null"] },
                        "technologies": {
                            "type": ["array", "null"],
                            "items": { "type": "string" }
                        },
                        "featured": { "type": ["boolean", "null"] }
                    }
                }),
            ),
            Self::DeleteProject => (
                "Delete a project by id",
                json!({
                    "type": "object",
                    "required": ["project_id"],
                    "properties": { "project_id": project_id_schema() }
                }),
            ),
        };

        ToolDescriptor {
            name: self.as_str(),
            description,
            input_schema,
        }
    }
}

fn project_id_schema() -> Value {
    json!({
        "type": ["integer", "string"],
        "minimum": 0,
        "minLength": 1,
        "description": "Backend identifier of the project"
    })
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| UnknownTool(s.to_string()))
    }
}

/// MCP tool descriptor as advertised by `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

struct RegisteredTool {
    name: ToolName,
    descriptor: ToolDescriptor,
    validator: ArgumentValidator,
}

/// Immutable registry of every implemented tool plus the visibility set.
///
/// Built once at startup. Because the visibility set holds [`ToolName`]s it
/// can never name a tool without a handler.
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    public: BTreeSet<ToolName>,
}

impl ToolRegistry {
    pub fn new(public: BTreeSet<ToolName>) -> Result<Self, SchemaError> {
        let tools = ToolName::ALL
            .into_iter()
            .map(|name| -> Result<RegisteredTool, SchemaError> {
                let descriptor = name.descriptor();
                let validator = ArgumentValidator::compile(&descriptor.input_schema)?;
                Ok(RegisteredTool {
                    name,
                    descriptor,
                    validator,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { tools, public })
    }

    pub fn with_default_visibility() -> Result<Self, SchemaError> {
        Self::new(ToolName::default_public())
    }

    /// Visibility check on the raw name the caller sent.
    pub fn is_public(&self, name: &str) -> bool {
        self.public.iter().any(|tool| tool.as_str() == name)
    }

    /// Resolve a name to a registered tool, regardless of visibility.
    pub fn lookup(&self, name: &str) -> Option<ToolName> {
        self.tools
            .iter()
            .map(|t| t.name)
            .find(|tool| tool.as_str() == name)
    }

    /// Descriptors of public tools only, in registration order.
    pub fn public_descriptors(&self) -> Vec<&ToolDescriptor> {
        self.tools
            .iter()
            .filter(|t| self.public.contains(&t.name))
            .map(|t| &t.descriptor)
            .collect()
    }

    pub fn validator(&self, name: ToolName) -> Option<&ArgumentValidator> {
        self.tools.iter().find(|t| t.name == name).map(|t| &t.validator)
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools.iter().map(|t| t.name).collect::<Vec<_>>())
            .field("public", &self.public)
            .finish()
    }
}
