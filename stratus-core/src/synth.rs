//! Synthesis hand-off.
//!
//! Serializes a finished resource graph into the declarative template consumed
//! by the external provisioning engine. The template format is owned by the
//! engine; this side only guarantees it is deterministic and complete.

use crate::error::{Result, StackError};
use crate::graph::{Resource, ResourceGraph};
use serde::Serialize;

/// Engine-facing rendering of one stack.
#[derive(Debug, Clone, Serialize)]
pub struct Template {
    /// Stack name
    pub stack: String,

    /// Target deployment region
    pub region: String,

    /// Resources in construction order
    pub resources: Vec<TemplateResource>,
}

/// One resource entry in the template.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateResource {
    /// Logical id
    pub id: String,

    /// Type tag and properties
    #[serde(flatten)]
    pub resource: Resource,

    /// Logical ids this resource must be created after
    pub depends_on: Vec<String>,
}

/// Convert a finished graph into the engine-facing template.
pub fn synthesize(graph: &ResourceGraph) -> Template {
    let resources = graph
        .nodes()
        .iter()
        .map(|node| TemplateResource {
            id: node.id.to_string(),
            resource: node.resource.clone(),
            depends_on: graph.depends_on(&node.id).iter().map(|d| d.to_string()).collect(),
        })
        .collect();

    Template {
        stack: graph.stack_name().to_string(),
        region: graph.region().to_string(),
        resources,
    }
}

impl Template {
    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| StackError::TemplateSerialize { source: e })
    }

    /// Render as compact JSON.
    pub fn to_compact_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| StackError::TemplateSerialize { source: e })
    }
}
