//! Workflow graph model
//!
//! Node/edge definitions for platform workflows. This is an independent
//! data model from the table catalog: nodes are polymorphic over a closed
//! set of kinds, discriminated by the `type` field on the wire.

pub mod validation;

pub use validation::validate_workflow;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of workflow node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowNodeType {
    Trigger,
    Process,
    Decision,
    Branch,
    Join,
    Completion,
}

/// Payload of a `Trigger` node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerProps {
    /// Event that starts the workflow (e.g. "manual", "api")
    pub event_type: String,
}

/// Payload of a `Process` node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Reference to the handler implementing this step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler_ref: Option<String>,
}

/// Payload of nodes that carry no configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyProps {}

/// A workflow node: closed sum over the node kinds, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WorkflowNode {
    #[serde(rename = "TRIGGER")]
    Trigger {
        id: String,
        label: String,
        properties: TriggerProps,
    },
    #[serde(rename = "PROCESS")]
    Process {
        id: String,
        label: String,
        #[serde(default)]
        properties: ProcessProps,
    },
    #[serde(rename = "DECISION")]
    Decision {
        id: String,
        label: String,
        #[serde(default)]
        properties: EmptyProps,
    },
    #[serde(rename = "BRANCH")]
    Branch {
        id: String,
        label: String,
        #[serde(default)]
        properties: EmptyProps,
    },
    #[serde(rename = "JOIN")]
    Join {
        id: String,
        label: String,
        #[serde(default)]
        properties: EmptyProps,
    },
    #[serde(rename = "COMPLETION")]
    Completion {
        id: String,
        label: String,
        #[serde(default)]
        properties: EmptyProps,
    },
}

impl WorkflowNode {
    pub fn id(&self) -> &str {
        match self {
            WorkflowNode::Trigger { id, .. }
            | WorkflowNode::Process { id, .. }
            | WorkflowNode::Decision { id, .. }
            | WorkflowNode::Branch { id, .. }
            | WorkflowNode::Join { id, .. }
            | WorkflowNode::Completion { id, .. } => id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            WorkflowNode::Trigger { label, .. }
            | WorkflowNode::Process { label, .. }
            | WorkflowNode::Decision { label, .. }
            | WorkflowNode::Branch { label, .. }
            | WorkflowNode::Join { label, .. }
            | WorkflowNode::Completion { label, .. } => label,
        }
    }

    pub fn node_type(&self) -> WorkflowNodeType {
        match self {
            WorkflowNode::Trigger { .. } => WorkflowNodeType::Trigger,
            WorkflowNode::Process { .. } => WorkflowNodeType::Process,
            WorkflowNode::Decision { .. } => WorkflowNodeType::Decision,
            WorkflowNode::Branch { .. } => WorkflowNodeType::Branch,
            WorkflowNode::Join { .. } => WorkflowNodeType::Join,
            WorkflowNode::Completion { .. } => WorkflowNodeType::Completion,
        }
    }
}

/// A directed connection between two workflow nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowEdge {
    /// ID of the source node
    pub source_id: String,

    /// ID of the target node
    pub target_id: String,

    /// Logic expression for Decision outputs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl WorkflowEdge {
    pub fn new(source_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            condition: None,
        }
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }
}

/// A complete workflow: nodes plus the edges connecting them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    /// Unique identifier
    pub id: Uuid,

    /// Human-readable name
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Traceability link to the originating use case
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_case_id: Option<String>,

    pub nodes: Vec<WorkflowNode>,

    #[serde(default)]
    pub edges: Vec<WorkflowEdge>,
}
