use crate::schema::FlowDirection;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a node the way the renderer looks nodes up: leaves by a bare
/// integer, category/overflow/hub nodes by a bare string. The untagged
/// representation keeps the wire format identical to both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Leaf(usize),
    Name(String),
}

impl NodeId {
    pub fn name(label: &str) -> Self {
        Self::Name(label.to_string())
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(index) => write!(f, "{}", index),
            Self::Name(label) => write!(f, "{}", label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Wire name `name` is the renderer's id field.
    #[serde(rename = "name")]
    pub id: NodeId,

    pub title: String,

    pub category: String,

    /// Raw signed amount for leaves, 0 for category/hub/overflow nodes.
    /// Serialized as `value` per the renderer contract.
    #[serde(rename = "value")]
    pub size: f64,

    /// Routing metadata only; the renderer never sees it.
    #[serde(skip)]
    pub direction: FlowDirection,
}

impl Node {
    pub fn leaf(index: usize, title: &str, category: &str, size: f64, direction: FlowDirection) -> Self {
        Self {
            id: NodeId::Leaf(index),
            title: title.to_string(),
            category: category.to_string(),
            size,
            direction,
        }
    }

    /// A grouping node: id, title, and category all carry the same label,
    /// and size is 0 because grouping nodes are pass-through.
    pub fn grouping(label: &str, direction: FlowDirection) -> Self {
        Self {
            id: NodeId::name(label),
            title: label.to_string(),
            category: label.to_string(),
            size: 0.0,
            direction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,

    /// Always the magnitude of the originating record's amount; sign is
    /// consumed entirely by direction choice. Serialized as `value`.
    #[serde(rename = "value")]
    pub weight: f64,
}

/// The assembled graph handed to the external renderer: every edge endpoint
/// resolves to a declared node id, and the renderer owns all layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowGraph {
    pub nodes: Vec<Node>,
    pub links: Vec<Edge>,
}

impl FlowGraph {
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == *id)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
