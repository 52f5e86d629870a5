use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Down,
    Up,
    Right,
    Left,
}

impl Direction {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "TD" | "TB" | "DOWN" => Some(Self::Down),
            "BT" | "UP" => Some(Self::Up),
            "LR" | "RIGHT" => Some(Self::Right),
            "RL" | "LEFT" => Some(Self::Left),
            _ => None,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Right | Self::Left)
    }
}

impl Default for Direction {
    fn default() -> Self {
        Self::Down
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeMetadata {
    /// Id of the enclosing cluster, if any.
    pub parent: Option<String>,
    /// Marks this node as a container for other nodes.
    pub is_subgraph: bool,
    /// Preferred flow direction inside this container.
    pub subgraph_direction: Option<Direction>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    /// Opaque caller data, carried through untouched.
    pub extra: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    /// Type tag used for dimension lookup.
    pub kind: String,
    pub metadata: NodeMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub label: Option<String>,
    /// Opaque style/template hints, ignored by layout.
    pub metadata: Option<serde_json::Value>,
}

/// Abstract input graph. Nodes are keyed for lookup; `node_order` preserves
/// declaration order so layout stays deterministic under identical input.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub nodes: BTreeMap<String, Node>,
    pub node_order: HashMap<String, usize>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: Node) {
        let next = self.node_order.len();
        self.node_order.entry(node.id.clone()).or_insert(next);
        self.nodes.insert(node.id.clone(), node);
    }

    pub fn add_edge(&mut self, from: &str, to: &str) {
        self.edges.push(Edge {
            from: from.to_string(),
            to: to.to_string(),
            label: None,
            metadata: None,
        });
    }

    /// Nodes in declaration order.
    pub fn ordered_nodes(&self) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self.nodes.values().collect();
        nodes.sort_by_key(|node| self.order_of(&node.id));
        nodes
    }

    pub fn order_of(&self, id: &str) -> usize {
        self.node_order.get(id).copied().unwrap_or(usize::MAX)
    }

    /// True when any node carries cluster metadata, which routes the graph
    /// through the compound layout path.
    pub fn has_clusters(&self) -> bool {
        self.nodes
            .values()
            .any(|node| node.metadata.is_subgraph || node.metadata.parent.is_some())
    }
}
