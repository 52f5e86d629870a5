use std::collections::BTreeMap;

use crate::graph::Direction;

use super::error::RankedError;
use super::types::Point;

/// Node as the flat primitive sees it: a sized, opaque box.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedNode {
    pub id: String,
    pub width: f32,
    pub height: f32,
}

/// Directed, weighted edge. Heavier edges are straightened preferentially by
/// conforming implementations.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEdge {
    pub from: String,
    pub to: String,
    pub weight: f32,
}

/// One flat layout request. The primitive has no notion of nesting; clusters
/// reach it only as proxy-sized [`RankedNode`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedGraph {
    pub nodes: Vec<RankedNode>,
    pub edges: Vec<RankedEdge>,
    pub direction: Direction,
    /// Separation between nodes sharing a rank.
    pub node_spacing: f32,
    /// Separation between ranks.
    pub rank_spacing: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoutedEdge {
    pub from: String,
    pub to: String,
    pub start: Point,
    pub end: Point,
    pub bend_points: Vec<Point>,
}

/// Absolute top-left positions for every requested node plus one routed
/// polyline per edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedLayout {
    pub nodes: BTreeMap<String, Point>,
    pub edges: Vec<RoutedEdge>,
}

/// The external rank-based layout primitive. Implementations must be
/// deterministic for identical input order and must return non-overlapping
/// positions; their internal ranking/ordering/coordinate assignment is of no
/// concern here.
pub trait RankedLayouter {
    fn layout(&self, graph: &RankedGraph) -> Result<RankedLayout, RankedError>;
}
