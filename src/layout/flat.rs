use crate::config::LayoutOptions;
use crate::dimensions::DimensionLookup;
use crate::graph::Graph;

use super::error::LayoutError;
use super::node_size;
use super::ranked::{RankedEdge, RankedGraph, RankedLayouter, RankedNode};
use super::types::{LayoutResult, PositionedEdge, PositionedNode};

/// Unclustered path: one primitive call over the whole graph. Edges whose
/// endpoints are unknown are dropped, matching the clustered path.
pub(super) fn compute_flat_layout(
    graph: &Graph,
    options: &LayoutOptions,
    ranked: &dyn RankedLayouter,
    dims: &dyn DimensionLookup,
) -> Result<LayoutResult, LayoutError> {
    let mut nodes = Vec::new();
    for node in graph.ordered_nodes() {
        let size = node_size(node, dims);
        nodes.push(RankedNode {
            id: node.id.clone(),
            width: size.width,
            height: size.height,
        });
    }
    let edges = graph
        .edges
        .iter()
        .filter(|edge| graph.nodes.contains_key(&edge.from) && graph.nodes.contains_key(&edge.to))
        .map(|edge| RankedEdge {
            from: edge.from.clone(),
            to: edge.to.clone(),
            weight: 1.0,
        })
        .collect();

    let request = RankedGraph {
        nodes: nodes.clone(),
        edges,
        direction: options.direction,
        node_spacing: options.node_spacing(),
        rank_spacing: options.rank_spacing(),
    };
    let layout = ranked.layout(&request)?;

    let mut result = LayoutResult::default();
    for node in &nodes {
        if let Some(position) = layout.nodes.get(&node.id) {
            result.nodes.insert(
                node.id.clone(),
                PositionedNode {
                    id: node.id.clone(),
                    x: position.x,
                    y: position.y,
                    width: node.width,
                    height: node.height,
                },
            );
        }
    }
    for edge in &layout.edges {
        result.edges.push(PositionedEdge {
            from: edge.from.clone(),
            to: edge.to.clone(),
            start: edge.start,
            end: edge.end,
            bend_points: edge.bend_points.clone(),
            start_side: None,
            end_side: None,
        });
    }
    Ok(result)
}
