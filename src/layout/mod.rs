mod cluster;
mod cluster_tree;
mod error;
mod flat;
mod hints;
mod packer;
mod ranked;
pub(crate) mod types;

pub use cluster_tree::{Cluster, ClusterTree};
pub use error::{LayoutError, RankedError};
pub use hints::compute_edge_hint;
pub use packer::{GOLDEN_RATIO, TreeNode, pack_forest};
pub use ranked::{RankedEdge, RankedGraph, RankedLayout, RankedLayouter, RankedNode, RoutedEdge};
pub use types::*;

use crate::config::LayoutOptions;
use crate::dimensions::{DEFAULT_NODE_SIZE, DimensionLookup, Size};
use crate::graph::{Graph, Node};

use cluster::ClusterEngine;
use flat::compute_flat_layout;

/// Turns the abstract graph into concrete geometry. Graphs whose nodes carry
/// cluster metadata run the recursive compound engine; everything else takes
/// the flat path. Both invoke the ranked primitive and dimension lookup the
/// caller supplies.
pub fn layout_graph(
    graph: &Graph,
    options: &LayoutOptions,
    ranked: &dyn RankedLayouter,
    dims: &dyn DimensionLookup,
) -> Result<LayoutResult, LayoutError> {
    if graph.has_clusters() {
        ClusterEngine::new(graph, options, ranked, dims)?.run()
    } else {
        compute_flat_layout(graph, options, ranked, dims)
    }
}

/// Natural size of a node: explicit overrides first, then the template table,
/// then the baseline.
pub(crate) fn node_size(node: &Node, dims: &dyn DimensionLookup) -> Size {
    let template = dims.size_of(&node.kind).unwrap_or(DEFAULT_NODE_SIZE);
    Size::new(
        node.metadata.width.unwrap_or(template.width),
        node.metadata.height.unwrap_or(template.height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::TemplateDimensions;
    use crate::graph::NodeMetadata;

    #[test]
    fn node_size_override_chain() {
        let dims = TemplateDimensions::builtin();
        let mut node = Node {
            id: "a".to_string(),
            label: "A".to_string(),
            kind: "decision".to_string(),
            metadata: NodeMetadata::default(),
        };
        assert_eq!(node_size(&node, &dims), Size::new(120.0, 120.0));
        node.metadata.width = Some(90.0);
        assert_eq!(node_size(&node, &dims), Size::new(90.0, 120.0));
        node.kind = "unheard-of".to_string();
        node.metadata.width = None;
        assert_eq!(node_size(&node, &dims), DEFAULT_NODE_SIZE);
    }
}
