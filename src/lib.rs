pub mod config;
pub mod dimensions;
pub mod dump;
pub mod graph;
pub mod layout;

pub use config::{ClusterConfig, DEFAULT_SPACING, LayoutOptions, PackConfig};
pub use dimensions::{DEFAULT_NODE_SIZE, DimensionLookup, Size, TemplateDimensions};
pub use graph::{Direction, Edge, Graph, Node, NodeMetadata};
pub use layout::{
    CompassSide, EdgeHint, EdgeShape, LayoutError, LayoutResult, Point, PositionedEdge,
    PositionedNode, RankedEdge, RankedGraph, RankedLayout, RankedLayouter, RankedNode, Rect,
    RoutedEdge, TreeNode, compute_edge_hint, layout_graph, pack_forest,
};
