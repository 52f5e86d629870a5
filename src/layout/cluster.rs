use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::{ClusterConfig, LayoutOptions};
use crate::dimensions::{DimensionLookup, Size};
use crate::graph::{Direction, Graph};

use super::error::LayoutError;
use super::hints::nearest_side;
use super::node_size;
use super::ranked::{RankedEdge, RankedGraph, RankedLayout, RankedLayouter, RankedNode, RoutedEdge};
use super::cluster_tree::ClusterTree;
use super::types::{CompassSide, LayoutResult, Point, PositionedEdge, PositionedNode, Rect};

/// Per-cluster results of the bottom-up pass, read back by the top-down pass.
/// Explicit so the two passes never smuggle state through the output map.
struct ClusterScratch {
    size: Size,
    /// Content-relative rects of direct leaves and child-cluster proxies,
    /// normalized to a (0,0) top-left.
    local: BTreeMap<String, Rect>,
}

pub(super) struct ClusterEngine<'a> {
    graph: &'a Graph,
    tree: ClusterTree,
    options: &'a LayoutOptions,
    cluster: ClusterConfig,
    ranked: &'a dyn RankedLayouter,
    dims: &'a dyn DimensionLookup,
    scratch: HashMap<String, ClusterScratch>,
}

impl<'a> ClusterEngine<'a> {
    pub(super) fn new(
        graph: &'a Graph,
        options: &'a LayoutOptions,
        ranked: &'a dyn RankedLayouter,
        dims: &'a dyn DimensionLookup,
    ) -> Result<Self, LayoutError> {
        Ok(Self {
            graph,
            tree: ClusterTree::build(graph)?,
            options,
            cluster: ClusterConfig::default(),
            ranked,
            dims,
            scratch: HashMap::new(),
        })
    }

    pub(super) fn run(mut self) -> Result<LayoutResult, LayoutError> {
        let roots: Vec<String> = self.tree.roots.clone();
        for root in &roots {
            self.size_cluster(root, self.options.direction)?;
        }

        let outer = self.outer_graph(&roots);
        let outer_layout = self.ranked.layout(&outer)?;

        let mut result = LayoutResult::default();
        for id in &self.tree.loose {
            let (Some(position), Some(node)) =
                (outer_layout.nodes.get(id), self.graph.nodes.get(id))
            else {
                continue;
            };
            let size = node_size(node, self.dims);
            result
                .nodes
                .insert(id.clone(), positioned(id, position.x, position.y, size));
        }
        for root in &roots {
            let Some(position) = outer_layout.nodes.get(root) else {
                continue;
            };
            let origin = Point::new(position.x, position.y);
            self.place_cluster(root, origin, &mut result);
        }

        self.compose_edges(&outer_layout, &mut result);
        Ok(result)
    }

    /// Bottom-up pass: post-order over the cluster tree, one primitive call
    /// per cluster. Children are sized first because the parent's local graph
    /// needs their proxy sizes.
    fn size_cluster(&mut self, id: &str, inherited: Direction) -> Result<Size, LayoutError> {
        let direction = self.effective_direction(id, inherited);
        let children = self
            .tree
            .clusters
            .get(id)
            .map(|cluster| cluster.children.clone())
            .unwrap_or_default();
        for child in &children {
            self.size_cluster(child, direction)?;
        }

        let local_nodes = self.local_nodes(id, &children);
        let local_edges = self.collapsed_edges_within(id);
        let mut local: BTreeMap<String, Rect> = BTreeMap::new();

        if !local_nodes.is_empty() {
            let request = RankedGraph {
                nodes: local_nodes.clone(),
                edges: local_edges,
                direction,
                node_spacing: self.options.node_spacing(),
                rank_spacing: self.options.rank_spacing(),
            };
            let layout = self.ranked.layout(&request)?;
            for node in &local_nodes {
                if let Some(position) = layout.nodes.get(&node.id) {
                    local.insert(
                        node.id.clone(),
                        Rect::new(position.x, position.y, node.width, node.height),
                    );
                }
            }
            normalize_to_origin(&mut local);
        }

        let content = bounding_size(&local);
        let pad = self.cluster.padding;
        let size = Size::new(
            (content.width + pad * 2.0).max(self.cluster.min_width),
            (content.height + pad * 2.0 + self.cluster.label_band).max(self.cluster.min_height),
        );
        self.scratch
            .insert(id.to_string(), ClusterScratch { size, local });
        Ok(size)
    }

    /// Top-down pass: translate cached local rects by the cluster's absolute
    /// origin, then recurse into child clusters at their new positions.
    fn place_cluster(&self, id: &str, origin: Point, result: &mut LayoutResult) {
        let Some(scratch) = self.scratch.get(id) else {
            return;
        };
        result.nodes.insert(
            id.to_string(),
            positioned(id, origin.x, origin.y, scratch.size),
        );

        let content = Point::new(
            origin.x + self.cluster.padding,
            origin.y + self.cluster.padding + self.cluster.label_band,
        );
        let children = self
            .tree
            .clusters
            .get(id)
            .map(|cluster| cluster.children.clone())
            .unwrap_or_default();

        for (member, rect) in &scratch.local {
            let absolute = Point::new(content.x + rect.x, content.y + rect.y);
            if children.iter().any(|child| child == member) {
                self.place_cluster(member, absolute, result);
            } else {
                result.nodes.insert(
                    member.clone(),
                    positioned(member, absolute.x, absolute.y, Size::new(rect.width, rect.height)),
                );
            }
        }
    }

    /// Cross-boundary edges force the ancestor direction so routing through
    /// the boundary stays visually consistent; otherwise the cluster's own
    /// declared direction wins, falling back to the caller's.
    fn effective_direction(&self, id: &str, inherited: Direction) -> Direction {
        let crosses_boundary = self.graph.edges.iter().any(|edge| {
            self.tree.is_descendant_of(&edge.from, id) != self.tree.is_descendant_of(&edge.to, id)
        });
        if crosses_boundary {
            return inherited;
        }
        self.graph
            .nodes
            .get(id)
            .and_then(|node| node.metadata.subgraph_direction)
            .unwrap_or(self.options.direction)
    }

    /// Direct leaves at their real size plus one proxy per child cluster at
    /// its computed size.
    fn local_nodes(&self, id: &str, children: &[String]) -> Vec<RankedNode> {
        let mut nodes = Vec::new();
        if let Some(cluster) = self.tree.clusters.get(id) {
            for member in &cluster.nodes {
                if let Some(node) = self.graph.nodes.get(member) {
                    let size = node_size(node, self.dims);
                    nodes.push(RankedNode {
                        id: member.clone(),
                        width: size.width,
                        height: size.height,
                    });
                }
            }
        }
        for child in children {
            if let Some(scratch) = self.scratch.get(child) {
                nodes.push(RankedNode {
                    id: child.clone(),
                    width: scratch.size.width,
                    height: scratch.size.height,
                });
            }
        }
        nodes
    }

    /// Original edges internal to this cluster, each endpoint remapped to its
    /// immediate representative. Edges collapsing onto one representative are
    /// already resolved deeper down; parallel collapsed edges merge, with the
    /// multiplicity as weight so busy cluster pairs get straightened.
    fn collapsed_edges_within(&self, id: &str) -> Vec<RankedEdge> {
        let mut order: Vec<(String, String)> = Vec::new();
        let mut weights: HashMap<(String, String), f32> = HashMap::new();
        for edge in &self.graph.edges {
            let Some(from) = self.tree.representative_in(id, &edge.from) else {
                continue;
            };
            let Some(to) = self.tree.representative_in(id, &edge.to) else {
                continue;
            };
            if from == to {
                continue;
            }
            let key = (from, to);
            if !weights.contains_key(&key) {
                order.push(key.clone());
            }
            *weights.entry(key).or_insert(0.0) += 1.0;
        }
        order
            .into_iter()
            .map(|key| {
                let weight = weights[&key];
                RankedEdge {
                    from: key.0,
                    to: key.1,
                    weight,
                }
            })
            .collect()
    }

    /// Synthetic outer graph: root clusters as proxies plus loose nodes, with
    /// every original edge collapsed to root-level endpoints. Edges that
    /// collapse into one root are excluded; the recursive layout already
    /// resolved them.
    fn outer_graph(&self, roots: &[String]) -> RankedGraph {
        let mut nodes = Vec::new();
        for root in roots {
            if let Some(scratch) = self.scratch.get(root) {
                nodes.push(RankedNode {
                    id: root.clone(),
                    width: scratch.size.width,
                    height: scratch.size.height,
                });
            }
        }
        for id in &self.tree.loose {
            if let Some(node) = self.graph.nodes.get(id) {
                let size = node_size(node, self.dims);
                nodes.push(RankedNode {
                    id: id.clone(),
                    width: size.width,
                    height: size.height,
                });
            }
        }

        let live: HashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();
        let mut order: Vec<(String, String)> = Vec::new();
        let mut weights: HashMap<(String, String), f32> = HashMap::new();
        for edge in &self.graph.edges {
            let from = self.tree.root_item_of(&edge.from);
            let to = self.tree.root_item_of(&edge.to);
            if from == to || !live.contains(from.as_str()) || !live.contains(to.as_str()) {
                continue;
            }
            let key = (from, to);
            if !weights.contains_key(&key) {
                order.push(key.clone());
            }
            *weights.entry(key).or_insert(0.0) += 1.0;
        }
        let edges = order
            .into_iter()
            .map(|key| {
                let weight = weights[&key];
                RankedEdge {
                    from: key.0,
                    to: key.1,
                    weight,
                }
            })
            .collect();

        RankedGraph {
            nodes,
            edges,
            direction: self.options.direction,
            node_spacing: self.options.node_spacing(),
            rank_spacing: self.options.rank_spacing(),
        }
    }

    /// Final edge set. Edges inside one root run straight between final
    /// centers; edges between different roots reuse the outer polyline
    /// verbatim, with compass-side hints for endpoints that resolved through
    /// a cluster proxy. Endpoints that fail to resolve are dropped.
    fn compose_edges(&self, outer: &RankedLayout, result: &mut LayoutResult) {
        let mut routed: HashMap<(&str, &str), &RoutedEdge> = HashMap::new();
        for edge in &outer.edges {
            routed
                .entry((edge.from.as_str(), edge.to.as_str()))
                .or_insert(edge);
        }

        let mut edges = Vec::new();
        for edge in &self.graph.edges {
            if edge.from == edge.to {
                continue;
            }
            let (Some(from_node), Some(to_node)) =
                (result.nodes.get(&edge.from), result.nodes.get(&edge.to))
            else {
                continue;
            };
            let from_root = self.tree.root_item_of(&edge.from);
            let to_root = self.tree.root_item_of(&edge.to);

            if from_root == to_root {
                let start = from_node.rect().center();
                let end = to_node.rect().center();
                edges.push(PositionedEdge {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    start,
                    end,
                    bend_points: Vec::new(),
                    start_side: None,
                    end_side: None,
                });
                continue;
            }

            let Some(polyline) = routed.get(&(from_root.as_str(), to_root.as_str())) else {
                continue;
            };
            let start_side = match from_root != edge.from {
                true => self.proxy_side(&from_root, from_node, result),
                false => None,
            };
            let end_side = match to_root != edge.to {
                true => self.proxy_side(&to_root, to_node, result),
                false => None,
            };
            edges.push(PositionedEdge {
                from: edge.from.clone(),
                to: edge.to.clone(),
                start: polyline.start,
                end: polyline.end,
                bend_points: polyline.bend_points.clone(),
                start_side,
                end_side,
            });
        }
        result.edges = edges;
    }

    /// Side of the collapsed cluster's box the member sits nearest to, so the
    /// connector touches the right facet instead of the centroid.
    fn proxy_side(
        &self,
        root: &str,
        member: &PositionedNode,
        result: &LayoutResult,
    ) -> Option<CompassSide> {
        let cluster = result.nodes.get(root)?;
        Some(nearest_side(member.rect().center(), &cluster.rect()))
    }
}

fn positioned(id: &str, x: f32, y: f32, size: Size) -> PositionedNode {
    PositionedNode {
        id: id.to_string(),
        x,
        y,
        width: size.width,
        height: size.height,
    }
}

/// Shift all rects so the bounding box's top-left lands on (0,0).
fn normalize_to_origin(rects: &mut BTreeMap<String, Rect>) {
    let min_x = rects
        .values()
        .map(|rect| rect.x)
        .fold(f32::INFINITY, f32::min);
    let min_y = rects
        .values()
        .map(|rect| rect.y)
        .fold(f32::INFINITY, f32::min);
    if !min_x.is_finite() || !min_y.is_finite() {
        return;
    }
    for rect in rects.values_mut() {
        rect.x -= min_x;
        rect.y -= min_y;
    }
}

fn bounding_size(rects: &BTreeMap<String, Rect>) -> Size {
    let mut width = 0.0f32;
    let mut height = 0.0f32;
    for rect in rects.values() {
        width = width.max(rect.x + rect.width);
        height = height.max(rect.y + rect.height);
    }
    Size::new(width, height)
}
