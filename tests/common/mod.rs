use std::collections::{BTreeMap, HashMap};

use compound_layout::layout::RankedError;
use compound_layout::{
    Direction, Point, RankedGraph, RankedLayout, RankedLayouter, RoutedEdge,
};

/// Deterministic stand-in for the external rank-based primitive: longest-path
/// ranks, input-order tie-breaks, ranks stacked along the flow axis, edge
/// endpoints on the box border toward the peer's center. Enough contract for
/// the suite: determinism, direction, spacing, non-overlap.
pub struct StackedLayouter;

impl RankedLayouter for StackedLayouter {
    fn layout(&self, graph: &RankedGraph) -> Result<RankedLayout, RankedError> {
        let count = graph.nodes.len();
        let index: HashMap<&str, usize> = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.as_str(), i))
            .collect();

        // Longest-path ranking; the pass cap keeps cyclic inputs finite.
        let mut ranks = vec![0usize; count];
        for _ in 0..count.max(1) {
            let mut changed = false;
            for edge in &graph.edges {
                let (Some(&from), Some(&to)) =
                    (index.get(edge.from.as_str()), index.get(edge.to.as_str()))
                else {
                    continue;
                };
                if ranks[to] < ranks[from] + 1 {
                    ranks[to] = ranks[from] + 1;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        let rank_count = ranks.iter().copied().max().unwrap_or(0) + 1;
        let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); rank_count];
        for i in 0..count {
            buckets[ranks[i]].push(i);
        }

        let horizontal = graph.direction.is_horizontal();
        let main_size = |i: usize| match horizontal {
            true => graph.nodes[i].width,
            false => graph.nodes[i].height,
        };
        let cross_size = |i: usize| match horizontal {
            true => graph.nodes[i].height,
            false => graph.nodes[i].width,
        };

        // Flow-space placement: main axis advances per rank, cross axis per
        // node within a rank.
        let mut main = vec![0.0f32; count];
        let mut cross = vec![0.0f32; count];
        let mut main_offset = 0.0f32;
        let mut total_main = 0.0f32;
        for bucket in &buckets {
            let mut cross_offset = 0.0f32;
            let mut extent = 0.0f32;
            for &i in bucket {
                main[i] = main_offset;
                cross[i] = cross_offset;
                cross_offset += cross_size(i) + graph.node_spacing;
                extent = extent.max(main_size(i));
            }
            total_main = main_offset + extent;
            main_offset += extent + graph.rank_spacing;
        }

        let mut rects: HashMap<&str, (f32, f32, f32, f32)> = HashMap::new();
        for (i, node) in graph.nodes.iter().enumerate() {
            let (mut x, mut y) = match horizontal {
                true => (main[i], cross[i]),
                false => (cross[i], main[i]),
            };
            match graph.direction {
                Direction::Up => y = total_main - main[i] - node.height,
                Direction::Left => x = total_main - main[i] - node.width,
                Direction::Down | Direction::Right => {}
            }
            rects.insert(node.id.as_str(), (x, y, node.width, node.height));
        }

        let mut nodes: BTreeMap<String, Point> = BTreeMap::new();
        for node in &graph.nodes {
            let rect = rects[node.id.as_str()];
            nodes.insert(node.id.clone(), Point::new(rect.0, rect.1));
        }

        let mut edges = Vec::new();
        for edge in &graph.edges {
            let (Some(from), Some(to)) = (
                rects.get(edge.from.as_str()),
                rects.get(edge.to.as_str()),
            ) else {
                continue;
            };
            edges.push(RoutedEdge {
                from: edge.from.clone(),
                to: edge.to.clone(),
                start: border_point(*from, center(*to)),
                end: border_point(*to, center(*from)),
                bend_points: Vec::new(),
            });
        }

        Ok(RankedLayout { nodes, edges })
    }
}

fn center(rect: (f32, f32, f32, f32)) -> Point {
    Point::new(rect.0 + rect.2 * 0.5, rect.1 + rect.3 * 0.5)
}

fn border_point(rect: (f32, f32, f32, f32), toward: Point) -> Point {
    let c = center(rect);
    let dx = toward.x - c.x;
    let dy = toward.y - c.y;
    if dx == 0.0 && dy == 0.0 {
        return c;
    }
    let scale_x = match dx == 0.0 {
        true => f32::INFINITY,
        false => (rect.2 * 0.5) / dx.abs(),
    };
    let scale_y = match dy == 0.0 {
        true => f32::INFINITY,
        false => (rect.3 * 0.5) / dy.abs(),
    };
    let t = scale_x.min(scale_y);
    Point::new(c.x + dx * t, c.y + dy * t)
}

/// Primitive that always fails; used to check transparent error passthrough.
pub struct FailingLayouter;

impl RankedLayouter for FailingLayouter {
    fn layout(&self, _graph: &RankedGraph) -> Result<RankedLayout, RankedError> {
        Err("ranked primitive exploded".into())
    }
}
