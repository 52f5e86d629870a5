use super::types::{CompassSide, EdgeHint, EdgeShape, Point, PositionedEdge, PositionedNode, Rect};

/// Fraction of a segment's dominant extent under which its minor axis counts
/// as zero, i.e. the segment as axis-aligned.
const AXIS_TOLERANCE: f32 = 0.01;

/// Share of axis-aligned segments above which a multi-bend polyline is
/// suggested as elbowed rather than curved.
const ELBOW_SHARE: f32 = 0.8;

/// Which facet of `rect` the point sits nearest to. Ties resolve in the fixed
/// order left, right, top, bottom.
pub(crate) fn nearest_side(center: Point, rect: &Rect) -> CompassSide {
    let candidates = [
        ((center.x - rect.x).abs(), CompassSide::West),
        ((rect.x + rect.width - center.x).abs(), CompassSide::East),
        ((center.y - rect.y).abs(), CompassSide::North),
        ((rect.y + rect.height - center.y).abs(), CompassSide::South),
    ];
    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.0 < best.0 {
            best = *candidate;
        }
    }
    best.1
}

/// Canonical fractional anchor for a compass side.
pub(crate) fn side_anchor(side: CompassSide) -> (f32, f32) {
    match side {
        CompassSide::North => (0.5, 0.0),
        CompassSide::South => (0.5, 1.0),
        CompassSide::East => (1.0, 0.5),
        CompassSide::West => (0.0, 0.5),
    }
}

fn fraction_in(point: Point, rect: &Rect) -> (f32, f32) {
    let fx = match rect.width > 0.0 {
        true => ((point.x - rect.x) / rect.width).clamp(0.0, 1.0),
        false => 0.5,
    };
    let fy = match rect.height > 0.0 {
        true => ((point.y - rect.y) / rect.height).clamp(0.0, 1.0),
        false => 0.5,
    };
    (fx, fy)
}

fn axis_aligned(a: Point, b: Point) -> bool {
    let dx = (b.x - a.x).abs();
    let dy = (b.y - a.y).abs();
    dx.min(dy) <= AXIS_TOLERANCE * dx.max(dy).max(f32::EPSILON)
}

fn suggest_shape(edge: &PositionedEdge) -> EdgeShape {
    if let (Some(start), Some(end)) = (edge.start_side, edge.end_side) {
        return match start.opposite() == end {
            true => EdgeShape::Elbowed,
            false => EdgeShape::Curved,
        };
    }
    let points = edge.points();
    if points.len() == 2 {
        return match axis_aligned(points[0], points[1]) {
            true => EdgeShape::Straight,
            false => EdgeShape::Curved,
        };
    }
    let aligned = points
        .windows(2)
        .filter(|pair| axis_aligned(pair[0], pair[1]))
        .count();
    let share = aligned as f32 / (points.len() - 1) as f32;
    match share > ELBOW_SHARE {
        true => EdgeShape::Elbowed,
        false => EdgeShape::Curved,
    }
}

/// Converts a routed edge into resize-safe fractional anchors on its two
/// endpoint boxes, preferring an explicit compass-side hint over the raw
/// routed point. Shared by the clustered and flat layout paths.
pub fn compute_edge_hint(
    edge: &PositionedEdge,
    from: &PositionedNode,
    to: &PositionedNode,
) -> EdgeHint {
    let start = match edge.start_side {
        Some(side) => side_anchor(side),
        None => fraction_in(edge.start, &from.rect()),
    };
    let end = match edge.end_side {
        Some(side) => side_anchor(side),
        None => fraction_in(edge.end, &to.rect()),
    };
    EdgeHint {
        start,
        end,
        shape: suggest_shape(edge),
    }
}
