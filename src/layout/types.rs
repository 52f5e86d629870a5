use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle; top-left origin, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.width <= self.x + self.width
            && other.y + other.height <= self.y + self.height
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompassSide {
    North,
    East,
    South,
    West,
}

impl CompassSide {
    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedNode {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PositionedNode {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedEdge {
    pub from: String,
    pub to: String,
    pub start: Point,
    pub end: Point,
    pub bend_points: Vec<Point>,
    pub start_side: Option<CompassSide>,
    pub end_side: Option<CompassSide>,
}

impl PositionedEdge {
    /// Full polyline: start, bends, end.
    pub fn points(&self) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.bend_points.len() + 2);
        points.push(self.start);
        points.extend(self.bend_points.iter().copied());
        points.push(self.end);
        points
    }
}

/// One consistent top-left, y-down frame holding every node and cluster box
/// plus the routed edge set. Built fresh per layout call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub nodes: BTreeMap<String, PositionedNode>,
    pub edges: Vec<PositionedEdge>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeShape {
    Straight,
    Elbowed,
    Curved,
}

/// Resize-safe connector anchors: each end is a fraction of the owning node's
/// box in [0,1] on both axes, plus a suggested rendering shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeHint {
    pub start: (f32, f32),
    pub end: (f32, f32),
    pub shape: EdgeShape,
}
