use serde::Serialize;

use crate::layout::{CompassSide, LayoutResult};

/// Machine-readable snapshot of a layout, mirroring the result maps in a
/// shape that is stable to serialize and easy to diff.
#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub from: String,
    pub to: String,
    pub points: Vec<[f32; 2]>,
    pub start_side: Option<String>,
    pub end_side: Option<String>,
}

fn side_name(side: Option<CompassSide>) -> Option<String> {
    side.map(|side| format!("{side:?}"))
}

impl LayoutDump {
    pub fn from_result(result: &LayoutResult) -> Self {
        let nodes = result
            .nodes
            .values()
            .map(|node| NodeDump {
                id: node.id.clone(),
                x: node.x,
                y: node.y,
                width: node.width,
                height: node.height,
            })
            .collect();
        let edges = result
            .edges
            .iter()
            .map(|edge| EdgeDump {
                from: edge.from.clone(),
                to: edge.to.clone(),
                points: edge
                    .points()
                    .iter()
                    .map(|point| [point.x, point.y])
                    .collect(),
                start_side: side_name(edge.start_side),
                end_side: side_name(edge.end_side),
            })
            .collect();
        Self { nodes, edges }
    }

    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Point, PositionedEdge, PositionedNode};

    #[test]
    fn dump_round_trips_through_json() {
        let mut result = LayoutResult::default();
        result.nodes.insert(
            "a".to_string(),
            PositionedNode {
                id: "a".to_string(),
                x: 1.0,
                y: 2.0,
                width: 30.0,
                height: 40.0,
            },
        );
        result.edges.push(PositionedEdge {
            from: "a".to_string(),
            to: "a".to_string(),
            start: Point::new(0.0, 0.0),
            end: Point::new(5.0, 5.0),
            bend_points: vec![Point::new(2.0, 3.0)],
            start_side: Some(CompassSide::East),
            end_side: None,
        });
        let json = LayoutDump::from_result(&result).to_json_string().unwrap();
        assert!(json.contains("\"East\""));
        assert!(json.contains("\"width\": 30.0"));
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["edges"][0]["points"].as_array().unwrap().len(), 3);
    }
}
