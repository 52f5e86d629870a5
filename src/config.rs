use serde::{Deserialize, Serialize};

use crate::graph::Direction;

/// Baseline for any spacing the caller leaves unset.
pub const DEFAULT_SPACING: f32 = 60.0;

/// Caller-facing layout options. `spacing` is a shared fallback applied to
/// whichever of the two specific spacings is unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutOptions {
    pub direction: Direction,
    pub node_spacing: Option<f32>,
    pub rank_spacing: Option<f32>,
    pub spacing: Option<f32>,
}

impl LayoutOptions {
    pub fn node_spacing(&self) -> f32 {
        self.node_spacing.or(self.spacing).unwrap_or(DEFAULT_SPACING)
    }

    pub fn rank_spacing(&self) -> f32 {
        self.rank_spacing.or(self.spacing).unwrap_or(DEFAULT_SPACING)
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            direction: Direction::Down,
            node_spacing: None,
            rank_spacing: None,
            spacing: None,
        }
    }
}

/// Chrome around a cluster's local layout: uniform padding, an extra band at
/// the top for the cluster label, and a floor so empty clusters stay legible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    pub padding: f32,
    pub label_band: f32,
    pub min_width: f32,
    pub min_height: f32,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            padding: 40.0,
            label_band: 30.0,
            min_width: 200.0,
            min_height: 120.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackConfig {
    /// Horizontal inset of a parent's packing area.
    pub margin_x: f32,
    /// Vertical inset of a parent's packing area.
    pub margin_y: f32,
    /// Gap between grid cells.
    pub gap: f32,
    /// Vertical gap between stacked root containers.
    pub root_gap: f32,
    /// Width assumed for a root with no template size; height follows from
    /// the golden ratio.
    pub default_root_width: f32,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            margin_x: 30.0,
            margin_y: 40.0,
            gap: 20.0,
            root_gap: 60.0,
            default_root_width: 400.0,
        }
    }
}
