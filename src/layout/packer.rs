use crate::config::PackConfig;
use crate::dimensions::{DimensionLookup, Size};

use super::types::{LayoutResult, PositionedNode, Rect};

pub const GOLDEN_RATIO: f32 = 1.618_034;

/// Node of a pure-containment forest: children are embedded directly, there
/// is no flat edge list.
#[derive(Debug, Clone, Default)]
pub struct TreeNode {
    pub id: String,
    pub label: String,
    pub kind: String,
    /// Overrides the label as the sibling sort key when present.
    pub sort_key: Option<String>,
    pub children: Vec<TreeNode>,
}

/// Recursive grid packer for parent-contains-child diagrams. Roots stack
/// vertically; each level packs its children into a near-square grid inside
/// the parent's margin-reduced interior. Output carries node boxes only.
pub fn pack_forest(
    roots: &[TreeNode],
    config: &PackConfig,
    dims: &dyn DimensionLookup,
) -> LayoutResult {
    let mut result = LayoutResult::default();
    let mut y = 0.0f32;
    for root in roots {
        let size = dims.size_of(&root.kind).unwrap_or(Size::new(
            config.default_root_width,
            config.default_root_width / GOLDEN_RATIO,
        ));
        let rect = Rect::new(0.0, y, size.width, size.height);
        insert_box(&mut result, &root.id, rect);
        pack_children(root, rect, config, dims, &mut result);
        y += size.height + config.root_gap;
    }
    result
}

fn pack_children(
    parent: &TreeNode,
    parent_rect: Rect,
    config: &PackConfig,
    dims: &dyn DimensionLookup,
    result: &mut LayoutResult,
) {
    if parent.children.is_empty() {
        return;
    }
    let mut order: Vec<&TreeNode> = parent.children.iter().collect();
    order.sort_by(|a, b| sort_key(a).cmp(sort_key(b)));

    let count = order.len();
    let columns = ((count as f32 * GOLDEN_RATIO).sqrt().ceil() as usize).max(1);
    let rows = count.div_ceil(columns);

    let inner = Rect::new(
        parent_rect.x + config.margin_x,
        parent_rect.y + config.margin_y,
        (parent_rect.width - config.margin_x * 2.0).max(0.0),
        (parent_rect.height - config.margin_y * 2.0).max(0.0),
    );
    let cell_width = inner.width / columns as f32;
    let cell_height = inner.height / rows as f32;
    let avail_width = (cell_width - config.gap).max(0.0);
    let avail_height = (cell_height - config.gap).max(0.0);

    for (index, child) in order.iter().enumerate() {
        let column = index % columns;
        let row = index / columns;
        let natural = dims.size_of(&child.kind);
        // Clamp to the natural template size so small shapes are not
        // stretched to fill their cell.
        let width = match natural {
            Some(size) => avail_width.min(size.width),
            None => avail_width,
        };
        let height = match natural {
            Some(size) => avail_height.min(size.height),
            None => avail_height,
        };
        let center_x = inner.x + cell_width * (column as f32 + 0.5);
        let center_y = inner.y + cell_height * (row as f32 + 0.5);
        let rect = Rect::new(center_x - width * 0.5, center_y - height * 0.5, width, height);
        insert_box(result, &child.id, rect);
        pack_children(child, rect, config, dims, result);
    }
}

fn sort_key(node: &TreeNode) -> &str {
    node.sort_key.as_deref().unwrap_or(&node.label)
}

fn insert_box(result: &mut LayoutResult, id: &str, rect: Rect) {
    result.nodes.insert(
        id.to_string(),
        PositionedNode {
            id: id.to_string(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        },
    );
}
