//! Grid Layout
//!
//! Resolves column tracks (px, percent, fr, auto) against the content
//! width and places children row-major. Row heights follow the tallest
//! cell of each row.

use kir_tree::{ComponentTree, GridTrack, GridTrackKind, NodeId};

use crate::constraints::Constraints;
use crate::dispatch::layout_node;

fn resolve_tracks(tracks: &[GridTrack], available: f32, gap: f32) -> Vec<f32> {
    if tracks.is_empty() {
        return vec![available];
    }
    let total_gap = gap * (tracks.len().saturating_sub(1)) as f32;
    let usable = (available - total_gap).max(0.0);

    let mut fixed = 0.0_f32;
    let mut fr_total = 0.0_f32;
    let mut auto_count = 0usize;
    for t in tracks {
        match t.kind {
            GridTrackKind::Px => fixed += t.value,
            GridTrackKind::Percent => fixed += usable * t.value / 100.0,
            GridTrackKind::Fr => fr_total += t.value,
            GridTrackKind::Auto => auto_count += 1,
        }
    }

    let remainder = (usable - fixed).max(0.0);
    // Auto tracks share the remainder as 1fr each when no fr is present.
    let fr_unit = if fr_total > 0.0 {
        remainder / fr_total
    } else if auto_count > 0 {
        remainder / auto_count as f32
    } else {
        0.0
    };

    tracks
        .iter()
        .map(|t| match t.kind {
            GridTrackKind::Px => t.value,
            GridTrackKind::Percent => usable * t.value / 100.0,
            GridTrackKind::Fr => fr_unit * t.value,
            GridTrackKind::Auto => {
                if fr_total > 0.0 {
                    0.0
                } else {
                    fr_unit
                }
            }
        })
        .collect()
}

pub fn layout_grid(
    tree: &mut ComponentTree,
    id: NodeId,
    constraints: Constraints,
    parent_x: f32,
    parent_y: f32,
) {
    let Some(node) = tree.get(id) else { return };
    let children = node.children.clone();
    let padding = node.style.as_deref().map(|s| s.padding).unwrap_or_default();
    let grid = node.layout.as_deref().map(|l| l.grid.clone()).unwrap_or_default();

    let width = node
        .style
        .as_deref()
        .and_then(|s| s.width.resolve(constraints.max_width))
        .unwrap_or(constraints.max_width);
    let content_w = (width - padding.horizontal()).max(0.0);

    let columns = resolve_tracks(&grid.columns, content_w, grid.column_gap);
    let column_count = columns.len().max(1);

    let content_x = parent_x + padding.left;
    let content_y = parent_y + padding.top;

    let mut row_y = content_y;
    let mut total_height = 0.0_f32;
    for (row_index, row) in children.chunks(column_count).enumerate() {
        if row_index > 0 {
            row_y += grid.row_gap;
            total_height += grid.row_gap;
        }

        let mut cell_x = content_x;
        let mut row_height = 0.0_f32;
        for (col, child) in row.iter().enumerate() {
            let cell_w = columns.get(col).copied().unwrap_or(0.0);
            layout_node(tree, *child, Constraints::loose(cell_w, 0.0), cell_x, row_y);
            if let Some(c) = tree.get(*child) {
                row_height = row_height.max(c.layout_state.rect.height);
            }
            cell_x += cell_w + grid.column_gap;
        }
        row_y += row_height;
        total_height += row_height;
    }

    let height = node_height(tree, id, constraints).unwrap_or(total_height + padding.vertical());

    if let Some(node) = tree.get_mut(id) {
        node.layout_state.rect.x = parent_x;
        node.layout_state.rect.y = parent_y;
        node.layout_state.rect.width = width;
        node.layout_state.rect.height = height;
        node.layout_state.layout_valid = true;
        node.layout_state.dirty = false;
    }
}

fn node_height(tree: &ComponentTree, id: NodeId, constraints: Constraints) -> Option<f32> {
    tree.get(id)
        .and_then(|n| n.style.as_deref())
        .and_then(|s| s.height.resolve(constraints.max_height))
}
