//! Layout Dispatch
//!
//! Per-kind layout selection via exhaustive match on the component kind.
//! Kinds without a dedicated pass fall back to a generic container layout
//! that fills the available window.

use kir_tree::{ComponentKind, ComponentTree, FlexDirection, LayoutMode, NodeId, PositionMode};

use crate::constraints::Constraints;
use crate::flexbox::{layout_center, layout_flexbox, Axis};
use crate::grid::layout_grid;
use crate::leaf::layout_leaf;
use crate::modal::layout_modal;
use crate::tabs;

/// Lay out one node (and recursively its children) inside `constraints`,
/// positioned at the given absolute origin.
///
/// Defensive no-op on missing nodes and on unexpanded template/module
/// references, whose own children are not authoritative.
pub fn layout_node(
    tree: &mut ComponentTree,
    id: NodeId,
    constraints: Constraints,
    parent_x: f32,
    parent_y: f32,
) {
    let Some(node) = tree.get(id) else { return };
    if node.is_reference() {
        return;
    }

    // An explicit grid display overrides the kind's default pass.
    let is_grid = node
        .layout
        .as_deref()
        .map(|l| l.display_explicit && l.mode == LayoutMode::Grid)
        .unwrap_or(false);
    if is_grid {
        layout_grid(tree, id, constraints, parent_x, parent_y);
        return;
    }

    match node.kind {
        ComponentKind::Row | ComponentKind::TableRow => {
            layout_flexbox(tree, id, constraints, parent_x, parent_y, Axis::Horizontal);
        }

        ComponentKind::Column
        | ComponentKind::Blockquote
        | ComponentKind::List
        | ComponentKind::ListItem
        | ComponentKind::Table
        | ComponentKind::TableHead
        | ComponentKind::TableBody
        | ComponentKind::TableFoot
        | ComponentKind::Markdown => {
            layout_flexbox(tree, id, constraints, parent_x, parent_y, Axis::Vertical);
        }

        ComponentKind::Container | ComponentKind::TableCell | ComponentKind::TableHeaderCell => {
            let axis = match node.layout.as_deref().map(|l| l.flex.direction) {
                Some(FlexDirection::Row) => Axis::Horizontal,
                _ => Axis::Vertical,
            };
            layout_flexbox(tree, id, constraints, parent_x, parent_y, axis);
        }

        ComponentKind::Center => layout_center(tree, id, constraints, parent_x, parent_y),

        ComponentKind::Modal => layout_modal(tree, id, constraints, parent_x, parent_y),

        ComponentKind::TabGroup => tabs::layout_tab_group(tree, id, constraints, parent_x, parent_y),
        ComponentKind::TabBar => tabs::layout_tab_bar(tree, id, constraints, parent_x, parent_y),
        ComponentKind::Tab => tabs::layout_tab(tree, id, constraints, parent_x, parent_y),
        ComponentKind::TabContent => {
            tabs::layout_tab_content(tree, id, constraints, parent_x, parent_y);
        }
        ComponentKind::TabPanel => tabs::layout_tab_panel(tree, id, constraints, parent_x, parent_y),

        ComponentKind::Text
        | ComponentKind::Button
        | ComponentKind::Input
        | ComponentKind::Checkbox
        | ComponentKind::Image
        | ComponentKind::Canvas
        | ComponentKind::Dropdown
        | ComponentKind::Heading
        | ComponentKind::Paragraph
        | ComponentKind::CodeBlock
        | ComponentKind::HorizontalRule
        | ComponentKind::Link
        | ComponentKind::Span
        | ComponentKind::Strong
        | ComponentKind::Em
        | ComponentKind::CodeInline
        | ComponentKind::Small
        | ComponentKind::Mark => layout_leaf(tree, id, constraints, parent_x, parent_y),

        ComponentKind::StaticBlock
        | ComponentKind::ForLoop
        | ComponentKind::ForEach
        | ComponentKind::VarDecl
        | ComponentKind::Placeholder
        | ComponentKind::Custom => layout_generic(tree, id, constraints, parent_x, parent_y),
    }
}

/// Generic pass-through: fill the available window and stack children
/// along the configured direction.
fn layout_generic(
    tree: &mut ComponentTree,
    id: NodeId,
    constraints: Constraints,
    parent_x: f32,
    parent_y: f32,
) {
    let Some(node) = tree.get(id) else { return };
    let children = node.children.clone();
    let padding = node.style.as_deref().map(|s| s.padding).unwrap_or_default();
    let flex = node.layout.as_deref().map(|l| l.flex).unwrap_or_default();
    let is_row = flex.direction.is_row();

    let width = node
        .style
        .as_deref()
        .and_then(|s| s.width.resolve(constraints.max_width))
        .unwrap_or(constraints.max_width);
    let height = node
        .style
        .as_deref()
        .and_then(|s| s.height.resolve(constraints.max_height))
        .unwrap_or(constraints.max_height);

    let content_w = (width - padding.horizontal()).max(0.0);
    let content_h = (height - padding.vertical()).max(0.0);
    let content_x = parent_x + padding.left;
    let content_y = parent_y + padding.top;

    let mut offset = 0.0_f32;
    let mut first = true;
    for child in children {
        let visible = tree.get(child).map(|c| c.is_visible()).unwrap_or(false);
        if !visible {
            continue;
        }
        if !first {
            offset += flex.gap;
        }
        first = false;

        let child_constraints = if is_row {
            Constraints::loose((content_w - offset).max(0.0), content_h)
        } else {
            Constraints::loose(content_w, (content_h - offset).max(0.0))
        };
        let (cx, cy) = if is_row {
            (content_x + offset, content_y)
        } else {
            (content_x, content_y + offset)
        };
        layout_node(tree, child, child_constraints, cx, cy);

        if let Some(c) = tree.get(child) {
            offset += if is_row { c.layout_state.rect.width } else { c.layout_state.rect.height };
        }
    }

    let (x, y) = match node_position(tree, id) {
        Some(pos) => pos,
        None => (parent_x, parent_y),
    };

    if let Some(node) = tree.get_mut(id) {
        node.layout_state.rect.x = x;
        node.layout_state.rect.y = y;
        node.layout_state.rect.width = width;
        node.layout_state.rect.height = height;
        node.layout_state.layout_valid = true;
        node.layout_state.dirty = false;
    }
}

fn node_position(tree: &ComponentTree, id: NodeId) -> Option<(f32, f32)> {
    let style = tree.get(id)?.style.as_deref()?;
    if style.position == PositionMode::Absolute {
        Some((style.absolute_x, style.absolute_y))
    } else {
        None
    }
}
