//! Axis-Parameterized Flexbox
//!
//! One function covers Row, Column and Container layout; the two
//! directions differ only in which dimension is the main axis. Children
//! are walked in order, the gap is applied between but never after the
//! last child, and each child sees a constraint window shrunk by the space
//! already consumed.

use kir_tree::{Alignment, ComponentTree, NodeId, PositionMode};

use crate::constraints::Constraints;
use crate::dispatch::layout_node;

/// Main axis of a flex container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Move a node and all its descendants by the given offset. Children store
/// absolute positions, so moving a parent means moving the whole subtree.
pub fn move_subtree(tree: &mut ComponentTree, id: NodeId, dx: f32, dy: f32) {
    if dx == 0.0 && dy == 0.0 {
        return;
    }
    for node_id in tree.descendants(id) {
        if let Some(node) = tree.get_mut(node_id) {
            node.layout_state.rect.x += dx;
            node.layout_state.rect.y += dy;
        }
    }
}

pub fn layout_flexbox(
    tree: &mut ComponentTree,
    id: NodeId,
    constraints: Constraints,
    parent_x: f32,
    parent_y: f32,
    axis: Axis,
) {
    let Some(node) = tree.get(id) else { return };

    let padding = node.style.as_deref().map(|s| s.padding).unwrap_or_default();
    let flex = node.layout.as_deref().map(|l| l.flex).unwrap_or_default();
    let gap = flex.gap;
    let children = node.children.clone();

    // Explicit dimensions win over the constraint window.
    let style_w = node.style.as_deref().and_then(|s| s.width.resolve(constraints.max_width));
    let style_h = node.style.as_deref().and_then(|s| s.height.resolve(constraints.max_height));
    let has_explicit_w = style_w.is_some();
    let has_explicit_h = style_h.is_some();
    let container_width = style_w.unwrap_or(constraints.max_width);
    let container_height = style_h.unwrap_or(constraints.max_height);

    let is_absolute = node
        .style
        .as_deref()
        .map(|s| s.position == PositionMode::Absolute)
        .unwrap_or(false);
    let (container_x, container_y) = if is_absolute {
        node.style.as_deref().map(|s| (s.absolute_x, s.absolute_y)).unwrap_or((0.0, 0.0))
    } else {
        (parent_x, parent_y)
    };

    let content_x = container_x + padding.left;
    let content_y = container_y + padding.top;

    let (available_main, available_cross) = match axis {
        Axis::Horizontal => (
            container_width - padding.horizontal(),
            container_height - padding.vertical(),
        ),
        Axis::Vertical => (
            container_height - padding.vertical(),
            container_width - padding.horizontal(),
        ),
    };

    // Measuring walk: lay out each child inside the window that is still
    // unclaimed, accumulating the running main-axis offset.
    let mut main_position = 0.0_f32;
    let mut total_main = 0.0_f32;
    let mut max_cross = 0.0_f32;
    let mut laid_out = 0usize;

    for child in children.iter() {
        let visible = tree.get(*child).map(|c| c.is_visible()).unwrap_or(false);
        if !visible {
            continue;
        }
        if laid_out > 0 {
            main_position += gap;
        }

        let remaining_main = (available_main - main_position).max(0.0);
        let child_constraints = match axis {
            Axis::Horizontal => Constraints::loose(remaining_main, available_cross),
            Axis::Vertical => Constraints::loose(available_cross, remaining_main),
        };

        let (child_x, child_y) = match axis {
            Axis::Horizontal => (content_x + main_position, content_y),
            Axis::Vertical => (content_x, content_y + main_position),
        };
        layout_node(tree, *child, child_constraints, child_x, child_y);

        let Some(child_node) = tree.get(*child) else { continue };
        let rect = child_node.layout_state.rect;
        let (child_main, child_cross) = match axis {
            Axis::Horizontal => (rect.width, rect.height),
            Axis::Vertical => (rect.height, rect.width),
        };

        main_position += child_main;
        total_main += child_main;
        max_cross = max_cross.max(child_cross);
        laid_out += 1;
    }

    if laid_out > 1 {
        total_main += gap * (laid_out - 1) as f32;
    }

    // Own size: explicit dimensions fill; main-axis alignment other than
    // Start needs the full window to distribute; otherwise shrink-wrap.
    let needs_main_space = flex.justify_content != Alignment::Start;
    let (own_main, own_cross) = match axis {
        Axis::Horizontal => (
            if has_explicit_w {
                container_width - padding.horizontal()
            } else if needs_main_space {
                available_main
            } else {
                total_main
            },
            if has_explicit_h { container_height - padding.vertical() } else { max_cross },
        ),
        Axis::Vertical => (
            if has_explicit_h {
                container_height - padding.vertical()
            } else if needs_main_space {
                available_main
            } else {
                total_main
            },
            if has_explicit_w { container_width - padding.horizontal() } else { max_cross },
        ),
    };

    apply_main_alignment(tree, &children, flex.justify_content, own_main - total_main, axis);
    apply_cross_alignment(tree, &children, flex.cross_axis, own_cross, content_x, content_y, axis);

    if let Some(node) = tree.get_mut(id) {
        let rect = &mut node.layout_state.rect;
        match axis {
            Axis::Horizontal => {
                rect.width = own_main + padding.horizontal();
                rect.height = own_cross + padding.vertical();
            }
            Axis::Vertical => {
                rect.width = own_cross + padding.horizontal();
                rect.height = own_main + padding.vertical();
            }
        }
        rect.x = container_x;
        rect.y = container_y;
        node.layout_state.layout_valid = true;
        node.layout_state.dirty = false;
    }
}

fn apply_main_alignment(
    tree: &mut ComponentTree,
    children: &[NodeId],
    alignment: Alignment,
    remaining: f32,
    axis: Axis,
) {
    if remaining <= 0.0 || children.is_empty() {
        return;
    }
    let count = children.len();
    let (lead, extra_gap) = match alignment {
        Alignment::Start | Alignment::Stretch => (0.0, 0.0),
        Alignment::Center => (remaining / 2.0, 0.0),
        Alignment::End => (remaining, 0.0),
        Alignment::SpaceBetween => {
            if count > 1 {
                (0.0, remaining / (count - 1) as f32)
            } else {
                (0.0, 0.0)
            }
        }
        Alignment::SpaceAround => {
            let g = remaining / count as f32;
            (g / 2.0, g)
        }
        Alignment::SpaceEvenly => {
            let g = remaining / (count + 1) as f32;
            (g, g)
        }
    };

    let mut offset = lead;
    for (i, child) in children.iter().enumerate() {
        match axis {
            Axis::Horizontal => move_subtree(tree, *child, offset, 0.0),
            Axis::Vertical => move_subtree(tree, *child, 0.0, offset),
        }
        if i + 1 < count {
            offset += extra_gap;
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn apply_cross_alignment(
    tree: &mut ComponentTree,
    children: &[NodeId],
    alignment: Alignment,
    own_cross: f32,
    content_x: f32,
    content_y: f32,
    axis: Axis,
) {
    if alignment == Alignment::Start {
        return;
    }
    for child in children {
        let Some(child_node) = tree.get(*child) else { continue };
        let rect = child_node.layout_state.rect;
        let child_cross = match axis {
            Axis::Horizontal => rect.height,
            Axis::Vertical => rect.width,
        };

        match alignment {
            Alignment::Stretch => {
                if let Some(node) = tree.get_mut(*child) {
                    match axis {
                        Axis::Horizontal => node.layout_state.rect.height = own_cross,
                        Axis::Vertical => node.layout_state.rect.width = own_cross,
                    }
                }
            }
            Alignment::Center | Alignment::End => {
                let offset = if alignment == Alignment::Center {
                    (own_cross - child_cross) / 2.0
                } else {
                    own_cross - child_cross
                };
                match axis {
                    Axis::Horizontal => {
                        let target = content_y + offset;
                        move_subtree(tree, *child, 0.0, target - rect.y);
                    }
                    Axis::Vertical => {
                        let target = content_x + offset;
                        move_subtree(tree, *child, target - rect.x, 0.0);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Center layout: a single child centered on both axes.
pub fn layout_center(
    tree: &mut ComponentTree,
    id: NodeId,
    constraints: Constraints,
    parent_x: f32,
    parent_y: f32,
) {
    let Some(node) = tree.get(id) else { return };
    let padding = node.style.as_deref().map(|s| s.padding).unwrap_or_default();
    let first_child = node.children.first().copied();

    let available_w = (constraints.max_width - padding.horizontal()).max(0.0);
    let available_h = (constraints.max_height - padding.vertical()).max(0.0);
    let content_x = parent_x + padding.left;
    let content_y = parent_y + padding.top;

    if let Some(child) = first_child {
        layout_node(tree, child, Constraints::loose(available_w, available_h), content_x, content_y);

        let is_absolute = tree
            .get(child)
            .and_then(|c| c.style.as_deref().map(|s| s.position == PositionMode::Absolute))
            .unwrap_or(false);
        if !is_absolute {
            if let Some(rect) = tree.get(child).map(|c| c.layout_state.rect) {
                let dx = (available_w - rect.width) / 2.0;
                let dy = (available_h - rect.height) / 2.0;
                move_subtree(tree, child, content_x + dx - rect.x, content_y + dy - rect.y);
            }
        }
    }

    let own_w = tree
        .get(id)
        .and_then(|n| n.style.as_deref())
        .and_then(|s| s.width.px())
        .unwrap_or(constraints.max_width);
    let own_h = tree
        .get(id)
        .and_then(|n| n.style.as_deref())
        .and_then(|s| s.height.px())
        .unwrap_or(constraints.max_height);

    if let Some(node) = tree.get_mut(id) {
        node.layout_state.rect.x = parent_x;
        node.layout_state.rect.y = parent_y;
        node.layout_state.rect.width = own_w;
        node.layout_state.rect.height = own_h;
        node.layout_state.layout_valid = true;
        node.layout_state.dirty = false;
    }
}
