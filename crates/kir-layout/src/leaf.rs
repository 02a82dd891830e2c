//! Leaf Layout
//!
//! Two-phase sizing for content-bearing nodes: determine an intrinsic size
//! (explicit pixel dimensions win, otherwise measured content or a fixed
//! widget default), then clamp against the incoming constraints
//! independently per axis.

use kir_tree::{ComponentTree, NodeId, PositionMode};

use crate::constraints::Constraints;
use crate::intrinsic::intrinsic_size;

pub fn layout_leaf(
    tree: &mut ComponentTree,
    id: NodeId,
    constraints: Constraints,
    parent_x: f32,
    parent_y: f32,
) {
    let Some(node) = tree.get(id) else { return };

    let (mut width, mut height) = intrinsic_size(node);

    // Percentages resolve against the concrete window the parent passed.
    if let Some(style) = node.style.as_deref() {
        if let kir_tree::Dimension::Percent(p) = style.width {
            width = constraints.max_width * p / 100.0;
        }
        if let kir_tree::Dimension::Percent(p) = style.height {
            height = constraints.max_height * p / 100.0;
        }
    }

    let width = constraints.clamp_width(width);
    let height = constraints.clamp_height(height);

    let (x, y) = match node.style.as_deref() {
        Some(s) if s.position == PositionMode::Absolute => (s.absolute_x, s.absolute_y),
        _ => (parent_x, parent_y),
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

#[cfg(test)]
mod tests {
    use super::*;
    use kir_tree::{Component, ComponentKind, Dimension};

    #[test]
    fn test_explicit_width_clamped_by_max() {
        let mut tree = ComponentTree::new();
        let mut node = Component::new(1, ComponentKind::Canvas);
        node.style_mut().width = Dimension::Px(500.0);
        let id = tree.alloc(node);

        layout_leaf(&mut tree, id, Constraints::loose(300.0, 600.0), 0.0, 0.0);

        let rect = tree.get(id).unwrap().layout_state.rect;
        assert_eq!(rect.width, 300.0);
    }

    #[test]
    fn test_min_constraint_applies() {
        let mut tree = ComponentTree::new();
        let id = tree.alloc(Component::new(1, ComponentKind::Input));

        let c = Constraints::new(400.0, 0.0, 0.0, 0.0);
        layout_leaf(&mut tree, id, c, 0.0, 0.0);

        assert_eq!(tree.get(id).unwrap().layout_state.rect.width, 400.0);
    }

    #[test]
    fn test_marks_valid() {
        let mut tree = ComponentTree::new();
        let id = tree.alloc(Component::text(1, "hi"));
        layout_leaf(&mut tree, id, Constraints::loose(100.0, 100.0), 5.0, 7.0);

        let state = tree.get(id).unwrap().layout_state;
        assert!(state.layout_valid);
        assert!(!state.dirty);
        assert_eq!(state.rect.x, 5.0);
        assert_eq!(state.rect.y, 7.0);
    }
}
