//! Modal Layout
//!
//! Modals take no space in the normal flow; the renderer positions them as
//! overlays. Children are laid out against the modal's own content box at
//! the origin and repositioned at draw time.

use kir_tree::{ComponentTree, NodeId};

use crate::constraints::Constraints;
use crate::dispatch::layout_node;

const DEFAULT_MODAL_WIDTH: f32 = 300.0;
const DEFAULT_MODAL_HEIGHT: f32 = 200.0;
const DEFAULT_MODAL_PADDING: f32 = 24.0;

pub fn layout_modal(
    tree: &mut ComponentTree,
    id: NodeId,
    _constraints: Constraints,
    parent_x: f32,
    parent_y: f32,
) {
    let Some(node) = tree.get(id) else { return };
    let children = node.children.clone();

    let mut width = DEFAULT_MODAL_WIDTH;
    let mut height = DEFAULT_MODAL_HEIGHT;
    let mut padding = DEFAULT_MODAL_PADDING;
    if let Some(style) = node.style.as_deref() {
        if let Some(w) = style.width.px() {
            width = w;
        }
        if let Some(h) = style.height.px() {
            height = h;
        }
        if style.padding.top > 0.0 {
            padding = style.padding.top;
        }
    }

    if let Some(node) = tree.get_mut(id) {
        node.layout_state.rect.x = parent_x;
        node.layout_state.rect.y = parent_y;
        node.layout_state.rect.width = 0.0;
        node.layout_state.rect.height = 0.0;
        node.layout_state.layout_valid = true;
        node.layout_state.dirty = false;
    }

    let inner = Constraints::loose(
        (width - 2.0 * padding).max(0.0),
        (height - 2.0 * padding).max(0.0),
    );
    for child in children {
        layout_node(tree, child, inner, 0.0, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kir_tree::{Component, ComponentKind};

    #[test]
    fn test_modal_takes_no_flow_space() {
        let mut tree = ComponentTree::new();
        let modal = tree.alloc(Component::new(1, ComponentKind::Modal));
        layout_modal(&mut tree, modal, Constraints::loose(800.0, 600.0), 10.0, 10.0);

        let rect = tree.get(modal).unwrap().layout_state.rect;
        assert_eq!(rect.width, 0.0);
        assert_eq!(rect.height, 0.0);
        assert!(tree.get(modal).unwrap().layout_state.layout_valid);
    }

    #[test]
    fn test_modal_children_at_origin() {
        let mut tree = ComponentTree::new();
        let modal = tree.alloc(Component::new(1, ComponentKind::Modal));
        let child = tree.alloc(Component::new(2, ComponentKind::Input));
        tree.append_child(modal, child);

        layout_modal(&mut tree, modal, Constraints::loose(800.0, 600.0), 50.0, 50.0);

        let rect = tree.get(child).unwrap().layout_state.rect;
        assert_eq!(rect.x, 0.0);
        assert_eq!(rect.y, 0.0);
    }
}
