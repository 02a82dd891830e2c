//! KIR Layout Engine
//!
//! Computes a concrete box for every node of a component tree, top-down.
//! Each node is sized in two phases (intrinsic size, then clamping against
//! the parent's constraints) and containers position their children along
//! a main axis, shrinking the remaining window as space is consumed.
//!
//! Text measurement is injected by the active renderer through
//! [`set_text_measure_callback`]; without one a heuristic estimate keeps
//! layout running.

mod constraints;
mod dispatch;
mod flexbox;
mod grid;
mod intrinsic;
mod leaf;
mod measure;
mod modal;
mod tabs;

pub use constraints::Constraints;
pub use dispatch::layout_node;
pub use flexbox::{move_subtree, Axis};
pub use measure::{
    clear_text_measure_callback, estimate_text_width, measure_text, set_text_measure_callback,
    TextMeasureFn,
};

use kir_tree::{ComponentTree, NodeId};

/// Entry point for a full-tree layout pass.
///
/// Runs every frame/update pass; a missing root is a defensive no-op.
pub fn compute_tree(tree: &mut ComponentTree, root: NodeId, available_width: f32, available_height: f32) {
    if tree.get(root).is_none() {
        return;
    }

    tree.invalidate_subtree(root);
    let constraints = Constraints::loose(available_width, available_height);
    layout_node(tree, root, constraints, 0.0, 0.0);

    tracing::debug!(
        nodes = tree.len(),
        width = available_width,
        height = available_height,
        "layout pass complete"
    );
}
