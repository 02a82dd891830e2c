//! Tab Family Layout
//!
//! TabGroup stacks TabBar over TabContent; TabBar rows its Tabs; a Tab
//! sizes itself from its title; TabContent and TabPanel fill the available
//! window, the panel stacking its children vertically.

use kir_tree::{ComponentTree, NodeId, Payload};

use crate::constraints::Constraints;
use crate::dispatch::layout_node;

const DEFAULT_TAB_HEIGHT: f32 = 36.0;
const DEFAULT_TAB_BAR_HEIGHT: f32 = 44.0;

fn explicit_px(tree: &ComponentTree, id: NodeId) -> (Option<f32>, Option<f32>) {
    match tree.get(id).and_then(|n| n.style.as_deref()) {
        Some(s) => (s.width.px(), s.height.px()),
        None => (None, None),
    }
}

pub fn layout_tab_group(
    tree: &mut ComponentTree,
    id: NodeId,
    constraints: Constraints,
    parent_x: f32,
    parent_y: f32,
) {
    let Some(node) = tree.get(id) else { return };
    let children = node.children.clone();

    let (ew, eh) = explicit_px(tree, id);
    let width = ew
        .unwrap_or(if constraints.max_width > 0.0 { constraints.max_width } else { 400.0 })
        .max(constraints.min_width);
    let height = eh
        .unwrap_or(if constraints.max_height > 0.0 { constraints.max_height } else { 300.0 })
        .max(constraints.min_height);

    // TabBar first, then TabContent, stacked vertically.
    let mut current_y = parent_y;
    for child in children {
        let remaining = (height - (current_y - parent_y)).max(0.0);
        layout_node(tree, child, Constraints::loose(width, remaining), parent_x, current_y);
        if let Some(c) = tree.get(child) {
            if c.layout_state.layout_valid {
                current_y += c.layout_state.rect.height;
            }
        }
    }

    if let Some(node) = tree.get_mut(id) {
        node.layout_state.rect.x = parent_x;
        node.layout_state.rect.y = parent_y;
        node.layout_state.rect.width = width;
        node.layout_state.rect.height = height;
        node.layout_state.layout_valid = true;
        node.layout_state.dirty = false;
    }
}

pub fn layout_tab_bar(
    tree: &mut ComponentTree,
    id: NodeId,
    constraints: Constraints,
    parent_x: f32,
    parent_y: f32,
) {
    let Some(node) = tree.get(id) else { return };
    let children = node.children.clone();

    let (ew, eh) = explicit_px(tree, id);
    let width = ew
        .unwrap_or(if constraints.max_width > 0.0 { constraints.max_width } else { 400.0 })
        .max(constraints.min_width);
    let height = eh.unwrap_or(DEFAULT_TAB_BAR_HEIGHT).max(constraints.min_height);

    let mut current_x = parent_x;
    for child in children {
        let remaining = (width - (current_x - parent_x)).max(0.0);
        layout_node(tree, child, Constraints::loose(remaining, height), current_x, parent_y);
        if let Some(c) = tree.get(child) {
            if c.layout_state.layout_valid {
                current_x += c.layout_state.rect.width;
            }
        }
    }

    if let Some(node) = tree.get_mut(id) {
        node.layout_state.rect.x = parent_x;
        node.layout_state.rect.y = parent_y;
        node.layout_state.rect.width = width;
        node.layout_state.rect.height = height;
        node.layout_state.layout_valid = true;
        node.layout_state.dirty = false;
    }
}

pub fn layout_tab(
    tree: &mut ComponentTree,
    id: NodeId,
    constraints: Constraints,
    parent_x: f32,
    parent_y: f32,
) {
    let Some(node) = tree.get(id) else { return };

    let font_size = match node.style.as_deref() {
        Some(s) if s.font.size > 0.0 => s.font.size,
        _ => 14.0,
    };
    let padding_h = node
        .style
        .as_deref()
        .map(|s| s.padding.horizontal())
        .unwrap_or(0.0);

    // Title from tab data first (set during deserialization), else text.
    let title = match &node.payload {
        Payload::Tab(data) => data.title.as_deref(),
        _ => None,
    }
    .or(node.text.as_deref());

    let intrinsic = match title {
        Some(t) => t.chars().count() as f32 * font_size * 0.55 + padding_h + 24.0,
        None => 80.0,
    };

    let (ew, eh) = explicit_px(tree, id);
    let width = constraints.clamp_width(ew.unwrap_or(intrinsic));
    let height = constraints.clamp_height(eh.unwrap_or(DEFAULT_TAB_HEIGHT));

    if let Some(node) = tree.get_mut(id) {
        node.layout_state.rect.x = parent_x;
        node.layout_state.rect.y = parent_y;
        node.layout_state.rect.width = width;
        node.layout_state.rect.height = height;
        node.layout_state.layout_valid = true;
        node.layout_state.dirty = false;
    }
}

pub fn layout_tab_content(
    tree: &mut ComponentTree,
    id: NodeId,
    constraints: Constraints,
    parent_x: f32,
    parent_y: f32,
) {
    let Some(node) = tree.get(id) else { return };
    let children = node.children.clone();

    let (ew, eh) = explicit_px(tree, id);
    let width = ew
        .unwrap_or(if constraints.max_width > 0.0 { constraints.max_width } else { 400.0 })
        .max(constraints.min_width);
    let height = eh
        .unwrap_or(if constraints.max_height > 0.0 { constraints.max_height } else { 300.0 })
        .max(constraints.min_height);

    // Panels overlay; only the live child list is walked.
    for child in children {
        layout_node(tree, child, Constraints::loose(width, height), parent_x, parent_y);
    }

    if let Some(node) = tree.get_mut(id) {
        node.layout_state.rect.x = parent_x;
        node.layout_state.rect.y = parent_y;
        node.layout_state.rect.width = width;
        node.layout_state.rect.height = height;
        node.layout_state.layout_valid = true;
        node.layout_state.dirty = false;
    }
}

pub fn layout_tab_panel(
    tree: &mut ComponentTree,
    id: NodeId,
    constraints: Constraints,
    parent_x: f32,
    parent_y: f32,
) {
    let Some(node) = tree.get(id) else { return };
    let children = node.children.clone();
    let padding = node.style.as_deref().map(|s| s.padding).unwrap_or_default();
    let gap = node.layout.as_deref().map(|l| l.flex.gap).unwrap_or(0.0);

    let (ew, eh) = explicit_px(tree, id);
    let width = ew
        .unwrap_or(if constraints.max_width > 0.0 { constraints.max_width } else { 400.0 })
        .max(constraints.min_width);
    let height = eh
        .unwrap_or(if constraints.max_height > 0.0 { constraints.max_height } else { 300.0 })
        .max(constraints.min_height);

    let content_w = width - padding.horizontal();
    let content_h = height - padding.vertical();
    let content_x = parent_x + padding.left;
    let content_y = parent_y + padding.top;

    let mut current_y = content_y;
    let mut first = true;
    for child in children {
        let visible = tree.get(child).map(|c| c.is_visible()).unwrap_or(false);
        if !visible {
            continue;
        }
        if !first {
            current_y += gap;
        }
        first = false;

        let remaining = (content_h - (current_y - content_y)).max(0.0);
        layout_node(tree, child, Constraints::loose(content_w, remaining), content_x, current_y);
        if let Some(c) = tree.get(child) {
            if c.layout_state.layout_valid {
                current_y += c.layout_state.rect.height;
            }
        }
    }

    if let Some(node) = tree.get_mut(id) {
        node.layout_state.rect.x = parent_x;
        node.layout_state.rect.y = parent_y;
        node.layout_state.rect.width = width;
        node.layout_state.rect.height = height;
        node.layout_state.layout_valid = true;
        node.layout_state.dirty = false;
    }
}
