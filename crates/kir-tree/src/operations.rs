//! Tree Operations
//!
//! Structural mutations and queries that span more than one node: detach,
//! subtree id remapping, owner-instance tagging, and tab selection.

use crate::kind::ComponentKind;
use crate::payload::Payload;
use crate::tree::{ComponentTree, NodeId};

impl ComponentTree {
    /// Detach a node from its parent's child list. The node stays in the
    /// arena and keeps its subtree.
    pub fn detach(&mut self, id: NodeId) {
        let parent = match self.get(id) {
            Some(node) => node.parent,
            None => return,
        };
        if let Some(p) = self.get_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(node) = self.get_mut(id) {
            node.parent = NodeId::NONE;
        }
    }

    /// Remap every document id in a subtree to a fresh one, except the
    /// subtree root which receives `root_doc_id`. Used after template
    /// expansion so multiple instances of one definition never collide.
    pub fn remap_subtree_ids(&mut self, subtree: NodeId, root_doc_id: u32) {
        for node_id in self.descendants(subtree) {
            let fresh = self.fresh_id();
            if let Some(node) = self.get_mut(node_id) {
                node.id = fresh;
            }
        }
        self.note_id(root_doc_id);
        if let Some(node) = self.get_mut(subtree) {
            node.id = root_doc_id;
        }
    }

    /// Tag every node of a subtree with the owning instance id, so later
    /// state mutations are scoped per instance.
    pub fn set_owner_instance(&mut self, subtree: NodeId, owner: u32) {
        for node_id in self.descendants(subtree) {
            if let Some(node) = self.get_mut(node_id) {
                node.owner_instance = owner;
            }
        }
    }

    /// Select a tab on a tab group.
    ///
    /// Updates the group's selection state and swaps the tab content's live
    /// child list to the selected panel. Every panel stays registered in
    /// the content payload, which is what the serializer enumerates.
    pub fn select_tab(&mut self, group: NodeId, index: i32) {
        let Some(node) = self.get(group) else { return };
        if node.kind != ComponentKind::TabGroup {
            return;
        }
        let children = node.children.clone();

        if let Some(node) = self.get_mut(group) {
            match &mut node.payload {
                Payload::TabGroup(state) => state.selected = index,
                payload @ Payload::None => {
                    *payload = Payload::TabGroup(crate::payload::TabGroupState {
                        selected: index,
                        reorderable: false,
                    });
                }
                _ => {}
            }
        }

        let content = children
            .into_iter()
            .find(|c| self.get(*c).map(|n| n.kind) == Some(ComponentKind::TabContent));
        let Some(content) = content else { return };

        let panel = match self.get_mut(content) {
            Some(node) => match &mut node.payload {
                Payload::TabContent(state) => {
                    state.selected = index;
                    state.panels.get(index.max(0) as usize).copied()
                }
                _ => None,
            },
            None => None,
        };

        if let Some(panel) = panel {
            if let Some(node) = self.get_mut(content) {
                node.children = vec![panel];
            }
            if let Some(p) = self.get_mut(panel) {
                p.parent = content;
            }
            tracing::debug!(group = self.get(group).map(|n| n.id), index, "tab selected");
            self.invalidate_subtree(content);
        }
    }
}
