//! Tree Validation
//!
//! Structural checks run after deserialization or before persistence.
//! Findings are reported as a list, never a hard abort: the caller decides
//! whether to proceed or reject.

use std::collections::HashSet;

use kir_tree::{ComponentTree, NodeId};

/// Nesting deeper than this is considered a structural inconsistency.
pub const MAX_TREE_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// Nesting exceeds [`MAX_TREE_DEPTH`]
    DepthExceeded,
    /// A child's parent link does not point back at its parent
    BrokenLink,
    /// Two nodes in one expanded tree share a document id
    DuplicateId,
    /// A template/module reference survived expansion
    UnexpandedReference,
}

/// One validation finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    /// Document id of the offending node
    pub node: u32,
}

/// Validate a tree from its root. Returns every finding; an empty list
/// means the tree is structurally sound.
pub fn validate_tree(tree: &ComponentTree) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut seen_ids: HashSet<u32> = HashSet::new();
    let root = tree.root();
    if tree.get(root).is_none() {
        return issues;
    }
    walk(tree, root, 0, &mut seen_ids, &mut issues);
    issues
}

fn walk(
    tree: &ComponentTree,
    id: NodeId,
    depth: usize,
    seen_ids: &mut HashSet<u32>,
    issues: &mut Vec<ValidationIssue>,
) {
    let Some(node) = tree.get(id) else { return };

    if depth > MAX_TREE_DEPTH {
        issues.push(ValidationIssue { kind: IssueKind::DepthExceeded, node: node.id });
        // Report once per branch; no point descending further.
        return;
    }

    if !seen_ids.insert(node.id) {
        issues.push(ValidationIssue { kind: IssueKind::DuplicateId, node: node.id });
    }

    // An expanded instance root is tagged as its own owner; a reference
    // node without that tag never went through expansion.
    if node.is_reference() && node.owner_instance != node.id {
        issues.push(ValidationIssue { kind: IssueKind::UnexpandedReference, node: node.id });
    }

    for child in &node.children {
        match tree.get(*child) {
            Some(child_node) if child_node.parent == id => {
                walk(tree, *child, depth + 1, seen_ids, issues);
            }
            Some(child_node) => {
                issues.push(ValidationIssue { kind: IssueKind::BrokenLink, node: child_node.id });
            }
            None => {
                issues.push(ValidationIssue { kind: IssueKind::BrokenLink, node: node.id });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kir_tree::{Component, ComponentKind};

    #[test]
    fn test_valid_tree_has_no_issues() {
        let mut tree = ComponentTree::new();
        let root = tree.create(ComponentKind::Container);
        let child = tree.create(ComponentKind::Text);
        tree.set_root(root);
        tree.append_child(root, child);

        assert!(validate_tree(&tree).is_empty());
    }

    #[test]
    fn test_duplicate_ids_detected() {
        let mut tree = ComponentTree::new();
        let root = tree.alloc(Component::new(5, ComponentKind::Container));
        let a = tree.alloc(Component::new(5, ComponentKind::Text));
        tree.set_root(root);
        tree.append_child(root, a);

        let issues = validate_tree(&tree);
        assert!(issues.iter().any(|i| i.kind == IssueKind::DuplicateId));
    }

    #[test]
    fn test_depth_bound() {
        let mut tree = ComponentTree::new();
        let root = tree.create(ComponentKind::Container);
        tree.set_root(root);
        let mut parent = root;
        for _ in 0..(MAX_TREE_DEPTH + 2) {
            let child = tree.create(ComponentKind::Container);
            tree.append_child(parent, child);
            parent = child;
        }

        let issues = validate_tree(&tree);
        assert!(issues.iter().any(|i| i.kind == IssueKind::DepthExceeded));
    }

    #[test]
    fn test_empty_tree_is_fine() {
        let tree = ComponentTree::new();
        assert!(validate_tree(&tree).is_empty());
    }
}
