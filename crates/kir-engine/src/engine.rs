//! Engine
//!
//! One loaded document: the envelope, the expanded component tree, and the
//! warnings the deserializer collected. Layout and persistence run against
//! this state.

use kir_doc::{
    parse_document, serialize_document, validate_tree, Deserializer, DocError, KirDocument,
    ModuleResolver, ValidationIssue, Warning,
};
use kir_tree::{ComponentTree, NodeId};

const DEFAULT_WINDOW_WIDTH: f32 = 800.0;
const DEFAULT_WINDOW_HEIGHT: f32 = 600.0;

/// A loaded KIR application
#[derive(Debug)]
pub struct Engine {
    document: KirDocument,
    tree: ComponentTree,
    warnings: Vec<Warning>,
}

impl Engine {
    /// Load a KIR document from already-resident text.
    pub fn load_str(text: &str) -> Result<Self, DocError> {
        let parsed = parse_document(text)?;
        for warning in &parsed.warnings {
            tracing::warn!(%warning, "degraded while loading document");
        }
        tracing::info!(nodes = parsed.tree.len(), "document loaded");
        Ok(Self { document: parsed.document, tree: parsed.tree, warnings: parsed.warnings })
    }

    /// Load with a resolver for cross-document `$module:` references.
    pub fn load_str_with_resolver(
        text: &str,
        resolver: &dyn ModuleResolver,
    ) -> Result<Self, DocError> {
        let parsed = Deserializer::with_resolver(resolver).parse(text)?;
        for warning in &parsed.warnings {
            tracing::warn!(%warning, "degraded while loading document");
        }
        Ok(Self { document: parsed.document, tree: parsed.tree, warnings: parsed.warnings })
    }

    /// Run a full layout pass against the given viewport.
    pub fn layout(&mut self, width: f32, height: f32) {
        let root = self.tree.root();
        kir_layout::compute_tree(&mut self.tree, root, width, height);
    }

    /// Re-emit the current tree and envelope as KIR text.
    pub fn save(&self) -> Result<String, DocError> {
        serialize_document(&self.document, &self.tree)
    }

    /// Structural validation of the current tree.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        validate_tree(&self.tree)
    }

    pub fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ComponentTree {
        &mut self.tree
    }

    pub fn document(&self) -> &KirDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut KirDocument {
        &mut self.document
    }

    /// Warnings collected while loading (module fallbacks and the like).
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn window_title(&self) -> Option<&str> {
        self.document.app.as_ref()?.window_title.as_deref()
    }

    /// Window size from the app section, with engine defaults.
    pub fn window_size(&self) -> (f32, f32) {
        let app = self.document.app.as_ref();
        (
            app.and_then(|a| a.window_width).unwrap_or(DEFAULT_WINDOW_WIDTH),
            app.and_then(|a| a.window_height).unwrap_or(DEFAULT_WINDOW_HEIGHT),
        )
    }

    /// Select a tab on the tab group with the given document id. State is
    /// scoped to that instance; other instances of the same template are
    /// untouched.
    pub fn select_tab(&mut self, group_doc_id: u32, index: i32) {
        let Some(group) = self.tree.find_by_doc_id(group_doc_id) else {
            tracing::debug!(group_doc_id, "select_tab: no such component");
            return;
        };
        self.tree.select_tab(group, index);
    }

    /// Node handle of the tree root.
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }
}
