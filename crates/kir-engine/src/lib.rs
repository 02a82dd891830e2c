//! KIR UI Engine
//!
//! Ties the pieces together: load a KIR document into a layout-ready
//! component tree, run layout passes against a viewport, and re-emit the
//! (possibly mutated) tree back to KIR.

mod engine;

pub use engine::Engine;

pub use kir_doc::{DocError, IssueKind, ModuleResolver, ValidationIssue, Warning};
pub use kir_layout::{set_text_measure_callback, TextMeasureFn};
pub use kir_tree::{ComponentTree, NodeId};

/// Install the tracing subscriber, honoring `RUST_LOG`. Safe to call more
/// than once; later calls are no-ops.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
