//! KIR Document Protocol
//!
//! Serialization and deserialization between live component trees and the
//! KIR document format, including component-definition (template) and
//! cross-document module expansion. Round-tripping is lossless for trees
//! without reactive bindings; bound properties are always persisted, even
//! at their default values.

mod de;
mod document;
mod error;
mod expand;
mod ser;
mod validate;
mod value;

pub use de::{parse_document, Deserializer, ParsedDocument};
pub use document::{
    selector_specificity, AppProperties, ComponentDefinition, KirDocument, PropDef,
    ReactiveBinding, ReactiveConditional, ReactiveForLoop, ReactiveManifest, ReactiveVariable,
    SourceEntry, SourceMetadata, StateVarDef, StyleRule, Stylesheet,
};
pub use error::{DocError, Warning};
pub use expand::{
    build_state, clone_and_substitute, parse_module_ref, substitute, ModuleCache, ModuleResolver,
    StateContext,
};
pub use ser::{
    document_to_value, serialize_component, serialize_component_template, serialize_document,
};
pub use validate::{validate_tree, IssueKind, ValidationIssue, MAX_TREE_DEPTH};
pub use value::{
    color_to_string, dimension_to_string, gradient_to_value, parse_color, parse_dimension,
    parse_gradient, parse_spacing, spacing_to_value,
};
