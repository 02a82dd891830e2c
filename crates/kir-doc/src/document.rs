//! KIR Document Model
//!
//! The envelope around a component tree: metadata, window properties,
//! component definitions, the reactive manifest, the stylesheet, and
//! preserved source sections. Definitions and the manifest are read-only
//! inputs to expansion; they are not part of the live tree.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Source file metadata for round-trip serialization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiler_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

/// Application window properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppProperties {
    #[serde(rename = "windowTitle", skip_serializing_if = "Option::is_none")]
    pub window_title: Option<String>,
    #[serde(rename = "windowWidth", skip_serializing_if = "Option::is_none")]
    pub window_width: Option<f32>,
    #[serde(rename = "windowHeight", skip_serializing_if = "Option::is_none")]
    pub window_height: Option<f32>,
}

/// Declared prop of a component definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropDef {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// Declared state variable of a component definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateVarDef {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    /// Initial value; may reference a prop as `{"var": "propName"}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<Value>,
}

/// Named, reusable template with declared inputs and local state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub props: Vec<PropDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub state: Vec<StateVarDef>,
    /// Template subtree, kept in document form for expansion
    pub template: Value,
}

/// Reactive variable descriptor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactiveVariable {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// Component-to-variable binding record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactiveBinding {
    pub component_id: u32,
    pub variable_id: u32,
    #[serde(default)]
    pub binding_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
}

/// Conditional visibility record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactiveConditional {
    pub component_id: u32,
    pub condition: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependent_variable_ids: Vec<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub then_children_ids: Vec<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub else_children_ids: Vec<u32>,
}

/// Loop-driven repetition record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactiveForLoop {
    pub parent_component_id: u32,
    pub collection_expr: String,
    #[serde(default)]
    pub collection_variable_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,
}

/// Variables, bindings, conditionals and loops, independent of the tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReactiveManifest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<ReactiveVariable>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bindings: Vec<ReactiveBinding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditionals: Vec<ReactiveConditional>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub for_loops: Vec<ReactiveForLoop>,
}

impl ReactiveManifest {
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
            && self.bindings.is_empty()
            && self.conditionals.is_empty()
            && self.for_loops.is_empty()
    }

    pub fn find_variable(&self, name: &str) -> Option<&ReactiveVariable> {
        self.variables.iter().find(|v| v.name == name)
    }
}

/// One stylesheet rule: selector, computed specificity, raw properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleRule {
    pub selector: String,
    #[serde(default)]
    pub specificity: u32,
    #[serde(default)]
    pub properties: Value,
}

/// Global stylesheet: variables, ordered rules, raw media-query text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stylesheet {
    #[serde(default, skip_serializing_if = "std::collections::BTreeMap::is_empty")]
    pub variables: std::collections::BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<StyleRule>,
    #[serde(rename = "mediaQueries", default, skip_serializing_if = "Vec::is_empty")]
    pub media_queries: Vec<String>,
}

impl Stylesheet {
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty() && self.rules.is_empty() && self.media_queries.is_empty()
    }
}

/// Specificity of a simple selector chain: ids 100, classes 10, elements 1.
pub fn selector_specificity(selector: &str) -> u32 {
    let mut score = 0u32;
    for part in selector.split_whitespace() {
        for piece in part.split(&[':', '>'][..]) {
            if piece.is_empty() {
                continue;
            }
            if piece.starts_with('#') {
                score += 100;
            } else if piece.starts_with('.') {
                score += 10;
            } else {
                score += 1;
                // Attached classes: div.hero
                score += 10 * piece.matches('.').count() as u32;
            }
        }
    }
    score
}

/// Embedded source code entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    pub lang: String,
    pub code: String,
}

/// The KIR envelope, minus the live component tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KirDocument {
    pub metadata: Option<SourceMetadata>,
    pub app: Option<AppProperties>,
    pub definitions: Vec<ComponentDefinition>,
    pub manifest: Option<ReactiveManifest>,
    pub stylesheet: Option<Stylesheet>,
    /// Preserved verbatim for round-trip codegen
    pub source_structures: Option<Value>,
    /// Preserved verbatim for round-trip codegen
    pub logic_block: Option<Value>,
    pub sources: Vec<SourceEntry>,
}

impl KirDocument {
    pub fn find_definition(&self, name: &str) -> Option<&ComponentDefinition> {
        self.definitions.iter().find(|d| d.name == name)
    }
}
