//! Edge case tests: malformed documents, degraded references, layout
//! clamping, validation findings.

use kir_engine::{DocError, Engine, ModuleResolver, Warning};
use kir_tree::{ComponentKind, Payload};
use serde_json::json;

// ============================================================================
// MALFORMED INPUT
// ============================================================================

#[test]
fn unparseable_text_fails() {
    let err = Engine::load_str("{not json").unwrap_err();
    assert!(matches!(err, DocError::Malformed(_)));
}

#[test]
fn non_object_top_level_fails() {
    let err = Engine::load_str("[1, 2, 3]").unwrap_err();
    assert!(matches!(err, DocError::NotAnObject));
}

#[test]
fn wrong_format_tag_fails() {
    let doc = json!({"format": "xml", "root": {"type": "Container"}}).to_string();
    let err = Engine::load_str(&doc).unwrap_err();
    assert!(matches!(err, DocError::WrongFormat(_)));
}

#[test]
fn missing_root_fails() {
    let doc = json!({"format": "kir"}).to_string();
    let err = Engine::load_str(&doc).unwrap_err();
    assert!(matches!(err, DocError::MissingRoot));
}

#[test]
fn empty_object_fails() {
    let err = Engine::load_str("{}").unwrap_err();
    assert!(matches!(err, DocError::MissingRoot));
}

// ============================================================================
// FORWARD COMPATIBILITY
// ============================================================================

#[test]
fn unknown_type_becomes_container() {
    let doc = json!({
        "format": "kir",
        "root": {"id": 1, "type": "HoloDeck", "children": [
            {"id": 2, "type": "Text", "text": "still here"}
        ]}
    })
    .to_string();

    let engine = Engine::load_str(&doc).unwrap();
    let root = engine.tree().get(engine.root()).unwrap();
    assert_eq!(root.kind, ComponentKind::Container);
    assert_eq!(root.children.len(), 1);
    // The degradation is observable.
    assert!(engine
        .warnings()
        .iter()
        .any(|w| matches!(w, Warning::UnknownDefinition { name } if name == "HoloDeck")));
}

#[test]
fn body_alias_preserves_tag() {
    let doc = json!({
        "format": "kir",
        "root": {"id": 1, "type": "Body"}
    })
    .to_string();

    let engine = Engine::load_str(&doc).unwrap();
    let root = engine.tree().get(engine.root()).unwrap();
    assert_eq!(root.kind, ComponentKind::Container);
    assert_eq!(root.tag.as_deref(), Some("Body"));

    // The alias survives the next round trip via the tag.
    let reloaded = Engine::load_str(&engine.save().unwrap()).unwrap();
    assert_eq!(reloaded.tree().get(reloaded.root()).unwrap().tag.as_deref(), Some("Body"));
}

// ============================================================================
// MODULE REFERENCES
// ============================================================================

struct FixedResolver {
    text: String,
}

impl ModuleResolver for FixedResolver {
    fn load(&self, module_id: &str) -> Option<String> {
        if module_id == "widgets/fancy" {
            Some(self.text.clone())
        } else {
            None
        }
    }
}

#[test]
fn module_reference_expands_through_resolver() {
    let module = json!({
        "format": "kir",
        "component_definitions": [{
            "name": "Build",
            "props": [],
            "state": [],
            "template": {"type": "Button", "text": "From module"}
        }],
        "root": {"id": 1, "type": "Container"}
    })
    .to_string();

    let doc = json!({
        "format": "kir",
        "root": {"id": 5, "type": "$module:widgets/fancy#Build", "actual_type": "Button"}
    })
    .to_string();

    let resolver = FixedResolver { text: module };
    let engine = Engine::load_str_with_resolver(&doc, &resolver).unwrap();
    assert!(engine.warnings().is_empty());

    let root = engine.tree().get(engine.root()).unwrap();
    assert_eq!(root.kind, ComponentKind::Button);
    assert_eq!(root.text.as_deref(), Some("From module"));
    assert_eq!(root.module_ref.as_deref(), Some("widgets/fancy"));
    assert_eq!(root.export_name.as_deref(), Some("Build"));
    assert_eq!(root.id, 5);
}

#[test]
fn unresolved_module_degrades_with_warning() {
    let doc = json!({
        "format": "kir",
        "root": {"id": 5, "type": "$module:widgets/missing#Build", "actual_type": "Button",
                 "text": "fallback"}
    })
    .to_string();

    let engine = Engine::load_str(&doc).unwrap();

    // The preserved literal type is used instead of a generic container,
    // and the degradation is observable.
    let root = engine.tree().get(engine.root()).unwrap();
    assert_eq!(root.kind, ComponentKind::Button);
    assert_eq!(root.text.as_deref(), Some("fallback"));
    assert_eq!(
        engine.warnings(),
        &[Warning::ModuleFallback {
            module: "widgets/missing".to_string(),
            export: Some("Build".to_string()),
        }]
    );
}

#[test]
fn unresolved_module_without_actual_type_becomes_container() {
    let doc = json!({
        "format": "kir",
        "root": {"id": 5, "type": "$module:gone"}
    })
    .to_string();

    let engine = Engine::load_str(&doc).unwrap();
    assert_eq!(engine.tree().get(engine.root()).unwrap().kind, ComponentKind::Container);
    assert_eq!(engine.warnings().len(), 1);
}

// ============================================================================
// TEMPLATE EDGE CASES
// ============================================================================

#[test]
fn unresolved_placeholders_stay_verbatim() {
    let doc = json!({
        "format": "kir",
        "component_definitions": [{
            "name": "Card",
            "props": [{"name": "title", "type": "string", "default": "Card"}],
            "state": [],
            "template": {"type": "Column", "children": [
                {"type": "Text", "text": "{{title}}"},
                {"type": "Text", "text": "{{subtitle}} stays"}
            ]}
        }],
        "root": {"id": 1, "type": "Card", "title": "Hello"}
    })
    .to_string();

    let engine = Engine::load_str(&doc).unwrap();
    let tree = engine.tree();
    let root = tree.get(engine.root()).unwrap();
    let texts: Vec<_> = root
        .children
        .iter()
        .map(|c| tree.get(*c).unwrap().text.clone().unwrap())
        .collect();

    assert_eq!(texts[0], "Hello");
    // No `subtitle` in the state context: left for later passes.
    assert_eq!(texts[1], "{{subtitle}} stays");
}

#[test]
fn unknown_definition_parses_as_plain_node() {
    // "Gadget" is not defined anywhere; the node keeps its shape as a
    // container rather than failing the document.
    let doc = json!({
        "format": "kir",
        "root": {"id": 1, "type": "Gadget", "children": [
            {"id": 2, "type": "Text", "text": "inner"}
        ]}
    })
    .to_string();

    let engine = Engine::load_str(&doc).unwrap();
    let root = engine.tree().get(engine.root()).unwrap();
    assert_eq!(root.kind, ComponentKind::Container);
    assert_eq!(root.children.len(), 1);
}

// ============================================================================
// TAB CONTENT SERIALIZES EVERY PANEL
// ============================================================================

#[test]
fn all_panels_serialized_after_selection() {
    let doc = json!({
        "format": "kir",
        "root": {"id": 10, "type": "TabGroup", "children": [
            {"id": 11, "type": "TabContent", "children": [
                {"id": 12, "type": "TabPanel", "children": [{"id": 15, "type": "Text", "text": "a"}]},
                {"id": 13, "type": "TabPanel", "children": [{"id": 16, "type": "Text", "text": "b"}]},
                {"id": 14, "type": "TabPanel", "children": [{"id": 17, "type": "Text", "text": "c"}]}
            ]}
        ]}
    })
    .to_string();

    let mut engine = Engine::load_str(&doc).unwrap();
    engine.select_tab(10, 2);

    // The live child list shrank to the selected panel.
    let tree = engine.tree();
    let content = tree.find_by_doc_id(11).unwrap();
    assert_eq!(tree.get(content).unwrap().children.len(), 1);
    match &tree.get(content).unwrap().payload {
        Payload::TabContent(state) => assert_eq!(state.selected, 2),
        other => panic!("unexpected payload {other:?}"),
    }

    // But the document still carries all three panels.
    let value: serde_json::Value = serde_json::from_str(&engine.save().unwrap()).unwrap();
    let panels = value["root"]["children"][0]["children"].as_array().unwrap();
    assert_eq!(panels.len(), 3);
}

// ============================================================================
// LAYOUT THROUGH THE ENGINE
// ============================================================================

#[test]
fn explicit_width_clamps_to_viewport_constraint() {
    let doc = json!({
        "format": "kir",
        "root": {"id": 1, "type": "Column", "children": [
            {"id": 2, "type": "Canvas", "width": "500px", "height": "100px"}
        ]}
    })
    .to_string();

    let mut engine = Engine::load_str(&doc).unwrap();
    engine.layout(300.0, 600.0);

    let canvas = engine.tree().find_by_doc_id(2).unwrap();
    let state = engine.tree().get(canvas).unwrap().layout_state;
    assert!(state.layout_valid);
    assert_eq!(state.rect.width, 300.0);
    assert_eq!(state.rect.height, 100.0);
}

#[test]
fn canvas_defaults_to_300_by_150() {
    let doc = json!({
        "format": "kir",
        "root": {"id": 1, "type": "Column", "children": [{"id": 2, "type": "Canvas"}]}
    })
    .to_string();

    let mut engine = Engine::load_str(&doc).unwrap();
    engine.layout(800.0, 600.0);

    let canvas = engine.tree().find_by_doc_id(2).unwrap();
    let rect = engine.tree().get(canvas).unwrap().layout_state.rect;
    assert_eq!((rect.width, rect.height), (300.0, 150.0));
}

#[test]
fn layout_is_idempotent() {
    let doc = json!({
        "format": "kir",
        "root": {"id": 1, "type": "Column", "gap": 8.0, "children": [
            {"id": 2, "type": "Input"},
            {"id": 3, "type": "Row", "justifyContent": "space-between",
             "width": "400px", "children": [
                {"id": 4, "type": "Input"},
                {"id": 5, "type": "Checkbox", "checked": false}
            ]}
        ]}
    })
    .to_string();

    let mut engine = Engine::load_str(&doc).unwrap();

    engine.layout(640.0, 480.0);
    let collect = |engine: &Engine| -> Vec<kir_tree::Rect> {
        let tree = engine.tree();
        tree.descendants(engine.root())
            .iter()
            .map(|n| tree.get(*n).unwrap().layout_state.rect)
            .collect()
    };
    let first = collect(&engine);

    engine.layout(640.0, 480.0);
    let second = collect(&engine);

    assert_eq!(first, second);
}

// ============================================================================
// VALIDATION
// ============================================================================

#[test]
fn duplicate_ids_are_reported_not_fatal() {
    let doc = json!({
        "format": "kir",
        "root": {"id": 1, "type": "Column", "children": [
            {"id": 7, "type": "Text", "text": "a"},
            {"id": 7, "type": "Text", "text": "b"}
        ]}
    })
    .to_string();

    let engine = Engine::load_str(&doc).unwrap();
    let issues = engine.validate();
    assert!(issues.iter().any(|i| i.kind == kir_engine::IssueKind::DuplicateId));
}

#[test]
fn valid_document_has_no_findings() {
    let doc = json!({
        "format": "kir",
        "root": {"id": 1, "type": "Column", "children": [
            {"id": 2, "type": "Text", "text": "ok"}
        ]}
    })
    .to_string();

    let engine = Engine::load_str(&doc).unwrap();
    assert!(engine.validate().is_empty());
}
