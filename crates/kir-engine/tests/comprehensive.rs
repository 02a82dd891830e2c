//! End-to-end tests: template expansion, per-instance state, round-trip
//! serialization, binding preservation.

use kir_engine::Engine;
use kir_tree::{ComponentKind, ComponentTree, NodeId, Payload};
use serde_json::json;

fn find_descendant(
    tree: &ComponentTree,
    from: NodeId,
    kind: ComponentKind,
) -> Option<NodeId> {
    tree.descendants(from)
        .into_iter()
        .find(|id| tree.get(*id).map(|n| n.kind) == Some(kind))
}

// ============================================================================
// COUNTER SCENARIO
// ============================================================================

fn counter_document() -> String {
    json!({
        "format": "kir",
        "component_definitions": [{
            "name": "Counter",
            "props": [{"name": "start", "type": "int", "default": 0}],
            "state": [{"name": "count", "type": "int", "initial": {"var": "start"}}],
            "template": {
                "type": "Column",
                "children": [
                    {"type": "Text", "text_expression": "{{count}}"},
                    {"type": "Button", "text": "+"}
                ]
            }
        }],
        "root": {
            "id": 1,
            "type": "Column",
            "children": [
                {"id": 100, "type": "Counter", "start": 5},
                {"id": 200, "type": "Counter", "start": 10}
            ]
        }
    })
    .to_string()
}

#[test]
fn counter_instances_resolve_independent_state() {
    let engine = Engine::load_str(&counter_document()).unwrap();
    let tree = engine.tree();

    let root = engine.root();
    let instances = tree.get(root).unwrap().children.clone();
    assert_eq!(instances.len(), 2);

    let text_a = find_descendant(tree, instances[0], ComponentKind::Text).unwrap();
    let text_b = find_descendant(tree, instances[1], ComponentKind::Text).unwrap();

    assert_eq!(tree.get(text_a).unwrap().text.as_deref(), Some("5"));
    assert_eq!(tree.get(text_b).unwrap().text.as_deref(), Some("10"));

    // Expressions survive for reactive re-evaluation.
    assert_eq!(tree.get(text_a).unwrap().text_expression.as_deref(), Some("{{count}}"));
}

#[test]
fn counter_instances_have_disjoint_ids() {
    let engine = Engine::load_str(&counter_document()).unwrap();
    let tree = engine.tree();
    let instances = tree.get(engine.root()).unwrap().children.clone();

    let ids_a: Vec<u32> =
        tree.descendants(instances[0]).iter().map(|n| tree.get(*n).unwrap().id).collect();
    let ids_b: Vec<u32> =
        tree.descendants(instances[1]).iter().map(|n| tree.get(*n).unwrap().id).collect();

    assert_eq!(tree.get(instances[0]).unwrap().id, 100);
    assert_eq!(tree.get(instances[1]).unwrap().id, 200);
    for id in &ids_a {
        assert!(!ids_b.contains(id), "id {id} appears in both instances");
    }
}

#[test]
fn counter_instances_are_owner_tagged() {
    let engine = Engine::load_str(&counter_document()).unwrap();
    let tree = engine.tree();
    let instances = tree.get(engine.root()).unwrap().children.clone();

    for id in tree.descendants(instances[0]) {
        assert_eq!(tree.get(id).unwrap().owner_instance, 100);
    }
    for id in tree.descendants(instances[1]) {
        assert_eq!(tree.get(id).unwrap().owner_instance, 200);
    }
}

// ============================================================================
// TEMPLATE ISOLATION (tab state)
// ============================================================================

fn tabbed_document() -> String {
    json!({
        "format": "kir",
        "component_definitions": [{
            "name": "Tabbed",
            "props": [],
            "state": [],
            "template": {
                "type": "TabGroup",
                "children": [
                    {"type": "TabBar", "children": [
                        {"type": "Tab", "text": "First"},
                        {"type": "Tab", "text": "Second"}
                    ]},
                    {"type": "TabContent", "children": [
                        {"type": "TabPanel", "children": [{"type": "Text", "text": "P0"}]},
                        {"type": "TabPanel", "children": [{"type": "Text", "text": "P1"}]}
                    ]}
                ]
            }
        }],
        "root": {
            "id": 1,
            "type": "Column",
            "children": [
                {"id": 100, "type": "Tabbed"},
                {"id": 200, "type": "Tabbed"}
            ]
        }
    })
    .to_string()
}

#[test]
fn tab_selection_is_scoped_per_instance() {
    let mut engine = Engine::load_str(&tabbed_document()).unwrap();

    engine.select_tab(100, 1);

    let tree = engine.tree();
    let instances = tree.get(engine.root()).unwrap().children.clone();
    let content_a = find_descendant(tree, instances[0], ComponentKind::TabContent).unwrap();
    let content_b = find_descendant(tree, instances[1], ComponentKind::TabContent).unwrap();

    // Instance A shows only the selected panel; every panel stays
    // registered in the payload.
    let node_a = tree.get(content_a).unwrap();
    assert_eq!(node_a.children.len(), 1);
    match &node_a.payload {
        Payload::TabContent(state) => {
            assert_eq!(state.selected, 1);
            assert_eq!(state.panels.len(), 2);
        }
        other => panic!("unexpected payload {other:?}"),
    }

    // Instance B is untouched.
    let node_b = tree.get(content_b).unwrap();
    assert_eq!(node_b.children.len(), 2);
    match &node_b.payload {
        Payload::TabContent(state) => assert_eq!(state.selected, 0),
        other => panic!("unexpected payload {other:?}"),
    }
}

#[test]
fn hidden_tab_panels_survive_round_trip() {
    let mut engine = Engine::load_str(&tabbed_document()).unwrap();
    engine.select_tab(100, 1);

    let saved = engine.save().unwrap();
    let reloaded = Engine::load_str(&saved).unwrap();
    let tree = reloaded.tree();

    // Both instances still expand to two panels each.
    let instances = tree.get(reloaded.root()).unwrap().children.clone();
    for instance in instances {
        let content = find_descendant(tree, instance, ComponentKind::TabContent).unwrap();
        match &tree.get(content).unwrap().payload {
            Payload::TabContent(state) => assert_eq!(state.panels.len(), 2),
            other => panic!("unexpected payload {other:?}"),
        }
    }
}

// ============================================================================
// ROUND-TRIP IDENTITY
// ============================================================================

fn styled_document() -> String {
    json!({
        "format": "kir",
        "app": {"windowTitle": "Demo", "windowWidth": 1024.0, "windowHeight": 768.0},
        "root": {
            "id": 1,
            "type": "Column",
            "gap": 12.0,
            "padding": [10.0, 20.0],
            "children": [
                {"id": 2, "type": "Text", "text": "Hello", "fontSize": 18.0, "color": "#ff0080"},
                {"id": 3, "type": "Row", "justifyContent": "center", "children": [
                    {"id": 4, "type": "Button", "text": "Go", "background": "#336699",
                     "border": {"width": 1.0, "color": "#000000", "radius": 4.0}}
                ]},
                {"id": 5, "type": "Checkbox", "checked": true, "label": "On"},
                {"id": 6, "type": "Image", "src": "logo.png", "alt": "Logo",
                 "width": "64px", "height": "64px"}
            ]
        }
    })
    .to_string()
}

/// Structural equality in type, style, layout, text and child order.
fn assert_equivalent(a: &ComponentTree, a_id: NodeId, b: &ComponentTree, b_id: NodeId) {
    let na = a.get(a_id).unwrap();
    let nb = b.get(b_id).unwrap();
    assert_eq!(na.kind, nb.kind);
    assert_eq!(na.text, nb.text);
    assert_eq!(na.text_expression, nb.text_expression);
    assert_eq!(na.style, nb.style);
    assert_eq!(na.layout, nb.layout);
    assert_eq!(na.tag, nb.tag);
    assert_eq!(na.children.len(), nb.children.len());
    for (ca, cb) in na.children.iter().zip(nb.children.iter()) {
        assert_equivalent(a, *ca, b, *cb);
    }
}

#[test]
fn round_trip_preserves_structure() {
    let first = Engine::load_str(&styled_document()).unwrap();
    let saved = first.save().unwrap();
    let second = Engine::load_str(&saved).unwrap();

    assert_equivalent(first.tree(), first.root(), second.tree(), second.root());
}

#[test]
fn round_trip_is_stable() {
    let first = Engine::load_str(&styled_document()).unwrap();
    let once = first.save().unwrap();
    let second = Engine::load_str(&once).unwrap();
    let twice = second.save().unwrap();
    assert_eq!(once, twice);
}

#[test]
fn app_properties_round_trip() {
    let engine = Engine::load_str(&styled_document()).unwrap();
    assert_eq!(engine.window_title(), Some("Demo"));
    assert_eq!(engine.window_size(), (1024.0, 768.0));

    let reloaded = Engine::load_str(&engine.save().unwrap()).unwrap();
    assert_eq!(reloaded.window_title(), Some("Demo"));
}

// ============================================================================
// BINDING PRESERVATION
// ============================================================================

#[test]
fn bound_default_survives_round_trip() {
    let doc = json!({
        "format": "kir",
        "root": {
            "id": 1,
            "type": "Row",
            "gap": 0.0,
            "property_bindings": {
                "gap": {"source_expr": "spacing", "resolved_value": "0", "binding_type": "reactive"}
            }
        }
    })
    .to_string();

    let engine = Engine::load_str(&doc).unwrap();
    let saved = engine.save().unwrap();
    let value: serde_json::Value = serde_json::from_str(&saved).unwrap();

    // gap equals its type default, but the binding keeps it in the output.
    assert_eq!(value["root"]["gap"], json!(0.0));
    assert!(value["root"]["property_bindings"]["gap"].is_object());

    // And the binding itself survives the next parse.
    let reloaded = Engine::load_str(&saved).unwrap();
    let root = reloaded.tree().get(reloaded.root()).unwrap();
    assert!(root.has_binding("gap"));
}

#[test]
fn unbound_default_is_not_emitted() {
    let doc = json!({
        "format": "kir",
        "root": {"id": 1, "type": "Row"}
    })
    .to_string();

    let engine = Engine::load_str(&doc).unwrap();
    let value: serde_json::Value = serde_json::from_str(&engine.save().unwrap()).unwrap();
    assert!(value["root"].get("gap").is_none());
}

// ============================================================================
// ENVELOPE SECTIONS
// ============================================================================

#[test]
fn manifest_and_preserved_sections_round_trip() {
    let doc = json!({
        "format": "kir",
        "reactive_manifest": {
            "variables": [
                {"id": 1, "name": "count", "type": "int", "value": 0}
            ],
            "bindings": [
                {"component_id": 2, "variable_id": 1, "binding_type": "text",
                 "expression": "{{count}}"}
            ]
        },
        "source_structures": {"var_decls": [{"id": "const_1", "name": "alignments"}]},
        "logic_block": {"functions": [{"name": "increment", "language": "lua"}]},
        "sources": [{"lang": "lua", "code": "return 1"}],
        "root": {"id": 2, "type": "Text", "text_expression": "{{count}}"}
    })
    .to_string();

    let engine = Engine::load_str(&doc).unwrap();
    let manifest = engine.document().manifest.as_ref().unwrap();
    assert_eq!(manifest.variables.len(), 1);
    assert_eq!(manifest.find_variable("count").unwrap().id, 1);
    assert_eq!(manifest.bindings[0].component_id, 2);

    let reloaded = Engine::load_str(&engine.save().unwrap()).unwrap();
    assert_eq!(reloaded.document().manifest, engine.document().manifest);
    assert_eq!(reloaded.document().source_structures, engine.document().source_structures);
    assert_eq!(reloaded.document().logic_block, engine.document().logic_block);
    assert_eq!(reloaded.document().sources, engine.document().sources);
}

// ============================================================================
// STYLESHEET
// ============================================================================

#[test]
fn stylesheet_specificity_is_computed_on_load() {
    let doc = json!({
        "format": "kir",
        "stylesheet": {
            "variables": {"--accent": "#ff0080"},
            "rules": [
                {"selector": "#main .hero", "properties": {"background": "#111111"}},
                {"selector": "div", "properties": {"color": "#eeeeee"}}
            ],
            "mediaQueries": ["@media (max-width: 600px) { .hero { display: none } }"]
        },
        "root": {"id": 1, "type": "Container"}
    })
    .to_string();

    let engine = Engine::load_str(&doc).unwrap();
    let sheet = engine.document().stylesheet.as_ref().unwrap();
    assert_eq!(sheet.rules[0].specificity, 110);
    assert_eq!(sheet.rules[1].specificity, 1);
    assert_eq!(sheet.media_queries.len(), 1);
}
