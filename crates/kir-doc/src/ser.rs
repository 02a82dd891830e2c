//! KIR Serialization
//!
//! Walks a component tree into document form. Only non-default property
//! values are emitted, except that a property with an active reactive
//! binding is always written: dropping it would silently lose the binding
//! on reload. Template/module instances are emitted as short references in
//! instance mode and as full subtrees in template mode.

use serde_json::{json, Map, Value};

use kir_tree::{
    Color, ComponentKind, ComponentTree, HandlerRef, LayoutMode, LayoutProps, NodeId, Payload,
    PositionMode, SelectorKind, Style, TextDecoration,
};

use crate::document::KirDocument;
use crate::error::DocError;
use crate::value::{
    align_items_to_str, color_to_string, dimension_to_string, gradient_to_value, justify_to_str,
    spacing_to_value, text_align_to_str,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Instances become short references
    Instance,
    /// Full subtrees, `{{…}}` expressions preserved as text
    Template,
}

/// Serialize a document and its tree to KIR text.
pub fn serialize_document(document: &KirDocument, tree: &ComponentTree) -> Result<String, DocError> {
    let value = document_to_value(document, tree).ok_or(DocError::MissingRoot)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Assemble the KIR envelope. `None` when the tree has no root.
pub fn document_to_value(document: &KirDocument, tree: &ComponentTree) -> Option<Value> {
    let root = serialize_node(tree, tree.root(), Mode::Instance)?;

    let mut wrapper = Map::new();
    wrapper.insert("format".into(), json!("kir"));

    if let Some(metadata) = &document.metadata {
        if let Ok(value) = serde_json::to_value(metadata) {
            if value.as_object().map(|o| !o.is_empty()).unwrap_or(false) {
                wrapper.insert("metadata".into(), value);
            }
        }
    }
    if let Some(app) = &document.app {
        if let Ok(value) = serde_json::to_value(app) {
            if value.as_object().map(|o| !o.is_empty()).unwrap_or(false) {
                wrapper.insert("app".into(), value);
            }
        }
    }
    if !document.definitions.is_empty() {
        if let Ok(value) = serde_json::to_value(&document.definitions) {
            wrapper.insert("component_definitions".into(), value);
        }
    }
    if let Some(manifest) = &document.manifest {
        if !manifest.is_empty() {
            if let Ok(value) = serde_json::to_value(manifest) {
                wrapper.insert("reactive_manifest".into(), value);
            }
        }
    }
    if let Some(stylesheet) = &document.stylesheet {
        if !stylesheet.is_empty() {
            if let Ok(value) = serde_json::to_value(stylesheet) {
                wrapper.insert("stylesheet".into(), value);
            }
        }
    }
    if let Some(ss) = &document.source_structures {
        wrapper.insert("source_structures".into(), ss.clone());
    }
    if let Some(logic) = &document.logic_block {
        wrapper.insert("logic_block".into(), logic.clone());
    }

    wrapper.insert("root".into(), root);

    if !document.sources.is_empty() {
        if let Ok(value) = serde_json::to_value(&document.sources) {
            wrapper.insert("sources".into(), value);
        }
    }

    Some(Value::Object(wrapper))
}

/// Serialize one subtree in instance mode.
pub fn serialize_component(tree: &ComponentTree, id: NodeId) -> Option<Value> {
    serialize_node(tree, id, Mode::Instance)
}

/// Serialize one subtree as a template body (full expansion, expressions
/// preserved). Used when persisting a `component_definitions` entry.
pub fn serialize_component_template(tree: &ComponentTree, id: NodeId) -> Option<Value> {
    serialize_node(tree, id, Mode::Template)
}

fn serialize_node(tree: &ComponentTree, id: NodeId, mode: Mode) -> Option<Value> {
    let node = tree.get(id)?;
    let mut obj = Map::new();

    // Instance mode: a template instance collapses to a short reference.
    if mode == Mode::Instance {
        if let Some(reference) = node.component_ref.as_deref() {
            obj.insert("type".into(), json!(reference));
            obj.insert("id".into(), json!(node.id));
            flatten_props(&mut obj, node.component_props.as_ref());
            return Some(Value::Object(obj));
        }
        if let Some(module) = node.module_ref.as_deref() {
            let type_str = match node.export_name.as_deref() {
                Some(export) => format!("$module:{module}#{export}"),
                None => format!("$module:{module}"),
            };
            obj.insert("type".into(), json!(type_str));
            // Preserved so a failed resolution can degrade to the real type.
            obj.insert("actual_type".into(), json!(node.kind.as_str()));
            obj.insert("id".into(), json!(node.id));
            flatten_props(&mut obj, node.component_props.as_ref());

            if let Some(text) = &node.text {
                obj.insert("text".into(), json!(text));
            }
            if let Some(style) = node.style.as_deref() {
                if matches!(style.background, Color::Solid { .. }) {
                    obj.insert("background".into(), json!(color_to_string(&style.background)));
                }
                if !style.font.color.is_transparent() {
                    obj.insert("color".into(), json!(color_to_string(&style.font.color)));
                }
            }
            return Some(Value::Object(obj));
        }
    }

    obj.insert("id".into(), json!(node.id));
    obj.insert("type".into(), json!(node.kind.as_str()));

    if let Some(tag) = &node.tag {
        obj.insert("tag".into(), json!(tag));
    }
    if let Some(class) = &node.css_class {
        obj.insert("css_class".into(), json!(class));
    }
    if node.selector_kind != SelectorKind::None {
        obj.insert("selector_type".into(), json!(node.selector_kind.as_str()));
    }

    // Template mode keeps `{{…}}` expressions as the text value so the
    // placeholders survive in the stored definition.
    if mode == Mode::Template && node.text_expression.is_some() {
        let expr = node.text_expression.as_deref().unwrap_or_default();
        obj.insert("text".into(), json!(expr));
        obj.insert("text_expression".into(), json!(expr));
    } else {
        if let Some(text) = &node.text {
            obj.insert("text".into(), json!(text));
        }
        if let Some(expr) = &node.text_expression {
            obj.insert("text_expression".into(), json!(expr));
        }
    }

    if let Some(scope) = &node.scope {
        obj.insert("scope".into(), json!(scope));
    }
    if mode == Mode::Template {
        if let Some(reference) = &node.component_ref {
            obj.insert("component_ref".into(), json!(reference));
        }
    }

    let default_style;
    let style = match node.style.as_deref() {
        Some(s) => s,
        None => {
            default_style = Style::default();
            &default_style
        }
    };
    serialize_style(&mut obj, style, node);

    let default_layout;
    let layout = match node.layout.as_deref() {
        Some(l) => l,
        None => {
            default_layout = LayoutProps::default();
            &default_layout
        }
    };
    serialize_layout(&mut obj, layout, node);

    serialize_payload(&mut obj, node);
    serialize_events(&mut obj, node);
    serialize_bindings(&mut obj, node);

    if let Some(cond) = &node.visible_condition {
        obj.insert("visible_condition".into(), json!(cond));
        if !node.visible_when_true {
            obj.insert("visible_when_true".into(), json!(false));
        }
    }
    if let Some(src) = &node.each_source {
        obj.insert("each_source".into(), json!(src));
    }
    if let Some(item) = &node.each_item_name {
        obj.insert("each_item_name".into(), json!(item));
    }
    if let Some(index) = &node.each_index_name {
        obj.insert("each_index_name".into(), json!(index));
    }

    // Children. A tab content node serializes every registered panel, not
    // only the currently visible one in its live child list.
    let child_ids: Vec<NodeId> = match (&node.kind, &node.payload) {
        (ComponentKind::TabContent, Payload::TabContent(state)) if !state.panels.is_empty() => {
            state.panels.clone()
        }
        _ => node.children.clone(),
    };
    if !child_ids.is_empty() {
        let children: Vec<Value> =
            child_ids.iter().filter_map(|c| serialize_node(tree, *c, mode)).collect();
        obj.insert("children".into(), Value::Array(children));
    }

    Some(Value::Object(obj))
}

fn flatten_props(obj: &mut Map<String, Value>, props: Option<&Value>) {
    if let Some(Value::Object(props)) = props {
        for (key, value) in props {
            obj.insert(key.clone(), value.clone());
        }
    }
}

// ============================================================================
// Style Serialization
// ============================================================================

fn serialize_style(obj: &mut Map<String, Value>, style: &Style, node: &kir_tree::Component) {
    if !style.width.is_auto() {
        obj.insert("width".into(), json!(dimension_to_string(style.width)));
    }
    if !style.height.is_auto() {
        obj.insert("height".into(), json!(dimension_to_string(style.height)));
    }
    if !style.visible {
        obj.insert("visible".into(), json!(false));
    }
    if (style.opacity - 1.0).abs() > 0.001 {
        obj.insert("opacity".into(), json!(style.opacity));
    }
    if style.z_index != 0 {
        obj.insert("zIndex".into(), json!(style.z_index));
    }

    match &style.background {
        Color::Gradient(gradient) => {
            obj.insert("backgroundGradient".into(), gradient_to_value(gradient));
        }
        background => {
            if !background.is_transparent() || node.has_binding("background") {
                obj.insert("background".into(), json!(color_to_string(background)));
            }
        }
    }

    if !style.border.is_none() {
        let mut border = Map::new();
        if style.border.width > 0.0 {
            border.insert("width".into(), json!(style.border.width));
            border.insert("color".into(), json!(color_to_string(&style.border.color)));
        }
        if style.border.radius > 0.0 {
            border.insert("radius".into(), json!(style.border.radius));
        }
        obj.insert("border".into(), Value::Object(border));
    }

    if style.position != PositionMode::Relative {
        let pos = match style.position {
            PositionMode::Absolute => "absolute",
            PositionMode::Fixed => "fixed",
            PositionMode::Relative => "relative",
        };
        obj.insert("position".into(), json!(pos));
    }
    if style.absolute_x != 0.0 || style.absolute_y != 0.0 {
        obj.insert("left".into(), json!(style.absolute_x));
        obj.insert("top".into(), json!(style.absolute_y));
    }

    if style.font.size > 0.0 || node.has_binding("fontSize") {
        obj.insert("fontSize".into(), json!(style.font.size));
    }
    if let Some(family) = &style.font.family {
        if !family.is_empty() {
            obj.insert("fontFamily".into(), json!(family));
        }
    }
    if style.font.weight != 400 && style.font.weight > 0 {
        obj.insert("fontWeight".into(), json!(style.font.weight));
    }
    if style.font.bold {
        obj.insert("fontBold".into(), json!(true));
    }
    if style.font.italic {
        obj.insert("fontItalic".into(), json!(true));
    }
    if style.font.line_height > 0.0 {
        obj.insert("lineHeight".into(), json!(style.font.line_height));
    }
    if !style.font.color.is_transparent() || node.has_binding("color") {
        obj.insert("color".into(), json!(color_to_string(&style.font.color)));
    }
    if style.font.align != kir_tree::TextAlign::Left {
        obj.insert("textAlign".into(), json!(text_align_to_str(style.font.align)));
    }
    if style.font.letter_spacing != 0.0 {
        obj.insert("letterSpacing".into(), json!(style.font.letter_spacing));
    }
    let deco = match style.font.decoration {
        TextDecoration::Underline => "underline",
        TextDecoration::Overline => "overline",
        TextDecoration::LineThrough => "line-through",
        TextDecoration::None => "",
    };
    if !deco.is_empty() {
        obj.insert("textDecoration".into(), json!(deco));
    }

    if !style.padding.is_zero() {
        obj.insert("padding".into(), spacing_to_value(style.padding));
    }
    if !style.margin.is_zero() {
        obj.insert("margin".into(), spacing_to_value(style.margin));
    }

    if !style.transform.is_identity() {
        let mut transform = Map::new();
        let t = &style.transform;
        if t.translate_x != 0.0 || t.translate_y != 0.0 {
            transform.insert("translate".into(), json!([t.translate_x, t.translate_y]));
        }
        if (t.scale_x - 1.0).abs() > 0.001 || (t.scale_y - 1.0).abs() > 0.001 {
            transform.insert("scale".into(), json!([t.scale_x, t.scale_y]));
        }
        if t.rotate.abs() > 0.001 {
            transform.insert("rotate".into(), json!(t.rotate));
        }
        obj.insert("transform".into(), Value::Object(transform));
    }
}

// ============================================================================
// Layout Serialization
// ============================================================================

fn serialize_layout(obj: &mut Map<String, Value>, layout: &LayoutProps, node: &kir_tree::Component) {
    if layout.display_explicit {
        let display = match layout.mode {
            LayoutMode::Grid => "grid",
            LayoutMode::Block => "block",
            LayoutMode::None => "none",
            LayoutMode::Flex => "flex",
        };
        obj.insert("display".into(), json!(display));
    }

    if !layout.min_width.is_auto() {
        obj.insert("minWidth".into(), json!(dimension_to_string(layout.min_width)));
    }
    if !layout.min_height.is_auto() {
        obj.insert("minHeight".into(), json!(dimension_to_string(layout.min_height)));
    }
    if !layout.max_width.is_auto() {
        obj.insert("maxWidth".into(), json!(dimension_to_string(layout.max_width)));
    }
    if !layout.max_height.is_auto() {
        obj.insert("maxHeight".into(), json!(dimension_to_string(layout.max_height)));
    }

    if layout.flex.direction.is_row() {
        obj.insert("flexDirection".into(), json!("row"));
    }
    if layout.flex.justify_content != kir_tree::Alignment::Start
        || node.has_binding("justifyContent")
    {
        obj.insert("justifyContent".into(), json!(justify_to_str(layout.flex.justify_content)));
    }
    if layout.flex.cross_axis != kir_tree::Alignment::Start || node.has_binding("alignItems") {
        obj.insert("alignItems".into(), json!(align_items_to_str(layout.flex.cross_axis)));
    }
    if layout.flex.gap > 0.0 || node.has_binding("gap") {
        obj.insert("gap".into(), json!(layout.flex.gap));
    }
    if layout.flex.grow > 0 {
        obj.insert("flexGrow".into(), json!(layout.flex.grow));
    }
    if layout.flex.shrink != 1 {
        obj.insert("flexShrink".into(), json!(layout.flex.shrink));
    }
    if layout.flex.wrap {
        obj.insert("flexWrap".into(), json!(true));
    }
    if layout.aspect_ratio > 0.0 {
        obj.insert("aspectRatio".into(), json!(layout.aspect_ratio));
    }

    if layout.mode == LayoutMode::Grid {
        let grid = &layout.grid;
        if grid.row_gap > 0.0 {
            obj.insert("rowGap".into(), json!(grid.row_gap));
        }
        if grid.column_gap > 0.0 {
            obj.insert("columnGap".into(), json!(grid.column_gap));
        }
        if !grid.columns.is_empty() {
            obj.insert("gridColumns".into(), grid_tracks_to_value(&grid.columns));
        }
        if !grid.rows.is_empty() {
            obj.insert("gridRows".into(), grid_tracks_to_value(&grid.rows));
        }
        if grid.justify_items != kir_tree::Alignment::Start {
            obj.insert("justifyItems".into(), json!(align_items_to_str(grid.justify_items)));
        }
        if grid.align_items != kir_tree::Alignment::Start {
            obj.insert("gridAlignItems".into(), json!(align_items_to_str(grid.align_items)));
        }
    }
}

fn grid_tracks_to_value(tracks: &[kir_tree::GridTrack]) -> Value {
    let values: Vec<Value> = tracks
        .iter()
        .map(|t| {
            let kind = match t.kind {
                kir_tree::GridTrackKind::Px => "px",
                kir_tree::GridTrackKind::Percent => "percent",
                kir_tree::GridTrackKind::Fr => "fr",
                kir_tree::GridTrackKind::Auto => "auto",
            };
            json!({ "type": kind, "value": t.value })
        })
        .collect();
    Value::Array(values)
}

// ============================================================================
// Payload Serialization
// ============================================================================

fn alignment_to_cell_str(a: kir_tree::Alignment) -> &'static str {
    match a {
        kir_tree::Alignment::Center => "center",
        kir_tree::Alignment::End => "end",
        _ => "start",
    }
}

fn alignment_to_vertical_str(a: kir_tree::Alignment) -> &'static str {
    match a {
        kir_tree::Alignment::Center => "middle",
        kir_tree::Alignment::End => "bottom",
        _ => "top",
    }
}

fn serialize_payload(obj: &mut Map<String, Value>, node: &kir_tree::Component) {
    match &node.payload {
        Payload::None => {}

        Payload::Checkbox { checked } => {
            obj.insert("checked".into(), json!(checked));
        }

        Payload::Image { src, alt } => {
            obj.insert("src".into(), json!(src));
            if let Some(alt) = alt {
                obj.insert("alt".into(), json!(alt));
            }
        }

        Payload::Dropdown(state) => {
            let mut dropdown = Map::new();
            if let Some(placeholder) = &state.placeholder {
                dropdown.insert("placeholder".into(), json!(placeholder));
            }
            if !state.options.is_empty() {
                dropdown.insert("options".into(), json!(state.options));
            }
            dropdown.insert("selectedIndex".into(), json!(state.selected));
            dropdown.insert("isOpen".into(), json!(state.open));
            obj.insert("dropdown_state".into(), Value::Object(dropdown));
        }

        Payload::Modal(state) => {
            let mut modal = Map::new();
            modal.insert("isOpen".into(), json!(state.open));
            if let Some(title) = &state.title {
                modal.insert("title".into(), json!(title));
            }
            obj.insert("modal_state".into(), Value::Object(modal));
        }

        Payload::TabGroup(state) => {
            obj.insert("selectedIndex".into(), json!(state.selected));
            if state.reorderable {
                obj.insert("reorderable".into(), json!(true));
            }
        }

        Payload::Tab(data) => {
            if let Some(title) = &data.title {
                obj.insert("title".into(), json!(title));
            }
            if let Some(color) = &data.active_background {
                obj.insert("activeBackground".into(), json!(color_to_string(color)));
            }
            if let Some(color) = &data.text_color {
                obj.insert("tabTextColor".into(), json!(color_to_string(color)));
            }
            if let Some(color) = &data.active_text_color {
                obj.insert("activeTextColor".into(), json!(color_to_string(color)));
            }
        }

        Payload::TabContent(state) => {
            obj.insert("selectedIndex".into(), json!(state.selected));
        }

        Payload::Table(state) => {
            let mut config = Map::new();
            if !state.columns.is_empty() {
                let columns: Vec<Value> = state
                    .columns
                    .iter()
                    .map(|col| {
                        let mut c = Map::new();
                        c.insert("width".into(), json!(dimension_to_string(col.width)));
                        if !col.min_width.is_auto() {
                            c.insert("minWidth".into(), json!(dimension_to_string(col.min_width)));
                        }
                        if !col.max_width.is_auto() {
                            c.insert("maxWidth".into(), json!(dimension_to_string(col.max_width)));
                        }
                        if col.alignment != kir_tree::Alignment::Start {
                            c.insert("alignment".into(), json!(alignment_to_cell_str(col.alignment)));
                        }
                        c.insert("autoSize".into(), json!(col.auto_size));
                        Value::Object(c)
                    })
                    .collect();
                config.insert("columns".into(), Value::Array(columns));
            }
            let styling = &state.styling;
            config.insert("borderColor".into(), json!(color_to_string(&styling.border_color)));
            config.insert(
                "headerBackground".into(),
                json!(color_to_string(&styling.header_background)),
            );
            config.insert(
                "evenRowBackground".into(),
                json!(color_to_string(&styling.even_row_background)),
            );
            config.insert(
                "oddRowBackground".into(),
                json!(color_to_string(&styling.odd_row_background)),
            );
            config.insert("borderWidth".into(), json!(styling.border_width));
            config.insert("cellPadding".into(), json!(styling.cell_padding));
            config.insert("showBorders".into(), json!(styling.show_borders));
            config.insert("striped".into(), json!(styling.striped));
            config.insert("headerSticky".into(), json!(styling.header_sticky));
            config.insert("collapseBorders".into(), json!(styling.collapse_borders));
            obj.insert("table_config".into(), Value::Object(config));
        }

        Payload::TableCell(cell) => {
            let mut data = Map::new();
            data.insert("colspan".into(), json!(cell.colspan));
            data.insert("rowspan".into(), json!(cell.rowspan));
            data.insert("alignment".into(), json!(alignment_to_cell_str(cell.alignment)));
            data.insert(
                "verticalAlignment".into(),
                json!(alignment_to_vertical_str(cell.vertical_alignment)),
            );
            obj.insert("cell_data".into(), Value::Object(data));
        }

        Payload::Heading(heading) => {
            obj.insert("level".into(), json!(heading.level));
            if let Some(anchor) = &heading.anchor {
                obj.insert("id_attr".into(), json!(anchor));
            }
        }

        Payload::CodeBlock(code) => {
            if let Some(language) = &code.language {
                obj.insert("language".into(), json!(language));
            }
            obj.insert("code".into(), json!(code.code));
            if code.show_line_numbers {
                obj.insert("showLineNumbers".into(), json!(true));
            }
            if code.start_line != 1 {
                obj.insert("startLine".into(), json!(code.start_line));
            }
        }

        Payload::List(list) => {
            obj.insert(
                "listType".into(),
                json!(if list.ordered { "ordered" } else { "unordered" }),
            );
            if list.start != 1 {
                obj.insert("start".into(), json!(list.start));
            }
            if !list.tight {
                obj.insert("tight".into(), json!(false));
            }
        }

        Payload::ListItem(item) => {
            if item.number != 0 {
                obj.insert("number".into(), json!(item.number));
            }
            if let Some(marker) = &item.marker {
                obj.insert("marker".into(), json!(marker));
            }
            if item.task {
                obj.insert("taskItem".into(), json!(true));
                obj.insert("checked".into(), json!(item.checked));
            }
        }

        Payload::Link(link) => {
            obj.insert("href".into(), json!(link.url));
            if let Some(title) = &link.title {
                obj.insert("title".into(), json!(title));
            }
            if let Some(target) = &link.target {
                obj.insert("target".into(), json!(target));
            }
            if let Some(rel) = &link.rel {
                obj.insert("rel".into(), json!(rel));
            }
        }

        Payload::Placeholder { name, preserve } => {
            obj.insert("name".into(), json!(name));
            if *preserve {
                obj.insert("preserve".into(), json!(true));
            }
        }

        Payload::Custom(value) => {
            obj.insert("custom_data".into(), value.clone());
        }
    }
}

fn serialize_events(obj: &mut Map<String, Value>, node: &kir_tree::Component) {
    if node.events.is_empty() {
        return;
    }
    let events: Vec<Value> = node
        .events
        .iter()
        .map(|binding| {
            let mut event = Map::new();
            event.insert("event".into(), json!(binding.kind.name()));
            match &binding.handler {
                HandlerRef::Logic(id) => {
                    event.insert("logic_id".into(), json!(id));
                }
                HandlerRef::Bytecode(id) => {
                    event.insert("function_id".into(), json!(id));
                }
                HandlerRef::Source(source) => {
                    let mut src = Map::new();
                    src.insert("language".into(), json!(source.language));
                    src.insert("code".into(), json!(source.code));
                    if let Some(file) = &source.file {
                        src.insert("file".into(), json!(file));
                    }
                    if source.line > 0 {
                        src.insert("line".into(), json!(source.line));
                    }
                    if !source.closure_vars.is_empty() {
                        src.insert("closures".into(), json!(source.closure_vars));
                    }
                    event.insert("source".into(), Value::Object(src));
                }
            }
            Value::Object(event)
        })
        .collect();
    obj.insert("events".into(), Value::Array(events));
}

fn serialize_bindings(obj: &mut Map<String, Value>, node: &kir_tree::Component) {
    if node.property_bindings.is_empty() {
        return;
    }
    let mut bindings = Map::new();
    for binding in &node.property_bindings {
        let mut b = Map::new();
        b.insert("source_expr".into(), json!(binding.source_expr));
        if let Some(resolved) = &binding.resolved_value {
            b.insert("resolved_value".into(), json!(resolved));
        }
        b.insert("binding_type".into(), json!(binding.kind.as_str()));
        bindings.insert(binding.property.clone(), Value::Object(b));
    }
    obj.insert("property_bindings".into(), Value::Object(bindings));
}

#[cfg(test)]
mod tests {
    use super::*;
    use kir_tree::{BindingKind, Component, PropertyBinding, Spacing};

    #[test]
    fn test_default_node_serializes_minimal() {
        let mut tree = ComponentTree::new();
        let id = tree.alloc(Component::new(1, ComponentKind::Container));
        tree.set_root(id);

        let value = serialize_component(&tree, id).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["type"], json!("Container"));
        assert_eq!(obj["id"], json!(1));
    }

    #[test]
    fn test_bound_default_still_emitted() {
        let mut tree = ComponentTree::new();
        let mut node = Component::new(1, ComponentKind::Row);
        node.property_bindings.push(PropertyBinding {
            property: "gap".into(),
            source_expr: "spacing".into(),
            resolved_value: Some("0".into()),
            kind: BindingKind::Reactive,
        });
        let id = tree.alloc(node);

        let value = serialize_component(&tree, id).unwrap();
        // gap is 0 (the default) but bound, so it must appear.
        assert_eq!(value["gap"], json!(0.0));
        assert!(value.get("property_bindings").is_some());
    }

    #[test]
    fn test_unbound_default_not_emitted() {
        let mut tree = ComponentTree::new();
        let id = tree.alloc(Component::new(1, ComponentKind::Row));
        let value = serialize_component(&tree, id).unwrap();
        assert!(value.get("gap").is_none());
        assert!(value.get("justifyContent").is_none());
    }

    #[test]
    fn test_uniform_padding_collapses() {
        let mut tree = ComponentTree::new();
        let mut node = Component::new(1, ComponentKind::Container);
        node.style_mut().padding = Spacing::uniform(8.0);
        let id = tree.alloc(node);

        let value = serialize_component(&tree, id).unwrap();
        assert_eq!(value["padding"], json!(8.0));
    }

    #[test]
    fn test_instance_reference_short_form() {
        let mut tree = ComponentTree::new();
        let mut node = Component::new(9, ComponentKind::Container);
        node.component_ref = Some("Counter".into());
        node.component_props = Some(json!({"start": 5}));
        let inner = tree.alloc(Component::new(10, ComponentKind::Text));
        let id = tree.alloc(node);
        tree.append_child(id, inner);

        let value = serialize_component(&tree, id).unwrap();
        assert_eq!(value["type"], json!("Counter"));
        assert_eq!(value["start"], json!(5));
        // The expanded subtree is not emitted in instance mode.
        assert!(value.get("children").is_none());
    }

    #[test]
    fn test_module_reference_preserves_actual_type() {
        let mut tree = ComponentTree::new();
        let mut node = Component::new(3, ComponentKind::Button);
        node.module_ref = Some("components/tabs".into());
        node.export_name = Some("buildTabs".into());
        let id = tree.alloc(node);

        let value = serialize_component(&tree, id).unwrap();
        assert_eq!(value["type"], json!("$module:components/tabs#buildTabs"));
        assert_eq!(value["actual_type"], json!("Button"));
    }
}
