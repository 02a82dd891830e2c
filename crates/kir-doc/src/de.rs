//! KIR Deserialization
//!
//! Parses a KIR document into the envelope model plus a live, layout-ready
//! component tree, expanding definition and module references on the way.
//! A malformed document fails the parse; a bad reference degrades to a
//! literal node and a warning, never aborting the whole document.

use serde_json::Value;

use kir_tree::{
    BindingKind, CodeBlockData, Component, ComponentKind, ComponentTree, DropdownState,
    EventBinding, EventKind, HandlerRef, HandlerSource, HeadingData, LayoutMode, LayoutProps,
    LinkData, ListData, ListItemData, ModalState, NodeId, Payload, PositionMode, PropertyBinding,
    SelectorKind, Style, TabContentState, TabData, TabGroupState, TableCellData, TableColumn,
    TableState, TextDecoration,
};

use crate::document::{
    selector_specificity, AppProperties, ComponentDefinition, KirDocument, ReactiveManifest,
    SourceEntry, SourceMetadata, Stylesheet,
};
use crate::error::{DocError, Warning};
use crate::expand::{
    build_state, clone_and_substitute, parse_module_ref, ExpandContext, ModuleResolver,
};
use crate::value::{parse_alignment, parse_color, parse_dimension, parse_gradient, parse_spacing, parse_text_align};

/// Result of a successful parse
pub struct ParsedDocument {
    pub document: KirDocument,
    pub tree: ComponentTree,
    pub warnings: Vec<Warning>,
}

/// Configurable document parser
#[derive(Default)]
pub struct Deserializer<'a> {
    resolver: Option<&'a dyn ModuleResolver>,
}

impl<'a> Deserializer<'a> {
    pub fn new() -> Self {
        Self { resolver: None }
    }

    /// Supply a loader for `$module:` references.
    pub fn with_resolver(resolver: &'a dyn ModuleResolver) -> Self {
        Self { resolver: Some(resolver) }
    }

    pub fn parse(&self, text: &str) -> Result<ParsedDocument, DocError> {
        let value: Value = serde_json::from_str(text)?;
        let obj = value.as_object().ok_or(DocError::NotAnObject)?;

        if let Some(format) = obj.get("format").and_then(Value::as_str) {
            if format != "kir" {
                return Err(DocError::WrongFormat(format.to_string()));
            }
        }

        let document = parse_envelope(obj);

        let mut tree = ComponentTree::new();
        let mut ctx = ExpandContext::new(&document, self.resolver);

        let root_value = obj.get("root").ok_or(DocError::MissingRoot)?;
        let root = deserialize_component(&mut tree, root_value, &mut ctx)
            .ok_or(DocError::MissingRoot)?;
        tree.set_root(root);

        tracing::debug!(
            nodes = tree.len(),
            definitions = document.definitions.len(),
            warnings = ctx.warnings.len(),
            "KIR document parsed"
        );

        Ok(ParsedDocument { document, tree, warnings: ctx.warnings })
    }
}

/// Parse KIR text with default options.
pub fn parse_document(text: &str) -> Result<ParsedDocument, DocError> {
    Deserializer::new().parse(text)
}

fn parse_envelope(obj: &serde_json::Map<String, Value>) -> KirDocument {
    let metadata = obj
        .get("metadata")
        .and_then(|v| serde_json::from_value::<SourceMetadata>(v.clone()).ok());
    let app = obj
        .get("app")
        .and_then(|v| serde_json::from_value::<AppProperties>(v.clone()).ok());

    let mut definitions = Vec::new();
    if let Some(defs) = obj.get("component_definitions").and_then(Value::as_array) {
        for def in defs {
            match serde_json::from_value::<ComponentDefinition>(def.clone()) {
                Ok(def) => definitions.push(def),
                Err(err) => tracing::warn!(%err, "skipping malformed component definition"),
            }
        }
    }

    let manifest = obj
        .get("reactive_manifest")
        .and_then(|v| serde_json::from_value::<ReactiveManifest>(v.clone()).ok());

    let stylesheet = obj.get("stylesheet").and_then(|v| {
        let mut sheet = serde_json::from_value::<Stylesheet>(v.clone()).ok()?;
        for rule in &mut sheet.rules {
            if rule.specificity == 0 {
                rule.specificity = selector_specificity(&rule.selector);
            }
        }
        Some(sheet)
    });

    let sources = obj
        .get("sources")
        .and_then(|v| serde_json::from_value::<Vec<SourceEntry>>(v.clone()).ok())
        .unwrap_or_default();

    KirDocument {
        metadata,
        app,
        definitions,
        manifest,
        stylesheet,
        source_structures: obj.get("source_structures").cloned(),
        logic_block: obj.get("logic_block").cloned(),
        sources,
    }
}

// ============================================================================
// Component Tree Deserialization (Recursive)
// ============================================================================

pub(crate) fn deserialize_component(
    tree: &mut ComponentTree,
    json: &Value,
    ctx: &mut ExpandContext<'_>,
) -> Option<NodeId> {
    // Sanity bound on expansion depth; a self-referencing definition must
    // not take the process down.
    if ctx.depth >= 256 {
        tracing::warn!("expansion depth bound exceeded, dropping subtree");
        return None;
    }
    ctx.depth += 1;
    let result = deserialize_component_inner(tree, json, ctx);
    ctx.depth -= 1;
    result
}

fn deserialize_component_inner(
    tree: &mut ComponentTree,
    json: &Value,
    ctx: &mut ExpandContext<'_>,
) -> Option<NodeId> {
    let obj = json.as_object()?;
    let type_name = obj.get("type").and_then(Value::as_str);

    if let Some(name) = type_name {
        // Module reference: $module:components/tabs#buildTabsAndPanels
        if let Some((module_id, export)) = parse_module_ref(name) {
            let resolver = ctx.resolver;
            let def = ctx.modules.lookup(&module_id, export.as_deref(), resolver);
            match def {
                Some(def) => {
                    let node = expand_instance(tree, &def, json, ctx)?;
                    if let Some(n) = tree.get_mut(node) {
                        n.component_ref = None;
                        n.module_ref = Some(module_id);
                        n.export_name = export;
                    }
                    apply_instance_overrides(tree, node, obj);
                    return Some(node);
                }
                None => {
                    tracing::warn!(module = %module_id, "module unresolved, degrading to literal type");
                    ctx.warnings.push(Warning::ModuleFallback {
                        module: module_id,
                        export,
                    });
                    // Degrade to the preserved literal type (or a container).
                    let fallback_kind = obj
                        .get("actual_type")
                        .and_then(Value::as_str)
                        .map(ComponentKind::from_name)
                        .unwrap_or(ComponentKind::Container);
                    return build_plain(tree, obj, ctx, fallback_kind);
                }
            }
        }

        // Definition reference: the type string names a template.
        if let Some(def) = ctx.definitions.get(name).cloned() {
            let node = expand_instance(tree, &def, json, ctx)?;
            if let Some(n) = tree.get_mut(node) {
                n.component_ref = Some(def.name.clone());
            }
            return Some(node);
        }
    }

    // Neither a definition nor a known kind: keep the document loadable as
    // a container, but make the degradation observable.
    if let Some(name) = type_name {
        if !ComponentKind::is_known_name(name) {
            ctx.warnings.push(Warning::UnknownDefinition { name: name.to_string() });
        }
    }

    let kind = type_name.map(ComponentKind::from_name).unwrap_or_default();
    build_plain(tree, obj, ctx, kind)
}

/// Expand one instance of a definition: state context, substituted clone,
/// recursive deserialization, id remap and owner tagging.
fn expand_instance(
    tree: &mut ComponentTree,
    def: &ComponentDefinition,
    instance: &Value,
    ctx: &mut ExpandContext<'_>,
) -> Option<NodeId> {
    let sc = build_state(def, Some(instance));
    let expanded = clone_and_substitute(&def.template, &sc);
    let node = deserialize_component(tree, &expanded, ctx)?;

    let instance_id = instance
        .get("id")
        .and_then(Value::as_u64)
        .map(|v| v as u32)
        .unwrap_or_else(|| tree.fresh_id());
    tree.remap_subtree_ids(node, instance_id);
    tree.set_owner_instance(node, instance_id);

    if let Some(props) = instance_props(instance) {
        if let Some(n) = tree.get_mut(node) {
            n.component_props = Some(props);
        }
    }
    Some(node)
}

/// Instance-supplied props: every top-level field except structural ones.
fn instance_props(instance: &Value) -> Option<Value> {
    let obj = instance.as_object()?;
    let mut props = serde_json::Map::new();
    for (key, value) in obj {
        match key.as_str() {
            "id" | "type" | "actual_type" | "children" => {}
            _ => {
                props.insert(key.clone(), value.clone());
            }
        }
    }
    if props.is_empty() {
        None
    } else {
        Some(Value::Object(props))
    }
}

/// Instance-specific fields of a module reference override template values.
fn apply_instance_overrides(
    tree: &mut ComponentTree,
    node: NodeId,
    obj: &serde_json::Map<String, Value>,
) {
    if let Some(text) = obj.get("text").and_then(Value::as_str) {
        if let Some(n) = tree.get_mut(node) {
            n.text = Some(text.to_string());
        }
    }
    if let Some(bg) = obj.get("background").and_then(Value::as_str) {
        if let Some(n) = tree.get_mut(node) {
            n.style_mut().background = parse_color(bg);
        }
    }
    if let Some(color) = obj.get("color").and_then(Value::as_str) {
        if let Some(n) = tree.get_mut(node) {
            n.style_mut().font.color = parse_color(color);
        }
    }
}

fn build_plain(
    tree: &mut ComponentTree,
    obj: &serde_json::Map<String, Value>,
    ctx: &mut ExpandContext<'_>,
    kind: ComponentKind,
) -> Option<NodeId> {
    let doc_id = obj
        .get("id")
        .and_then(Value::as_u64)
        .map(|v| v as u32)
        .unwrap_or_else(|| tree.fresh_id());

    let mut component = Component::new(doc_id, kind);

    // Preserve the legacy alias for round-trip fidelity.
    if obj.get("type").and_then(Value::as_str) == Some("Body") {
        component.tag = Some("Body".to_string());
    }
    if let Some(tag) = obj.get("tag").and_then(Value::as_str) {
        if component.tag.is_none() {
            component.tag = Some(tag.to_string());
        }
    }
    if let Some(class) = obj.get("css_class").and_then(Value::as_str) {
        component.css_class = Some(class.to_string());
    }
    if let Some(sel) = obj.get("selector_type").and_then(Value::as_str) {
        component.selector_kind = SelectorKind::from_name(sel);
    }
    if let Some(scope) = obj.get("scope").and_then(Value::as_str) {
        component.scope = Some(scope.to_string());
    }

    // Text content: a string is literal text; an object is an expression.
    match obj.get("text") {
        Some(Value::String(s)) => component.text = Some(s.clone()),
        Some(Value::Object(_)) => {
            component.text_expression =
                obj.get("text").map(|v| v.to_string());
        }
        _ => {
            if let Some(label) = obj.get("label").and_then(Value::as_str) {
                component.text = Some(label.to_string());
            }
        }
    }
    if let Some(expr) = obj.get("text_expression").and_then(Value::as_str) {
        component.text_expression = Some(expr.to_string());
    }
    // An Input's value binding doubles as its text expression.
    if kind == ComponentKind::Input {
        if let Some(value) = obj.get("value").and_then(Value::as_str) {
            component.text_expression = Some(value.to_string());
        }
    }

    let style = parse_style(obj);
    if style != Style::default() {
        component.style = Some(Box::new(style));
    }
    let layout = parse_layout(obj);
    if layout != LayoutProps::default() {
        component.layout = Some(Box::new(layout));
    }

    component.payload = parse_payload(kind, obj);
    component.events = parse_events(obj);
    component.property_bindings = parse_bindings(obj);

    if let Some(cond) = obj.get("visible_condition").and_then(Value::as_str) {
        component.visible_condition = Some(cond.to_string());
        component.visible_when_true =
            obj.get("visible_when_true").and_then(Value::as_bool).unwrap_or(true);
    }
    if let Some(src) = obj.get("each_source").and_then(Value::as_str) {
        component.each_source = Some(src.to_string());
    }
    if let Some(item) = obj.get("each_item_name").and_then(Value::as_str) {
        component.each_item_name = Some(item.to_string());
    }
    if let Some(index) = obj.get("each_index_name").and_then(Value::as_str) {
        component.each_index_name = Some(index.to_string());
    }

    if component.payload.is_none() {
        if let Some(custom) = obj.get("custom_data") {
            component.payload = Payload::Custom(custom.clone());
        }
    }

    let node = tree.alloc(component);

    let mut children = Vec::new();
    if let Some(child_values) = obj.get("children").and_then(Value::as_array) {
        for child_value in child_values {
            if let Some(child) = deserialize_component(tree, child_value, ctx) {
                tree.append_child(node, child);
                children.push(child);
            }
        }
    }

    // Every deserialized panel is registered; the live child list may later
    // shrink to the selected one.
    if kind == ComponentKind::TabContent && !children.is_empty() {
        let selected = obj.get("selectedIndex").and_then(Value::as_i64).unwrap_or(0) as i32;
        if let Some(n) = tree.get_mut(node) {
            n.payload = Payload::TabContent(TabContentState { panels: children, selected });
        }
    }

    Some(node)
}

// ============================================================================
// Property Parsing
// ============================================================================

fn get_f32(obj: &serde_json::Map<String, Value>, key: &str) -> Option<f32> {
    obj.get(key).and_then(Value::as_f64).map(|v| v as f32)
}

fn get_bool(obj: &serde_json::Map<String, Value>, key: &str) -> Option<bool> {
    obj.get(key).and_then(Value::as_bool)
}

fn get_str<'v>(obj: &'v serde_json::Map<String, Value>, key: &str) -> Option<&'v str> {
    obj.get(key).and_then(Value::as_str)
}

fn parse_style(obj: &serde_json::Map<String, Value>) -> Style {
    let mut style = Style::default();

    if let Some(w) = get_str(obj, "width") {
        style.width = parse_dimension(w);
    }
    if let Some(h) = get_str(obj, "height") {
        style.height = parse_dimension(h);
    }
    if let Some(v) = get_bool(obj, "visible") {
        style.visible = v;
    }
    if let Some(o) = get_f32(obj, "opacity") {
        style.opacity = o;
    }
    if let Some(z) = obj.get("zIndex").and_then(Value::as_i64) {
        style.z_index = z as i32;
    }

    if let Some(gradient) = obj.get("backgroundGradient").and_then(parse_gradient) {
        style.background = kir_tree::Color::Gradient(Box::new(gradient));
    } else if let Some(bg) = get_str(obj, "background") {
        style.background = parse_color(bg);
    }

    if let Some(border) = obj.get("border").and_then(Value::as_object) {
        if let Some(w) = border.get("width").and_then(Value::as_f64) {
            style.border.width = w as f32;
        }
        if let Some(c) = border.get("color").and_then(Value::as_str) {
            style.border.color = parse_color(c);
        }
        if let Some(r) = border.get("radius").and_then(Value::as_f64) {
            style.border.radius = r as f32;
        }
    }

    if let Some(pos) = get_str(obj, "position") {
        style.position = match pos {
            "absolute" => PositionMode::Absolute,
            "fixed" => PositionMode::Fixed,
            _ => PositionMode::Relative,
        };
    }
    if let Some(left) = get_f32(obj, "left") {
        style.absolute_x = left;
    }
    if let Some(top) = get_f32(obj, "top") {
        style.absolute_y = top;
    }

    if let Some(size) = get_f32(obj, "fontSize") {
        style.font.size = size;
    }
    if let Some(family) = get_str(obj, "fontFamily") {
        style.font.family = Some(family.to_string());
    }
    if let Some(weight) = obj.get("fontWeight").and_then(Value::as_u64) {
        style.font.weight = weight as u16;
    }
    if let Some(bold) = get_bool(obj, "fontBold") {
        style.font.bold = bold;
    }
    if let Some(italic) = get_bool(obj, "fontItalic") {
        style.font.italic = italic;
    }
    if let Some(lh) = get_f32(obj, "lineHeight") {
        style.font.line_height = lh;
    }
    if let Some(color) = get_str(obj, "color") {
        style.font.color = parse_color(color);
    }
    if let Some(align) = get_str(obj, "textAlign") {
        style.font.align = parse_text_align(align);
    }
    if let Some(ls) = get_f32(obj, "letterSpacing") {
        style.font.letter_spacing = ls;
    }
    if let Some(deco) = get_str(obj, "textDecoration") {
        style.font.decoration = match deco {
            "underline" => TextDecoration::Underline,
            "overline" => TextDecoration::Overline,
            "line-through" => TextDecoration::LineThrough,
            _ => TextDecoration::None,
        };
    }

    if let Some(padding) = obj.get("padding") {
        style.padding = parse_spacing(padding);
    }
    if let Some(margin) = obj.get("margin") {
        style.margin = parse_spacing(margin);
    }

    if let Some(transform) = obj.get("transform").and_then(Value::as_object) {
        if let Some(translate) = transform.get("translate").and_then(Value::as_array) {
            if let [x, y] = translate.as_slice() {
                style.transform.translate_x = x.as_f64().unwrap_or(0.0) as f32;
                style.transform.translate_y = y.as_f64().unwrap_or(0.0) as f32;
            }
        }
        if let Some(scale) = transform.get("scale").and_then(Value::as_array) {
            if let [x, y] = scale.as_slice() {
                style.transform.scale_x = x.as_f64().unwrap_or(1.0) as f32;
                style.transform.scale_y = y.as_f64().unwrap_or(1.0) as f32;
            }
        }
        if let Some(rotate) = transform.get("rotate").and_then(Value::as_f64) {
            style.transform.rotate = rotate as f32;
        }
    }

    style
}

fn parse_layout(obj: &serde_json::Map<String, Value>) -> LayoutProps {
    let mut layout = LayoutProps::default();

    if let Some(display) = get_str(obj, "display") {
        layout.display_explicit = true;
        layout.mode = match display {
            "grid" => LayoutMode::Grid,
            "block" => LayoutMode::Block,
            "none" => LayoutMode::None,
            _ => LayoutMode::Flex,
        };
    }

    if let Some(v) = get_str(obj, "minWidth") {
        layout.min_width = parse_dimension(v);
    }
    if let Some(v) = get_str(obj, "minHeight") {
        layout.min_height = parse_dimension(v);
    }
    if let Some(v) = get_str(obj, "maxWidth") {
        layout.max_width = parse_dimension(v);
    }
    if let Some(v) = get_str(obj, "maxHeight") {
        layout.max_height = parse_dimension(v);
    }

    if let Some(dir) = get_str(obj, "flexDirection") {
        layout.flex.direction = match dir {
            "row" => kir_tree::FlexDirection::Row,
            _ => kir_tree::FlexDirection::Column,
        };
    }
    if let Some(justify) = get_str(obj, "justifyContent") {
        layout.flex.justify_content = parse_alignment(justify);
    }
    if let Some(align) = get_str(obj, "alignItems") {
        layout.flex.cross_axis = parse_alignment(align);
    }
    if let Some(gap) = get_f32(obj, "gap") {
        layout.flex.gap = gap;
    }
    if let Some(grow) = obj.get("flexGrow").and_then(Value::as_u64) {
        layout.flex.grow = grow as u8;
    }
    if let Some(shrink) = obj.get("flexShrink").and_then(Value::as_u64) {
        layout.flex.shrink = shrink as u8;
    }
    if let Some(wrap) = get_bool(obj, "flexWrap") {
        layout.flex.wrap = wrap;
    }
    if let Some(ratio) = get_f32(obj, "aspectRatio") {
        layout.aspect_ratio = ratio;
    }

    if let Some(gap) = get_f32(obj, "rowGap") {
        layout.grid.row_gap = gap;
    }
    if let Some(gap) = get_f32(obj, "columnGap") {
        layout.grid.column_gap = gap;
    }
    if let Some(tracks) = obj.get("gridColumns").and_then(Value::as_array) {
        layout.grid.columns = tracks.iter().filter_map(parse_grid_track).collect();
    }
    if let Some(tracks) = obj.get("gridRows").and_then(Value::as_array) {
        layout.grid.rows = tracks.iter().filter_map(parse_grid_track).collect();
    }
    if let Some(justify) = get_str(obj, "justifyItems") {
        layout.grid.justify_items = parse_alignment(justify);
    }
    if let Some(align) = get_str(obj, "gridAlignItems") {
        layout.grid.align_items = parse_alignment(align);
    }

    layout
}

fn parse_grid_track(value: &Value) -> Option<kir_tree::GridTrack> {
    let obj = value.as_object()?;
    let kind = match obj.get("type").and_then(Value::as_str)? {
        "px" => kir_tree::GridTrackKind::Px,
        "percent" => kir_tree::GridTrackKind::Percent,
        "fr" => kir_tree::GridTrackKind::Fr,
        _ => kir_tree::GridTrackKind::Auto,
    };
    let value = obj.get("value").and_then(Value::as_f64).unwrap_or(0.0) as f32;
    Some(kir_tree::GridTrack { kind, value })
}

fn cell_alignment(s: &str) -> kir_tree::Alignment {
    match s {
        "center" | "middle" => kir_tree::Alignment::Center,
        "end" | "bottom" => kir_tree::Alignment::End,
        _ => kir_tree::Alignment::Start,
    }
}

fn parse_payload(kind: ComponentKind, obj: &serde_json::Map<String, Value>) -> Payload {
    match kind {
        ComponentKind::Checkbox => match get_bool(obj, "checked") {
            Some(checked) => Payload::Checkbox { checked },
            None => Payload::None,
        },

        ComponentKind::Image => {
            let src = get_str(obj, "src").or_else(|| get_str(obj, "source"));
            match src {
                Some(src) => Payload::Image {
                    src: src.to_string(),
                    alt: get_str(obj, "alt").map(str::to_string),
                },
                None => Payload::None,
            }
        }

        ComponentKind::Dropdown => match obj.get("dropdown_state").and_then(Value::as_object) {
            Some(state) => Payload::Dropdown(DropdownState {
                placeholder: state.get("placeholder").and_then(Value::as_str).map(str::to_string),
                options: state
                    .get("options")
                    .and_then(Value::as_array)
                    .map(|arr| {
                        arr.iter().filter_map(Value::as_str).map(str::to_string).collect()
                    })
                    .unwrap_or_default(),
                selected: state.get("selectedIndex").and_then(Value::as_i64).unwrap_or(-1) as i32,
                open: state.get("isOpen").and_then(Value::as_bool).unwrap_or(false),
            }),
            None => Payload::None,
        },

        ComponentKind::Modal => match obj.get("modal_state").and_then(Value::as_object) {
            Some(state) => Payload::Modal(ModalState {
                open: state.get("isOpen").and_then(Value::as_bool).unwrap_or(false),
                title: state.get("title").and_then(Value::as_str).map(str::to_string),
            }),
            None => Payload::None,
        },

        ComponentKind::TabGroup => {
            let selected = obj.get("selectedIndex").and_then(Value::as_i64);
            let reorderable = get_bool(obj, "reorderable");
            if selected.is_some() || reorderable.is_some() {
                Payload::TabGroup(TabGroupState {
                    selected: selected.unwrap_or(0) as i32,
                    reorderable: reorderable.unwrap_or(false),
                })
            } else {
                Payload::None
            }
        }

        ComponentKind::Tab => {
            let title = get_str(obj, "title");
            let active_bg = get_str(obj, "activeBackground");
            let text_color = get_str(obj, "tabTextColor");
            let active_text = get_str(obj, "activeTextColor");
            if title.is_some() || active_bg.is_some() || text_color.is_some() || active_text.is_some()
            {
                Payload::Tab(TabData {
                    title: title.map(str::to_string),
                    active_background: active_bg.map(parse_color),
                    text_color: text_color.map(parse_color),
                    active_text_color: active_text.map(parse_color),
                })
            } else {
                Payload::None
            }
        }

        ComponentKind::Table => match obj.get("table_config").and_then(Value::as_object) {
            Some(config) => {
                let mut state = TableState::default();
                if let Some(columns) = config.get("columns").and_then(Value::as_array) {
                    for col in columns {
                        let Some(col) = col.as_object() else { continue };
                        state.columns.push(TableColumn {
                            width: col
                                .get("width")
                                .and_then(Value::as_str)
                                .map(parse_dimension)
                                .unwrap_or_default(),
                            min_width: col
                                .get("minWidth")
                                .and_then(Value::as_str)
                                .map(parse_dimension)
                                .unwrap_or_default(),
                            max_width: col
                                .get("maxWidth")
                                .and_then(Value::as_str)
                                .map(parse_dimension)
                                .unwrap_or_default(),
                            alignment: col
                                .get("alignment")
                                .and_then(Value::as_str)
                                .map(cell_alignment)
                                .unwrap_or_default(),
                            auto_size: col.get("autoSize").and_then(Value::as_bool).unwrap_or(false),
                        });
                    }
                }
                let styling = &mut state.styling;
                if let Some(c) = config.get("borderColor").and_then(Value::as_str) {
                    styling.border_color = parse_color(c);
                }
                if let Some(c) = config.get("headerBackground").and_then(Value::as_str) {
                    styling.header_background = parse_color(c);
                }
                if let Some(c) = config.get("evenRowBackground").and_then(Value::as_str) {
                    styling.even_row_background = parse_color(c);
                }
                if let Some(c) = config.get("oddRowBackground").and_then(Value::as_str) {
                    styling.odd_row_background = parse_color(c);
                }
                if let Some(w) = config.get("borderWidth").and_then(Value::as_f64) {
                    styling.border_width = w as f32;
                }
                if let Some(p) = config.get("cellPadding").and_then(Value::as_f64) {
                    styling.cell_padding = p as f32;
                }
                if let Some(b) = config.get("showBorders").and_then(Value::as_bool) {
                    styling.show_borders = b;
                }
                if let Some(b) = config.get("striped").and_then(Value::as_bool) {
                    styling.striped = b;
                }
                if let Some(b) = config.get("headerSticky").and_then(Value::as_bool) {
                    styling.header_sticky = b;
                }
                if let Some(b) = config.get("collapseBorders").and_then(Value::as_bool) {
                    styling.collapse_borders = b;
                }
                Payload::Table(state)
            }
            None => Payload::None,
        },

        ComponentKind::TableCell | ComponentKind::TableHeaderCell => {
            match obj.get("cell_data").and_then(Value::as_object) {
                Some(cell) => Payload::TableCell(TableCellData {
                    colspan: cell.get("colspan").and_then(Value::as_u64).unwrap_or(1) as u16,
                    rowspan: cell.get("rowspan").and_then(Value::as_u64).unwrap_or(1) as u16,
                    alignment: cell
                        .get("alignment")
                        .and_then(Value::as_str)
                        .map(cell_alignment)
                        .unwrap_or_default(),
                    vertical_alignment: cell
                        .get("verticalAlignment")
                        .and_then(Value::as_str)
                        .map(cell_alignment)
                        .unwrap_or_default(),
                }),
                None => Payload::None,
            }
        }

        ComponentKind::Heading => {
            let level = obj.get("level").and_then(Value::as_u64);
            let anchor = get_str(obj, "id_attr");
            if level.is_some() || anchor.is_some() {
                Payload::Heading(HeadingData {
                    level: level.unwrap_or(1).clamp(1, 6) as u8,
                    anchor: anchor.map(str::to_string),
                })
            } else {
                Payload::None
            }
        }

        ComponentKind::CodeBlock => {
            let code = get_str(obj, "code");
            let language = get_str(obj, "language");
            if code.is_some() || language.is_some() {
                Payload::CodeBlock(CodeBlockData {
                    language: language.map(str::to_string),
                    code: code.unwrap_or_default().to_string(),
                    show_line_numbers: get_bool(obj, "showLineNumbers").unwrap_or(false),
                    start_line: obj.get("startLine").and_then(Value::as_u64).unwrap_or(1) as u32,
                })
            } else {
                Payload::None
            }
        }

        ComponentKind::List => {
            let list_type = get_str(obj, "listType");
            let start = obj.get("start").and_then(Value::as_u64);
            let tight = get_bool(obj, "tight");
            if list_type.is_some() || start.is_some() || tight.is_some() {
                Payload::List(ListData {
                    ordered: list_type == Some("ordered"),
                    start: start.unwrap_or(1) as u32,
                    tight: tight.unwrap_or(true),
                })
            } else {
                Payload::None
            }
        }

        ComponentKind::ListItem => {
            let number = obj.get("number").and_then(Value::as_u64);
            let marker = get_str(obj, "marker");
            let task = get_bool(obj, "taskItem");
            if number.is_some() || marker.is_some() || task.is_some() {
                Payload::ListItem(ListItemData {
                    number: number.unwrap_or(0) as u32,
                    marker: marker.map(str::to_string),
                    task: task.unwrap_or(false),
                    checked: get_bool(obj, "checked").unwrap_or(false),
                })
            } else {
                Payload::None
            }
        }

        ComponentKind::Link => {
            let url = get_str(obj, "href").or_else(|| get_str(obj, "url"));
            match url {
                Some(url) => Payload::Link(LinkData {
                    url: url.to_string(),
                    title: get_str(obj, "title").map(str::to_string),
                    target: get_str(obj, "target").map(str::to_string),
                    rel: get_str(obj, "rel").map(str::to_string),
                }),
                None => Payload::None,
            }
        }

        ComponentKind::Placeholder => match get_str(obj, "name") {
            Some(name) => Payload::Placeholder {
                name: name.to_string(),
                preserve: get_bool(obj, "preserve").unwrap_or(false),
            },
            None => Payload::None,
        },

        _ => Payload::None,
    }
}

fn parse_events(obj: &serde_json::Map<String, Value>) -> Vec<EventBinding> {
    let Some(events) = obj.get("events").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for event in events {
        let Some(event) = event.as_object() else { continue };
        let Some(name) = event.get("event").and_then(Value::as_str) else { continue };
        let kind = EventKind::from_name(name);

        let handler = if let Some(id) = event.get("logic_id").and_then(Value::as_str) {
            HandlerRef::Logic(id.to_string())
        } else if let Some(id) = event.get("function_id").and_then(Value::as_u64) {
            HandlerRef::Bytecode(id as u32)
        } else if let Some(source) = event.get("source").and_then(Value::as_object) {
            HandlerRef::Source(HandlerSource {
                language: source
                    .get("language")
                    .and_then(Value::as_str)
                    .unwrap_or("lua")
                    .to_string(),
                code: source.get("code").and_then(Value::as_str).unwrap_or("").to_string(),
                file: source.get("file").and_then(Value::as_str).map(str::to_string),
                line: source.get("line").and_then(Value::as_u64).unwrap_or(0) as u32,
                closure_vars: source
                    .get("closures")
                    .and_then(Value::as_array)
                    .map(|arr| arr.iter().filter_map(Value::as_str).map(str::to_string).collect())
                    .unwrap_or_default(),
            })
        } else {
            continue;
        };

        out.push(EventBinding { kind, handler });
    }
    out
}

fn parse_bindings(obj: &serde_json::Map<String, Value>) -> Vec<PropertyBinding> {
    let Some(bindings) = obj.get("property_bindings").and_then(Value::as_object) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for (property, binding) in bindings {
        let Some(binding) = binding.as_object() else { continue };
        out.push(PropertyBinding {
            property: property.clone(),
            source_expr: binding
                .get("source_expr")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_string(),
            resolved_value: binding
                .get("resolved_value")
                .and_then(Value::as_str)
                .map(str::to_string),
            kind: binding
                .get("binding_type")
                .and_then(Value::as_str)
                .map(BindingKind::from_name)
                .unwrap_or_default(),
        });
    }
    out
}
