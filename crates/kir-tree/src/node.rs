//! Component Node
//!
//! One element of the live UI tree: identity, kind, lazily created style
//! and layout property sets, transient layout state, text content vs
//! reactive text expression, type-tagged payload, template/module instance
//! markers, events and property bindings.

use crate::binding::PropertyBinding;
use crate::events::EventBinding;
use crate::kind::ComponentKind;
use crate::layout_props::LayoutProps;
use crate::layout_state::LayoutState;
use crate::payload::Payload;
use crate::style::Style;
use crate::tree::NodeId;

/// How a CSS selector is generated for this component on round-trip
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectorKind {
    #[default]
    None,
    Element,
    Class,
    Id,
}

impl SelectorKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "element" => Self::Element,
            "class" => Self::Class,
            "id" => Self::Id,
            _ => Self::None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Element => "element",
            Self::Class => "class",
            Self::Id => "id",
        }
    }
}

/// One node of the component tree
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    /// Document-unique id; remapped on template expansion
    pub id: u32,
    pub kind: ComponentKind,
    /// Semantic HTML tag preserved for round-trip (e.g. `section`, `nav`)
    pub tag: Option<String>,
    pub css_class: Option<String>,
    pub selector_kind: SelectorKind,
    pub style: Option<Box<Style>>,
    pub layout: Option<Box<LayoutProps>>,
    /// Engine-owned; geometry valid only while `layout_state.layout_valid`
    pub layout_state: LayoutState,
    /// Last-resolved literal text. When a `text_expression` is present the
    /// expression is authoritative for recomputation.
    pub text: Option<String>,
    /// Reactive template string, e.g. `{{count}}`
    pub text_expression: Option<String>,
    pub payload: Payload,
    /// Name of the component definition this node is an instance of
    pub component_ref: Option<String>,
    /// Instance props, as the JSON object the document carried
    pub component_props: Option<serde_json::Value>,
    /// Cross-document module reference (e.g. `components/tabs`)
    pub module_ref: Option<String>,
    pub export_name: Option<String>,
    /// Id of the owning instance, for per-instance state scoping
    pub owner_instance: u32,
    /// Scope string for variable lookups (e.g. `Counter#0`)
    pub scope: Option<String>,
    pub events: Vec<EventBinding>,
    pub property_bindings: Vec<PropertyBinding>,
    /// Variable name controlling conditional visibility
    pub visible_condition: Option<String>,
    pub visible_when_true: bool,
    /// For-each source collection expression
    pub each_source: Option<String>,
    pub each_item_name: Option<String>,
    pub each_index_name: Option<String>,
    pub parent: NodeId,
    pub children: Vec<NodeId>,
}

impl Component {
    /// Create a component of the given kind with no properties set.
    pub fn new(id: u32, kind: ComponentKind) -> Self {
        Self {
            id,
            kind,
            tag: None,
            css_class: None,
            selector_kind: SelectorKind::None,
            style: None,
            layout: None,
            layout_state: LayoutState::default(),
            text: None,
            text_expression: None,
            payload: Payload::None,
            component_ref: None,
            component_props: None,
            module_ref: None,
            export_name: None,
            owner_instance: 0,
            scope: None,
            events: Vec::new(),
            property_bindings: Vec::new(),
            visible_condition: None,
            visible_when_true: true,
            each_source: None,
            each_item_name: None,
            each_index_name: None,
            parent: NodeId::NONE,
            children: Vec::new(),
        }
    }

    /// Create a text component.
    pub fn text(id: u32, content: impl Into<String>) -> Self {
        let mut c = Self::new(id, ComponentKind::Text);
        c.text = Some(content.into());
        c
    }

    /// Style, creating the default set on first access.
    pub fn style_mut(&mut self) -> &mut Style {
        self.style.get_or_insert_with(Default::default)
    }

    /// Layout properties, creating the default set on first access.
    pub fn layout_mut(&mut self) -> &mut LayoutProps {
        self.layout.get_or_insert_with(Default::default)
    }

    /// True when this node is an unexpanded template or module instance,
    /// whose own children are not authoritative.
    pub fn is_reference(&self) -> bool {
        self.component_ref.is_some() || self.module_ref.is_some()
    }

    /// Whether the named property carries an active reactive binding.
    pub fn has_binding(&self, property: &str) -> bool {
        self.property_bindings.iter().any(|b| b.property == property)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Visibility as far as layout is concerned.
    pub fn is_visible(&self) -> bool {
        self.style.as_ref().map_or(true, |s| s.visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{BindingKind, PropertyBinding};

    #[test]
    fn test_lazy_property_sets() {
        let mut c = Component::new(1, ComponentKind::Container);
        assert!(c.style.is_none());
        assert!(c.layout.is_none());
        c.style_mut().opacity = 0.5;
        assert_eq!(c.style.as_ref().unwrap().opacity, 0.5);
    }

    #[test]
    fn test_has_binding() {
        let mut c = Component::new(1, ComponentKind::Row);
        assert!(!c.has_binding("gap"));
        c.property_bindings.push(PropertyBinding {
            property: "gap".into(),
            source_expr: "spacing".into(),
            resolved_value: Some("0".into()),
            kind: BindingKind::Reactive,
        });
        assert!(c.has_binding("gap"));
    }

    #[test]
    fn test_reference_detection() {
        let mut c = Component::new(1, ComponentKind::Container);
        assert!(!c.is_reference());
        c.component_ref = Some("Counter".into());
        assert!(c.is_reference());
    }
}
