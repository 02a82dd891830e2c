//! Property Bindings
//!
//! Reactive binding metadata on a component: property name, the source
//! expression it is bound to, and the last resolved value. A binding must
//! survive serialization even when the resolved value equals the property's
//! type default.

/// How a property binding updates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BindingKind {
    #[default]
    Reactive,
    ConstRef,
    StaticTemplate,
}

impl BindingKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "const_ref" => Self::ConstRef,
            "static_template" => Self::StaticTemplate,
            _ => Self::Reactive,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reactive => "reactive",
            Self::ConstRef => "const_ref",
            Self::StaticTemplate => "static_template",
        }
    }
}

/// Named reactive binding on a component property
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyBinding {
    /// Property name, e.g. `gap` or `justifyContent`
    pub property: String,
    /// Source expression, e.g. `item.value`
    pub source_expr: String,
    /// Last resolved literal value
    pub resolved_value: Option<String>,
    pub kind: BindingKind,
}
