//! Component Kind
//!
//! Closed enumeration of component types, plus the name table used by the
//! KIR deserializer. Name matching is case-insensitive per family and
//! tolerates legacy aliases; unknown names map to `Container` so newer
//! documents stay loadable.

/// Component type tag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    #[default]
    Container,
    Row,
    Column,
    Center,
    Text,
    Button,
    Input,
    Checkbox,
    Image,
    Canvas,
    Dropdown,
    Modal,
    // Tabs family
    TabGroup,
    TabBar,
    Tab,
    TabContent,
    TabPanel,
    // Table family
    Table,
    TableHead,
    TableBody,
    TableFoot,
    TableRow,
    TableCell,
    TableHeaderCell,
    // Markdown family
    Heading,
    Paragraph,
    Blockquote,
    CodeBlock,
    HorizontalRule,
    List,
    ListItem,
    Link,
    Markdown,
    // Inline semantic family
    Span,
    Strong,
    Em,
    CodeInline,
    Small,
    Mark,
    // Source preservation family
    StaticBlock,
    ForLoop,
    ForEach,
    VarDecl,
    Placeholder,
    Custom,
}

impl ComponentKind {
    /// Parse a type name from a KIR document.
    ///
    /// Accepts CamelCase, UPPERCASE and SNAKE_CASE variants plus legacy
    /// aliases (`Body`, `Tr`/`Td`/`Th`). Unknown names become `Container`.
    pub fn from_name(name: &str) -> Self {
        let folded: String = name
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match folded.as_str() {
            "container" | "body" => Self::Container,
            "row" => Self::Row,
            "column" => Self::Column,
            "center" => Self::Center,
            "text" => Self::Text,
            "button" => Self::Button,
            "input" => Self::Input,
            "checkbox" => Self::Checkbox,
            "image" => Self::Image,
            "canvas" => Self::Canvas,
            "dropdown" => Self::Dropdown,
            "modal" => Self::Modal,
            "tabgroup" => Self::TabGroup,
            "tabbar" => Self::TabBar,
            "tab" => Self::Tab,
            "tabcontent" => Self::TabContent,
            "tabpanel" => Self::TabPanel,
            "table" => Self::Table,
            "tablehead" => Self::TableHead,
            "tablebody" => Self::TableBody,
            "tablefoot" => Self::TableFoot,
            "tablerow" | "tr" => Self::TableRow,
            "tablecell" | "td" => Self::TableCell,
            "tableheadercell" | "th" => Self::TableHeaderCell,
            "heading" => Self::Heading,
            "paragraph" => Self::Paragraph,
            "blockquote" => Self::Blockquote,
            "codeblock" => Self::CodeBlock,
            "horizontalrule" => Self::HorizontalRule,
            "list" => Self::List,
            "listitem" => Self::ListItem,
            "link" => Self::Link,
            "markdown" => Self::Markdown,
            "span" => Self::Span,
            "strong" => Self::Strong,
            "em" => Self::Em,
            "codeinline" => Self::CodeInline,
            "small" => Self::Small,
            "mark" => Self::Mark,
            "staticblock" => Self::StaticBlock,
            "forloop" => Self::ForLoop,
            "foreach" => Self::ForEach,
            "vardecl" => Self::VarDecl,
            "placeholder" => Self::Placeholder,
            "custom" => Self::Custom,
            _ => Self::Container,
        }
    }

    /// Canonical type name as written to KIR documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Container => "Container",
            Self::Row => "Row",
            Self::Column => "Column",
            Self::Center => "Center",
            Self::Text => "Text",
            Self::Button => "Button",
            Self::Input => "Input",
            Self::Checkbox => "Checkbox",
            Self::Image => "Image",
            Self::Canvas => "Canvas",
            Self::Dropdown => "Dropdown",
            Self::Modal => "Modal",
            Self::TabGroup => "TabGroup",
            Self::TabBar => "TabBar",
            Self::Tab => "Tab",
            Self::TabContent => "TabContent",
            Self::TabPanel => "TabPanel",
            Self::Table => "Table",
            Self::TableHead => "TableHead",
            Self::TableBody => "TableBody",
            Self::TableFoot => "TableFoot",
            Self::TableRow => "TableRow",
            Self::TableCell => "TableCell",
            Self::TableHeaderCell => "TableHeaderCell",
            Self::Heading => "Heading",
            Self::Paragraph => "Paragraph",
            Self::Blockquote => "Blockquote",
            Self::CodeBlock => "CodeBlock",
            Self::HorizontalRule => "HorizontalRule",
            Self::List => "List",
            Self::ListItem => "ListItem",
            Self::Link => "Link",
            Self::Markdown => "Markdown",
            Self::Span => "Span",
            Self::Strong => "Strong",
            Self::Em => "Em",
            Self::CodeInline => "CodeInline",
            Self::Small => "Small",
            Self::Mark => "Mark",
            Self::StaticBlock => "StaticBlock",
            Self::ForLoop => "ForLoop",
            Self::ForEach => "ForEach",
            Self::VarDecl => "VarDecl",
            Self::Placeholder => "Placeholder",
            Self::Custom => "Custom",
        }
    }

    /// Whether a type name maps to a real kind, as opposed to hitting the
    /// Container fallback for unknown strings.
    pub fn is_known_name(name: &str) -> bool {
        let folded: String = name
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        folded == "container" || folded == "body" || Self::from_name(name) != Self::Container
    }

    /// Whether this kind lays out children along a main axis.
    pub fn is_container_like(&self) -> bool {
        matches!(
            self,
            Self::Container
                | Self::Row
                | Self::Column
                | Self::Center
                | Self::TabGroup
                | Self::TabBar
                | Self::TabContent
                | Self::TabPanel
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        let kinds = [
            ComponentKind::Container,
            ComponentKind::TabGroup,
            ComponentKind::TableHeaderCell,
            ComponentKind::CodeBlock,
            ComponentKind::HorizontalRule,
        ];
        for k in kinds {
            assert_eq!(ComponentKind::from_name(k.as_str()), k);
        }
    }

    #[test]
    fn test_case_variants() {
        assert_eq!(ComponentKind::from_name("TAB_GROUP"), ComponentKind::TabGroup);
        assert_eq!(ComponentKind::from_name("TABGROUP"), ComponentKind::TabGroup);
        assert_eq!(ComponentKind::from_name("tabgroup"), ComponentKind::TabGroup);
        assert_eq!(ComponentKind::from_name("TABLE_HEADER_CELL"), ComponentKind::TableHeaderCell);
    }

    #[test]
    fn test_legacy_aliases() {
        assert_eq!(ComponentKind::from_name("Body"), ComponentKind::Container);
        assert_eq!(ComponentKind::from_name("Tr"), ComponentKind::TableRow);
        assert_eq!(ComponentKind::from_name("Td"), ComponentKind::TableCell);
        assert_eq!(ComponentKind::from_name("Th"), ComponentKind::TableHeaderCell);
    }

    #[test]
    fn test_unknown_defaults_to_container() {
        assert_eq!(ComponentKind::from_name("HoloDeck"), ComponentKind::Container);
        assert_eq!(ComponentKind::from_name(""), ComponentKind::Container);
    }
}
