//! Type-Tagged Payloads
//!
//! Per-kind component state. Exactly one variant is meaningful for a given
//! `ComponentKind`; consumers match exhaustively instead of reinterpreting
//! an untyped blob.

use crate::layout_props::Alignment;
use crate::style::{Color, Dimension};
use crate::tree::NodeId;

/// Dropdown runtime state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropdownState {
    pub placeholder: Option<String>,
    pub options: Vec<String>,
    /// Selected option index, -1 when nothing is selected
    pub selected: i32,
    pub open: bool,
}

/// Modal runtime state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalState {
    pub open: bool,
    pub title: Option<String>,
}

/// Tab-group runtime state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabGroupState {
    pub selected: i32,
    pub reorderable: bool,
}

/// Per-tab data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabData {
    pub title: Option<String>,
    pub active_background: Option<Color>,
    pub text_color: Option<Color>,
    pub active_text_color: Option<Color>,
}

/// Tab-content state: every registered panel, not just the live child
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabContentState {
    pub panels: Vec<NodeId>,
    pub selected: i32,
}

/// One table column definition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableColumn {
    pub width: Dimension,
    pub min_width: Dimension,
    pub max_width: Dimension,
    pub alignment: Alignment,
    pub auto_size: bool,
}

/// Table styling options
#[derive(Debug, Clone, PartialEq)]
pub struct TableStyling {
    pub header_background: Color,
    pub even_row_background: Color,
    pub odd_row_background: Color,
    pub border_color: Color,
    pub border_width: f32,
    pub cell_padding: f32,
    pub show_borders: bool,
    pub striped: bool,
    pub header_sticky: bool,
    pub collapse_borders: bool,
}

impl Default for TableStyling {
    fn default() -> Self {
        Self {
            header_background: Color::Transparent,
            even_row_background: Color::Transparent,
            odd_row_background: Color::Transparent,
            border_color: Color::Transparent,
            border_width: 1.0,
            cell_padding: 8.0,
            show_borders: true,
            striped: false,
            header_sticky: false,
            collapse_borders: true,
        }
    }
}

/// Table state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableState {
    pub columns: Vec<TableColumn>,
    pub styling: TableStyling,
}

/// Cell span and alignment data
#[derive(Debug, Clone, PartialEq)]
pub struct TableCellData {
    pub colspan: u16,
    pub rowspan: u16,
    pub alignment: Alignment,
    pub vertical_alignment: Alignment,
}

impl Default for TableCellData {
    fn default() -> Self {
        Self {
            colspan: 1,
            rowspan: 1,
            alignment: Alignment::Start,
            vertical_alignment: Alignment::Start,
        }
    }
}

/// Heading data (H1-H6)
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingData {
    pub level: u8,
    /// Anchor id for linking
    pub anchor: Option<String>,
}

impl Default for HeadingData {
    fn default() -> Self {
        Self { level: 1, anchor: None }
    }
}

/// Code block data
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlockData {
    pub language: Option<String>,
    pub code: String,
    pub show_line_numbers: bool,
    pub start_line: u32,
}

impl Default for CodeBlockData {
    fn default() -> Self {
        Self { language: None, code: String::new(), show_line_numbers: false, start_line: 1 }
    }
}

/// List data
#[derive(Debug, Clone, PartialEq)]
pub struct ListData {
    pub ordered: bool,
    /// Starting number for ordered lists
    pub start: u32,
    /// Tight vs loose spacing
    pub tight: bool,
}

impl Default for ListData {
    fn default() -> Self {
        Self { ordered: false, start: 1, tight: true }
    }
}

/// List item data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListItemData {
    pub number: u32,
    pub marker: Option<String>,
    pub task: bool,
    pub checked: bool,
}

/// Link data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkData {
    pub url: String,
    pub title: Option<String>,
    pub target: Option<String>,
    pub rel: Option<String>,
}

/// Type-tagged payload; exactly one interpretation is valid per kind
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Payload {
    #[default]
    None,
    Checkbox {
        checked: bool,
    },
    Image {
        src: String,
        alt: Option<String>,
    },
    Dropdown(DropdownState),
    Modal(ModalState),
    TabGroup(TabGroupState),
    Tab(TabData),
    TabContent(TabContentState),
    Table(TableState),
    TableCell(TableCellData),
    Heading(HeadingData),
    CodeBlock(CodeBlockData),
    List(ListData),
    ListItem(ListItemData),
    Link(LinkData),
    Placeholder {
        name: String,
        preserve: bool,
    },
    /// Opaque payload for `Custom` components, preserved verbatim
    Custom(serde_json::Value),
}

impl Payload {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
