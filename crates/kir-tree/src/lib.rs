//! KIR Component Tree
//!
//! The in-memory model of a declarative UI: component nodes with style and
//! layout property sets, type-tagged payloads, event handler references and
//! reactive property bindings, stored in an arena-backed tree.

mod binding;
mod events;
mod kind;
mod layout_props;
mod layout_state;
mod node;
mod operations;
mod payload;
mod style;
mod tree;

pub use binding::{BindingKind, PropertyBinding};
pub use events::{EventBinding, EventKind, HandlerRef, HandlerSource};
pub use kind::ComponentKind;
pub use layout_props::{
    Alignment, Flex, FlexDirection, Grid, GridTrack, GridTrackKind, LayoutMode, LayoutProps,
};
pub use layout_state::{LayoutState, Rect};
pub use node::{Component, SelectorKind};
pub use payload::{
    CodeBlockData, DropdownState, HeadingData, LinkData, ListData, ListItemData, ModalState,
    Payload, TabContentState, TabData, TabGroupState, TableCellData, TableColumn, TableState,
    TableStyling,
};
pub use style::{
    Border, Color, Dimension, Gradient, GradientKind, GradientStop, PositionMode, Spacing, Style,
    TextAlign, TextDecoration, Transform2d, Typography,
};
pub use tree::{ComponentTree, NodeId};
