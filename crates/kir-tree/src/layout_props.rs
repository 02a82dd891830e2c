//! Layout Property Set
//!
//! Flex and grid parameters, size bounds and box spacing. `justify_content`
//! and `cross_axis` are the single source of truth for axis alignment.

use crate::style::{Dimension, Spacing};

/// Display/layout mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LayoutMode {
    #[default]
    Flex,
    Grid,
    Block,
    None,
}

/// Axis alignment for flex and grid containers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
    Stretch,
}

/// Main-axis direction of a flex container
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlexDirection {
    #[default]
    Column,
    Row,
}

impl FlexDirection {
    pub fn is_row(&self) -> bool {
        matches!(self, Self::Row)
    }
}

/// Flexbox container/item parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flex {
    pub direction: FlexDirection,
    pub wrap: bool,
    /// Gap between children in pixels, applied between but not after
    pub gap: f32,
    /// Main-axis alignment
    pub justify_content: Alignment,
    /// Cross-axis alignment
    pub cross_axis: Alignment,
    pub grow: u8,
    pub shrink: u8,
    /// Flex basis in pixels; 0 means auto/content
    pub basis: f32,
}

impl Default for Flex {
    fn default() -> Self {
        Self {
            direction: FlexDirection::Column,
            wrap: false,
            gap: 0.0,
            justify_content: Alignment::Start,
            cross_axis: Alignment::Start,
            grow: 0,
            shrink: 1,
            basis: 0.0,
        }
    }
}

/// Grid track sizing kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GridTrackKind {
    #[default]
    Auto,
    Fr,
    Px,
    Percent,
}

/// One grid track definition
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GridTrack {
    pub kind: GridTrackKind,
    pub value: f32,
}

/// Grid container parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    pub rows: Vec<GridTrack>,
    pub columns: Vec<GridTrack>,
    pub row_gap: f32,
    pub column_gap: f32,
    pub justify_items: Alignment,
    pub align_items: Alignment,
}

/// Complete layout property set for one component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutProps {
    pub mode: LayoutMode,
    /// True only when the document carried an explicit `display`
    pub display_explicit: bool,
    pub min_width: Dimension,
    pub min_height: Dimension,
    pub max_width: Dimension,
    pub max_height: Dimension,
    pub flex: Flex,
    pub grid: Grid,
    pub margin: Spacing,
    pub padding: Spacing,
    /// Width/height ratio; 0 means unset
    pub aspect_ratio: f32,
}
