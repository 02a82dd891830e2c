//! Intrinsic Sizing
//!
//! Phase one of the two-phase layout contract: what size a node wants
//! before the incoming constraints have their say. Explicit pixel
//! dimensions always win; otherwise content decides, with fixed defaults
//! for chromeless widgets.

use kir_tree::{Component, ComponentKind, Payload};

use crate::measure::{estimate_text_width, measure_text};

const DEFAULT_FONT_SIZE: f32 = 16.0;
const DEFAULT_LINE_HEIGHT: f32 = 1.5;

/// Intrinsic width and height of a leaf node, before clamping.
pub fn intrinsic_size(node: &Component) -> (f32, f32) {
    let style = node.style.as_deref();
    let explicit_w = style.and_then(|s| s.width.px());
    let explicit_h = style.and_then(|s| s.height.px());

    let (content_w, content_h) = content_size(node);

    (explicit_w.unwrap_or(content_w), explicit_h.unwrap_or(content_h))
}

fn font_size(node: &Component, default: f32) -> f32 {
    match node.style.as_deref() {
        Some(s) if s.font.size > 0.0 => s.font.size,
        _ => default,
    }
}

fn line_height(node: &Component) -> f32 {
    match node.style.as_deref() {
        Some(s) if s.font.line_height > 0.0 => s.font.line_height,
        _ => DEFAULT_LINE_HEIGHT,
    }
}

fn text_of(node: &Component) -> &str {
    node.text.as_deref().unwrap_or("")
}

fn content_size(node: &Component) -> (f32, f32) {
    let padding = node
        .style
        .as_deref()
        .map(|s| s.padding)
        .unwrap_or_default();

    match node.kind {
        ComponentKind::Text
        | ComponentKind::Paragraph
        | ComponentKind::Span
        | ComponentKind::Strong
        | ComponentKind::Em
        | ComponentKind::CodeInline
        | ComponentKind::Small
        | ComponentKind::Mark
        | ComponentKind::Link => {
            let size = font_size(node, DEFAULT_FONT_SIZE);
            let (w, _) = measure_text(text_of(node), size, 0.0);
            (w, size * line_height(node))
        }

        ComponentKind::Heading => {
            let level = match &node.payload {
                Payload::Heading(h) => h.level,
                _ => 1,
            };
            // H1 32px down to H6 12px, unless the style says otherwise
            let size = font_size(node, (36 - 4 * level.clamp(1, 6) as i32) as f32);
            let (w, _) = measure_text(text_of(node), size, 0.0);
            (w, size * line_height(node))
        }

        ComponentKind::Button => {
            let size = font_size(node, 14.0);
            let text_w = estimate_text_width(text_of(node), size);
            (
                text_w + padding.horizontal() + 20.0,
                size + padding.vertical() + 12.0,
            )
        }

        ComponentKind::Input => (200.0, 30.0),

        ComponentKind::Checkbox => {
            let size = font_size(node, 14.0);
            let label_w = estimate_text_width(text_of(node), size);
            (18.0 + 6.0 + label_w, 20.0_f32.max(size * line_height(node)))
        }

        ComponentKind::Dropdown => (200.0, 32.0),

        ComponentKind::Image => (100.0, 100.0),

        ComponentKind::Canvas => (300.0, 150.0),

        ComponentKind::CodeBlock => {
            let size = font_size(node, 13.0);
            let code = match &node.payload {
                Payload::CodeBlock(data) => data.code.as_str(),
                _ => text_of(node),
            };
            let lines = code.lines().count().max(1) as f32;
            let widest = code
                .lines()
                .map(|l| estimate_text_width(l, size))
                .fold(0.0_f32, f32::max);
            (
                widest + padding.horizontal() + 16.0,
                lines * size * DEFAULT_LINE_HEIGHT + padding.vertical() + 16.0,
            )
        }

        ComponentKind::HorizontalRule => (0.0, 2.0),

        _ => (100.0, 50.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kir_tree::Dimension;

    #[test]
    fn test_explicit_px_wins() {
        let mut node = Component::text(1, "hello world, quite a long line");
        node.style_mut().width = Dimension::Px(40.0);
        let (w, _) = intrinsic_size(&node);
        assert_eq!(w, 40.0);
    }

    #[test]
    fn test_percent_does_not_override_content() {
        let mut node = Component::text(1, "abcd");
        node.style_mut().width = Dimension::Percent(50.0);
        let (w, _) = intrinsic_size(&node);
        // Heuristic: 4 chars * 16 * 0.5
        assert_eq!(w, 32.0);
    }

    #[test]
    fn test_canvas_default() {
        let node = Component::new(1, ComponentKind::Canvas);
        assert_eq!(intrinsic_size(&node), (300.0, 150.0));
    }

    #[test]
    fn test_input_default() {
        let node = Component::new(1, ComponentKind::Input);
        assert_eq!(intrinsic_size(&node), (200.0, 30.0));
    }

    #[test]
    fn test_text_height_uses_line_height() {
        let mut node = Component::text(1, "hi");
        node.style_mut().font.size = 20.0;
        node.style_mut().font.line_height = 2.0;
        let (_, h) = intrinsic_size(&node);
        assert_eq!(h, 40.0);
    }
}
