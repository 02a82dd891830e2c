//! Value Codecs
//!
//! Textual encodings shared by the serializer and deserializer: dimensions
//! as unit-suffixed strings, colors as hex/`transparent`/variable
//! references/gradient objects, and the three spacing compactions. Compact
//! and expand are mutual inverses.

use kir_tree::{
    Alignment, Color, Dimension, Gradient, GradientKind, GradientStop, Spacing, TextAlign,
};
use serde_json::{json, Value};

/// Format a float without a trailing `.0` for whole values.
pub(crate) fn fmt_number(v: f32) -> String {
    if v.fract() == 0.0 && v.abs() < 1e9 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

// ============================================================================
// Dimensions
// ============================================================================

/// `120px`, `50%`, `1.5em`, `auto`, …
pub fn dimension_to_string(dim: Dimension) -> String {
    match dim {
        Dimension::Auto => "auto".to_string(),
        Dimension::Px(v) => format!("{}px", fmt_number(v)),
        Dimension::Percent(v) => format!("{}%", fmt_number(v)),
        Dimension::Em(v) => format!("{}em", fmt_number(v)),
        Dimension::Rem(v) => format!("{}rem", fmt_number(v)),
        Dimension::Vw(v) => format!("{}vw", fmt_number(v)),
        Dimension::Vh(v) => format!("{}vh", fmt_number(v)),
        Dimension::Fr(v) => format!("{}fr", fmt_number(v)),
    }
}

/// Parse a dimension string. Unknown suffixes and bad numbers yield `Auto`.
pub fn parse_dimension(s: &str) -> Dimension {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("auto") {
        return Dimension::Auto;
    }

    fn num(prefix: &str) -> Option<f32> {
        prefix.parse::<f32>().ok()
    }

    if let Some(p) = s.strip_suffix("px") {
        return num(p).map(Dimension::Px).unwrap_or_default();
    }
    if let Some(p) = s.strip_suffix("rem") {
        return num(p).map(Dimension::Rem).unwrap_or_default();
    }
    if let Some(p) = s.strip_suffix("em") {
        return num(p).map(Dimension::Em).unwrap_or_default();
    }
    if let Some(p) = s.strip_suffix("vw") {
        return num(p).map(Dimension::Vw).unwrap_or_default();
    }
    if let Some(p) = s.strip_suffix("vh") {
        return num(p).map(Dimension::Vh).unwrap_or_default();
    }
    if let Some(p) = s.strip_suffix("fr") {
        return num(p).map(Dimension::Fr).unwrap_or_default();
    }
    if let Some(p) = s.strip_suffix('%') {
        return num(p).map(Dimension::Percent).unwrap_or_default();
    }
    // Bare number means pixels
    num(s).map(Dimension::Px).unwrap_or_default()
}

// ============================================================================
// Colors
// ============================================================================

/// `transparent`, `#rrggbb`/`#rrggbbaa`, or a variable reference string.
/// Gradients are objects; see [`gradient_to_value`].
pub fn color_to_string(color: &Color) -> String {
    match color {
        Color::Transparent => "transparent".to_string(),
        Color::Solid { r, g, b, a } => {
            if *a == 255 {
                format!("#{r:02x}{g:02x}{b:02x}")
            } else {
                format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
            }
        }
        Color::Var(name) => name.clone(),
        Color::Gradient(_) => "transparent".to_string(),
    }
}

/// Parse a color string; unparseable input yields `Transparent`.
pub fn parse_color(s: &str) -> Color {
    let s = s.trim();
    if s.eq_ignore_ascii_case("transparent") || s.is_empty() {
        return Color::Transparent;
    }
    if s.starts_with("var(") {
        return Color::Var(s.to_string());
    }
    if let Some(hex) = s.strip_prefix('#') {
        let parse2 = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        return match hex.len() {
            6 => match (parse2(0), parse2(2), parse2(4)) {
                (Some(r), Some(g), Some(b)) => Color::Solid { r, g, b, a: 255 },
                _ => Color::Transparent,
            },
            8 => match (parse2(0), parse2(2), parse2(4), parse2(6)) {
                (Some(r), Some(g), Some(b), Some(a)) => Color::Solid { r, g, b, a },
                _ => Color::Transparent,
            },
            _ => Color::Transparent,
        };
    }
    Color::Transparent
}

/// `{ "type": "linear", "angle": 45, "stops": [...] }`
pub fn gradient_to_value(gradient: &Gradient) -> Value {
    let mut obj = serde_json::Map::new();
    let kind = match gradient.kind {
        GradientKind::Linear => "linear",
        GradientKind::Radial => "radial",
        GradientKind::Conic => "conic",
    };
    obj.insert("type".into(), json!(kind));

    match gradient.kind {
        GradientKind::Linear => {
            obj.insert("angle".into(), json!(gradient.angle));
        }
        GradientKind::Radial | GradientKind::Conic => {
            obj.insert("centerX".into(), json!(gradient.center_x));
            obj.insert("centerY".into(), json!(gradient.center_y));
        }
    }

    let stops: Vec<Value> = gradient
        .stops
        .iter()
        .map(|s| {
            json!({
                "position": s.position,
                "color": color_to_string(&Color::Solid { r: s.r, g: s.g, b: s.b, a: s.a }),
            })
        })
        .collect();
    obj.insert("stops".into(), Value::Array(stops));
    Value::Object(obj)
}

/// Parse a gradient object; `None` on malformed input.
pub fn parse_gradient(value: &Value) -> Option<Gradient> {
    let obj = value.as_object()?;
    let kind = match obj.get("type").and_then(Value::as_str) {
        Some("radial") => GradientKind::Radial,
        Some("conic") => GradientKind::Conic,
        _ => GradientKind::Linear,
    };

    let mut gradient = Gradient {
        kind,
        angle: obj.get("angle").and_then(Value::as_f64).unwrap_or(0.0) as f32,
        center_x: obj.get("centerX").and_then(Value::as_f64).unwrap_or(0.0) as f32,
        center_y: obj.get("centerY").and_then(Value::as_f64).unwrap_or(0.0) as f32,
        stops: Vec::new(),
    };

    if let Some(stops) = obj.get("stops").and_then(Value::as_array) {
        for stop in stops {
            let Some(stop_obj) = stop.as_object() else { continue };
            let position = stop_obj.get("position").and_then(Value::as_f64).unwrap_or(0.0) as f32;
            let color = stop_obj.get("color").and_then(Value::as_str).map(parse_color);
            if let Some(Color::Solid { r, g, b, a }) = color {
                gradient.stops.push(GradientStop { position, r, g, b, a });
            }
        }
    }
    Some(gradient)
}

// ============================================================================
// Spacing
// ============================================================================

/// Compact a spacing value: scalar when uniform, `[vertical, horizontal]`
/// when paired, else `[top, right, bottom, left]`.
pub fn spacing_to_value(spacing: Spacing) -> Value {
    if spacing.top == spacing.right
        && spacing.right == spacing.bottom
        && spacing.bottom == spacing.left
    {
        return json!(spacing.top);
    }
    if spacing.top == spacing.bottom && spacing.left == spacing.right {
        return json!([spacing.top, spacing.left]);
    }
    json!([spacing.top, spacing.right, spacing.bottom, spacing.left])
}

/// Expand any of the three spacing encodings.
pub fn parse_spacing(value: &Value) -> Spacing {
    if let Some(n) = value.as_f64() {
        return Spacing::uniform(n as f32);
    }
    if let Some(arr) = value.as_array() {
        let nums: Vec<f32> = arr.iter().filter_map(|v| v.as_f64()).map(|v| v as f32).collect();
        match nums.as_slice() {
            [v, h] => return Spacing::pair(*v, *h),
            [t, r, b, l] => return Spacing { top: *t, right: *r, bottom: *b, left: *l },
            _ => {}
        }
    }
    Spacing::default()
}

// ============================================================================
// Enum name tables
// ============================================================================

pub fn justify_to_str(a: Alignment) -> &'static str {
    match a {
        Alignment::Center => "center",
        Alignment::End => "flex-end",
        Alignment::SpaceBetween => "space-between",
        Alignment::SpaceAround => "space-around",
        Alignment::SpaceEvenly => "space-evenly",
        Alignment::Stretch => "stretch",
        Alignment::Start => "flex-start",
    }
}

pub fn align_items_to_str(a: Alignment) -> &'static str {
    match a {
        Alignment::Center => "center",
        Alignment::End => "flex-end",
        Alignment::Stretch => "stretch",
        _ => "flex-start",
    }
}

pub fn parse_alignment(s: &str) -> Alignment {
    match s {
        "center" => Alignment::Center,
        "flex-end" | "end" => Alignment::End,
        "space-between" => Alignment::SpaceBetween,
        "space-around" => Alignment::SpaceAround,
        "space-evenly" => Alignment::SpaceEvenly,
        "stretch" => Alignment::Stretch,
        _ => Alignment::Start,
    }
}

pub fn text_align_to_str(a: TextAlign) -> &'static str {
    match a {
        TextAlign::Center => "center",
        TextAlign::Right => "right",
        TextAlign::Justify => "justify",
        TextAlign::Left => "left",
    }
}

pub fn parse_text_align(s: &str) -> TextAlign {
    match s {
        "center" => TextAlign::Center,
        "right" => TextAlign::Right,
        "justify" => TextAlign::Justify,
        _ => TextAlign::Left,
    }
}
