//! Renderer-supplied text measurement drives text layout. Isolated in its
//! own binary because the callback slot is process-wide.

use kir_engine::{set_text_measure_callback, Engine};
use serde_json::json;

fn fixed_measure(text: &str, font_size: f32, _max_width: f32) -> (f32, f32) {
    // Monospace-like: every glyph one font-size wide, one line tall.
    (text.chars().count() as f32 * font_size, font_size)
}

#[test]
fn registered_callback_drives_text_size() {
    set_text_measure_callback(fixed_measure);

    let doc = json!({
        "format": "kir",
        "root": {"id": 1, "type": "Column", "children": [
            {"id": 2, "type": "Text", "text": "abcd", "fontSize": 10.0}
        ]}
    })
    .to_string();

    let mut engine = Engine::load_str(&doc).unwrap();
    engine.layout(800.0, 600.0);

    let text = engine.tree().find_by_doc_id(2).unwrap();
    let rect = engine.tree().get(text).unwrap().layout_state.rect;
    assert_eq!(rect.width, 40.0);
}
