//! Text Measurement
//!
//! A single process-wide slot for the renderer's text measurement callback.
//! Callers must not swap the callback while a layout pass is in flight.
//! Without a callback, a per-character heuristic keeps layout running.

use std::sync::RwLock;

/// `(text, font_size, max_width) -> (width, height)`; `max_width` of 0
/// means no wrapping.
pub type TextMeasureFn = fn(&str, f32, f32) -> (f32, f32);

static TEXT_MEASURE: RwLock<Option<TextMeasureFn>> = RwLock::new(None);

/// Register the renderer's measurement callback. Must happen before any
/// layout pass that contains text-bearing nodes.
pub fn set_text_measure_callback(callback: TextMeasureFn) {
    if let Ok(mut slot) = TEXT_MEASURE.write() {
        *slot = Some(callback);
    }
}

/// Remove the registered callback, falling back to the heuristic.
pub fn clear_text_measure_callback() {
    if let Ok(mut slot) = TEXT_MEASURE.write() {
        *slot = None;
    }
}

/// Measure a run of text, via the registered callback when present.
pub fn measure_text(text: &str, font_size: f32, max_width: f32) -> (f32, f32) {
    let callback = TEXT_MEASURE.read().ok().and_then(|slot| *slot);
    match callback {
        Some(f) => f(text, font_size, max_width),
        None => (estimate_text_width(text, font_size), font_size * 1.5),
    }
}

/// Heuristic single-line width estimate, used when no renderer has
/// registered a callback.
pub fn estimate_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * 0.5
}
