//! Test fixtures and factory functions for creating request bodies.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine};
use image::{ImageFormat, Rgba, RgbaImage};
use serde_json::{json, Value};

/// Progress request body.
pub fn progress_request(mode: &str, grapheme: &str, is_correct: bool) -> Value {
    json!({
        "game_mode": mode,
        "grapheme": grapheme,
        "is_correct": is_correct,
    })
}

/// Progress request body with a response time.
pub fn timed_progress_request(grapheme: &str, is_correct: bool, response_time_ms: i64) -> Value {
    json!({
        "game_mode": "find-letter",
        "grapheme": grapheme,
        "is_correct": is_correct,
        "response_time_ms": response_time_ms,
    })
}

/// Canvas-sized PNG with a vertical ink bar at x = 200, y = 100..200,
/// base64 encoded.
pub fn reference_png() -> String {
    let mut image = RgbaImage::from_pixel(400, 300, Rgba([255, 255, 255, 255]));
    for y in 100..200 {
        for x in 198..203 {
            image.put_pixel(x, y, Rgba([209, 213, 219, 255]));
        }
    }

    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode png");
    STANDARD.encode(bytes)
}

/// Pen stroke through the given canvas points.
pub fn stroke(tool: &str, points: &[(f64, f64)]) -> Value {
    json!({
        "tool": tool,
        "points": points
            .iter()
            .map(|(x, y)| json!({ "x": x, "y": y }))
            .collect::<Vec<_>>(),
    })
}
