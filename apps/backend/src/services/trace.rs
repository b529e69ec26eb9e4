//! Scoring a trace drawn over a client-rendered reference glyph

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine};
use betukereso_core::{Point, TraceSession};
use image::{ImageError, ImageFormat, ImageReader, Limits};

use crate::error::{ApiError, Result};
use crate::models::*;

/// Largest reference image side accepted, in pixels.
pub const MAX_REFERENCE_SIDE: u32 = 2048;

/// Decode a base64 PNG (optionally as a `data:` URL) into a trace session.
pub fn decode_reference(encoded: &str) -> Result<TraceSession> {
    let payload = match encoded.split_once(";base64,") {
        Some((_, data)) => data,
        None => encoded,
    };
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| ApiError::BadRequest(format!("reference_png is not base64: {}", e)))?;

    // Dimensions are checked from the header, before any pixel is decoded.
    let mut limits = Limits::default();
    limits.max_image_width = Some(MAX_REFERENCE_SIDE);
    limits.max_image_height = Some(MAX_REFERENCE_SIDE);

    let mut reader = ImageReader::with_format(Cursor::new(bytes), ImageFormat::Png);
    reader.limits(limits);
    let image = reader.decode().map_err(|e| match e {
        ImageError::Limits(_) => ApiError::BadRequest(format!(
            "reference image exceeds {}x{}",
            MAX_REFERENCE_SIDE, MAX_REFERENCE_SIDE
        )),
        e => ApiError::BadRequest(format!("reference_png is not a PNG: {}", e)),
    })?;

    Ok(TraceSession::from_surface(&image.to_rgba8()))
}

/// Replay the strokes onto the session and score it.
pub fn score_trace(request: &TraceEvaluateRequest) -> Result<TraceScore> {
    let mut session = decode_reference(&request.reference_png)?;

    for stroke in &request.strokes {
        session.set_tool(stroke.tool);
        let mut points = stroke.points.iter().map(|p| Point::from_canvas(p.x, p.y));
        if let Some(first) = points.next() {
            session.pen_down(first);
            for point in points {
                session.pen_move(point);
            }
            session.pen_up();
        }
    }

    let score = session.score();
    tracing::debug!(
        strokes = request.strokes.len(),
        accuracy = score.accuracy,
        correct = score.correct,
        "trace evaluated"
    );
    Ok(score)
}
