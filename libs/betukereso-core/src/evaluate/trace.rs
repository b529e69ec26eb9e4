//! Free-hand trace accuracy (trace-letter).
//!
//! The reference glyph is rasterized by the front end onto a 400x300 surface.
//! Every non-background pixel of that surface is a letter pixel. While the
//! child draws, each raster coordinate the pen passes over is recorded; when
//! the child signals the end of the trace the drawing is scored:
//!
//! - a drawn pixel is covered if some letter pixel lies within 10 px of it
//! - accuracy = covered / drawn, and the trace passes at 80% or more
//!
//! Letter pixels are bucketed into a grid whose cells are as wide as the
//! tolerance, so a coverage query only inspects the 3x3 cells around it.

use std::collections::{HashMap, HashSet};

use image::{RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};

pub const CANVAS_WIDTH: u32 = 400;
pub const CANVAS_HEIGHT: u32 = 300;
/// A channel below this value marks ink.
pub const INK_CUTOFF: u8 = 250;
pub const COVERAGE_TOLERANCE: i32 = 10;
pub const PASS_ACCURACY: f64 = 0.80;
pub const ERASER_RADIUS: i32 = 7;

/// Raster coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Pointer position in canvas space, floored to the containing pixel.
    pub fn from_canvas(x: f64, y: f64) -> Self {
        Self::new(x.floor() as i32, y.floor() as i32)
    }

    fn distance_sq(self, other: Point) -> i64 {
        let dx = self.x as i64 - other.x as i64;
        let dy = self.y as i64 - other.y as i64;
        dx * dx + dy * dy
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Rendering surface holding the rasterized reference glyph.
pub trait GlyphSurface {
    fn dimensions(&self) -> (u32, u32);

    /// Opaque colour of a pixel, composited over white.
    fn rgb(&self, x: u32, y: u32) -> [u8; 3];
}

impl GlyphSurface for RgbImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        self.get_pixel(x, y).0
    }
}

impl GlyphSurface for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        let [r, g, b, a] = self.get_pixel(x, y).0;
        let over_white = |c: u8| -> u8 {
            let (c, a) = (c as u32, a as u32);
            ((c * a + 255 * (255 - a)) / 255) as u8
        };
        [over_white(r), over_white(g), over_white(b)]
    }
}

/// Drawing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    Pen,
    Eraser,
}

impl Default for Tool {
    fn default() -> Self {
        Self::Pen
    }
}

/// Result of scoring a trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraceScore {
    pub drawn: usize,
    pub covered: usize,
    pub accuracy: f64,
    pub correct: bool,
}

/// Letter pixels bucketed by tolerance-sized grid cells.
#[derive(Debug, Clone, Default)]
struct CoverageIndex {
    cell: i32,
    buckets: HashMap<(i32, i32), Vec<Point>>,
    len: usize,
}

impl CoverageIndex {
    fn new(points: HashSet<Point>, tolerance: i32) -> Self {
        let cell = tolerance.max(1);
        let len = points.len();
        let mut buckets: HashMap<(i32, i32), Vec<Point>> = HashMap::new();
        for p in points {
            buckets
                .entry((p.x.div_euclid(cell), p.y.div_euclid(cell)))
                .or_default()
                .push(p);
        }
        Self { cell, buckets, len }
    }

    fn is_near(&self, p: Point, tolerance: i32) -> bool {
        let limit = (tolerance as i64) * (tolerance as i64);
        let (bx, by) = (p.x.div_euclid(self.cell), p.y.div_euclid(self.cell));
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(points) = self.buckets.get(&(bx + dx, by + dy)) {
                    if points.iter().any(|q| q.distance_sq(p) <= limit) {
                        return true;
                    }
                }
            }
        }
        false
    }
}

/// Working state of one trace attempt: reference pixels plus what was drawn.
#[derive(Debug, Clone)]
pub struct TraceSession {
    letter: CoverageIndex,
    drawn: HashSet<Point>,
    bounds: Option<(u32, u32)>,
    tool: Tool,
    last: Option<Point>,
}

impl TraceSession {
    /// Collect letter pixels from a rendered reference surface.
    pub fn from_surface<S: GlyphSurface + ?Sized>(surface: &S) -> Self {
        let (width, height) = surface.dimensions();
        let mut letter = HashSet::new();
        for y in 0..height {
            for x in 0..width {
                if surface.rgb(x, y).iter().any(|&c| c < INK_CUTOFF) {
                    letter.insert(Point::new(x as i32, y as i32));
                }
            }
        }
        let mut session = Self::from_letter_pixels(letter);
        session.bounds = Some((width, height));
        session
    }

    /// Session over explicit letter pixels with no canvas bounds.
    pub fn from_letter_pixels<I>(pixels: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Point>,
    {
        let letter: HashSet<Point> = pixels.into_iter().map(Into::into).collect();
        Self {
            letter: CoverageIndex::new(letter, COVERAGE_TOLERANCE),
            drawn: HashSet::new(),
            bounds: None,
            tool: Tool::default(),
            last: None,
        }
    }

    pub fn letter_pixel_count(&self) -> usize {
        self.letter.len
    }

    pub fn drawn_pixel_count(&self) -> usize {
        self.drawn.len()
    }

    pub fn is_drawn(&self, p: Point) -> bool {
        self.drawn.contains(&p)
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switch tools. Ends any stroke in progress.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.last = None;
    }

    pub fn pen_down(&mut self, p: Point) {
        self.last = Some(p);
        if self.in_bounds(p) {
            self.apply(p);
        }
    }

    /// Extend the current stroke; ignored when no stroke is in progress.
    ///
    /// On a bounded canvas the segment is clipped before it is rasterized, so
    /// far-away samples cost no more than a stroke across the canvas.
    pub fn pen_move(&mut self, p: Point) {
        let Some(from) = self.last else {
            return;
        };
        let segment = match self.bounds {
            Some(bounds) => clip_segment(from, p, bounds),
            None => Some((from, p)),
        };
        if let Some((a, b)) = segment {
            for q in line_points(a, b) {
                self.apply(q);
            }
        }
        self.last = Some(p);
    }

    pub fn pen_up(&mut self) {
        self.last = None;
    }

    /// Wipe the drawing, keeping the reference glyph.
    pub fn clear(&mut self) {
        self.drawn.clear();
        self.last = None;
        self.tool = Tool::Pen;
    }

    /// Score the drawing against the reference glyph.
    pub fn score(&self) -> TraceScore {
        let drawn = self.drawn.len();
        if drawn == 0 || self.letter.len == 0 {
            return TraceScore {
                drawn,
                covered: 0,
                accuracy: 0.0,
                correct: false,
            };
        }

        let covered = self
            .drawn
            .iter()
            .filter(|p| self.letter.is_near(**p, COVERAGE_TOLERANCE))
            .count();
        let accuracy = covered as f64 / drawn as f64;
        let correct = accuracy >= PASS_ACCURACY;
        tracing::debug!(covered, drawn, accuracy, correct, "trace scored");

        TraceScore {
            drawn,
            covered,
            accuracy,
            correct,
        }
    }

    fn apply(&mut self, p: Point) {
        match self.tool {
            Tool::Pen => {
                self.drawn.insert(p);
            }
            Tool::Eraser => {
                let r = ERASER_RADIUS;
                let limit = (r as i64) * (r as i64);
                for dx in -r..=r {
                    for dy in -r..=r {
                        let q = Point::new(p.x.saturating_add(dx), p.y.saturating_add(dy));
                        if q.distance_sq(p) <= limit {
                            self.drawn.remove(&q);
                        }
                    }
                }
            }
        }
    }

    fn in_bounds(&self, p: Point) -> bool {
        match self.bounds {
            Some((w, h)) => p.x >= 0 && p.y >= 0 && (p.x as u32) < w && (p.y as u32) < h,
            None => true,
        }
    }
}

/// Part of the segment inside a `width` x `height` canvas (Liang-Barsky).
fn clip_segment(from: Point, to: Point, (width, height): (u32, u32)) -> Option<(Point, Point)> {
    if width == 0 || height == 0 {
        return None;
    }
    let (x0, y0) = (from.x as f64, from.y as f64);
    let (dx, dy) = (to.x as f64 - x0, to.y as f64 - y0);
    let (x_max, y_max) = ((width - 1) as f64, (height - 1) as f64);

    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [(-dx, x0), (dx, x_max - x0), (-dy, y0), (dy, y_max - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f64| {
        Point::new(
            (x0 + t * dx).round().clamp(0.0, x_max) as i32,
            (y0 + t * dy).round().clamp(0.0, y_max) as i32,
        )
    };
    Some((at(t0), at(t1)))
}

/// Raster line between two points, both ends included (Bresenham).
fn line_points(from: Point, to: Point) -> Vec<Point> {
    let (x1, y1) = (to.x as i64, to.y as i64);
    let dx = (x1 - from.x as i64).abs();
    let dy = -(y1 - from.y as i64).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (from.x as i64, from.y as i64);

    let mut points = Vec::new();
    loop {
        points.push(Point::new(x as i32, y as i32));
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    points
}
