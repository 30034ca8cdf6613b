//! Geometry primitives: integer arena positions and RGBA colors

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A point in the arena, on the integer pixel grid
///
/// Motion integrates in floating point, but stored coordinates truncate
/// toward zero like any float-to-int conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Build from floating coordinates (truncating)
    #[inline]
    pub fn from_f64(x: f64, y: f64) -> Self {
        Self {
            x: x as i32,
            y: y as i32,
        }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x as f64
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y as f64
    }

    pub fn set_x(&mut self, x: f64) {
        self.x = x as i32;
    }

    pub fn set_y(&mut self, y: f64) {
        self.y = y as i32;
    }

    #[inline]
    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x(), self.y())
    }

    /// Offset by whole pixels
    #[inline]
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance between two positions
    #[inline]
    pub fn distance(&self, other: &Position) -> f64 {
        self.as_dvec2().distance(other.as_dvec2())
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// RGBA color, 0-255 per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const BLUE: Color = Color::rgba(0, 0, 255, 255);
    pub const RED: Color = Color::rgba(255, 0, 0, 255);
    pub const TEAL: Color = Color::rgba(0, 128, 128, 255);
    pub const CYAN: Color = Color::rgba(0, 255, 255, 255);
    /// Superbots start fully transparent until activated
    pub const CLEAR_YELLOW: Color = Color::rgba(255, 255, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}
