use std::fmt;

use serde::{Deserialize, Serialize};

use crate::foundation::math::{premul_u8, unpremul_u8};

/// One countdown value. A timer of duration `d` produces ticks `d, d-1, ..., 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tick(pub u32);

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strictly decreasing ticks from `duration` down to `0` inclusive.
pub fn countdown(duration: u32) -> impl DoubleEndedIterator<Item = Tick> {
    (0..=duration).rev().map(Tick)
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Integer center of the canvas.
    pub fn center(self) -> PixelPoint {
        PixelPoint {
            x: (self.width / 2) as i32,
            y: (self.height / 2) as i32,
        }
    }

    /// Radius of the dot ring: `floor(min(width, height) / 2.5)`.
    pub fn ring_radius(self) -> f64 {
        (f64::from(self.width.min(self.height)) / 2.5).floor()
    }

    /// Dimensions as the 16-bit pair required by the rasterizer and the GIF screen descriptor.
    pub fn as_u16(self) -> Option<(u16, u16)> {
        let w = u16::try_from(self.width).ok()?;
        let h = u16::try_from(self.height).ok()?;
        Some((w, h))
    }
}

/// Integer pixel position. `y` grows downwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Default timer background: white with zero alpha.
    pub const TRANSPARENT_WHITE: Self = Self::new(255, 255, 255, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn premultiplied(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, self.a)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: premul_u8(r, a),
            g: premul_u8(g, a),
            b: premul_u8(b, a),
            a,
        }
    }

    /// Convert back to straight alpha. Fully transparent pixels become transparent black.
    pub fn to_straight(self) -> Rgba8 {
        Rgba8 {
            r: unpremul_u8(self.r, self.a),
            g: unpremul_u8(self.g, self.a),
            b: unpremul_u8(self.b, self.a),
            a: self.a,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
