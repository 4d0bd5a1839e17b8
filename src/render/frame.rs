use crate::foundation::core::{Rgba8, Rgba8Premul, Tick};
use crate::foundation::math::unpremultiply_rgba8;

/// A rendered frame as premultiplied RGBA8 pixels, tagged with its countdown value.
///
/// Frames are produced once per tick and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Countdown value this frame shows.
    pub tick: Tick,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Premultiplied pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some(Rgba8Premul {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        })
    }

    /// Straight-alpha pixel at `(x, y)`.
    pub fn straight_pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        self.pixel(x, y).map(Rgba8Premul::to_straight)
    }

    /// Copy of the pixel data with alpha un-premultiplied, as image codecs expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        unpremultiply_rgba8(&self.data)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
