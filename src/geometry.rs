use std::f64::consts::{FRAC_PI_2, TAU};

use crate::foundation::core::{Canvas, PixelPoint};

/// Integer position of dot `index` on a ring of `total` evenly spaced slots.
///
/// `angle = π/2 + 2π·index/total`, so index 0 sits at the top and the y axis is flipped for
/// screen space. `total == 0` yields the top position.
pub fn dot_position(index: u32, total: u32, center: PixelPoint, radius: f64) -> PixelPoint {
    let angle = if total == 0 {
        FRAC_PI_2
    } else {
        FRAC_PI_2 + TAU * f64::from(index) / f64::from(total)
    };
    PixelPoint {
        x: center.x + (radius * angle.cos()).round() as i32,
        y: center.y - (radius * angle.sin()).round() as i32,
    }
}

/// The fixed dot ring of one timer.
///
/// `slots` is the timer duration, never the current tick, so dots vanish in place instead of
/// the ring re-spacing itself every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotRing {
    pub center: PixelPoint,
    pub radius: f64,
    pub slots: u32,
}

impl DotRing {
    pub fn for_canvas(canvas: Canvas, slots: u32) -> Self {
        Self {
            center: canvas.center(),
            radius: canvas.ring_radius(),
            slots,
        }
    }

    pub fn position(&self, index: u32) -> PixelPoint {
        dot_position(index, self.slots, self.center, self.radius)
    }
}

#[cfg(test)]
#[path = "../tests/unit/geometry.rs"]
mod tests;
