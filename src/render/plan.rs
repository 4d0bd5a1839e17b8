use crate::foundation::core::{PixelPoint, Rgba8, Tick};
use crate::geometry::DotRing;
use crate::params::resolve::{Palette, TimerParams};

/// Which palette entry a mark is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Normal,
    Warning,
}

impl Tone {
    pub fn color(self, palette: Palette) -> Rgba8 {
        match self {
            Tone::Normal => palette.normal,
            Tone::Warning => palette.warning,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DotPlan {
    pub index: u32,
    pub center: PixelPoint,
    pub tone: Tone,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumeralPlan {
    pub text: String,
    pub tone: Tone,
}

/// Everything drawn for one tick, before any pixels exist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FramePlan {
    pub tick: Tick,
    pub dots: Vec<DotPlan>,
    pub numeral: NumeralPlan,
}

impl FramePlan {
    pub fn warning_dots(&self) -> usize {
        self.dots.iter().filter(|d| d.tone == Tone::Warning).count()
    }
}

/// Derive the dot list and numeral for tick `t`.
///
/// Tick `t` shows dots `0..t`. A dot is warning-toned when `index < warning`; the numeral is
/// warning-toned when `t <= warning`. The two comparisons differ on purpose.
pub fn plan_frame(params: &TimerParams, tick: Tick) -> FramePlan {
    let ring = DotRing::for_canvas(params.canvas(), params.duration());
    let warning = params.warning();

    let dots = (0..tick.0)
        .map(|index| DotPlan {
            index,
            center: ring.position(index),
            tone: if warning.is_some_and(|w| index < w) {
                Tone::Warning
            } else {
                Tone::Normal
            },
        })
        .collect();

    let numeral = NumeralPlan {
        text: tick.to_string(),
        tone: if warning.is_some_and(|w| tick.0 <= w) {
            Tone::Warning
        } else {
            Tone::Normal
        },
    };

    FramePlan {
        tick,
        dots,
        numeral,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
