//! ringtimer renders animated countdown timers as looping GIFs.
//!
//! A timer of `duration` seconds becomes `duration + 1` frames, one per second, each showing a
//! ring of dots that vanish as time runs out and the remaining seconds as a centered numeral.
//!
//! - Validate raw inputs into [`TimerParams`] with [`TimerArgs::resolve`]
//! - Write the artifact with [`render_timer_gif`], or stream frames into any [`FrameSink`]
//!   with [`render_countdown`]
//! - Render a single tick with [`render_tick_frame`]
#![forbid(unsafe_code)]

mod foundation;

mod countdown;
/// Encoding sinks.
pub mod encode;
/// Dot placement on the ring.
pub mod geometry;
/// Raw inputs, defaults, and validation.
pub mod params;
/// Per-tick frame planning and CPU rasterization.
pub mod render;

pub use crate::foundation::core::{Canvas, PixelPoint, Rgba8, Rgba8Premul, Tick, countdown};
pub use crate::foundation::error::{TimerError, TimerResult};

pub use crate::countdown::{
    CountdownOpts, RenderStats, render_countdown, render_tick_frame, render_timer_gif,
    render_timer_gif_with,
};
pub use crate::encode::gif::{Disposal, GifSink, GifSinkOpts};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::params::color::ColorSpec;
pub use crate::params::error::ParamError;
pub use crate::params::resolve::{FontSource, Palette, SizeSpec, TimerArgs, TimerParams};
pub use crate::render::cpu::CpuFrameRenderer;
pub use crate::render::frame::FrameRGBA;
pub use crate::render::text::NumeralFont;
