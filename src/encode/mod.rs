//! Encoding sinks.
//!
//! Sinks consume rendered frames in countdown order and are driven by
//! [`render_countdown`](crate::render_countdown).

/// Animated GIF output.
pub mod gif;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
