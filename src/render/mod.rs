//! Frame rendering: a pure per-tick plan, numeral layout, and CPU rasterization.

pub mod cpu;
pub mod frame;
pub mod plan;
pub mod text;
