use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Canvas, Rgba8, Tick};
use crate::params::color::{ColorSpec, strip_parens};
use crate::params::error::ParamError;

pub const MAX_DURATION: u32 = 999;
pub const DEFAULT_CANVAS: Canvas = Canvas {
    width: 500,
    height: 500,
};
pub const DEFAULT_FONT_SIZE: u32 = 120;
pub const DEFAULT_DOT_RADIUS: u32 = 8;
pub const DEFAULT_BACKGROUND: Rgba8 = Rgba8::TRANSPARENT_WHITE;

/// Legacy command-line value meaning "no warning".
const NO_WARNING_SENTINEL: i64 = -1;

/// Canvas size as written by the user, before range checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeSpec {
    pub width: i64,
    pub height: i64,
}

impl SizeSpec {
    /// Parse `W,H` or `(W,H)`. Exactly two integers, nothing else.
    pub fn parse(input: &str) -> Result<Self, ParamError> {
        let malformed = || ParamError::MalformedSize(input.to_owned());
        let parts = strip_parens(input.trim())
            .split(',')
            .map(str::trim)
            .collect::<Vec<_>>();
        let [w, h] = parts.as_slice() else {
            return Err(malformed());
        };
        Ok(Self {
            width: w.parse().map_err(|_| malformed())?,
            height: h.parse().map_err(|_| malformed())?,
        })
    }
}

impl<'de> Deserialize<'de> for SizeSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Pair([i64; 2]),
            Obj { width: i64, height: i64 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(s) => Self::parse(&s).map_err(serde::de::Error::custom),
            Repr::Pair([width, height]) | Repr::Obj { width, height } => {
                Ok(Self { width, height })
            }
        }
    }
}

/// Where the numeral glyphs come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FontSource {
    /// DejaVu Sans, compiled into the binary.
    #[default]
    Builtin,
    /// A TrueType/OpenType file read once per run.
    File(PathBuf),
}

/// Dot and numeral colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub normal: Rgba8,
    pub warning: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            normal: Rgba8::BLACK,
            warning: Rgba8::RED,
        }
    }
}

/// Raw, unvalidated timer inputs.
///
/// Every field is optional so that defaults, a JSON config file, and command-line flags can be
/// layered with [`TimerArgs::merged_with`] before a single call to [`TimerArgs::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimerArgs {
    pub duration: Option<i64>,
    pub warning: Option<i64>,
    pub result_path: Option<PathBuf>,
    pub size: Option<SizeSpec>,
    pub font_size: Option<i64>,
    pub dot_radius: Option<i64>,
    pub color: Option<ColorSpec>,
    pub dot_color: Option<ColorSpec>,
    pub warning_color: Option<ColorSpec>,
    pub font: Option<PathBuf>,
}

impl TimerArgs {
    /// Convenience constructor for the only required field.
    pub fn with_duration(duration: i64) -> Self {
        Self {
            duration: Some(duration),
            ..Self::default()
        }
    }

    /// Load a JSON config file. Unknown keys are rejected.
    pub fn from_json_path(path: &Path) -> Result<Self, ParamError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ParamError::Config(format!("failed to read '{}': {e}", path.display()))
        })?;
        serde_json::from_str(&text)
            .map_err(|e| ParamError::Config(format!("failed to parse '{}': {e}", path.display())))
    }

    /// Layer `overrides` on top of `self`; fields set in `overrides` win.
    pub fn merged_with(self, overrides: TimerArgs) -> TimerArgs {
        TimerArgs {
            duration: overrides.duration.or(self.duration),
            warning: overrides.warning.or(self.warning),
            result_path: overrides.result_path.or(self.result_path),
            size: overrides.size.or(self.size),
            font_size: overrides.font_size.or(self.font_size),
            dot_radius: overrides.dot_radius.or(self.dot_radius),
            color: overrides.color.or(self.color),
            dot_color: overrides.dot_color.or(self.dot_color),
            warning_color: overrides.warning_color.or(self.warning_color),
            font: overrides.font.or(self.font),
        }
    }

    pub fn resolve(&self) -> Result<TimerParams, ParamError> {
        TimerParams::resolve(self)
    }
}

/// A fully validated parameter set.
///
/// Only [`TimerParams::resolve`] constructs this type, so holding one proves every
/// precondition has been checked.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerParams {
    duration: u32,
    warning: Option<u32>,
    output_path: PathBuf,
    canvas: Canvas,
    font_size: u32,
    dot_radius: u32,
    background: Rgba8,
    palette: Palette,
    font: FontSource,
}

impl TimerParams {
    /// Validate raw inputs and fill in defaults. Reports the first failing precondition.
    pub fn resolve(args: &TimerArgs) -> Result<Self, ParamError> {
        let duration = match args.duration {
            None => return Err(ParamError::MissingDuration),
            Some(d) if (1..=i64::from(MAX_DURATION)).contains(&d) => d as u32,
            Some(d) => return Err(ParamError::DurationOutOfRange(d)),
        };

        let warning = match args.warning {
            None | Some(NO_WARNING_SENTINEL) => None,
            Some(w) if (1..i64::from(duration)).contains(&w) => Some(w as u32),
            Some(w) => {
                return Err(ParamError::WarningOutOfRange {
                    warning: w,
                    duration,
                });
            }
        };

        let canvas = match args.size {
            None => DEFAULT_CANVAS,
            Some(SizeSpec { width, height }) => {
                let dim = |v: i64| u16::try_from(v).ok().filter(|&v| v > 0);
                match (dim(width), dim(height)) {
                    (Some(w), Some(h)) => Canvas {
                        width: u32::from(w),
                        height: u32::from(h),
                    },
                    _ => return Err(ParamError::SizeOutOfRange { width, height }),
                }
            }
        };

        let font_size = match args.font_size {
            None => DEFAULT_FONT_SIZE,
            Some(v) => u32::try_from(v)
                .ok()
                .filter(|&v| v > 0)
                .ok_or(ParamError::FontSizeNotPositive(v))?,
        };

        let dot_radius = match args.dot_radius {
            None => DEFAULT_DOT_RADIUS,
            Some(v) => u32::try_from(v)
                .ok()
                .filter(|&v| v > 0)
                .ok_or(ParamError::DotRadiusNotPositive(v))?,
        };

        let background = resolve_color(args.color.as_ref(), "color", DEFAULT_BACKGROUND)?;
        let defaults = Palette::default();
        let palette = Palette {
            normal: resolve_color(args.dot_color.as_ref(), "dot color", defaults.normal)?,
            warning: resolve_color(
                args.warning_color.as_ref(),
                "warning color",
                defaults.warning,
            )?,
        };

        let output_path = args
            .result_path
            .clone()
            .unwrap_or_else(|| default_output_path(duration));
        let font = args
            .font
            .clone()
            .map(FontSource::File)
            .unwrap_or_default();

        Ok(Self {
            duration,
            warning,
            output_path,
            canvas,
            font_size,
            dot_radius,
            background,
            palette,
            font,
        })
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Warning threshold, or `None` when no warning is configured.
    pub fn warning(&self) -> Option<u32> {
        self.warning
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    /// Radius of each dot disc, in pixels.
    pub fn dot_radius(&self) -> u32 {
        self.dot_radius
    }

    pub fn background(&self) -> Rgba8 {
        self.background
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn font(&self) -> &FontSource {
        &self.font
    }

    /// Redirect the artifact. Does not affect any validated invariant.
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Check a single-frame preview request against this timer's countdown range.
    pub fn check_tick(&self, tick: i64) -> Result<Tick, ParamError> {
        u32::try_from(tick)
            .ok()
            .filter(|&t| t <= self.duration)
            .map(Tick)
            .ok_or(ParamError::TickOutOfRange {
                tick,
                duration: self.duration,
            })
    }
}

/// `timer<duration>.gif` in the working directory.
pub fn default_output_path(duration: u32) -> PathBuf {
    PathBuf::from(format!("timer{duration}.gif"))
}

fn resolve_color(
    spec: Option<&ColorSpec>,
    field: &'static str,
    default: Rgba8,
) -> Result<Rgba8, ParamError> {
    spec.map_or(Ok(default), |s| s.resolve(field))
}

#[cfg(test)]
#[path = "../../tests/unit/params/resolve.rs"]
mod tests;
