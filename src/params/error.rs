/// Which input precondition failed.
///
/// Produced only by parsing and [`TimerParams::resolve`](crate::TimerParams::resolve). The
/// messages are short enough to print as a single line without any cause chain.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    #[error("duration is required")]
    MissingDuration,

    #[error("duration must be between 1 and 999 inclusive (got {0})")]
    DurationOutOfRange(i64),

    #[error("warning must be between 1 and duration - 1 inclusive (got {warning}, duration {duration})")]
    WarningOutOfRange { warning: i64, duration: u32 },

    #[error("size must be exactly two comma-separated integers (got '{0}')")]
    MalformedSize(String),

    #[error("size must be between 1 and 65535 in both dimensions (got {width}x{height})")]
    SizeOutOfRange { width: i64, height: i64 },

    #[error("font size must be positive (got {0})")]
    FontSizeNotPositive(i64),

    #[error("dot radius must be positive (got {0})")]
    DotRadiusNotPositive(i64),

    #[error("{field} must be a color name, #hex, or exactly four comma-separated integers (got '{value}')")]
    MalformedColor { field: &'static str, value: String },

    #[error("{field}: unknown color name '{name}'")]
    UnknownColorName { field: &'static str, name: String },

    #[error("{field}: all color channels must be integers between 0 and 255 inclusive (got {channels:?})")]
    ChannelOutOfRange { field: &'static str, channels: [i64; 4] },

    #[error("preview tick must be between 0 and duration inclusive (got {tick}, duration {duration})")]
    TickOutOfRange { tick: i64, duration: u32 },

    #[error("config: {0}")]
    Config(String),
}
