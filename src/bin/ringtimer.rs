use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser;
use ringtimer::{
    ColorSpec, CountdownOpts, ParamError, SizeSpec, Tick, TimerArgs, TimerError, TimerParams,
};

#[derive(Parser, Debug)]
#[command(
    name = "ringtimer",
    version,
    about = "Render an animated countdown-ring GIF",
    allow_negative_numbers = true
)]
struct Cli {
    /// Countdown length in seconds (1-999). `-d` wins when both are given.
    #[arg(value_name = "DURATION")]
    duration_pos: Option<i64>,

    /// Countdown length in seconds (1-999).
    #[arg(short = 'd', long = "duration")]
    duration: Option<i64>,

    /// Seconds left at which dots and numeral switch to the warning color. -1 disables it.
    #[arg(short = 'w', long)]
    warning: Option<i64>,

    /// Output path. Defaults to `timer<DURATION>.gif`, or `timer<DURATION>_<TICK>.png` with
    /// `--frame`.
    #[arg(short = 'p', long = "result-path")]
    result_path: Option<PathBuf>,

    /// Canvas size as `W,H` or `(W,H)`.
    #[arg(short = 's', long)]
    size: Option<String>,

    /// Numeral font size in pixels.
    #[arg(short = 'f', long = "font-size")]
    font_size: Option<i64>,

    /// Radius of each dot in pixels.
    #[arg(short = 'r', long = "dot-radius")]
    dot_radius: Option<i64>,

    /// Background color: a name, `#hex`, or `R,G,B,A`.
    #[arg(short = 'c', long)]
    color: Option<String>,

    /// Color of dots and numeral outside the warning zone.
    #[arg(long = "dot-color")]
    dot_color: Option<String>,

    /// Color of dots and numeral inside the warning zone.
    #[arg(long = "warning-color")]
    warning_color: Option<String>,

    /// TrueType/OpenType font for the numeral (default: built-in DejaVu Sans).
    #[arg(long)]
    font: Option<PathBuf>,

    /// JSON file with defaults for any of the options above. Flags win over the file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Render only this tick and write it as a PNG.
    #[arg(long, value_name = "TICK")]
    frame: Option<i64>,

    /// Render frames in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match param_error(&err) {
            Some(p) => {
                eprintln!("error: {p}");
                ExitCode::from(2)
            }
            None => {
                eprintln!("error: {err:#}");
                ExitCode::FAILURE
            }
        },
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn param_error(err: &anyhow::Error) -> Option<&ParamError> {
    err.downcast_ref::<ParamError>().or_else(|| {
        err.downcast_ref::<TimerError>()
            .and_then(TimerError::as_params)
    })
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let params = resolve_params(&cli)?;

    if let Some(tick) = cli.frame {
        let tick = params.check_tick(tick)?;
        let out = cli
            .result_path
            .clone()
            .unwrap_or_else(|| preview_path(&params, tick));
        return cmd_frame(&params, tick, out);
    }

    let opts = CountdownOpts::default()
        .with_parallel(cli.parallel)
        .with_threads(cli.threads);
    let stats = ringtimer::render_timer_gif(&params, &opts)?;

    eprintln!(
        "wrote {} ({} frames, {} bytes)",
        params.output_path().display(),
        stats.frames_total,
        stats.bytes_written
    );
    Ok(())
}

fn cmd_frame(params: &TimerParams, tick: Tick, out: PathBuf) -> anyhow::Result<()> {
    let frame = ringtimer::render_tick_frame(params, tick)?;
    ringtimer::encode::gif::ensure_parent_dir(&out)?;

    image::save_buffer_with_format(
        &out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

/// Layer the config file, the positional duration, and flags, then validate.
fn resolve_params(cli: &Cli) -> Result<TimerParams, ParamError> {
    let file = match &cli.config {
        Some(path) => TimerArgs::from_json_path(path)?,
        None => TimerArgs::default(),
    };
    let positional = TimerArgs {
        duration: cli.duration_pos,
        ..TimerArgs::default()
    };
    let flags = TimerArgs {
        duration: cli.duration,
        warning: cli.warning,
        result_path: cli.result_path.clone(),
        size: cli.size.as_deref().map(SizeSpec::parse).transpose()?,
        font_size: cli.font_size,
        dot_radius: cli.dot_radius,
        color: parse_color("color", cli.color.as_deref())?,
        dot_color: parse_color("dot color", cli.dot_color.as_deref())?,
        warning_color: parse_color("warning color", cli.warning_color.as_deref())?,
        font: cli.font.clone(),
    };
    file.merged_with(positional).merged_with(flags).resolve()
}

fn parse_color(field: &'static str, raw: Option<&str>) -> Result<Option<ColorSpec>, ParamError> {
    raw.map(|s| ColorSpec::parse(field, s)).transpose()
}

fn preview_path(params: &TimerParams, tick: Tick) -> PathBuf {
    PathBuf::from(format!("timer{}_{tick}.png", params.duration()))
}
