use rayon::prelude::*;

use crate::encode::gif::{DEFAULT_FRAME_DELAY_MS, GifSink, GifSinkOpts};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Tick, countdown};
use crate::foundation::error::{TimerError, TimerResult};
use crate::params::resolve::TimerParams;
use crate::render::cpu::CpuFrameRenderer;
use crate::render::frame::FrameRGBA;
use crate::render::text::NumeralFont;

/// Threading and chunking controls for countdown rendering.
#[derive(Clone, Debug)]
pub struct CountdownOpts {
    /// Render frames on a rayon pool when `true`.
    pub parallel: bool,
    /// Frames rendered per parallel batch before they are pushed to the sink.
    pub chunk_size: usize,
    /// Optional explicit worker thread count (parallel mode only).
    pub threads: Option<usize>,
}

impl Default for CountdownOpts {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

impl CountdownOpts {
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Aggregated counters for one run.
pub struct RenderStats {
    /// Frames pushed to the sink (`duration + 1`).
    pub frames_total: u64,
    /// Size of the written artifact; `0` for sinks that write nothing.
    pub bytes_written: u64,
    /// `true` if the encoder rejected background disposal and the fallback was used.
    pub disposal_fallback: bool,
}

/// Render every tick from `duration` down to `0` and push the frames into `sink`.
///
/// On error the sink never sees `end`. In parallel mode frames are rendered in chunks, each
/// worker owning its own renderer, and every chunk is pushed back in countdown order.
#[tracing::instrument(skip(params, sink), fields(duration = params.duration()))]
pub fn render_countdown(
    params: &TimerParams,
    opts: &CountdownOpts,
    sink: &mut dyn FrameSink,
) -> TimerResult<RenderStats> {
    let font = NumeralFont::load(params.font())?;
    let ticks = countdown(params.duration()).collect::<Vec<_>>();
    let canvas = params.canvas();
    let pool = if opts.parallel {
        Some(build_thread_pool(opts.threads)?)
    } else {
        None
    };

    sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
        frame_delay_ms: DEFAULT_FRAME_DELAY_MS,
        frames_total: ticks.len() as u32,
    })?;

    let mut stats = RenderStats::default();
    if let Some(pool) = &pool {
        for chunk in ticks.chunks(opts.chunk_size.max(1)) {
            for frame in render_parallel(params, &font, chunk, pool)? {
                sink.push_frame(frame.tick, &frame)?;
                stats.frames_total += 1;
            }
        }
    } else {
        let mut renderer = CpuFrameRenderer::new(params, &font);
        for &tick in &ticks {
            let frame = render_logged(&mut renderer, tick)?;
            sink.push_frame(tick, &frame)?;
            stats.frames_total += 1;
        }
    }

    sink.end()?;
    Ok(stats)
}

/// Render the countdown into the GIF at `params.output_path()`.
pub fn render_timer_gif(params: &TimerParams, opts: &CountdownOpts) -> TimerResult<RenderStats> {
    render_timer_gif_with(params, opts, GifSinkOpts::new(params.output_path()))
}

/// [`render_timer_gif`] with explicit sink options.
pub fn render_timer_gif_with(
    params: &TimerParams,
    opts: &CountdownOpts,
    sink_opts: GifSinkOpts,
) -> TimerResult<RenderStats> {
    let mut sink = GifSink::new(sink_opts);
    let stats = render_countdown(params, opts, &mut sink)?;
    let stats = RenderStats {
        bytes_written: sink.bytes_written(),
        disposal_fallback: sink.disposal_fallback(),
        ..stats
    };
    tracing::info!(
        path = %sink.out_path().display(),
        frames = stats.frames_total,
        bytes = stats.bytes_written,
        disposal_fallback = stats.disposal_fallback,
        "timer written"
    );
    Ok(stats)
}

/// Render a single tick, for previews.
pub fn render_tick_frame(params: &TimerParams, tick: Tick) -> TimerResult<FrameRGBA> {
    params.check_tick(i64::from(tick.0))?;
    let font = NumeralFont::load(params.font())?;
    CpuFrameRenderer::new(params, &font).render_tick(tick)
}

fn render_logged(renderer: &mut CpuFrameRenderer, tick: Tick) -> TimerResult<FrameRGBA> {
    let frame = renderer.render_tick(tick)?;
    tracing::debug!(tick = tick.0, "rendered tick");
    Ok(frame)
}

fn render_parallel(
    params: &TimerParams,
    font: &NumeralFont,
    ticks: &[Tick],
    pool: &rayon::ThreadPool,
) -> TimerResult<Vec<FrameRGBA>> {
    let rendered = pool.install(|| {
        ticks
            .par_iter()
            .map_init(
                || CpuFrameRenderer::new(params, font),
                |renderer, &tick| render_logged(renderer, tick),
            )
            .collect::<Vec<_>>()
    });

    let mut frames = Vec::with_capacity(rendered.len());
    for item in rendered {
        frames.push(item?);
    }
    Ok(frames)
}

fn build_thread_pool(threads: Option<usize>) -> TimerResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(TimerError::render(
            "countdown threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| TimerError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/countdown.rs"]
mod tests;
