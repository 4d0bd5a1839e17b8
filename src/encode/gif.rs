use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::sink::{CountdownOrder, FrameSink, SinkConfig};
use crate::foundation::core::Tick;
use crate::foundation::error::{TimerError, TimerResult};
use crate::render::frame::FrameRGBA;

/// Display time of each countdown frame.
pub const DEFAULT_FRAME_DELAY_MS: u32 = 1000;
/// NeuQuant speed used when a frame has more than 256 colors (1 = best, 30 = fastest).
pub const DEFAULT_QUANTIZE_SPEED: i32 = 10;

/// Frame disposal directive written into each graphic control extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposal {
    /// Restore to background: every frame fully replaces the previous one.
    Background,
    /// No directive; decoders pick their default.
    Unspecified,
}

impl Disposal {
    fn method(self) -> ::gif::DisposalMethod {
        match self {
            Disposal::Background => ::gif::DisposalMethod::Background,
            Disposal::Unspecified => ::gif::DisposalMethod::Any,
        }
    }
}

/// Options for [`GifSink`].
#[derive(Clone, Debug)]
pub struct GifSinkOpts {
    /// Final artifact location. Parent directories are created on demand.
    pub out_path: PathBuf,
    pub quantize_speed: i32,
    /// Preferred disposal. A format rejection falls back to [`Disposal::Unspecified`].
    pub disposal: Disposal,
}

impl Default for GifSinkOpts {
    fn default() -> Self {
        Self {
            out_path: PathBuf::from("timer.gif"),
            quantize_speed: DEFAULT_QUANTIZE_SPEED,
            disposal: Disposal::Background,
        }
    }
}

impl GifSinkOpts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            ..Self::default()
        }
    }

    pub fn with_quantize_speed(mut self, speed: i32) -> Self {
        self.quantize_speed = speed;
        self
    }

    pub fn with_disposal(mut self, disposal: Disposal) -> Self {
        self.disposal = disposal;
        self
    }
}

/// Sink that assembles pushed frames into one infinitely looping animated GIF.
///
/// Frames are palettized and LZW-compressed as they arrive. The file is only created in
/// [`FrameSink::end`], through a sibling `.partial` file renamed into place.
pub struct GifSink {
    opts: GifSinkOpts,
    order: CountdownOrder,
    frames: Vec<::gif::Frame<'static>>,
    bytes_written: u64,
    disposal_fallback: bool,
}

impl GifSink {
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            order: CountdownOrder::default(),
            frames: Vec::new(),
            bytes_written: 0,
            disposal_fallback: false,
        }
    }

    pub fn out_path(&self) -> &Path {
        &self.opts.out_path
    }

    /// Size of the artifact written by the last successful `end`.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// `true` if the last `end` had to drop the preferred disposal directive.
    pub fn disposal_fallback(&self) -> bool {
        self.disposal_fallback
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> TimerResult<()> {
        screen_dims(&cfg)?;
        delay_centis(&cfg)?;
        if !(1..=30).contains(&self.opts.quantize_speed) {
            return Err(TimerError::encode(format!(
                "gif quantize speed must be within 1..=30, got {}",
                self.opts.quantize_speed
            )));
        }
        self.order.begin(cfg);
        self.frames = Vec::with_capacity(cfg.frames_total.min(1024) as usize);
        self.bytes_written = 0;
        self.disposal_fallback = false;
        Ok(())
    }

    fn push_frame(&mut self, tick: Tick, frame: &FrameRGBA) -> TimerResult<()> {
        let cfg = self.order.accept(tick, frame)?;
        let (w, h) = screen_dims(&cfg)?;

        let mut rgba = frame.to_straight_rgba8();
        let mut out = ::gif::Frame::from_rgba_speed(w, h, &mut rgba, self.opts.quantize_speed);
        out.delay = delay_centis(&cfg)?;
        out.make_lzw_pre_encoded();
        tracing::debug!(tick = tick.0, bytes = out.buffer.len(), "queued gif frame");
        self.frames.push(out);
        Ok(())
    }

    fn end(&mut self) -> TimerResult<()> {
        let cfg = self.order.finish()?;
        let (w, h) = screen_dims(&cfg)?;

        let frames = &mut self.frames;
        let (bytes, fell_back) = encode_with_fallback(self.opts.disposal, |disposal| {
            encode_frames(w, h, frames.as_mut_slice(), disposal)
        })?;
        write_atomically(&self.opts.out_path, &bytes)?;

        self.frames.clear();
        self.bytes_written = bytes.len() as u64;
        self.disposal_fallback = fell_back;
        tracing::info!(
            path = %self.opts.out_path.display(),
            frames = cfg.frames_total,
            bytes = bytes.len(),
            "wrote gif"
        );
        Ok(())
    }
}

fn screen_dims(cfg: &SinkConfig) -> TimerResult<(u16, u16)> {
    let w = u16::try_from(cfg.width).ok().filter(|&v| v > 0);
    let h = u16::try_from(cfg.height).ok().filter(|&v| v > 0);
    w.zip(h).ok_or_else(|| {
        TimerError::encode(format!(
            "gif screen must be 1..=65535 on each side, got {}x{}",
            cfg.width, cfg.height
        ))
    })
}

fn delay_centis(cfg: &SinkConfig) -> TimerResult<u16> {
    u16::try_from(cfg.frame_delay_ms / 10).map_err(|_| {
        TimerError::encode(format!(
            "frame delay {}ms exceeds the gif limit",
            cfg.frame_delay_ms
        ))
    })
}

/// Write every queued frame with `disposal` into a complete GIF stream.
fn encode_frames(
    width: u16,
    height: u16,
    frames: &mut [::gif::Frame<'static>],
    disposal: Disposal,
) -> Result<Vec<u8>, ::gif::EncodingError> {
    let mut enc = ::gif::Encoder::new(Vec::new(), width, height, &[])?;
    enc.set_repeat(::gif::Repeat::Infinite)?;
    for frame in frames.iter_mut() {
        frame.dispose = disposal.method();
        enc.write_lzw_pre_encoded_frame(frame)?;
    }
    Ok(enc.into_inner()?)
}

/// Run `attempt` with `preferred`; on a format rejection retry once without a disposal
/// directive. Returns the result and whether the fallback was used.
pub(crate) fn encode_with_fallback<T>(
    preferred: Disposal,
    mut attempt: impl FnMut(Disposal) -> Result<T, ::gif::EncodingError>,
) -> TimerResult<(T, bool)> {
    match attempt(preferred) {
        Ok(v) => Ok((v, false)),
        Err(::gif::EncodingError::Format(e)) if preferred != Disposal::Unspecified => {
            tracing::warn!(error = %e, ?preferred, "encoder rejected disposal; retrying without it");
            attempt(Disposal::Unspecified)
                .map(|v| (v, true))
                .map_err(|e| TimerError::encode(format!("gif encoding failed: {e}")))
        }
        Err(e) => Err(TimerError::encode(format!("gif encoding failed: {e}"))),
    }
}

/// Create `path`'s parent directory if needed.
pub fn ensure_parent_dir(path: &Path) -> TimerResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Write `bytes` to a sibling `.partial` file, then rename it onto `path`.
pub(crate) fn write_atomically(path: &Path, bytes: &[u8]) -> TimerResult<()> {
    let mut name: OsString = path
        .file_name()
        .ok_or_else(|| {
            TimerError::encode(format!("output path '{}' has no file name", path.display()))
        })?
        .to_owned();
    name.push(".partial");
    let tmp = path.with_file_name(name);

    ensure_parent_dir(path)?;
    let mut guard = TempFileGuard(Some(tmp.clone()));
    std::fs::write(&tmp, bytes)
        .with_context(|| format!("failed to write '{}'", tmp.display()))?;
    std::fs::rename(&tmp, path).with_context(|| {
        format!(
            "failed to move '{}' to '{}'",
            tmp.display(),
            path.display()
        )
    })?;
    guard.0 = None;
    Ok(())
}

struct TempFileGuard(Option<PathBuf>);

impl Drop for TempFileGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
