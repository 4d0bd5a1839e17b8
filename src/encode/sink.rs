use crate::foundation::core::Tick;
use crate::foundation::error::{TimerError, TimerResult};
use crate::render::frame::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Display time of every frame.
    pub frame_delay_ms: u32,
    /// Number of frames that will be pushed (`duration + 1`).
    pub frames_total: u32,
}

/// Sink contract for consuming rendered frames in countdown order.
///
/// Ordering contract: `push_frame` is called with strictly decreasing ticks, ending at `0`.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> TimerResult<()>;
    /// Push one frame. `tick` must be lower than the previous one.
    fn push_frame(&mut self, tick: Tick, frame: &FrameRGBA) -> TimerResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> TimerResult<()>;
}

/// Bookkeeping shared by sinks that enforce the ordering contract.
#[derive(Debug, Default, Clone)]
pub(crate) struct CountdownOrder {
    cfg: Option<SinkConfig>,
    last: Option<Tick>,
    pushed: u32,
}

impl CountdownOrder {
    pub(crate) fn begin(&mut self, cfg: SinkConfig) {
        *self = Self {
            cfg: Some(cfg),
            last: None,
            pushed: 0,
        };
    }

    pub(crate) fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Check `tick`/`frame` against the contract and record it.
    pub(crate) fn accept(&mut self, tick: Tick, frame: &FrameRGBA) -> TimerResult<SinkConfig> {
        let cfg = self
            .cfg
            .ok_or_else(|| TimerError::encode("push_frame called before begin"))?;
        if let Some(prev) = self.last
            && tick >= prev
        {
            return Err(TimerError::encode(format!(
                "frames must arrive in countdown order: tick {tick} after {prev}"
            )));
        }
        if frame.tick != tick {
            return Err(TimerError::encode(format!(
                "frame for tick {} pushed as tick {tick}",
                frame.tick
            )));
        }
        if (frame.width, frame.height) != (cfg.width, cfg.height) {
            return Err(TimerError::encode(format!(
                "frame is {}x{}, sink expects {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        self.last = Some(tick);
        self.pushed += 1;
        Ok(cfg)
    }

    /// Verify the sequence is complete: every announced frame arrived and the last one was `0`.
    pub(crate) fn finish(&self) -> TimerResult<SinkConfig> {
        let cfg = self
            .cfg
            .ok_or_else(|| TimerError::encode("end called before begin"))?;
        if self.pushed != cfg.frames_total {
            return Err(TimerError::encode(format!(
                "expected {} frames, received {}",
                cfg.frames_total, self.pushed
            )));
        }
        if self.last != Some(Tick(0)) {
            return Err(TimerError::encode("countdown must end on tick 0"));
        }
        Ok(cfg)
    }
}

/// In-memory sink for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemorySink {
    order: CountdownOrder,
    /// Frames in countdown order.
    pub(crate) frames: Vec<FrameRGBA>,
    finished: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.order.config()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[FrameRGBA] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<FrameRGBA> {
        self.frames
    }

    /// `true` once `end` accepted a complete countdown.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> TimerResult<()> {
        self.order.begin(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, tick: Tick, frame: &FrameRGBA) -> TimerResult<()> {
        self.order.accept(tick, frame)?;
        self.frames.push(frame.clone());
        Ok(())
    }

    fn end(&mut self) -> TimerResult<()> {
        self.order.finish()?;
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
