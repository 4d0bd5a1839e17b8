use std::sync::Arc;

use anyhow::Context;

use crate::foundation::core::{Canvas, PixelPoint, Rgba8};
use crate::foundation::error::{TimerError, TimerResult};
use crate::params::resolve::FontSource;

/// DejaVu Sans, used when no font file is configured.
pub const BUILTIN_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Font used for the numeral, loaded and checked once per run.
///
/// Cloning shares the underlying bytes.
#[derive(Clone)]
pub struct NumeralFont {
    bytes: Arc<Vec<u8>>,
    data: vello_cpu::peniko::FontData,
}

impl NumeralFont {
    pub fn builtin() -> TimerResult<Self> {
        Self::from_bytes(BUILTIN_FONT.to_vec())
    }

    /// Validate raw TrueType/OpenType bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> TimerResult<Self> {
        let mut probe = parley::FontContext::default();
        let families = probe
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        if families.is_empty() {
            return Err(TimerError::render(
                "no font families registered from font bytes",
            ));
        }
        let data = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes.clone()), 0);
        Ok(Self {
            bytes: Arc::new(bytes),
            data,
        })
    }

    pub fn load(source: &FontSource) -> TimerResult<Self> {
        match source {
            FontSource::Builtin => Self::builtin(),
            FontSource::File(path) => {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("failed to read font '{}'", path.display()))?;
                Self::from_bytes(bytes)
            }
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn data(&self) -> &vello_cpu::peniko::FontData {
        &self.data
    }
}

/// Stateful helper for building Parley layouts of the numeral.
///
/// The font is registered on first use and reused for every later tick.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: Option<String>,
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            family_name: None,
        }
    }

    fn family_for(&mut self, font: &NumeralFont) -> TimerResult<String> {
        if let Some(name) = &self.family_name {
            return Ok(name.clone());
        }
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes().to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| TimerError::render("no font families registered from font bytes"))?;
        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| TimerError::render("registered font family has no name"))?
            .to_string();
        self.family_name = Some(name.clone());
        Ok(name)
    }

    /// Shape a single unwrapped line of text.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        font: &NumeralFont,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> TimerResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(TimerError::render("font size must be finite and > 0"));
        }
        let family_name = self.family_for(font)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Tight box of painted glyph pixels, relative to the text origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InkBounds {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

impl InkBounds {
    /// Smallest box covering every pixel in `pixels` (row-major premultiplied RGBA8) whose
    /// alpha is non-zero, shifted by `-offset`. `None` if nothing is painted.
    pub fn scan(pixels: &[u8], width: u32, offset: PixelPoint) -> Option<Self> {
        if width == 0 {
            return None;
        }
        let mut min = (u32::MAX, u32::MAX);
        let mut max = (0u32, 0u32);
        let mut any = false;
        for (i, px) in pixels.chunks_exact(4).enumerate() {
            if px[3] == 0 {
                continue;
            }
            let x = (i as u32) % width;
            let y = (i as u32) / width;
            min = (min.0.min(x), min.1.min(y));
            max = (max.0.max(x), max.1.max(y));
            any = true;
        }
        any.then(|| Self {
            left: min.0 as i32 - offset.x,
            top: min.1 as i32 - offset.y,
            width: max.0 - min.0 + 1,
            height: max.1 - min.1 + 1,
        })
    }

    /// Text origin that centers this ink box on `canvas`, using floor division.
    pub fn centered_origin(self, canvas: Canvas) -> PixelPoint {
        let free_x = i64::from(canvas.width) - i64::from(self.width);
        let free_y = i64::from(canvas.height) - i64::from(self.height);
        PixelPoint {
            x: (free_x.div_euclid(2) - i64::from(self.left)) as i32,
            y: (free_y.div_euclid(2) - i64::from(self.top)) as i32,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
