use kurbo::{Affine, Shape};

use crate::foundation::core::{Canvas, PixelPoint, Rgba8, Tick};
use crate::foundation::error::{TimerError, TimerResult};
use crate::params::resolve::TimerParams;
use crate::render::frame::FrameRGBA;
use crate::render::plan::{FramePlan, plan_frame};
use crate::render::text::{InkBounds, NumeralFont, TextBrushRgba8, TextLayoutEngine};

/// Flattening tolerance for dot discs, in pixels.
const DISC_TOLERANCE: f64 = 0.1;

/// CPU renderer for countdown frames powered by `vello_cpu`.
///
/// One instance renders any number of ticks of a single timer. Render contexts are reused
/// between calls, so keep one renderer per thread.
pub struct CpuFrameRenderer {
    params: TimerParams,
    font: NumeralFont,
    text_engine: TextLayoutEngine,
    ctx: Option<vello_cpu::RenderContext>,
    scratch: Option<vello_cpu::RenderContext>,
}

impl CpuFrameRenderer {
    pub fn new(params: &TimerParams, font: &NumeralFont) -> Self {
        Self {
            params: params.clone(),
            font: font.clone(),
            text_engine: TextLayoutEngine::new(),
            ctx: None,
            scratch: None,
        }
    }

    pub fn params(&self) -> &TimerParams {
        &self.params
    }

    /// Render the complete frame for `tick`: background, `tick` dots, centered numeral.
    pub fn render_tick(&mut self, tick: Tick) -> TimerResult<FrameRGBA> {
        let plan = plan_frame(&self.params, tick);
        self.render_plan(&plan)
    }

    pub fn render_plan(&mut self, plan: &FramePlan) -> TimerResult<FrameRGBA> {
        let canvas = self.params.canvas();
        let (width, height) = surface_dims(canvas)?;
        let palette = self.params.palette();

        let numeral_color = plan.numeral.tone.color(palette);
        let layout = self.text_engine.layout_line(
            &plan.numeral.text,
            &self.font,
            self.params.font_size() as f32,
            numeral_color.into(),
        )?;
        let ink = self.measure_layout(&layout, &plan.numeral.text)?;
        let origin = ink.centered_origin(canvas);

        let background = self.params.background();
        let dot_radius = f64::from(self.params.dot_radius());

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        if background.a != 0 {
            ctx.set_paint(paint(background));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(width),
                f64::from(height),
            ));
        }

        for dot in &plan.dots {
            ctx.set_paint(paint(dot.tone.color(palette)));
            ctx.fill_path(&bezpath_to_cpu(&disc_path(dot.center, dot_radius)));
        }

        ctx.set_transform(affine_to_cpu(Affine::translate((
            f64::from(origin.x),
            f64::from(origin.y),
        ))));
        fill_layout(&mut ctx, &layout, &self.font, None);

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);

        tracing::trace!(tick = plan.tick.0, dots = plan.dots.len(), "rendered frame");
        Ok(FrameRGBA {
            tick: plan.tick,
            width: canvas.width,
            height: canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
        })
    }

    /// Ink box of `text` at the configured font size, relative to the text origin.
    pub fn measure_numeral(&mut self, text: &str) -> TimerResult<InkBounds> {
        let layout = self.text_engine.layout_line(
            text,
            &self.font,
            self.params.font_size() as f32,
            Rgba8::BLACK.into(),
        )?;
        self.measure_layout(&layout, text)
    }

    /// Rasterize `layout` opaquely into a padded scratch surface and scan its alpha.
    fn measure_layout(
        &mut self,
        layout: &parley::Layout<TextBrushRgba8>,
        text: &str,
    ) -> TimerResult<InkBounds> {
        let pad = self.params.font_size();
        let too_large = || {
            TimerError::render(format!(
                "numeral '{text}' at font size {pad} does not fit a 16-bit surface"
            ))
        };
        let span = |extent: f32| -> Option<u16> {
            let px = u64::from(extent.max(0.0).ceil() as u32) + 2 * u64::from(pad);
            u16::try_from(px).ok()
        };
        let (w, h) = span(layout.width())
            .zip(span(layout.height()))
            .ok_or_else(too_large)?;
        let offset = i32::try_from(pad).map_err(|_| too_large())?;

        let mut ctx = match self.scratch.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(affine_to_cpu(Affine::translate((
            f64::from(offset),
            f64::from(offset),
        ))));
        fill_layout(&mut ctx, layout, &self.font, Some(Rgba8::BLACK));

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        self.scratch = Some(ctx);

        InkBounds::scan(
            pixmap.data_as_u8_slice(),
            u32::from(w),
            PixelPoint::new(offset, offset),
        )
        .ok_or_else(|| TimerError::render(format!("font produced no ink for numeral '{text}'")))
    }
}

fn surface_dims(canvas: Canvas) -> TimerResult<(u16, u16)> {
    canvas.as_u16().ok_or_else(|| {
        TimerError::render(format!(
            "canvas {}x{} exceeds the 16-bit surface limit",
            canvas.width, canvas.height
        ))
    })
}

/// Filled disc centered on the middle of pixel `center`.
fn disc_path(center: PixelPoint, radius: f64) -> kurbo::BezPath {
    kurbo::Circle::new(
        (f64::from(center.x) + 0.5, f64::from(center.y) + 0.5),
        radius,
    )
    .to_path(DISC_TOLERANCE)
}

/// Draw every glyph run of `layout` at the current transform. `paint_override` replaces the
/// brush color of each run.
fn fill_layout(
    ctx: &mut vello_cpu::RenderContext,
    layout: &parley::Layout<TextBrushRgba8>,
    font: &NumeralFont,
    paint_override: Option<Rgba8>,
) {
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            let color = paint_override.unwrap_or(Rgba8::new(brush.r, brush.g, brush.b, brush.a));
            ctx.set_paint(paint(color));
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(font.data())
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
}

fn paint(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
