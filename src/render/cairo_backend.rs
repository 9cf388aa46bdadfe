use cairo::{Context, Format, ImageSurface, Operator};
use std::f64::consts::{FRAC_PI_2, PI};
use std::io::Write;

use crate::error::{MinimapError, MinimapResult};
use crate::render::{Color, DrawingSurface, LinePrimitive, PolylinePrimitive, RectPrimitive};

/// Cairo image-surface backend.
///
/// Serves both as the visible surface (hosts blit `image_surface()` into
/// their widget) and as the offscreen minimap cache.
#[derive(Debug)]
pub struct CairoSurface {
    surface: ImageSurface,
    context: Context,
}

impl CairoSurface {
    pub fn new(width: i32, height: i32) -> MinimapResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(MinimapError::InvalidViewport {
                width: width.max(0) as u32,
                height: height.max(0) as u32,
            });
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        Ok(Self { surface, context })
    }

    #[must_use]
    pub fn image_surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn write_png<W: Write>(&self, writer: &mut W) -> MinimapResult<()> {
        self.surface.flush();
        self.surface
            .write_to_png(writer)
            .map_err(|err| MinimapError::Backend(format!("failed to encode png: {err}")))
    }
}

impl DrawingSurface for CairoSurface {
    fn width(&self) -> f64 {
        f64::from(self.surface.width())
    }

    fn height(&self) -> f64 {
        f64::from(self.surface.height())
    }

    fn create_offscreen(&self, width: f64, height: f64) -> MinimapResult<Self> {
        Self::new(pixel_size(width), pixel_size(height))
    }

    fn resize(&mut self, width: f64, height: f64) -> MinimapResult<()> {
        *self = Self::new(pixel_size(width), pixel_size(height))?;
        Ok(())
    }

    fn clear(&mut self) -> MinimapResult<()> {
        self.context
            .save()
            .map_err(|err| map_backend_error("failed to save before clear", err))?;
        self.context.reset_clip();
        self.context.set_operator(Operator::Clear);
        let painted = self.context.paint();
        self.context
            .restore()
            .map_err(|err| map_backend_error("failed to restore after clear", err))?;
        painted.map_err(|err| map_backend_error("failed to clear surface", err))
    }

    fn save(&mut self) -> MinimapResult<()> {
        self.context
            .save()
            .map_err(|err| map_backend_error("failed to save state", err))
    }

    fn restore(&mut self) -> MinimapResult<()> {
        self.context
            .restore()
            .map_err(|err| map_backend_error("failed to restore state", err))
    }

    fn set_rounded_clip(&mut self, rect: RectPrimitive) -> MinimapResult<()> {
        rect.validate()?;
        append_rect_path(&self.context, rect);
        self.context.clip();
        Ok(())
    }

    fn fill_rect(&mut self, rect: RectPrimitive) -> MinimapResult<()> {
        rect.validate()?;
        append_rect_path(&self.context, rect);
        apply_color(&self.context, rect.fill_color);
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))
    }

    fn stroke_line(&mut self, line: LinePrimitive) -> MinimapResult<()> {
        line.validate()?;
        apply_color(&self.context, line.color);
        self.context.set_line_width(line.stroke_width);
        self.context.move_to(line.x1, line.y1);
        self.context.line_to(line.x2, line.y2);
        self.context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke line", err))
    }

    fn stroke_polyline(&mut self, polyline: &PolylinePrimitive) -> MinimapResult<()> {
        polyline.validate()?;
        apply_color(&self.context, polyline.color);
        self.context.set_line_width(polyline.stroke_width);
        let mut points = polyline.points.iter();
        if let Some((x, y)) = points.next() {
            self.context.move_to(*x, *y);
        }
        for (x, y) in points {
            self.context.line_to(*x, *y);
        }
        self.context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke polyline", err))
    }

    fn draw_surface(&mut self, source: &Self, x: f64, y: f64) -> MinimapResult<()> {
        source.surface.flush();
        self.context
            .set_source_surface(&source.surface, x, y)
            .map_err(|err| map_backend_error("failed to set source surface", err))?;
        self.context
            .paint()
            .map_err(|err| map_backend_error("failed to composite surface", err))
    }
}

fn pixel_size(value: f64) -> i32 {
    if value.is_finite() {
        value.round().clamp(1.0, f64::from(i32::MAX)) as i32
    } else {
        1
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn append_rect_path(context: &Context, rect: RectPrimitive) {
    if rect.corner_radius <= 0.0 {
        context.rectangle(rect.x, rect.y, rect.width, rect.height);
        return;
    }

    let radius = rect
        .corner_radius
        .min(rect.width * 0.5)
        .min(rect.height * 0.5);
    let left = rect.x;
    let top = rect.y;
    let right = rect.x + rect.width;
    let bottom = rect.y + rect.height;

    context.new_sub_path();
    context.arc(right - radius, top + radius, radius, -FRAC_PI_2, 0.0);
    context.arc(right - radius, bottom - radius, radius, 0.0, FRAC_PI_2);
    context.arc(left + radius, bottom - radius, radius, FRAC_PI_2, PI);
    context.arc(left + radius, top + radius, radius, PI, PI + FRAC_PI_2);
    context.close_path();
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> MinimapError {
    MinimapError::Backend(format!("{prefix}: {err}"))
}
