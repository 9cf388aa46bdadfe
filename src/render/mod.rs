mod primitives;
mod recording;

pub use primitives::{Color, LinePrimitive, PolylinePrimitive, RectPrimitive};
pub use recording::{DrawCommand, RecordingSurface};

use crate::error::MinimapResult;

/// Contract implemented by any drawing backend the minimap paints on.
///
/// The same type serves as the visible surface and as the offscreen cache,
/// so compositing one into the other stays backend-native.
pub trait DrawingSurface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    /// Creates an offscreen surface of the same backend.
    fn create_offscreen(&self, width: f64, height: f64) -> MinimapResult<Self>
    where
        Self: Sized;

    fn resize(&mut self, width: f64, height: f64) -> MinimapResult<()>;
    fn clear(&mut self) -> MinimapResult<()>;
    fn save(&mut self) -> MinimapResult<()>;
    fn restore(&mut self) -> MinimapResult<()>;

    /// Intersects the current clip with a rounded rectangle.
    ///
    /// The rect's fill color is ignored.
    fn set_rounded_clip(&mut self, rect: RectPrimitive) -> MinimapResult<()>;
    fn fill_rect(&mut self, rect: RectPrimitive) -> MinimapResult<()>;
    fn stroke_line(&mut self, line: LinePrimitive) -> MinimapResult<()>;
    fn stroke_polyline(&mut self, polyline: &PolylinePrimitive) -> MinimapResult<()>;

    /// Composites `source` with its top-left corner at `(x, y)`.
    fn draw_surface(&mut self, source: &Self, x: f64, y: f64) -> MinimapResult<()>
    where
        Self: Sized;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::CairoSurface;
