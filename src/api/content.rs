use serde::{Deserialize, Serialize};

use crate::core::DataPoint;
use crate::error::MinimapResult;
use crate::render::{DrawingSurface, PolylinePrimitive, RectPrimitive};

use super::{ColumnId, DrawerBorders, MinimapHost};

/// Read-only inputs handed to a content renderer on a cache miss.
pub struct ContentContext<'a> {
    pub host: &'a dyn MinimapHost,
    /// Registered columns in registration order.
    pub columns: &'a [ColumnId],
    /// Borders of the first registered drawer, if any.
    pub borders: Option<DrawerBorders>,
    pub now_ms: f64,
}

impl ContentContext<'_> {
    /// Projects a data-space point into a `width` x `height` cache using the
    /// current (interpolated) borders. `None` when borders are missing or
    /// degenerate.
    #[must_use]
    pub fn project(&self, point: DataPoint, width: f64, height: f64) -> Option<(f64, f64)> {
        let (min_x, max_x, min_y, max_y) = self.border_values()?;
        let x = (point.x - min_x) / (max_x - min_x) * width;
        let y = height - (point.y - min_y) / (max_y - min_y) * height;
        (x.is_finite() && y.is_finite()).then_some((x, y))
    }

    fn border_values(&self) -> Option<(f64, f64, f64, f64)> {
        let borders = self.borders?;
        let values = (
            borders.min_x.value(self.now_ms),
            borders.max_x.value(self.now_ms),
            borders.min_y.value(self.now_ms),
            borders.max_y.value(self.now_ms),
        );
        let x_span = values.1 - values.0;
        let y_span = values.3 - values.2;
        (x_span.is_finite() && y_span.is_finite() && x_span != 0.0 && y_span != 0.0)
            .then_some(values)
    }
}

/// Paints the minimap's static content into the offscreen cache.
///
/// Only invoked when the cache is invalid, so implementations may be as
/// expensive as a full series pass.
pub trait MinimapContent<S: DrawingSurface> {
    fn render_content(&mut self, cache: &mut S, ctx: &ContentContext<'_>) -> MinimapResult<()>;

    /// Drops any per-column state kept for `id`.
    fn remove_column(&mut self, _id: ColumnId) {}
}

impl<S: DrawingSurface, T: MinimapContent<S> + ?Sized> MinimapContent<S> for Box<T> {
    fn render_content(&mut self, cache: &mut S, ctx: &ContentContext<'_>) -> MinimapResult<()> {
        (**self).render_content(cache, ctx)
    }

    fn remove_column(&mut self, id: ColumnId) {
        (**self).remove_column(id);
    }
}

/// One polyline per column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineContent {
    pub line_width: f64,
}

impl Default for LineContent {
    fn default() -> Self {
        Self { line_width: 1.0 }
    }
}

impl<S: DrawingSurface> MinimapContent<S> for LineContent {
    fn render_content(&mut self, cache: &mut S, ctx: &ContentContext<'_>) -> MinimapResult<()> {
        let (width, height) = (cache.width(), cache.height());
        for id in ctx.columns {
            let Some(column) = ctx.host.column(*id) else {
                continue;
            };
            let opacity = column.opacity().value(ctx.now_ms);
            if opacity <= 0.0 {
                continue;
            }
            let points: Vec<(f64, f64)> = column
                .points()
                .iter()
                .filter_map(|point| ctx.project(*point, width, height))
                .collect();
            if points.len() < 2 {
                continue;
            }
            cache.stroke_polyline(&PolylinePrimitive::new(
                points,
                self.line_width,
                column.color().with_alpha_scaled(opacity),
            ))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StackMode {
    /// Segments stack in data units from zero, projected with the drawer's
    /// vertical borders like `LineContent` points.
    #[default]
    Absolute,
    /// Every x slot is normalized to the full cache height.
    Percentage,
}

/// Stacked bars; columns are expected to share x samples index by index.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StackedContent {
    pub mode: StackMode,
}

impl StackedContent {
    #[must_use]
    pub fn new(mode: StackMode) -> Self {
        Self { mode }
    }
}

impl<S: DrawingSurface> MinimapContent<S> for StackedContent {
    fn render_content(&mut self, cache: &mut S, ctx: &ContentContext<'_>) -> MinimapResult<()> {
        let (width, height) = (cache.width(), cache.height());
        let Some((min_x, max_x, min_y, max_y)) = ctx.border_values() else {
            return Ok(());
        };

        let columns: Vec<_> = ctx
            .columns
            .iter()
            .filter_map(|id| ctx.host.column(*id))
            .map(|column| (column, column.opacity().value(ctx.now_ms).clamp(0.0, 1.0)))
            .filter(|(_, opacity)| *opacity > 0.0)
            .collect();
        let slots = columns
            .iter()
            .map(|(column, _)| column.points().len())
            .min()
            .unwrap_or(0);
        if slots == 0 {
            return Ok(());
        }

        let bar_width = width / slots as f64;
        let y_span = max_y - min_y;
        for slot in 0..slots {
            let x_value = columns[0].0.points()[slot].x;
            let x = (x_value - min_x) / (max_x - min_x) * width;
            if !x.is_finite() {
                continue;
            }
            let total: f64 = columns
                .iter()
                .map(|(column, opacity)| column.points()[slot].y.max(0.0) * opacity)
                .sum();
            // `baseline` is where a stack value of zero lands in the cache.
            let (scale, baseline) = match self.mode {
                StackMode::Absolute => (height / y_span, height + min_y * height / y_span),
                StackMode::Percentage if total > 0.0 => (height / total, height),
                StackMode::Percentage => continue,
            };

            let mut stacked = 0.0;
            for (column, opacity) in &columns {
                let value = column.points()[slot].y.max(0.0) * opacity * scale;
                if value <= 0.0 || !value.is_finite() {
                    continue;
                }
                let top = (baseline - stacked - value).clamp(0.0, height);
                let bottom = (baseline - stacked).clamp(0.0, height);
                stacked += value;
                if bottom <= top {
                    continue;
                }
                // Drawn opaque; opacity already shrinks the segment.
                cache.fill_rect(RectPrimitive::new(
                    x - bar_width * 0.5,
                    top,
                    bar_width,
                    bottom - top,
                    column.color(),
                ))?;
            }
        }
        Ok(())
    }
}
