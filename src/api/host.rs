use serde::{Deserialize, Serialize};

use crate::core::{Animation, DataPoint};
use crate::render::Color;

use super::DateLabelFormatter;

/// Handle of a column registered in the host chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnId(u32);

impl ColumnId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Handle of a series drawer owned by the host chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrawerId(u32);

impl DrawerId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// One data series as seen by the minimap.
pub trait MinimapColumn {
    /// Visibility tween; an unfinished one forces the minimap cache to refresh.
    fn opacity(&self) -> Animation;
    fn color(&self) -> Color;
    fn points(&self) -> &[DataPoint];
    /// Receives the data-space window the main chart should display.
    fn set_current_range(&mut self, from: f64, to: f64);
    /// Sets or clears the highlighted x position (crosshair marker).
    fn set_current_x(&mut self, x: Option<f64>);
}

/// Animated data-space bounding box of plotted content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawerBorders {
    pub min_x: Animation,
    pub max_x: Animation,
    pub min_y: Animation,
    pub max_y: Animation,
}

impl DrawerBorders {
    /// Borders resting at fixed values.
    #[must_use]
    pub fn fixed(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x: Animation::fixed(min_x),
            max_x: Animation::fixed(max_x),
            min_y: Animation::fixed(min_y),
            max_y: Animation::fixed(max_y),
        }
    }
}

pub trait SeriesDrawer {
    fn borders(&self) -> DrawerBorders;
    fn recalc_borders(&mut self, duration_ms: f64);
    fn remove_column(&mut self, id: ColumnId);
}

/// The chart that owns columns, drawers and the canvas.
///
/// Columns and drawers live in host registries; the minimap only keeps their
/// ids and looks them up per operation.
pub trait MinimapHost {
    fn column(&self, id: ColumnId) -> Option<&dyn MinimapColumn>;
    fn column_mut(&mut self, id: ColumnId) -> Option<&mut dyn MinimapColumn>;
    fn drawer(&self, id: DrawerId) -> Option<&dyn SeriesDrawer>;
    fn drawer_mut(&mut self, id: DrawerId) -> Option<&mut dyn SeriesDrawer>;

    /// Shows the human-readable label of the selected period.
    fn set_range_text(&mut self, text: String);

    fn date_string(&self, value: f64) -> String {
        DateLabelFormatter::default().format(value)
    }

    /// Schedules another frame.
    fn request_redraw(&mut self);

    /// Re-fits the main display to the new column ranges.
    fn recalc_display_borders(&mut self, duration_ms: f64);
}
