//! chart-minimap: interactive range-selector strip for time-series charts.
//!
//! The minimap draws a compact overview of the full data range beneath a
//! chart, with a draggable and resizable window that controls what the main
//! chart displays. Drawing goes through the `render::DrawingSurface` seam;
//! columns, drawers and redraw scheduling belong to the host chart
//! (`api::MinimapHost`).

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{MinimapConfig, RangeSelector};
pub use error::{MinimapError, MinimapResult};
