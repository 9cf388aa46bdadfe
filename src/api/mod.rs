mod config;
mod content;
mod host;
mod label;
mod render_cache;
mod selector;

pub use config::{
    DARK_PALETTE, LIGHT_PALETTE, MinimapConfig, MinimapPalette, ThemeKind, apply_theme,
};
pub use content::{ContentContext, LineContent, MinimapContent, StackMode, StackedContent};
pub use host::{ColumnId, DrawerBorders, DrawerId, MinimapColumn, MinimapHost, SeriesDrawer};
pub use label::{DateLabelFormatter, format_range_label};
pub use render_cache::{RenderCache, RenderCacheStats};
pub use selector::RangeSelector;
