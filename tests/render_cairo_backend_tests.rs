#![cfg(feature = "cairo-backend")]

mod support;

use std::rc::Rc;

use chart_minimap::MinimapError;
use chart_minimap::api::{LineContent, MinimapConfig, RangeSelector};
use chart_minimap::core::{ManualClock, NormalizedRange};
use chart_minimap::render::{CairoSurface, DrawingSurface};

use support::{MINIMAP_HEIGHT, populated_host};

#[test]
fn cairo_surface_rejects_invalid_size() {
    let err = CairoSurface::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, MinimapError::InvalidViewport { .. }));
}

#[test]
fn cairo_surface_balances_save_and_restore() {
    let mut surface = CairoSurface::new(40, 40).expect("surface");
    surface.save().expect("save");
    surface.restore().expect("restore");
}

#[test]
fn selector_draws_on_cairo_surface() {
    let mut surface = CairoSurface::new(600, 320).expect("surface");
    let clock = Rc::new(ManualClock::new(0.0));
    let mut selector = RangeSelector::new(
        MinimapConfig::default().with_height(MINIMAP_HEIGHT),
        &surface,
        LineContent::default(),
        clock,
    )
    .expect("selector init");

    let mut host = populated_host();
    for (id, _) in &host.columns {
        selector.add_column(*id);
    }
    for (id, _) in &host.drawers {
        selector.add_drawer(*id);
    }
    selector
        .set_range(&mut host, NormalizedRange::new(0.25, 0.75).expect("range"))
        .expect("assign range");

    selector.draw(&mut host, &mut surface).expect("draw");
    selector.draw(&mut host, &mut surface).expect("cached draw");
    assert_eq!(selector.cache_stats().misses, 1);
    assert_eq!(selector.cache().surface().width(), 600.0);

    let mut png = Vec::new();
    surface.write_png(&mut png).expect("encode png");
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn resize_recreates_backing_surface() {
    let mut surface = CairoSurface::new(100, 50).expect("surface");
    surface.resize(250.0, 80.0).expect("resize");
    assert_eq!(surface.width(), 250.0);
    assert_eq!(surface.height(), 80.0);
}
