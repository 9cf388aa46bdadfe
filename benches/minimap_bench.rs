use std::rc::Rc;

use chart_minimap::api::{
    ColumnId, DrawerBorders, DrawerId, LineContent, MinimapColumn, MinimapConfig, MinimapHost,
    RangeSelector, SeriesDrawer,
};
use chart_minimap::core::{Animation, DataPoint, ManualClock, NormalizedRange};
use chart_minimap::interaction::{DragMode, clamp_drag};
use chart_minimap::render::{Color, DrawingSurface, RecordingSurface};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

struct BenchColumn {
    points: Vec<DataPoint>,
}

impl MinimapColumn for BenchColumn {
    fn opacity(&self) -> Animation {
        Animation::fixed(1.0)
    }

    fn color(&self) -> Color {
        Color::rgb(0.2, 0.5, 0.9)
    }

    fn points(&self) -> &[DataPoint] {
        &self.points
    }

    fn set_current_range(&mut self, _from: f64, _to: f64) {}

    fn set_current_x(&mut self, _x: Option<f64>) {}
}

struct BenchDrawer;

impl SeriesDrawer for BenchDrawer {
    fn borders(&self) -> DrawerBorders {
        DrawerBorders::fixed(0.0, 10_000.0, 0.0, 200.0)
    }

    fn recalc_borders(&mut self, _duration_ms: f64) {}

    fn remove_column(&mut self, _id: ColumnId) {}
}

struct BenchHost {
    column: BenchColumn,
    drawer: BenchDrawer,
}

impl MinimapHost for BenchHost {
    fn column(&self, id: ColumnId) -> Option<&dyn MinimapColumn> {
        (id.raw() == 0).then_some(&self.column as &dyn MinimapColumn)
    }

    fn column_mut(&mut self, id: ColumnId) -> Option<&mut dyn MinimapColumn> {
        (id.raw() == 0).then_some(&mut self.column as &mut dyn MinimapColumn)
    }

    fn drawer(&self, id: DrawerId) -> Option<&dyn SeriesDrawer> {
        (id.raw() == 0).then_some(&self.drawer as &dyn SeriesDrawer)
    }

    fn drawer_mut(&mut self, id: DrawerId) -> Option<&mut dyn SeriesDrawer> {
        (id.raw() == 0).then_some(&mut self.drawer as &mut dyn SeriesDrawer)
    }

    fn set_range_text(&mut self, _text: String) {}

    fn request_redraw(&mut self) {}

    fn recalc_display_borders(&mut self, _duration_ms: f64) {}
}

fn bench_clamp_drag(c: &mut Criterion) {
    let anchor = NormalizedRange::new(0.3, 0.6).expect("valid range");

    c.bench_function("clamp_drag_all_modes", |b| {
        b.iter(|| {
            for mode in [DragMode::MoveAll, DragMode::MoveFrom, DragMode::MoveTo] {
                let _ = clamp_drag(black_box(mode), black_box(anchor), black_box(-0.45));
            }
        })
    });
}

fn bench_drag_and_draw_10k(c: &mut Criterion) {
    let points: Vec<DataPoint> = (0..10_000)
        .map(|i| {
            let t = i as f64;
            DataPoint::new(t, 100.0 + (t * 0.01).sin() * 80.0)
        })
        .collect();
    let mut host = BenchHost {
        column: BenchColumn { points },
        drawer: BenchDrawer,
    };
    let mut surface = RecordingSurface::new(1920.0, 1080.0).expect("surface");
    let clock = Rc::new(ManualClock::new(0.0));
    let mut selector = RangeSelector::new(
        MinimapConfig::default(),
        &surface,
        LineContent::default(),
        clock.clone(),
    )
    .expect("selector init");
    selector.add_column(ColumnId::new(0));
    selector.add_drawer(DrawerId::new(0));
    selector
        .set_range(&mut host, NormalizedRange::new(0.3, 0.6).expect("valid range"))
        .expect("assign range");

    let strip_y = 1080.0 - 20.0;
    c.bench_function("drag_and_draw_10k", |b| {
        b.iter(|| {
            selector.pointer_down(&mut host, 800.0, strip_y);
            selector.pointer_move(&mut host, black_box(900.0), strip_y);
            selector.pointer_up();
            clock.advance(60.0);
            surface.clear().expect("clear");
            selector
                .draw(&mut host, &mut surface)
                .expect("draw should succeed");
        })
    });
}

criterion_group!(benches, bench_clamp_drag, bench_drag_and_draw_10k);
criterion_main!(benches);
