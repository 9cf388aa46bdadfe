#![allow(dead_code)]

use std::rc::Rc;

use chart_minimap::api::{
    ColumnId, ContentContext, DrawerBorders, DrawerId, MinimapColumn, MinimapConfig,
    MinimapContent, MinimapHost, RangeSelector, SeriesDrawer,
};
use chart_minimap::core::{Animation, DataPoint, ManualClock};
use chart_minimap::error::MinimapResult;
use chart_minimap::render::{Color, DrawingSurface, RecordingSurface, RectPrimitive};

pub const SURFACE_WIDTH: f64 = 300.0;
pub const SURFACE_HEIGHT: f64 = 200.0;
pub const MINIMAP_HEIGHT: f64 = 44.0;
/// Any y inside the strip for a 200px surface (strip spans 156..200).
pub const STRIP_Y: f64 = 170.0;

#[derive(Debug, Clone)]
pub struct FakeColumn {
    pub color: Color,
    pub points: Vec<DataPoint>,
    pub opacity: Animation,
    pub current_range: Option<(f64, f64)>,
    pub current_x: Option<f64>,
}

impl FakeColumn {
    pub fn new(points: Vec<DataPoint>) -> Self {
        Self {
            color: Color::rgb(0.2, 0.4, 0.8),
            points,
            opacity: Animation::fixed(1.0),
            current_range: None,
            current_x: None,
        }
    }
}

impl MinimapColumn for FakeColumn {
    fn opacity(&self) -> Animation {
        self.opacity
    }

    fn color(&self) -> Color {
        self.color
    }

    fn points(&self) -> &[DataPoint] {
        &self.points
    }

    fn set_current_range(&mut self, from: f64, to: f64) {
        self.current_range = Some((from, to));
    }

    fn set_current_x(&mut self, x: Option<f64>) {
        self.current_x = x;
    }
}

#[derive(Debug, Clone)]
pub struct FakeDrawer {
    pub borders: DrawerBorders,
    pub recalc_calls: Vec<f64>,
    pub removed: Vec<ColumnId>,
}

impl FakeDrawer {
    pub fn new(borders: DrawerBorders) -> Self {
        Self {
            borders,
            recalc_calls: Vec::new(),
            removed: Vec::new(),
        }
    }
}

impl SeriesDrawer for FakeDrawer {
    fn borders(&self) -> DrawerBorders {
        self.borders
    }

    fn recalc_borders(&mut self, duration_ms: f64) {
        self.recalc_calls.push(duration_ms);
    }

    fn remove_column(&mut self, id: ColumnId) {
        self.removed.push(id);
    }
}

#[derive(Debug, Default)]
pub struct FakeHost {
    pub columns: Vec<(ColumnId, FakeColumn)>,
    pub drawers: Vec<(DrawerId, FakeDrawer)>,
    pub range_texts: Vec<String>,
    pub redraw_requests: usize,
    pub display_recalcs: Vec<f64>,
}

impl FakeHost {
    pub fn with_column(mut self, id: u32, column: FakeColumn) -> Self {
        self.columns.push((ColumnId::new(id), column));
        self
    }

    pub fn with_drawer(mut self, id: u32, drawer: FakeDrawer) -> Self {
        self.drawers.push((DrawerId::new(id), drawer));
        self
    }

    pub fn column_state(&self, id: u32) -> &FakeColumn {
        &self
            .columns
            .iter()
            .find(|(column_id, _)| column_id.raw() == id)
            .expect("column registered in fake host")
            .1
    }

    pub fn column_state_mut(&mut self, id: u32) -> &mut FakeColumn {
        &mut self
            .columns
            .iter_mut()
            .find(|(column_id, _)| column_id.raw() == id)
            .expect("column registered in fake host")
            .1
    }

    pub fn drawer_state(&self, id: u32) -> &FakeDrawer {
        &self
            .drawers
            .iter()
            .find(|(drawer_id, _)| drawer_id.raw() == id)
            .expect("drawer registered in fake host")
            .1
    }
}

impl MinimapHost for FakeHost {
    fn column(&self, id: ColumnId) -> Option<&dyn MinimapColumn> {
        self.columns
            .iter()
            .find(|(column_id, _)| *column_id == id)
            .map(|(_, column)| column as &dyn MinimapColumn)
    }

    fn column_mut(&mut self, id: ColumnId) -> Option<&mut dyn MinimapColumn> {
        self.columns
            .iter_mut()
            .find(|(column_id, _)| *column_id == id)
            .map(|(_, column)| column as &mut dyn MinimapColumn)
    }

    fn drawer(&self, id: DrawerId) -> Option<&dyn SeriesDrawer> {
        self.drawers
            .iter()
            .find(|(drawer_id, _)| *drawer_id == id)
            .map(|(_, drawer)| drawer as &dyn SeriesDrawer)
    }

    fn drawer_mut(&mut self, id: DrawerId) -> Option<&mut dyn SeriesDrawer> {
        self.drawers
            .iter_mut()
            .find(|(drawer_id, _)| *drawer_id == id)
            .map(|(_, drawer)| drawer as &mut dyn SeriesDrawer)
    }

    fn set_range_text(&mut self, text: String) {
        self.range_texts.push(text);
    }

    fn date_string(&self, value: f64) -> String {
        format!("{value:.1}")
    }

    fn request_redraw(&mut self) {
        self.redraw_requests += 1;
    }

    fn recalc_display_borders(&mut self, duration_ms: f64) {
        self.display_recalcs.push(duration_ms);
    }
}

/// Content renderer that counts cache regenerations.
#[derive(Debug, Default)]
pub struct CountingContent {
    pub renders: usize,
    pub removed: Vec<ColumnId>,
}

impl<S: DrawingSurface> MinimapContent<S> for CountingContent {
    fn render_content(&mut self, cache: &mut S, _ctx: &ContentContext<'_>) -> MinimapResult<()> {
        self.renders += 1;
        cache.fill_rect(RectPrimitive::new(
            0.0,
            0.0,
            cache.width(),
            cache.height(),
            Color::rgb(0.5, 0.5, 0.5),
        ))
    }

    fn remove_column(&mut self, id: ColumnId) {
        self.removed.push(id);
    }
}

pub type TestSelector = RangeSelector<RecordingSurface, CountingContent>;

pub fn surface() -> RecordingSurface {
    RecordingSurface::new(SURFACE_WIDTH, SURFACE_HEIGHT).expect("recording surface")
}

pub fn build_selector() -> (TestSelector, RecordingSurface, Rc<ManualClock>) {
    let surface = surface();
    let clock = Rc::new(ManualClock::new(0.0));
    let selector = RangeSelector::new(
        MinimapConfig::default().with_height(MINIMAP_HEIGHT),
        &surface,
        CountingContent::default(),
        clock.clone(),
    )
    .expect("selector init");
    (selector, surface, clock)
}

/// Host with two flat columns and one drawer spanning x in `[1000, 2000]`.
pub fn populated_host() -> FakeHost {
    let points = vec![
        DataPoint::new(1_000.0, 10.0),
        DataPoint::new(1_500.0, 60.0),
        DataPoint::new(2_000.0, 30.0),
    ];
    FakeHost::default()
        .with_column(1, FakeColumn::new(points.clone()))
        .with_column(2, FakeColumn::new(points))
        .with_drawer(
            1,
            FakeDrawer::new(DrawerBorders::fixed(1_000.0, 2_000.0, 0.0, 100.0)),
        )
}

pub fn register_all(selector: &mut TestSelector, host: &FakeHost) {
    for (id, _) in &host.columns {
        selector.add_column(*id);
    }
    for (id, _) in &host.drawers {
        selector.add_drawer(*id);
    }
}
