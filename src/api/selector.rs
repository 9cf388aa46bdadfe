use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::core::{AnimatedRange, Clock, NormalizedRange};
use crate::error::{MinimapError, MinimapResult};
use crate::interaction::{CursorHint, DragMode, DragState, clamp_drag, hit_test};
use crate::render::{DrawingSurface, LinePrimitive, RectPrimitive};

use super::{
    ColumnId, ContentContext, DrawerBorders, DrawerId, MinimapConfig, MinimapContent, MinimapHost,
    MinimapPalette, RenderCache, RenderCacheStats, ThemeKind, apply_theme, format_range_label,
};

const BODY_CORNER_RADIUS: f64 = 6.0;
/// Shadows reach this far under the grippers so no gap shows at the rounded ends.
const SHADOW_OVERLAP: f64 = 6.0;
const GRIPPER_WIDTH: f64 = 10.0;
const GRIPPER_RADIUS: f64 = 6.0;
const GRIP_STRIP_WIDTH: f64 = 2.0;
const GRIP_STRIP_HEIGHT: f64 = 12.0;
const GRIP_STRIP_TOP: f64 = 15.0;
const GRIP_STRIP_RADIUS: f64 = 2.0;
const BORDER_LINE_WIDTH: f64 = 1.0;

/// Interactive minimap range selector.
///
/// Owns the selected range, the drag state machine and the content cache.
/// Columns and drawers stay in the host; the selector keeps their ids only.
/// Every entry point is expected on the host's UI thread, one at a time.
pub struct RangeSelector<S: DrawingSurface, C: MinimapContent<S>> {
    config: MinimapConfig,
    palette: MinimapPalette,
    clock: Rc<dyn Clock>,
    content: C,
    cache: RenderCache<S>,
    range: Option<AnimatedRange>,
    drag: DragState,
    candidate: Option<DragMode>,
    cursor: CursorHint,
    columns: Vec<ColumnId>,
    drawers: Vec<DrawerId>,
    surface_width: f64,
    top: f64,
}

impl<S: DrawingSurface, C: MinimapContent<S>> RangeSelector<S, C> {
    /// Anchors a `config.height` strip to the bottom of `surface`.
    pub fn new(
        config: MinimapConfig,
        surface: &S,
        content: C,
        clock: Rc<dyn Clock>,
    ) -> MinimapResult<Self> {
        let config = config.validate()?;
        let surface_width = surface.width();
        let surface_height = surface.height();
        if !surface_width.is_finite()
            || !surface_height.is_finite()
            || surface_height < config.height
        {
            return Err(MinimapError::InvalidData(format!(
                "surface {surface_width}x{surface_height} cannot host a {}px minimap",
                config.height
            )));
        }

        let cache = surface.create_offscreen(surface_width, body_height(config.height))?;
        Ok(Self {
            config,
            palette: apply_theme(config.theme),
            clock,
            content,
            cache: RenderCache::new(cache),
            range: None,
            drag: DragState::default(),
            candidate: None,
            cursor: CursorHint::Default,
            columns: Vec::new(),
            drawers: Vec::new(),
            surface_width,
            top: surface_height - config.height,
        })
    }

    #[must_use]
    pub fn config(&self) -> MinimapConfig {
        self.config
    }

    /// Top edge of the strip on the visible surface.
    #[must_use]
    pub fn top(&self) -> f64 {
        self.top
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.config.height
    }

    #[must_use]
    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    #[must_use]
    pub fn columns(&self) -> &[ColumnId] {
        &self.columns
    }

    #[must_use]
    pub fn drawers(&self) -> &[DrawerId] {
        &self.drawers
    }

    pub fn add_column(&mut self, id: ColumnId) {
        if !self.columns.contains(&id) {
            self.columns.push(id);
            self.cache.invalidate();
        }
    }

    /// Unregisters `id` and tells every drawer and the content renderer to drop it.
    pub fn remove_column(&mut self, host: &mut dyn MinimapHost, id: ColumnId) {
        let before = self.columns.len();
        self.columns.retain(|column| *column != id);
        if self.columns.len() == before {
            trace!(column = id.raw(), "remove_column ignored: column not registered");
        }
        for drawer_id in &self.drawers {
            if let Some(drawer) = host.drawer_mut(*drawer_id) {
                drawer.remove_column(id);
            }
        }
        self.content.remove_column(id);
        self.cache.invalidate();
    }

    /// Registers a drawer. The first one supplies the data-space borders.
    pub fn add_drawer(&mut self, id: DrawerId) {
        if !self.drawers.contains(&id) {
            self.drawers.push(id);
            self.cache.invalidate();
        }
    }

    pub fn remove_drawer(&mut self, id: DrawerId) {
        self.drawers.retain(|drawer| *drawer != id);
        self.cache.invalidate();
    }

    #[must_use]
    pub fn theme(&self) -> ThemeKind {
        self.config.theme
    }

    /// Swaps the palette. Geometry and cached content are unaffected.
    pub fn set_theme(&mut self, theme: ThemeKind) {
        self.config.theme = theme;
        self.palette = apply_theme(theme);
    }

    #[must_use]
    pub fn palette(&self) -> MinimapPalette {
        self.palette
    }

    /// Currently displayed range; mid-animation this is the interpolated value.
    #[must_use]
    pub fn range(&self) -> Option<NormalizedRange> {
        self.range.map(|range| range.displayed(self.clock.now_ms()))
    }

    /// Last assigned range, regardless of animation progress.
    #[must_use]
    pub fn target_range(&self) -> Option<NormalizedRange> {
        self.range.map(AnimatedRange::target)
    }

    #[must_use]
    pub fn is_range_animating(&self) -> bool {
        self.range
            .is_some_and(|range| !range.is_finished(self.clock.now_ms()))
    }

    /// Assigns a new target range and propagates it to columns and host.
    ///
    /// Bounds and order are checked; the minimum width is only enforced for
    /// drag-originated ranges.
    pub fn set_range(
        &mut self,
        host: &mut dyn MinimapHost,
        range: NormalizedRange,
    ) -> MinimapResult<()> {
        let range = NormalizedRange::new(range.from, range.to)?;
        let now_ms = self.clock.now_ms();
        self.assign_range(host, range, now_ms);
        Ok(())
    }

    fn assign_range(&mut self, host: &mut dyn MinimapHost, target: NormalizedRange, now_ms: f64) {
        let previous = self.range.map(|range| range.displayed(now_ms));
        let (range_duration, borders_duration) = match previous {
            Some(_) => (
                self.config.range_animation_ms,
                self.config.borders_animation_ms,
            ),
            None => (0.0, 0.0),
        };
        let start = previous.unwrap_or(NormalizedRange { from: 0.0, to: 0.0 });
        self.range = Some(AnimatedRange::create(start, target, range_duration, now_ms));

        let Some(borders) = self.first_drawer_borders(&*host) else {
            debug!(
                from = target.from,
                to = target.to,
                "no drawer registered; range propagation skipped"
            );
            return;
        };

        let (data_from, data_to) =
            target.map_to_domain(borders.min_x.target(), borders.max_x.target());
        for (index, id) in self.columns.iter().enumerate() {
            if index == 0 {
                let label = format_range_label(&*host, data_from, data_to);
                host.set_range_text(label);
            }
            match host.column_mut(*id) {
                Some(column) => column.set_current_range(data_from, data_to),
                None => warn!(column = id.raw(), "registered column missing from host"),
            }
        }
        host.recalc_display_borders(borders_duration);
    }

    fn first_drawer_borders(&self, host: &dyn MinimapHost) -> Option<DrawerBorders> {
        self.drawers
            .first()
            .and_then(|id| host.drawer(*id))
            .map(|drawer| drawer.borders())
    }

    /// Forwards a border re-fit to every drawer, then asks for a frame.
    pub fn recalc_borders(&mut self, host: &mut dyn MinimapHost, duration_ms: f64) {
        for id in &self.drawers {
            if let Some(drawer) = host.drawer_mut(*id) {
                drawer.recalc_borders(duration_ms);
            }
        }
        host.request_redraw();
    }

    /// Tracks a new visible surface size. The cache is regenerated on the next
    /// `draw` however many resizes arrive before it.
    pub fn on_surface_resize(&mut self, width: f64, height: f64) -> MinimapResult<()> {
        if !width.is_finite() || width < 0.0 {
            return Err(MinimapError::InvalidData(format!(
                "surface width must be finite and >= 0 (got {width})"
            )));
        }
        self.surface_width = width;
        self.cache.resize(width, body_height(self.config.height))?;
        debug!(width, height, "minimap cache invalidated by resize");
        Ok(())
    }

    #[must_use]
    pub fn cursor(&self) -> CursorHint {
        self.cursor
    }

    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Drag candidate resolved by the most recent hover hit test.
    #[must_use]
    pub fn hover_mode(&self) -> Option<DragMode> {
        self.candidate
    }

    #[must_use]
    pub fn cache_stats(&self) -> RenderCacheStats {
        self.cache.stats()
    }

    #[must_use]
    pub fn cache(&self) -> &RenderCache<S> {
        &self.cache
    }

    /// Hit-tests while idle; applies the drag while dragging.
    pub fn pointer_move(&mut self, host: &mut dyn MinimapHost, x: f64, y: f64) {
        if !x.is_finite() || !y.is_finite() {
            trace!(x, y, "ignoring non-finite pointer position");
            return;
        }
        let now_ms = self.clock.now_ms();

        let Some((mode, anchor_pointer, anchor_range)) = self.drag.active() else {
            self.update_hover(x, y, now_ms);
            return;
        };

        for id in &self.columns {
            if let Some(column) = host.column_mut(*id) {
                column.set_current_x(None);
            }
        }
        if self.surface_width <= 0.0 {
            return;
        }
        let diff = (x - anchor_pointer.0) / self.surface_width;
        let next = clamp_drag(mode, anchor_range, diff);
        trace!(?mode, diff, from = next.from, to = next.to, "minimap drag step");
        self.assign_range(host, next, now_ms);
    }

    /// Starts a drag when the pointer lands on a hit zone.
    pub fn pointer_down(&mut self, host: &mut dyn MinimapHost, x: f64, y: f64) {
        self.pointer_move(host, x, y);
        if self.drag.is_dragging() {
            return;
        }
        let (Some(mode), Some(range)) = (self.candidate, self.range()) else {
            return;
        };
        self.drag.begin(mode, (x, y), range);
        debug!(?mode, x, from = range.from, to = range.to, "minimap drag started");
    }

    /// Ends any drag unconditionally.
    pub fn pointer_up(&mut self) {
        if self.drag.is_dragging() {
            debug!("minimap drag ended");
        }
        self.drag.end();
        self.candidate = None;
    }

    fn update_hover(&mut self, x: f64, y: f64, now_ms: f64) {
        let in_band = y >= self.top && y < self.top + self.config.height;
        let displayed = self.range.map(|range| range.displayed(now_ms));
        let (candidate, cursor) = match displayed {
            Some(range) if in_band => hit_test(range, self.surface_width, x),
            _ => (None, CursorHint::Default),
        };
        self.candidate = candidate;
        self.cursor = cursor;
    }

    fn content_animating(
        &self,
        host: &dyn MinimapHost,
        borders: Option<DrawerBorders>,
        now_ms: f64,
    ) -> bool {
        let column_fading = self.columns.iter().any(|id| {
            host.column(*id)
                .is_some_and(|column| !column.opacity().is_finished(now_ms))
        });
        column_fading || borders.is_some_and(|borders| !borders.max_y.is_finished(now_ms))
    }

    /// Paints one frame of the minimap onto `surface`.
    ///
    /// Content is re-rendered into the cache only when it is invalid or still
    /// animating; the window overlay is drawn every frame. Requests another
    /// frame from the host while the range tween runs.
    pub fn draw(&mut self, host: &mut dyn MinimapHost, surface: &mut S) -> MinimapResult<()> {
        let now_ms = self.clock.now_ms();
        let Some(animated) = self.range else {
            trace!("minimap draw skipped: no range assigned");
            return Ok(());
        };
        let range = animated.displayed(now_ms);
        let width = surface.width();
        let (left, span) = range.pixel_extent(width);
        let borders = self.first_drawer_borders(&*host);

        let animating = self.content_animating(&*host, borders, now_ms);
        if self.cache.is_valid() && !animating {
            self.cache.record_hit();
        } else {
            let reason = if animating { "content animating" } else { "invalidated" };
            trace!(reason, "regenerating minimap content cache");
            self.cache.surface_mut().clear()?;
            let ctx = ContentContext {
                host: &*host,
                columns: &self.columns,
                borders,
                now_ms,
            };
            self.content.render_content(self.cache.surface_mut(), &ctx)?;
            self.cache.mark_regenerated();
            surface.clear()?;
        }

        let palette = self.palette;
        let top = self.top;
        let height = self.config.height;
        let body_top = top + 1.0;
        let body_height = body_height(height);
        let right = left + span;

        surface.save()?;
        surface.set_rounded_clip(
            RectPrimitive::new(0.0, body_top, width, body_height, palette.shadow)
                .with_corner_radius(BODY_CORNER_RADIUS),
        )?;
        surface.draw_surface(self.cache.surface(), 0.0, body_top)?;
        surface.fill_rect(RectPrimitive::new(
            0.0,
            body_top,
            (left + SHADOW_OVERLAP).max(0.0),
            body_height,
            palette.shadow,
        ))?;
        surface.fill_rect(RectPrimitive::new(
            right - SHADOW_OVERLAP,
            body_top,
            (width - right + SHADOW_OVERLAP).max(0.0),
            body_height,
            palette.shadow,
        ))?;
        surface.restore()?;

        draw_gripper(surface, palette, left, top, height, GripperSide::Left)?;
        draw_gripper(surface, palette, right, top, height, GripperSide::Right)?;

        let line_start = left + GRIPPER_WIDTH - 1.0;
        let line_end = right - GRIPPER_WIDTH + 1.0;
        for y in [top, top + height - 1.0] {
            surface.stroke_line(LinePrimitive::new(
                line_start,
                y,
                line_end,
                y,
                BORDER_LINE_WIDTH,
                palette.range_background,
            ))?;
        }

        if !animated.to.is_finished(now_ms) {
            host.request_redraw();
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GripperSide {
    Left,
    Right,
}

/// Rounded end-cap, a square half toward the window, and the grip strip.
fn draw_gripper<S: DrawingSurface>(
    surface: &mut S,
    palette: MinimapPalette,
    edge: f64,
    top: f64,
    height: f64,
    side: GripperSide,
) -> MinimapResult<()> {
    let (cap_x, square_x, strip_x) = match side {
        GripperSide::Left => (edge, edge + GRIPPER_WIDTH * 0.5, edge + 4.0),
        GripperSide::Right => (edge - GRIPPER_WIDTH, edge - GRIPPER_WIDTH, edge - 6.0),
    };
    surface.fill_rect(
        RectPrimitive::new(cap_x, top, GRIPPER_WIDTH, height, palette.range_background)
            .with_corner_radius(GRIPPER_RADIUS),
    )?;
    surface.fill_rect(RectPrimitive::new(
        square_x,
        top,
        GRIPPER_WIDTH * 0.5,
        height,
        palette.range_background,
    ))?;
    surface.fill_rect(
        RectPrimitive::new(
            strip_x,
            top + GRIP_STRIP_TOP,
            GRIP_STRIP_WIDTH,
            GRIP_STRIP_HEIGHT,
            palette.range_fill,
        )
        .with_corner_radius(GRIP_STRIP_RADIUS),
    )
}

fn body_height(height: f64) -> f64 {
    (height - 2.0).max(0.0)
}
