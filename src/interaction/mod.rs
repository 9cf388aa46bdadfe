use crate::core::NormalizedRange;

/// Hit-zone reach of the `from` gripper, left and right of the window's left edge.
pub const FROM_ZONE_OUTER_PX: f64 = 5.0;
pub const FROM_ZONE_INNER_PX: f64 = 20.0;
/// Hit-zone reach of the `to` gripper, left and right of the window's right edge.
pub const TO_ZONE_INNER_PX: f64 = 15.0;
pub const TO_ZONE_OUTER_PX: f64 = 5.0;

/// What a drag does to the selected window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Slides the whole window, keeping its width.
    MoveAll,
    /// Resizes by moving the left edge.
    MoveFrom,
    /// Resizes by moving the right edge.
    MoveTo,
}

impl DragMode {
    #[must_use]
    pub fn moves_from(self) -> bool {
        matches!(self, Self::MoveAll | Self::MoveFrom)
    }

    #[must_use]
    pub fn moves_to(self) -> bool {
        matches!(self, Self::MoveAll | Self::MoveTo)
    }
}

/// Pointer cursor the host should display over the minimap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    /// Horizontal resize (`ew-resize`).
    Resize,
    Move,
}

impl CursorHint {
    /// CSS-style cursor name, handy for toolkits that accept named cursors.
    #[must_use]
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Resize => "ew-resize",
            Self::Move => "move",
        }
    }
}

/// Transient drag state. Lives from pointer-down on a hit zone until pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragState {
    pub mode: Option<DragMode>,
    pub anchor_pointer: Option<(f64, f64)>,
    pub anchor_range: Option<NormalizedRange>,
}

impl DragState {
    pub fn begin(&mut self, mode: DragMode, pointer: (f64, f64), range: NormalizedRange) {
        self.mode = Some(mode);
        self.anchor_pointer = Some(pointer);
        self.anchor_range = Some(range);
    }

    pub fn end(&mut self) {
        *self = Self::default();
    }

    /// Returns the active mode with both anchors, if a drag is in progress.
    #[must_use]
    pub fn active(self) -> Option<(DragMode, (f64, f64), NormalizedRange)> {
        match (self.mode, self.anchor_pointer, self.anchor_range) {
            (Some(mode), Some(pointer), Some(range)) => Some((mode, pointer, range)),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_dragging(self) -> bool {
        self.active().is_some()
    }
}

/// Resolves the drag candidate under pointer `x`.
///
/// Resize zones are checked before the body so they win at the window edges.
#[must_use]
pub fn hit_test(
    range: NormalizedRange,
    surface_width: f64,
    x: f64,
) -> (Option<DragMode>, CursorHint) {
    let (left, width) = range.pixel_extent(surface_width);
    let right = left + width;

    if x >= left - FROM_ZONE_OUTER_PX && x <= left + FROM_ZONE_INNER_PX {
        (Some(DragMode::MoveFrom), CursorHint::Resize)
    } else if x >= right - TO_ZONE_INNER_PX && x < right + TO_ZONE_OUTER_PX {
        (Some(DragMode::MoveTo), CursorHint::Resize)
    } else if x >= left && x < right {
        (Some(DragMode::MoveAll), CursorHint::Move)
    } else {
        (None, CursorHint::Default)
    }
}

/// Applies a normalized pointer displacement to the anchor range.
///
/// Clamping order: left overflow, right overflow, then minimum width. Overflow
/// on one edge slides the opposite edge when the mode moves it, so a whole
/// window drag keeps its width while pinned against a boundary.
#[must_use]
pub fn clamp_drag(mode: DragMode, anchor: NormalizedRange, diff: f64) -> NormalizedRange {
    if !diff.is_finite() {
        return anchor;
    }

    let mut from = anchor.from;
    let mut to = anchor.to;
    if mode.moves_from() {
        from += diff;
    }
    if mode.moves_to() {
        to += diff;
    }

    if from < 0.0 {
        if mode.moves_to() {
            to -= from;
        }
        from = 0.0;
    }
    if to > 1.0 {
        if mode.moves_from() {
            from -= to - 1.0;
        }
        to = 1.0;
    }
    if to - from < NormalizedRange::MIN_SPAN {
        if mode == DragMode::MoveTo {
            to = from + NormalizedRange::MIN_SPAN;
        } else {
            from = to - NormalizedRange::MIN_SPAN;
        }
    }

    NormalizedRange::from_clamped(from, to)
}
