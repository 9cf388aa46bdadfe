use crate::error::MinimapResult;
use crate::render::DrawingSurface;

/// Runtime metrics exposed by the minimap content cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderCacheStats {
    /// Frames that reused the cached bitmap.
    pub hits: u64,
    /// Frames that re-rendered content into the cache.
    pub misses: u64,
}

/// Offscreen surface plus a validity flag.
///
/// Invalidation only flips the flag; regeneration happens on the next frame,
/// so any number of invalidations before a frame cost one re-render.
#[derive(Debug)]
pub struct RenderCache<S> {
    surface: S,
    valid: bool,
    hits: u64,
    misses: u64,
}

impl<S: DrawingSurface> RenderCache<S> {
    pub(crate) fn new(surface: S) -> Self {
        Self {
            surface,
            valid: false,
            hits: 0,
            misses: 0,
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub(crate) fn invalidate(&mut self) {
        self.valid = false;
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub(crate) fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub(crate) fn resize(&mut self, width: f64, height: f64) -> MinimapResult<()> {
        self.surface.resize(width, height)?;
        self.valid = false;
        Ok(())
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits = self.hits.saturating_add(1);
    }

    pub(crate) fn mark_regenerated(&mut self) {
        self.misses = self.misses.saturating_add(1);
        self.valid = true;
    }

    #[must_use]
    pub fn stats(&self) -> RenderCacheStats {
        RenderCacheStats {
            hits: self.hits,
            misses: self.misses,
        }
    }
}
