//! Shrinking safe-zone bookkeeping.

use arena_royale_core::Rect;

/// Rectangle that periodically contracts toward its own center.
///
/// Agents caught outside lose health every tick; the damage application
/// itself lives with the agent roster, this type only tracks the rectangle
/// and the shrink cadence.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SafeZone {
    area: Rect,
    shrink_timer: u32,
}

impl SafeZone {
    /// Creates a safe zone covering the provided bounds.
    pub(crate) fn new(bounds: Rect) -> Self {
        Self {
            area: bounds,
            shrink_timer: 0,
        }
    }

    /// Rectangle currently considered safe.
    pub(crate) fn area(&self) -> Rect {
        self.area
    }

    /// Advances the shrink timer by one tick.
    ///
    /// Every `interval` ticks both dimensions scale by `factor` and the
    /// rectangle recenters on its previous center; the new area is returned
    /// so callers can announce it.
    pub(crate) fn advance(&mut self, interval: u32, factor: f32) -> Option<Rect> {
        self.shrink_timer = self.shrink_timer.saturating_add(1);
        if interval == 0 || self.shrink_timer < interval {
            return None;
        }

        self.shrink_timer = 0;
        let width = self.area.width() * factor;
        let height = self.area.height() * factor;
        self.area = Rect::new(
            self.area.x() + (self.area.width() - width) / 2.0,
            self.area.y() + (self.area.height() - height) / 2.0,
            width,
            height,
        );
        Some(self.area)
    }
}
