//! Per-pane window model.
//!
//! Every mutation is a pure clamp-and-apply step returning the next window.
//! There is no invalid-input path: out-of-range requests are clamped.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Upper cap of the minimum visible bar count (`minBars = min(cap, totalBars)`).
pub const DEFAULT_MIN_VIEW_BARS: usize = 20;
/// Visible bar count for freshly created panes and freshly loaded datasets.
pub const DEFAULT_VIEW_BARS: usize = 240;

fn default_min_bars_cap() -> usize {
    DEFAULT_MIN_VIEW_BARS
}

/// Window state of one pane: `(total_bars, view_bars, view_offset, seek)`.
///
/// Invariants after any mutation with `total_bars > 0`:
/// - `min_bars() <= view_bars <= total_bars`
/// - `view_offset <= total_bars - view_bars`
/// - `seek <= total_bars - 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewWindow {
    total_bars: usize,
    view_bars: usize,
    view_offset: usize,
    seek: usize,
    #[serde(default = "default_min_bars_cap")]
    min_bars_cap: usize,
}

impl Default for ViewWindow {
    fn default() -> Self {
        Self::empty(DEFAULT_VIEW_BARS)
    }
}

impl ViewWindow {
    /// Window over an empty dataset. `view_bars` is stored verbatim until the
    /// first explicit zoom.
    #[must_use]
    pub const fn empty(view_bars: usize) -> Self {
        Self {
            total_bars: 0,
            view_bars,
            view_offset: 0,
            seek: 0,
            min_bars_cap: DEFAULT_MIN_VIEW_BARS,
        }
    }

    /// Window for a freshly loaded dataset: trailing-edge at bar 0.
    #[must_use]
    pub fn for_dataset(total_bars: usize, default_view_bars: usize, min_bars_cap: usize) -> Self {
        let view_bars = if total_bars == 0 {
            default_view_bars
        } else {
            default_view_bars.min(total_bars)
        };
        Self {
            total_bars,
            view_bars,
            view_offset: 0,
            seek: 0,
            min_bars_cap,
        }
        .reclamped()
    }

    /// Raw construction followed by a full re-clamp.
    #[must_use]
    pub fn from_parts(total_bars: usize, view_bars: usize, view_offset: usize, seek: usize) -> Self {
        Self {
            total_bars,
            view_bars,
            view_offset,
            seek,
            min_bars_cap: DEFAULT_MIN_VIEW_BARS,
        }
        .reclamped()
    }

    #[must_use]
    pub fn with_min_bars_cap(mut self, cap: usize) -> Self {
        self.min_bars_cap = cap;
        self.reclamped()
    }

    #[must_use]
    pub const fn total_bars(self) -> usize {
        self.total_bars
    }

    #[must_use]
    pub const fn view_bars(self) -> usize {
        self.view_bars
    }

    #[must_use]
    pub const fn view_offset(self) -> usize {
        self.view_offset
    }

    #[must_use]
    pub const fn seek(self) -> usize {
        self.seek
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.total_bars == 0
    }

    #[must_use]
    pub fn min_bars(self) -> usize {
        self.min_bars_cap.min(self.total_bars)
    }

    #[must_use]
    pub fn max_offset(self) -> usize {
        self.total_bars.saturating_sub(self.view_bars)
    }

    #[must_use]
    pub fn last_index(self) -> usize {
        self.total_bars.saturating_sub(1)
    }

    /// Clamps the visible width to `[min_bars, total_bars]` and re-clamps the
    /// current offset into the new range. Seek is left untouched.
    ///
    /// Without data the range degenerates to the min-bars cap.
    #[must_use]
    pub fn with_view_bars(self, requested: i64) -> Self {
        if self.is_empty() {
            return Self {
                view_bars: self.min_bars_cap,
                ..self.zeroed_positions()
            };
        }
        let view_bars = clamp_request(requested, self.min_bars(), self.total_bars);
        let next = Self { view_bars, ..self };
        Self {
            view_offset: next.view_offset.min(next.max_offset()),
            ..next
        }
    }

    /// Clamps the offset to `[0, max_offset]` and moves seek to the window's
    /// trailing edge.
    #[must_use]
    pub fn with_view_offset(self, requested: i64) -> Self {
        if self.is_empty() {
            return self.zeroed_positions();
        }
        let view_offset = clamp_request(requested, 0, self.max_offset());
        let trailing = view_offset.saturating_add(self.view_bars).saturating_sub(1);
        Self {
            view_offset,
            seek: trailing.min(self.last_index()),
            ..self
        }
    }

    /// Clamps seek into `[0, total_bars - 1]` without moving the window.
    #[must_use]
    pub fn with_updated_seek(self, requested: i64) -> Self {
        if self.is_empty() {
            return self.zeroed_positions();
        }
        Self {
            seek: clamp_request(requested, 0, self.last_index()),
            ..self
        }
    }

    /// Clamps seek and re-centers the window so its trailing edge tracks it.
    #[must_use]
    pub fn with_applied_seek(self, requested: i64) -> Self {
        self.with_updated_seek(requested).recentered_on_seek()
    }

    /// `view_offset = clamp(seek - view_bars + 1, 0, max_offset)`.
    #[must_use]
    pub fn recentered_on_seek(self) -> Self {
        if self.is_empty() {
            return self.zeroed_positions();
        }
        let leading = (self.seek + 1).saturating_sub(self.view_bars);
        Self {
            view_offset: leading.min(self.max_offset()),
            ..self
        }
    }

    /// Same window against a dataset of `total_bars` bars, re-clamped.
    #[must_use]
    pub fn with_total_bars(self, total_bars: usize) -> Self {
        Self { total_bars, ..self }.reclamped()
    }

    /// Copies `(view_bars, view_offset, seek)` from `anchor`, then re-clamps
    /// against this window's own dataset length.
    #[must_use]
    pub fn adopting(self, anchor: Self) -> Self {
        Self {
            view_bars: anchor.view_bars,
            view_offset: anchor.view_offset,
            seek: anchor.seek,
            ..self
        }
        .reclamped()
    }

    /// Re-establishes every invariant without re-centering.
    #[must_use]
    pub fn reclamped(self) -> Self {
        if self.is_empty() {
            return self.zeroed_positions();
        }
        let view_bars = self.view_bars.clamp(self.min_bars(), self.total_bars);
        let next = Self { view_bars, ..self };
        Self {
            view_offset: next.view_offset.min(next.max_offset()),
            seek: next.seek.min(next.last_index()),
            ..next
        }
    }

    /// `view_offset <= seek <= view_offset + view_bars - 1`.
    #[must_use]
    pub fn contains_seek(self) -> bool {
        self.seek >= self.view_offset && self.seek < self.view_offset + self.view_bars.max(1)
    }

    /// Index range actually rendered for this window.
    #[must_use]
    pub fn render_range(self) -> Range<usize> {
        if self.is_empty() {
            return 0..0;
        }
        let bars = self.view_bars.clamp(self.min_bars(), self.total_bars).max(1);
        let offset = self.view_offset.min(self.total_bars - bars);
        offset..offset + bars
    }

    const fn zeroed_positions(self) -> Self {
        Self {
            view_offset: 0,
            seek: 0,
            ..self
        }
    }
}

fn clamp_request(requested: i64, min: usize, max: usize) -> usize {
    let value = usize::try_from(requested).unwrap_or(0);
    value.clamp(min, max.max(min))
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_MIN_VIEW_BARS, DEFAULT_VIEW_BARS, ViewWindow};

    fn window(total: usize) -> ViewWindow {
        ViewWindow::for_dataset(total, DEFAULT_VIEW_BARS, DEFAULT_MIN_VIEW_BARS)
    }

    #[test]
    fn dataset_window_caps_view_bars_to_length() {
        let w = window(100);
        assert_eq!(w.view_bars(), 100);
        assert_eq!((w.view_offset(), w.seek()), (0, 0));
    }

    #[test]
    fn negative_requests_clamp_to_zero() {
        let w = window(300).with_view_offset(-50);
        assert_eq!(w.view_offset(), 0);
        assert_eq!(w.seek(), 239);
    }

    #[test]
    fn tiny_dataset_allows_view_bars_below_default_minimum() {
        let w = window(5).with_view_bars(1);
        assert_eq!(w.view_bars(), 5);
        assert_eq!(w.min_bars(), 5);
    }

    #[test]
    fn empty_window_collapses_view_bars_to_cap_and_zeroes_positions() {
        let w = ViewWindow::empty(240).with_view_bars(10).with_applied_seek(7);
        assert_eq!(w.view_bars(), DEFAULT_MIN_VIEW_BARS);
        assert_eq!((w.view_offset(), w.seek()), (0, 0));
        assert_eq!(w.render_range(), 0..0);
    }

    #[test]
    fn render_range_matches_window() {
        let w = window(500).with_applied_seek(400);
        assert_eq!(w.render_range(), 161..401);
    }
}
