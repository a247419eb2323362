//! Scroll Manager for the shell.
//!
//! Tracks whether the page sits at its top edge and whether a
//! pull-to-refresh is in flight. Exactly one surface owns scrolling at a
//! time: the outer refresh container while the page is at the top, the page
//! once it has scrolled away.

/// ScrollAnchor and RefreshState for one shell.
#[derive(Debug, Clone)]
pub struct ScrollManager {
    pull_to_refresh: bool,
    is_at_top: bool,
    refreshing: bool,
}

impl ScrollManager {
    pub fn new(pull_to_refresh: bool) -> Self {
        Self {
            pull_to_refresh,
            is_at_top: true,
            refreshing: false,
        }
    }

    /// Records the page's vertical offset. Ignored when pull-to-refresh is off.
    pub fn on_scroll(&mut self, offset_y: f64) {
        if self.pull_to_refresh {
            self.is_at_top = offset_y == 0.0;
        }
    }

    /// Arms a refresh if the page is at the top and no refresh is already
    /// in flight. Returns whether it started.
    pub fn try_begin_refresh(&mut self) -> bool {
        if !self.pull_to_refresh || !self.is_at_top || self.refreshing {
            return false;
        }
        self.refreshing = true;
        true
    }

    pub fn finish_refresh(&mut self) {
        self.refreshing = false;
    }

    pub fn is_at_top(&self) -> bool {
        self.is_at_top
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn pull_to_refresh(&self) -> bool {
        self.pull_to_refresh
    }

    /// Outer container scrolling and the refresh control are live only at the top.
    pub fn outer_scroll_enabled(&self) -> bool {
        self.pull_to_refresh && self.is_at_top
    }

    /// With an outer refresh container the page never scrolls natively.
    pub fn inner_scroll_enabled(&self) -> bool {
        !self.pull_to_refresh
    }
}
