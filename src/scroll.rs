//! Follow-the-conversation logic for the timeline viewport.

/// Distance from the content bottom still treated as "at bottom".
pub const AT_BOTTOM_TOLERANCE: f32 = 10.0;

/// Raw scroll metrics reported by the host widget.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f32,
    pub scroll_height: f32,
    pub client_height: f32,
}

impl ScrollMetrics {
    pub fn is_at_bottom(&self) -> bool {
        self.scroll_top + self.client_height >= self.scroll_height - AT_BOTTOM_TOLERANCE
    }
}

/// What the view should do after the message list changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDecision {
    ScrollToBottom,
    /// Leave the scroll position alone.
    Hold { show_jump_to_latest: bool },
}

/// Tracks whether the user is following the conversation.
///
/// Once the user scrolls up to read history, new arrivals must not pull
/// them back down.
#[derive(Debug)]
pub struct ScrollTracker {
    at_bottom: bool,
    auto_follow_enabled: bool,
    show_jump_to_latest: bool,
    pending_scroll_to_bottom: bool,
}

impl ScrollTracker {
    pub fn new(auto_follow_enabled: bool) -> Self {
        Self {
            // A freshly opened view starts at the tail
            at_bottom: true,
            auto_follow_enabled,
            show_jump_to_latest: false,
            pending_scroll_to_bottom: true,
        }
    }

    pub fn at_bottom(&self) -> bool {
        self.at_bottom
    }

    pub fn auto_follow_enabled(&self) -> bool {
        self.auto_follow_enabled
    }

    pub fn set_auto_follow(&mut self, enabled: bool) {
        self.auto_follow_enabled = enabled;
        if enabled {
            self.show_jump_to_latest = false;
        }
    }

    pub fn show_jump_to_latest(&self) -> bool {
        self.show_jump_to_latest
    }

    /// Feed the latest metrics from the viewport.
    pub fn observe(&mut self, metrics: ScrollMetrics) {
        let at_bottom = metrics.is_at_bottom();
        if self.pending_scroll_to_bottom {
            // Keep following until the requested scroll has landed
            if at_bottom {
                self.pending_scroll_to_bottom = false;
            }
            self.at_bottom = true;
            return;
        }
        self.at_bottom = at_bottom;
        if at_bottom {
            self.show_jump_to_latest = false;
        }
    }

    /// Decide how to react to a change of the message list.
    pub fn on_content_changed(&mut self) -> ScrollDecision {
        if self.at_bottom {
            self.pending_scroll_to_bottom = true;
            ScrollDecision::ScrollToBottom
        } else {
            if !self.auto_follow_enabled {
                self.show_jump_to_latest = true;
            }
            ScrollDecision::Hold {
                show_jump_to_latest: self.show_jump_to_latest,
            }
        }
    }

    /// User asked to jump to the newest message.
    pub fn jump_to_latest(&mut self) {
        self.show_jump_to_latest = false;
        self.pending_scroll_to_bottom = true;
        self.at_bottom = true;
    }

    /// Whether a scroll to bottom is outstanding. The request stays latched
    /// until `observe` sees the viewport at the bottom.
    pub fn wants_scroll_to_bottom(&self) -> bool {
        self.pending_scroll_to_bottom
    }

    /// Forget the position, e.g. when another conversation is opened.
    pub fn reset(&mut self) {
        self.at_bottom = true;
        self.show_jump_to_latest = false;
        self.pending_scroll_to_bottom = true;
    }
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(scroll_top: f32) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top,
            scroll_height: 1000.0,
            client_height: 400.0,
        }
    }

    /// Tracker that has settled at the bottom of a 1000px timeline.
    fn settled() -> ScrollTracker {
        let mut tracker = ScrollTracker::new(false);
        tracker.observe(metrics(600.0));
        assert!(!tracker.wants_scroll_to_bottom());
        tracker
    }

    #[test]
    fn test_at_bottom_tolerance() {
        assert!(metrics(600.0).is_at_bottom());
        assert!(metrics(590.0).is_at_bottom());
        assert!(!metrics(589.0).is_at_bottom());
        // Content shorter than the viewport
        let short = ScrollMetrics {
            scroll_top: 0.0,
            scroll_height: 100.0,
            client_height: 400.0,
        };
        assert!(short.is_at_bottom());
    }

    #[test]
    fn test_follows_when_at_bottom() {
        let mut tracker = settled();
        assert_eq!(tracker.on_content_changed(), ScrollDecision::ScrollToBottom);
        assert!(tracker.wants_scroll_to_bottom());
        assert!(!tracker.show_jump_to_latest());
    }

    #[test]
    fn test_holds_and_offers_jump_when_scrolled_up() {
        let mut tracker = settled();
        tracker.observe(metrics(100.0));
        assert!(!tracker.at_bottom());

        assert_eq!(
            tracker.on_content_changed(),
            ScrollDecision::Hold {
                show_jump_to_latest: true
            }
        );
        assert!(!tracker.wants_scroll_to_bottom());
        assert!(tracker.show_jump_to_latest());
    }

    #[test]
    fn test_auto_follow_mode_hides_affordance() {
        let mut tracker = settled();
        tracker.set_auto_follow(true);
        tracker.observe(metrics(100.0));
        assert_eq!(
            tracker.on_content_changed(),
            ScrollDecision::Hold {
                show_jump_to_latest: false
            }
        );
    }

    #[test]
    fn test_pending_scroll_keeps_following_until_landed() {
        let mut tracker = settled();
        tracker.on_content_changed();

        // Content grew before the scroll was applied
        tracker.observe(metrics(600.0 - 200.0));
        assert!(tracker.at_bottom());
        assert!(tracker.wants_scroll_to_bottom());

        tracker.observe(metrics(600.0));
        assert!(!tracker.wants_scroll_to_bottom());
        assert_eq!(tracker.on_content_changed(), ScrollDecision::ScrollToBottom);
    }

    #[test]
    fn test_jump_to_latest_and_manual_return() {
        let mut tracker = settled();
        tracker.observe(metrics(0.0));
        tracker.on_content_changed();
        assert!(tracker.show_jump_to_latest());

        tracker.jump_to_latest();
        assert!(!tracker.show_jump_to_latest());
        assert!(tracker.wants_scroll_to_bottom());

        let mut tracker = settled();
        tracker.observe(metrics(0.0));
        tracker.on_content_changed();
        tracker.observe(metrics(600.0));
        assert!(!tracker.show_jump_to_latest());
    }
}
