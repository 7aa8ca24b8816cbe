/// Distance from the bottom of the content, in logical pixels,
/// at which the next page is requested
pub const BOTTOM_THRESHOLD: f32 = 100.0;

/// Position of the page viewport, extracted from a scroll event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollPosition {
    /// Offset of the viewport top from the content top
    pub offset_y: f32,
    /// Visible height
    pub viewport_height: f32,
    /// Total content height
    pub content_height: f32,
}

impl ScrollPosition {
    pub fn near_bottom(&self) -> bool {
        self.offset_y + self.viewport_height > self.content_height - BOTTOM_THRESHOLD
    }
}

/// One-shot "infinite scroll" trigger.
///
/// Fires once when the viewport reaches the bottom, then stays disarmed
/// until [`ScrollTrigger::rearm`] is called. Without auto loading it never
/// fires and paging is left to the explicit "Load more" button.
#[derive(Debug, Clone)]
pub struct ScrollTrigger {
    armed: bool,
    auto_rearm: bool,
}

impl ScrollTrigger {
    pub fn new(auto_rearm: bool) -> Self {
        Self {
            armed: auto_rearm,
            auto_rearm,
        }
    }

    /// Returns true when more albums should be loaded
    pub fn on_scroll(&mut self, position: ScrollPosition) -> bool {
        if self.armed && position.near_bottom() {
            self.armed = false;
            return true;
        }
        false
    }

    /// Called when a batch finished; arms again only with auto loading on
    pub fn rearm(&mut self) {
        if self.auto_rearm {
            self.armed = true;
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(offset_y: f32) -> ScrollPosition {
        ScrollPosition {
            offset_y,
            viewport_height: 800.0,
            content_height: 2000.0,
        }
    }

    #[test]
    fn test_near_bottom_threshold() {
        assert!(!at(1000.0).near_bottom());
        assert!(!at(1100.0).near_bottom());
        assert!(at(1101.0).near_bottom());
        assert!(at(1200.0).near_bottom());
    }

    #[test]
    fn test_fires_once_per_arming() {
        let mut trigger = ScrollTrigger::new(true);

        assert!(!trigger.on_scroll(at(0.0)));
        assert!(trigger.on_scroll(at(1150.0)));
        assert!(!trigger.on_scroll(at(1200.0)));

        trigger.rearm();
        assert!(trigger.on_scroll(at(1200.0)));
    }

    #[test]
    fn test_never_fires_without_auto_load() {
        let mut trigger = ScrollTrigger::new(false);

        assert!(!trigger.is_armed());
        assert!(!trigger.on_scroll(at(1200.0)));
        trigger.rearm();
        assert!(!trigger.is_armed());
        assert!(!trigger.on_scroll(at(1200.0)));
    }

    #[test]
    fn test_short_content_is_near_bottom() {
        let position = ScrollPosition {
            offset_y: 0.0,
            viewport_height: 800.0,
            content_height: 300.0,
        };
        assert!(position.near_bottom());
    }
}
