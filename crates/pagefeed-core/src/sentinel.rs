//! Visibility edge detection for the sentinel element.
//!
//! Host observers report the current intersection state on every callback,
//! often repeating the same state. [`IntersectionTracker`] turns that stream
//! into discrete "visible" events, one per not-intersecting → intersecting
//! transition.

/// Edge detector over intersection observations.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntersectionTracker {
    intersecting: bool,
}

impl IntersectionTracker {
    /// Create a tracker in the not-intersecting state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observation. Returns `true` when it is a rising edge.
    pub fn observe(&mut self, intersecting: bool) -> bool {
        let rising = intersecting && !self.intersecting;
        self.intersecting = intersecting;
        rising
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initially_visible_emits_once() {
        let mut tracker = IntersectionTracker::new();
        assert!(tracker.observe(true));
        assert!(!tracker.observe(true));
        assert!(!tracker.observe(true));
    }

    #[test]
    fn test_reentry_emits_again() {
        let mut tracker = IntersectionTracker::new();
        let edges: Vec<bool> = [true, true, false, true]
            .into_iter()
            .map(|seen| tracker.observe(seen))
            .collect();

        assert_eq!(edges, vec![true, false, false, true]);
        assert_eq!(edges.iter().filter(|&&rising| rising).count(), 2);
    }

    #[test]
    fn test_not_intersecting_never_emits() {
        let mut tracker = IntersectionTracker::new();
        assert!(!tracker.observe(false));
        assert!(!tracker.observe(false));
    }
}
