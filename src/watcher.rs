// Visibility watcher: one-shot reveal transitions driven by element bounds.
// The host delivers rects; the watcher decides intersection against the
// margin-adjusted viewport box. If bounds never arrive (no observation
// capability on the host), elements simply stay pending.

use std::collections::HashMap;

use crate::types::{ClientRect, ElementId, RevealSettings, RootMargin, ViewportSize};

/// Reveal lifecycle of an observed element. The transition is one-way:
/// once revealed, an element never goes back to pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Pending,
    Revealed,
}

/// Watches a set of elements and reveals each exactly once when it
/// sufficiently enters the viewport.
pub struct RevealWatcher {
    settings: RevealSettings,
    states: HashMap<ElementId, RevealState>,
}

impl RevealWatcher {
    pub fn new(settings: RevealSettings) -> Self {
        RevealWatcher {
            settings,
            states: HashMap::new(),
        }
    }

    /// Add an element to the watch set. Re-observing is a no-op and never
    /// resets a revealed element.
    pub fn observe(&mut self, id: ElementId) {
        self.states.entry(id).or_insert(RevealState::Pending);
    }

    pub fn unobserve(&mut self, id: ElementId) {
        self.states.remove(&id);
    }

    pub fn state(&self, id: ElementId) -> Option<RevealState> {
        self.states.get(&id).copied()
    }

    pub fn observed_count(&self) -> usize {
        self.states.len()
    }

    /// Feed fresh bounds for an element. Returns `true` only on the
    /// pending → revealed transition; repeated intersection toggling after
    /// that returns `false`. Unobserved ids are ignored.
    pub fn update(&mut self, id: ElementId, rect: ClientRect, viewport: ViewportSize) -> bool {
        let Some(state) = self.states.get_mut(&id) else {
            return false;
        };
        if *state == RevealState::Revealed {
            return false;
        }

        let ratio = intersection_ratio(&rect, viewport, &self.settings.root_margin);
        if ratio >= self.settings.threshold {
            *state = RevealState::Revealed;
            true
        } else {
            false
        }
    }
}

/// Fraction of the element's area inside the margin-adjusted viewport box,
/// in `[0, 1]`. Zero-area elements never intersect.
pub fn intersection_ratio(rect: &ClientRect, viewport: ViewportSize, margin: &RootMargin) -> f32 {
    let area = rect.area();
    if area <= 0.0 {
        return 0.0;
    }

    // Positive margins push the box edges outward, negative pull them in.
    let box_left = -margin.left;
    let box_top = -margin.top;
    let box_right = viewport.width + margin.right;
    let box_bottom = viewport.height + margin.bottom;

    let overlap_w = (rect.x + rect.width).min(box_right) - rect.x.max(box_left);
    let overlap_h = (rect.y + rect.height).min(box_bottom) - rect.y.max(box_top);
    if overlap_w <= 0.0 || overlap_h <= 0.0 {
        return 0.0;
    }

    (overlap_w * overlap_h / area).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> ViewportSize {
        ViewportSize::new(1000.0, 800.0)
    }

    fn watcher() -> RevealWatcher {
        RevealWatcher::new(RevealSettings {
            threshold: 0.1,
            root_margin: RootMargin::ZERO,
        })
    }

    #[test]
    fn fully_visible_ratio_is_one() {
        let rect = ClientRect::new(100.0, 100.0, 200.0, 100.0);
        let ratio = intersection_ratio(&rect, viewport(), &RootMargin::ZERO);
        assert!((ratio - 1.0).abs() < 1e-6);
    }

    #[test]
    fn half_visible_ratio() {
        // Bottom half hangs below the viewport.
        let rect = ClientRect::new(0.0, 750.0, 100.0, 100.0);
        let ratio = intersection_ratio(&rect, viewport(), &RootMargin::ZERO);
        assert!((ratio - 0.5).abs() < 1e-6);
    }

    #[test]
    fn negative_bottom_margin_shrinks_box() {
        // Element sits in the bottom 50px strip; with the strip excluded it
        // no longer intersects.
        let rect = ClientRect::new(0.0, 760.0, 100.0, 40.0);
        let full = intersection_ratio(&rect, viewport(), &RootMargin::ZERO);
        assert!(full > 0.9);
        let shrunk = RootMargin {
            bottom: -50.0,
            ..RootMargin::ZERO
        };
        assert_eq!(intersection_ratio(&rect, viewport(), &shrunk), 0.0);
    }

    #[test]
    fn zero_area_never_intersects() {
        let rect = ClientRect::new(100.0, 100.0, 0.0, 50.0);
        assert_eq!(intersection_ratio(&rect, viewport(), &RootMargin::ZERO), 0.0);
    }

    #[test]
    fn reveals_exactly_once_under_toggling() {
        let mut w = watcher();
        let id = ElementId::new(1);
        w.observe(id);

        let visible = ClientRect::new(0.0, 100.0, 100.0, 100.0);
        let offscreen = ClientRect::new(0.0, 2000.0, 100.0, 100.0);

        assert!(w.update(id, visible, viewport()));
        assert_eq!(w.state(id), Some(RevealState::Revealed));

        // Leave and re-enter: no second transition, no un-reveal.
        assert!(!w.update(id, offscreen, viewport()));
        assert_eq!(w.state(id), Some(RevealState::Revealed));
        assert!(!w.update(id, visible, viewport()));
        assert_eq!(w.state(id), Some(RevealState::Revealed));
    }

    #[test]
    fn below_threshold_stays_pending() {
        let mut w = watcher();
        let id = ElementId::new(2);
        w.observe(id);

        // 5% visible, threshold is 10%.
        let rect = ClientRect::new(0.0, 795.0, 100.0, 100.0);
        assert!(!w.update(id, rect, viewport()));
        assert_eq!(w.state(id), Some(RevealState::Pending));
    }

    #[test]
    fn never_intersecting_element_stays_pending() {
        let mut w = watcher();
        let id = ElementId::new(3);
        w.observe(id);
        for step in 0..20 {
            let rect = ClientRect::new(0.0, 2000.0 + step as f32, 100.0, 100.0);
            assert!(!w.update(id, rect, viewport()));
        }
        assert_eq!(w.state(id), Some(RevealState::Pending));
    }

    #[test]
    fn unobserved_ids_are_ignored() {
        let mut w = watcher();
        let rect = ClientRect::new(0.0, 0.0, 100.0, 100.0);
        assert!(!w.update(ElementId::new(9), rect, viewport()));
        assert_eq!(w.state(ElementId::new(9)), None);
    }

    #[test]
    fn reobserve_does_not_reset_revealed() {
        let mut w = watcher();
        let id = ElementId::new(4);
        w.observe(id);
        let visible = ClientRect::new(0.0, 0.0, 100.0, 100.0);
        assert!(w.update(id, visible, viewport()));
        w.observe(id);
        assert_eq!(w.observed_count(), 1);
        assert_eq!(w.state(id), Some(RevealState::Revealed));
        assert!(!w.update(id, visible, viewport()));
    }
}
