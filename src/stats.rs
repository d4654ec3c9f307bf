// Stats-section trigger: a dedicated watcher per container that fires once,
// hands its counter children to the animator, and permanently stops
// watching. Containers are keyed by identity, so several independent stats
// sections on one page each get their own one-shot.

use std::collections::HashMap;

use crate::types::{ClientRect, ElementId, RootMargin, StatsSettings, ViewportSize};
use crate::watcher::intersection_ratio;

struct Section {
    counters: Vec<ElementId>,
    fired: bool,
}

/// One-shot per-container trigger for counter animation.
pub struct StatsTrigger {
    settings: StatsSettings,
    sections: HashMap<ElementId, Section>,
}

impl StatsTrigger {
    pub fn new(settings: StatsSettings) -> Self {
        StatsTrigger {
            settings,
            sections: HashMap::new(),
        }
    }

    /// Register a stats container and its counter children. Re-registering
    /// an already-known container is a no-op and never re-arms it.
    pub fn register_container(&mut self, container: ElementId, counters: Vec<ElementId>) {
        self.sections.entry(container).or_insert(Section {
            counters,
            fired: false,
        });
    }

    /// Whether the container is registered and still armed.
    pub fn is_watching(&self, container: ElementId) -> bool {
        self.sections
            .get(&container)
            .map(|s| !s.fired)
            .unwrap_or(false)
    }

    /// Feed fresh bounds for a container. On the first crossing of the
    /// threshold, returns its counter elements and disarms the container
    /// for good; every later call returns `None`. Unknown containers are
    /// silently ignored.
    pub fn update(
        &mut self,
        container: ElementId,
        rect: ClientRect,
        viewport: ViewportSize,
    ) -> Option<Vec<ElementId>> {
        let section = self.sections.get_mut(&container)?;
        if section.fired {
            return None;
        }

        let ratio = intersection_ratio(&rect, viewport, &RootMargin::ZERO);
        if ratio < self.settings.threshold {
            return None;
        }

        section.fired = true;
        Some(section.counters.clone())
    }

    /// Drop a removed element: either a whole container, or one counter
    /// from every section it appears in.
    pub fn remove(&mut self, id: ElementId) {
        self.sections.remove(&id);
        for section in self.sections.values_mut() {
            section.counters.retain(|c| *c != id);
        }
    }
}
