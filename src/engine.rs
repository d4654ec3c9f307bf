// Engine core: routes host events to the reveal watcher, stats trigger,
// counter bank, and effect generators, and collects the resulting DOM
// commands. Pure Rust; all timing comes from event timestamps.

use std::collections::HashSet;

use crate::counter::CounterBank;
use crate::debounce::Debouncer;
use crate::effects::EffectEngine;
use crate::stats::StatsTrigger;
use crate::types::{
    Command, CommandBatch, ElementId, EngineConfig, EventType, InputEvent, PageSnapshot,
    RegisterReport, SignalBatch, ViewportSize,
};
use crate::watcher::{RevealState, RevealWatcher};

/// Orchestrates every polish subsystem over one page.
pub struct Engine {
    reveal: RevealWatcher,
    stats: StatsTrigger,
    counters: CounterBank,
    effects: EffectEngine,
    scroll_settle: Debouncer,
    tilt_cards: HashSet<ElementId>,
    shine_cards: HashSet<ElementId>,
    parallax_layers: Vec<ElementId>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let scroll_settle = Debouncer::new(config.effects.scroll_debounce_us);
        Engine {
            reveal: RevealWatcher::new(config.reveal),
            stats: StatsTrigger::new(config.stats),
            counters: CounterBank::new(config.counter),
            effects: EffectEngine::new(config.effects),
            scroll_settle,
            tilt_cards: HashSet::new(),
            shine_cards: HashSet::new(),
            parallax_layers: Vec::new(),
        }
    }

    /// Register the marked elements JS found on the page. Counter elements
    /// whose text fails to parse are skipped with a warning; their original
    /// text stays untouched and everything else keeps working.
    pub fn register_page(&mut self, snapshot: PageSnapshot) -> RegisterReport {
        let mut report = RegisterReport::default();

        for id in snapshot.reveal_targets {
            self.reveal.observe(id);
        }

        for section in snapshot.stats_sections {
            let mut children = Vec::with_capacity(section.counters.len());
            for counter in section.counters {
                match self.counters.register(counter.id, &counter.text) {
                    Ok(()) => {
                        children.push(counter.id);
                        report.counters_registered += 1;
                    }
                    Err(err) => {
                        report
                            .warnings
                            .push(format!("counter {}: {err}", counter.id.as_u32()));
                    }
                }
            }
            self.stats.register_container(section.container, children);
        }

        self.tilt_cards.extend(snapshot.tilt_cards);
        self.shine_cards.extend(snapshot.shine_cards);
        for layer in snapshot.parallax_layers {
            if !self.parallax_layers.contains(&layer) {
                self.parallax_layers.push(layer);
            }
        }

        report
    }

    /// Process one batch of host events and return the DOM mutations to
    /// apply, in event order.
    pub fn process(&mut self, batch: SignalBatch) -> CommandBatch {
        let mut commands = Vec::new();
        for event in &batch.events {
            self.process_event(event, batch.viewport, &mut commands);
            if self.scroll_settle.fire_due(event.timestamp) {
                commands.push(Command::RefreshBounds);
            }
        }

        CommandBatch {
            commands,
            animating: self.counters.is_animating(),
        }
    }

    fn process_event(
        &mut self,
        event: &InputEvent,
        viewport: ViewportSize,
        out: &mut Vec<Command>,
    ) {
        match &event.event_type {
            EventType::BoundsUpdate { id, rect } => {
                if self.reveal.update(*id, *rect, viewport) {
                    out.push(Command::Reveal { id: *id });
                }
                if let Some(counters) = self.stats.update(*id, *rect, viewport) {
                    for counter in counters {
                        self.counters.start(counter, event.timestamp);
                    }
                }
            }
            EventType::Frame => {
                for (id, text) in self.counters.tick(event.timestamp) {
                    out.push(Command::SetText { id, text });
                }
            }
            EventType::PointerMove { id, position, rect } => {
                out.extend(self.effects.pointer_move(
                    *id,
                    *position,
                    rect,
                    self.tilt_cards.contains(id),
                    self.shine_cards.contains(id),
                ));
            }
            EventType::PointerLeave { id } => {
                if let Some(command) = self
                    .effects
                    .pointer_leave(*id, self.tilt_cards.contains(id))
                {
                    out.push(command);
                }
            }
            EventType::Scroll { offset_y } => {
                out.extend(self.effects.scroll(&self.parallax_layers, *offset_y));
                self.scroll_settle.poke(event.timestamp);
            }
            EventType::AnchorClick { target } => {
                out.push(Command::ScrollIntoView { id: *target });
            }
        }
    }

    /// Drop all state for a removed element, cancelling any in-flight
    /// counter run so no scheduled work dangles.
    pub fn remove_element(&mut self, id: ElementId) {
        self.reveal.unobserve(id);
        self.stats.remove(id);
        self.counters.remove(id);
        self.tilt_cards.remove(&id);
        self.shine_cards.remove(&id);
        self.parallax_layers.retain(|layer| *layer != id);
    }

    /// Counters still in flight; the host should keep frames coming.
    pub fn is_animating(&self) -> bool {
        self.counters.is_animating()
    }

    pub fn reveal_state(&self, id: ElementId) -> Option<RevealState> {
        self.reveal.state(id)
    }
}
