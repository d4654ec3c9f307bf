// Counter animation: eased interpolation from zero to a parsed target value.
// Each run is pure in its start timestamp; ticks are driven by host frame
// events, so a simulated clock exercises the whole lifecycle.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::types::{CounterSettings, ElementId, Timestamp};

/// Display formatting of a counter, derived from its initial text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuffixKind {
    None,
    Percentage,
    Plus,
}

/// Parse a counter element's initial text into target value and suffix.
/// `"95%"` → `(95, Percentage)`, `"50+"` → `(50, Plus)`, `"12"` →
/// `(12, None)`. Anything non-numeric is a [`EngineError::CounterParse`].
pub fn parse_counter_text(text: &str) -> Result<(u32, SuffixKind), EngineError> {
    let trimmed = text.trim();
    let (body, suffix) = if trimmed.contains('%') {
        (trimmed.replace('%', ""), SuffixKind::Percentage)
    } else if trimmed.contains('+') {
        (trimmed.replace('+', ""), SuffixKind::Plus)
    } else {
        (trimmed.to_string(), SuffixKind::None)
    };

    let target = body
        .trim()
        .parse::<u32>()
        .map_err(|_| EngineError::CounterParse {
            text: text.to_string(),
        })?;
    Ok((target, suffix))
}

/// Render a value with its suffix.
pub fn format_value(value: u32, suffix: SuffixKind) -> String {
    match suffix {
        SuffixKind::None => value.to_string(),
        SuffixKind::Percentage => format!("{value}%"),
        SuffixKind::Plus => format!("{value}+"),
    }
}

/// Ease-out quartic: `1 - (1 - t)^4`. Decelerates toward the target.
pub fn ease_out_quart(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}

/// Per-element counter record. `animated` only ever goes false → true.
#[derive(Debug, Clone)]
pub struct CounterSpec {
    pub target: u32,
    pub suffix: SuffixKind,
    pub animated: bool,
}

/// One in-flight counter animation.
#[derive(Debug, Clone)]
pub struct CounterRun {
    pub id: ElementId,
    target: u32,
    suffix: SuffixKind,
    started: Timestamp,
    duration_us: u64,
}

impl CounterRun {
    fn progress(&self, now: Timestamp) -> f32 {
        if self.duration_us == 0 {
            return 1.0;
        }
        let elapsed = now.elapsed_since(self.started);
        (elapsed as f32 / self.duration_us as f32).min(1.0)
    }

    /// Displayed value at `now`, and whether the run has finished. The
    /// final frame reports the exact target, sidestepping floor truncation.
    pub fn value_at(&self, now: Timestamp) -> (u32, bool) {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return (self.target, true);
        }
        let eased = ease_out_quart(progress);
        ((self.target as f64 * eased as f64).floor() as u32, false)
    }

    /// Formatted text at `now`, and whether the run has finished.
    pub fn render_at(&self, now: Timestamp) -> (String, bool) {
        let (value, done) = self.value_at(now);
        (format_value(value, self.suffix), done)
    }
}

/// Owns every counter's spec and the set of in-flight runs.
pub struct CounterBank {
    settings: CounterSettings,
    specs: HashMap<ElementId, CounterSpec>,
    active: Vec<CounterRun>,
}

impl CounterBank {
    pub fn new(settings: CounterSettings) -> Self {
        CounterBank {
            settings,
            specs: HashMap::new(),
            active: Vec::new(),
        }
    }

    /// Parse and store an element's counter spec. A parse failure leaves
    /// the element unregistered (its original text is never touched).
    pub fn register(&mut self, id: ElementId, text: &str) -> Result<(), EngineError> {
        let (target, suffix) = parse_counter_text(text)?;
        self.specs.insert(
            id,
            CounterSpec {
                target,
                suffix,
                animated: false,
            },
        );
        Ok(())
    }

    pub fn spec(&self, id: ElementId) -> Option<&CounterSpec> {
        self.specs.get(&id)
    }

    /// Begin the animation for `id` at `now`. At most once per element:
    /// the `animated` flag is monotonic, so a second start is a no-op.
    /// Returns whether a run was actually enqueued.
    pub fn start(&mut self, id: ElementId, now: Timestamp) -> bool {
        let Some(spec) = self.specs.get_mut(&id) else {
            return false;
        };
        if spec.animated {
            return false;
        }
        spec.animated = true;
        self.active.push(CounterRun {
            id,
            target: spec.target,
            suffix: spec.suffix,
            started: now,
            duration_us: self.settings.duration_us,
        });
        true
    }

    /// Advance every active run to `now`, returning the text each element
    /// should display. Finished runs emit their exact final value and are
    /// retired; later ticks no longer mention them.
    pub fn tick(&mut self, now: Timestamp) -> Vec<(ElementId, String)> {
        let mut out = Vec::with_capacity(self.active.len());
        self.active.retain(|run| {
            let (text, done) = run.render_at(now);
            out.push((run.id, text));
            !done
        });
        out
    }

    pub fn is_animating(&self) -> bool {
        !self.active.is_empty()
    }

    /// Forget `id` entirely, cancelling its run if one is in flight.
    pub fn remove(&mut self, id: ElementId) {
        self.specs.remove(&id);
        self.active.retain(|run| run.id != id);
    }
}
