// Strong typing over strings. Newtypes for timestamps and element identity,
// serde types for the JS-facing wire model (config, signals, commands).

use serde::{Deserialize, Serialize};

/// Timestamp in microseconds. Newtype for type safety.
///
/// The engine never reads a clock; every timed operation takes one of these,
/// so behavior is deterministic under a simulated clock in tests. The JS
/// plumbing passes `performance.now()` through [`Timestamp::from_millis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn from_micros(us: u64) -> Self {
        Timestamp(us)
    }

    /// Convert from a `performance.now()`-style millisecond reading.
    pub fn from_millis(ms: f64) -> Self {
        Timestamp((ms.max(0.0) * 1000.0) as u64)
    }

    pub fn as_micros(&self) -> u64 {
        self.0
    }

    pub fn as_millis(&self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// Microseconds elapsed since `earlier`, saturating at zero.
    pub fn elapsed_since(&self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// Host-assigned identity of a tracked DOM element. Newtype for type safety.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct ElementId(u32);

impl ElementId {
    pub fn new(id: u32) -> Self {
        ElementId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

/// Bounding rectangle in viewport-relative CSS pixels
/// (`getBoundingClientRect` coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ClientRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ClientRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        ClientRect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn center(&self) -> ClientCoord {
        ClientCoord {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }
}

/// A point in viewport-relative CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ClientCoord {
    pub x: f32,
    pub y: f32,
}

impl ClientCoord {
    pub fn new(x: f32, y: f32) -> Self {
        ClientCoord { x, y }
    }
}

/// Size of the visual viewport in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl ViewportSize {
    pub fn new(width: f32, height: f32) -> Self {
        ViewportSize { width, height }
    }
}

/// Per-edge adjustment of the effective viewport box used for intersection
/// tests, in CSS pixels. Positive grows the box outward on that edge,
/// negative shrinks it (CSS `rootMargin` semantics).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RootMargin {
    #[serde(default)]
    pub top: f32,
    #[serde(default)]
    pub right: f32,
    #[serde(default)]
    pub bottom: f32,
    #[serde(default)]
    pub left: f32,
}

impl RootMargin {
    pub const ZERO: RootMargin = RootMargin {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };
}

impl Default for RootMargin {
    fn default() -> Self {
        RootMargin::ZERO
    }
}

/// Engine configuration passed from JS.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub reveal: RevealSettings,
    #[serde(default)]
    pub stats: StatsSettings,
    #[serde(default)]
    pub counter: CounterSettings,
    #[serde(default)]
    pub effects: EffectSettings,
}

/// Reveal watcher policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealSettings {
    /// Fraction of element area that must be visible to count as
    /// intersecting.
    #[serde(default = "default_reveal_threshold")]
    pub threshold: f32,
    /// Viewport-box adjustment. The default shrinks the bottom edge by 50px
    /// so elements reveal only once they are properly past the fold.
    #[serde(default = "default_reveal_margin")]
    pub root_margin: RootMargin,
}

impl Default for RevealSettings {
    fn default() -> Self {
        RevealSettings {
            threshold: default_reveal_threshold(),
            root_margin: default_reveal_margin(),
        }
    }
}

fn default_reveal_threshold() -> f32 {
    0.1
}

fn default_reveal_margin() -> RootMargin {
    RootMargin {
        bottom: -50.0,
        ..RootMargin::ZERO
    }
}

/// Stats-section trigger policy. No root margin; the container must be
/// clearly in view before the counters run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSettings {
    #[serde(default = "default_stats_threshold")]
    pub threshold: f32,
}

impl Default for StatsSettings {
    fn default() -> Self {
        StatsSettings {
            threshold: default_stats_threshold(),
        }
    }
}

fn default_stats_threshold() -> f32 {
    0.3
}

/// Counter animation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterSettings {
    /// Duration of one counter run in microseconds.
    #[serde(default = "default_counter_duration")]
    pub duration_us: u64,
}

impl Default for CounterSettings {
    fn default() -> Self {
        CounterSettings {
            duration_us: default_counter_duration(),
        }
    }
}

fn default_counter_duration() -> u64 {
    2_000_000 // 2s
}

/// Pointer/scroll effect settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectSettings {
    /// Enable 3D tilt on project cards.
    #[serde(default = "default_true")]
    pub tilt: bool,
    /// Enable shine-position variables on glass cards.
    #[serde(default = "default_true")]
    pub shine: bool,
    /// Background layer moves at this fraction of the scroll offset.
    #[serde(default = "default_parallax_factor")]
    pub parallax_factor: f32,
    /// Pixels of pointer offset per degree of card tilt.
    #[serde(default = "default_tilt_divisor")]
    pub tilt_divisor: f32,
    /// Upward translation applied to a tilted card.
    #[serde(default = "default_tilt_lift")]
    pub tilt_lift_px: f32,
    /// Quiet window before a scroll burst counts as settled.
    #[serde(default = "default_scroll_debounce")]
    pub scroll_debounce_us: u64,
}

impl Default for EffectSettings {
    fn default() -> Self {
        EffectSettings {
            tilt: default_true(),
            shine: default_true(),
            parallax_factor: default_parallax_factor(),
            tilt_divisor: default_tilt_divisor(),
            tilt_lift_px: default_tilt_lift(),
            scroll_debounce_us: default_scroll_debounce(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_parallax_factor() -> f32 {
    0.3
}

fn default_tilt_divisor() -> f32 {
    20.0
}

fn default_tilt_lift() -> f32 {
    8.0
}

fn default_scroll_debounce() -> u64 {
    10_000 // 10ms
}

/// Registration batch: the marked elements JS found on the page.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PageSnapshot {
    /// Elements carrying the fade-in marker.
    #[serde(default)]
    pub reveal_targets: Vec<ElementId>,
    /// Stats containers with their numeric-display children.
    #[serde(default)]
    pub stats_sections: Vec<StatsSection>,
    /// Cards that tilt toward the pointer.
    #[serde(default)]
    pub tilt_cards: Vec<ElementId>,
    /// Cards that track the pointer with a shine highlight.
    #[serde(default)]
    pub shine_cards: Vec<ElementId>,
    /// Background layers that move with scroll.
    #[serde(default)]
    pub parallax_layers: Vec<ElementId>,
}

/// One stats container and its counter elements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSection {
    pub container: ElementId,
    #[serde(default)]
    pub counters: Vec<CounterElement>,
}

/// A numeric-display element with its initial text (e.g. `"95%"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterElement {
    pub id: ElementId,
    pub text: String,
}

/// Outcome of [`PageSnapshot`] registration. Unparsable counters become
/// warnings; the rest of the page keeps working.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RegisterReport {
    pub counters_registered: usize,
    pub warnings: Vec<String>,
}

/// Batch of input signals from JS (minimizes JS↔WASM crossings).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalBatch {
    pub viewport: ViewportSize,
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

/// Single host event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputEvent {
    pub timestamp: Timestamp,
    pub event_type: EventType,
}

/// Type of host event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventType {
    /// Fresh bounding rect for a tracked element (load, scroll, resize).
    BoundsUpdate { id: ElementId, rect: ClientRect },
    /// Animation frame tick; drives counter interpolation.
    Frame,
    /// Pointer moved over a tracked card. Position is viewport-relative.
    PointerMove {
        id: ElementId,
        position: ClientCoord,
        rect: ClientRect,
    },
    /// Pointer left a tracked card.
    PointerLeave { id: ElementId },
    /// Document scrolled to this vertical offset.
    Scroll { offset_y: f32 },
    /// An in-page anchor link pointing at `target` was activated.
    AnchorClick { target: ElementId },
}

/// A DOM mutation for the JS plumbing to apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd")]
pub enum Command {
    /// Add the persistent revealed visual-state tag.
    Reveal { id: ElementId },
    /// Replace the element's displayed text.
    SetText { id: ElementId, text: String },
    /// Tilt a card toward the pointer (degrees) and lift it (pixels).
    SetTilt {
        id: ElementId,
        rotate_x_deg: f32,
        rotate_y_deg: f32,
        lift_px: f32,
    },
    /// Return a card to its resting transform.
    ResetTilt { id: ElementId },
    /// Card-local pointer position for the shine CSS variables.
    SetShine { id: ElementId, x: f32, y: f32 },
    /// Vertical parallax translation for a background layer.
    SetParallax { id: ElementId, offset_y: f32 },
    /// Smooth-scroll the page so `id` is at the top of the viewport.
    ScrollIntoView { id: ElementId },
    /// Scrolling settled; re-measure tracked elements and send fresh
    /// `BoundsUpdate` events.
    RefreshBounds,
}

/// Result of processing one signal batch.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CommandBatch {
    pub commands: Vec<Command>,
    /// Counters are still in flight; keep frame callbacks coming.
    pub animating: bool,
}
