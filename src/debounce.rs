// Trailing-edge debouncer driven by explicit timestamps rather than timers,
// so scroll-settle behavior is deterministic under a simulated clock.

use crate::types::Timestamp;

/// Fires once per burst, after `wait_us` of quiet.
#[derive(Debug, Clone)]
pub struct Debouncer {
    wait_us: u64,
    deadline: Option<Timestamp>,
}

impl Debouncer {
    pub fn new(wait_us: u64) -> Self {
        Debouncer {
            wait_us,
            deadline: None,
        }
    }

    /// Note activity at `now`; restarts the quiet window.
    pub fn poke(&mut self, now: Timestamp) {
        self.deadline = Some(Timestamp::from_micros(now.as_micros() + self.wait_us));
    }

    /// True the first time `now` reaches the pending deadline; the
    /// debouncer then disarms until the next poke.
    pub fn fire_due(&mut self, now: Timestamp) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn us(t: u64) -> Timestamp {
        Timestamp::from_micros(t)
    }

    #[test]
    fn does_not_fire_before_wait() {
        let mut d = Debouncer::new(10_000);
        d.poke(us(0));
        assert!(!d.fire_due(us(5_000)));
        assert!(d.is_pending());
    }

    #[test]
    fn fires_once_after_quiet() {
        let mut d = Debouncer::new(10_000);
        d.poke(us(0));
        assert!(d.fire_due(us(10_000)));
        assert!(!d.fire_due(us(20_000)));
        assert!(!d.is_pending());
    }

    #[test]
    fn pokes_extend_the_window() {
        let mut d = Debouncer::new(10_000);
        d.poke(us(0));
        d.poke(us(8_000));
        assert!(!d.fire_due(us(10_000)));
        assert!(d.fire_due(us(18_000)));
    }

    #[test]
    fn rearms_on_next_burst() {
        let mut d = Debouncer::new(10_000);
        d.poke(us(0));
        assert!(d.fire_due(us(10_000)));
        d.poke(us(50_000));
        assert!(d.fire_due(us(60_000)));
    }

    #[test]
    fn unpoked_never_fires() {
        let mut d = Debouncer::new(10_000);
        assert!(!d.fire_due(us(1_000_000)));
    }
}
