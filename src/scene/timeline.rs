//! Delayed actions driven by the logic clock
//!
//! An entity that wants something to happen later schedules it here instead
//! of on a wall-clock timer. Clearing the timeline cancels everything still
//! pending.

/// Convert a delay in milliseconds to logic ticks (rounded up)
pub fn ms_to_ticks(ms: f32, logic_tick_ms: f32) -> u64 {
    if ms <= 0.0 || logic_tick_ms <= 0.0 {
        return 0;
    }
    (ms / logic_tick_ms).ceil() as u64
}

#[derive(Debug, Clone)]
pub struct Timeline<A> {
    /// Sorted by due tick; equal ticks keep scheduling order
    entries: Vec<(u64, A)>,
}

impl<A> Default for Timeline<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Timeline<A> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Schedule `action` to fire at logic tick `due`
    pub fn schedule(&mut self, due: u64, action: A) {
        let index = self.entries.partition_point(|(t, _)| *t <= due);
        self.entries.insert(index, (due, action));
    }

    /// Pop every action due at or before `now`, in firing order
    pub fn due(&mut self, now: u64) -> Vec<A> {
        let count = self.entries.partition_point(|(t, _)| *t <= now);
        self.entries.drain(..count).map(|(_, a)| a).collect()
    }

    /// Cancel everything pending
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_order() {
        let mut t = Timeline::new();
        t.schedule(10, "c");
        t.schedule(2, "a");
        t.schedule(5, "b");
        t.schedule(5, "b2");

        assert!(t.due(1).is_empty());
        assert_eq!(t.due(5), vec!["a", "b", "b2"]);
        assert_eq!(t.len(), 1);
        assert_eq!(t.due(100), vec!["c"]);
        assert!(t.is_empty());
    }

    #[test]
    fn test_clear_cancels_pending() {
        let mut t = Timeline::new();
        for i in 0..5 {
            t.schedule(i * 10, i);
        }
        t.clear();
        assert!(t.due(u64::MAX).is_empty());
    }

    #[test]
    fn test_ms_to_ticks() {
        assert_eq!(ms_to_ticks(400.0, 5.0), 80);
        assert_eq!(ms_to_ticks(401.0, 5.0), 81);
        assert_eq!(ms_to_ticks(0.0, 5.0), 0);
        assert_eq!(ms_to_ticks(10.0, 0.0), 0);
    }
}
