//! Repeating once-per-second schedules keyed by owner.
//!
//! The scheduler does not own a clock. The front end fires one tick per
//! interval and asks [`TickScheduler::due`] which schedules to dispatch.
//! Each key holds at most one schedule; scheduling a key again cancels the
//! old handle first, so a key can never receive duplicate ticks.

/// Handle to one scheduled repeating tick.
///
/// The generation makes handles unique: a handle from a cancelled schedule
/// never matches the schedule that replaced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleHandle<K> {
    key: K,
    generation: u64,
}

impl<K: Copy> ScheduleHandle<K> {
    pub fn key(&self) -> K {
        self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone)]
pub struct TickScheduler<K> {
    /// Active schedules in the order they were created.
    active: Vec<ScheduleHandle<K>>,
    next_generation: u64,
}

impl<K> Default for TickScheduler<K> {
    fn default() -> Self {
        Self {
            active: Vec::new(),
            next_generation: 1,
        }
    }
}

impl<K: Copy + Eq> TickScheduler<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a repeating tick for `key`, replacing any existing one.
    pub fn schedule(&mut self, key: K) -> ScheduleHandle<K> {
        self.cancel(key);
        let handle = ScheduleHandle {
            key,
            generation: self.next_generation,
        };
        self.next_generation += 1;
        self.active.push(handle);
        handle
    }

    /// Cancel whatever schedule `key` holds. Returns false if none was active.
    pub fn cancel(&mut self, key: K) -> bool {
        let before = self.active.len();
        self.active.retain(|h| h.key != key);
        self.active.len() != before
    }

    /// Cancel only if `handle` is still the live schedule for its key.
    pub fn cancel_handle(&mut self, handle: ScheduleHandle<K>) -> bool {
        let before = self.active.len();
        self.active.retain(|h| *h != handle);
        self.active.len() != before
    }

    pub fn is_active(&self, key: K) -> bool {
        self.active.iter().any(|h| h.key == key)
    }

    /// Whether `handle` has not been cancelled or replaced.
    pub fn is_current(&self, handle: ScheduleHandle<K>) -> bool {
        self.active.contains(&handle)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    /// Snapshot of schedules to fire for one tick, in scheduling order.
    ///
    /// Callers should skip handles for which [`is_current`](Self::is_current)
    /// turns false while dispatching earlier ones.
    pub fn due(&self) -> Vec<ScheduleHandle<K>> {
        self.active.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rescheduling_replaces_handle() {
        let mut s = TickScheduler::new();
        let first = s.schedule('a');
        let second = s.schedule('a');
        assert_ne!(first, second);
        assert_eq!(s.active_count(), 1);
        assert!(!s.is_current(first));
        assert!(s.is_current(second));
    }

    #[test]
    fn stale_handle_cannot_cancel_replacement() {
        let mut s = TickScheduler::new();
        let stale = s.schedule('a');
        let live = s.schedule('a');
        assert!(!s.cancel_handle(stale));
        assert!(s.is_current(live));
        assert!(s.cancel_handle(live));
        assert!(s.is_idle());
    }

    #[test]
    fn due_preserves_scheduling_order() {
        let mut s = TickScheduler::new();
        s.schedule('a');
        s.schedule('b');
        s.schedule('c');
        // Restarting 'a' moves it to the back.
        s.schedule('a');
        let keys: Vec<char> = s.due().iter().map(|h| h.key()).collect();
        assert_eq!(keys, vec!['b', 'c', 'a']);
    }

    #[test]
    fn cancel_unknown_key_is_noop() {
        let mut s: TickScheduler<u8> = TickScheduler::new();
        assert!(!s.cancel(7));
        assert!(s.is_idle());
    }

    proptest! {
        #[test]
        fn at_most_one_schedule_per_key(keys in proptest::collection::vec(0u8..5, 0..64)) {
            let mut s = TickScheduler::new();
            for k in &keys {
                s.schedule(*k);
            }
            for k in 0u8..5 {
                let n = s.due().iter().filter(|h| h.key() == k).count();
                prop_assert_eq!(n, usize::from(keys.contains(&k)));
            }
        }
    }
}
