//! Per-kind two-minute poem countdowns.
//!
//! Each tick renders the current remaining time, then decrements it. The
//! tick that renders `0:00` finishes the countdown, so a full run is
//! `POEM_DURATION_SECS + 1` ticks.
//!
//! ```text
//! Idle -> Running -> Idle (completed = true, monotonic)
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::format_clock;
use crate::poem::PoemKind;

pub const POEM_DURATION_SECS: u32 = 120;
pub const WARNING_THRESHOLD_SECS: u32 = 60;
pub const DANGER_THRESHOLD_SECS: u32 = 30;

/// Visual urgency of a running countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualLevel {
    Normal,
    Warning,
    Danger,
}

impl VisualLevel {
    /// Nearest threshold wins: danger replaces warning.
    pub fn for_remaining(secs: u32) -> Self {
        if secs <= DANGER_THRESHOLD_SECS {
            VisualLevel::Danger
        } else if secs <= WARNING_THRESHOLD_SECS {
            VisualLevel::Warning
        } else {
            VisualLevel::Normal
        }
    }
}

/// Result of one countdown tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoemTick {
    /// Rendered `m:ss` for the value shown this tick.
    pub display: String,
    pub remaining_secs: u32,
    pub level: VisualLevel,
    /// `Some(first)` when this tick finished the countdown; `first` is false
    /// if the kind was already completed earlier in the session.
    pub completion: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoemTimer {
    kind: PoemKind,
    remaining_secs: u32,
    running: bool,
    completed: bool,
    level: VisualLevel,
    display: String,
}

impl PoemTimer {
    pub fn new(kind: PoemKind) -> Self {
        Self {
            kind,
            remaining_secs: POEM_DURATION_SECS,
            running: false,
            completed: false,
            level: VisualLevel::Normal,
            display: format_clock(POEM_DURATION_SECS),
        }
    }

    pub fn kind(&self) -> PoemKind {
        self.kind
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn level(&self) -> VisualLevel {
        self.level
    }

    /// Last rendered clock text.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Restart the countdown from the top. Completion is kept.
    pub fn start(&mut self) {
        self.remaining_secs = POEM_DURATION_SECS;
        self.running = true;
        self.level = VisualLevel::for_remaining(POEM_DURATION_SECS);
    }

    /// Advance one second. Returns `None` when the timer is not running.
    pub fn tick(&mut self) -> Option<PoemTick> {
        if !self.running {
            return None;
        }
        let shown = self.remaining_secs;
        self.display = format_clock(shown);
        self.level = VisualLevel::for_remaining(shown);

        let completion = if shown == 0 {
            self.running = false;
            self.level = VisualLevel::Normal;
            Some(self.mark_completed())
        } else {
            self.remaining_secs = shown - 1;
            None
        };

        Some(PoemTick {
            display: self.display.clone(),
            remaining_secs: self.remaining_secs,
            level: self.level,
            completion,
        })
    }

    /// Flag the kind completed. Returns true only on the first call.
    pub fn mark_completed(&mut self) -> bool {
        let first = !self.completed;
        self.completed = true;
        first
    }
}

/// Owns one [`PoemTimer`] per kind.
#[derive(Debug, Clone)]
pub struct PoemTimerManager {
    timers: BTreeMap<PoemKind, PoemTimer>,
}

impl Default for PoemTimerManager {
    fn default() -> Self {
        Self {
            timers: PoemKind::ALL
                .into_iter()
                .map(|k| (k, PoemTimer::new(k)))
                .collect(),
        }
    }
}

impl PoemTimerManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: PoemKind) -> &PoemTimer {
        // Every kind is inserted at construction.
        &self.timers[&kind]
    }

    fn get_mut(&mut self, kind: PoemKind) -> &mut PoemTimer {
        self.timers
            .entry(kind)
            .or_insert_with(|| PoemTimer::new(kind))
    }

    pub fn start(&mut self, kind: PoemKind) {
        self.get_mut(kind).start();
    }

    pub fn tick(&mut self, kind: PoemKind) -> Option<PoemTick> {
        self.get_mut(kind).tick()
    }

    pub fn mark_completed(&mut self, kind: PoemKind) -> bool {
        self.get_mut(kind).mark_completed()
    }

    pub fn completed_count(&self) -> usize {
        self.timers.values().filter(|t| t.is_completed()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run_to_completion(timer: &mut PoemTimer) -> Vec<PoemTick> {
        let mut ticks = Vec::new();
        while let Some(t) = timer.tick() {
            ticks.push(t);
        }
        ticks
    }

    #[test]
    fn idle_timer_does_not_tick() {
        let mut t = PoemTimer::new(PoemKind::Haiku);
        assert!(t.tick().is_none());
        assert_eq!(t.display(), "2:00");
    }

    #[test]
    fn full_countdown_takes_121_ticks() {
        let mut t = PoemTimer::new(PoemKind::Sonnet);
        t.start();
        let ticks = run_to_completion(&mut t);
        assert_eq!(ticks.len(), 121);
        assert_eq!(ticks[0].display, "2:00");
        assert_eq!(ticks[1].display, "1:59");
        assert_eq!(ticks[119].display, "0:01");
        assert_eq!(ticks[120].display, "0:00");
        assert_eq!(ticks[120].completion, Some(true));
        assert!(ticks[..120].iter().all(|t| t.completion.is_none()));
        assert!(!t.is_running());
        assert!(t.is_completed());
        assert_eq!(t.level(), VisualLevel::Normal);
    }

    #[test]
    fn second_completion_is_not_first() {
        let mut t = PoemTimer::new(PoemKind::Limerick);
        t.start();
        run_to_completion(&mut t);
        t.start();
        assert!(t.is_completed(), "restart must not un-complete");
        let ticks = run_to_completion(&mut t);
        assert_eq!(ticks.last().unwrap().completion, Some(false));
    }

    #[test]
    fn levels_follow_nearest_threshold() {
        assert_eq!(VisualLevel::for_remaining(120), VisualLevel::Normal);
        assert_eq!(VisualLevel::for_remaining(61), VisualLevel::Normal);
        assert_eq!(VisualLevel::for_remaining(60), VisualLevel::Warning);
        assert_eq!(VisualLevel::for_remaining(31), VisualLevel::Warning);
        assert_eq!(VisualLevel::for_remaining(30), VisualLevel::Danger);
        assert_eq!(VisualLevel::for_remaining(0), VisualLevel::Danger);
    }

    #[test]
    fn restart_mid_countdown_resets_level() {
        let mut t = PoemTimer::new(PoemKind::Acrostic);
        t.start();
        for _ in 0..100 {
            t.tick();
        }
        assert_eq!(t.level(), VisualLevel::Danger);
        t.start();
        assert_eq!(t.remaining_secs(), POEM_DURATION_SECS);
        assert_eq!(t.level(), VisualLevel::Normal);
    }

    #[test]
    fn manager_counts_completed_kinds() {
        let mut m = PoemTimerManager::new();
        assert_eq!(m.completed_count(), 0);
        assert!(m.mark_completed(PoemKind::Haiku));
        assert!(!m.mark_completed(PoemKind::Haiku));
        assert!(m.mark_completed(PoemKind::Sonnet));
        assert_eq!(m.completed_count(), 2);
    }

    proptest! {
        #[test]
        fn remaining_stays_in_range(steps in 0usize..200) {
            let mut t = PoemTimer::new(PoemKind::Freeverse);
            t.start();
            for _ in 0..steps {
                t.tick();
                prop_assert!(t.remaining_secs() <= POEM_DURATION_SECS);
            }
        }
    }
}
