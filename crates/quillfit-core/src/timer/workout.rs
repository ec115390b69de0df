//! Seven-minute workout timer.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//! Running -> Completed
//! (any) -> reset -> Idle
//! ```
//!
//! The countdown runs 420 seconds split into 40-second blocks (30s exercise
//! plus 10s rest). Pausing skips the effect of ticks; it never touches the
//! schedule that delivers them.

use serde::{Deserialize, Serialize};

use super::format_clock;

pub const WORKOUT_DURATION_SECS: u32 = 420;
pub const EXERCISE_BLOCK_SECS: u32 = 40;

pub const EXERCISES: [&str; 12] = [
    "Jumping Jacks",
    "Wall Sit",
    "Push-ups",
    "Abdominal Crunches",
    "Step-ups",
    "Squats",
    "Tricep Dips",
    "Plank",
    "High Knees",
    "Lunges",
    "Push-up & Rotation",
    "Side Plank",
];

pub const READY_LABEL: &str = "Ready to start!";
pub const COMPLETE_LABEL: &str = "Workout Complete! 🎉";
const PAST_LIST_LABEL: &str = "Workout Complete!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutPhase {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Enablement of the start and pause controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub start_enabled: bool,
    pub pause_enabled: bool,
    /// "Pause" or "Resume".
    pub pause_label: &'static str,
}

impl Controls {
    pub const INITIAL: Controls = Controls {
        start_enabled: true,
        pause_enabled: false,
        pause_label: "Pause",
    };

    const RUNNING: Controls = Controls {
        start_enabled: false,
        pause_enabled: true,
        pause_label: "Pause",
    };
}

/// What `start()` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkoutStart {
    /// Fresh countdown; the caller must schedule ticks.
    Started,
    /// Cleared the paused flag; the existing schedule keeps running.
    Resumed,
}

/// Result of one unpaused tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutTick {
    pub display: String,
    pub remaining_secs: u32,
    /// New exercise index when this tick crossed a block boundary.
    pub advanced_to: Option<usize>,
    pub completed: bool,
}

#[derive(Debug, Clone)]
pub struct WorkoutTimer {
    remaining_secs: u32,
    exercise_index: usize,
    paused: bool,
    running: bool,
    completed: bool,
    controls: Controls,
    timer_text: String,
    exercise_label: String,
    highlighted: Option<usize>,
}

impl Default for WorkoutTimer {
    fn default() -> Self {
        Self {
            remaining_secs: WORKOUT_DURATION_SECS,
            exercise_index: 0,
            paused: false,
            running: false,
            completed: false,
            controls: Controls::INITIAL,
            timer_text: format_clock(WORKOUT_DURATION_SECS),
            exercise_label: READY_LABEL.to_string(),
            highlighted: None,
        }
    }
}

impl WorkoutTimer {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> WorkoutPhase {
        if self.running && self.paused {
            WorkoutPhase::Paused
        } else if self.running {
            WorkoutPhase::Running
        } else if self.completed {
            WorkoutPhase::Completed
        } else {
            WorkoutPhase::Idle
        }
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn exercise_index(&self) -> usize {
        self.exercise_index
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn timer_text(&self) -> &str {
        &self.timer_text
    }

    pub fn exercise_label(&self) -> &str {
        &self.exercise_label
    }

    /// Index of the highlighted exercise card, if any.
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> WorkoutStart {
        if self.paused {
            self.resume();
            return WorkoutStart::Resumed;
        }
        self.controls = Controls::RUNNING;
        self.exercise_index = 0;
        self.remaining_secs = WORKOUT_DURATION_SECS;
        self.running = true;
        self.completed = false;
        self.render_exercise();
        WorkoutStart::Started
    }

    /// Toggle the paused flag. Returns the new flag, or `None` when the
    /// workout is not running.
    pub fn pause(&mut self) -> Option<bool> {
        if !self.running {
            return None;
        }
        self.paused = !self.paused;
        self.controls.pause_label = if self.paused { "Resume" } else { "Pause" };
        Some(self.paused)
    }

    /// Clear the paused flag. Returns false when nothing was paused.
    pub fn resume(&mut self) -> bool {
        if !self.paused {
            return false;
        }
        self.paused = false;
        self.controls.pause_label = "Pause";
        true
    }

    /// Advance one second. `None` while idle, completed or paused.
    pub fn tick(&mut self) -> Option<WorkoutTick> {
        if !self.running || self.paused {
            return None;
        }
        let shown = self.remaining_secs;
        self.timer_text = format_clock(shown);

        if shown == 0 {
            self.complete();
            return Some(WorkoutTick {
                display: self.timer_text.clone(),
                remaining_secs: 0,
                advanced_to: None,
                completed: true,
            });
        }

        // Blocks end 40s apart counting from 7:00, i.e. at 380, 340, ..., 20.
        let elapsed = WORKOUT_DURATION_SECS - shown;
        let advanced_to = if elapsed > 0 && elapsed % EXERCISE_BLOCK_SECS == 0 {
            self.exercise_index += 1;
            self.render_exercise();
            Some(self.exercise_index)
        } else {
            None
        };
        self.remaining_secs = shown - 1;

        Some(WorkoutTick {
            display: self.timer_text.clone(),
            remaining_secs: self.remaining_secs,
            advanced_to,
            completed: false,
        })
    }

    /// Return every field to its initial value. Valid from any phase.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn render_exercise(&mut self) {
        self.exercise_label = EXERCISES
            .get(self.exercise_index)
            .copied()
            .unwrap_or(PAST_LIST_LABEL)
            .to_string();
        self.highlighted = (self.exercise_index < EXERCISES.len()).then_some(self.exercise_index);
    }

    fn complete(&mut self) {
        self.running = false;
        self.paused = false;
        self.completed = true;
        self.controls = Controls::INITIAL;
        self.exercise_label = COMPLETE_LABEL.to_string();
        self.highlighted = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(w: &mut WorkoutTimer) -> Vec<WorkoutTick> {
        let mut out = Vec::new();
        while let Some(t) = w.tick() {
            out.push(t);
        }
        out
    }

    #[test]
    fn start_pause_resume() {
        let mut w = WorkoutTimer::new();
        assert_eq!(w.phase(), WorkoutPhase::Idle);
        assert_eq!(w.start(), WorkoutStart::Started);
        assert_eq!(w.phase(), WorkoutPhase::Running);
        assert_eq!(w.exercise_label(), "Jumping Jacks");
        assert_eq!(w.highlighted(), Some(0));

        assert_eq!(w.pause(), Some(true));
        assert_eq!(w.phase(), WorkoutPhase::Paused);
        assert_eq!(w.controls().pause_label, "Resume");

        assert_eq!(w.start(), WorkoutStart::Resumed);
        assert_eq!(w.phase(), WorkoutPhase::Running);
        assert_eq!(w.controls().pause_label, "Pause");
    }

    #[test]
    fn paused_ticks_have_no_effect() {
        let mut w = WorkoutTimer::new();
        w.start();
        w.tick();
        w.pause();
        let before = w.remaining_secs();
        for _ in 0..10 {
            assert!(w.tick().is_none());
        }
        assert_eq!(w.remaining_secs(), before);
    }

    #[test]
    fn pause_is_ignored_when_idle() {
        let mut w = WorkoutTimer::new();
        assert_eq!(w.pause(), None);
        assert!(!w.resume());
        assert_eq!(w.controls(), Controls::INITIAL);
    }

    #[test]
    fn exercise_advances_only_on_block_boundaries() {
        let mut w = WorkoutTimer::new();
        w.start();
        let mut advanced_at = Vec::new();
        loop {
            let shown = w.remaining_secs();
            let Some(t) = w.tick() else { break };
            if t.advanced_to.is_some() {
                advanced_at.push(shown);
            }
        }
        let expected: Vec<u32> = (1..=10).map(|k| 420 - 40 * k).collect();
        assert_eq!(advanced_at, expected);
        assert!(!advanced_at.contains(&420));
    }

    #[test]
    fn full_run_completes_after_421_ticks() {
        let mut w = WorkoutTimer::new();
        w.start();
        let ticks = drain(&mut w);
        assert_eq!(ticks.len(), 421);
        assert_eq!(ticks[0].display, "7:00");
        assert!(ticks.last().unwrap().completed);
        assert_eq!(w.phase(), WorkoutPhase::Completed);
        assert_eq!(w.controls(), Controls::INITIAL);
        assert_eq!(w.exercise_label(), COMPLETE_LABEL);
        assert_eq!(w.highlighted(), None);
        assert_eq!(w.exercise_index(), 10);
    }

    #[test]
    fn reset_from_every_phase() {
        let setups: [fn(&mut WorkoutTimer); 4] = [
            |_| {},
            |w| {
                w.start();
                w.tick();
            },
            |w| {
                w.start();
                w.tick();
                w.pause();
            },
            |w| {
                w.start();
                while w.tick().is_some() {}
            },
        ];
        for setup in setups {
            let mut w = WorkoutTimer::new();
            setup(&mut w);
            w.reset();
            assert_eq!(w.phase(), WorkoutPhase::Idle);
            assert_eq!(w.remaining_secs(), WORKOUT_DURATION_SECS);
            assert_eq!(w.exercise_index(), 0);
            assert_eq!(w.controls(), Controls::INITIAL);
            assert_eq!(w.timer_text(), "7:00");
            assert_eq!(w.exercise_label(), READY_LABEL);
            assert_eq!(w.highlighted(), None);
        }
    }

    #[test]
    fn restart_after_completion_begins_fresh() {
        let mut w = WorkoutTimer::new();
        w.start();
        drain(&mut w);
        assert_eq!(w.start(), WorkoutStart::Started);
        assert_eq!(w.remaining_secs(), WORKOUT_DURATION_SECS);
        assert_eq!(w.exercise_index(), 0);
        assert_eq!(w.phase(), WorkoutPhase::Running);
    }
}
