use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::poem::PoemKind;
use crate::timer::VisualLevel;

/// Every state change in a session produces an Event.
/// The front end renders them; notifications travel separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    PoemTimerStarted {
        kind: PoemKind,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    PoemTick {
        kind: PoemKind,
        display: String,
        remaining_secs: u32,
        level: VisualLevel,
    },
    PoemCompleted {
        kind: PoemKind,
        /// False when the kind had already been completed this session.
        first_completion: bool,
        at: DateTime<Utc>,
    },
    ProgressChanged {
        completed: usize,
        total: usize,
    },
    WorkoutStarted {
        exercise: String,
        at: DateTime<Utc>,
    },
    WorkoutTick {
        display: String,
        remaining_secs: u32,
        exercise_index: usize,
    },
    ExerciseAdvanced {
        exercise_index: usize,
        exercise: String,
    },
    WorkoutPaused {
        remaining_secs: u32,
    },
    WorkoutResumed {
        remaining_secs: u32,
    },
    WorkoutCompleted {
        at: DateTime<Utc>,
    },
    WorkoutReset {
        at: DateTime<Utc>,
    },
}
