mod poem;
mod scheduler;
mod workout;

pub use poem::{
    PoemTick, PoemTimer, PoemTimerManager, VisualLevel, DANGER_THRESHOLD_SECS,
    POEM_DURATION_SECS, WARNING_THRESHOLD_SECS,
};
pub use scheduler::{ScheduleHandle, TickScheduler};
pub use workout::{
    Controls, WorkoutPhase, WorkoutStart, WorkoutTick, WorkoutTimer, COMPLETE_LABEL,
    EXERCISES, EXERCISE_BLOCK_SECS, READY_LABEL, WORKOUT_DURATION_SECS,
};

/// Render whole seconds as `m:ss`.
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::format_clock;

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(120), "2:00");
        assert_eq!(format_clock(119), "1:59");
        assert_eq!(format_clock(420), "7:00");
        assert_eq!(format_clock(5), "0:05");
        assert_eq!(format_clock(0), "0:00");
    }
}
