use quillfit_core::{
    Config, Event, KvStore, Notification, PoemStore, SavedPoem, Session, SessionOptions,
    SqliteStore, VisualLevel,
};

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Open the on-disk store and build a session honouring `config`.
pub fn open_session(config: &Config) -> CliResult<Session<SqliteStore>> {
    let store = PoemStore::new(SqliteStore::open()?);
    let options = SessionOptions {
        restore_from_drafts: config.progress.restore_from_drafts,
    };
    Ok(Session::open(store, options)?)
}

/// Print and clear queued notifications.
pub fn flush_notifications<S: KvStore>(session: &mut Session<S>, config: &Config) {
    let notes = session.take_notifications();
    if config.notifications.enabled {
        print_notifications(&notes);
    }
}

pub fn print_notifications(notes: &[Notification]) {
    for note in notes {
        println!("{note}");
    }
}

/// One-line rendering of an event, or `None` for events not worth a line.
pub fn render_event(event: &Event) -> Option<String> {
    match event {
        Event::PoemTimerStarted { kind, .. } => {
            Some(format!("{} timer started", kind.display_name()))
        }
        Event::PoemTick {
            kind,
            display,
            level,
            ..
        } => {
            let marker = match level {
                VisualLevel::Normal => "",
                VisualLevel::Warning => " !",
                VisualLevel::Danger => " !!",
            };
            Some(format!("{:<9} {display}{marker}", kind.as_str()))
        }
        Event::PoemCompleted { kind, .. } => Some(format!("{} completed", kind.display_name())),
        Event::ProgressChanged { completed, total } => {
            Some(format!("Complete {completed}/{total} poems"))
        }
        Event::WorkoutStarted { exercise, .. } => Some(format!("workout started: {exercise}")),
        Event::WorkoutTick { display, .. } => Some(format!("workout   {display}")),
        Event::ExerciseAdvanced { exercise, .. } => Some(format!("next up: {exercise}")),
        Event::WorkoutPaused { .. } => Some("workout paused".into()),
        Event::WorkoutResumed { .. } => Some("workout resumed".into()),
        Event::WorkoutReset { .. } => Some("workout reset".into()),
        Event::WorkoutCompleted { .. } => None,
    }
}

pub fn print_event(event: &Event) {
    if let Some(line) = render_event(event) {
        println!("{line}");
    }
}

pub fn print_saved_list(poems: &[SavedPoem]) {
    if poems.is_empty() {
        println!("No saved poems yet. Start writing!");
        return;
    }
    for poem in poems {
        println!(
            "{}  {}",
            poem.kind.display_name(),
            poem.date.with_timezone(&chrono::Local).format("%Y-%m-%d")
        );
        for line in poem.content.lines() {
            println!("    {line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quillfit_core::PoemKind;

    #[test]
    fn poem_ticks_show_level_markers() {
        let tick = |remaining: u32, level| Event::PoemTick {
            kind: PoemKind::Haiku,
            display: quillfit_core::timer::format_clock(remaining),
            remaining_secs: remaining,
            level,
        };
        assert_eq!(
            render_event(&tick(90, VisualLevel::Normal)).unwrap(),
            "haiku     1:30"
        );
        assert_eq!(
            render_event(&tick(45, VisualLevel::Warning)).unwrap(),
            "haiku     0:45 !"
        );
        assert_eq!(
            render_event(&tick(10, VisualLevel::Danger)).unwrap(),
            "haiku     0:10 !!"
        );
    }
}
