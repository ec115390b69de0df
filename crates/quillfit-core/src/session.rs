//! Session context owning every piece of mutable application state.
//!
//! One `Session` corresponds to one open app: the poem timers, the workout
//! timer, the tick schedules driving them, editor text, the rendered saved
//! list, and the notification outbox. The front end calls
//! [`Session::tick`] once per interval and renders the returned events.
//!
//! ## Usage
//!
//! ```ignore
//! let mut session = Session::open(PoemStore::new(SqliteStore::open()?), SessionOptions::default())?;
//! session.start_poem_timer(PoemKind::Haiku);
//! // Once per second:
//! for event in session.tick() { /* render */ }
//! for note in session.take_notifications() { /* show */ }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use crate::error::Result;
use crate::events::Event;
use crate::export::write_export;
use crate::notify::Notification;
use crate::poem::{PoemKind, SavedPoem};
use crate::progress::Progress;
use crate::storage::{KvStore, PoemStore};
use crate::timer::{
    PoemTimer, PoemTimerManager, ScheduleHandle, TickScheduler, WorkoutStart, WorkoutTimer,
};

/// Owner of a repeating tick schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKey {
    Poem(PoemKind),
    Workout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Mark kinds with a non-blank persisted draft completed on open.
    pub restore_from_drafts: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            restore_from_drafts: true,
        }
    }
}

pub struct Session<S> {
    store: PoemStore<S>,
    poems: PoemTimerManager,
    workout: WorkoutTimer,
    scheduler: TickScheduler<TickKey>,
    editors: BTreeMap<PoemKind, String>,
    saved: Vec<SavedPoem>,
    outbox: Vec<Notification>,
}

impl<S: KvStore> Session<S> {
    /// Build a session over `store`, loading drafts and the saved list.
    pub fn open(store: PoemStore<S>, options: SessionOptions) -> Result<Self> {
        let mut session = Self {
            store,
            poems: PoemTimerManager::new(),
            workout: WorkoutTimer::new(),
            scheduler: TickScheduler::new(),
            editors: BTreeMap::new(),
            saved: Vec::new(),
            outbox: Vec::new(),
        };
        for kind in PoemKind::ALL {
            session.load_draft(kind)?;
        }
        session.saved = session.store.list_saved_poems()?;
        if options.restore_from_drafts {
            session.restore_progress();
        }
        Ok(session)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn store(&self) -> &PoemStore<S> {
        &self.store
    }

    pub fn poem_timer(&self, kind: PoemKind) -> &PoemTimer {
        self.poems.get(kind)
    }

    pub fn workout(&self) -> &WorkoutTimer {
        &self.workout
    }

    pub fn scheduler(&self) -> &TickScheduler<TickKey> {
        &self.scheduler
    }

    pub fn editor_text(&self, kind: PoemKind) -> &str {
        self.editors.get(&kind).map(String::as_str).unwrap_or("")
    }

    /// The rendered saved list, newest first.
    pub fn saved_poems(&self) -> &[SavedPoem] {
        &self.saved
    }

    pub fn progress(&self) -> Progress {
        Progress {
            completed: self.poems.completed_count(),
            total: PoemKind::ALL.len(),
        }
    }

    /// True when no timer is scheduled.
    pub fn is_idle(&self) -> bool {
        self.scheduler.is_idle()
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.outbox)
    }

    // ── Poems ────────────────────────────────────────────────────────

    /// Populate the editor for `kind` from its persisted draft, if any.
    pub fn load_draft(&mut self, kind: PoemKind) -> Result<Option<String>> {
        let draft = self.store.get_draft(kind)?.filter(|d| !d.is_empty());
        if let Some(text) = &draft {
            self.editors.insert(kind, text.clone());
        }
        Ok(draft)
    }

    /// Record an edit: the editor text and the persisted draft are both
    /// overwritten, whatever the content.
    pub fn auto_save(&mut self, kind: PoemKind, content: &str) -> Result<()> {
        self.editors.insert(kind, content.to_string());
        self.store.set_draft(kind, content)
    }

    /// (Re)start the two-minute countdown for `kind`.
    pub fn start_poem_timer(&mut self, kind: PoemKind) -> Event {
        let handle = self.scheduler.schedule(TickKey::Poem(kind));
        self.poems.start(kind);
        debug!(%kind, generation = handle.generation(), "poem timer scheduled");
        Event::PoemTimerStarted {
            kind,
            remaining_secs: self.poems.get(kind).remaining_secs(),
            at: Utc::now(),
        }
    }

    /// Append `content` to the saved history.
    ///
    /// Blank content is rejected with a warning notification and no storage
    /// write; this returns `Ok(None)` in that case.
    pub fn save_poem(&mut self, kind: PoemKind, content: &str) -> Result<Option<SavedPoem>> {
        if content.trim().is_empty() {
            self.outbox
                .push(Notification::warning("Please write something before saving!"));
            return Ok(None);
        }
        let poem = SavedPoem::new(kind, content, Utc::now());
        self.store.append_saved_poem(poem.clone())?;
        self.saved = self.store.list_saved_poems()?;
        info!(%kind, chars = content.chars().count(), "poem saved");
        self.outbox.push(Notification::info(format!(
            "{} saved successfully!",
            kind.display_name()
        )));
        Ok(Some(poem))
    }

    /// Save whatever is currently in the editor for `kind`.
    pub fn save_editor(&mut self, kind: PoemKind) -> Result<Option<SavedPoem>> {
        let content = self.editor_text(kind).to_string();
        self.save_poem(kind, &content)
    }

    /// Mark every kind with a non-blank persisted draft completed.
    ///
    /// Goes through the same monotonic path as a natural completion, so
    /// calling it twice never double counts.
    pub fn restore_progress(&mut self) -> Option<Event> {
        let before = self.poems.completed_count();
        for kind in PoemKind::ALL {
            if !self.editor_text(kind).trim().is_empty() {
                self.poems.mark_completed(kind);
            }
        }
        let progress = self.progress();
        (progress.completed != before).then_some(Event::ProgressChanged {
            completed: progress.completed,
            total: progress.total,
        })
    }

    pub fn clear_all_drafts(&mut self) -> Result<()> {
        self.store.clear_all_drafts()?;
        self.outbox.push(Notification::info("All drafts cleared!"));
        Ok(())
    }

    /// Export the saved history to `dir`. `Ok(None)` when there is nothing
    /// to export.
    pub fn export_poems(&mut self, dir: &Path, date: NaiveDate) -> Result<Option<PathBuf>> {
        let poems = self.store.saved_poems_in_order()?;
        let written = write_export(&poems, dir, date)?;
        self.outbox.push(match written {
            Some(_) => Notification::info("Poems exported successfully!"),
            None => Notification::warning("No poems to export!"),
        });
        Ok(written)
    }

    // ── Workout ──────────────────────────────────────────────────────

    pub fn start_workout(&mut self) -> Event {
        match self.workout.start() {
            WorkoutStart::Resumed => Event::WorkoutResumed {
                remaining_secs: self.workout.remaining_secs(),
            },
            WorkoutStart::Started => {
                self.scheduler.schedule(TickKey::Workout);
                debug!("workout scheduled");
                Event::WorkoutStarted {
                    exercise: self.workout.exercise_label().to_string(),
                    at: Utc::now(),
                }
            }
        }
    }

    /// Toggle pause. `None` when the workout is not running.
    pub fn pause_workout(&mut self) -> Option<Event> {
        let paused = self.workout.pause()?;
        let remaining_secs = self.workout.remaining_secs();
        Some(if paused {
            Event::WorkoutPaused { remaining_secs }
        } else {
            Event::WorkoutResumed { remaining_secs }
        })
    }

    pub fn resume_workout(&mut self) -> Option<Event> {
        self.workout.resume().then(|| Event::WorkoutResumed {
            remaining_secs: self.workout.remaining_secs(),
        })
    }

    pub fn reset_workout(&mut self) -> Event {
        self.scheduler.cancel(TickKey::Workout);
        self.workout.reset();
        Event::WorkoutReset { at: Utc::now() }
    }

    /// Start when the start control is enabled, otherwise toggle pause.
    pub fn toggle_workout(&mut self) -> Option<Event> {
        let controls = self.workout.controls();
        if controls.start_enabled {
            Some(self.start_workout())
        } else if controls.pause_enabled {
            self.pause_workout()
        } else {
            None
        }
    }

    // ── Ticks ────────────────────────────────────────────────────────

    /// Fire every active schedule once, in scheduling order.
    pub fn tick(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        for handle in self.scheduler.due() {
            if !self.scheduler.is_current(handle) {
                continue;
            }
            match handle.key() {
                TickKey::Poem(kind) => self.tick_poem(kind, handle, &mut events),
                TickKey::Workout => self.tick_workout(handle, &mut events),
            }
        }
        events
    }

    fn tick_poem(
        &mut self,
        kind: PoemKind,
        handle: ScheduleHandle<TickKey>,
        events: &mut Vec<Event>,
    ) {
        let Some(tick) = self.poems.tick(kind) else {
            self.scheduler.cancel_handle(handle);
            return;
        };
        events.push(Event::PoemTick {
            kind,
            display: tick.display,
            remaining_secs: tick.remaining_secs,
            level: tick.level,
        });

        if let Some(first_completion) = tick.completion {
            self.scheduler.cancel_handle(handle);
            info!(%kind, first_completion, "poem timer completed");
            events.push(Event::PoemCompleted {
                kind,
                first_completion,
                at: Utc::now(),
            });
            if first_completion {
                let progress = self.progress();
                events.push(Event::ProgressChanged {
                    completed: progress.completed,
                    total: progress.total,
                });
            }
            self.outbox.push(Notification::info(format!(
                "{} time's up! Great work!",
                kind.display_name()
            )));
        }
    }

    fn tick_workout(&mut self, handle: ScheduleHandle<TickKey>, events: &mut Vec<Event>) {
        // Paused ticks still fire; they just do nothing.
        let Some(tick) = self.workout.tick() else {
            if !self.workout.is_running() {
                self.scheduler.cancel_handle(handle);
            }
            return;
        };
        events.push(Event::WorkoutTick {
            display: tick.display,
            remaining_secs: tick.remaining_secs,
            exercise_index: self.workout.exercise_index(),
        });
        if let Some(exercise_index) = tick.advanced_to {
            events.push(Event::ExerciseAdvanced {
                exercise_index,
                exercise: self.workout.exercise_label().to_string(),
            });
        }
        if tick.completed {
            self.scheduler.cancel_handle(handle);
            info!("workout completed");
            events.push(Event::WorkoutCompleted { at: Utc::now() });
            self.outbox.push(Notification::success(
                "Amazing work! You completed the 7-minute workout!",
            ));
        }
    }
}
