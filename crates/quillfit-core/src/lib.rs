//! # Quillfit Core Library
//!
//! This library provides the core logic for Quillfit: two-minute poem
//! writing timers and a seven-minute workout timer, backed by a local
//! key-value store. The CLI is a thin shell over the same library.
//!
//! ## Architecture
//!
//! - **Timers**: tick-driven state machines; the caller fires one tick per
//!   second and the timers never spawn threads
//! - **Scheduler**: per-key repeating tick handles, so restarting a timer
//!   replaces its schedule instead of stacking a second one
//! - **Storage**: drafts and saved poems over a [`KvStore`] (SQLite or
//!   in-memory), TOML configuration
//! - **Session**: the context object owning all mutable state
//!
//! ## Key Components
//!
//! - [`Session`]: entry point for every user operation
//! - [`PoemTimer`] / [`WorkoutTimer`]: the two countdowns
//! - [`PoemStore`]: persistence gateway for drafts and saved poems
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod export;
pub mod notify;
pub mod poem;
pub mod progress;
pub mod session;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use notify::{Notification, NotificationLevel};
pub use poem::{PoemKind, SavedPoem};
pub use progress::Progress;
pub use session::{Session, SessionOptions, TickKey};
pub use storage::{Config, KvStore, MemoryStore, PoemStore, SqliteStore};
pub use timer::{PoemTimer, TickScheduler, VisualLevel, WorkoutPhase, WorkoutTimer};
