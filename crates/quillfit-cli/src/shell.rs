//! Line commands understood by the foreground loops.
//!
//! The same grammar drives `session`, `workout` and `poem start`; a bare
//! Enter toggles the workout like the space bar did on the original page.

use std::path::PathBuf;

use chrono::Utc;
use quillfit_core::{Config, KvStore, PoemKind, Session};

use crate::common::{flush_notifications, print_event, print_saved_list, CliResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkoutCommand {
    Start,
    Pause,
    Resume,
    Reset,
    Toggle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Start(PoemKind),
    /// Replace the editor text.
    Write(PoemKind, String),
    /// Add a line to the editor text.
    Append(PoemKind, String),
    Show(PoemKind),
    Save(PoemKind),
    List,
    Progress,
    Workout(WorkoutCommand),
    Export,
    ClearDrafts,
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub const HELP: &str = "\
commands:
  start <kind>            start the 2-minute timer for a poem kind
  write <kind> <text>     replace the draft for a kind
  append <kind> <text>    add a line to the draft
  show <kind>             print the current draft
  save <kind>             save the current draft
  list                    list saved poems, newest first
  progress                show completed poem count
  workout start|pause|resume|reset|toggle
  p / r / <enter>         workout pause / reset / toggle
  export                  export saved poems to JSON
  clear-drafts            remove every stored draft
  help, quit
kinds: sonnet haiku limerick acrostic freeverse";

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.char_indices().find(|(_, c)| c.is_whitespace()) {
        Some((i, c)) => (&s[..i], &s[i + c.len_utf8()..]),
        None => (s, ""),
    }
}

fn kind_arg(rest: &str) -> Result<(PoemKind, &str), String> {
    let (word, rest) = split_word(rest);
    if word.is_empty() {
        return Err("missing poem kind".into());
    }
    let kind = word.parse::<PoemKind>().map_err(|e| e.to_string())?;
    Ok((kind, rest))
}

pub fn parse(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(ShellCommand::Workout(WorkoutCommand::Toggle));
    }
    let (word, rest) = split_word(line);
    let cmd = match word.to_ascii_lowercase().as_str() {
        "start" => ShellCommand::Start(kind_arg(rest)?.0),
        "write" => {
            let (kind, text) = kind_arg(rest)?;
            ShellCommand::Write(kind, text.to_string())
        }
        "append" => {
            let (kind, text) = kind_arg(rest)?;
            ShellCommand::Append(kind, text.to_string())
        }
        "show" => ShellCommand::Show(kind_arg(rest)?.0),
        "save" => ShellCommand::Save(kind_arg(rest)?.0),
        "list" => ShellCommand::List,
        "progress" => ShellCommand::Progress,
        "export" => ShellCommand::Export,
        "clear-drafts" => ShellCommand::ClearDrafts,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        "p" => ShellCommand::Workout(WorkoutCommand::Pause),
        "r" => ShellCommand::Workout(WorkoutCommand::Reset),
        "workout" => {
            let (sub, _) = split_word(rest);
            ShellCommand::Workout(match sub.to_ascii_lowercase().as_str() {
                "start" => WorkoutCommand::Start,
                "pause" => WorkoutCommand::Pause,
                "resume" => WorkoutCommand::Resume,
                "reset" => WorkoutCommand::Reset,
                "toggle" | "" => WorkoutCommand::Toggle,
                other => return Err(format!("unknown workout command '{other}'")),
            })
        }
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(cmd)
}

/// Run one command against the session and print its outcome.
pub fn apply<S: KvStore>(
    session: &mut Session<S>,
    config: &Config,
    command: ShellCommand,
) -> CliResult<Flow> {
    match command {
        ShellCommand::Start(kind) => print_event(&session.start_poem_timer(kind)),
        ShellCommand::Write(kind, text) => session.auto_save(kind, &text)?,
        ShellCommand::Append(kind, line) => {
            let mut text = session.editor_text(kind).to_string();
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(&line);
            session.auto_save(kind, &text)?;
        }
        ShellCommand::Show(kind) => println!("{}", session.editor_text(kind)),
        ShellCommand::Save(kind) => {
            session.save_editor(kind)?;
        }
        ShellCommand::List => print_saved_list(session.saved_poems()),
        ShellCommand::Progress => println!("{}", session.progress().label()),
        ShellCommand::Workout(cmd) => {
            let event = match cmd {
                WorkoutCommand::Start => Some(session.start_workout()),
                WorkoutCommand::Pause => session.pause_workout(),
                WorkoutCommand::Resume => session.resume_workout(),
                WorkoutCommand::Reset => Some(session.reset_workout()),
                WorkoutCommand::Toggle => session.toggle_workout(),
            };
            if let Some(event) = event {
                print_event(&event);
            }
        }
        ShellCommand::Export => {
            let dir = export_dir(config);
            if let Some(path) = session.export_poems(&dir, Utc::now().date_naive())? {
                println!("wrote {}", path.display());
            }
        }
        ShellCommand::ClearDrafts => session.clear_all_drafts()?,
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    flush_notifications(session, config);
    Ok(Flow::Continue)
}

pub fn export_dir(config: &Config) -> PathBuf {
    config
        .export
        .directory
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}
