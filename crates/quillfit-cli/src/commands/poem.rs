use std::io::Read;
use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;
use quillfit_core::{Config, PoemKind};

use crate::common::{flush_notifications, open_session, print_event, print_saved_list, CliResult};
use crate::runner::{self, LoopOptions};
use crate::shell::export_dir;

#[derive(Subcommand)]
pub enum PoemAction {
    /// Run the 2-minute timer for a poem kind in the foreground
    Start {
        /// sonnet, haiku, limerick, acrostic or freeverse
        kind: PoemKind,
    },
    /// Save a poem (reads stdin when no content is given)
    Save {
        kind: PoemKind,
        content: Option<String>,
    },
    /// Print or replace the draft for a poem kind
    Draft {
        kind: PoemKind,
        /// Overwrite the draft with this text
        #[arg(long)]
        set: Option<String>,
    },
    /// List saved poems, newest first
    List {
        #[arg(long)]
        json: bool,
    },
    /// Export saved poems to my-poems-YYYY-MM-DD.json
    Export {
        /// Output directory (defaults to export.directory, then the current dir)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Remove every stored draft
    ClearDrafts,
    /// Show how many poem kinds are completed
    Progress {
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: PoemAction) -> CliResult {
    let config = Config::load()?;
    let mut session = open_session(&config)?;

    match action {
        PoemAction::Start { kind } => {
            print_event(&session.start_poem_timer(kind));
            runner::run(
                &mut session,
                &config,
                LoopOptions {
                    exit_when_idle: true,
                    quit_on_eof: false,
                },
            )?;
        }
        PoemAction::Save { kind, content } => {
            let content = match content {
                Some(content) => content,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            if let Some(poem) = session.save_poem(kind, &content)? {
                println!("{}", serde_json::to_string_pretty(&poem)?);
            }
        }
        PoemAction::Draft { kind, set } => match set {
            Some(text) => session.auto_save(kind, &text)?,
            None => println!("{}", session.editor_text(kind)),
        },
        PoemAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(session.saved_poems())?);
            } else {
                print_saved_list(session.saved_poems());
            }
        }
        PoemAction::Export { dir } => {
            let dir = dir.unwrap_or_else(|| export_dir(&config));
            if let Some(path) = session.export_poems(&dir, Utc::now().date_naive())? {
                println!("wrote {}", path.display());
            }
        }
        PoemAction::ClearDrafts => session.clear_all_drafts()?,
        PoemAction::Progress { json } => {
            let progress = session.progress();
            if json {
                println!("{}", serde_json::to_string_pretty(&progress)?);
            } else {
                println!("{} ({:.0}%)", progress.label(), progress.percent());
                for kind in PoemKind::ALL {
                    let mark = if session.poem_timer(kind).is_completed() { 'x' } else { ' ' };
                    println!("  [{mark}] {kind}");
                }
            }
        }
    }

    flush_notifications(&mut session, &config);
    Ok(())
}
