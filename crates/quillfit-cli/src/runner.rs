//! Foreground tick loop.
//!
//! A current-thread tokio runtime multiplexes the tick interval, stdin
//! lines and Ctrl-C. Everything touching the session runs on that one
//! thread, one callback at a time.

use std::time::Duration;

use quillfit_core::{Config, KvStore, Session};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use crate::common::{flush_notifications, print_event, CliResult};
use crate::shell::{self, Flow};

#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    /// Return once no timer is scheduled.
    pub exit_when_idle: bool,
    /// Treat end of stdin as `quit`.
    pub quit_on_eof: bool,
}

pub fn run<S: KvStore>(session: &mut Session<S>, config: &Config, opts: LoopOptions) -> CliResult {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = rt.block_on(drive(session, config, opts));
    // A pending stdin read would otherwise block runtime shutdown.
    rt.shutdown_background();
    result
}

async fn drive<S: KvStore>(session: &mut Session<S>, config: &Config, opts: LoopOptions) -> CliResult {
    let period = Duration::from_millis(config.timer.tick_interval_ms.max(1));
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        if opts.exit_when_idle && session.is_idle() {
            debug!("no active timers; leaving loop");
            return Ok(());
        }

        tokio::select! {
            _ = ticker.tick() => {
                for event in session.tick() {
                    print_event(&event);
                }
                flush_notifications(session, config);
            }
            line = lines.next_line(), if stdin_open => {
                match line? {
                    Some(line) => match shell::parse(&line) {
                        Ok(command) => {
                            if shell::apply(session, config, command)? == Flow::Quit {
                                return Ok(());
                            }
                        }
                        Err(message) => eprintln!("{message}"),
                    },
                    None => {
                        if opts.quit_on_eof {
                            return Ok(());
                        }
                        stdin_open = false;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                debug!("interrupted");
                return Ok(());
            }
        }
    }
}
