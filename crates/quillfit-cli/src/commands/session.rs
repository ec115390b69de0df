use quillfit_core::Config;

use crate::common::{flush_notifications, open_session, CliResult};
use crate::runner::{self, LoopOptions};
use crate::shell::HELP;

pub fn run() -> CliResult {
    let config = Config::load()?;
    let mut session = open_session(&config)?;

    println!("{}", session.progress().label());
    println!("{HELP}");
    flush_notifications(&mut session, &config);

    runner::run(
        &mut session,
        &config,
        LoopOptions {
            exit_when_idle: false,
            quit_on_eof: true,
        },
    )
}
