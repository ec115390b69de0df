use quillfit_core::{timer::EXERCISES, Config};

use crate::common::{open_session, print_event, CliResult};
use crate::runner::{self, LoopOptions};

pub fn run() -> CliResult {
    let config = Config::load()?;
    let mut session = open_session(&config)?;

    println!("7-minute workout: 30s exercise + 10s rest per block");
    for (i, name) in EXERCISES.iter().enumerate() {
        println!("  {:>2}. {name}", i + 1);
    }
    println!("p = pause/resume, r = reset, q = quit");

    print_event(&session.start_workout());
    runner::run(
        &mut session,
        &config,
        LoopOptions {
            exit_when_idle: true,
            quit_on_eof: false,
        },
    )
}
