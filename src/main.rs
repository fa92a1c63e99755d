use clap::Parser;
use colored::Colorize;

use pomodoro_counter::cli::args::Cli;
use pomodoro_counter::cli::commands;
use pomodoro_counter::config::Config;
use pomodoro_counter::error::PomodoroError;
use pomodoro_counter::logging;
use pomodoro_counter::notify::SayNotifier;
use pomodoro_counter::pomodoro::{install_interrupt_handler, CancellationToken, LineAcknowledger};
use pomodoro_counter::tasks::TaskWarriorClient;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), PomodoroError> {
    let cli = Cli::parse();
    logging::init(logging::DEFAULT_LEVEL);

    let config = Config::load()?;
    let client = TaskWarriorClient::new();

    let token = CancellationToken::new();
    install_interrupt_handler(token.clone())?;

    commands::workon(
        &client,
        &config,
        cli.workon,
        cli.position,
        LineAcknowledger::stdin(),
        SayNotifier::default(),
        token,
    )
}
