use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "pomodoro-counter")]
#[command(about = "Add pomodoro support to taskwarrior.")]
#[command(long_about = "pomodoro-counter - pomodoro timer for TaskWarrior

Alternates 25-minute work intervals with breaks, recording every finished
interval against a TaskWarrior task in ~/.task/pomodoro/table.db.
Breaks are 5 minutes, except after every fourth work interval, when
they are 25 minutes.

The task is started in TaskWarrior when the session begins and stopped
when it ends. Press Enter to begin each interval; press Ctrl+C to end the
session (the interval in progress is discarded).

EXAMPLES:
  pomodoro-counter --workon 12              Work on task 12
  pomodoro-counter --workon 12 --position 3 Next break will be a long one")]
#[command(version)]
pub struct Cli {
    /// Id of the TaskWarrior task to work on
    #[arg(long = "workon", value_name = "ID")]
    pub workon: u32,

    /// Pomodoro index to start at; determines the length of the next break
    /// (3 = long break)
    #[arg(long = "position", value_name = "N", default_value_t = 0)]
    pub position: u64,
}
