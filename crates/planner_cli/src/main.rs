//! Planner command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the store once.
//! - Dispatch one subcommand to `PlannerService` and print the result.

mod cli;
mod render;

use clap::Parser;
use cli::{to_index, Cli, Command, SettingsCommand};
use log::error;
use planner_core::db::open_db;
use planner_core::{
    init_logging_from_config, DateKey, EditOutcome, PlannerConfig, PlannerService, ServiceError,
    SettingsPatch, SqliteKeyValueStore, TaskListError,
};
use std::error::Error;
use std::process::ExitCode;

type CliResult<T> = Result<T, Box<dyn Error>>;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let mut config = PlannerConfig::from_env()?;
    if let Some(level) = cli.log_level.as_deref() {
        config = config.with_log_level(level)?;
    }
    if let Some(db) = cli.db.clone() {
        config.db_path = db;
    }
    // Logging is best-effort; the planner works without it.
    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("Warning: logging disabled: {err}");
    }

    let conn = open_db(&config.db_path)?;
    let kv = SqliteKeyValueStore::try_new(&conn)?;
    let mut planner = PlannerService::open(kv)?;
    let today = DateKey::today();

    match cli.command {
        Command::List => println!("{}", render::task_list(planner.tasks(), today)),
        Command::Add { text } => match planner.add_task(&text.join(" "))? {
            Some(index) => println!(
                "Added #{}.\n{}",
                index + 1,
                render::progress(planner.progress_percent())
            ),
            None => println!("Nothing to add."),
        },
        Command::Toggle { position } => {
            let index = to_index(position);
            let report = planner
                .toggle_task(index, today)
                .map_err(|err| positional_error(position, err))?;
            let text = planner
                .tasks()
                .get(index)
                .map(|task| task.text.clone())
                .unwrap_or_default();
            println!(
                "{}",
                render::toggle(&report, &text, &planner.streak(), &planner.settings())
            );
        }
        Command::Edit { position, text } => {
            match planner
                .edit_task(to_index(position), &text.join(" "))
                .map_err(|err| positional_error(position, err))?
            {
                EditOutcome::Updated => println!("Updated #{position}."),
                EditOutcome::Removed(_) => println!("Removed #{position} (empty text)."),
            }
            println!("{}", render::progress(planner.progress_percent()));
        }
        Command::Remove { position } => {
            let removed = planner
                .remove_task(to_index(position))
                .map_err(|err| positional_error(position, err))?;
            println!(
                "Removed: {}\n{}",
                removed.text,
                render::progress(planner.progress_percent())
            );
        }
        Command::Progress => println!("{}", render::progress(planner.progress_percent())),
        Command::Streak => println!("{}", render::streak(&planner.streak())),
        Command::Quote => println!("{}", render::quote(&planner.quote_for(today)?)),
        Command::ResetDay => {
            let reset = planner.reset_day(today)?;
            println!(
                "Reopened {reset} task(s) completed today.\n{}",
                render::progress(planner.progress_percent())
            );
        }
        Command::Settings(SettingsCommand::Show) => {
            println!("{}", render::settings(&planner.settings()))
        }
        Command::Settings(SettingsCommand::Set(args)) => {
            let patch = SettingsPatch::from(&args);
            let settings = if patch.is_empty() {
                println!("Nothing to change.");
                planner.settings()
            } else {
                planner.update_settings(&patch)?
            };
            println!("{}", render::settings(&settings));
        }
        Command::Settings(SettingsCommand::Reset) => {
            let settings = planner.reset_settings()?;
            println!("{}", render::settings(&settings));
        }
    }

    Ok(())
}

/// Reports a missing task with the 1-based position the user typed.
fn positional_error(position: u64, err: ServiceError) -> Box<dyn Error> {
    match err {
        ServiceError::Task(TaskListError::NotFound { len, .. }) => {
            format!("no task #{position}; the list has {len} task(s)").into()
        }
        other => Box::new(other),
    }
}
