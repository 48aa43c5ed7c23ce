mod logging;
mod notifier;
mod summary;
mod tui;

use std::path::PathBuf;
use std::thread;
use std::time::Duration as StdDuration;

use anyhow::Result;
use chrono::{Datelike, Local};
use clap::Parser;
use tracing::{debug, info};
use macrobudget_core::{
    parse_day, parse_field, AppConfig, Field, FileStore, MacroTracker, Permission,
    ReminderScheduler,
};

use crate::logging::LogTarget;
use crate::notifier::{NotifyMode, TerminalNotifier};

// Upper bound on one sleep in `remind --watch`, so clock changes are noticed.
const WATCH_MAX_SLEEP_SECS: i64 = 60;

#[derive(Parser)]
#[command(name = "macrobudget")]
#[command(about = "Weekly macro budget tracker", long_about = None)]
struct Cli {
    /// Directory holding the budget and weekly entry records
    #[arg(long, global = true, env = "MACROBUDGET_DIR")]
    data_dir: Option<PathBuf>,

    /// Local hour (0-23) after which an empty day triggers a reminder
    #[arg(long, global = true, env = "MACROBUDGET_REMINDER_HOUR")]
    reminder_hour: Option<u32>,

    /// Never ask for or show reminders
    #[arg(long, global = true)]
    no_reminders: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Show or change the daily macro budget
    Budget {
        #[command(subcommand)]
        action: Option<BudgetAction>,
    },
    /// Log a value for one day (usage: log mon carbs 250, log today fat "")
    Log {
        /// Weekday name, abbreviation or "today"
        day: String,
        /// calories, carbs, protein or fat (unique prefixes work)
        field: String,
        /// Whole number, or "" to clear
        value: String,
    },
    /// Show the week with suggested values for empty days
    Summary,
    /// Reset the budget and all seven days
    Clear,
    /// Remind if today has nothing logged
    Remind {
        /// Keep running and remind every day at the reminder hour
        #[arg(long)]
        watch: bool,
    },
    /// Open the Terminal User Interface
    Tui,
}

#[derive(clap::Subcommand)]
enum BudgetAction {
    /// Print the daily and weekly budget
    Show,
    /// Set one or more macros in grams (empty clears)
    Set {
        #[arg(long)]
        carbs: Option<String>,
        #[arg(long)]
        protein: Option<String>,
        #[arg(long)]
        fat: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::resolve(cli.data_dir, cli.reminder_hour, !cli.no_reminders)?;
    let store = FileStore::new(Some(config.data_dir.clone()))?;

    // Default behavior if no command provided: open the TUI
    let command = cli.command.unwrap_or(Commands::Tui);
    let target = match command {
        Commands::Tui => LogTarget::File(config.log_file()),
        _ => LogTarget::Stderr,
    };
    logging::init(target)?;
    debug!(data_dir = %config.data_dir.display(), reminder_hour = config.reminder_hour, "starting");

    run_command(command, &config, store)
}

fn run_command(command: Commands, config: &AppConfig, store: FileStore) -> Result<()> {
    let mut tracker = MacroTracker::open(store);

    match command {
        Commands::Budget { action } => match action.unwrap_or(BudgetAction::Show) {
            BudgetAction::Show => summary::print_budget(&tracker.summary()),
            BudgetAction::Set { carbs, protein, fat } => {
                let supplied = [(Field::Carbs, &carbs), (Field::Protein, &protein), (Field::Fat, &fat)];
                let updates: Vec<(Field, &str)> = supplied
                    .into_iter()
                    .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
                    .collect();
                if updates.is_empty() {
                    println!("Nothing to set. Use --carbs, --protein or --fat.");
                    return Ok(());
                }
                tracker.set_budget_fields(&updates)?;
                summary::print_budget(&tracker.summary());
            }
        },
        Commands::Log { day, field, value } => {
            let today = Local::now().weekday();
            let day = parse_day(&day, today)?;
            let field = parse_field(&field)?;
            tracker.set_entry_field(day, field, &value)?;

            let summary = tracker.summary();
            summary::print_day(&summary, day);
        }
        Commands::Summary => summary::print_week(&tracker.summary()),
        Commands::Clear => {
            tracker.clear_all();
            println!("Cleared the daily budget and all seven days.");
        }
        Commands::Remind { .. } if !config.reminders_enabled => {
            println!("Reminders are disabled.");
        }
        Commands::Remind { watch } => {
            let notifier = TerminalNotifier::new(NotifyMode::Print, config.reminders_enabled);
            let mut scheduler = ReminderScheduler::new(notifier, config.reminder_hour);
            if watch {
                watch_reminders(&mut tracker, &mut scheduler)?;
            } else if !scheduler.check_and_notify(Local::now().naive_local(), tracker.entries()) {
                if scheduler.permission() == Some(Permission::Granted) {
                    println!("Today is logged. Nothing to remind.");
                } else {
                    println!("Reminders are not available in this terminal.");
                }
            }
        }
        Commands::Tui => tui::run(config, tracker)?,
    }
    Ok(())
}

fn watch_reminders(
    tracker: &mut MacroTracker<FileStore>,
    scheduler: &mut ReminderScheduler<TerminalNotifier>,
) -> Result<()> {
    scheduler.arm(Local::now().naive_local(), tracker.entries());
    let Some(first) = scheduler.next_deadline() else {
        println!("Reminders are not available in this terminal.");
        return Ok(());
    };
    println!("Watching for empty days. Next check at {}. Ctrl-C to stop.", first);

    loop {
        let now = Local::now().naive_local();
        // Entries may be edited from another process between checks.
        tracker.reload();
        if scheduler.poll(now, tracker.entries()) {
            info!(next = ?scheduler.next_deadline(), "daily reminder check ran");
        }

        let Some(deadline) = scheduler.next_deadline() else {
            return Ok(());
        };
        let wait = (deadline - now).num_seconds().clamp(1, WATCH_MAX_SLEEP_SECS);
        thread::sleep(StdDuration::from_secs(wait as u64));
    }
}
