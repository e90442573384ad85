//! CLI smoke entry point.
//!
//! # Responsibility
//! - Exercise `cicloo_core` flows end to end without an interactive UI.
//! - Keep output deterministic for a given `--today`.

use chrono::NaiveDate;
use cicloo_core::{
    default_catalog, init_logging, Category, Clock, FixedClock, HabitFields, InMemoryHabitRepository,
    InMemoryProgressionService, InMemoryUserRepository, Priority, ProgressionService, Recurrence,
    SystemClock, UnlockedAchievement, UserId,
};
use clap::{Parser, Subcommand};
use log::info;
use std::error::Error;
use std::process::ExitCode;

/// Cicloo habit progression smoke runner.
#[derive(Parser, Debug)]
#[command(name = "cicloo", version, about, long_about = None)]
struct Cli {
    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true, default_value_t = cicloo_core::default_log_level().to_string())]
    log_level: String,

    /// Absolute directory for rolling log files; logging is off when omitted
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// Calendar date used as "today" (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Seed a demo user and complete every habit once per day
    Demo {
        /// Number of consecutive days to simulate
        #[arg(long, default_value_t = 1)]
        days: u32,
    },
    /// Print the achievement catalog
    Catalog,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        init_logging(&cli.log_level, log_dir)?;
    }

    let today = cli.today.unwrap_or_else(|| SystemClock.today());
    match cli.command.unwrap_or(Command::Demo { days: 1 }) {
        Command::Demo { days } => run_demo(today, days, cli.json),
        Command::Catalog => print_catalog(cli.json),
    }
}

fn run_demo(start: NaiveDate, days: u32, json: bool) -> Result<(), Box<dyn Error>> {
    let clock = FixedClock::new(start);
    let mut service = ProgressionService::new(
        InMemoryHabitRepository::new(),
        InMemoryUserRepository::new(),
        &clock,
    );
    let user_id = seed_demo_user(&mut service)?;
    info!(
        "event=demo_start module=cli status=ok start={} days={}",
        start, days
    );

    for day in 0..days {
        if day > 0 {
            clock.advance_days(1);
        }
        let session = service.enter_session(user_id)?;
        report_unlocks(clock.today(), &session.unlocked, json);

        for habit in service.list_habits(user_id)? {
            let report = service.complete_habit(user_id, habit.id())?;
            report_unlocks(clock.today(), &report.unlocked, json);
        }
    }

    let habits = service.list_habits(user_id)?;
    let user = service.get_user(user_id)?;
    let achievements = service.achievements(user_id)?;
    let stats = service.user_stats(user_id)?;

    if json {
        let summary = serde_json::json!({
            "today": clock.today(),
            "habits": habits,
            "achievements": achievements,
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("habits on {}:", clock.today());
    for habit in &habits {
        println!("  - {habit}");
    }
    println!(
        "achievements ({}/{} unlocked):",
        user.unlocked_achievements().count(),
        achievements.len()
    );
    for achievement in &achievements {
        println!("  {achievement}");
    }
    println!(
        "stats: total_xp={} completions={} completed_this_period={}/{}",
        stats.total_xp, stats.total_completions, stats.completed_this_period, stats.habit_count
    );
    Ok(())
}

fn seed_demo_user<C: Clock>(
    service: &mut InMemoryProgressionService<C>,
) -> Result<UserId, Box<dyn Error>> {
    let user = service.register_user("eric", "eric@email.com")?;
    let seeds = [
        ("Drink 2L of water", Category::Health, Recurrence::Daily, Priority::High),
        ("Read one book chapter", Category::Study, Recurrence::Daily, Priority::Medium),
        ("Work out", Category::Health, Recurrence::Weekly, Priority::High),
        ("Review monthly budget", Category::Finance, Recurrence::Monthly, Priority::Low),
    ];
    for (name, category, recurrence, priority) in seeds {
        service.create_habit(
            user.id,
            HabitFields::new(name, category, recurrence, priority),
        )?;
    }
    Ok(user.id)
}

fn report_unlocks(today: NaiveDate, unlocked: &[UnlockedAchievement], json: bool) {
    // JSON mode prints one document at the end; unlocks are visible there.
    if json {
        return;
    }
    for item in unlocked {
        println!("[{today}] achievement unlocked: {} ({})", item.name, item.description);
    }
}

fn print_catalog(json: bool) -> Result<(), Box<dyn Error>> {
    let catalog = default_catalog();
    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }
    for achievement in &catalog {
        println!("{}: {}", achievement.name(), achievement.description());
    }
    Ok(())
}
