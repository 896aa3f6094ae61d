use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use ironlog_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ironlog")]
#[command(about = "Local-first workout and diet tracker with XP progression", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show level, XP, streaks and storage usage
    Status,

    /// Log a workout day (every listed exercise is marked completed)
    Workout {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Exercise name (repeatable)
        #[arg(long = "exercise", value_name = "NAME", required = true)]
        exercises: Vec<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Log a diet day
    Diet {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Completed meal (repeatable)
        #[arg(long = "meal", value_name = "NAME", required = true)]
        meals: Vec<String>,

        /// Planned meal that was skipped (repeatable)
        #[arg(long = "skipped", value_name = "NAME")]
        skipped: Vec<String>,
    },

    /// Submit a personal-record attempt
    Pr {
        exercise: String,
        weight: f64,
        reps: u32,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// List achievements
    Achievements {
        /// Include locked achievements
        #[arg(long)]
        all: bool,
    },

    /// Export all data as a JSON backup
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a JSON backup
    Import {
        file: PathBuf,

        /// Merge with existing data instead of replacing it
        #[arg(long)]
        merge: bool,
    },

    /// Delete all stored data
    Reset {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    ironlog_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let mut store = FileStore::open(data_dir.join("store"))?;
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Commands::Status => cmd_status(&mut store, today, &config),
        Commands::Workout {
            date,
            exercises,
            notes,
        } => cmd_workout(&mut store, date.unwrap_or(today), exercises, notes, today, &config),
        Commands::Diet {
            date,
            meals,
            skipped,
        } => cmd_diet(&mut store, date.unwrap_or(today), meals, skipped, today, &config),
        Commands::Pr {
            exercise,
            weight,
            reps,
            date,
        } => cmd_pr(&mut store, exercise, weight, reps, date.unwrap_or(today)),
        Commands::Achievements { all } => cmd_achievements(&mut store, all),
        Commands::Export { output } => cmd_export(&store, output),
        Commands::Import { file, merge } => cmd_import(&mut store, file, merge),
        Commands::Reset { yes } => cmd_reset(&mut store, yes),
    }
}

fn cmd_status(store: &mut FileStore, today: NaiveDate, config: &Config) -> Result<()> {
    let stats = ProgressionEngine::new(store).player_stats();
    let opts = config.streaks.options();

    println!("╭─────────────────────────────────────────╮");
    println!("│  IRONLOG STATUS                          │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  Level {}  ({} XP, {} to next level)",
        stats.current_level, stats.total_xp, stats.xp_to_next_level
    );
    println!(
        "  Workouts: {}   Diet days: {}   PRs: {}",
        stats.total_workouts, stats.total_diet_days, stats.total_prs
    );
    println!(
        "  Streaks  workout: {}  diet: {}  overall: {}",
        calculate_streak(&*store, today, StreakCategory::Workout, &opts),
        calculate_streak(&*store, today, StreakCategory::Diet, &opts),
        calculate_streak(&*store, today, StreakCategory::Overall, &opts),
    );
    println!(
        "  Longest streak: {}   Badges: {}/{}",
        stats.longest_streak,
        stats.badges.len(),
        achievements::catalog().len()
    );

    let summary = backup::storage_summary(&*store);
    println!();
    println!(
        "  Stored: {} workouts, {} diet days, {} records ({} KB)",
        summary.workouts,
        summary.diets,
        summary.records,
        summary.backup_bytes / 1024
    );

    Ok(())
}

fn cmd_workout(
    store: &mut FileStore,
    date: NaiveDate,
    exercises: Vec<String>,
    notes: Option<String>,
    today: NaiveDate,
    config: &Config,
) -> Result<()> {
    let day = WorkoutDay {
        id: uuid::Uuid::new_v4().to_string(),
        date,
        exercises: exercises
            .into_iter()
            .map(|name| Exercise {
                id: uuid::Uuid::new_v4().to_string(),
                name,
                sets: None,
                reps: None,
                weight: None,
                notes: None,
                completed: true,
            })
            .collect(),
        notes,
        duration_minutes: None,
    };
    journal::save_workout_day(store, &day)?;

    let mut events = Vec::new();
    {
        let mut engine = ProgressionEngine::new(store);
        engine.record_workout_completed()?;
        for _ in &day.exercises {
            events.extend(engine.award_xp(XPEventKind::ExerciseComplete, None)?);
        }
        events.extend(engine.award_xp(XPEventKind::WorkoutComplete, None)?);
    }

    println!("✓ Workout logged for {} ({} exercises)", date, day.exercises.len());
    finish_activity(store, today, config, events)
}

fn cmd_diet(
    store: &mut FileStore,
    date: NaiveDate,
    meals: Vec<String>,
    skipped: Vec<String>,
    today: NaiveDate,
    config: &Config,
) -> Result<()> {
    let make_meal = |name: String, completed: bool| Meal {
        id: uuid::Uuid::new_v4().to_string(),
        name,
        calories: None,
        protein: None,
        carbs: None,
        fat: None,
        notes: None,
        completed,
    };

    let day = DietDay {
        id: uuid::Uuid::new_v4().to_string(),
        date,
        meals: meals
            .into_iter()
            .map(|m| make_meal(m, true))
            .chain(skipped.into_iter().map(|m| make_meal(m, false)))
            .collect(),
        notes: None,
    };
    journal::save_diet_day(store, &day)?;

    let compliance = day.compliance();
    let threshold = config.streaks.diet_compliance_threshold;

    let mut events = Vec::new();
    {
        let mut engine = ProgressionEngine::new(store);
        if compliance >= threshold {
            engine.record_diet_day()?;
        }
        if day.is_perfect() {
            events.extend(engine.award_xp(XPEventKind::DietPerfect, None)?);
        }
    }

    println!(
        "✓ Diet logged for {} ({:.0}% compliance{})",
        date,
        compliance * 100.0,
        if compliance >= threshold { "" } else { " - below threshold" }
    );
    finish_activity(store, today, config, events)
}

fn cmd_pr(
    store: &mut FileStore,
    exercise: String,
    weight: f64,
    reps: u32,
    date: NaiveDate,
) -> Result<()> {
    let candidate = PersonalRecord {
        exercise_name: exercise.clone(),
        weight,
        reps,
        date,
    };

    if !records::submit_personal_record(store, &candidate)? {
        let best = records::personal_record(store, &exercise)
            .map(|r| r.weight)
            .unwrap_or(0.0);
        println!("Not a record: current best for {exercise} is {best}");
        return Ok(());
    }

    let mut engine = ProgressionEngine::new(store);
    engine.record_pr()?;
    let events = engine.award_xp(XPEventKind::PrAchieved, None)?;
    let unlocked = engine.check_achievements()?;

    println!("✓ New personal record: {exercise} {weight} x {reps}");
    display_events(&events);
    display_unlocks(&unlocked);
    Ok(())
}

fn cmd_achievements(store: &mut FileStore, all: bool) -> Result<()> {
    let stats = ProgressionEngine::new(store).player_stats();

    println!("Unlocked:");
    for a in achievements::unlocked(&stats) {
        println!(
            "  {} {} [{}] - {}",
            a.icon,
            a.name,
            a.rarity.display_name(),
            a.description
        );
    }

    if all {
        println!();
        println!("Locked:");
        for a in achievements::locked(&stats) {
            println!(
                "  🔒 {} [{}] - {} (+{} XP)",
                a.name,
                a.rarity.display_name(),
                a.description,
                a.xp_reward
            );
        }
    }

    Ok(())
}

fn cmd_export(store: &FileStore, output: Option<PathBuf>) -> Result<()> {
    let json = export_json(store)?;
    match output {
        Some(path) => {
            std::fs::write(&path, &json)?;
            println!("✓ Exported backup to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_import(store: &mut FileStore, file: PathBuf, merge: bool) -> Result<()> {
    let json = std::fs::read_to_string(&file)?;
    let mode = if merge {
        ImportMode::Merge
    } else {
        ImportMode::Replace
    };

    let summary = import_json(store, &json, mode)?;
    println!(
        "✓ Imported {} workouts, {} diet days, {} records",
        summary.workouts, summary.diets, summary.records
    );
    Ok(())
}

fn cmd_reset(store: &mut FileStore, yes: bool) -> Result<()> {
    if !yes {
        println!("This permanently deletes all stored data. Re-run with --yes to confirm.");
        return Ok(());
    }
    backup::reset(store)?;
    println!("✓ All data cleared");
    Ok(())
}

/// Shared tail for activity commands: recompute streaks, then re-check
/// achievements against the updated stats.
fn finish_activity(
    store: &mut FileStore,
    today: NaiveDate,
    config: &Config,
    events: Vec<XPEvent>,
) -> Result<()> {
    let opts = config.streaks.options();
    let overall = calculate_streak(&*store, today, StreakCategory::Overall, &opts);

    let mut engine = ProgressionEngine::new(store);
    engine.update_streaks(overall)?;
    let unlocked = engine.check_achievements()?;
    let stats = engine.player_stats();

    display_events(&events);
    display_unlocks(&unlocked);

    println!(
        "  Level {} · {} XP · overall streak {} days",
        stats.current_level, stats.total_xp, overall
    );
    Ok(())
}

fn display_events(events: &[XPEvent]) {
    for event in events {
        println!("  → {}", event.description);
    }
}

fn display_unlocks(unlocked: &[&'static Achievement]) {
    for a in unlocked {
        println!(
            "  🏅 Achievement unlocked: {} {} (+{} XP)",
            a.icon, a.name, a.xp_reward
        );
    }
}
