//! Questlog CLI - gamified habit tracking.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::Level;

use questlog_activity::{ActivityLogger, DegradationService, ReversalCoordinator};
use questlog_core::{ActivityType, StatType, User};
use questlog_progression::{exp, stats};
use questlog_storage::{JsonStore, UserRepository};

#[derive(Parser)]
#[command(name = "questlog")]
#[command(about = "Gamified habit tracking", long_about = None)]
struct Cli {
    /// Data directory
    #[arg(long, default_value = ".questlog")]
    data_dir: std::path::PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log an activity
    Log {
        /// Activity kind (e.g. workoutUpperBody, studySerious)
        activity: String,
        /// Duration in minutes
        minutes: i64,
    },
    /// List logged activities
    List,
    /// Show level, EXP and stats
    Status,
    /// Show what deleting an activity would do
    Preview {
        /// Activity ID
        id: String,
    },
    /// Delete an activity, reversing its effects
    Delete {
        /// Activity ID
        id: String,
    },
    /// Apply any due stat degradation
    Degrade,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();

    let store = Arc::new(JsonStore::new(&cli.data_dir).await?);
    let settings = store.load_settings().await?;

    match cli.command {
        Commands::Log { activity, minutes } => {
            let Some(activity) = parse_loggable(&activity) else {
                eprintln!("Unknown activity '{activity}'. One of:");
                for known in ActivityType::LOGGABLE {
                    eprintln!("  {known}");
                }
                std::process::exit(1);
            };

            let logger = ActivityLogger::new(store.clone(), store.clone());
            let outcome = logger.log_activity(activity, minutes, Utc::now()).await?;

            println!("Logged {} for {} min: {}", activity, minutes, outcome.entry.id);
            println!("  EXP: +{:.1}", outcome.exp_gained);
            for (stat, gain) in &outcome.stat_gains {
                println!("  {}: +{:.3}", stat, gain);
            }
            if outcome.leveled_up {
                println!("  Level up! Now level {}", outcome.new_level);
            }
        }
        Commands::List => {
            use questlog_storage::ActivityRepository;

            let entries = store.find_all().await?;
            println!("Activities ({})", entries.len());
            for entry in entries {
                println!(
                    "  {} | {} | {} min | {:.1} EXP | {}",
                    entry.id,
                    entry.activity_type,
                    entry.duration_minutes,
                    entry.exp_gained,
                    entry.timestamp.format("%Y-%m-%d %H:%M"),
                );
            }
        }
        Commands::Status => {
            let Some(user) = store.get_current_user().await? else {
                println!("No profile yet - log an activity to create one");
                return Ok(());
            };
            print_status(&user)?;
        }
        Commands::Preview { id } => {
            let coordinator = ReversalCoordinator::new(store.clone(), store.clone());
            let preview = coordinator.preview_deletion(&id).await?;

            println!("Deleting {} would:", id);
            println!("  Reverse {:.1} EXP", preview.exp_reversed);
            for (stat, amount) in &preview.stat_reversals {
                println!("  {}: -{:.3}", stat, amount);
            }
            if preview.will_level_down {
                println!(
                    "  Level down to {} ({:.1} EXP)",
                    preview.new_level, preview.new_exp
                );
            }
        }
        Commands::Delete { id } => {
            let coordinator = ReversalCoordinator::new(store.clone(), store.clone());
            let outcome = coordinator.delete_activity(&id).await?;

            println!(
                "Deleted {} ({}), reversed {:.1} EXP",
                outcome.activity.id, outcome.activity.activity_type, outcome.exp_reversed
            );
            if outcome.leveled_down {
                println!("  Leveled down to {}", outcome.new_level);
            }
        }
        Commands::Degrade => {
            let service = DegradationService::new(store.clone());
            let outcome = service.run(Utc::now(), &settings).await?;

            if outcome.is_noop() {
                println!("No degradation due");
            } else {
                for (category, amount) in &outcome.applied {
                    println!("{}: {:.3} to each affected stat", category, amount);
                }
            }
        }
    }

    Ok(())
}

/// Resolve a user-typed activity name, refusing the fallback variant.
fn parse_loggable(input: &str) -> Option<ActivityType> {
    let activity = ActivityType::parse(input);
    ActivityType::LOGGABLE.contains(&activity).then_some(activity)
}

fn print_status(user: &User) -> Result<()> {
    let needed = exp::threshold(user.level)?;
    println!("Level {} ({:.1} / {:.1} EXP)", user.level, user.current_exp, needed);

    let (sanitized, warnings) = stats::validate_stats(&user.stats);
    for warning in &warnings {
        tracing::warn!("stat {} flagged: {:?}", warning.stat, warning.kind);
    }
    println!("Stats (chart max {:.0}):", stats::recommended_chart_max(&sanitized));
    for stat in StatType::ALL {
        let value = sanitized.get(&stat).copied().unwrap_or(1.0);
        println!("  {:<12} {:.3}", stat.to_string(), value);
    }
    Ok(())
}
