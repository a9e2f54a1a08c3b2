use clap::{Parser, Subcommand};
use steadfast_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "steadfast-cli", version, about = "Steadfast CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Today's disciplines, wisdom, prompt and lessons
    Today {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Discipline management
    Discipline {
        #[command(subcommand)]
        action: commands::discipline::DisciplineAction,
    },
    /// Journal entries and the daily prompt
    Journal {
        #[command(subcommand)]
        action: commands::journal::JournalAction,
    },
    /// Daily wisdom
    Wisdom {
        #[command(subcommand)]
        action: commands::wisdom::WisdomAction,
    },
    /// Daily lessons and learning progress
    Learn {
        #[command(subcommand)]
        action: commands::learn::LearnAction,
    },
    /// Day-by-day completion history
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Insights and recommendations
    Insights {
        #[command(subcommand)]
        action: commands::insights::InsightsAction,
    },
    /// Growth plan and psychological profile (premium)
    Growth {
        #[command(subcommand)]
        action: commands::growth::GrowthAction,
    },
    /// Subscription tier
    Subscription {
        #[command(subcommand)]
        action: commands::subscription::SubscriptionAction,
    },
    /// User profile and settings
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Activity summary
    Activity {
        #[command(subcommand)]
        action: commands::activity::ActivityAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Log to stderr. STEADFAST_LOG wins over the configured level.
fn init_tracing() {
    let level = Config::load_or_default().logging.level;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("STEADFAST_LOG").unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Today { json } => commands::today::run(json),
        Commands::Discipline { action } => commands::discipline::run(action),
        Commands::Journal { action } => commands::journal::run(action),
        Commands::Wisdom { action } => commands::wisdom::run(action),
        Commands::Learn { action } => commands::learn::run(action),
        Commands::History { action } => commands::history::run(action),
        Commands::Insights { action } => commands::insights::run(action),
        Commands::Growth { action } => commands::growth::run(action),
        Commands::Subscription { action } => commands::subscription::run(action),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Activity { action } => commands::activity::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
