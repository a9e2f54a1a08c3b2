use clap::Subcommand;
use steadfast_core::calendar::today;

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum ActivityAction {
    /// Activity counts per day
    Stats {
        /// Only one category (discipline, journal, learning, system)
        #[arg(long)]
        category: Option<String>,
        /// Window length in days (default: from config)
        #[arg(long)]
        days: Option<u32>,
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ActivityAction) -> CliResult {
    let app = open_app()?;

    match action {
        ActivityAction::Stats {
            category,
            days,
            json,
        } => {
            let days = days.unwrap_or(app.config().content.activity_window_days);
            let stats = app.activity().stats(category.as_deref(), days, today());
            if json {
                return print_json(&stats);
            }
            println!("Total: {}", stats.total);
            for (date, count) in &stats.by_day {
                println!("  {date}  {count}");
            }
            if let Some(day) = stats.most_active {
                println!("Most active: {day}");
            }
        }
    }
    Ok(())
}
