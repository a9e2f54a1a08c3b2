use clap::Subcommand;
use serde::Serialize;
use steadfast_core::calendar::{date_string, day_names, today, weekday_index};

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Days on which every scheduled discipline was done
    Show {
        /// Number of days back from today (default: 14)
        #[arg(long, default_value = "14")]
        days: u32,
        #[arg(long)]
        json: bool,
    },
    /// Consecutive fully completed days ending today
    Streak,
}

#[derive(Serialize)]
struct DayRow {
    date: String,
    completed: bool,
}

pub fn run(action: HistoryAction) -> CliResult {
    let app = open_app()?;
    let today = today();

    match action {
        HistoryAction::Show { days, json } => {
            let days = app.history().window(today, days);
            if json {
                let rows: Vec<DayRow> = days
                    .into_iter()
                    .map(|(date, completed)| DayRow {
                        date: date_string(date),
                        completed,
                    })
                    .collect();
                return print_json(&rows);
            }
            for (date, completed) in days {
                let name = day_names(&[weekday_index(date)])?.join("");
                let mark = if completed { "x" } else { " " };
                println!("{} {name} [{mark}]", date_string(date));
            }
        }
        HistoryAction::Streak => {
            println!("{}", app.history().streak_count(today));
        }
    }
    Ok(())
}
