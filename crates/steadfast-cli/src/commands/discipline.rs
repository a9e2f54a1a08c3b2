//! Discipline management commands for CLI.

use clap::Subcommand;
use std::collections::BTreeSet;
use steadfast_core::calendar::{day_names, now};
use steadfast_core::{DisciplineCategory, DisciplinePatch, Frequency, NewDiscipline, ToggleOutcome};

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum DisciplineAction {
    /// List disciplines
    List {
        /// Filter by category (physical, mental, ...)
        #[arg(long)]
        category: Option<DisciplineCategory>,
        /// Only those scheduled today
        #[arg(long)]
        today: bool,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a discipline
    Add {
        /// Discipline name
        name: String,
        /// Frequency: daily, weekly or custom (default: daily)
        #[arg(long, default_value = "daily")]
        frequency: Frequency,
        /// Comma-separated weekday indices, 0=Sun..6=Sat
        #[arg(long)]
        days: Option<String>,
        /// Category (default: other)
        #[arg(long, default_value = "other")]
        category: DisciplineCategory,
        #[arg(long)]
        description: Option<String>,
        /// Minutes per session
        #[arg(long)]
        duration: Option<u32>,
        /// Reminder time as HH:MM
        #[arg(long)]
        reminder: Option<String>,
    },
    /// Edit a discipline
    Edit {
        /// Discipline ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        frequency: Option<Frequency>,
        /// Comma-separated weekday indices, 0=Sun..6=Sat
        #[arg(long)]
        days: Option<String>,
        #[arg(long)]
        category: Option<DisciplineCategory>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        duration: Option<u32>,
        #[arg(long)]
        reminder: Option<String>,
    },
    /// Delete a discipline
    Delete {
        /// Discipline ID
        id: String,
    },
    /// Mark a discipline done (or not done with --undo) for today
    Toggle {
        /// Discipline ID
        id: String,
        #[arg(long)]
        undo: bool,
    },
    /// Show the streak for a discipline
    Streak {
        /// Discipline ID
        id: String,
    },
}

fn parse_days(days: &str) -> Result<BTreeSet<u8>, Box<dyn std::error::Error>> {
    let mut set = BTreeSet::new();
    for d in days.split(',').map(str::trim).filter(|d| !d.is_empty()) {
        let index = d
            .parse::<u8>()
            .map_err(|_| format!("invalid weekday index: {d}"))?;
        set.insert(index);
    }
    Ok(set)
}

pub fn run(action: DisciplineAction) -> CliResult {
    let mut app = open_app()?;
    let now = now();

    match action {
        DisciplineAction::List {
            category,
            today,
            json,
        } => {
            let list: Vec<_> = if today {
                app.disciplines()
                    .daily_disciplines(now.date())
                    .into_iter()
                    .filter(|d| category.map_or(true, |c| d.category == c))
                    .collect()
            } else {
                app.disciplines().disciplines(category)
            };
            if json {
                return print_json(&list);
            }
            for d in list {
                let days: Vec<u8> = d.scheduled_days.iter().copied().collect();
                let mark = if app.disciplines().is_completed(&d.id) { "x" } else { " " };
                println!(
                    "[{mark}] {}  {} ({}, {}) {}",
                    d.id,
                    d.name,
                    d.category,
                    d.frequency,
                    day_names(&days)?.join(",")
                );
            }
        }
        DisciplineAction::Add {
            name,
            frequency,
            days,
            category,
            description,
            duration,
            reminder,
        } => {
            let new = NewDiscipline {
                name,
                description,
                category,
                frequency,
                scheduled_days: days.as_deref().map(parse_days).transpose()?,
                duration_minutes: duration,
                reminder,
            };
            let id = app.add_discipline(new, now)?;
            println!("Discipline created: {id}");
        }
        DisciplineAction::Edit {
            id,
            name,
            frequency,
            days,
            category,
            description,
            duration,
            reminder,
        } => {
            let patch = DisciplinePatch {
                name,
                description,
                category,
                frequency,
                scheduled_days: days.as_deref().map(parse_days).transpose()?,
                duration_minutes: duration,
                reminder,
            };
            if app.update_discipline(&id, patch, now)? {
                println!("Discipline updated: {id}");
            } else {
                println!("No discipline with id {id}");
            }
        }
        DisciplineAction::Delete { id } => {
            if app.delete_discipline(&id, now) {
                println!("Discipline deleted: {id}");
            } else {
                println!("No discipline with id {id}");
            }
        }
        DisciplineAction::Toggle { id, undo } => match app.toggle_discipline(&id, !undo, now) {
            Some(ToggleOutcome::Completed) => {
                println!("Done! Streak: {}", app.disciplines().streak(&id))
            }
            Some(ToggleOutcome::Uncompleted) => {
                println!("Marked not done. Streak: {}", app.disciplines().streak(&id))
            }
            Some(ToggleOutcome::Unchanged) => println!("Already in that state"),
            None => println!("No discipline with id {id}"),
        },
        DisciplineAction::Streak { id } => {
            println!("{}", app.disciplines().streak(&id));
        }
    }
    Ok(())
}
