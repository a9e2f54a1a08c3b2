use clap::Subcommand;
use steadfast_core::calendar::now;

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum LearnAction {
    /// One featured lesson per category
    Featured {
        #[arg(long)]
        json: bool,
    },
    /// Today's lesson list
    Today {
        #[arg(long)]
        json: bool,
    },
    /// Open a lesson and make it today's selection
    Read {
        /// Lesson ID
        id: String,
    },
    /// Mark a lesson completed
    Complete {
        /// Lesson ID
        id: String,
    },
    /// Completion stats and learning streak (premium analytics)
    Stats {
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: LearnAction) -> CliResult {
    let mut app = open_app()?;
    let now = now();

    match action {
        LearnAction::Featured { json } => {
            let items = app.learning().featured_items(now.date());
            if json {
                return print_json(&items);
            }
            for item in &items {
                let done = if app.learning().is_completed(&item.id) { " (done)" } else { "" };
                println!("[{}] {}{done}  {}", item.category, item.title, item.id);
            }
        }
        LearnAction::Today { json } => {
            let items = app.learning_for_today(now);
            if json {
                return print_json(&items);
            }
            for item in &items {
                println!("{}  {}", item.id, item.title);
            }
        }
        LearnAction::Read { id } => {
            if !app.select_learning_item(&id, now) {
                println!("No lesson with id {id}");
                return Ok(());
            }
            if let Some(item) = app.learning().selected_item() {
                println!("{}\n\n{}", item.title, item.content);
            }
        }
        LearnAction::Complete { id } => {
            if app.complete_learning_item(&id, now) {
                println!("Lesson completed: {id}");
            } else {
                println!("No lesson with id {id}");
            }
        }
        LearnAction::Stats { json } => {
            let stats = app.learning_stats(now)?;
            if json {
                return print_json(&stats);
            }
            println!("Completed: {}", stats.total_completed);
            println!("Streak: {} days", stats.current_streak);
            let week: String = stats
                .weekly_progress
                .iter()
                .map(|done| if *done { '#' } else { '.' })
                .collect();
            println!("Last 7 days: {week}");
            for c in &stats.category_stats {
                println!("  {}: {}/{}", c.category, c.completed, c.total);
            }
        }
    }
    Ok(())
}
