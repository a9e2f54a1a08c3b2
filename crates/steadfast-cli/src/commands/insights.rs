use clap::Subcommand;
use steadfast_core::calendar::date_string;

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum InsightsAction {
    /// Latest insights, newest first
    List {
        /// Only insights about one area (e.g. "learning", "journal")
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value = "10")]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
    /// Suggested disciplines and learning habits
    Recommendations {
        /// "discipline" or "learning"
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value = "5")]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
    /// Mark an insight as read
    Read {
        id: String,
    },
}

pub fn run(action: InsightsAction) -> CliResult {
    let mut app = open_app()?;

    match action {
        InsightsAction::List {
            category,
            limit,
            json,
        } => {
            let insights = app.latest_insights(category.as_deref(), limit);
            if json {
                return print_json(&insights);
            }
            for i in insights {
                let mark = if i.is_read { " " } else { "*" };
                println!(
                    "{mark} {}  {}  [{}]",
                    date_string(i.created_at.date()),
                    i.title,
                    i.id
                );
                println!("    {}", i.description);
            }
        }
        InsightsAction::Recommendations {
            category,
            limit,
            json,
        } => {
            let recs = app.recommendations(category.as_deref(), limit);
            if json {
                return print_json(&recs);
            }
            for r in recs {
                println!("{} ({} min, {})", r.title, r.estimated_minutes, r.category);
                println!("    {}", r.description);
            }
        }
        InsightsAction::Read { id } => {
            if app.mark_insight_read(&id) {
                println!("Marked read: {id}");
            } else {
                println!("No insight with id {id}");
            }
        }
    }
    Ok(())
}
