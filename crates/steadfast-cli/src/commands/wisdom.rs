use clap::Subcommand;
use steadfast_core::calendar::today;
use steadfast_core::{WisdomEntry, WisdomType};

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum WisdomAction {
    /// Today's quote, financial principle and parable
    Today {
        #[arg(long)]
        json: bool,
    },
    /// List the whole library
    List {
        /// Only one type: quote, financial or parable
        #[arg(long = "type")]
        kind: Option<WisdomType>,
        #[arg(long)]
        json: bool,
    },
}

fn print_entry(entry: &WisdomEntry) {
    match &entry.source {
        Some(source) => println!("[{}] {}\n    -- {source}", entry.kind, entry.content),
        None => println!("[{}] {}", entry.kind, entry.content),
    }
}

pub fn run(action: WisdomAction) -> CliResult {
    let app = open_app()?;

    let entries = match action {
        WisdomAction::Today { json } => {
            let entries = app.wisdom().today_entries(today());
            if json {
                return print_json(&entries);
            }
            entries
        }
        WisdomAction::List { kind, json } => {
            let entries = match kind {
                Some(kind) => app.wisdom().entries_by_type(kind),
                None => app.wisdom().entries().to_vec(),
            };
            if json {
                return print_json(&entries);
            }
            entries
        }
    };
    for entry in &entries {
        print_entry(entry);
    }
    Ok(())
}
