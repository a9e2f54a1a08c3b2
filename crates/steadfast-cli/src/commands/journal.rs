//! Journal commands for CLI.

use clap::Subcommand;
use steadfast_core::calendar::{format_full_date, now};

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum JournalAction {
    /// Show today's prompt
    Prompt,
    /// Write today's entry (replaces it if one exists)
    Write {
        /// Entry text
        content: String,
    },
    /// List entries (history beyond today needs premium)
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one entry
    Show {
        /// Entry ID
        id: String,
    },
    /// Delete an entry
    Delete {
        /// Entry ID
        id: String,
    },
}

pub fn run(action: JournalAction) -> CliResult {
    let mut app = open_app()?;
    let now = now();

    match action {
        JournalAction::Prompt => match app.journal().prompt_for_date(now.date()) {
            Some(prompt) => println!("{}", prompt.text),
            None => println!("No prompts available"),
        },
        JournalAction::Write { content } => {
            let id = app.write_journal(&content, now)?;
            println!("Journal entry saved: {id}");
        }
        JournalAction::List { json } => {
            let entries = app.visible_journal_entries(now);
            if json {
                return print_json(&entries);
            }
            if entries.is_empty() {
                println!("No entries");
            }
            for e in entries {
                println!("{}  {}  ({} words)", e.id, format_full_date(e.day()), e.word_count());
            }
        }
        JournalAction::Show { id } => match app.journal_entry(&id, now)? {
            Some(entry) => {
                println!("{}", format_full_date(entry.day()));
                if let Some(prompt) = entry
                    .prompt_id
                    .as_deref()
                    .and_then(|pid| app.journal().prompts().iter().find(|p| p.id == pid))
                {
                    println!("> {}", prompt.text);
                }
                println!();
                println!("{}", entry.content);
            }
            None => println!("No entry with id {id}"),
        },
        JournalAction::Delete { id } => {
            if app.delete_journal_entry(&id) {
                println!("Journal entry deleted: {id}");
            } else {
                println!("No entry with id {id}");
            }
        }
    }
    Ok(())
}
