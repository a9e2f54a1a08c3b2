use steadfast_core::calendar::{format_time, now};

use super::{open_app, print_json, CliResult};

pub fn run(json: bool) -> CliResult {
    let mut app = open_app()?;
    let view = app.today(now());

    if json {
        return print_json(&view);
    }

    println!("{}", view.label);
    println!();
    println!(
        "Disciplines ({:.0}% done, {} day streak)",
        view.completion_rate * 100.0,
        view.day_streak
    );
    if view.disciplines.is_empty() {
        println!("  nothing scheduled today");
    }
    for d in &view.disciplines {
        let mark = if d.completed { "x" } else { " " };
        let reminder = d
            .reminder
            .as_deref()
            .and_then(|r| format_time(r).ok())
            .map(|r| format!(" @ {r}"))
            .unwrap_or_default();
        println!("  [{mark}] {} (streak {}){reminder}  {}", d.name, d.streak, d.id);
    }

    println!();
    for w in &view.wisdom {
        match &w.source {
            Some(source) => println!("{}: {} ({source})", w.kind, w.content),
            None => println!("{}: {}", w.kind, w.content),
        }
    }

    if let Some(prompt) = &view.prompt {
        println!();
        let status = if view.journal_written { "written" } else { "not written yet" };
        println!("Journal prompt ({status}): {}", prompt.text);
    }

    println!();
    println!("Featured lessons:");
    for item in &view.featured_learning {
        println!("  [{}] {} ({})", item.category, item.title, item.id);
    }
    Ok(())
}
