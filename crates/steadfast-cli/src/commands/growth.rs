use clap::Subcommand;
use steadfast_core::calendar::{date_string, now};
use steadfast_core::GrowthPlanUpdate;

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum GrowthAction {
    /// Show the growth plan
    Plan {
        #[arg(long)]
        json: bool,
    },
    /// Mark a milestone or challenge done
    Complete {
        /// Step id (e.g. "milestone1", "challenge2")
        id: String,
    },
    /// Edit the plan
    Update {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Progress between 0 and 1
        #[arg(long)]
        progress: Option<f64>,
    },
    /// Show the psychological profile
    Profile {
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: GrowthAction) -> CliResult {
    let mut app = open_app()?;
    let now = now();

    match action {
        GrowthAction::Plan { json } => {
            let Some(plan) = app.growth_plan(now)? else {
                println!("No growth plan");
                return Ok(());
            };
            if json {
                return print_json(plan);
            }
            println!("{} ({:.0}%)", plan.title, plan.progress * 100.0);
            println!(
                "{} .. {}",
                date_string(plan.start_date),
                date_string(plan.end_date)
            );
            for (heading, steps) in [("Milestones", &plan.milestones), ("Challenges", &plan.challenges)] {
                println!("{heading}:");
                for s in steps {
                    let mark = if s.is_completed { "x" } else { " " };
                    println!("  [{mark}] {} (due {})  [{}]", s.title, date_string(s.due_date), s.id);
                }
            }
        }
        GrowthAction::Complete { id } => {
            if app.complete_plan_step(&id, now)? {
                println!("Step completed: {id}");
            } else {
                println!("No open step with id {id}");
            }
        }
        GrowthAction::Update {
            title,
            description,
            progress,
        } => {
            let update = GrowthPlanUpdate {
                title,
                description,
                progress,
                focus_areas: None,
            };
            if app.update_growth_plan(update, now)? {
                println!("Growth plan updated");
            } else {
                println!("No growth plan");
            }
        }
        GrowthAction::Profile { json } => {
            let Some(profile) = app.psychological_profile(now)? else {
                println!("No profile");
                return Ok(());
            };
            if json {
                return print_json(profile);
            }
            for (name, score) in &profile.traits {
                println!("{name}: {score:.1}");
            }
            println!("Strengths: {}", profile.strengths.join(", "));
            println!("Growth areas: {}", profile.growth_areas.join(", "));
            println!("Learning style: {}", profile.learning_style);
        }
    }
    Ok(())
}
