use clap::Subcommand;
use steadfast_core::calendar::now;
use steadfast_core::{ProfileUpdate, SettingsUpdate, Theme};

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the profile
    Show,
    /// Create the profile (onboarding)
    Create {
        /// Display name
        name: String,
        #[arg(long)]
        bio: Option<String>,
    },
    /// Update profile fields and settings
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
        /// dark, light or system
        #[arg(long)]
        theme: Option<Theme>,
        #[arg(long)]
        notifications: Option<bool>,
        /// Target fully completed days per week (1-7)
        #[arg(long)]
        streak_goal: Option<u32>,
    },
    /// Delete the profile
    Reset,
}

pub fn run(action: ProfileAction) -> CliResult {
    let mut app = open_app()?;
    let now = now();

    match action {
        ProfileAction::Show => match app.profile() {
            Some(profile) => print_json(profile)?,
            None => println!("No profile yet; run `profile create <name>`"),
        },
        ProfileAction::Create { name, bio } => {
            let profile = app.create_profile(&name, bio.as_deref(), now)?;
            println!("Profile created: {}", profile.id);
        }
        ProfileAction::Update {
            name,
            bio,
            avatar,
            theme,
            notifications,
            streak_goal,
        } => {
            let update = ProfileUpdate { name, bio, avatar };
            let settings = SettingsUpdate {
                theme,
                notifications,
                streak_goal,
            };
            if app.update_profile(update, now)? && app.update_settings(settings, now)? {
                println!("Profile updated");
            } else {
                println!("No profile yet; run `profile create <name>`");
            }
        }
        ProfileAction::Reset => {
            app.reset_profile();
            println!("Profile reset");
        }
    }
    Ok(())
}
