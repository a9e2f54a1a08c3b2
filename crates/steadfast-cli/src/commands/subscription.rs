use clap::Subcommand;
use steadfast_core::calendar::now;
use steadfast_core::subscription::plans;
use steadfast_core::PremiumFeature;

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum SubscriptionAction {
    /// Current tier and unlocked features
    Status {
        #[arg(long)]
        json: bool,
    },
    /// List available plans
    Plans {
        #[arg(long)]
        json: bool,
    },
    /// Activate a plan (monthly or yearly)
    Activate {
        /// Plan ID
        plan: String,
    },
    /// Return to the free tier
    Deactivate,
}

pub fn run(action: SubscriptionAction) -> CliResult {
    let mut app = open_app()?;
    let now = now();

    match action {
        SubscriptionAction::Status { json } => {
            let sub = app.subscription();
            if json {
                return print_json(sub);
            }
            let tier = if sub.is_premium(now) { "premium" } else { "free" };
            println!("Tier: {tier}");
            if let Some(expires) = sub.expires_at {
                println!("Expires: {}", expires.format("%Y-%m-%d %H:%M"));
            }
            for feature in PremiumFeature::ALL {
                let mark = if app.has_feature(feature, now) { "x" } else { " " };
                println!("  [{mark}] {feature}");
            }
        }
        SubscriptionAction::Plans { json } => {
            let plans = plans();
            if json {
                return print_json(&plans);
            }
            for plan in &plans {
                println!("{}  {} {}", plan.id, plan.name, plan.price);
                for feature in &plan.features {
                    println!("    - {feature}");
                }
            }
        }
        SubscriptionAction::Activate { plan } => {
            app.activate_subscription(&plan, now)?;
            println!("Subscription activated: {plan}");
        }
        SubscriptionAction::Deactivate => {
            app.deactivate_subscription();
            println!("Subscription cancelled");
        }
    }
    Ok(())
}
