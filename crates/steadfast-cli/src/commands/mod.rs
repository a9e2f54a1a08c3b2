pub mod activity;
pub mod config;
pub mod discipline;
pub mod growth;
pub mod history;
pub mod insights;
pub mod journal;
pub mod learn;
pub mod profile;
pub mod subscription;
pub mod today;
pub mod wisdom;

use serde::Serialize;
use steadfast_core::{App, Config, SqliteStore};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the on-disk store and roll the app over to the current day.
pub fn open_app() -> Result<App<SqliteStore>, Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = SqliteStore::open()?;
    let mut app = App::new(store, config);
    app.initialize(steadfast_core::calendar::now());
    tracing::debug!(disciplines = app.disciplines().len(), "app initialized");
    Ok(app)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
