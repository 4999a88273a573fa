use std::process::ExitCode;

use event_listing::config::Config;
use event_listing::domain::models::event::NewEvent;
use event_listing::domain::services::event_service::create_event;
use event_listing::error::AppError;
use event_listing::infra::factory::bootstrap_state;
use event_listing::init_logging;
use tracing::{error, info, warn};

fn load_events(path: &str) -> Result<Vec<NewEvent>, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let _guard = match init_logging() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: seed_events <events.json>");
        return ExitCode::FAILURE;
    };

    let events = match load_events(&path) {
        Ok(events) => events,
        Err(e) => {
            error!("Could not read {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    let state = match Config::from_env() {
        Ok(config) => bootstrap_state(&config).await,
        Err(e) => Err(e),
    };
    let state = match state {
        Ok(state) => state,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let total = events.len();
    let mut saved = 0;
    for input in events {
        let title = input.title.clone();
        match create_event(state.event_repo.as_ref(), input).await {
            Ok(event) => {
                saved += 1;
                info!("Seeded '{}' as {}", event.title, event.slug);
            }
            Err(e) => warn!("Skipped '{}': {}", title, e),
        }
    }

    info!("Seeded {}/{} events", saved, total);
    if saved == total {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
