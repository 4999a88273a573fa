use std::process::ExitCode;

use event_listing::config::Config;
use event_listing::infra::{connection, factory::ensure_indexes};
use event_listing::init_logging;
use tracing::{error, info};

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

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = match connection::connect(&config).await {
        Ok(client) => client,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let db = connection::database(&client, &config);

    match ensure_indexes(&db).await {
        Ok(()) => {
            info!("✅ Indexes are up to date on '{}'", db.name());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to create indexes: {}", e);
            ExitCode::FAILURE
        }
    }
}
