use std::env;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_DATABASE_NAME: &str = "event_listing";
pub const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug)]
pub struct Config {
    pub mongodb_uri: String,
    /// Explicit database name; otherwise the one in the URI, then `DEFAULT_DATABASE_NAME`.
    pub database_name: Option<String>,
    pub server_selection_timeout: Duration,
    /// Build indexes during bootstrap. Off unless `MONGODB_AUTO_INDEX` is set;
    /// the `create_indexes` binary is the usual path.
    pub auto_index: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mongodb_uri = non_blank("MONGODB_URI")
            .ok_or_else(|| AppError::Configuration("MONGODB_URI must be set".into()))?;

        let auto_index = match non_blank("MONGODB_AUTO_INDEX") {
            None => false,
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                other => {
                    return Err(AppError::Configuration(format!(
                        "MONGODB_AUTO_INDEX must be a boolean, got '{}'",
                        other
                    )))
                }
            },
        };

        Ok(Self {
            mongodb_uri,
            database_name: non_blank("MONGODB_DB"),
            server_selection_timeout: SERVER_SELECTION_TIMEOUT,
            auto_index,
        })
    }

    pub fn with_uri(mongodb_uri: impl Into<String>) -> Self {
        Self {
            mongodb_uri: mongodb_uri.into(),
            database_name: None,
            server_selection_timeout: SERVER_SELECTION_TIMEOUT,
            auto_index: false,
        }
    }
}
