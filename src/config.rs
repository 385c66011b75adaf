use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Everything the run needs from the environment, read once at startup and
/// passed into the orchestrator. No globals are consulted after this.
#[derive(Debug, Clone)]
pub struct Config {
    pub email: String,
    pub password: String,
    /// Raw BOOKING_SLOTS spec string; parsed by the orchestrator.
    pub booking_slots: String,
    /// Ledger file; `None` means in-memory only for this run.
    pub ledger_path: Option<PathBuf>,
    /// Players beyond the account holder, default 1.
    pub extra_players: u32,
    /// Optional JSON run-report output path.
    pub report_path: Option<PathBuf>,
    pub pushover: Option<PushoverConfig>,
}

#[derive(Debug, Clone)]
pub struct PushoverConfig {
    pub user_key: String,
    pub api_token: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let email = required_var("ACCOUNT_EMAIL")?;
        let password = required_var("ACCOUNT_PASSWORD")?;
        let booking_slots = required_var("BOOKING_SLOTS")?;

        let ledger_path = optional_var("BOOKED_DATE_FILE").map(PathBuf::from);
        let report_path = optional_var("RUN_REPORT_FILE").map(PathBuf::from);

        let extra_players = match optional_var("EXTRA_PLAYERS") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
                var: "EXTRA_PLAYERS",
                value: raw,
            })?,
            None => 1,
        };

        // Pushover is all-or-nothing: both keys or no notifications
        let pushover = match (
            optional_var("PUSHOVER_USER_KEY"),
            optional_var("PUSHOVER_API_TOKEN"),
        ) {
            (Some(user_key), Some(api_token)) => Some(PushoverConfig {
                user_key,
                api_token,
            }),
            _ => None,
        };

        Ok(Config {
            email,
            password,
            booking_slots,
            ledger_path,
            extra_players,
            report_path,
            pushover,
        })
    }
}

fn required_var(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
