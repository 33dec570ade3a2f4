use std::env;
use std::path::PathBuf;

use pagewright_application::ResetPolicy;
use pagewright_core::{AppError, AppResult, RequestIdentity};
use tracing_subscriber::EnvFilter;

const DEFAULT_RESET_TOKEN_HOURS: i64 = 24;

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub seed_file: PathBuf,
    pub reset_policy: ResetPolicy,
    pub request_identity: RequestIdentity,
}

impl ConsoleConfig {
    pub fn load() -> AppResult<Self> {
        let seed_file = PathBuf::from(required_env("PAGEWRIGHT_SEED_FILE")?);

        let reset_token_hours =
            parse_env_i64("PAGEWRIGHT_RESET_TOKEN_HOURS", DEFAULT_RESET_TOKEN_HOURS)?;
        if reset_token_hours <= 0 {
            return Err(AppError::Validation(
                "PAGEWRIGHT_RESET_TOKEN_HOURS must be greater than zero".to_owned(),
            ));
        }
        let token_lifetime = chrono::Duration::try_hours(reset_token_hours).ok_or_else(|| {
            AppError::Validation("PAGEWRIGHT_RESET_TOKEN_HOURS is too large".to_owned())
        })?;
        let reset_policy = ResetPolicy::new(token_lifetime)?;

        let request_identity = env::var("PAGEWRIGHT_IDENTITY_NAME")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .map_or_else(RequestIdentity::anonymous, RequestIdentity::signed_in);

        Ok(Self {
            seed_file,
            reset_policy,
            request_identity,
        })
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn required_env(name: &str) -> AppResult<String> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn parse_env_i64(name: &str, default: i64) -> AppResult<i64> {
    match env::var(name) {
        Ok(value) => value.parse::<i64>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        Err(_) => Ok(default),
    }
}
