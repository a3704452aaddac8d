use crate::app_config::{AppConfig, Environment, ExporterKind};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("TWIFFBOT_ENV", "development"));
    let log_level = or_default("TWIFFBOT_LOG_LEVEL", "info");

    let policy_path = PathBuf::from(or_default("TWIFFBOT_POLICY_PATH", "./config/policy.yaml"));
    let ignored_authors_path = PathBuf::from(or_default(
        "TWIFFBOT_IGNORED_AUTHORS_PATH",
        "./config/ignored_authors.json",
    ));
    let export_dir = PathBuf::from(or_default("TWIFFBOT_EXPORT_DIR", "./exports"));

    let exporter = parse_exporter("TWIFFBOT_EXPORTER", &or_default("TWIFFBOT_EXPORTER", "json"))?;
    let reply_char_budget = parse_usize("TWIFFBOT_REPLY_CHAR_BUDGET", "280")?;

    Ok(AppConfig {
        env,
        log_level,
        policy_path,
        ignored_authors_path,
        export_dir,
        exporter,
        reply_char_budget,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

/// Parse the exporter selection. Unlike the environment, an unknown
/// exporter is a hard error — silently discarding outcomes would be worse
/// than refusing to start.
fn parse_exporter(var: &str, s: &str) -> Result<ExporterKind, ConfigError> {
    match s {
        "json" => Ok(ExporterKind::Json),
        "null" => Ok(ExporterKind::Null),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("unknown exporter \"{other}\"; expected \"json\" or \"null\""),
        }),
    }
}
