//! Server configuration sourced from the environment.
//!
//! # Responsibility
//! - Resolve bind address, database path, and logging knobs with sane
//!   defaults for local use.
//!
//! # Invariants
//! - The resolved log directory is absolute, as the core logger requires.

use std::env;
use std::path::PathBuf;

const DEFAULT_BIND: &str = "127.0.0.1:8080";
const DEFAULT_DB_PATH: &str = "memo.db";
const DEFAULT_STATIC_DIR: &str = "static";

/// Resolved runtime configuration for the server binary.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP address to listen on. Env: `MEMO_BIND`.
    pub bind_addr: String,
    /// SQLite database file. Env: `DB_PATH`.
    pub db_path: PathBuf,
    /// Directory served under `/static`. Env: `MEMO_STATIC_DIR`.
    pub static_dir: PathBuf,
    /// Absolute directory for rolling log files. Env: `MEMO_LOG_DIR`.
    pub log_dir: PathBuf,
    /// Log level passed to the core logger. Env: `MEMO_LOG_LEVEL`.
    pub log_level: String,
}

impl ServerConfig {
    /// Builds a configuration from environment variables and defaults.
    ///
    /// # Errors
    /// - Returns an error when the current directory cannot be resolved
    ///   while defaulting the log directory.
    pub fn from_env() -> Result<Self, String> {
        let log_dir = match env::var("MEMO_LOG_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => env::current_dir()
                .map_err(|err| format!("cannot resolve current directory: {err}"))?
                .join("logs"),
        };

        Ok(Self {
            bind_addr: env_or("MEMO_BIND", DEFAULT_BIND),
            db_path: PathBuf::from(env_or("DB_PATH", DEFAULT_DB_PATH)),
            static_dir: PathBuf::from(env_or("MEMO_STATIC_DIR", DEFAULT_STATIC_DIR)),
            log_dir,
            log_level: env_or("MEMO_LOG_LEVEL", memo_core::default_log_level()),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::env_or;

    #[test]
    fn env_or_falls_back_on_missing_or_blank() {
        assert_eq!(env_or("MEMO_TEST_UNSET_VARIABLE", "fallback"), "fallback");

        std::env::set_var("MEMO_TEST_BLANK_VARIABLE", "  ");
        assert_eq!(env_or("MEMO_TEST_BLANK_VARIABLE", "fallback"), "fallback");
        std::env::remove_var("MEMO_TEST_BLANK_VARIABLE");
    }
}
