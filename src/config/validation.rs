//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SimulatorConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::SimulatorConfig;

/// Upper bound on artificial latency; anything longer only slows tests down.
pub const MAX_LATENCY_MS: u64 = 60_000;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("latency_ms {0} exceeds maximum {max}", max = MAX_LATENCY_MS)]
    LatencyTooHigh(u64),

    #[error("thread_name_prefix must not be empty")]
    EmptyThreadPrefix,

    #[error("unknown log_level '{0}'")]
    UnknownLogLevel(String),
}

pub fn validate_config(config: &SimulatorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.latency_ms > MAX_LATENCY_MS {
        errors.push(ValidationError::LatencyTooHigh(config.latency_ms));
    }
    if config.thread_name_prefix.trim().is_empty() {
        errors.push(ValidationError::EmptyThreadPrefix);
    }
    if !LOG_LEVELS.contains(&config.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::UnknownLogLevel(config.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
