//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the endpoint variable name is a usable environment variable name
//! - Validate value ranges (grace period > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: PluginConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::PluginConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `endpoint.env_var` is empty.
    EmptyEnvVar,
    /// `endpoint.env_var` is not of the form `[A-Za-z_][A-Za-z0-9_]*`.
    InvalidEnvVar(String),
    /// `observability.log_filter` is empty.
    EmptyLogFilter,
    /// `shutdown.grace_period_secs` is zero.
    ZeroGracePeriod,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyEnvVar => write!(f, "endpoint.env_var must not be empty"),
            ValidationError::InvalidEnvVar(name) => {
                write!(f, "endpoint.env_var is not a valid variable name: {}", name)
            }
            ValidationError::EmptyLogFilter => {
                write!(f, "observability.log_filter must not be empty")
            }
            ValidationError::ZeroGracePeriod => {
                write!(f, "shutdown.grace_period_secs must be greater than zero")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &PluginConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let env_var = &config.endpoint.env_var;
    if env_var.is_empty() {
        errors.push(ValidationError::EmptyEnvVar);
    } else if !is_env_var_name(env_var) {
        errors.push(ValidationError::InvalidEnvVar(env_var.clone()));
    }

    if config.observability.log_filter.trim().is_empty() {
        errors.push(ValidationError::EmptyLogFilter);
    }

    if config.shutdown.grace_period_secs == 0 {
        errors.push(ValidationError::ZeroGracePeriod);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_env_var_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
