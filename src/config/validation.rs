//! Configuration validation.
//!
//! Semantic checks on top of serde's syntactic ones. Returns all errors,
//! not just the first.

use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic validation failure.
#[derive(Debug)]
pub enum ValidationError {
    /// `listener.bind_address` is not a valid socket address.
    BindAddress(String),
    /// `upstream.url` is not a valid URL.
    UpstreamUrl(String),
    /// A duration field that must be positive is zero.
    ZeroDuration(&'static str),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::BindAddress(addr) => {
                write!(f, "listener.bind_address {:?} is not a socket address", addr)
            }
            ValidationError::UpstreamUrl(url) => {
                write!(f, "upstream.url {:?} is not a valid url", url)
            }
            ValidationError::ZeroDuration(field) => {
                write!(f, "{} must be greater than zero", field)
            }
        }
    }
}

/// Validate a configuration. Pure; runs before the config is accepted into
/// the system.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config
        .listener
        .bind_address
        .parse::<std::net::SocketAddr>()
        .is_err()
    {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if Url::parse(&config.upstream.url).is_err() {
        errors.push(ValidationError::UpstreamUrl(config.upstream.url.clone()));
    }

    if config.timeouts.call_ms == 0 {
        errors.push(ValidationError::ZeroDuration("timeouts.call_ms"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
