//! Observability subsystem.
//!
//! Logs are the only output surface: every probe outcome is a structured
//! tracing event. There is no metrics endpoint.

pub mod logging;
