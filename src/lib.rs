//! Upstream probe service library.

pub mod cancel;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod outbound;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
