//! HTTP surface.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → server.rs (route to strategy handler)
//!     → strategy decides the wait and the cancellation wiring
//!     → outbound executor performs the call
//!     → outcome logged; empty 200 either way
//! ```

pub mod server;

pub use server::{AppState, HttpServer};
