//! Outbound call subsystem.
//!
//! # Data Flow
//! ```text
//! strategy handler
//!     → executor.rs (spawn issuing task, single-slot completion channel)
//!     → waiting logic races completion against the cancellation signal
//!     → on cancellation: abort in-flight call → drain channel → fail
//!     → outcome logged at the handler boundary
//! ```

pub mod error;
pub mod executor;

pub use error::CallError;
pub use executor::CallExecutor;
