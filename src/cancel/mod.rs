//! Cancellation primitives.
//!
//! # Data Flow
//! ```text
//! deadline elapses (internal timer)      caller / unrelated event
//!     → record DeadlineExceeded              → record Canceled
//!     → token cancelled ◀────────────────────┘
//!           │
//!           ▼
//! executor's wait observes cancelled()
//!     → aborts the in-flight call
//!     → drains its completion channel
//!     → surfaces the recorded reason as the failure
//! ```
//!
//! # Design Decisions
//! - One reusable context type; the manual gate is a thin special case of it
//! - The first recorded cause wins; children share the ancestor's reason
//! - Dropping a context releases its timer, whichever branch completed

pub mod context;
pub mod gate;

pub use context::{CancelContext, CancelReason};
pub use gate::CancelGate;
