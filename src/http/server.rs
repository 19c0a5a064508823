//! HTTP server setup and strategy handlers.
//!
//! # Responsibilities
//! - Create the Axum router with one route per waiting strategy
//! - Serve the built-in slow demo upstream
//! - Decide per strategy how long to wait and how cancellation is signalled
//! - Log every outcome; inbound callers get an empty 200 regardless

use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::cancel::{CancelContext, CancelGate};
use crate::config::AppConfig;
use crate::outbound::{CallError, CallExecutor};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub executor: CallExecutor,
    /// Wait bound for every strategy except the unbounded baseline.
    pub call_bound: Duration,
    /// Artificial delay of the demo upstream endpoint.
    pub upstream_delay: Duration,
}

/// HTTP server for the probe service.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Result<Self, CallError> {
        let executor = CallExecutor::new(&config.upstream.url)?;

        let state = AppState {
            executor,
            call_bound: Duration::from_millis(config.timeouts.call_ms),
            upstream_delay: Duration::from_millis(config.upstream.delay_ms),
        };

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all routes and middleware.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/probe/unbounded", get(probe_unbounded))
            .route("/probe/deadline", get(probe_deadline))
            .route("/probe/gate", get(probe_gate))
            .route("/probe/context", get(probe_context))
            .route("/upstream", post(upstream))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Stops on ctrl-c or when `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

/// No bound and no cancellation. Correct only while the downstream behaves;
/// a stalled downstream blocks this handler indefinitely.
async fn probe_unbounded(State(state): State<AppState>) -> StatusCode {
    log_outcome("unbounded", state.executor.execute().await);
    StatusCode::OK
}

/// Bounds the wait, not the call. On expiry the issuing task is not told to
/// stop: it keeps running in the background and its eventual outcome lands
/// in a completion channel nobody reads.
async fn probe_deadline(State(state): State<AppState>) -> StatusCode {
    let outcome = match tokio::time::timeout(state.call_bound, state.executor.execute()).await {
        Ok(outcome) => outcome,
        Err(_elapsed) => Err(CallError::DeadlineExceeded),
    };
    log_outcome("deadline", outcome);
    StatusCode::OK
}

/// Manual wiring: a gate plus a timer task that closes it after the bound.
/// The timer outlives an early completion; its late close hits an
/// already-closed or unused gate, which is a no-op.
async fn probe_gate(State(state): State<AppState>) -> StatusCode {
    let gate = CancelGate::new();
    let timer = gate.clone();
    let bound = state.call_bound;
    tokio::spawn(async move {
        tokio::time::sleep(bound).await;
        timer.close();
    });

    log_outcome("gate", state.executor.execute_in(gate.context()).await);
    StatusCode::OK
}

/// One context carries the deadline, the done signal, and the reason; its
/// timer is released when the context drops, whichever branch completed.
async fn probe_context(State(state): State<AppState>) -> StatusCode {
    let ctx = CancelContext::with_timeout(state.call_bound);
    log_outcome("context", state.executor.execute_in(&ctx).await);
    StatusCode::OK
}

/// The built-in demo downstream: answers after a fixed delay.
async fn upstream(State(state): State<AppState>) -> StatusCode {
    tokio::time::sleep(state.upstream_delay).await;
    StatusCode::OK
}

fn log_outcome(strategy: &str, outcome: Result<(), CallError>) {
    match outcome {
        Ok(()) => tracing::info!(strategy, "success"),
        Err(e) => tracing::warn!(strategy, error = %e, "failed"),
    }
}

/// Wait for ctrl-c or an in-process shutdown trigger.
async fn shutdown_signal(mut shutdown: broadcast::Receiver<()>) {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
        _ = shutdown.recv() => {
            tracing::info!("Shutdown triggered");
        }
    }
}
