//! Cancellable call executor.
//!
//! # Responsibilities
//! - Issue one outbound POST on its own task
//! - Funnel the outcome through a single-slot completion channel
//! - On cancellation: abort the in-flight call, drain the channel, then fail
//!
//! # Design Decisions
//! - The issuing task always sends exactly one outcome; the send never blocks
//! - The abort is request-scoped: it tears down one in-flight call without
//!   touching unrelated calls on the shared client
//! - The drain runs after the abort and before the failure is returned, so
//!   the issuing task is done by the time the caller observes cancellation

use futures_util::future::{AbortHandle, Abortable};
use tokio::sync::oneshot;
use url::Url;
use uuid::Uuid;

use crate::cancel::CancelContext;
use crate::outbound::error::CallError;

type Completion = oneshot::Receiver<Result<(), CallError>>;

/// Issues outbound calls against a fixed target.
///
/// The client carries no timeout of its own; every bound lives with the
/// caller's waiting strategy.
#[derive(Clone)]
pub struct CallExecutor {
    client: reqwest::Client,
    target: Url,
}

impl CallExecutor {
    /// Build an executor for `target`.
    pub fn new(target: &str) -> Result<Self, CallError> {
        let target = Url::parse(target)?;
        let client = reqwest::Client::builder()
            .build()
            .map_err(CallError::Build)?;
        Ok(Self { client, target })
    }

    /// Issue the call on its own task. Hands back the completion channel and
    /// the abort handle for the in-flight send.
    fn issue(&self) -> Result<(Completion, AbortHandle), CallError> {
        let request = self
            .client
            .post(self.target.clone())
            .build()
            .map_err(CallError::Build)?;

        let (abort, registration) = AbortHandle::new_pair();
        let (tx, rx) = oneshot::channel();
        let client = self.client.clone();
        let call_id = Uuid::new_v4();

        tokio::spawn(async move {
            tracing::debug!(call_id = %call_id, "issuing outbound call");
            let outcome = match Abortable::new(client.execute(request), registration).await {
                Ok(Ok(response)) => {
                    // Body and status are discarded; reaching the wire back
                    // at all counts as success.
                    tracing::debug!(
                        call_id = %call_id,
                        status = %response.status(),
                        "outbound call completed"
                    );
                    Ok(())
                }
                Ok(Err(e)) => {
                    tracing::debug!(call_id = %call_id, error = %e, "outbound call failed");
                    Err(CallError::Transport(e))
                }
                Err(_aborted) => {
                    tracing::debug!(call_id = %call_id, "outbound call canceled");
                    Err(CallError::Canceled)
                }
            };
            // Single-slot send; the waiter may already be gone.
            let _ = tx.send(outcome);
        });

        Ok((rx, abort))
    }

    /// Perform the call with no bound and no cancellation. Blocks until the
    /// downstream answers or errors; a stalled downstream blocks forever.
    pub async fn execute(&self) -> Result<(), CallError> {
        let (rx, _abort) = self.issue()?;
        rx.await.unwrap_or(Err(CallError::Abandoned))
    }

    /// Perform the call, abandoning it if `ctx` cancels first.
    ///
    /// When the context wins the race: the in-flight call is aborted, the
    /// completion channel is drained so the issuing task has delivered its
    /// one outcome and terminated, and the context's recorded reason comes
    /// back as the failure.
    pub async fn execute_in(&self, ctx: &CancelContext) -> Result<(), CallError> {
        let (mut rx, abort) = self.issue()?;
        tokio::select! {
            outcome = &mut rx => outcome.unwrap_or(Err(CallError::Abandoned)),
            () = ctx.cancelled() => {
                abort.abort();
                // Drain: the aborted task still sends its final word. The
                // drained value itself is discarded.
                let _ = rx.await;
                Err(ctx.reason().map_or(CallError::Canceled, CallError::from))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_target() {
        assert!(matches!(
            CallExecutor::new("not a url"),
            Err(CallError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn transport_error_surfaces_immediately() {
        // Nothing listens on this port.
        let executor = CallExecutor::new("http://127.0.0.1:1/").unwrap();
        assert!(matches!(
            executor.execute().await,
            Err(CallError::Transport(_))
        ));
    }
}
