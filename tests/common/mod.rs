//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::AtomicU32;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Counters recording how each exchange against the stub ended.
#[derive(Clone, Default)]
pub struct UpstreamEvents {
    /// Exchanges that survived the full delay and got a response.
    pub completed: Arc<AtomicU32>,
    /// Exchanges whose peer hung up mid-delay.
    pub aborted: Arc<AtomicU32>,
}

/// Start a slow upstream stub: reads the request head, then either serves a
/// 200 after `delay` or records an abort if the client hangs up first.
pub async fn start_slow_upstream(delay: Duration) -> (SocketAddr, UpstreamEvents) {
    use std::sync::atomic::Ordering;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let events = UpstreamEvents::default();
    let ev = events.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let ev = ev.clone();
                    tokio::spawn(async move {
                        let mut buf = [0u8; 1024];
                        let _ = socket.read(&mut buf).await;

                        let served = tokio::select! {
                            _ = tokio::time::sleep(delay) => true,
                            _ = peer_closed(&mut socket) => false,
                        };

                        if served {
                            let response = "HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok";
                            let _ = socket.write_all(response.as_bytes()).await;
                            let _ = socket.shutdown().await;
                            ev.completed.fetch_add(1, Ordering::SeqCst);
                        } else {
                            ev.aborted.fetch_add(1, Ordering::SeqCst);
                        }
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, events)
}

/// Resolves once the peer closes its end of the connection.
async fn peer_closed(socket: &mut TcpStream) {
    let mut buf = [0u8; 64];
    loop {
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }
    }
}
