//! End-to-end checks through the HTTP surface, with the service probing its
//! own built-in slow upstream endpoint.

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use tokio::net::TcpListener;

use upstream_probe::config::AppConfig;
use upstream_probe::http::HttpServer;
use upstream_probe::lifecycle::Shutdown;

async fn start_server(delay_ms: u64, call_ms: u64) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = AppConfig::default();
    config.listener.bind_address = addr.to_string();
    config.upstream.url = format!("http://{}/upstream", addr);
    config.upstream.delay_ms = delay_ms;
    config.timeouts.call_ms = call_ms;

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = HttpServer::new(config).unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}

#[tokio::test]
async fn bounded_strategies_answer_at_the_bound_when_the_upstream_is_slow() {
    let (addr, shutdown) = start_server(600, 200).await;
    let client = reqwest::Client::new();

    for strategy in ["deadline", "gate", "context"] {
        let started = Instant::now();
        let res = client
            .get(format!("http://{}/probe/{}", addr, strategy))
            .send()
            .await
            .unwrap();
        let elapsed = started.elapsed();

        assert_eq!(res.status(), 200);
        assert!(
            elapsed >= Duration::from_millis(200) && elapsed < Duration::from_millis(500),
            "{} answered in {:?}",
            strategy,
            elapsed
        );
    }

    shutdown.trigger();
}

#[tokio::test]
async fn every_strategy_succeeds_against_a_fast_upstream() {
    let (addr, shutdown) = start_server(100, 400).await;
    let client = reqwest::Client::new();

    for strategy in ["unbounded", "deadline", "gate", "context"] {
        let started = Instant::now();
        let res = client
            .get(format!("http://{}/probe/{}", addr, strategy))
            .send()
            .await
            .unwrap();
        let elapsed = started.elapsed();

        assert_eq!(res.status(), 200);
        assert!(
            elapsed >= Duration::from_millis(100) && elapsed < Duration::from_millis(400),
            "{} answered in {:?}",
            strategy,
            elapsed
        );
    }

    shutdown.trigger();
}
