//! Ticker stream driver with reconnect-and-backoff.
//!
//! One session = one WebSocket connection. Each text message is decoded,
//! applied to the engine and followed by a full scan before the next message
//! is awaited. Transport failures or a venue close end the session; the
//! driver then waits out the backoff and connects again, until the attempt
//! budget is spent.

use super::binance::parse_ticker_batch;
use crate::arbitrage::ScanReport;
use crate::config::ReconnectConfig;
use crate::engine::ArbitrageEngine;
use crate::errors::{AppError, Result};
use futures::StreamExt;
use std::future::Future;
use std::time::Duration;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{error, info, warn};
use url::Url;

/// Connection lifecycle of the ticker feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    Connected,
    Reconnecting { attempt: u32, delay: Duration },
    Failed { attempts: u32 },
}

/// Exponential backoff between reconnect attempts, reset on every successful connect.
#[derive(Debug, Clone)]
pub struct Backoff {
    policy: ReconnectConfig,
    next: Duration,
    failures: u32,
}

impl Backoff {
    pub fn new(policy: ReconnectConfig) -> Self {
        Self {
            next: policy.initial_delay,
            policy,
            failures: 0,
        }
    }

    pub fn on_connected(&mut self) -> FeedState {
        self.next = self.policy.initial_delay;
        self.failures = 0;
        FeedState::Connected
    }

    /// Record a failed or lost connection and decide what happens next.
    pub fn on_failure(&mut self) -> FeedState {
        self.failures += 1;
        if self.policy.max_attempts != 0 && self.failures > self.policy.max_attempts {
            return FeedState::Failed {
                attempts: self.failures - 1,
            };
        }
        let delay = self.next;
        self.next = (self.next * 2).min(self.policy.max_delay);
        FeedState::Reconnecting {
            attempt: self.failures,
            delay,
        }
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }
}

/// Decode one text message, apply its ticks and scan.
pub fn handle_text(engine: &mut ArbitrageEngine, text: &str) -> Result<ScanReport> {
    let ticks = parse_ticker_batch(text)?;
    Ok(engine.on_batch(&ticks))
}

/// Stream ticks into `engine` until `shutdown` resolves or reconnects are exhausted.
///
/// `on_scan` runs after every completed scan.
pub async fn run_feed<F, S>(
    ws_url: &str,
    policy: &ReconnectConfig,
    engine: &mut ArbitrageEngine,
    mut on_scan: F,
    shutdown: S,
) -> Result<()>
where
    F: FnMut(&ArbitrageEngine, &ScanReport),
    S: Future<Output = ()>,
{
    let url = Url::parse(ws_url)?;
    let mut backoff = Backoff::new(policy.clone());
    tokio::pin!(shutdown);

    loop {
        let outcome = tokio::select! {
            _ = &mut shutdown => {
                info!("[FEED] shutdown requested");
                return Ok(());
            }
            res = run_session(&url, engine, &mut on_scan, &mut backoff) => res,
        };
        match outcome {
            Ok(()) => warn!("[FEED] stream closed by venue"),
            Err(e) => warn!(error = %e, "[FEED] stream interrupted"),
        }

        match backoff.on_failure() {
            FeedState::Reconnecting { attempt, delay } => {
                info!(attempt, delay_ms = delay.as_millis() as u64, "[FEED] reconnecting");
                tokio::select! {
                    _ = &mut shutdown => {
                        info!("[FEED] shutdown requested");
                        return Ok(());
                    }
                    _ = tokio::time::sleep(delay) => {}
                }
            }
            FeedState::Failed { attempts } => {
                error!(attempts, "[FEED] giving up on ticker stream");
                return Err(AppError::StreamRead(format!(
                    "ticker stream unavailable after {attempts} reconnect attempts"
                )));
            }
            FeedState::Connected => {}
        }
    }
}

/// One connection: returns `Ok` when the venue closes, `Err` on transport failure.
async fn run_session<F>(
    url: &Url,
    engine: &mut ArbitrageEngine,
    on_scan: &mut F,
    backoff: &mut Backoff,
) -> Result<()>
where
    F: FnMut(&ArbitrageEngine, &ScanReport),
{
    let (mut ws_stream, _resp) = connect_async(url.clone()).await?;
    backoff.on_connected();
    info!(url = %url, "[FEED] connected, listening for ticker updates");

    while let Some(msg_res) = ws_stream.next().await {
        let text = match msg_res {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(frame)) => {
                info!(?frame, "[FEED] close frame received");
                return Ok(());
            }
            // pings are answered by tungstenite itself
            Ok(_) => continue,
            Err(e) => return Err(AppError::StreamRead(e.to_string())),
        };
        match handle_text(engine, &text) {
            Ok(report) => on_scan(engine, &report),
            Err(e) => warn!(error = %e, "[FEED] skipping message"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbitrage::{MetadataIndex, ScanSettings};
    use crate::models::SymbolRecord;

    fn policy(max_attempts: u32) -> ReconnectConfig {
        ReconnectConfig {
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(500),
            max_attempts,
        }
    }

    fn engine() -> ArbitrageEngine {
        let index = MetadataIndex::from_records(&[
            SymbolRecord::new("BTCUSDT", "BTC", "USDT", "TRADING"),
            SymbolRecord::new("ETHBTC", "ETH", "BTC", "TRADING"),
            SymbolRecord::new("ETHUSDT", "ETH", "USDT", "TRADING"),
        ]);
        ArbitrageEngine::new(index, ScanSettings::default())
    }

    #[test]
    fn backoff_doubles_up_to_cap() {
        let mut backoff = Backoff::new(policy(0));
        let delays: Vec<_> = (0..5)
            .map(|_| match backoff.on_failure() {
                FeedState::Reconnecting { delay, .. } => delay.as_millis(),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(delays, vec![100, 200, 400, 500, 500]);
    }

    #[test]
    fn connect_resets_backoff() {
        let mut backoff = Backoff::new(policy(3));
        backoff.on_failure();
        backoff.on_failure();
        assert_eq!(backoff.on_connected(), FeedState::Connected);
        assert_eq!(backoff.failures(), 0);
        assert_eq!(
            backoff.on_failure(),
            FeedState::Reconnecting {
                attempt: 1,
                delay: Duration::from_millis(100)
            }
        );
    }

    #[test]
    fn exhausted_attempts_fail() {
        let mut backoff = Backoff::new(policy(2));
        assert!(matches!(backoff.on_failure(), FeedState::Reconnecting { attempt: 1, .. }));
        assert!(matches!(backoff.on_failure(), FeedState::Reconnecting { attempt: 2, .. }));
        assert_eq!(backoff.on_failure(), FeedState::Failed { attempts: 2 });
    }

    #[test]
    fn text_message_drives_a_scan() {
        let mut engine = engine();
        let raw = r#"[
            {"s":"BTCUSDT","b":"30000","a":"30010"},
            {"s":"ETHBTC","b":"0.07","a":"0.069"},
            {"s":"ETHUSDT","b":"2105","a":"2110"}
        ]"#;
        let report = handle_text(&mut engine, raw).unwrap();
        assert_eq!(report.evaluated, 1);
        assert!(engine.best_trade().is_some());
    }

    #[test]
    fn invalid_tick_is_dropped_alone() {
        let mut engine = engine();
        let raw = r#"[
            {"s":"BTCUSDT","b":"30000","a":"30010"},
            {"s":"ETHBTC","b":"0.07","a":"0.069"},
            {"s":"ETHUSDT","b":"2105","a":"2110"},
            {"s":"XRPUSDT","b":null,"a":"0.5"}
        ]"#;
        let report = handle_text(&mut engine, raw).expect("batch with one bad tick still scans");
        assert_eq!(engine.priced_symbols(), 3);
        assert!(engine.prices().get("XRPUSDT").is_none());
        assert_eq!(report.evaluated, 1);
        assert!(engine.best_trade().is_some());
    }

    #[test]
    fn invalid_update_keeps_previous_price() {
        let mut engine = engine();
        handle_text(&mut engine, r#"[{"s":"ETHUSDT","b":"2105","a":"2110"}]"#).unwrap();
        handle_text(
            &mut engine,
            r#"[{"s":"ETHUSDT","b":true,"a":"2111"},{"s":"BTCUSDT","b":"-3","a":"30010"}]"#,
        )
        .unwrap();
        let price = engine.prices().get("ETHUSDT").unwrap();
        assert_eq!((price.bid, price.ask), (2105.0, 2110.0));
        assert!(engine.prices().get("BTCUSDT").is_none());
    }

    #[test]
    fn bad_message_leaves_engine_untouched() {
        let mut engine = engine();
        let err = handle_text(&mut engine, "{\"ping\":1}").unwrap_err();
        assert!(matches!(err, AppError::StreamRead(_)));
        assert_eq!(engine.priced_symbols(), 0);
    }

    #[tokio::test]
    async fn shutdown_stops_feed_before_connecting() {
        let mut engine = engine();
        let res = run_feed(
            "ws://127.0.0.1:9/ws",
            &policy(0),
            &mut engine,
            |_, _| {},
            std::future::ready(()),
        )
        .await;
        assert!(res.is_ok());
    }

    #[tokio::test]
    async fn unreachable_endpoint_fails_after_budget() {
        let mut engine = engine();
        let fast = ReconnectConfig {
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
            max_attempts: 2,
        };
        let res = run_feed(
            "ws://127.0.0.1:9/ws",
            &fast,
            &mut engine,
            |_, _| {},
            std::future::pending(),
        )
        .await;
        assert!(matches!(res, Err(AppError::StreamRead(_))));
    }
}
