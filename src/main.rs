use anyhow::Context;
use chrono::Utc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pharmalert_core::config::{
    initial_batch_size_from_env_value, locale_from_env_value, rng_seed_from_env_value,
    seed_delay_from_env_value,
};
use pharmalert_core::queries::{feed_view, summarize};
use pharmalert_core::time_format::time_since;
use pharmalert_core::{CoreConfig, FeedFilter, RequestStore, Response};

const DEFAULT_TICKS: u64 = 5;
const DEFAULT_TICK_MS: u64 = 1000;

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Reads a runner-only numeric setting, falling back to `default` when unset or blank.
fn runner_setting(name: &str, default: u64) -> anyhow::Result<u64> {
    match env_value(name).map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => v
            .parse::<u64>()
            .with_context(|| format!("{} must be a number, got '{}'", name, v)),
        _ => Ok(default),
    }
}

fn core_config_from_env() -> anyhow::Result<CoreConfig> {
    let cfg = CoreConfig::new(
        seed_delay_from_env_value(env_value("PHARMALERT_SEED_DELAY_MS"))?,
        initial_batch_size_from_env_value(env_value("PHARMALERT_INITIAL_BATCH"))?,
        locale_from_env_value(env_value("PHARMALERT_LOCALE"))?,
        rng_seed_from_env_value(env_value("PHARMALERT_RNG_SEED"))?,
    )?;
    Ok(cfg)
}

/// Logs the dashboard numbers every time the store publishes a new revision.
async fn log_revisions(store: RequestStore) {
    let mut revisions = store.subscribe();
    while revisions.changed().await.is_ok() {
        let revision = *revisions.borrow_and_update();
        let summary = summarize(&store.snapshot());
        tracing::info!(
            revision,
            loading = store.is_loading(),
            active = summary.active_count,
            answered = summary.responses_given,
            "store updated"
        );
    }
}

/// Main entry point for the Pharmalert demo runner
///
/// Seeds a request store, then on every tick a new request arrives and the oldest active
/// one is answered, alternating between available and unavailable. The final feed and
/// dashboard summary are printed as JSON.
///
/// # Environment Variables
/// - `PHARMALERT_SEED_DELAY_MS`: simulated latency of the first load (default: 1500)
/// - `PHARMALERT_INITIAL_BATCH`: size of the seeded batch (default: 3)
/// - `PHARMALERT_LOCALE`: `en` or `fr` (default: en)
/// - `PHARMALERT_RNG_SEED`: seed for reproducible requests (default: entropy)
/// - `PHARMALERT_TICKS`: number of arrive/answer rounds (default: 5)
/// - `PHARMALERT_TICK_MS`: pause between rounds (default: 1000)
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pharmalert_core=info".parse()?)
                .add_directive("pharmalert_run=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = core_config_from_env()?;
    let ticks = runner_setting("PHARMALERT_TICKS", DEFAULT_TICKS)?;
    let tick = Duration::from_millis(runner_setting("PHARMALERT_TICK_MS", DEFAULT_TICK_MS)?);
    let locale = cfg.locale();

    let store = RequestStore::new(cfg);
    let watcher = tokio::spawn(log_revisions(store.clone()));

    store.initialise().await;

    let mut interval = tokio::time::interval(tick);
    interval.tick().await;
    for round in 0..ticks {
        interval.tick().await;

        let arrived = store.add_one();
        tracing::info!(id = %arrived.id, medication = %arrived.medication_name, "request arrived");

        let Some(oldest) = store.active().first().cloned() else {
            continue;
        };
        let response = if round % 2 == 0 {
            Response::Available
        } else {
            Response::Unavailable
        };
        if let Some(answered) = store.respond(&oldest.id, response) {
            tracing::info!(id = %answered.id, %response, "request answered");
        }
    }

    watcher.abort();

    let snapshot = store.snapshot();
    let now = Utc::now();
    for request in feed_view(&snapshot, FeedFilter::All) {
        tracing::info!(
            id = %request.id,
            age = %time_since(request.timestamp, now, locale),
            "{}",
            request.medication_name
        );
    }

    println!("{}", serde_json::to_string_pretty(&summarize(&snapshot))?);
    println!(
        "{}",
        serde_json::to_string_pretty(&feed_view(&snapshot, FeedFilter::All))?
    );

    Ok(())
}
