//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the store. Binaries
//! read the environment and hand the raw values to the `*_from_env_value` parsers below; the
//! core itself never touches process-wide environment variables, which keeps tests independent
//! of each other and of the host.

use crate::constants::{DEFAULT_INITIAL_BATCH_SIZE, DEFAULT_SEED_DELAY_MS, MAX_BATCH_SIZE};
use crate::{RequestError, RequestResult};
use pharmalert_types::Locale;
use std::str::FromStr;
use std::time::Duration;

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    seed_delay: Duration,
    initial_batch_size: usize,
    locale: Locale,
    rng_seed: Option<u64>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            seed_delay: Duration::from_millis(DEFAULT_SEED_DELAY_MS),
            initial_batch_size: DEFAULT_INITIAL_BATCH_SIZE,
            locale: Locale::default(),
            rng_seed: None,
        }
    }
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidInput`] if `initial_batch_size` is zero or larger than
    /// [`MAX_BATCH_SIZE`].
    pub fn new(
        seed_delay: Duration,
        initial_batch_size: usize,
        locale: Locale,
        rng_seed: Option<u64>,
    ) -> RequestResult<Self> {
        if initial_batch_size == 0 || initial_batch_size > MAX_BATCH_SIZE {
            return Err(RequestError::InvalidInput(format!(
                "initial batch size must be between 1 and {}, got {}",
                MAX_BATCH_SIZE, initial_batch_size
            )));
        }

        Ok(Self {
            seed_delay,
            initial_batch_size,
            locale,
            rng_seed,
        })
    }

    /// Simulated latency before `initialise` publishes the first batch.
    pub fn seed_delay(&self) -> Duration {
        self.seed_delay
    }

    pub fn initial_batch_size(&self) -> usize {
        self.initial_batch_size
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Seed for the request generator; `None` means OS entropy.
    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_number<T: FromStr>(name: &str, value: Option<String>) -> RequestResult<Option<T>>
where
    T::Err: std::fmt::Display,
{
    non_blank(value)
        .map(|v| {
            v.parse::<T>().map_err(|e| {
                RequestError::InvalidInput(format!("{} must be a number, got '{}': {}", name, v, e))
            })
        })
        .transpose()
}

/// Parse the seed delay (milliseconds) from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default delay.
pub fn seed_delay_from_env_value(value: Option<String>) -> RequestResult<Duration> {
    let millis = parse_number::<u64>("PHARMALERT_SEED_DELAY_MS", value)?;
    Ok(Duration::from_millis(millis.unwrap_or(DEFAULT_SEED_DELAY_MS)))
}

/// Parse the initial batch size from an optional string value.
///
/// Range validation happens in [`CoreConfig::new`].
pub fn initial_batch_size_from_env_value(value: Option<String>) -> RequestResult<usize> {
    let size = parse_number::<usize>("PHARMALERT_INITIAL_BATCH", value)?;
    Ok(size.unwrap_or(DEFAULT_INITIAL_BATCH_SIZE))
}

/// Parse the display locale from an optional string value.
pub fn locale_from_env_value(value: Option<String>) -> RequestResult<Locale> {
    let parsed = non_blank(value).map(|v| v.parse::<Locale>()).transpose()?;
    Ok(parsed.unwrap_or_default())
}

/// Parse the optional generator seed from an optional string value.
pub fn rng_seed_from_env_value(value: Option<String>) -> RequestResult<Option<u64>> {
    parse_number::<u64>("PHARMALERT_RNG_SEED", value)
}
