//! The request lifecycle store.
//!
//! Owns every request the process has created, partitioned into two collections:
//! - `active`: awaiting a pharmacy response, in arrival order
//! - `processed`: answered, most recently answered first
//!
//! A request moves from `active` to `processed` exactly once, through [`RequestStore::respond`].
//! Nothing is ever deleted or moved back. Membership in a collection is the lifecycle state;
//! `response` being set is a consequence of it.
//!
//! ## Lifetime
//! The store is constructed explicitly (normally once, at startup) and shared by cloning the
//! handle. State lives as long as the last handle and is never persisted.
//!
//! ## Concurrency
//! All state sits behind one store-wide mutex. Each mutating call takes the lock once, so no
//! reader can observe a request half-way between the two collections. The lock is never held
//! across an `.await`.
//!
//! ## Change notification
//! [`RequestStore::subscribe`] hands out a `watch` receiver carrying a revision counter that is
//! bumped after every effective mutation; hosts re-render when it changes.

use crate::clock::{Clock, SystemClock};
use crate::config::CoreConfig;
use crate::generator::RequestGenerator;
use crate::model::Request;
use crate::RequestResult;
use pharmalert_types::Response;
use pharmalert_uuid::RequestId;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Point-in-time copy of the store's observable state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StoreSnapshot {
    pub active: Vec<Request>,
    pub processed: Vec<Request>,
    pub loading: bool,
}

/// Shared handle to the request lifecycle store.
#[derive(Clone)]
pub struct RequestStore(Arc<Inner>);

struct Inner {
    cfg: CoreConfig,
    state: Mutex<StoreState>,
    revision: watch::Sender<u64>,
}

struct StoreState {
    active: Vec<Request>,
    processed: Vec<Request>,
    loading: bool,
    /// Bumped by every `initialise`; only the latest call may seed.
    generation: u64,
    generator: RequestGenerator,
}

impl RequestStore {
    /// Creates an empty store driven by the wall clock.
    pub fn new(cfg: CoreConfig) -> Self {
        Self::with_clock(cfg, Arc::new(SystemClock))
    }

    /// Creates an empty store whose generator reads time from `clock`.
    ///
    /// The generator is seeded from [`CoreConfig::rng_seed`] when set.
    pub fn with_clock(cfg: CoreConfig, clock: Arc<dyn Clock>) -> Self {
        let generator = RequestGenerator::new(cfg.rng_seed(), clock);
        Self::with_generator(cfg, generator)
    }

    /// Creates an empty store around an existing generator.
    pub fn with_generator(cfg: CoreConfig, generator: RequestGenerator) -> Self {
        let (revision, _) = watch::channel(0);
        let state = StoreState {
            active: Vec::new(),
            processed: Vec::new(),
            loading: false,
            generation: 0,
            generator,
        };

        Self(Arc::new(Inner {
            cfg,
            state: Mutex::new(state),
            revision,
        }))
    }

    pub fn config(&self) -> &CoreConfig {
        &self.0.cfg
    }

    /// Every mutation leaves the state consistent before it can panic, so a poisoned lock is
    /// still safe to use.
    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.0.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn bump_revision(&self) {
        self.0.revision.send_modify(|rev| *rev += 1);
    }

    /// Receives the revision counter, bumped after every effective mutation.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.0.revision.subscribe()
    }

    /// Resets the store and seeds it with a fresh batch of active requests.
    ///
    /// Both collections are cleared and `loading` is raised immediately. After the configured
    /// seed delay (a stand-in for fetch latency) the initial batch is placed at the front of
    /// `active` and `loading` drops. Requests added while loading are kept, after the batch.
    ///
    /// If another `initialise` starts during the delay, the earlier call gives way: it returns
    /// without seeding and `loading` stays raised until the later call completes.
    pub async fn initialise(&self) {
        let generation = {
            let mut state = self.lock();
            state.active.clear();
            state.processed.clear();
            state.loading = true;
            state.generation += 1;
            state.generation
        };
        self.bump_revision();

        let delay = self.0.cfg.seed_delay();
        tracing::info!("initialising request store (seed delay {:?})", delay);
        tokio::time::sleep(delay).await;

        let seeded = {
            let mut state = self.lock();
            if state.generation != generation {
                tracing::debug!(generation, "initialise superseded by a later call");
                return;
            }
            let mut batch = state
                .generator
                .generate_batch(self.0.cfg.initial_batch_size());
            let count = batch.len();
            batch.append(&mut state.active);
            state.active = batch;
            state.loading = false;
            count
        };
        self.bump_revision();

        tracing::info!(count = seeded, "request store seeded");
    }

    /// Generates one request and appends it to the end of `active`.
    ///
    /// Returns a copy of the new request.
    pub fn add_one(&self) -> Request {
        let request = {
            let mut state = self.lock();
            let request = state.generator.generate_one();
            state.active.push(request.clone());
            request
        };
        self.bump_revision();

        tracing::debug!(
            id = %request.id,
            medication = %request.medication_name,
            "request added"
        );
        request
    }

    /// Looks a request up in either collection.
    pub fn get_by_id(&self, id: &RequestId) -> Option<Request> {
        let state = self.lock();
        state
            .active
            .iter()
            .chain(state.processed.iter())
            .find(|request| request.id == *id)
            .cloned()
    }

    /// Records the pharmacy's answer to an active request.
    ///
    /// The request leaves `active`, gets its `response`, and is inserted at the front of
    /// `processed`; the processed copy is returned.
    ///
    /// If `id` is not in `active` (unknown, or already answered) this is a no-op returning
    /// `None`: the earlier answer stands and nothing is duplicated. Callers routinely retry
    /// with stale ids, so this is not an error.
    pub fn respond(&self, id: &RequestId, response: Response) -> Option<Request> {
        let processed = {
            let mut state = self.lock();
            let Some(position) = state.active.iter().position(|request| request.id == *id) else {
                tracing::debug!(%id, %response, "respond ignored: request is not active");
                return None;
            };
            let mut request = state.active.remove(position);
            request.response = Some(response);
            state.processed.insert(0, request.clone());
            request
        };
        self.bump_revision();

        tracing::debug!(%id, %response, "request answered");
        Some(processed)
    }

    /// String-typed variant of [`respond`](Self::respond) for untyped callers.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidValue`](crate::RequestError::InvalidValue) if `response`
    /// is not `available` or `unavailable`; the store is left untouched. A malformed `id` can
    /// never match a stored request and is treated as not found (`Ok(None)`).
    pub fn respond_str(&self, id: &str, response: &str) -> RequestResult<Option<Request>> {
        let response = Response::parse(response)?;
        match RequestId::parse(id) {
            Ok(id) => Ok(self.respond(&id, response)),
            Err(_) => {
                tracing::debug!(id, "respond ignored: malformed id");
                Ok(None)
            }
        }
    }

    /// Copy of the requests awaiting a response, in arrival order.
    pub fn active(&self) -> Vec<Request> {
        self.lock().active.clone()
    }

    /// Copy of the answered requests, most recently answered first.
    pub fn processed(&self) -> Vec<Request> {
        self.lock().processed.clone()
    }

    /// True while [`initialise`](Self::initialise) is waiting to publish its batch.
    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// Consistent copy of both collections and the loading flag, taken under one lock.
    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.lock();
        StoreSnapshot {
            active: state.active.clone(),
            processed: state.processed.clone(),
            loading: state.loading,
        }
    }
}
