//! # Pharmalert Core
//!
//! Core logic for the Pharmalert pharmacy notification system.
//!
//! This crate owns the medication-availability request lifecycle:
//! - The request/prescription data model ([`model`])
//! - A synthetic request generator standing in for a backend feed ([`generator`])
//! - The in-memory lifecycle store that moves requests from active to processed ([`store`])
//! - Pure filter, grouping and summary projections used to render lists ([`queries`])
//! - Relative-time and date formatting for the feed ([`time_format`])
//!
//! **No presentation concerns**: layout, navigation and styling belong to whatever host
//! consumes the store's read API.

pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod generator;
pub mod model;
pub mod queries;
pub mod store;
pub mod time_format;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::CoreConfig;
pub use error::{RequestError, RequestResult};
pub use generator::RequestGenerator;
pub use model::{Medication, Prescription, Request};
pub use store::{RequestStore, StoreSnapshot};

pub use pharmalert_types::{FeedFilter, Locale, OutcomeFilter, Response};
pub use pharmalert_uuid::RequestId;
