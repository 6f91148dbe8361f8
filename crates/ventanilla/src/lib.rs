//! `ventanilla` - Municipal service-window intake
//!
//! This library provides the core functionality for recording and reviewing
//! municipal claims ("reclamos") and service requests ("solicitudes"):
//! JSON-file-backed collections, a thin HTTP+JSON API over them, and
//! client-side filtering for the merged listing.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod query;
pub mod record;
pub mod refresh;
pub mod server;
pub mod service;
pub mod store;

pub use client::ApiClient;
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use query::{DateRange, FilterCriteria};
pub use record::{Record, RecordKind};
pub use service::IntakeService;
pub use store::{PrefsStore, RecordStore};
