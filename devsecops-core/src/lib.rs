//! DevSecOps Dashboard Navigation Core
//!
//! Platform-agnostic routing for the DevSecOps dashboard: the route table, the
//! fragment codec, the route store and the backend envelope helpers. This
//! crate has no browser dependency; the web crate plugs the browser location
//! in through [`FragmentSink`].

pub mod api;
pub mod breadcrumbs;
pub mod config;
pub mod error;
pub mod fragment;
pub mod history;
pub mod nav;
pub mod route;
pub mod store;

pub use api::{
    ApiEnvelope, ApiError, Method, Resource, RetryPolicy, decode_ack, decode_envelope,
};
pub use breadcrumbs::{Crumb, breadcrumbs};
pub use config::{ClientConfig, ConfigError};
pub use error::RouteError;
pub use fragment::{normalize_fragment, parse_fragment, try_parse_fragment};
pub use history::MemoryHistory;
pub use route::{Route, RouteKind, Segment, validate_id};
pub use store::{FragmentSink, ListenerId, RouteStore};
