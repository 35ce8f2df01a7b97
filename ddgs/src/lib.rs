//! # ddgs
//!
//! A DuckDuckGo text search client.
//!
//! The client queries DuckDuckGo's unofficial web endpoints and returns
//! normalized results with support for:
//!
//! - **Two backends**: the structured `d.js` feed and the server-rendered HTML page
//! - **Resilient fetching**: bounded retries with soft-block and hard-block detection
//! - **Pagination**: fixed feed offsets or hidden "next" form fields
//! - **De-duplication**: each URL is returned at most once per search
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ddgs::prelude::*;
//!
//! let ddgs = DDGS::new()?;
//! let results = ddgs
//!     .text("rust async", SearchOptions::new().with_region("us-en"))
//!     .await?;
//!
//! for result in results {
//!     println!("{} - {}", result.title, result.url);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod backends;
pub mod client;
pub mod config;
pub mod errors;
pub mod fetch;
pub mod logging;
pub mod models;
pub mod testing;
pub mod text;
pub mod token;
pub mod transport;

pub use client::DDGS;
pub use config::{ClientConfig, Endpoints, RetryConfig};
pub use errors::{Result, SearchError, TransportError};
pub use models::{Backend, SafeSearch, SearchOptions, SearchResult, TimeLimit};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::client::DDGS;
    pub use crate::config::{ClientConfig, Endpoints, RetryConfig};
    pub use crate::errors::{SearchError, TransportError};
    pub use crate::logging::{CollectingLogSink, LogSink, NoOpLogSink, TracingLogSink};
    pub use crate::models::{Backend, ResolvedOptions, SafeSearch, SearchOptions, SearchResult, TimeLimit};
    pub use crate::transport::{HttpRequest, HttpResponse, Method, Transport};
}
