//! Synchronous client core for the esa.io read API.
//!
//! # Overview
//! Lists teams, fetches a single post, and lists posts with search filters.
//! `EsaClient` builds `HttpRequest` values and parses `HttpResponse` values
//! without touching the network (host-does-IO pattern); `Esa` couples it
//! with a blocking `Transport` for callers that just want a typed result.
//!
//! # Design
//! - `EsaClient` is stateless: it holds only the base URL and access token.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and testable without a server.
//! - The posts search filter is an ordered multimap; `query::translate`
//!   folds non-reserved keys into the `q` expression deterministically.
//! - One call is one round trip. There is no retry, caching, or automatic
//!   pagination.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod service;
pub mod transport;
pub mod types;

pub use client::EsaClient;
pub use config::ClientConfig;
pub use error::{ConfigError, EsaError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use query::{translate, FilterMap, TranslatedQuery};
pub use service::{Esa, PostService, TeamService};
pub use transport::{Transport, UreqTransport};
pub use types::{PageCursor, Post, PostPage, Team, TeamPage, User};
