//! Typed client for a remote HTTP/JSON API.
//!
//! # Overview
//! `RemoteClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network (host-does-IO pattern). The
//! `BlockingClient` and `AsyncClient` facades pair it with a transport for
//! the host's execution model and expose the typed operations: `retrieve`,
//! `submit`, `remove`, `get_records`, `version` and `currencies`.
//!
//! # Design
//! - `RemoteClient` is stateless: it holds the base URL and the
//!   authorization header value, both fixed at construction.
//! - Result types are chosen per call site through `DeserializeOwned`.
//! - Every failure is a `ClientError`, either `Transport` (exchange failed
//!   or non-success status) or `Decode` (body did not fit the target type).
//! - No retries, pagination traversal or client-side timeouts.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod asynchronous;
pub mod blocking;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use asynchronous::AsyncClient;
pub use blocking::BlockingClient;
pub use client::{record_params, RemoteClient, PAGINATION_KEYS, UNPAGINATED_PAGE_SIZE};
// `crate::` keeps this from resolving to the `config` dependency.
pub use crate::config::{ClientConfig, Credentials};
pub use endpoint::{build_url, params, Params};
pub use error::ClientError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{AsyncTransport, ReqwestTransport, Transport, TransportError, UreqTransport};
pub use types::{Currency, Record, Version};
