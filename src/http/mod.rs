//! HTTP client module for the companion marketplace REST API.
//!
//! Every API call in the crate goes through [`HttpClient::send`], which takes a
//! [`RequestDescriptor`] and returns the decoded response envelope.
//!
//! # Architecture
//!
//! - [`HttpClient`] - builds the request, runs the codec, reports failures
//! - [`middleware`] - auth injection, session reset and token rotation stages
//! - [`Notifier`] - where user-facing failure messages go
//! - [`HttpError`] - error categories, with 401 kept separate
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use slgaming::http::{HttpClient, RequestDescriptor};
//! use slgaming::session::SessionStore;
//! use url::Url;
//!
//! # async fn example() -> Result<(), anyhow::Error> {
//! let session = Arc::new(SessionStore::in_memory());
//! let client = HttpClient::new(Url::parse("http://localhost:8888/api")?, session)?;
//!
//! let body = client
//!     .send(RequestDescriptor::get("/user/companions/ranking/orders").query("page", 1))
//!     .await?;
//! println!("{}", body["data"]);
//! # Ok(())
//! # }
//! ```

mod error;
mod http_client;
pub mod middleware;
mod notifier;
mod types;

pub use error::HttpError;
pub use http_client::{ClientOptions, DEFAULT_TIMEOUT_SECS, HttpClient, failure_message};
pub use notifier::{CollectingNotifier, DEFAULT_ERROR_MESSAGE, LogNotifier, Notifier};
pub use types::{Envelope, RequestBody, RequestDescriptor};
