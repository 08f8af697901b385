pub mod api;
pub mod cli;
pub mod codec;
pub mod config;
pub mod db;
pub mod http;
pub mod log;
pub mod session;
pub mod stores;

pub use crate::http::{HttpClient, HttpError, RequestDescriptor};
pub use crate::session::SessionStore;
