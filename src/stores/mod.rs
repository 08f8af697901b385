//! Client-side state holders built on top of the API functions.
//!
//! Each store owns one slice of the cached state in
//! [`SessionStore`](crate::session::SessionStore) and keeps it in step with
//! the backend. All of them go through the same [`HttpClient`], so a 401 from
//! any store wipes every cached slice at once.

mod companion;
mod info;
mod user;
mod wallet;

pub use companion::CompanionStore;
pub use info::{InfoStore, rewrite_avatar_url};
pub use user::UserStore;
pub use wallet::WalletStore;
