use std::sync::{
    Mutex,
    PoisonError,
    atomic::{AtomicUsize, Ordering},
};

use log::{info, warn};

/// Fallback shown when a failed response carries no message.
pub const DEFAULT_ERROR_MESSAGE: &str = "Request failed, please try again later";

/// User-facing side of failure handling.
///
/// The client calls [`Notifier::warning`] once for every failed call and
/// [`Notifier::login_required`] after a 401 when login navigation is enabled.
/// Neither may block.
pub trait Notifier: Send + Sync {
    fn warning(&self, message: &str);

    fn login_required(&self) {}
}

/// Writes notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn warning(&self, message: &str) {
        warn!(target: "slgaming::notify", "{}", message);
    }

    fn login_required(&self) {
        info!(target: "slgaming::notify", "Session expired, please log in again");
    }
}

/// Records notifications so they can be inspected afterwards.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    warnings: Mutex<Vec<String>>,
    login_requests: AtomicUsize,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn login_requests(&self) -> usize {
        self.login_requests.load(Ordering::SeqCst)
    }
}

impl Notifier for CollectingNotifier {
    fn warning(&self, message: &str) {
        self.warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }

    fn login_required(&self) {
        self.login_requests.fetch_add(1, Ordering::SeqCst);
    }
}
