//! Server state shared by the event and console handlers.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use parlor_shared::DisplaySink;

use crate::domain::{ConnectionListener, SessionRepository};

/// Shared application state
pub struct AppState {
    /// Repository（データアクセス層の抽象化）
    pub repository: Arc<dyn SessionRepository>,
    /// Accepts new connections
    pub listener: Arc<dyn ConnectionListener>,
    /// Operator console output
    pub display: Arc<dyn DisplaySink>,
    /// True until the listener reports it started, and again once it stops or closes
    closed: AtomicBool,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        listener: Arc<dyn ConnectionListener>,
        display: Arc<dyn DisplaySink>,
    ) -> Self {
        Self {
            repository,
            listener,
            display,
            closed: AtomicBool::new(true),
        }
    }

    /// Whether the port may be changed
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub(crate) fn set_closed(&self, closed: bool) {
        self.closed.store(closed, Ordering::SeqCst);
    }
}
