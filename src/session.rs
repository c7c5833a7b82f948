//! Shared state of a running chat session.

use tokio_util::sync::CancellationToken;

/// Liveness of a single chat session, shared by the server and client roles.
///
/// Every blocking point in a role races its own work against [`cancelled`],
/// so a single [`shutdown`] call unblocks both roles promptly no matter what
/// they are waiting on.
///
/// [`cancelled`]: Session::cancelled
/// [`shutdown`]: Session::shutdown
#[derive(Debug, Clone)]
pub struct Session {
    token: CancellationToken,
}

impl Session {
    /// Create a new, running session.
    pub fn new() -> Self {
        Session {
            token: CancellationToken::new(),
        }
    }

    /// True until [`shutdown`] is called.
    ///
    /// Roles use this to tell a genuine I/O failure from the error noise a
    /// closing socket produces during teardown.
    ///
    /// [`shutdown`]: Session::shutdown
    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// End the session. Idempotent.
    pub fn shutdown(&self) {
        self.token.cancel();
    }

    /// Resolves once the session has ended.
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}
