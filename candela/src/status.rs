use candela_core::types::StatusReport;

use crate::core::Candela;

impl Candela {
    /// Point-in-time snapshot of gateway state for health surfaces.
    ///
    /// Cheap enough to poll: a readiness flag, a credential probe, and
    /// two brief read locks. It never touches the terminal.
    #[must_use]
    pub fn status(&self) -> StatusReport {
        StatusReport {
            ready: self.gate.is_ready(),
            credentials_set: self
                .credentials
                .credentials()
                .is_some_and(|c| c.is_complete()),
            delta_seconds: self.delta.get().map(|d| d.num_seconds()),
            terminal_time: self.clock.get(),
        }
    }

    /// Disconnect so the next query reconnects from scratch.
    ///
    /// The cached clock offset survives; clear it separately with
    /// [`reset_delta`](Self::reset_delta) when the terminal moves to a
    /// different server.
    pub async fn reset_connection(&self) {
        self.gate.reset(self.terminal.as_ref()).await;
    }
}
