use std::sync::atomic::{AtomicBool, Ordering};

use candela_core::connector::{CredentialProvider, Terminal};
use candela_core::types::{CandelaError, ConnectStage};
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Exactly-once connect gate in front of a terminal.
///
/// The fast path is a lock-free readiness check; the slow path
/// serializes the initialize/login sequence so concurrent first callers
/// produce a single connect. A failed attempt leaves the gate closed
/// and the next caller retries from scratch.
pub(crate) struct ConnectionGate {
    ready: AtomicBool,
    connect_lock: Mutex<()>,
}

impl ConnectionGate {
    pub(crate) fn new() -> Self {
        Self {
            ready: AtomicBool::new(false),
            connect_lock: Mutex::new(()),
        }
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Connect unless already connected.
    ///
    /// Credentials are re-read from the provider on every attempt, so a
    /// source that gains credentials later starts succeeding without a
    /// rebuild.
    pub(crate) async fn ensure_ready(
        &self,
        credentials: &dyn CredentialProvider,
        terminal: &dyn Terminal,
    ) -> Result<(), CandelaError> {
        if self.is_ready() {
            return Ok(());
        }
        let _guard = self.connect_lock.lock().await;
        // re-check under the lock; a racing caller may have connected
        if self.is_ready() {
            return Ok(());
        }

        let Some(credentials) = credentials.credentials() else {
            return Err(CandelaError::not_configured("no credentials available"));
        };
        if !credentials.is_complete() {
            return Err(CandelaError::not_configured(
                "credentials incomplete: terminal path, login, password and server are all required",
            ));
        }
        let login = credentials.login_id()?;

        terminal
            .initialize(credentials.terminal_path.trim())
            .await
            .map_err(|e| stage_err(ConnectStage::Initialize, &e))?;
        terminal
            .login(login, &credentials.password, credentials.server.trim())
            .await
            .map_err(|e| stage_err(ConnectStage::Login, &e))?;

        self.ready.store(true, Ordering::Release);
        info!(terminal = terminal.name(), login, "terminal connected");
        Ok(())
    }

    /// Close the gate so the next call reconnects.
    ///
    /// Shutdown failures are logged, not returned; the gate closes
    /// either way. A gate that never connected skips shutdown entirely.
    pub(crate) async fn reset(&self, terminal: &dyn Terminal) {
        let _guard = self.connect_lock.lock().await;
        if self.is_ready()
            && let Err(e) = terminal.shutdown().await
        {
            warn!(terminal = terminal.name(), error = %e, "shutdown failed during reset");
        }
        self.ready.store(false, Ordering::Release);
    }
}

fn stage_err(stage: ConnectStage, source: &CandelaError) -> CandelaError {
    CandelaError::connection_failed(stage, source.to_string())
}
