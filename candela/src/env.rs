use candela_core::connector::CredentialProvider;
use candela_core::types::Credentials;

/// Environment variable naming the terminal executable path.
pub const ENV_TERMINAL_PATH: &str = "CANDELA_TERMINAL_PATH";
/// Environment variable naming the account login.
pub const ENV_LOGIN: &str = "CANDELA_LOGIN";
/// Environment variable naming the account password.
pub const ENV_PASSWORD: &str = "CANDELA_PASSWORD";
/// Environment variable naming the broker server.
pub const ENV_SERVER: &str = "CANDELA_SERVER";

/// Credential source backed by `CANDELA_*` environment variables.
///
/// The variables are re-read on every connect attempt, so values
/// exported after a failed attempt are picked up without a rebuild.
/// All four must be present; otherwise no credentials are offered.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl EnvCredentials {
    /// Create the provider; nothing is read until a connect attempt.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CredentialProvider for EnvCredentials {
    fn credentials(&self) -> Option<Credentials> {
        let terminal_path = std::env::var(ENV_TERMINAL_PATH).ok()?;
        let login = std::env::var(ENV_LOGIN).ok()?;
        let password = std::env::var(ENV_PASSWORD).ok()?;
        let server = std::env::var(ENV_SERVER).ok()?;
        Some(Credentials::new(terminal_path, login, password, server))
    }
}
