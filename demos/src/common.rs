use std::sync::Arc;

use candela::{CredentialProvider, Credentials, EnvCredentials, StaticCredentials, Terminal};
use candela_mock::{MockTerminal, fixtures};
use chrono::{TimeDelta, Utc};

/// Return a terminal for examples.
///
/// A scripted mock stands in for a live terminal so the examples run
/// anywhere; its clock sits two hours ahead of UTC like a typical
/// broker server, and its range script covers the last half hour of
/// terminal time.
#[must_use]
pub fn get_terminal() -> Arc<dyn Terminal> {
    let terminal_now = (Utc::now() + TimeDelta::hours(2)).timestamp();
    let newest_open = terminal_now - terminal_now.rem_euclid(60);
    Arc::new(
        MockTerminal::builder()
            .clock_offset(TimeDelta::hours(2))
            .range_bars(fixtures::bars(newest_open - 29 * 60, 60, 30))
            .build(),
    )
}

/// Return a credential source for examples.
///
/// Uses the `CANDELA_*` environment variables when a login is exported,
/// and a static demo credential set otherwise. The mock terminal
/// accepts either.
#[must_use]
pub fn get_credentials() -> Arc<dyn CredentialProvider> {
    if std::env::var(candela::ENV_LOGIN).is_ok() {
        Arc::new(EnvCredentials::new())
    } else {
        Arc::new(StaticCredentials::new(Credentials::new(
            "/opt/mt5/terminal64.exe",
            "10012345",
            "demo-password",
            "Demo-Server",
        )))
    }
}
