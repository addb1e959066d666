// Re-export helpers so tests can `use helpers::*;`
use std::sync::Arc;

use candela::{Candela, CandelaBuilder, CredentialProvider, Credentials, StaticCredentials, Terminal};
use candela_mock::MockTerminal;

// ---------- Lightweight fixtures and helpers for tests ----------

/// Common symbol constants used across tests.
pub const GOLD: &str = "XAUUSD";
/// Symbol the mock terminal always refuses to serve.
pub const POISON: &str = "FAIL";

/// Construct a UTC `DateTime` from components for readability in tests.
#[allow(dead_code)]
pub const fn dt(
    y: i32,
    m: u32,
    d: u32,
    hh: u32,
    mm: u32,
    ss: u32,
) -> chrono::DateTime<chrono::Utc> {
    let date = chrono::NaiveDate::from_ymd_opt(y, m, d).expect("invalid date");
    let naive = date
        .and_hms_opt(hh, mm, ss)
        .expect("invalid time components");
    chrono::DateTime::<chrono::Utc>::from_naive_utc_and_offset(naive, chrono::Utc)
}

/// Convenience to derive a UNIX timestamp (seconds) from date components.
pub const fn ts(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> i64 {
    dt(y, m, d, hh, mm, ss).timestamp()
}

/// A complete credential set the mock terminal accepts.
pub fn creds() -> Credentials {
    Credentials::new(
        "/opt/terminal/terminal64.exe",
        "10012345",
        "hunter2",
        "Demo-Server",
    )
}

/// A credential source that never yields credentials.
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn credentials(&self) -> Option<Credentials> {
        None
    }
}

/// Builder pre-wired with `terminal` and the complete test credentials.
pub fn builder_with(terminal: &Arc<MockTerminal>) -> CandelaBuilder {
    Candela::builder()
        .with_terminal(Arc::clone(terminal) as Arc<dyn Terminal>)
        .with_credentials(Arc::new(StaticCredentials::new(creds())))
}

/// Gateway around `terminal` with the clock offset pinned to zero, so
/// tests exercise the query paths without a measurement round-trip.
pub fn gateway_with(terminal: &Arc<MockTerminal>) -> Candela {
    builder_with(terminal)
        .delta_override("0")
        .build()
        .expect("terminal and credentials are wired")
}
