use std::sync::Arc;

use candela::{
    Candela, CandelaError, ConnectStage, Credentials, PositionRequest, StaticCredentials, Terminal,
};
use candela_mock::MockTerminal;

use crate::helpers::{GOLD, NoCredentials, builder_with, gateway_with};

fn newest_bar() -> PositionRequest {
    PositionRequest {
        symbol: GOLD.into(),
        time_frame: "M1".into(),
        offset: 0,
        count: 1,
    }
}

#[tokio::test]
async fn racing_first_calls_connect_exactly_once() {
    let terminal = Arc::new(MockTerminal::new());
    let candela = Arc::new(gateway_with(&terminal));

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let candela = Arc::clone(&candela);
            tokio::spawn(async move { candela.ensure_ready().await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(terminal.initialize_calls(), 1);
    assert_eq!(terminal.login_calls(), 1);
}

#[tokio::test]
async fn queries_connect_implicitly_on_first_use() {
    let terminal = Arc::new(MockTerminal::new());
    let candela = gateway_with(&terminal);

    candela.candles_from(&newest_bar()).await.unwrap();
    candela.candles_from(&newest_bar()).await.unwrap();

    assert_eq!(terminal.initialize_calls(), 1);
    assert_eq!(terminal.login_calls(), 1);
}

#[tokio::test]
async fn failed_initialize_names_the_stage_and_the_next_call_retries() {
    let terminal = Arc::new(MockTerminal::builder().fail_initialize_times(1).build());
    let candela = gateway_with(&terminal);

    let err = candela.ensure_ready().await.unwrap_err();
    assert!(matches!(
        err,
        CandelaError::ConnectionFailed {
            stage: ConnectStage::Initialize,
            ..
        }
    ));
    assert_eq!(err.status_code(), 500);

    candela.ensure_ready().await.unwrap();
    assert_eq!(terminal.initialize_calls(), 2);
    assert_eq!(terminal.login_calls(), 1);
}

#[tokio::test]
async fn failed_login_names_the_stage_and_the_next_call_retries() {
    let terminal = Arc::new(MockTerminal::builder().fail_login_times(1).build());
    let candela = gateway_with(&terminal);

    let err = candela.ensure_ready().await.unwrap_err();
    assert!(matches!(
        err,
        CandelaError::ConnectionFailed {
            stage: ConnectStage::Login,
            ..
        }
    ));

    candela.ensure_ready().await.unwrap();
    assert_eq!(terminal.initialize_calls(), 2);
    assert_eq!(terminal.login_calls(), 2);
}

#[tokio::test]
async fn a_missing_credential_source_fails_before_the_terminal_is_touched() {
    let terminal = Arc::new(MockTerminal::new());
    let candela = Candela::builder()
        .with_terminal(Arc::clone(&terminal) as Arc<dyn Terminal>)
        .with_credentials(Arc::new(NoCredentials))
        .build()
        .unwrap();

    let err = candela.ensure_ready().await.unwrap_err();
    assert!(matches!(err, CandelaError::NotConfigured { .. }));
    assert_eq!(err.status_code(), 503);
    assert_eq!(terminal.initialize_calls(), 0);
    assert_eq!(terminal.login_calls(), 0);
}

#[tokio::test]
async fn incomplete_credentials_are_rejected_without_connecting() {
    let terminal = Arc::new(MockTerminal::new());
    let candela = builder_with(&terminal)
        .with_credentials(Arc::new(StaticCredentials::new(Credentials::new(
            "/opt/terminal/terminal64.exe",
            "10012345",
            "",
            "Demo-Server",
        ))))
        .build()
        .unwrap();

    let err = candela.ensure_ready().await.unwrap_err();
    assert!(matches!(err, CandelaError::NotConfigured { .. }));
    assert_eq!(terminal.initialize_calls(), 0);
}

#[tokio::test]
async fn a_non_numeric_login_is_rejected_without_connecting() {
    let terminal = Arc::new(MockTerminal::new());
    let candela = builder_with(&terminal)
        .with_credentials(Arc::new(StaticCredentials::new(Credentials::new(
            "/opt/terminal/terminal64.exe",
            "not-a-number",
            "hunter2",
            "Demo-Server",
        ))))
        .build()
        .unwrap();

    let err = candela.ensure_ready().await.unwrap_err();
    assert!(matches!(err, CandelaError::NotConfigured { .. }));
    assert_eq!(terminal.initialize_calls(), 0);
}
