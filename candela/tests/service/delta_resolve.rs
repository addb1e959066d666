use std::sync::Arc;

use candela::{CandelaError, PositionRequest, TimeFrame};
use candela_mock::MockTerminal;
use chrono::TimeDelta;

use crate::helpers::{GOLD, builder_with};

#[tokio::test]
async fn an_override_resolves_without_touching_the_terminal() {
    let terminal = Arc::new(MockTerminal::new());
    let candela = builder_with(&terminal)
        .delta_override("-02:00")
        .build()
        .unwrap();

    let delta = candela.resolve_delta().await.unwrap();

    assert_eq!(delta, TimeDelta::hours(-2));
    assert_eq!(terminal.initialize_calls(), 0);
    assert_eq!(terminal.from_calls(), 0);
}

#[tokio::test]
async fn a_malformed_override_errors_on_every_call_and_caches_nothing() {
    let terminal = Arc::new(MockTerminal::new());
    let candela = builder_with(&terminal)
        .delta_override("12m")
        .build()
        .unwrap();

    for _ in 0..2 {
        let err = candela.resolve_delta().await.unwrap_err();
        assert!(matches!(err, CandelaError::InvalidDeltaFormat { .. }));
    }
    assert_eq!(candela.status().delta_seconds, None);
}

#[tokio::test]
async fn measurement_connects_first_then_snaps_and_caches() {
    // Terminal clock half an hour behind, newest bar another 17 minutes
    // stale: the raw gap lands between -48 and -47 minutes and must snap
    // back up to the -30 boundary.
    let terminal = Arc::new(
        MockTerminal::builder()
            .clock_offset(TimeDelta::minutes(-30))
            .bar_staleness(TimeDelta::minutes(17))
            .build(),
    );
    let candela = builder_with(&terminal).build().unwrap();

    let delta = candela.resolve_delta().await.unwrap();

    assert_eq!(delta, TimeDelta::minutes(-30));
    assert_eq!(terminal.initialize_calls(), 1);
    assert_eq!(terminal.from_calls(), 1);

    let call = terminal.last_from_call().unwrap();
    assert_eq!(call.symbol, GOLD);
    assert_eq!(call.timeframe, TimeFrame::M1);
    assert_eq!((call.offset, call.count), (0, 1));

    // the second resolve serves the cache
    let again = candela.resolve_delta().await.unwrap();
    assert_eq!(again, delta);
    assert_eq!(terminal.from_calls(), 1);
}

#[tokio::test]
async fn a_terminal_running_ahead_snaps_to_the_next_half_hour() {
    let terminal = Arc::new(
        MockTerminal::builder()
            .clock_offset(TimeDelta::minutes(150))
            .build(),
    );
    let candela = builder_with(&terminal).build().unwrap();

    // the newest synthesized bar lags the shifted clock by under two
    // minutes, so the measured gap still rounds up to +150
    let delta = candela.resolve_delta().await.unwrap();
    assert_eq!(delta, TimeDelta::minutes(150));
}

#[tokio::test]
async fn an_empty_reference_feed_is_reported_as_unavailable() {
    let terminal = Arc::new(MockTerminal::builder().from_bars(Vec::new()).build());
    let candela = builder_with(&terminal).build().unwrap();

    let err = candela.resolve_delta().await.unwrap_err();

    assert!(matches!(err, CandelaError::DeltaUnavailable { .. }));
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn reset_delta_forces_a_remeasure() {
    let terminal = Arc::new(MockTerminal::new());
    let candela = builder_with(&terminal).build().unwrap();

    candela.resolve_delta().await.unwrap();
    assert_eq!(terminal.from_calls(), 1);

    candela.reset_delta();
    assert_eq!(candela.status().delta_seconds, None);

    candela.resolve_delta().await.unwrap();
    assert_eq!(terminal.from_calls(), 2);
}

#[tokio::test]
async fn racing_resolves_measure_exactly_once() {
    let terminal = Arc::new(MockTerminal::new());
    let candela = builder_with(&terminal).build().unwrap();

    let results = futures::future::join_all((0..8).map(|_| candela.resolve_delta())).await;
    for delta in results {
        assert_eq!(delta.unwrap(), TimeDelta::zero());
    }

    assert_eq!(terminal.from_calls(), 1);
}

#[tokio::test]
async fn queries_share_one_measurement() {
    let terminal = Arc::new(MockTerminal::new());
    let candela = builder_with(&terminal).build().unwrap();

    let req = PositionRequest {
        symbol: GOLD.into(),
        time_frame: "M1".into(),
        offset: 0,
        count: 1,
    };
    candela.candles_from(&req).await.unwrap();
    candela.candles_from(&req).await.unwrap();

    // one reference-bar read for the measurement, one read per query
    assert_eq!(terminal.from_calls(), 3);
    assert_eq!(terminal.initialize_calls(), 1);
}
