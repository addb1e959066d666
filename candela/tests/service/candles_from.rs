use std::sync::Arc;

use candela::{CandelaError, PositionRequest};
use candela_mock::{MockTerminal, fixtures};

use crate::helpers::{GOLD, builder_with, gateway_with, ts};

fn lookback(offset: i64, count: i64) -> PositionRequest {
    PositionRequest {
        symbol: GOLD.into(),
        time_frame: "M1".into(),
        offset,
        count,
    }
}

#[tokio::test]
async fn position_queries_count_back_from_the_newest_bar() {
    let t0 = ts(2024, 1, 1, 0, 0, 0);
    let terminal = Arc::new(
        MockTerminal::builder()
            .from_bars(fixtures::bars(t0, 60, 5))
            .build(),
    );
    let candela = gateway_with(&terminal);

    let rows = candela.candles_from(&lookback(1, 2)).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].adjusted_time, t0 + 120);
    assert_eq!(rows[1].adjusted_time, t0 + 180);
}

#[tokio::test]
async fn row_times_are_adjusted_by_the_resolved_offset() {
    // Terminal two hours behind UTC: adjusted = stamped - (-2h).
    let t0 = ts(2024, 1, 1, 2, 0, 0);
    let terminal = Arc::new(
        MockTerminal::builder()
            .from_bars(fixtures::bars(t0, 60, 3))
            .build(),
    );
    let candela = builder_with(&terminal)
        .delta_override("-02:00")
        .build()
        .unwrap();

    let rows = candela.candles_from(&lookback(0, 3)).await.unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].adjusted_time, t0 + 7200);
    assert_eq!(rows[2].adjusted_time, t0 + 7200 + 120);
}

#[tokio::test]
async fn a_non_positive_count_is_rejected_before_the_fetch() {
    let terminal = Arc::new(MockTerminal::new());
    let candela = gateway_with(&terminal);

    let err = candela.candles_from(&lookback(0, 0)).await.unwrap_err();
    assert!(matches!(err, CandelaError::InvalidCount { count: 0 }));

    let err = candela.candles_from(&lookback(0, -5)).await.unwrap_err();
    assert!(matches!(err, CandelaError::InvalidCount { count: -5 }));
    assert!(err.is_input_error());

    assert_eq!(terminal.from_calls(), 0);
}

#[tokio::test]
async fn a_negative_offset_is_rejected_before_the_fetch() {
    let terminal = Arc::new(MockTerminal::new());
    let candela = gateway_with(&terminal);

    let err = candela.candles_from(&lookback(-1, 5)).await.unwrap_err();

    assert!(matches!(err, CandelaError::InvalidOffset { offset: -1 }));
    assert_eq!(err.status_code(), 400);
    assert_eq!(terminal.from_calls(), 0);
}

#[tokio::test]
async fn the_count_complaint_wins_when_both_fields_are_bad() {
    let terminal = Arc::new(MockTerminal::new());
    let candela = gateway_with(&terminal);

    let err = candela.candles_from(&lookback(-1, 0)).await.unwrap_err();

    assert!(matches!(err, CandelaError::InvalidCount { .. }));
}

#[tokio::test]
async fn an_unknown_timeframe_is_rejected_before_the_fetch() {
    let terminal = Arc::new(MockTerminal::new());
    let candela = gateway_with(&terminal);

    let mut req = lookback(0, 1);
    req.time_frame = "X9".into();
    let err = candela.candles_from(&req).await.unwrap_err();

    assert!(matches!(err, CandelaError::InvalidTimeFrame { .. }));
    assert_eq!(terminal.from_calls(), 0);
}

#[tokio::test]
async fn an_empty_result_surfaces_as_no_data() {
    let terminal = Arc::new(MockTerminal::builder().from_bars(Vec::new()).build());
    let candela = gateway_with(&terminal);

    let err = candela.candles_from(&lookback(0, 3)).await.unwrap_err();

    assert!(matches!(err, CandelaError::NoData { .. }));
    assert!(err.to_string().contains(GOLD));
}
