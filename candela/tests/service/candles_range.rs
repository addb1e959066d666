use std::sync::Arc;

use candela::{CandelaError, RangeRequest, TimeInput};
use candela_mock::{MockTerminal, fixtures};

use crate::helpers::{GOLD, POISON, builder_with, gateway_with, ts};

fn window(from: impl Into<TimeInput>, to: impl Into<TimeInput>) -> RangeRequest {
    RangeRequest {
        symbol: GOLD.into(),
        time_frame: "M1".into(),
        time_from: from.into(),
        time_to: to.into(),
    }
}

#[tokio::test]
async fn bounds_shift_onto_the_terminal_clock_and_rows_shift_back() {
    // Terminal clock two hours ahead of UTC; the script holds three
    // one-minute bars stamped in terminal time.
    let t0 = ts(2024, 1, 1, 0, 0, 0);
    let terminal = Arc::new(
        MockTerminal::builder()
            .range_bars(fixtures::bars(t0 + 7200, 60, 3))
            .build(),
    );
    let candela = builder_with(&terminal)
        .delta_override("+120")
        .build()
        .unwrap();

    let rows = candela
        .candles_range(&window("2024-01-01 00:00:00", "2024-01-01 00:02:00"))
        .await
        .unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].adjusted_time, t0);
    assert_eq!(rows[1].adjusted_time, t0 + 60);
    assert_eq!(rows[2].adjusted_time, t0 + 120);
    // price and volume columns pass through untouched
    assert_eq!(rows[0].open, 2000.0);
    assert_eq!(rows[0].high, 2000.5);
    assert_eq!(rows[0].low, 1999.5);
    assert_eq!(rows[0].close, 2000.25);
    assert_eq!(rows[0].tick_volume, 10);
    assert_eq!(rows[0].spread, 2);
    assert_eq!(rows[0].real_volume, 100);
}

#[tokio::test]
async fn text_and_epoch_bounds_select_the_same_window() {
    let t0 = ts(2024, 1, 1, 0, 0, 0);
    let terminal = Arc::new(
        MockTerminal::builder()
            .range_bars(fixtures::bars(t0, 60, 5))
            .build(),
    );
    let candela = gateway_with(&terminal);

    let by_text = candela
        .candles_range(&window("2024-01-01 00:00:00", "2024-01-01 00:04:00"))
        .await
        .unwrap();
    let by_epoch = candela
        .candles_range(&window(t0, t0 + 240))
        .await
        .unwrap();

    assert_eq!(by_text.len(), 5);
    assert_eq!(by_text, by_epoch);
}

#[tokio::test]
async fn both_window_bounds_are_inclusive() {
    let t0 = ts(2024, 1, 1, 0, 0, 0);
    let terminal = Arc::new(
        MockTerminal::builder()
            .range_bars(fixtures::bars(t0, 60, 5))
            .build(),
    );
    let candela = gateway_with(&terminal);

    let rows = candela
        .candles_range(&window(t0 + 60, t0 + 180))
        .await
        .unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].adjusted_time, t0 + 60);
    assert_eq!(rows[2].adjusted_time, t0 + 180);
}

#[tokio::test]
async fn an_empty_window_surfaces_as_no_data() {
    let terminal = Arc::new(MockTerminal::new());
    let candela = gateway_with(&terminal);

    let err = candela.candles_range(&window(0, 60)).await.unwrap_err();

    assert!(matches!(err, CandelaError::NoData { .. }));
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn an_unknown_timeframe_is_rejected_after_connect_but_before_the_fetch() {
    let terminal = Arc::new(MockTerminal::new());
    let candela = gateway_with(&terminal);

    let mut req = window(0, 60);
    req.time_frame = "X9".into();
    let err = candela.candles_range(&req).await.unwrap_err();

    assert!(matches!(err, CandelaError::InvalidTimeFrame { .. }));
    assert!(err.is_input_error());
    assert!(err.to_string().contains("Try: M1"));
    assert_eq!(terminal.initialize_calls(), 1);
    assert_eq!(terminal.range_calls(), 0);
}

#[tokio::test]
async fn malformed_time_text_is_rejected_before_the_fetch() {
    let terminal = Arc::new(MockTerminal::new());
    let candela = gateway_with(&terminal);

    let err = candela
        .candles_range(&window("yesterday", 60))
        .await
        .unwrap_err();

    assert!(matches!(err, CandelaError::InvalidTimeFormat { .. }));
    assert_eq!(terminal.range_calls(), 0);
}

#[tokio::test]
async fn terminal_failures_pass_through_tagged_with_the_terminal_name() {
    let terminal = Arc::new(MockTerminal::new());
    let candela = gateway_with(&terminal);

    let mut req = window(0, 60);
    req.symbol = POISON.into();
    let err = candela.candles_range(&req).await.unwrap_err();

    assert!(matches!(err, CandelaError::Terminal { .. }));
    assert!(err.to_string().contains("candela-mock"));
    assert_eq!(err.status_code(), 500);
}
