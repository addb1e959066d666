use candela::{Candela, PositionRequest};
use candela_examples::common::{get_credentials, get_terminal};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Build the gateway.
    let candela = Candela::builder()
        .with_terminal(get_terminal())
        .with_credentials(get_credentials())
        .build()?;

    // 2. The ten most recent M1 candles: offset 0 starts at the newest bar.
    let req = PositionRequest {
        symbol: "XAUUSD".into(),
        time_frame: "M1".into(),
        offset: 0,
        count: 10,
    };

    let rows = candela.candles_from(&req).await?;

    // 3. Row times are already back on our clock.
    println!(
        "{:>12}  {:>10}  {:>10}  {:>6}",
        "open time", "open", "close", "ticks"
    );
    for row in &rows {
        println!(
            "{:>12}  {:>10.2}  {:>10.2}  {:>6}",
            row.adjusted_time, row.open, row.close, row.tick_volume
        );
    }

    Ok(())
}
