use candela::{Candela, RangeRequest};
use candela_examples::common::{get_credentials, get_terminal};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize a human-friendly tracing subscriber with env-based filtering.
    // Suggested: RUST_LOG=info,candela=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();

    // 1. Build the gateway; nothing connects until the first query.
    let candela = Candela::builder()
        .with_terminal(get_terminal())
        .with_credentials(get_credentials())
        .build()?;

    // 2. Ask for the last 25 minutes of M1 candles, bounds on our clock.
    let now = chrono::Utc::now().timestamp();
    let req = RangeRequest {
        symbol: "XAUUSD".into(),
        time_frame: "M1".into(),
        time_from: (now - 25 * 60).into(),
        time_to: now.into(),
    };

    // 3. Fetch. The gateway connects, measures the terminal clock offset,
    //    shifts the bounds onto the terminal clock, and adjusts row times back.
    let rows = candela.candles_range(&req).await?;

    println!("fetched {} candles", rows.len());
    if let (Some(first), Some(last)) = (rows.first(), rows.last()) {
        println!("first open: {}  close {:.2}", first.adjusted_time, first.close);
        println!("last  open: {}  close {:.2}", last.adjusted_time, last.close);
    }
    println!(
        "resolved offset: {:?} seconds",
        candela.status().delta_seconds
    );

    Ok(())
}
