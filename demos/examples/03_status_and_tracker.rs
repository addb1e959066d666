use std::time::Duration;

use candela::Candela;
use candela_examples::common::{get_credentials, get_terminal};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Build with a fast tracker cadence so the demo publishes quickly.
    let candela = Candela::builder()
        .with_terminal(get_terminal())
        .with_credentials(get_credentials())
        .tracker_interval(Duration::from_millis(200))
        .build()?;

    // 2. Fresh gateway: nothing connected, nothing resolved.
    println!("before connect: {:#?}", candela.status());

    // 3. Connect up front, resolve the offset, then let the tracker
    //    publish a few terminal instants.
    candela.ensure_ready().await?;
    candela.resolve_delta().await?;
    let tracker = candela.spawn_clock_tracker();
    tokio::time::sleep(Duration::from_millis(700)).await;
    println!("connected: {:#?}", candela.status());

    // 4. Wind down: stop the tracker, drop the offset and the connection.
    tracker.stop().await;
    candela.reset_delta();
    candela.reset_connection().await;
    println!("after reset: {:#?}", candela.status());

    Ok(())
}
