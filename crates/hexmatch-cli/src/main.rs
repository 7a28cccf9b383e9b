//! Headless hexmatch runner: a bot plays one session in real time.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod driver;
mod settings;

use driver::Driver;
use settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env().await?;
    info!(
        width = settings.config.width,
        height = settings.config.height,
        seed = ?settings.seed,
        bot = ?settings.bot,
        "Starting hexmatch session..."
    );

    let summary = Driver::new(settings)?.run().await?;
    info!(
        outcome = ?summary.outcome,
        score = summary.score,
        moves_remaining = summary.moves_remaining,
        bonus_remaining = summary.bonus_remaining,
        swaps = summary.swaps,
        "Session finished"
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
