use anyhow::Result;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use fortune_catch::app::App;
use fortune_catch::config::GameConfig;
use fortune_catch::formatter::FrameFormatter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(true)
        .event_format(FrameFormatter)
        .with_env_filter(filter)
        .finish()
        .with(ErrorLayer::default());
    tracing::subscriber::set_global_default(subscriber)?;

    let config = GameConfig::load()?;
    info!(?config, "Configuration loaded");

    let mut app = App::new(config)?;
    let score = app.run()?;
    info!(score, "Thanks for playing");

    Ok(())
}
