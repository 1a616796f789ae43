use anyhow::Result;
use decke_bff::config::Settings;
use decke_bff::infrastructure::{init_tracing, log_messages::application};
use decke_bff::Application;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new()?;
    init_tracing(&settings.logging)?;

    info!(environment = %settings.application.environment, "{}", application::STARTING);

    let app = Application::from_settings(settings)?;
    app.run().await?;

    Ok(())
}
