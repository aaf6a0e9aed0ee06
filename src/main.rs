use anyhow::Context;
use shelf_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load shelf settings")?;
    shelf_telemetry::init(&settings.telemetry).with_context(|| "failed to initialize telemetry")?;

    tracing::info!(
        env = ?settings.environment,
        address = %settings.server.bind_address(),
        "shelf-app bootstrap starting"
    );

    shelf_app::run(settings).await
}
