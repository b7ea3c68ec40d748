use anyhow::Context;
use bookfinder_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load BookFinder settings")?;
    bookfinder_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        addr = %settings.server.bind_addr(),
        "bookfinder-app bootstrap starting"
    );

    bookfinder_app::serve(settings).await
}
