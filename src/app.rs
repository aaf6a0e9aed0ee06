use anyhow::Context;
use shelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Registry holding every project module, configured from `settings`
pub fn build_registry(settings: &Settings) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    crate::modules::register_all(&mut registry, settings);
    registry
}

/// Run the application: module lifecycle around the HTTP server
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let registry = build_registry(&settings);
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    tracing::info!(modules = registry.len(), "shelf bootstrap complete");

    let served = shelf_http::start_server(&registry, &settings)
        .await
        .with_context(|| "HTTP server terminated with an error");

    registry.stop_all().await?;
    served
}
