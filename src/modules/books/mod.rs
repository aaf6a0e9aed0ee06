pub mod catalog;
pub mod models;
mod openapi;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use shelf_kernel::{settings::CatalogSettings, InitCtx, Module};

use catalog::Catalog;

/// Books module: an in-memory catalog plus its HTTP routes
pub struct BooksModule {
    catalog: Arc<Catalog>,
}

impl BooksModule {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let books = self.catalog.len().await;
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            books,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(Arc::clone(&self.catalog))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi::fragment())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        let books = self.catalog.len().await;
        tracing::info!(
            module = self.name(),
            books,
            "books module stopped; catalog discarded"
        );
        Ok(())
    }
}

/// Create the books module, seeded according to `settings`
pub fn create_module(settings: &CatalogSettings) -> Arc<dyn Module> {
    let catalog = if settings.seed {
        Catalog::seeded()
    } else {
        Catalog::new()
    };
    Arc::new(BooksModule::new(Arc::new(catalog)))
}
