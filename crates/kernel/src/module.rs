use async_trait::async_trait;
use axum::Router;

/// Borrowed view of the loaded settings handed to modules at startup.
pub struct InitCtx<'a> {
    pub settings: &'a crate::settings::Settings,
}

/// One slice of the BookFinder API (books, members, loans).
///
/// A module owns a router and the matching OpenAPI fragment. Modules share
/// state through whatever they captured at construction, typically the
/// library service, so every hook here defaults to a no-op.
#[async_trait]
pub trait Module: Sync + Send {
    /// Registry key; must differ between modules.
    fn name(&self) -> &'static str;

    /// Runs once, in registration order, before the listener is bound.
    /// A failure aborts startup.
    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Handlers relative to `/api`, with state already applied.
    fn routes(&self) -> Router {
        Router::new()
    }

    /// `paths` and `components` for this module's endpoints. Paths omit
    /// the `/api` prefix.
    fn openapi(&self) -> Option<serde_json::Value> {
        None
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Runs after the server has drained, in reverse registration order.
    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
