//! BookFinder application library
//!
//! Wires the library service into the module registry and HTTP server.

pub mod library;
pub mod modules;

use std::sync::Arc;

use anyhow::Context;
use bookfinder_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use library::{Clock, LibraryService, LoanPolicy, SharedLibrary, SystemClock};

/// Build a fresh, empty library from settings
pub fn build_library(settings: &Settings, clock: Arc<dyn Clock>) -> SharedLibrary {
    Arc::new(LibraryService::new(
        LoanPolicy::from(&settings.library),
        clock,
    ))
}

/// Registry holding every library module
pub fn build_registry(library: &SharedLibrary) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, library)?;
    Ok(registry)
}

/// Run the full module lifecycle around the HTTP server until ctrl-c/SIGTERM
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    let library = build_library(&settings, Arc::new(SystemClock));
    let registry = build_registry(&library)?;
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = bookfinder_http::start_server(&registry, &settings, shutdown_signal()).await;

    registry
        .stop_modules()
        .await
        .context("module shutdown failed")?;

    tracing::info!("bookfinder shut down");
    served
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
