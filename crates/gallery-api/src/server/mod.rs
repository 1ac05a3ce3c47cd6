//! Server setup and initialization
//!
//! Builds the application state from configuration, wires the router, and
//! runs the HTTP server with graceful shutdown. The spam tracker sweeper is
//! owned here: started before serving, aborted after shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use gallery_common::{AdminSessionService, AppConfig, AppError};
use gallery_db::{
    create_pool, run_migrations, PgCommentRepository,
    PgDepartmentRepository, PgHealthProbe, PgLikeRepository, PgPhotoRepository,
};
use gallery_media::LocalImageStore;
use gallery_service::{ServiceContextBuilder, SpamGuard, SpamPolicy};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let router = create_router(config);
    let router = apply_middleware(router, &config.cors, config.app.env.is_production());
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = gallery_db::DatabaseConfig::from(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool, &db_config.migrations_dir)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;
        info!("Database migrations applied");
    }

    let image_store = LocalImageStore::new(&config.storage.upload_dir, &config.storage.url_prefix)
        .with_dimensions(
            config.storage.max_image_dimension,
            config.storage.thumbnail_dimension,
        );

    let admin_session = AdminSessionService::from_config(&config.admin)?;

    let service_context = ServiceContextBuilder::new()
        .photo_repo(Arc::new(PgPhotoRepository::new(pool.clone())))
        .comment_repo(Arc::new(PgCommentRepository::new(pool.clone())))
        .like_repo(Arc::new(PgLikeRepository::new(pool.clone())))
        .department_repo(Arc::new(PgDepartmentRepository::new(pool.clone())))
        .health_probe(Arc::new(PgHealthProbe::new(pool)))
        .image_store(Arc::new(image_store))
        .max_upload_bytes(config.storage.max_file_size_mb.saturating_mul(1024 * 1024))
        .spam_guard(Arc::new(SpamGuard::new(SpamPolicy::from(&config.spam))))
        .admin_session(Arc::new(admin_session))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Serve `app` on `listener` until a shutdown signal arrives
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Failed to read listener address: {e}")))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server shut down");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();
    let sweep_interval = config.spam.sweep_interval();

    let state = create_app_state(config).await?;
    let sweeper = state
        .service_context()
        .spam_guard_handle()
        .spawn_sweeper(sweep_interval);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    let result = run_server(create_app(state), listener).await;
    sweeper.abort();
    result
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
