use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod background_task;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, cache, db, storage, utils};

use auth::jwt::JwtService;
use cache::{InvalidationReceiver, PageCache, Revalidator};
use repositories::sqlx_repo::{SqlxPostRepo, SqlxProjectRepo};
use storage::S3MediaStore;
use use_cases::{auth::AuthHandler, posts::PostHandler, projects::ProjectHandler, uploads::UploadHandler};

pub type AppAuthHandler = AuthHandler<JwtService>;
pub type AppPostHandler = PostHandler<SqlxPostRepo>;
pub type AppProjectHandler = ProjectHandler<SqlxProjectRepo>;
pub type AppUploadHandler = UploadHandler<S3MediaStore>;

pub struct AppState {
    pub auth_handler: AppAuthHandler,
    pub post_handler: AppPostHandler,
    pub project_handler: AppProjectHandler,
    /// None when the storage section is unconfigured; the upload endpoint
    /// then answers with a visible 500 instead of crashing at startup.
    pub upload_handler: Option<AppUploadHandler>,
    pub page_cache: Arc<PageCache>,
    pub revalidator: Revalidator,
    pub config: settings::AppConfig,
}

impl AppState {
    /// Wires the application together: repositories over the pool, the
    /// JWT-backed admin gate, the service-credential media store, and the
    /// invalidation channel. The returned receiver feeds the background
    /// invalidation task.
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> (Self, InvalidationReceiver) {
        let jwt_service = JwtService::new(config);
        let auth_handler = AuthHandler::new(jwt_service, config);
        let post_handler = PostHandler::new(SqlxPostRepo::new(pool.clone()));
        let project_handler = ProjectHandler::new(SqlxProjectRepo::new(pool));

        let upload_handler = config.storage.as_ref().and_then(|storage_config| {
            S3MediaStore::new(storage_config)
                .map_err(|e| tracing::error!("Media storage unavailable: {}", e))
                .ok()
                .map(UploadHandler::new)
        });

        let (revalidator, invalidation_rx) = Revalidator::channel();

        let state = AppState {
            auth_handler,
            post_handler,
            project_handler,
            upload_handler,
            page_cache: Arc::new(PageCache::new()),
            revalidator,
            config: config.clone(),
        };

        (state, invalidation_rx)
    }
}
