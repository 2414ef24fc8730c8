pub mod applications;
pub mod auth;
pub mod companies;
pub mod error;
pub mod internships;
pub mod middleware;
pub mod routes;
pub mod saved;
pub mod students;

use error::{ApiError, ApiResult};
use tracing::error;

/// Run a blocking store operation off the async runtime. Handlers never hold
/// the DB mutex on an executor thread.
pub(crate) async fn run_blocking<T, F>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> ApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Internal(anyhow::anyhow!(e))
    })?
}
