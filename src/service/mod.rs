mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::db::{Application, NewApplication};
use crate::error::AppError;

pub use postgres::PgApplicationService;

/// Persistence operations the application endpoints depend on.
#[async_trait]
pub trait ApplicationService: Send + Sync {
    async fn create(&self, new: NewApplication) -> Result<Application, AppError>;

    async fn find_one_or_none(&self, id: Uuid) -> Result<Option<Application>, AppError>;

    async fn delete(&self, application: Application) -> Result<(), AppError>;
}
