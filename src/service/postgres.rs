use async_trait::async_trait;
use uuid::Uuid;

use super::ApplicationService;
use crate::db::{Application, DbPool, NewApplication};
use crate::error::AppError;

pub struct PgApplicationService {
    pool: DbPool,
}

impl PgApplicationService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationService for PgApplicationService {
    async fn create(&self, new: NewApplication) -> Result<Application, AppError> {
        let application = sqlx::query_as::<_, Application>(
            "INSERT INTO applications (id, name, description, created_at) VALUES ($1, $2, $3, $4)
             RETURNING id, name, description, created_at"
        )
        .bind(Uuid::new_v4())
        .bind(&new.name)
        .bind(&new.description)
        .bind(chrono::Utc::now())
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("Created application {}", application.id);
        Ok(application)
    }

    async fn find_one_or_none(&self, id: Uuid) -> Result<Option<Application>, AppError> {
        let application = sqlx::query_as::<_, Application>(
            "SELECT id, name, description, created_at FROM applications WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(application)
    }

    async fn delete(&self, application: Application) -> Result<(), AppError> {
        sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(application.id)
            .execute(&self.pool)
            .await?;

        tracing::info!("Deleted application {}", application.id);
        Ok(())
    }
}
