use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::ApplicationService;
use crate::db::{Application, NewApplication};
use crate::error::AppError;

/// Map-backed service for exercising handlers without a database.
#[derive(Default)]
pub struct InMemoryApplicationService {
    records: Mutex<HashMap<Uuid, Application>>,
}

impl InMemoryApplicationService {
    pub fn insert(&self, application: Application) {
        self.records.lock().unwrap().insert(application.id, application);
    }

    pub fn ids(&self) -> Vec<Uuid> {
        self.records.lock().unwrap().keys().copied().collect()
    }
}

#[async_trait]
impl ApplicationService for InMemoryApplicationService {
    async fn create(&self, new: NewApplication) -> Result<Application, AppError> {
        let application = Application {
            id: Uuid::new_v4(),
            name: new.name,
            description: new.description,
            created_at: chrono::Utc::now(),
        };
        self.insert(application.clone());
        Ok(application)
    }

    async fn find_one_or_none(&self, id: Uuid) -> Result<Option<Application>, AppError> {
        Ok(self.records.lock().unwrap().get(&id).cloned())
    }

    async fn delete(&self, application: Application) -> Result<(), AppError> {
        self.records.lock().unwrap().remove(&application.id);
        Ok(())
    }
}
