use std::sync::Arc;

use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::{error, info, warn};

use crate::models::{BusinessHour, Department, DepartmentAgent, StoreError, Timezone, User};

/// Business-hour window lookups and the single timezone write used by the
/// default-window reconciliation.
#[async_trait]
pub trait BusinessHourStore: Send + Sync {
    async fn find_one_default(&self) -> Result<Option<BusinessHour>, StoreError>;
    async fn update_timezone(&self, id: &str, timezone: &Timezone) -> Result<(), StoreError>;
}

#[async_trait]
pub trait DepartmentStore: Send + Sync {
    /// Enabled departments with no business-hour link; they fall back to the
    /// default window.
    async fn find_active_ids_without_business_hour(&self) -> Result<Vec<String>, StoreError>;
    async fn find_enabled_ids_by_business_hour_id(
        &self,
        business_hour_id: &str,
    ) -> Result<Vec<String>, StoreError>;
}

#[async_trait]
pub trait DepartmentAgentStore: Send + Sync {
    async fn agent_ids_in_enabled_departments(&self) -> Result<Vec<String>, StoreError>;
    async fn agent_ids_by_department_ids(
        &self,
        department_ids: &[String],
    ) -> Result<Vec<String>, StoreError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Livechat agents whose id is not in `excluded_ids`.
    async fn agent_ids_excluding(&self, excluded_ids: &[String]) -> Result<Vec<String>, StoreError>;
    async fn add_business_hour_by_agent_ids(
        &self,
        agent_ids: &[String],
        business_hour_id: &str,
    ) -> Result<(), StoreError>;
    async fn remove_business_hour_by_agent_ids(
        &self,
        agent_ids: &[String],
        business_hour_id: &str,
    ) -> Result<(), StoreError>;
    async fn update_livechat_status_based_on_business_hours(&self) -> Result<(), StoreError>;
}

/// MySQL-backed implementation of all four store traits, sharing one pool.
#[derive(Clone)]
pub struct SqlStore {
    pool: Arc<MySqlPool>,
}

impl SqlStore {
    pub fn new(pool: Arc<MySqlPool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

#[async_trait]
impl BusinessHourStore for SqlStore {
    async fn find_one_default(&self) -> Result<Option<BusinessHour>, StoreError> {
        Ok(BusinessHour::find_one_default(&self.pool).await?)
    }

    async fn update_timezone(&self, id: &str, timezone: &Timezone) -> Result<(), StoreError> {
        let updated = BusinessHour::update_timezone(&self.pool, id, timezone).await?;
        if !updated {
            warn!(business_hour = %id, "Timezone update matched no business hour");
        }
        Ok(())
    }
}

#[async_trait]
impl DepartmentStore for SqlStore {
    async fn find_active_ids_without_business_hour(&self) -> Result<Vec<String>, StoreError> {
        Ok(Department::find_active_ids_without_business_hour(&self.pool).await?)
    }

    async fn find_enabled_ids_by_business_hour_id(
        &self,
        business_hour_id: &str,
    ) -> Result<Vec<String>, StoreError> {
        Ok(Department::find_enabled_ids_by_business_hour_id(&self.pool, business_hour_id).await?)
    }
}

#[async_trait]
impl DepartmentAgentStore for SqlStore {
    async fn agent_ids_in_enabled_departments(&self) -> Result<Vec<String>, StoreError> {
        Ok(DepartmentAgent::agent_ids_in_enabled_departments(&self.pool).await?)
    }

    async fn agent_ids_by_department_ids(
        &self,
        department_ids: &[String],
    ) -> Result<Vec<String>, StoreError> {
        Ok(DepartmentAgent::agent_ids_by_department_ids(&self.pool, department_ids).await?)
    }
}

#[async_trait]
impl UserStore for SqlStore {
    async fn agent_ids_excluding(&self, excluded_ids: &[String]) -> Result<Vec<String>, StoreError> {
        Ok(User::find_agent_ids_excluding(&self.pool, excluded_ids).await?)
    }

    async fn add_business_hour_by_agent_ids(
        &self,
        agent_ids: &[String],
        business_hour_id: &str,
    ) -> Result<(), StoreError> {
        User::add_business_hour_by_agent_ids(&self.pool, agent_ids, business_hour_id).await?;
        Ok(())
    }

    async fn remove_business_hour_by_agent_ids(
        &self,
        agent_ids: &[String],
        business_hour_id: &str,
    ) -> Result<(), StoreError> {
        User::remove_business_hour_by_agent_ids(&self.pool, agent_ids, business_hour_id).await?;
        Ok(())
    }

    async fn update_livechat_status_based_on_business_hours(&self) -> Result<(), StoreError> {
        Ok(User::update_livechat_status_based_on_business_hours(&self.pool).await?)
    }
}

// Database connection utilities
pub async fn init_store(database_url: &str) -> Result<SqlStore, StoreError> {
    info!("Initializing database connection");

    let pool = Arc::new(MySqlPool::connect(database_url).await.map_err(|e| {
        error!("Failed to connect to database: {}", e);
        StoreError::from(e)
    })?);

    // Skip migrations if env var is set
    if std::env::var("SKIP_MIGRATIONS").is_ok() {
        info!("Skipping migrations (SKIP_MIGRATIONS set)");
    } else {
        sqlx::migrate!("./db/migrations").run(&*pool).await?;
        info!("Database migrations completed");
    }

    Ok(SqlStore::new(pool))
}
