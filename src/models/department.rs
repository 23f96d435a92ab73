use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Department {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub business_hour_id: Option<String>,
}

// Database queries
impl Department {
    /// Ids of enabled departments that are not linked to any business hour.
    /// These fall back to the default window.
    pub async fn find_active_ids_without_business_hour(
        pool: &sqlx::MySqlPool,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT id
            FROM departments
            WHERE enabled = TRUE AND business_hour_id IS NULL
            "#,
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_enabled_ids_by_business_hour_id(
        pool: &sqlx::MySqlPool,
        business_hour_id: &str,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT id
            FROM departments
            WHERE enabled = TRUE AND business_hour_id = ?
            "#,
        )
        .bind(business_hour_id)
        .fetch_all(pool)
        .await
    }
}
