use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Membership of one agent in one department. `department_enabled` is
/// denormalized from the department row so membership scans do not join.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DepartmentAgent {
    pub department_id: String,
    pub agent_id: String,
    pub department_enabled: bool,
}

// Database queries
impl DepartmentAgent {
    pub async fn agent_ids_in_enabled_departments(
        pool: &sqlx::MySqlPool,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT agent_id
            FROM department_agents
            WHERE department_enabled = TRUE
            "#,
        )
        .fetch_all(pool)
        .await
    }

    pub async fn agent_ids_by_department_ids(
        pool: &sqlx::MySqlPool,
        department_ids: &[String],
    ) -> Result<Vec<String>, sqlx::Error> {
        if department_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; department_ids.len()].join(", ");
        let sql = format!(
            "SELECT DISTINCT agent_id FROM department_agents WHERE department_id IN ({placeholders})"
        );

        let mut query = sqlx::query_scalar::<_, String>(&sql);
        for department_id in department_ids {
            query = query.bind(department_id);
        }

        query.fetch_all(pool).await
    }
}
