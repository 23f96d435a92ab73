use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::constants::{AGENT_ROLE, STATUS_AVAILABLE, STATUS_NOT_AVAILABLE};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub roles: serde_json::Value,
    pub status_livechat: String,
}

// Database queries
impl User {
    /// Ids of livechat agents that are not in the given exclusion list.
    /// An empty exclusion list returns every agent.
    pub async fn find_agent_ids_excluding(
        pool: &sqlx::MySqlPool,
        excluded_ids: &[String],
    ) -> Result<Vec<String>, sqlx::Error> {
        let mut sql =
            String::from("SELECT id FROM users WHERE JSON_CONTAINS(roles, JSON_QUOTE(?))");
        if !excluded_ids.is_empty() {
            let placeholders = vec!["?"; excluded_ids.len()].join(", ");
            sql.push_str(&format!(" AND id NOT IN ({placeholders})"));
        }

        let mut query = sqlx::query_scalar::<_, String>(&sql).bind(AGENT_ROLE);
        for excluded_id in excluded_ids {
            query = query.bind(excluded_id);
        }

        query.fetch_all(pool).await
    }

    pub async fn add_business_hour_by_agent_ids(
        pool: &sqlx::MySqlPool,
        agent_ids: &[String],
        business_hour_id: &str,
    ) -> Result<u64, sqlx::Error> {
        if agent_ids.is_empty() {
            return Ok(0);
        }

        let values = vec!["(?, ?)"; agent_ids.len()].join(", ");
        let sql = format!(
            "INSERT IGNORE INTO user_business_hours (user_id, business_hour_id) VALUES {values}"
        );

        let mut query = sqlx::query(&sql);
        for agent_id in agent_ids {
            query = query.bind(agent_id).bind(business_hour_id);
        }

        let result = query.execute(pool).await?;
        Ok(result.rows_affected())
    }

    pub async fn remove_business_hour_by_agent_ids(
        pool: &sqlx::MySqlPool,
        agent_ids: &[String],
        business_hour_id: &str,
    ) -> Result<u64, sqlx::Error> {
        if agent_ids.is_empty() {
            return Ok(0);
        }

        let placeholders = vec!["?"; agent_ids.len()].join(", ");
        let sql = format!(
            "DELETE FROM user_business_hours WHERE business_hour_id = ? AND user_id IN ({placeholders})"
        );

        let mut query = sqlx::query(&sql).bind(business_hour_id);
        for agent_id in agent_ids {
            query = query.bind(agent_id);
        }

        let result = query.execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Recompute every agent's livechat status from the union of the
    /// business-hour windows currently open for it. Two statements, no
    /// transaction; a reader between them can observe a stale status.
    pub async fn update_livechat_status_based_on_business_hours(
        pool: &sqlx::MySqlPool,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE users
            SET status_livechat = ?
            WHERE JSON_CONTAINS(roles, JSON_QUOTE(?))
              AND id IN (SELECT user_id FROM user_business_hours)
            "#,
        )
        .bind(STATUS_AVAILABLE)
        .bind(AGENT_ROLE)
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            UPDATE users
            SET status_livechat = ?
            WHERE JSON_CONTAINS(roles, JSON_QUOTE(?))
              AND id NOT IN (SELECT user_id FROM user_business_hours)
            "#,
        )
        .bind(STATUS_NOT_AVAILABLE)
        .bind(AGENT_ROLE)
        .execute(pool)
        .await?;

        Ok(())
    }
}
