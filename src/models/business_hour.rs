use serde::{Deserialize, Serialize};
use sqlx::Row;

use super::constants::{BUSINESS_HOUR_KIND_CUSTOM, BUSINESS_HOUR_KIND_DEFAULT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessHourType {
    Default,
    Custom,
}

impl BusinessHourType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessHourType::Default => BUSINESS_HOUR_KIND_DEFAULT,
            BusinessHourType::Custom => BUSINESS_HOUR_KIND_CUSTOM,
        }
    }

    /// Anything that is not the default window is treated as a custom window.
    pub fn from_db(value: &str) -> Self {
        match value {
            BUSINESS_HOUR_KIND_DEFAULT => BusinessHourType::Default,
            _ => BusinessHourType::Custom,
        }
    }
}

/// Timezone attached to a business-hour window. `utc` is the offset in hours
/// serialized as a decimal string ("-5", "5.5").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timezone {
    pub name: String,
    pub utc: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessHour {
    pub id: String,
    pub kind: BusinessHourType,
    pub timezone: Timezone,
}

// Database queries
impl BusinessHour {
    pub async fn find_one_default(
        pool: &sqlx::MySqlPool,
    ) -> Result<Option<BusinessHour>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, kind, timezone_name, timezone_utc
            FROM business_hours
            WHERE kind = ?
            LIMIT 1
            "#,
        )
        .bind(BUSINESS_HOUR_KIND_DEFAULT)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(|r| BusinessHour {
            id: r.get("id"),
            kind: BusinessHourType::from_db(&r.get::<String, _>("kind")),
            timezone: Timezone {
                name: r.get("timezone_name"),
                utc: r.get("timezone_utc"),
            },
        }))
    }

    pub async fn update_timezone(
        pool: &sqlx::MySqlPool,
        id: &str,
        timezone: &Timezone,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE business_hours
            SET timezone_name = ?, timezone_utc = ?
            WHERE id = ?
            "#,
        )
        .bind(&timezone.name)
        .bind(&timezone.utc)
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_db_strings() {
        assert_eq!(BusinessHourType::from_db("default"), BusinessHourType::Default);
        assert_eq!(BusinessHourType::from_db("custom"), BusinessHourType::Custom);
        assert_eq!(BusinessHourType::Default.as_str(), "default");
        assert_eq!(BusinessHourType::Custom.as_str(), "custom");
    }

    #[test]
    fn unknown_kind_is_treated_as_custom() {
        assert_eq!(BusinessHourType::from_db("weekly"), BusinessHourType::Custom);
        assert_eq!(BusinessHourType::from_db(""), BusinessHourType::Custom);
    }
}
