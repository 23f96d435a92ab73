use thiserror::Error;

pub mod business_hour;
pub mod constants;
pub mod department;
pub mod department_agent;
pub mod user;

pub use business_hour::{BusinessHour, BusinessHourType, Timezone};
pub use department::Department;
pub use department_agent::DepartmentAgent;
pub use user::User;

// Store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database connection error: {0}")]
    Connection(sqlx::Error),
    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("General error: {0}")]
    General(#[from] anyhow::Error),
    #[error("Unique constraint violation: {0}")]
    Unique(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        // Check for MySQL unique constraint violation (error code 1062)
        if let sqlx::Error::Database(db_err) = &err {
            if let Some(code) = db_err.code() {
                if code == "23000" || code == "1062" {
                    return StoreError::Unique(db_err.message().to_string());
                }
            }
        }
        StoreError::Connection(err)
    }
}
