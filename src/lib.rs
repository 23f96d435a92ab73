pub mod business_hours;
pub mod config;
pub mod logging;
pub mod models;
pub mod store;
pub mod timezone;

pub use business_hours::{BusinessHourRef, BusinessHourService};
pub use config::{LicenseTier, Settings};
pub use models::{BusinessHour, BusinessHourType, StoreError, Timezone};
pub use store::{init_store, SqlStore};
pub use timezone::{HostTimezone, SystemTimezone};
