use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::config::LicenseTier;
use crate::models::{BusinessHour, BusinessHourType, StoreError, Timezone};
use crate::store::{BusinessHourStore, DepartmentAgentStore, DepartmentStore, UserStore};
use crate::timezone::{offset_hours_string, HostTimezone};

/// The part of a business-hour window needed to resolve and toggle agents.
#[derive(Debug, Clone)]
pub struct BusinessHourRef {
    pub id: String,
    pub kind: BusinessHourType,
}

impl From<&BusinessHour> for BusinessHourRef {
    fn from(business_hour: &BusinessHour) -> Self {
        Self {
            id: business_hour.id.clone(),
            kind: business_hour.kind,
        }
    }
}

/// Applies open/close of a business-hour window to the agents it governs and
/// keeps the default window's timezone synced on non-enterprise deployments.
pub struct BusinessHourService {
    business_hours: Arc<dyn BusinessHourStore>,
    departments: Arc<dyn DepartmentStore>,
    department_agents: Arc<dyn DepartmentAgentStore>,
    users: Arc<dyn UserStore>,
}

impl BusinessHourService {
    pub fn new(
        business_hours: Arc<dyn BusinessHourStore>,
        departments: Arc<dyn DepartmentStore>,
        department_agents: Arc<dyn DepartmentAgentStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            business_hours,
            departments,
            department_agents,
            users,
        }
    }

    /// Build from one store implementing all four collection traits.
    pub fn from_shared<S>(store: Arc<S>) -> Self
    where
        S: BusinessHourStore + DepartmentStore + DepartmentAgentStore + UserStore + 'static,
    {
        Self {
            business_hours: store.clone(),
            departments: store.clone(),
            department_agents: store.clone(),
            users: store,
        }
    }

    /// Agents holding the livechat-agent role that sit in no enabled
    /// department.
    async fn agent_ids_without_department(&self) -> Result<Vec<String>, StoreError> {
        let with_department = self
            .department_agents
            .agent_ids_in_enabled_departments()
            .await?;
        self.users.agent_ids_excluding(&with_department).await
    }

    /// Agents of enabled departments that are not linked to any business
    /// hour; those departments fall back to the default window.
    async fn agent_ids_with_department_not_connected_to_business_hour(
        &self,
    ) -> Result<Vec<String>, StoreError> {
        let department_ids = self
            .departments
            .find_active_ids_without_business_hour()
            .await?;
        self.department_agents
            .agent_ids_by_department_ids(&department_ids)
            .await
    }

    /// Union of the two default-window populations. The lookups have no
    /// ordering dependency, so they run concurrently and merge afterwards
    /// with duplicates removed.
    async fn agent_ids_for_default_business_hour(&self) -> Result<Vec<String>, StoreError> {
        let (without_department, with_department_not_connected) = tokio::try_join!(
            self.agent_ids_without_department(),
            self.agent_ids_with_department_not_connected_to_business_hour(),
        )?;

        let mut seen = HashSet::new();
        Ok(without_department
            .into_iter()
            .chain(with_department_not_connected)
            .filter(|agent_id| seen.insert(agent_id.clone()))
            .collect())
    }

    /// Every agent governed by the given window. Empty result is a normal
    /// value, not an error.
    pub async fn resolve_agent_ids(
        &self,
        business_hour: &BusinessHourRef,
    ) -> Result<Vec<String>, StoreError> {
        if business_hour.kind == BusinessHourType::Default {
            return self.agent_ids_for_default_business_hour().await;
        }

        let department_ids = self
            .departments
            .find_enabled_ids_by_business_hour_id(&business_hour.id)
            .await?;
        self.department_agents
            .agent_ids_by_department_ids(&department_ids)
            .await
    }

    pub async fn open_business_hour(
        &self,
        business_hour: &BusinessHourRef,
    ) -> Result<(), StoreError> {
        let agent_ids = self.resolve_agent_ids(business_hour).await?;
        let top10_agent_ids = &agent_ids[..agent_ids.len().min(10)];
        debug!(
            business_hour = %business_hour.id,
            total_agents = agent_ids.len(),
            ?top10_agent_ids,
            "Opening business hour"
        );

        self.users
            .add_business_hour_by_agent_ids(&agent_ids, &business_hour.id)
            .await?;
        self.users
            .update_livechat_status_based_on_business_hours()
            .await
    }

    pub async fn close_business_hour(
        &self,
        business_hour: &BusinessHourRef,
    ) -> Result<(), StoreError> {
        let agent_ids = self.resolve_agent_ids(business_hour).await?;
        let top10_agent_ids = &agent_ids[..agent_ids.len().min(10)];
        debug!(
            business_hour = %business_hour.id,
            total_agents = agent_ids.len(),
            ?top10_agent_ids,
            "Closing business hour"
        );

        self.users
            .remove_business_hour_by_agent_ids(&agent_ids, &business_hour.id)
            .await?;
        self.users
            .update_livechat_status_based_on_business_hours()
            .await
    }

    /// Direct variant for callers that already know the affected agents,
    /// e.g. a department reconfiguration.
    pub async fn remove_business_hour_by_agent_ids(
        &self,
        agent_ids: &[String],
        business_hour_id: &str,
    ) -> Result<(), StoreError> {
        if agent_ids.is_empty() {
            return Ok(());
        }

        self.users
            .remove_business_hour_by_agent_ids(agent_ids, business_hour_id)
            .await?;
        self.users
            .update_livechat_status_based_on_business_hours()
            .await
    }

    /// On non-enterprise deployments the default window always follows the
    /// host machine's timezone; any configured value is overwritten.
    pub async fn reset_default_business_hour_if_needed(
        &self,
        license: LicenseTier,
        host: &dyn HostTimezone,
    ) -> Result<(), StoreError> {
        if license.is_enterprise() {
            return Ok(());
        }

        let Some(default_hour) = self.business_hours.find_one_default().await? else {
            return Ok(());
        };

        let timezone = Timezone {
            name: host.zone_name(),
            utc: offset_hours_string(host.utc_offset_minutes()),
        };
        self.business_hours
            .update_timezone(&default_hour.id, &timezone)
            .await
    }
}
