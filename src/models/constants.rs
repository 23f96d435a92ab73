// Livechat role and status constants
pub const AGENT_ROLE: &str = "livechat-agent";

pub const STATUS_AVAILABLE: &str = "available";
pub const STATUS_NOT_AVAILABLE: &str = "not-available";

// Business hour kind column values
pub const BUSINESS_HOUR_KIND_DEFAULT: &str = "default";
pub const BUSINESS_HOUR_KIND_CUSTOM: &str = "custom";
