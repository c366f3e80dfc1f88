//! Tenant rows and the per-tenant module capability set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::dashboard::DashboardModule;

/// A tenant of the platform.
///
/// `enabled_modules` is a JSONB array of module keys. NULL and the empty
/// array both mean "no restriction configured", i.e. every module enabled.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub enabled_modules: Option<serde_json::Value>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tenant {
    pub fn module_set(&self) -> ModuleSet {
        ModuleSet::from_value(self.enabled_modules.as_ref())
    }
}

/// The set of dashboard modules a tenant may use.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleSet {
    /// No restriction configured.
    All,
    /// Only the listed modules.
    Only(Vec<DashboardModule>),
}

impl ModuleSet {
    /// Parse the `enabled_modules` column. Unknown keys are dropped, so a
    /// list naming only retired modules enables nothing; NULL, non-array
    /// values, and the empty array enable everything.
    pub fn from_value(value: Option<&serde_json::Value>) -> Self {
        let Some(serde_json::Value::Array(items)) = value else {
            return ModuleSet::All;
        };
        if items.is_empty() {
            return ModuleSet::All;
        }
        let modules: Vec<DashboardModule> = items
            .iter()
            .filter_map(|item| item.as_str())
            .filter_map(DashboardModule::from_key)
            .collect();
        ModuleSet::Only(modules)
    }

    pub fn enabled(&self, module: DashboardModule) -> bool {
        match self {
            ModuleSet::All => true,
            ModuleSet::Only(modules) => modules.contains(&module),
        }
    }
}
