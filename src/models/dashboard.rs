//! Wire types for the dashboard summary endpoint.
//!
//! Everything here serializes with camelCase keys; the envelope around it is
//! defined in `errors::ApiResponse`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The optional feature modules the dashboard can summarize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DashboardModule {
    RealEstate,
    FileManager,
    Calendar,
    Notifications,
    Hr,
    Accounting,
    Production,
}

impl DashboardModule {
    /// Fixed probe order; summary cards appear in this insertion order.
    pub const ALL: [DashboardModule; 7] = [
        DashboardModule::RealEstate,
        DashboardModule::FileManager,
        DashboardModule::Calendar,
        DashboardModule::Notifications,
        DashboardModule::Hr,
        DashboardModule::Accounting,
        DashboardModule::Production,
    ];

    /// Stable key used on the wire and in tenant capability sets.
    pub fn key(&self) -> &'static str {
        match self {
            Self::RealEstate => "real-estate",
            Self::FileManager => "file-manager",
            Self::Calendar => "calendar",
            Self::Notifications => "notifications",
            Self::Hr => "hr",
            Self::Accounting => "accounting",
            Self::Production => "production",
        }
    }

    /// Parse a capability key; unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.key() == key)
    }

    /// Icon name rendered on the module card.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::RealEstate => "building",
            Self::FileManager => "folder",
            Self::Calendar => "calendar",
            Self::Notifications => "bell",
            Self::Hr => "users",
            Self::Accounting => "wallet",
            Self::Production => "factory",
        }
    }

    /// Accent color rendered on the module card.
    pub fn color(&self) -> &'static str {
        match self {
            Self::RealEstate => "blue",
            Self::FileManager => "orange",
            Self::Calendar => "grape",
            Self::Notifications => "yellow",
            Self::Hr => "cyan",
            Self::Accounting => "green",
            Self::Production => "red",
        }
    }
}

/// A single stat on a module card. Counts and sums serialize as bare
/// numbers, pre-formatted display values as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Count(i64),
    Amount(f64),
    Text(String),
}

/// One labeled stat on a module card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatEntry {
    pub label: String,
    pub value: StatValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_currency: Option<bool>,
}

impl StatEntry {
    pub fn count(label: &str, value: i64) -> Self {
        Self {
            label: label.to_string(),
            value: StatValue::Count(value),
            is_currency: None,
        }
    }

    pub fn amount(label: &str, value: f64) -> Self {
        Self {
            label: label.to_string(),
            value: StatValue::Amount(value),
            is_currency: Some(true),
        }
    }

    pub fn text(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: StatValue::Text(value.into()),
            is_currency: None,
        }
    }
}

/// Navigation shortcut on a module card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickAction {
    pub label: String,
    pub href: String,
    pub icon: String,
}

impl QuickAction {
    pub fn new(label: &str, href: &str, icon: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// Summary card for one feature module.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSummary {
    pub module: DashboardModule,
    pub icon: String,
    pub color: String,
    pub stats: Vec<StatEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quick_actions: Option<Vec<QuickAction>>,
}

impl ModuleSummary {
    /// Empty card carrying the module's icon and color.
    pub fn new(module: DashboardModule) -> Self {
        Self {
            module,
            icon: module.icon().to_string(),
            color: module.color().to_string(),
            stats: Vec::new(),
            quick_actions: None,
        }
    }
}

/// Flattened upcoming event (currently sourced from appointments).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingEvent {
    pub id: Uuid,
    pub module: DashboardModule,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub date: DateTime<Utc>,
    pub icon: String,
    pub color: String,
}

/// Severity of a rule-triggered dashboard alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Warning,
    Info,
    Success,
    Error,
}

/// Count/amount detail attached to an alert.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

/// Rule-triggered alert shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardNotification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
    pub module: DashboardModule,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<NotificationMeta>,
}

/// The full aggregation payload.
///
/// `recent_activities` is part of the wire contract but is always empty;
/// the upstream system never populated it and its element semantics are
/// unspecified.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub modules: Vec<ModuleSummary>,
    pub recent_activities: Vec<serde_json::Value>,
    pub upcoming_events: Vec<UpcomingEvent>,
    pub notifications: Vec<DashboardNotification>,
}
