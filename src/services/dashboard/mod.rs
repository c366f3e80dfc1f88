//! Dashboard aggregation: a registry of module probes run in fixed order.
//!
//! Each probe is an independent read-only reduction over its module's
//! tables. A module disabled for the tenant is skipped outright; a probe
//! that fails is logged and omitted so the remaining modules still render.
//! A module with no data contributes nothing rather than a zero-filled card.

pub mod accounting;
pub mod calendar;
pub mod file_manager;
pub mod hr;
pub mod notifications;
pub mod production;
pub mod real_estate;

use chrono::{DateTime, Utc};

use crate::errors::AppError;
use crate::models::dashboard::{
    DashboardModule, DashboardNotification, DashboardSummary, ModuleSummary, UpcomingEvent,
};
use crate::models::tenant::ModuleSet;
use crate::services::store::DashboardStore;

/// Maximum entries in the flattened upcoming-events list.
pub const UPCOMING_EVENT_CAP: usize = 5;

/// Everything a probe gets to work with: the scoped store, the evaluation
/// instant, and the company currency for formatted amounts.
pub struct ProbeContext<'a, S> {
    pub store: &'a S,
    pub now: DateTime<Utc>,
    pub currency: &'a str,
}

/// What a single probe contributes to the summary.
#[derive(Debug, Default)]
pub struct ProbeOutput {
    /// The module card; `None` when the module has no signal.
    pub summary: Option<ModuleSummary>,
    pub events: Vec<UpcomingEvent>,
    pub notifications: Vec<DashboardNotification>,
}

async fn run_probe<S: DashboardStore>(
    module: DashboardModule,
    ctx: &ProbeContext<'_, S>,
) -> Result<ProbeOutput, AppError> {
    match module {
        DashboardModule::RealEstate => real_estate::probe(ctx).await,
        DashboardModule::FileManager => file_manager::probe(ctx).await,
        DashboardModule::Calendar => calendar::probe(ctx).await,
        DashboardModule::Notifications => notifications::probe(ctx).await,
        DashboardModule::Hr => hr::probe(ctx).await,
        DashboardModule::Accounting => accounting::probe(ctx).await,
        DashboardModule::Production => production::probe(ctx).await,
    }
}

/// Probe every enabled module and assemble the summary payload.
///
/// Cards keep registry order. A failing probe never fails the request: its
/// module is dropped and the rest of the dashboard is served. Upcoming
/// events from all probes are merged, sorted ascending by date, and capped.
pub async fn summarize<S: DashboardStore>(
    store: &S,
    modules: &ModuleSet,
    currency: &str,
    now: DateTime<Utc>,
) -> DashboardSummary {
    let ctx = ProbeContext {
        store,
        now,
        currency,
    };
    let mut summary = DashboardSummary::default();

    for module in DashboardModule::ALL {
        if !modules.enabled(module) {
            tracing::debug!(module = module.key(), "Module disabled for tenant, skipping");
            continue;
        }
        match run_probe(module, &ctx).await {
            Ok(output) => {
                if let Some(card) = output.summary {
                    summary.modules.push(card);
                }
                summary.upcoming_events.extend(output.events);
                summary.notifications.extend(output.notifications);
            }
            Err(err) => {
                tracing::warn!(
                    module = module.key(),
                    error = %err,
                    "Module probe failed, omitting from summary"
                );
            }
        }
    }

    summary.upcoming_events.sort_by_key(|event| event.date);
    summary.upcoming_events.truncate(UPCOMING_EVENT_CAP);

    summary
}

/// In-memory [`DashboardStore`] shared by the probe and aggregator tests.
#[cfg(test)]
pub(crate) mod testing {
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    use crate::errors::AppError;
    use crate::services::store::{
        AccountingTotals, ApartmentRow, AppointmentRow, ContractRow, DashboardStore,
        NotificationCounts, PaymentRow, ProductionCounts, StorageUsage,
    };

    /// Fake store; appointment counts derive from the row vector so tests
    /// only set data up once.
    #[derive(Default)]
    pub struct FakeStore {
        pub properties: i64,
        pub apartments: Vec<ApartmentRow>,
        pub contracts: Vec<ContractRow>,
        pub storage: StorageUsage,
        pub fail_storage: bool,
        pub appointments: Vec<AppointmentRow>,
        pub notifications: NotificationCounts,
        pub employees: i64,
        pub departments: i64,
        pub accounting: AccountingTotals,
        pub open_payments: Vec<PaymentRow>,
        pub production: ProductionCounts,
    }

    impl DashboardStore for FakeStore {
        async fn count_properties(&self) -> Result<i64, AppError> {
            Ok(self.properties)
        }

        async fn apartments(&self) -> Result<Vec<ApartmentRow>, AppError> {
            Ok(self.apartments.clone())
        }

        async fn active_contracts(&self) -> Result<Vec<ContractRow>, AppError> {
            Ok(self.contracts.clone())
        }

        async fn storage_usage(&self) -> Result<StorageUsage, AppError> {
            if self.fail_storage {
                return Err(AppError::Internal("files table unreachable".to_string()));
            }
            Ok(self.storage)
        }

        async fn count_appointments(&self) -> Result<i64, AppError> {
            Ok(self.appointments.len() as i64)
        }

        async fn count_appointments_from(&self, from: DateTime<Utc>) -> Result<i64, AppError> {
            Ok(self
                .appointments
                .iter()
                .filter(|a| a.status != "cancelled" && a.start_date >= from)
                .count() as i64)
        }

        async fn count_appointments_between(
            &self,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> Result<i64, AppError> {
            Ok(self
                .appointments
                .iter()
                .filter(|a| a.status != "cancelled" && a.start_date >= from && a.start_date < to)
                .count() as i64)
        }

        async fn upcoming_appointments(
            &self,
            from: DateTime<Utc>,
            _limit: i64,
        ) -> Result<Vec<AppointmentRow>, AppError> {
            // Mirrors the SQL predicate but ignores the limit so the
            // aggregator's own cap gets exercised.
            Ok(self
                .appointments
                .iter()
                .filter(|a| a.status != "cancelled" && a.start_date >= from)
                .cloned()
                .collect())
        }

        async fn notification_counts(&self) -> Result<NotificationCounts, AppError> {
            Ok(self.notifications)
        }

        async fn count_employees(&self) -> Result<i64, AppError> {
            Ok(self.employees)
        }

        async fn count_departments(&self) -> Result<i64, AppError> {
            Ok(self.departments)
        }

        async fn accounting_totals(&self) -> Result<AccountingTotals, AppError> {
            Ok(self.accounting)
        }

        async fn open_payments(&self) -> Result<Vec<PaymentRow>, AppError> {
            Ok(self.open_payments.clone())
        }

        async fn production_counts(&self) -> Result<ProductionCounts, AppError> {
            Ok(self.production)
        }
    }

    pub fn appointment(title: &str, at: DateTime<Utc>) -> AppointmentRow {
        AppointmentRow {
            id: Uuid::new_v4(),
            title: title.to_string(),
            start_date: at,
            status: "confirmed".to_string(),
        }
    }
}
