//! Tenant/company-scoped read access for the dashboard probes.
//!
//! Every statement is produced by [`scoped`], which starts the WHERE clause
//! with the `tenant_id`/`company_id` predicate, and is executed with the
//! scope bound as `$1`/`$2`. Probes never see SQL, so a feature query that
//! forgets the tenant filter cannot be written.

use std::future::Future;

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::errors::AppError;

/// The `{tenant_id, company_id}` pair every feature query is filtered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantScope {
    pub tenant_id: Uuid,
    pub company_id: Uuid,
}

impl TenantScope {
    pub fn new(tenant_id: Uuid, company_id: Uuid) -> Self {
        Self {
            tenant_id,
            company_id,
        }
    }
}

/// Apartment id and occupancy status.
#[derive(Debug, Clone, FromRow)]
pub struct ApartmentRow {
    pub id: Uuid,
    pub status: String,
}

/// Active contract: the apartment it covers and when it ends.
#[derive(Debug, Clone, FromRow)]
pub struct ContractRow {
    pub apartment_id: Option<Uuid>,
    pub end_date: Option<DateTime<Utc>>,
}

/// A payment still awaiting settlement.
#[derive(Debug, Clone, FromRow)]
pub struct PaymentRow {
    pub status: String,
    pub amount: f64,
    pub total_amount: Option<f64>,
}

impl PaymentRow {
    /// The amount a payment contributes to sums: `total_amount` when the
    /// row carries one (surcharges included), the base amount otherwise.
    pub fn effective_amount(&self) -> f64 {
        self.total_amount.unwrap_or(self.amount)
    }
}

/// Appointment fields surfaced in the upcoming-events feed.
#[derive(Debug, Clone, FromRow)]
pub struct AppointmentRow {
    pub id: Uuid,
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub status: String,
}

/// File/folder counts and total stored bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StorageUsage {
    pub files: i64,
    pub folders: i64,
    pub total_bytes: i64,
}

/// Total and unread notification counts.
#[derive(Debug, Clone, Copy, Default, FromRow)]
pub struct NotificationCounts {
    pub total: i64,
    pub unread: i64,
}

/// Accounting aggregates: settled sums plus row counts for the no-signal
/// check.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountingTotals {
    pub paid_payments: f64,
    pub paid_invoices: f64,
    pub approved_expenses: f64,
    pub property_expenses: f64,
    pub payment_count: i64,
    pub invoice_count: i64,
    pub expense_count: i64,
    pub property_expense_count: i64,
}

impl AccountingTotals {
    pub fn income(&self) -> f64 {
        self.paid_payments + self.paid_invoices
    }

    pub fn outgoings(&self) -> f64 {
        self.approved_expenses + self.property_expenses
    }

    pub fn net_balance(&self) -> f64 {
        self.income() - self.outgoings()
    }

    /// Whether any accounting row exists at all, settled or not.
    pub fn has_activity(&self) -> bool {
        self.payment_count + self.invoice_count + self.expense_count + self.property_expense_count
            > 0
    }
}

/// Product and order counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductionCounts {
    pub products: i64,
    pub orders: i64,
    pub open_orders: i64,
}

/// Read interface the dashboard probes run against.
///
/// [`ScopedStore`] implements it over PostgreSQL; tests substitute
/// in-memory fakes, including deliberately failing ones.
pub trait DashboardStore {
    fn count_properties(&self) -> impl Future<Output = Result<i64, AppError>> + Send;
    fn apartments(&self) -> impl Future<Output = Result<Vec<ApartmentRow>, AppError>> + Send;
    fn active_contracts(&self) -> impl Future<Output = Result<Vec<ContractRow>, AppError>> + Send;
    fn storage_usage(&self) -> impl Future<Output = Result<StorageUsage, AppError>> + Send;
    fn count_appointments(&self) -> impl Future<Output = Result<i64, AppError>> + Send;
    fn count_appointments_from(
        &self,
        from: DateTime<Utc>,
    ) -> impl Future<Output = Result<i64, AppError>> + Send;
    fn count_appointments_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> impl Future<Output = Result<i64, AppError>> + Send;
    fn upcoming_appointments(
        &self,
        from: DateTime<Utc>,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<AppointmentRow>, AppError>> + Send;
    fn notification_counts(
        &self,
    ) -> impl Future<Output = Result<NotificationCounts, AppError>> + Send;
    fn count_employees(&self) -> impl Future<Output = Result<i64, AppError>> + Send;
    fn count_departments(&self) -> impl Future<Output = Result<i64, AppError>> + Send;
    fn accounting_totals(&self) -> impl Future<Output = Result<AccountingTotals, AppError>> + Send;
    fn open_payments(&self) -> impl Future<Output = Result<Vec<PaymentRow>, AppError>> + Send;
    fn production_counts(
        &self,
    ) -> impl Future<Output = Result<ProductionCounts, AppError>> + Send;
}

/// Build a single-table query with the scope predicate first.
///
/// `tail` may append further conditions (as `AND ...` with binds from `$3`
/// up) or ordering. Identifiers come from code, never from request input.
fn scoped(select: &str, table: &str, tail: &str) -> String {
    let mut sql = format!("SELECT {select} FROM {table} WHERE tenant_id = $1 AND company_id = $2");
    if !tail.is_empty() {
        sql.push(' ');
        sql.push_str(tail);
    }
    sql
}

/// PostgreSQL implementation of [`DashboardStore`] bound to one scope.
#[derive(Debug, Clone)]
pub struct ScopedStore<'a> {
    pool: &'a PgPool,
    scope: TenantScope,
}

impl<'a> ScopedStore<'a> {
    pub fn new(pool: &'a PgPool, scope: TenantScope) -> Self {
        Self { pool, scope }
    }

    /// Scoped `COUNT(*)` over one table.
    async fn count(&self, table: &str, tail: &str) -> Result<i64, AppError> {
        let sql = scoped("COUNT(*)", table, tail);
        let count = sqlx::query_scalar::<_, i64>(&sql)
            .bind(self.scope.tenant_id)
            .bind(self.scope.company_id)
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

impl DashboardStore for ScopedStore<'_> {
    async fn count_properties(&self) -> Result<i64, AppError> {
        self.count("properties", "").await
    }

    async fn apartments(&self) -> Result<Vec<ApartmentRow>, AppError> {
        let sql = scoped("id, status", "apartments", "");
        let rows = sqlx::query_as::<_, ApartmentRow>(&sql)
            .bind(self.scope.tenant_id)
            .bind(self.scope.company_id)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    async fn active_contracts(&self) -> Result<Vec<ContractRow>, AppError> {
        let sql = scoped("apartment_id, end_date", "contracts", "AND status = 'active'");
        let rows = sqlx::query_as::<_, ContractRow>(&sql)
            .bind(self.scope.tenant_id)
            .bind(self.scope.company_id)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    async fn storage_usage(&self) -> Result<StorageUsage, AppError> {
        let sql = scoped("COUNT(*), COALESCE(SUM(size), 0)::BIGINT", "files", "");
        let (files, total_bytes) = sqlx::query_as::<_, (i64, i64)>(&sql)
            .bind(self.scope.tenant_id)
            .bind(self.scope.company_id)
            .fetch_one(self.pool)
            .await?;
        let folders = self.count("folders", "").await?;
        Ok(StorageUsage {
            files,
            folders,
            total_bytes,
        })
    }

    async fn count_appointments(&self) -> Result<i64, AppError> {
        self.count("appointments", "").await
    }

    async fn count_appointments_from(&self, from: DateTime<Utc>) -> Result<i64, AppError> {
        let sql = scoped(
            "COUNT(*)",
            "appointments",
            "AND status <> 'cancelled' AND start_date >= $3",
        );
        let count = sqlx::query_scalar::<_, i64>(&sql)
            .bind(self.scope.tenant_id)
            .bind(self.scope.company_id)
            .bind(from)
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    async fn count_appointments_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        let sql = scoped(
            "COUNT(*)",
            "appointments",
            "AND status <> 'cancelled' AND start_date >= $3 AND start_date < $4",
        );
        let count = sqlx::query_scalar::<_, i64>(&sql)
            .bind(self.scope.tenant_id)
            .bind(self.scope.company_id)
            .bind(from)
            .bind(to)
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    async fn upcoming_appointments(
        &self,
        from: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<AppointmentRow>, AppError> {
        // The status predicate sits before the LIMIT so a cancelled row
        // near the front cannot push a real appointment out of the feed.
        let sql = scoped(
            "id, title, start_date, status",
            "appointments",
            "AND status <> 'cancelled' AND start_date >= $3 ORDER BY start_date ASC LIMIT $4",
        );
        let rows = sqlx::query_as::<_, AppointmentRow>(&sql)
            .bind(self.scope.tenant_id)
            .bind(self.scope.company_id)
            .bind(from)
            .bind(limit)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    async fn notification_counts(&self) -> Result<NotificationCounts, AppError> {
        let sql = scoped(
            "COUNT(*) AS total, \
             COALESCE(SUM(CASE WHEN is_read = FALSE THEN 1 ELSE 0 END), 0) AS unread",
            "notifications",
            "",
        );
        let counts = sqlx::query_as::<_, NotificationCounts>(&sql)
            .bind(self.scope.tenant_id)
            .bind(self.scope.company_id)
            .fetch_one(self.pool)
            .await?;
        Ok(counts)
    }

    async fn count_employees(&self) -> Result<i64, AppError> {
        self.count("employees", "").await
    }

    async fn count_departments(&self) -> Result<i64, AppError> {
        self.count("departments", "").await
    }

    async fn accounting_totals(&self) -> Result<AccountingTotals, AppError> {
        let sql = scoped(
            "COUNT(*), \
             COALESCE(SUM(CASE WHEN status = 'paid' \
                 THEN COALESCE(total_amount, amount) ELSE 0 END), 0)::DOUBLE PRECISION",
            "payments",
            "",
        );
        let (payment_count, paid_payments) = sqlx::query_as::<_, (i64, f64)>(&sql)
            .bind(self.scope.tenant_id)
            .bind(self.scope.company_id)
            .fetch_one(self.pool)
            .await?;

        let sql = scoped(
            "COUNT(*), \
             COALESCE(SUM(CASE WHEN status = 'paid' THEN total_amount ELSE 0 END), 0)\
             ::DOUBLE PRECISION",
            "invoices",
            "",
        );
        let (invoice_count, paid_invoices) = sqlx::query_as::<_, (i64, f64)>(&sql)
            .bind(self.scope.tenant_id)
            .bind(self.scope.company_id)
            .fetch_one(self.pool)
            .await?;

        let sql = scoped(
            "COUNT(*), \
             COALESCE(SUM(CASE WHEN status = 'approved' THEN amount ELSE 0 END), 0)\
             ::DOUBLE PRECISION",
            "expenses",
            "",
        );
        let (expense_count, approved_expenses) = sqlx::query_as::<_, (i64, f64)>(&sql)
            .bind(self.scope.tenant_id)
            .bind(self.scope.company_id)
            .fetch_one(self.pool)
            .await?;

        let sql = scoped(
            "COUNT(*), COALESCE(SUM(amount), 0)::DOUBLE PRECISION",
            "property_expenses",
            "",
        );
        let (property_expense_count, property_expenses) = sqlx::query_as::<_, (i64, f64)>(&sql)
            .bind(self.scope.tenant_id)
            .bind(self.scope.company_id)
            .fetch_one(self.pool)
            .await?;

        Ok(AccountingTotals {
            paid_payments,
            paid_invoices,
            approved_expenses,
            property_expenses,
            payment_count,
            invoice_count,
            expense_count,
            property_expense_count,
        })
    }

    async fn open_payments(&self) -> Result<Vec<PaymentRow>, AppError> {
        let sql = scoped(
            "status, amount, total_amount",
            "payments",
            "AND status IN ('pending', 'overdue')",
        );
        let rows = sqlx::query_as::<_, PaymentRow>(&sql)
            .bind(self.scope.tenant_id)
            .bind(self.scope.company_id)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    async fn production_counts(&self) -> Result<ProductionCounts, AppError> {
        let products = self.count("products", "").await?;
        let sql = scoped(
            "COUNT(*), \
             COALESCE(SUM(CASE WHEN status IN ('pending', 'in_progress') THEN 1 ELSE 0 END), 0)",
            "orders",
            "",
        );
        let (orders, open_orders) = sqlx::query_as::<_, (i64, i64)>(&sql)
            .bind(self.scope.tenant_id)
            .bind(self.scope.company_id)
            .fetch_one(self.pool)
            .await?;
        Ok(ProductionCounts {
            products,
            orders,
            open_orders,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_query_starts_with_scope_predicate() {
        let sql = scoped("COUNT(*)", "properties", "");
        assert_eq!(
            sql,
            "SELECT COUNT(*) FROM properties WHERE tenant_id = $1 AND company_id = $2"
        );
    }

    #[test]
    fn scoped_query_appends_tail_after_scope() {
        let sql = scoped("id, status", "apartments", "AND status = 'rented'");
        assert!(sql.starts_with("SELECT id, status FROM apartments WHERE tenant_id = $1"));
        assert!(sql.ends_with("AND company_id = $2 AND status = 'rented'"));
    }

    #[test]
    fn effective_amount_prefers_total() {
        let with_total = PaymentRow {
            status: "pending".to_string(),
            amount: 500.0,
            total_amount: Some(525.5),
        };
        assert_eq!(with_total.effective_amount(), 525.5);

        let without_total = PaymentRow {
            status: "pending".to_string(),
            amount: 500.0,
            total_amount: None,
        };
        assert_eq!(without_total.effective_amount(), 500.0);
    }

    #[test]
    fn net_balance_subtracts_outgoings_from_income() {
        let totals = AccountingTotals {
            paid_payments: 1000.0,
            paid_invoices: 500.0,
            approved_expenses: 300.0,
            property_expenses: 200.0,
            payment_count: 4,
            invoice_count: 2,
            expense_count: 1,
            property_expense_count: 1,
        };
        assert_eq!(totals.income(), 1500.0);
        assert_eq!(totals.outgoings(), 500.0);
        assert_eq!(totals.net_balance(), 1000.0);
        assert!(totals.has_activity());
    }

    #[test]
    fn empty_ledger_has_no_activity() {
        assert!(!AccountingTotals::default().has_activity());
    }
}
