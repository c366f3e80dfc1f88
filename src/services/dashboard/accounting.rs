//! Accounting probe: settled income/expense totals, net balance, and the
//! pending-payments alert.

use super::{ProbeContext, ProbeOutput};
use crate::errors::AppError;
use crate::models::dashboard::{
    DashboardModule, DashboardNotification, ModuleSummary, NotificationKind, NotificationMeta,
    QuickAction, StatEntry,
};
use crate::services::store::{DashboardStore, PaymentRow};

pub async fn probe<S: DashboardStore>(ctx: &ProbeContext<'_, S>) -> Result<ProbeOutput, AppError> {
    let totals = ctx.store.accounting_totals().await?;

    if !totals.has_activity() {
        return Ok(ProbeOutput::default());
    }

    let open = ctx.store.open_payments().await?;

    let mut card = ModuleSummary::new(DashboardModule::Accounting);
    card.stats = vec![
        StatEntry::amount("Income", totals.income()),
        StatEntry::amount("Expenses", totals.outgoings()),
        StatEntry::amount("Net balance", totals.net_balance()),
    ];
    card.quick_actions = Some(vec![
        QuickAction::new("New invoice", "/accounting/invoices", "file-plus"),
        QuickAction::new("Record expense", "/accounting/expenses", "receipt"),
    ]);

    let mut output = ProbeOutput {
        summary: Some(card),
        ..Default::default()
    };

    if let Some(alert) = payment_alert(&open, ctx.currency) {
        output.notifications.push(alert);
    }

    Ok(output)
}

/// Build the pending-payments alert.
///
/// Severity is `error` as soon as anything is overdue, `warning` when all
/// open payments are merely pending. Meta carries the row count and the
/// exact unformatted sum so clients can do their own math.
fn payment_alert(open: &[PaymentRow], currency: &str) -> Option<DashboardNotification> {
    if open.is_empty() {
        return None;
    }

    let count = open.len() as i64;
    let amount: f64 = open.iter().map(PaymentRow::effective_amount).sum();
    let any_overdue = open.iter().any(|p| p.status == "overdue");

    let (kind, title) = if any_overdue {
        (NotificationKind::Error, "Payments overdue")
    } else {
        (NotificationKind::Warning, "Payments pending")
    };

    Some(DashboardNotification {
        id: "pending-payments".to_string(),
        kind,
        title: title.to_string(),
        description: format!(
            "{count} payment(s) awaiting settlement, {} in total",
            crate::format::currency(amount, currency)
        ),
        module: DashboardModule::Accounting,
        meta: Some(NotificationMeta {
            count: Some(count),
            amount: Some(amount),
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::super::testing::FakeStore;
    use super::*;
    use crate::models::dashboard::StatValue;
    use crate::services::store::AccountingTotals;
    use chrono::Utc;

    fn payment(status: &str, amount: f64, total_amount: Option<f64>) -> PaymentRow {
        PaymentRow {
            status: status.to_string(),
            amount,
            total_amount,
        }
    }

    #[test]
    fn no_open_payments_no_alert() {
        assert!(payment_alert(&[], "USD").is_none());
    }

    #[test]
    fn pending_only_is_a_warning() {
        let open = vec![payment("pending", 500.0, None)];
        let alert = payment_alert(&open, "USD").unwrap();
        assert_eq!(alert.kind, NotificationKind::Warning);
        assert_eq!(alert.title, "Payments pending");
    }

    #[test]
    fn one_overdue_escalates_to_error() {
        let open = vec![
            payment("pending", 500.0, None),
            payment("overdue", 300.0, None),
        ];
        let alert = payment_alert(&open, "USD").unwrap();
        assert_eq!(alert.kind, NotificationKind::Error);
        let meta = alert.meta.unwrap();
        assert_eq!(meta.count, Some(2));
        assert_eq!(meta.amount, Some(800.0));
        assert!(alert.description.contains("$800.00"));
    }

    #[test]
    fn sum_prefers_total_amount_per_row() {
        let open = vec![
            payment("pending", 500.0, Some(550.0)),
            payment("pending", 300.0, None),
        ];
        let alert = payment_alert(&open, "EUR").unwrap();
        assert_eq!(alert.meta.unwrap().amount, Some(850.0));
    }

    #[tokio::test]
    async fn card_reports_net_balance() {
        let store = FakeStore {
            accounting: AccountingTotals {
                paid_payments: 1000.0,
                paid_invoices: 500.0,
                approved_expenses: 300.0,
                property_expenses: 200.0,
                payment_count: 4,
                invoice_count: 2,
                expense_count: 1,
                property_expense_count: 1,
            },
            ..Default::default()
        };
        let ctx = ProbeContext {
            store: &store,
            now: Utc::now(),
            currency: "USD",
        };
        let output = probe(&ctx).await.unwrap();
        let card = output.summary.expect("card");
        let net = card
            .stats
            .iter()
            .find(|s| s.label == "Net balance")
            .expect("net balance stat");
        assert_eq!(net.value, StatValue::Amount(1000.0));
        assert_eq!(net.is_currency, Some(true));
        assert!(output.notifications.is_empty());
    }

    #[tokio::test]
    async fn unsettled_rows_alone_produce_card_and_alert() {
        let store = FakeStore {
            accounting: AccountingTotals {
                payment_count: 1,
                ..Default::default()
            },
            open_payments: vec![payment("pending", 120.0, None)],
            ..Default::default()
        };
        let ctx = ProbeContext {
            store: &store,
            now: Utc::now(),
            currency: "USD",
        };
        let output = probe(&ctx).await.unwrap();
        assert!(output.summary.is_some());
        assert_eq!(output.notifications.len(), 1);
        assert_eq!(output.notifications[0].id, "pending-payments");
    }
}
