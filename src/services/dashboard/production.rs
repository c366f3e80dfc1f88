//! Production probe: product catalog and order-book counts.

use super::{ProbeContext, ProbeOutput};
use crate::errors::AppError;
use crate::models::dashboard::{DashboardModule, ModuleSummary, QuickAction, StatEntry};
use crate::services::store::DashboardStore;

pub async fn probe<S: DashboardStore>(ctx: &ProbeContext<'_, S>) -> Result<ProbeOutput, AppError> {
    let counts = ctx.store.production_counts().await?;

    if counts.products == 0 && counts.orders == 0 {
        return Ok(ProbeOutput::default());
    }

    let mut card = ModuleSummary::new(DashboardModule::Production);
    card.stats = vec![
        StatEntry::count("Products", counts.products),
        StatEntry::count("Orders", counts.orders),
        StatEntry::count("Open orders", counts.open_orders),
    ];
    card.quick_actions = Some(vec![QuickAction::new(
        "New order",
        "/production/orders",
        "plus",
    )]);

    Ok(ProbeOutput {
        summary: Some(card),
        ..Default::default()
    })
}
