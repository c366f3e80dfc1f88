//! Notifications probe: unread inbox counts.

use super::{ProbeContext, ProbeOutput};
use crate::errors::AppError;
use crate::models::dashboard::{DashboardModule, ModuleSummary, QuickAction, StatEntry};
use crate::services::store::DashboardStore;

pub async fn probe<S: DashboardStore>(ctx: &ProbeContext<'_, S>) -> Result<ProbeOutput, AppError> {
    let counts = ctx.store.notification_counts().await?;

    if counts.total == 0 {
        return Ok(ProbeOutput::default());
    }

    let mut card = ModuleSummary::new(DashboardModule::Notifications);
    card.stats = vec![
        StatEntry::count("Unread", counts.unread),
        StatEntry::count("Total", counts.total),
    ];
    card.quick_actions = Some(vec![QuickAction::new("Open inbox", "/notifications", "bell")]);

    Ok(ProbeOutput {
        summary: Some(card),
        ..Default::default()
    })
}
