//! Calendar probe: appointment counts plus the upcoming-events feed.

use chrono::Duration;

use super::{ProbeContext, ProbeOutput, UPCOMING_EVENT_CAP};
use crate::errors::AppError;
use crate::models::dashboard::{
    DashboardModule, ModuleSummary, QuickAction, StatEntry, UpcomingEvent,
};
use crate::services::store::DashboardStore;

pub async fn probe<S: DashboardStore>(ctx: &ProbeContext<'_, S>) -> Result<ProbeOutput, AppError> {
    let total = ctx.store.count_appointments().await?;
    if total == 0 {
        return Ok(ProbeOutput::default());
    }

    let upcoming = ctx.store.count_appointments_from(ctx.now).await?;
    let this_week = ctx
        .store
        .count_appointments_between(ctx.now, ctx.now + Duration::days(7))
        .await?;
    let next = ctx
        .store
        .upcoming_appointments(ctx.now, UPCOMING_EVENT_CAP as i64)
        .await?;

    let mut card = ModuleSummary::new(DashboardModule::Calendar);
    card.stats = vec![
        StatEntry::count("Upcoming", upcoming),
        StatEntry::count("This week", this_week),
    ];
    card.quick_actions = Some(vec![QuickAction::new(
        "New appointment",
        "/calendar",
        "plus",
    )]);

    // Cancelled appointments are excluded at the store level, from the
    // counts and the feed alike.
    let events = next
        .into_iter()
        .map(|appointment| UpcomingEvent {
            id: appointment.id,
            module: DashboardModule::Calendar,
            kind: "appointment".to_string(),
            title: appointment.title,
            date: appointment.start_date,
            icon: DashboardModule::Calendar.icon().to_string(),
            color: DashboardModule::Calendar.color().to_string(),
        })
        .collect();

    Ok(ProbeOutput {
        summary: Some(card),
        events,
        ..Default::default()
    })
}
