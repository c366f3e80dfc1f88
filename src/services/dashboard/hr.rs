//! HR probe: employee and department headcounts.

use super::{ProbeContext, ProbeOutput};
use crate::errors::AppError;
use crate::models::dashboard::{DashboardModule, ModuleSummary, QuickAction, StatEntry};
use crate::services::store::DashboardStore;

pub async fn probe<S: DashboardStore>(ctx: &ProbeContext<'_, S>) -> Result<ProbeOutput, AppError> {
    let employees = ctx.store.count_employees().await?;
    let departments = ctx.store.count_departments().await?;

    if employees == 0 && departments == 0 {
        return Ok(ProbeOutput::default());
    }

    let mut card = ModuleSummary::new(DashboardModule::Hr);
    card.stats = vec![
        StatEntry::count("Employees", employees),
        StatEntry::count("Departments", departments),
    ];
    card.quick_actions = Some(vec![QuickAction::new(
        "Add employee",
        "/hr/employees",
        "user-plus",
    )]);

    Ok(ProbeOutput {
        summary: Some(card),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::super::testing::FakeStore;
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn departments_alone_are_a_signal() {
        let store = FakeStore {
            departments: 2,
            ..Default::default()
        };
        let ctx = ProbeContext {
            store: &store,
            now: Utc::now(),
            currency: "USD",
        };
        let output = probe(&ctx).await.unwrap();
        let card = output.summary.expect("card");
        assert_eq!(card.module, DashboardModule::Hr);
        assert_eq!(card.stats[0], StatEntry::count("Employees", 0));
        assert_eq!(card.stats[1], StatEntry::count("Departments", 2));
    }
}
