//! Real-estate probe: portfolio counts, occupancy, and the
//! expiring-contracts alert.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::{ProbeContext, ProbeOutput};
use crate::errors::AppError;
use crate::models::dashboard::{
    DashboardModule, DashboardNotification, ModuleSummary, NotificationKind, NotificationMeta,
    QuickAction, StatEntry,
};
use crate::services::store::{ApartmentRow, ContractRow, DashboardStore};

/// Active contracts ending inside this window raise the expiring alert.
pub const EXPIRY_WINDOW_DAYS: i64 = 30;

pub async fn probe<S: DashboardStore>(ctx: &ProbeContext<'_, S>) -> Result<ProbeOutput, AppError> {
    let properties = ctx.store.count_properties().await?;
    let apartments = ctx.store.apartments().await?;
    let contracts = ctx.store.active_contracts().await?;

    if properties == 0 && apartments.is_empty() {
        return Ok(ProbeOutput::default());
    }

    let under_contract: HashSet<Uuid> = contracts.iter().filter_map(|c| c.apartment_id).collect();
    let occupancy = occupancy_rate(&apartments, &under_contract);

    let mut card = ModuleSummary::new(DashboardModule::RealEstate);
    card.stats = vec![
        StatEntry::count("Properties", properties),
        StatEntry::count("Apartments", apartments.len() as i64),
        StatEntry::text("Occupancy", crate::format::percent(occupancy)),
        StatEntry::count("Active contracts", contracts.len() as i64),
    ];
    card.quick_actions = Some(vec![
        QuickAction::new("Add property", "/real-estate/properties/new", "plus"),
        QuickAction::new("New contract", "/real-estate/contracts/new", "file-plus"),
    ]);

    let mut output = ProbeOutput {
        summary: Some(card),
        ..Default::default()
    };

    let expiring = expiring_within(&contracts, ctx.now, EXPIRY_WINDOW_DAYS);
    if expiring > 0 {
        output.notifications.push(DashboardNotification {
            id: "expiring-contracts".to_string(),
            kind: NotificationKind::Warning,
            title: "Contracts expiring soon".to_string(),
            description: format!(
                "{expiring} contract(s) end within the next {EXPIRY_WINDOW_DAYS} days"
            ),
            module: DashboardModule::RealEstate,
            meta: Some(NotificationMeta {
                count: Some(expiring),
                amount: None,
            }),
        });
    }

    Ok(output)
}

/// Share of apartments that are occupied, rounded to a whole percentage.
///
/// An apartment counts as occupied when an active contract covers it or its
/// own status already says rented. No apartments means 0, not a division
/// by zero.
fn occupancy_rate(apartments: &[ApartmentRow], under_contract: &HashSet<Uuid>) -> u32 {
    if apartments.is_empty() {
        return 0;
    }
    let occupied = apartments
        .iter()
        .filter(|a| under_contract.contains(&a.id) || a.status == "rented")
        .count();
    ((occupied as f64 / apartments.len() as f64) * 100.0).round() as u32
}

/// Count contracts whose end date falls in `[now, now + days)`.
///
/// Contracts already past their end date are a data inconsistency, not an
/// upcoming expiry, and stay out of the alert.
fn expiring_within(contracts: &[ContractRow], now: DateTime<Utc>, days: i64) -> i64 {
    let cutoff = now + Duration::days(days);
    contracts
        .iter()
        .filter(|c| matches!(c.end_date, Some(end) if end >= now && end < cutoff))
        .count() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apartment(status: &str) -> ApartmentRow {
        ApartmentRow {
            id: Uuid::new_v4(),
            status: status.to_string(),
        }
    }

    fn contract_ending(end: Option<DateTime<Utc>>) -> ContractRow {
        ContractRow {
            apartment_id: None,
            end_date: end,
        }
    }

    fn now() -> DateTime<Utc> {
        "2026-08-23T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn occupancy_of_no_apartments_is_zero() {
        assert_eq!(occupancy_rate(&[], &HashSet::new()), 0);
    }

    #[test]
    fn occupancy_rounds_to_whole_percent() {
        let apartments = vec![apartment("rented"), apartment("rented"), apartment("vacant")];
        assert_eq!(occupancy_rate(&apartments, &HashSet::new()), 67);
    }

    #[test]
    fn contract_and_status_count_an_apartment_once() {
        let rented = apartment("rented");
        let under_contract: HashSet<Uuid> = [rented.id].into_iter().collect();
        let apartments = vec![rented, apartment("vacant")];
        assert_eq!(occupancy_rate(&apartments, &under_contract), 50);
    }

    #[test]
    fn contract_covers_apartment_regardless_of_status() {
        let vacant = apartment("vacant");
        let under_contract: HashSet<Uuid> = [vacant.id].into_iter().collect();
        let apartments = vec![vacant];
        assert_eq!(occupancy_rate(&apartments, &under_contract), 100);
    }

    #[test]
    fn expiry_window_is_half_open() {
        let now = now();
        let contracts = vec![
            contract_ending(Some(now)),
            contract_ending(Some(now + Duration::days(10))),
            contract_ending(Some(now + Duration::days(EXPIRY_WINDOW_DAYS))),
            contract_ending(Some(now + Duration::days(45))),
        ];
        // The boundary at exactly now counts, now + 30 days does not.
        assert_eq!(expiring_within(&contracts, now, EXPIRY_WINDOW_DAYS), 2);
    }

    #[test]
    fn lapsed_and_open_ended_contracts_do_not_expire() {
        let now = now();
        let contracts = vec![
            contract_ending(Some(now - Duration::days(1))),
            contract_ending(None),
        ];
        assert_eq!(expiring_within(&contracts, now, EXPIRY_WINDOW_DAYS), 0);
    }
}
