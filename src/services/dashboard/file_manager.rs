//! File-manager probe: file/folder counts and formatted storage usage.

use super::{ProbeContext, ProbeOutput};
use crate::errors::AppError;
use crate::models::dashboard::{DashboardModule, ModuleSummary, QuickAction, StatEntry};
use crate::services::store::DashboardStore;

pub async fn probe<S: DashboardStore>(ctx: &ProbeContext<'_, S>) -> Result<ProbeOutput, AppError> {
    let usage = ctx.store.storage_usage().await?;

    if usage.files == 0 && usage.folders == 0 {
        return Ok(ProbeOutput::default());
    }

    let mut card = ModuleSummary::new(DashboardModule::FileManager);
    card.stats = vec![
        StatEntry::count("Files", usage.files),
        StatEntry::count("Folders", usage.folders),
        StatEntry::text("Storage used", crate::format::bytes(usage.total_bytes)),
    ];
    card.quick_actions = Some(vec![QuickAction::new("Upload file", "/files", "upload")]);

    Ok(ProbeOutput {
        summary: Some(card),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::super::testing::FakeStore;
    use super::*;
    use crate::models::dashboard::StatValue;
    use crate::services::store::StorageUsage;
    use chrono::Utc;

    fn ctx(store: &FakeStore) -> ProbeContext<'_, FakeStore> {
        ProbeContext {
            store,
            now: Utc::now(),
            currency: "USD",
        }
    }

    #[tokio::test]
    async fn empty_storage_has_no_card() {
        let store = FakeStore::default();
        let output = probe(&ctx(&store)).await.unwrap();
        assert!(output.summary.is_none());
    }

    #[tokio::test]
    async fn storage_stat_is_human_readable() {
        let store = FakeStore {
            storage: StorageUsage {
                files: 120,
                folders: 8,
                total_bytes: 2_576_980_378,
            },
            ..Default::default()
        };
        let output = probe(&ctx(&store)).await.unwrap();
        let card = output.summary.expect("card");
        assert_eq!(card.stats[0], StatEntry::count("Files", 120));
        let storage = card
            .stats
            .iter()
            .find(|s| s.label == "Storage used")
            .expect("storage stat");
        assert_eq!(storage.value, StatValue::Text("2.4 GB".to_string()));
    }
}
