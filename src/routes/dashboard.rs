//! Dashboard routes: the aggregated summary for the overview page.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::tenant::TenantContext;
use crate::models::dashboard::DashboardSummary;
use crate::services::store::{ScopedStore, TenantScope};
use crate::services::{company, dashboard};
use crate::AppState;

/// Optional explicit company selection, passed as `?company_id=<uuid>`.
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub company_id: Option<Uuid>,
}

/// GET /api/dashboard/summary — per-module stats, upcoming events, alerts.
pub async fn summary(
    State(state): State<AppState>,
    tenant: TenantContext,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<ApiResponse<DashboardSummary>>, AppError> {
    let company = company::resolve(&state.db, tenant.tenant.id, query.company_id).await?;
    let scope = TenantScope::new(tenant.tenant.id, company.id);
    let store = ScopedStore::new(&state.db, scope);

    let summary = dashboard::summarize(&store, &tenant.modules, &company.currency, Utc::now()).await;

    Ok(ApiResponse::success(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Uri;

    #[test]
    fn company_id_param_is_snake_case() {
        let uri: Uri = "/api/dashboard/summary?company_id=00000000-0000-0000-0000-000000000000"
            .parse()
            .unwrap();
        let Query(query) = Query::<SummaryQuery>::try_from_uri(&uri).unwrap();
        assert_eq!(query.company_id, Some(Uuid::nil()));
    }

    #[test]
    fn missing_company_id_param_is_none() {
        let uri: Uri = "/api/dashboard/summary".parse().unwrap();
        let Query(query) = Query::<SummaryQuery>::try_from_uri(&uri).unwrap();
        assert_eq!(query.company_id, None);
    }
}
