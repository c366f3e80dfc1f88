//! Company routes: selection support for the dashboard's company scope.

use axum::extract::State;
use axum::Json;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::tenant::TenantContext;
use crate::models::company::Company;
use crate::services::company;
use crate::AppState;

/// GET /api/companies — the tenant's companies in creation order.
pub async fn list(
    State(state): State<AppState>,
    tenant: TenantContext,
) -> Result<Json<ApiResponse<Vec<Company>>>, AppError> {
    let companies = company::list(&state.db, tenant.tenant.id).await?;
    Ok(ApiResponse::success(companies))
}
