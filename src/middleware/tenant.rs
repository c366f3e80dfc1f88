//! Tenant resolution for incoming requests.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::tenant::{ModuleSet, Tenant};
use crate::AppState;

/// Header carrying the tenant id, resolved upstream by the edge proxy.
pub const TENANT_HEADER: &str = "x-tenant-id";

/// Extractor that resolves the calling tenant from the `X-Tenant-Id`
/// header and loads its row.
///
/// A missing or malformed header, an unknown tenant, and a deactivated
/// tenant all reject with the same `TENANT_REQUIRED` response; callers
/// learn nothing about which tenants exist.
#[derive(Debug, Clone)]
pub struct TenantContext {
    pub tenant: Tenant,
    pub modules: ModuleSet,
}

impl FromRequestParts<AppState> for TenantContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(TENANT_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::TenantRequired)?;

        let tenant_id: Uuid = header.trim().parse().map_err(|_| AppError::TenantRequired)?;

        let tenant = sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE id = $1")
            .bind(tenant_id)
            .fetch_optional(&state.db)
            .await?
            .ok_or(AppError::TenantRequired)?;

        if !tenant.is_active {
            tracing::debug!(tenant_id = %tenant_id, "Rejecting request for deactivated tenant");
            return Err(AppError::TenantRequired);
        }

        let modules = tenant.module_set();
        Ok(TenantContext { tenant, modules })
    }
}
