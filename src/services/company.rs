//! Company resolution for tenant-scoped requests.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::company::Company;

/// Resolve the company a request operates on.
///
/// An explicit selection must belong to the tenant; without one the first
/// company by creation order wins. A tenant with no companies at all cannot
/// be served and maps to the `NO_COMPANY` precondition failure.
pub async fn resolve(
    pool: &PgPool,
    tenant_id: Uuid,
    explicit: Option<Uuid>,
) -> Result<Company, AppError> {
    if let Some(company_id) = explicit {
        return sqlx::query_as::<_, Company>(
            "SELECT * FROM companies WHERE id = $1 AND tenant_id = $2",
        )
        .bind(company_id)
        .bind(tenant_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| {
            AppError::Validation(format!(
                "Company '{company_id}' does not belong to this tenant"
            ))
        });
    }

    sqlx::query_as::<_, Company>(
        "SELECT * FROM companies WHERE tenant_id = $1 ORDER BY created_at ASC, id ASC LIMIT 1",
    )
    .bind(tenant_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NoCompany)
}

/// All companies of a tenant in creation order.
pub async fn list(pool: &PgPool, tenant_id: Uuid) -> Result<Vec<Company>, AppError> {
    let companies = sqlx::query_as::<_, Company>(
        "SELECT * FROM companies WHERE tenant_id = $1 ORDER BY created_at ASC, id ASC",
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .await?;
    Ok(companies)
}
