use crate::schemas::{ApiResponse, AppState, AsOfQuery, CachedData};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use common::TenantBalanceReport;
use model::entities::tenant;
use rust_decimal::Decimal;
use sea_orm::EntityTrait;
use tracing::{debug, error, instrument, warn};

/// Full balance reconciliation for one tenant
///
/// Every obligation the tenant can owe money on, scored against their
/// payment ledger as of the reference date.
#[utoipa::path(
    get,
    path = "/api/v1/tenants/{tenant_id}/balance",
    tag = "reports",
    params(
        ("tenant_id" = i32, Path, description = "Tenant ID"),
        ("as_of" = Option<NaiveDate>, Query, description = "Reference date (YYYY-MM-DD), defaults to today"),
    ),
    responses(
        (status = 200, description = "Balance report computed", body = ApiResponse<TenantBalanceReport>),
        (status = 404, description = "Tenant not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_tenant_balance(
    Path(tenant_id): Path<i32>,
    Query(query): Query<AsOfQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<TenantBalanceReport>>, StatusCode> {
    let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());

    match tenant::Entity::find_by_id(tenant_id).one(&state.db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!("Tenant with ID {} not found", tenant_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to lookup tenant {}: {}", tenant_id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    match ledger::tenant_balance_report(&state.db, tenant_id, as_of).await {
        Ok(report) => {
            debug!(
                "Balance report for tenant {}: {} obligations, {} outstanding",
                tenant_id,
                report.obligations.len(),
                report.outstanding
            );
            let response = ApiResponse {
                data: report,
                message: "Balance report computed".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(e) => {
            error!("Failed to compute balance for tenant {}: {}", tenant_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Outstanding balances across all tenants
///
/// One report per tenant that still owes money. Cached briefly; any
/// ledger or obligation write invalidates the cache.
#[utoipa::path(
    get,
    path = "/api/v1/reports/outstanding",
    tag = "reports",
    params(
        ("as_of" = Option<NaiveDate>, Query, description = "Reference date (YYYY-MM-DD), defaults to today"),
    ),
    responses(
        (status = 200, description = "Outstanding report computed", body = ApiResponse<Vec<TenantBalanceReport>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_outstanding_report(
    Query(query): Query<AsOfQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TenantBalanceReport>>>, StatusCode> {
    let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let cache_key = format!("outstanding:{}", as_of);

    if let Some(CachedData::Outstanding(reports)) = state.cache.get(&cache_key).await {
        debug!("Returning cached outstanding report for {}", as_of);
        return Ok(Json(ApiResponse {
            data: reports,
            message: "Outstanding report computed".to_string(),
            success: true,
        }));
    }

    let tenants = match tenant::Entity::find().all(&state.db).await {
        Ok(tenants) => tenants,
        Err(db_error) => {
            error!("Failed to retrieve tenants: {}", db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut reports = Vec::new();
    for tenant_model in &tenants {
        match ledger::tenant_balance_report(&state.db, tenant_model.id, as_of).await {
            Ok(report) if report.outstanding > Decimal::ZERO => reports.push(report),
            Ok(_) => {}
            Err(e) => {
                error!(
                    "Failed to compute balance for tenant {}: {}",
                    tenant_model.id, e
                );
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    }

    state
        .cache
        .insert(cache_key, CachedData::Outstanding(reports.clone()))
        .await;

    let response = ApiResponse {
        data: reports,
        message: "Outstanding report computed".to_string(),
        success: true,
    };
    Ok(Json(response))
}
