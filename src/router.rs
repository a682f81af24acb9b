use crate::handlers::{
    health::health_check,
    houses::{create_house, delete_house, get_house, get_houses, update_house},
    maintenance::{
        create_maintenance_issue, create_maintenance_request, delete_maintenance_issue,
        delete_maintenance_request, get_maintenance_issue, get_maintenance_issues,
        get_maintenance_request, get_maintenance_requests, update_maintenance_issue,
        update_maintenance_request,
    },
    monthly_services::{
        create_monthly_service, delete_monthly_service, get_monthly_service,
        get_monthly_services, update_monthly_service,
    },
    payments::{create_payment, get_payment, get_payments},
    rents::{
        create_rent, delete_rent, get_active_rent, get_expiring_rents, get_rent, get_rents,
        update_rent,
    },
    reports::{get_outstanding_report, get_tenant_balance},
    rooms::{create_room, delete_room, get_room, get_rooms, update_room},
    tenants::{create_tenant, delete_tenant, get_tenant, get_tenants, update_tenant},
    users::{create_user, delete_user, get_user, get_users, update_user},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // House CRUD routes
        .route("/api/v1/houses", post(create_house))
        .route("/api/v1/houses", get(get_houses))
        .route("/api/v1/houses/:house_id", get(get_house))
        .route("/api/v1/houses/:house_id", put(update_house))
        .route("/api/v1/houses/:house_id", delete(delete_house))
        // Room CRUD routes
        .route("/api/v1/rooms", post(create_room))
        .route("/api/v1/rooms", get(get_rooms))
        .route("/api/v1/rooms/:room_id", get(get_room))
        .route("/api/v1/rooms/:room_id", put(update_room))
        .route("/api/v1/rooms/:room_id", delete(delete_room))
        // User CRUD routes
        .route("/api/v1/users", post(create_user))
        .route("/api/v1/users", get(get_users))
        .route("/api/v1/users/:user_id", get(get_user))
        .route("/api/v1/users/:user_id", put(update_user))
        .route("/api/v1/users/:user_id", delete(delete_user))
        // Tenant CRUD routes
        .route("/api/v1/tenants", post(create_tenant))
        .route("/api/v1/tenants", get(get_tenants))
        .route("/api/v1/tenants/:tenant_id", get(get_tenant))
        .route("/api/v1/tenants/:tenant_id", put(update_tenant))
        .route("/api/v1/tenants/:tenant_id", delete(delete_tenant))
        // Rent agreement routes
        .route("/api/v1/rents", post(create_rent))
        .route("/api/v1/rents", get(get_rents))
        .route("/api/v1/rents/expiring", get(get_expiring_rents))
        .route("/api/v1/rents/:rent_id", get(get_rent))
        .route("/api/v1/rents/:rent_id", put(update_rent))
        .route("/api/v1/rents/:rent_id", delete(delete_rent))
        // Monthly service bill routes
        .route("/api/v1/monthly-services", post(create_monthly_service))
        .route("/api/v1/monthly-services", get(get_monthly_services))
        .route("/api/v1/monthly-services/:service_id", get(get_monthly_service))
        .route("/api/v1/monthly-services/:service_id", put(update_monthly_service))
        .route("/api/v1/monthly-services/:service_id", delete(delete_monthly_service))
        // Maintenance catalog and request routes
        .route("/api/v1/maintenance-issues", post(create_maintenance_issue))
        .route("/api/v1/maintenance-issues", get(get_maintenance_issues))
        .route("/api/v1/maintenance-issues/:issue_id", get(get_maintenance_issue))
        .route("/api/v1/maintenance-issues/:issue_id", put(update_maintenance_issue))
        .route("/api/v1/maintenance-issues/:issue_id", delete(delete_maintenance_issue))
        .route("/api/v1/maintenance-requests", post(create_maintenance_request))
        .route("/api/v1/maintenance-requests", get(get_maintenance_requests))
        .route("/api/v1/maintenance-requests/:request_id", get(get_maintenance_request))
        .route("/api/v1/maintenance-requests/:request_id", put(update_maintenance_request))
        .route("/api/v1/maintenance-requests/:request_id", delete(delete_maintenance_request))
        // Payment ledger routes (append-only: no update or delete)
        .route("/api/v1/payments", post(create_payment))
        .route("/api/v1/payments", get(get_payments))
        .route("/api/v1/payments/:payment_id", get(get_payment))
        // Report routes
        .route("/api/v1/tenants/:tenant_id/active-rent", get(get_active_rent))
        .route("/api/v1/tenants/:tenant_id/balance", get(get_tenant_balance))
        .route("/api/v1/reports/outstanding", get(get_outstanding_report))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
