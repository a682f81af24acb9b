use crate::handlers::houses::HouseResponse;
use crate::handlers::maintenance::{MaintenanceIssueResponse, MaintenanceRequestResponse};
use crate::handlers::monthly_services::MonthlyServiceResponse;
use crate::handlers::payments::PaymentResponse;
use crate::handlers::rents::RentResponse;
use crate::handlers::rooms::RoomResponse;
use crate::handlers::tenants::TenantResponse;
use crate::schemas::{ApiResponse, ErrorResponse};
use crate::test_utils::test_utils::setup_test_app;
use axum::http::StatusCode;
use axum_test::TestServer;
use common::{ContractStanding, ContractStatus, ObligationKind, PaymentStatus, TenantBalanceReport};
use rust_decimal::Decimal;
use serde_json::json;

fn dec(s: &str) -> Decimal {
    s.parse().expect("decimal literal")
}

async fn create_house(server: &TestServer) -> i32 {
    let response = server
        .post("/api/v1/houses")
        .json(&json!({
            "name": "Elm House",
            "address": "12 Elm Street"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<ApiResponse<HouseResponse>>().data.id
}

async fn create_room(server: &TestServer, house_id: i32) -> i32 {
    let response = server
        .post("/api/v1/rooms")
        .json(&json!({
            "house_id": house_id,
            "name": "A1",
            "monthly_rent": "500.00"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<ApiResponse<RoomResponse>>().data.id
}

async fn create_tenant(server: &TestServer, name: &str) -> i32 {
    let response = server
        .post("/api/v1/tenants")
        .json(&json!({
            "name": name,
            "phone": "555-0100"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<ApiResponse<TenantResponse>>().data.id
}

async fn create_rent(server: &TestServer, tenant_id: i32, room_id: i32) -> i32 {
    let response = server
        .post("/api/v1/rents")
        .json(&json!({
            "tenant_id": tenant_id,
            "room_id": room_id,
            "monthly_rent": "500.00",
            "months": 12,
            "start_date": "2025-01-01",
            "end_date": "2025-12-31"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<ApiResponse<RentResponse>>().data.id
}

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::new(setup_test_app().await).unwrap();

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn test_user_crud_and_unique_username() {
    let server = TestServer::new(setup_test_app().await).unwrap();

    let response = server
        .post("/api/v1/users")
        .json(&json!({ "username": "landlord" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let user_id = response
        .json::<ApiResponse<crate::handlers::users::UserResponse>>()
        .data
        .id;

    let response = server
        .post("/api/v1/users")
        .json(&json!({ "username": "landlord" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body = response.json::<ErrorResponse>();
    assert_eq!(body.code, "USERNAME_ALREADY_EXISTS");

    let response = server.delete(&format!("/api/v1/users/{}", user_id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_house_crud() {
    let server = TestServer::new(setup_test_app().await).unwrap();

    let house_id = create_house(&server).await;

    let response = server.get(&format!("/api/v1/houses/{}", house_id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<ApiResponse<HouseResponse>>();
    assert_eq!(body.data.name, "Elm House");

    let response = server
        .put(&format!("/api/v1/houses/{}", house_id))
        .json(&json!({ "description": "renovated 2024" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<ApiResponse<HouseResponse>>();
    assert_eq!(body.data.description.as_deref(), Some("renovated 2024"));

    let response = server.delete(&format!("/api/v1/houses/{}", house_id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server.get(&format!("/api/v1/houses/{}", house_id)).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_house_create_rejects_empty_name() {
    let server = TestServer::new(setup_test_app().await).unwrap();

    let response = server
        .post("/api/v1/houses")
        .json(&json!({ "name": "", "address": "12 Elm Street" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<ErrorResponse>();
    assert_eq!(body.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_room_create_rejects_unknown_house() {
    let server = TestServer::new(setup_test_app().await).unwrap();

    let response = server
        .post("/api/v1/rooms")
        .json(&json!({
            "house_id": 999,
            "name": "A1",
            "monthly_rent": "500.00"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<ErrorResponse>();
    assert_eq!(body.code, "HOUSE_NOT_FOUND");
}

#[tokio::test]
async fn test_rent_creation_occupies_room_and_checks_terms() {
    let server = TestServer::new(setup_test_app().await).unwrap();
    let house_id = create_house(&server).await;
    let room_id = create_room(&server, house_id).await;
    let tenant_id = create_tenant(&server, "Alice").await;

    // Total that does not multiply out is rejected.
    let response = server
        .post("/api/v1/rents")
        .json(&json!({
            "tenant_id": tenant_id,
            "room_id": room_id,
            "monthly_rent": "500.00",
            "months": 12,
            "total_rent": "5999.00",
            "start_date": "2025-01-01"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let rent_id = create_rent(&server, tenant_id, room_id).await;

    let response = server.get(&format!("/api/v1/rents/{}", rent_id)).await;
    let body = response.json::<ApiResponse<RentResponse>>();
    assert_eq!(body.data.total_rent, dec("6000.00"));

    // The room flipped to occupied in the same transaction.
    let response = server.get(&format!("/api/v1/rooms/{}", room_id)).await;
    let body = response.json::<ApiResponse<RoomResponse>>();
    assert_eq!(body.data.status, "occupied");
}

#[tokio::test]
async fn test_rent_update_recomputes_total() {
    let server = TestServer::new(setup_test_app().await).unwrap();
    let house_id = create_house(&server).await;
    let room_id = create_room(&server, house_id).await;
    let tenant_id = create_tenant(&server, "Alice").await;
    let rent_id = create_rent(&server, tenant_id, room_id).await;

    let response = server
        .put(&format!("/api/v1/rents/{}", rent_id))
        .json(&json!({ "months": 6 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<ApiResponse<RentResponse>>();
    assert_eq!(body.data.total_rent, dec("3000.00"));

    // An explicit total that contradicts the terms is rejected.
    let response = server
        .put(&format!("/api/v1/rents/{}", rent_id))
        .json(&json!({ "months": 10, "total_rent": "123.00" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_tenant_delete_blocked_while_rent_exists() {
    let server = TestServer::new(setup_test_app().await).unwrap();
    let house_id = create_house(&server).await;
    let room_id = create_room(&server, house_id).await;
    let tenant_id = create_tenant(&server, "Alice").await;
    let rent_id = create_rent(&server, tenant_id, room_id).await;

    let response = server.delete(&format!("/api/v1/tenants/{}", tenant_id)).await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body = response.json::<ErrorResponse>();
    assert_eq!(body.code, "TENANT_HAS_RECORDS");

    // After the agreement goes, the tenant can be removed.
    let response = server.delete(&format!("/api/v1/rents/{}", rent_id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let response = server.delete(&format!("/api/v1/tenants/{}", tenant_id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_rent_delete_releases_room() {
    let server = TestServer::new(setup_test_app().await).unwrap();
    let house_id = create_house(&server).await;
    let room_id = create_room(&server, house_id).await;
    let tenant_id = create_tenant(&server, "Alice").await;
    let rent_id = create_rent(&server, tenant_id, room_id).await;

    server.delete(&format!("/api/v1/rents/{}", rent_id)).await;

    let response = server.get(&format!("/api/v1/rooms/{}", room_id)).await;
    let body = response.json::<ApiResponse<RoomResponse>>();
    assert_eq!(body.data.status, "available");
}

#[tokio::test]
async fn test_monthly_service_component_sum_and_uniqueness() {
    let server = TestServer::new(setup_test_app().await).unwrap();
    let house_id = create_house(&server).await;
    let room_id = create_room(&server, house_id).await;

    // Mismatched explicit total is rejected.
    let response = server
        .post("/api/v1/monthly-services")
        .json(&json!({
            "room_id": room_id,
            "month": "2025-06-01",
            "water_total": "30.50",
            "electricity_total": "80.00",
            "trash_fee": "10.00",
            "maintenance_fee": "0.00",
            "total_amount": "999.00"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // Omitted total is derived from the components.
    let response = server
        .post("/api/v1/monthly-services")
        .json(&json!({
            "room_id": room_id,
            "month": "2025-06-15",
            "water_total": "30.50",
            "electricity_total": "80.00",
            "trash_fee": "10.00",
            "maintenance_fee": "0.00"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body = response.json::<ApiResponse<MonthlyServiceResponse>>();
    assert_eq!(body.data.total_amount, dec("120.50"));
    // The mid-month date was normalized to the first.
    assert_eq!(body.data.month.to_string(), "2025-06-01");

    // Second bill for the same room and month is a conflict.
    let response = server
        .post("/api/v1/monthly-services")
        .json(&json!({
            "room_id": room_id,
            "month": "2025-06-01",
            "water_total": "1.00",
            "electricity_total": "1.00",
            "trash_fee": "1.00",
            "maintenance_fee": "0.00"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body = response.json::<ErrorResponse>();
    assert_eq!(body.code, "SERVICE_ALREADY_BILLED");
}

#[tokio::test]
async fn test_maintenance_request_snapshots_catalog_prices() {
    let server = TestServer::new(setup_test_app().await).unwrap();
    let house_id = create_house(&server).await;
    let room_id = create_room(&server, house_id).await;
    let tenant_id = create_tenant(&server, "Alice").await;

    let response = server
        .post("/api/v1/maintenance-issues")
        .json(&json!({ "name": "Leaking tap", "price": "25.00" }))
        .await;
    let issue_id = response
        .json::<ApiResponse<MaintenanceIssueResponse>>()
        .data
        .id;

    let response = server
        .post("/api/v1/maintenance-requests")
        .json(&json!({
            "tenant_id": tenant_id,
            "room_id": room_id,
            "issue_ids": [issue_id],
            "requested_on": "2025-06-01"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body = response.json::<ApiResponse<MaintenanceRequestResponse>>();
    let request_id = body.data.id;
    assert_eq!(body.data.total_price, dec("25.00"));
    assert_eq!(body.data.status, "open");

    // Raising the catalog price later does not change the filed request.
    server
        .put(&format!("/api/v1/maintenance-issues/{}", issue_id))
        .json(&json!({ "price": "99.00" }))
        .await;

    let response = server
        .get(&format!("/api/v1/maintenance-requests/{}", request_id))
        .await;
    let body = response.json::<ApiResponse<MaintenanceRequestResponse>>();
    assert_eq!(body.data.total_price, dec("25.00"));
    let lines = body.data.issues.expect("detail includes lines");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].price, dec("25.00"));

    // Status workflow update.
    let response = server
        .put(&format!("/api/v1/maintenance-requests/{}", request_id))
        .json(&json!({ "status": "done" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<ApiResponse<MaintenanceRequestResponse>>();
    assert_eq!(body.data.status, "done");
}

#[tokio::test]
async fn test_maintenance_request_rejects_unknown_issue() {
    let server = TestServer::new(setup_test_app().await).unwrap();
    let house_id = create_house(&server).await;
    let room_id = create_room(&server, house_id).await;
    let tenant_id = create_tenant(&server, "Alice").await;

    let response = server
        .post("/api/v1/maintenance-requests")
        .json(&json!({
            "tenant_id": tenant_id,
            "room_id": room_id,
            "issue_ids": [999]
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<ErrorResponse>();
    assert_eq!(body.code, "ISSUE_NOT_FOUND");
}

#[tokio::test]
async fn test_payment_lifecycle_with_running_balance() {
    let server = TestServer::new(setup_test_app().await).unwrap();
    let house_id = create_house(&server).await;
    let room_id = create_room(&server, house_id).await;
    let tenant_id = create_tenant(&server, "Alice").await;
    let rent_id = create_rent(&server, tenant_id, room_id).await;

    // A non-positive amount never reaches the ledger.
    let response = server
        .post("/api/v1/payments")
        .json(&json!({
            "tenant_id": tenant_id,
            "kind": "rent",
            "reference_id": rent_id,
            "amount": "-5.00",
            "paid_on": "2025-02-01"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<ErrorResponse>();
    assert_eq!(body.code, "INVALID_AMOUNT");

    let response = server
        .post("/api/v1/payments")
        .json(&json!({
            "tenant_id": tenant_id,
            "kind": "rent",
            "reference_id": rent_id,
            "amount": "2000.00",
            "paid_on": "2025-02-01"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body = response.json::<ApiResponse<PaymentResponse>>();
    assert_eq!(body.data.balance_after, dec("4000.00"));
    assert_eq!(body.data.rent_id, Some(rent_id));

    // Paying more than the remaining balance is rejected.
    let response = server
        .post("/api/v1/payments")
        .json(&json!({
            "tenant_id": tenant_id,
            "kind": "rent",
            "reference_id": rent_id,
            "amount": "4500.00",
            "paid_on": "2025-03-01"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<ErrorResponse>();
    assert_eq!(body.code, "EXCEEDS_REMAINING_BALANCE");

    // Settling exactly works, and the obligation then refuses more money.
    let response = server
        .post("/api/v1/payments")
        .json(&json!({
            "tenant_id": tenant_id,
            "kind": "rent",
            "reference_id": rent_id,
            "amount": "4000.00",
            "paid_on": "2025-03-01"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body = response.json::<ApiResponse<PaymentResponse>>();
    assert_eq!(body.data.balance_after, Decimal::ZERO);

    let response = server
        .post("/api/v1/payments")
        .json(&json!({
            "tenant_id": tenant_id,
            "kind": "rent",
            "reference_id": rent_id,
            "amount": "1.00",
            "paid_on": "2025-04-01"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<ErrorResponse>();
    assert_eq!(body.code, "BALANCE_ALREADY_ZERO");
}

#[tokio::test]
async fn test_payment_unknown_reference_is_not_found() {
    let server = TestServer::new(setup_test_app().await).unwrap();
    let tenant_id = create_tenant(&server, "Alice").await;

    let response = server
        .post("/api/v1/payments")
        .json(&json!({
            "tenant_id": tenant_id,
            "kind": "rent",
            "reference_id": 999,
            "amount": "100.00"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body = response.json::<ErrorResponse>();
    assert_eq!(body.code, "REFERENCE_NOT_FOUND");
}

#[tokio::test]
async fn test_payment_idempotency_key_replays() {
    let server = TestServer::new(setup_test_app().await).unwrap();
    let house_id = create_house(&server).await;
    let room_id = create_room(&server, house_id).await;
    let tenant_id = create_tenant(&server, "Alice").await;
    let rent_id = create_rent(&server, tenant_id, room_id).await;

    let payload = json!({
        "tenant_id": tenant_id,
        "kind": "rent",
        "reference_id": rent_id,
        "amount": "2000.00",
        "paid_on": "2025-02-01",
        "idempotency_key": "feb-rent-alice"
    });

    let first = server.post("/api/v1/payments").json(&payload).await;
    assert_eq!(first.status_code(), StatusCode::CREATED);
    let first_id = first.json::<ApiResponse<PaymentResponse>>().data.id;

    let replay = server.post("/api/v1/payments").json(&payload).await;
    assert_eq!(replay.status_code(), StatusCode::CREATED);
    assert_eq!(replay.json::<ApiResponse<PaymentResponse>>().data.id, first_id);

    let listing = server
        .get(&format!("/api/v1/payments?tenant_id={}", tenant_id))
        .await;
    let body = listing.json::<ApiResponse<Vec<PaymentResponse>>>();
    assert_eq!(body.data.len(), 1);
}

#[tokio::test]
async fn test_payment_listing_filters_by_kind() {
    let server = TestServer::new(setup_test_app().await).unwrap();
    let house_id = create_house(&server).await;
    let room_id = create_room(&server, house_id).await;
    let tenant_id = create_tenant(&server, "Alice").await;
    let rent_id = create_rent(&server, tenant_id, room_id).await;

    let response = server
        .post("/api/v1/monthly-services")
        .json(&json!({
            "room_id": room_id,
            "month": "2025-02-01",
            "water_total": "30.50",
            "electricity_total": "80.00",
            "trash_fee": "10.00",
            "maintenance_fee": "0.00"
        }))
        .await;
    let service_id = response
        .json::<ApiResponse<MonthlyServiceResponse>>()
        .data
        .id;

    server
        .post("/api/v1/payments")
        .json(&json!({
            "tenant_id": tenant_id,
            "kind": "rent",
            "reference_id": rent_id,
            "amount": "2000.00",
            "paid_on": "2025-02-01"
        }))
        .await;
    server
        .post("/api/v1/payments")
        .json(&json!({
            "tenant_id": tenant_id,
            "kind": "service",
            "reference_id": service_id,
            "amount": "120.50",
            "paid_on": "2025-02-05"
        }))
        .await;

    let listing = server
        .get(&format!(
            "/api/v1/payments?tenant_id={}&kind=service",
            tenant_id
        ))
        .await;
    let body = listing.json::<ApiResponse<Vec<PaymentResponse>>>();
    assert_eq!(body.data.len(), 1);
    assert_eq!(body.data[0].kind, ObligationKind::Service);
    assert_eq!(body.data[0].monthly_service_id, Some(service_id));

    let listing = server.get("/api/v1/payments?kind=rent").await;
    let body = listing.json::<ApiResponse<Vec<PaymentResponse>>>();
    assert_eq!(body.data.len(), 1);
    assert_eq!(body.data[0].rent_id, Some(rent_id));
}

#[tokio::test]
async fn test_active_rent_lookup() {
    let server = TestServer::new(setup_test_app().await).unwrap();
    let tenant_id = create_tenant(&server, "Alice").await;

    // Without any agreements the lookup succeeds with empty data.
    let response = server
        .get(&format!(
            "/api/v1/tenants/{}/active-rent?as_of=2025-06-01",
            tenant_id
        ))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<ApiResponse<Option<RentResponse>>>();
    assert!(body.data.is_none());

    let house_id = create_house(&server).await;
    let room_id = create_room(&server, house_id).await;
    let rent_id = create_rent(&server, tenant_id, room_id).await;

    let response = server
        .get(&format!(
            "/api/v1/tenants/{}/active-rent?as_of=2025-06-01",
            tenant_id
        ))
        .await;
    let body = response.json::<ApiResponse<Option<RentResponse>>>();
    assert_eq!(body.data.map(|r| r.id), Some(rent_id));

    // Past the window the most recent agreement still answers.
    let response = server
        .get(&format!(
            "/api/v1/tenants/{}/active-rent?as_of=2026-06-01",
            tenant_id
        ))
        .await;
    let body = response.json::<ApiResponse<Option<RentResponse>>>();
    assert_eq!(body.data.map(|r| r.id), Some(rent_id));
}

#[tokio::test]
async fn test_adjustment_reopens_settled_obligation() {
    let server = TestServer::new(setup_test_app().await).unwrap();
    let house_id = create_house(&server).await;
    let room_id = create_room(&server, house_id).await;
    let tenant_id = create_tenant(&server, "Alice").await;
    let rent_id = create_rent(&server, tenant_id, room_id).await;

    server
        .post("/api/v1/payments")
        .json(&json!({
            "tenant_id": tenant_id,
            "kind": "rent",
            "reference_id": rent_id,
            "amount": "6000.00",
            "paid_on": "2025-02-01"
        }))
        .await;

    let response = server
        .post("/api/v1/payments")
        .json(&json!({
            "tenant_id": tenant_id,
            "kind": "rent",
            "reference_id": rent_id,
            "entry": "adjustment",
            "amount": "-500.00",
            "paid_on": "2025-02-10",
            "note": "overcharged one month"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body = response.json::<ApiResponse<PaymentResponse>>();
    assert_eq!(body.data.balance_after, dec("500.00"));

    let report = server
        .get(&format!(
            "/api/v1/tenants/{}/balance?as_of=2025-03-01",
            tenant_id
        ))
        .await
        .json::<ApiResponse<TenantBalanceReport>>();
    assert_eq!(report.data.outstanding, dec("500.00"));
    assert_eq!(report.data.obligations[0].status, PaymentStatus::Partial);
}

#[tokio::test]
async fn test_tenant_balance_report_statuses() {
    let server = TestServer::new(setup_test_app().await).unwrap();
    let house_id = create_house(&server).await;
    let room_id = create_room(&server, house_id).await;
    let tenant_id = create_tenant(&server, "Alice").await;
    let rent_id = create_rent(&server, tenant_id, room_id).await;

    // A service bill inside the agreement window.
    server
        .post("/api/v1/monthly-services")
        .json(&json!({
            "room_id": room_id,
            "month": "2025-02-01",
            "water_total": "30.50",
            "electricity_total": "80.00",
            "trash_fee": "10.00",
            "maintenance_fee": "0.00"
        }))
        .await;

    server
        .post("/api/v1/payments")
        .json(&json!({
            "tenant_id": tenant_id,
            "kind": "rent",
            "reference_id": rent_id,
            "amount": "2000.00",
            "paid_on": "2025-02-01"
        }))
        .await;

    let report = server
        .get(&format!(
            "/api/v1/tenants/{}/balance?as_of=2025-06-01",
            tenant_id
        ))
        .await
        .json::<ApiResponse<TenantBalanceReport>>();

    assert_eq!(report.data.obligations.len(), 2);
    assert_eq!(report.data.total_due, dec("6120.50"));
    assert_eq!(report.data.total_paid, dec("2000.00"));
    assert_eq!(report.data.outstanding, dec("4120.50"));

    let rent_summary = report
        .data
        .obligations
        .iter()
        .find(|o| o.kind == ObligationKind::Rent)
        .expect("rent summary");
    assert_eq!(rent_summary.obligation_id, rent_id);
    assert_eq!(rent_summary.status, PaymentStatus::Partial);

    // The untouched service bill is past its billing month.
    let service_summary = report
        .data
        .obligations
        .iter()
        .find(|o| o.kind == ObligationKind::Service)
        .expect("service summary");
    assert_eq!(service_summary.status, PaymentStatus::Overdue);
}

#[tokio::test]
async fn test_balance_for_unknown_tenant_is_not_found() {
    let server = TestServer::new(setup_test_app().await).unwrap();

    let response = server.get("/api/v1/tenants/999/balance").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_expiring_rents_classification() {
    let server = TestServer::new(setup_test_app().await).unwrap();
    let house_id = create_house(&server).await;
    let room_id = create_room(&server, house_id).await;
    let tenant_id = create_tenant(&server, "Alice").await;
    // Agreement runs all of 2025.
    let rent_id = create_rent(&server, tenant_id, room_id).await;

    // Mid-term: nothing to report.
    let response = server.get("/api/v1/rents/expiring?as_of=2025-06-01").await;
    let body = response.json::<ApiResponse<Vec<ContractStanding>>>();
    assert!(body.data.is_empty());

    // Within the final month: expiring, with the days counted down.
    let response = server.get("/api/v1/rents/expiring?as_of=2025-12-15").await;
    let body = response.json::<ApiResponse<Vec<ContractStanding>>>();
    assert_eq!(body.data.len(), 1);
    assert_eq!(body.data[0].rent_id, rent_id);
    assert_eq!(body.data[0].status, ContractStatus::ExpiringSoon);
    assert_eq!(body.data[0].days_remaining, 16);

    // On the end date itself the contract is still not expired.
    let response = server.get("/api/v1/rents/expiring?as_of=2025-12-31").await;
    let body = response.json::<ApiResponse<Vec<ContractStanding>>>();
    assert_eq!(body.data[0].status, ContractStatus::ExpiringSoon);
    assert_eq!(body.data[0].days_remaining, 0);

    // The day after, it is.
    let response = server.get("/api/v1/rents/expiring?as_of=2026-01-01").await;
    let body = response.json::<ApiResponse<Vec<ContractStanding>>>();
    assert_eq!(body.data[0].status, ContractStatus::Expired);
    assert_eq!(body.data[0].days_remaining, -1);
}

#[tokio::test]
async fn test_outstanding_report_skips_settled_tenants() {
    let server = TestServer::new(setup_test_app().await).unwrap();
    let house_id = create_house(&server).await;
    let room_a = create_room(&server, house_id).await;
    let room_b = {
        let response = server
            .post("/api/v1/rooms")
            .json(&json!({
                "house_id": house_id,
                "name": "A2",
                "monthly_rent": "500.00"
            }))
            .await;
        response.json::<ApiResponse<RoomResponse>>().data.id
    };

    let alice = create_tenant(&server, "Alice").await;
    let bob = create_tenant(&server, "Bob").await;
    let alice_rent = create_rent(&server, alice, room_a).await;
    let bob_rent = create_rent(&server, bob, room_b).await;

    // Bob settles in full; Alice pays nothing.
    server
        .post("/api/v1/payments")
        .json(&json!({
            "tenant_id": bob,
            "kind": "rent",
            "reference_id": bob_rent,
            "amount": "6000.00",
            "paid_on": "2025-01-15"
        }))
        .await;

    let response = server
        .get("/api/v1/reports/outstanding?as_of=2025-06-01")
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<ApiResponse<Vec<TenantBalanceReport>>>();
    assert_eq!(body.data.len(), 1);
    assert_eq!(body.data[0].tenant_id, alice);
    assert_eq!(body.data[0].outstanding, dec("6000.00"));
    assert_eq!(body.data[0].obligations[0].obligation_id, alice_rent);
}

#[tokio::test]
async fn test_openapi_json_is_served() {
    let server = TestServer::new(setup_test_app().await).unwrap();

    let response = server.get("/api-docs/openapi.json").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["info"]["title"], "RentRust API");
    assert!(body["paths"]["/api/v1/payments"].is_object());
}
