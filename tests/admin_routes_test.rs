mod common;

use actix_web::{http::header, test};
use serde_json::{json, Value};

use staybook_api::db::store::StoreEvent;
use staybook_api::models::user::UserRole;

use common::{approx, status_of, TestApp};

#[actix_rt::test]
async fn test_admin_routes_without_auth() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/reservations")
        .to_request();
    assert_eq!(status_of(&app, req).await, 401);
}

#[actix_rt::test]
async fn test_admin_routes_without_admin_role() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/promotions")
        .insert_header((header::AUTHORIZATION, test_app.guest_token()))
        .to_request();
    assert_eq!(status_of(&app, req).await, 403);
}

#[actix_rt::test]
async fn test_admin_signin_grants_admin_routes() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let signin = test::TestRequest::post()
        .uri("/api/auth/admin/signin")
        .set_json(json!({ "email": "ops@example.com", "password": "x" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, signin).await;
    assert_eq!(body["user"]["role"], "admin");

    let req = test::TestRequest::get()
        .uri("/api/admin/reservations/stats")
        .insert_header((
            header::AUTHORIZATION,
            format!("Bearer {}", body["authToken"].as_str().unwrap()),
        ))
        .to_request();
    let stats: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["pending"], 1);
    assert_eq!(stats["confirmed"], 1);
    assert!(approx(&stats["totalRevenue"], 3490.0));
}

#[actix_rt::test]
async fn test_list_reservations_with_filters() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;
    let token = test_app.admin_token();

    let all = test::TestRequest::get()
        .uri("/api/admin/reservations?status=all")
        .insert_header((header::AUTHORIZATION, token.clone()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, all).await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let search = test::TestRequest::get()
        .uri("/api/admin/reservations?q=SARAH")
        .insert_header((header::AUTHORIZATION, token.clone()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, search).await;
    let found = body.as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["hotelName"], "Coastal Resort");

    let confirmed = test::TestRequest::get()
        .uri("/api/admin/reservations?status=confirmed")
        .insert_header((header::AUTHORIZATION, token.clone()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, confirmed).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["guestName"], "John Smith");

    let bogus = test::TestRequest::get()
        .uri("/api/admin/reservations?status=lost")
        .insert_header((header::AUTHORIZATION, token))
        .to_request();
    assert_eq!(status_of(&app, bogus).await, 400);
}

#[actix_rt::test]
async fn test_export_reservations_csv() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/admin/reservations/export")
        .insert_header((header::AUTHORIZATION, test_app.admin_token()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/csv"
    );
    assert!(resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .contains("reservations.csv"));

    let body = test::read_body(resp).await;
    let csv = std::str::from_utf8(&body).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "1,Grand Hotel,John Smith,john.smith@example.com,2023-12-15,2023-12-20,confirmed,900"
    );
}

#[actix_rt::test]
async fn test_update_and_delete_reservation() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;
    let token = test_app.admin_token();
    let mut events = test_app.notifier.subscribe();

    let update = test::TestRequest::put()
        .uri("/api/admin/reservations/2/status")
        .insert_header((header::AUTHORIZATION, token.clone()))
        .set_json(json!({ "status": "confirmed" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, update).await;
    assert_eq!(body["status"], "confirmed");
    assert_eq!(
        events.recv().await.unwrap(),
        StoreEvent::ReservationUpdated { id: "2".to_string() }
    );

    let delete = test::TestRequest::delete()
        .uri("/api/admin/reservations/3")
        .insert_header((header::AUTHORIZATION, token.clone()))
        .to_request();
    assert_eq!(status_of(&app, delete).await, 204);

    let missing = test::TestRequest::delete()
        .uri("/api/admin/reservations/3")
        .insert_header((header::AUTHORIZATION, token.clone()))
        .to_request();
    assert_eq!(status_of(&app, missing).await, 404);

    let stats = test::TestRequest::get()
        .uri("/api/admin/reservations/stats")
        .insert_header((header::AUTHORIZATION, token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, stats).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["confirmed"], 2);
    assert_eq!(body["pending"], 0);
}

#[actix_rt::test]
async fn test_promotion_crud() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;
    let token = test_app.bearer("ops@example.com", UserRole::Admin);

    let create = test::TestRequest::post()
        .uri("/api/admin/promotions")
        .insert_header((header::AUTHORIZATION, token.clone()))
        .set_json(json!({
            "name": "Winter Escape",
            "description": "Cold months",
            "discountPercent": 15,
            "startDate": "",
            "endDate": "2031-02-28",
            "hotelIds": ["2"],
        }))
        .to_request();
    let resp = test::call_service(&app, create).await;
    assert_eq!(resp.status(), 201);
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["status"], "active");
    assert!(created["code"].as_str().unwrap().starts_with("PROMO"));
    assert!(id.parse::<i64>().is_ok());

    let search = test::TestRequest::get()
        .uri("/api/admin/promotions?q=winter")
        .insert_header((header::AUTHORIZATION, token.clone()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, search).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let edit = test::TestRequest::put()
        .uri(&format!("/api/admin/promotions/{}", id))
        .insert_header((header::AUTHORIZATION, token.clone()))
        .set_json(json!({
            "name": "Winter Escape",
            "discountPercent": 25,
            "hotelIds": ["2"],
            "code": "SNOW25",
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, edit).await;
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["code"], "SNOW25");
    assert_eq!(body["status"], "active");

    let deactivate = test::TestRequest::put()
        .uri(&format!("/api/admin/promotions/{}/status", id))
        .insert_header((header::AUTHORIZATION, token.clone()))
        .set_json(json!({ "status": "inactive" }))
        .to_request();
    assert_eq!(status_of(&app, deactivate).await, 204);

    // Inactive promotions no longer price hotel 2
    let hotel = test::TestRequest::get().uri("/api/hotels/2").to_request();
    let body: Value = test::call_and_read_body_json(&app, hotel).await;
    assert!(body["promotions"]
        .as_array()
        .unwrap()
        .iter()
        .all(|p| p["id"] != id.as_str()));

    let delete = test::TestRequest::delete()
        .uri(&format!("/api/admin/promotions/{}", id))
        .insert_header((header::AUTHORIZATION, token.clone()))
        .to_request();
    assert_eq!(status_of(&app, delete).await, 204);

    let list = test::TestRequest::get()
        .uri("/api/admin/promotions")
        .insert_header((header::AUTHORIZATION, token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, list).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[actix_rt::test]
async fn test_invalid_promotion_rejected() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/promotions")
        .insert_header((header::AUTHORIZATION, test_app.admin_token()))
        .set_json(json!({ "name": "Too Good", "discountPercent": 150 }))
        .to_request();
    assert_eq!(status_of(&app, req).await, 400);

    let missing = test::TestRequest::put()
        .uri("/api/admin/promotions/nope")
        .insert_header((header::AUTHORIZATION, test_app.admin_token()))
        .set_json(json!({ "name": "Ghost", "discountPercent": 5 }))
        .to_request();
    assert_eq!(status_of(&app, missing).await, 404);
}
