//! End-to-end flows through the HTTP router against an in-memory database

mod common;

use std::time::Duration;

use http::StatusCode;
use serde_json::json;

use common::{TABLE_QR, TestApp};

#[tokio::test]
async fn test_dinner_from_scan_to_payment() {
    let app = TestApp::new().await;

    let (status, table) = app
        .get(&format!("/api/tables/by-qr?qr_code_url={TABLE_QR}"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(table["table_number"], "A-1");

    let opened = app.open_session(4, Some("5551")).await;
    assert_eq!(opened["is_new"], true);
    let session = &opened["session"];
    assert_eq!(session["status"], "active");
    assert_eq!(session["party_size"], 4);
    assert_eq!(session["table_number"], "A-1");
    let session_id = session["id"].as_i64().unwrap();
    let code = session["session_code"].as_str().unwrap().to_string();

    let (status, first) = app
        .post(
            "/api/orders",
            json!({
                "session_code": code,
                "items": [
                    {"menu_item_id": app.ramen.id, "quantity": 2},
                    {"menu_item_id": app.gyoza.id, "quantity": 1, "note": "extra crispy"},
                ],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{first}");
    assert_eq!(first["total_amount"], "2200.00");
    assert_eq!(first["order_number"], 1);
    assert_eq!(first["status"], "pending");
    assert_eq!(first["items"].as_array().unwrap().len(), 2);
    assert_eq!(first["items"][0]["menu_item_name"], "Ramen");
    assert_eq!(first["items"][0]["subtotal"], "1700.00");

    let (status, second) = app
        .post(
            "/api/orders",
            json!({
                "session_code": code,
                "items": [{"menu_item_id": app.ramen.id, "quantity": 1}],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(second["order_number"], 2);

    // Kitchen drops the second order; it no longer counts toward the bill
    let second_id = second["id"].as_i64().unwrap();
    let (status, cancelled) = app
        .staff_post(
            &format!("/api/orders/{second_id}/status"),
            json!({"status": "cancelled"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "cancelled");
    assert!(cancelled["cancelled_at"].is_i64());
    assert!(cancelled["cancelled_by"].is_i64());
    assert_eq!(cancelled["items"][0]["status"], "cancelled");

    let (status, _) = app
        .post(
            "/api/staff-calls",
            json!({"session_code": code, "reason": "water"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, detail) = app.get(&format!("/api/sessions/{session_id}")).await;
    assert_eq!(detail["status"], "calling_staff");

    let (status, payment) = app
        .post("/api/payments", json!({"session_code": code}))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{payment}");
    assert_eq!(payment["total_amount"], "2200.00");
    assert_eq!(payment["status"], "pending");
    let (_, detail) = app.get(&format!("/api/sessions/{session_id}")).await;
    assert_eq!(detail["status"], "payment_requested");

    let payment_id = payment["id"].as_i64().unwrap();
    let (status, paid) = app
        .staff_post(
            &format!("/api/payments/{payment_id}/complete"),
            json!({"payment_method": "cash"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paid["status"], "paid");
    assert_eq!(paid["payment_method"], "cash");
    assert!(paid["paid_at"].is_i64());

    let (_, detail) = app.get(&format!("/api/sessions/{session_id}")).await;
    assert_eq!(detail["status"], "completed");
    assert!(detail["ended_at"].is_i64());
    assert_eq!(detail["total_amount"], "2200.00");

    // Two new orders and one staff call went to the diner's chat
    let sent = app.notifier.wait_for(3).await;
    assert_eq!(sent.len(), 3);
    assert!(sent.iter().all(|(chat, _)| chat == "5551"));
    assert!(sent.iter().any(|(_, text)| text.contains("Total: ¥2200.00")));
    assert!(sent.iter().any(|(_, text)| text.contains("Water, please")));
}

#[tokio::test]
async fn test_session_resume_is_idempotent() {
    let app = TestApp::new().await;

    let (status, first) = app
        .post(
            "/api/sessions",
            json!({"qr_code_url": TABLE_QR, "party_size": 2}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, again) = app
        .post(
            "/api/sessions",
            json!({"qr_code_url": TABLE_QR, "party_size": 5}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["is_new"], false);
    assert_eq!(again["session"]["id"], first["session"]["id"]);
    assert_eq!(again["session"]["party_size"], 2);

    let (status, list) = app.get("/api/sessions?active_only=true").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_session_open_rejects_bad_input() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/sessions",
            json!({"qr_code_url": TABLE_QR, "party_size": 0}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "party_size");

    let (status, _) = app
        .post(
            "/api/sessions",
            json!({"qr_code_url": "https://example.test/t/Z-9", "party_size": 2}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.get("/api/tables/by-qr").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = app
        .get("/api/tables/by-qr?qr_code_url=https://example.test/t/Z-9")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rejected_line_rejects_whole_order() {
    let app = TestApp::new().await;
    let opened = app.open_session(2, None).await;
    let session_id = opened["session"]["id"].as_i64().unwrap();
    let code = opened["session"]["session_code"].as_str().unwrap().to_string();

    // Gyoza is capped at 3 per order, split lines count together
    let (status, body) = app
        .post(
            "/api/orders",
            json!({
                "session_code": code,
                "items": [
                    {"menu_item_id": app.ramen.id, "quantity": 1},
                    {"menu_item_id": app.gyoza.id, "quantity": 2},
                    {"menu_item_id": app.gyoza.id, "quantity": 2},
                ],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4008);

    let (status, toggled) = app
        .staff_post(
            &format!("/api/menu-items/{}/toggle-availability", app.ramen.id),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["is_available"], false);

    let (status, body) = app
        .post(
            "/api/orders",
            json!({
                "session_code": code,
                "items": [
                    {"menu_item_id": app.gyoza.id, "quantity": 1},
                    {"menu_item_id": app.ramen.id, "quantity": 1},
                ],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6003);

    let (status, body) = app
        .post("/api/orders", json!({"session_code": code, "items": []}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4007);

    let (status, orders) = app.get(&format!("/api/sessions/{session_id}/orders")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(orders.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_item_statuses_roll_up_to_order() {
    let app = TestApp::new().await;
    let opened = app.open_session(2, None).await;
    let code = opened["session"]["session_code"].as_str().unwrap().to_string();

    let (_, order) = app
        .post(
            "/api/orders",
            json!({
                "session_code": code,
                "items": [
                    {"menu_item_id": app.ramen.id, "quantity": 1},
                    {"menu_item_id": app.gyoza.id, "quantity": 1},
                ],
            }),
        )
        .await;
    let order_id = order["id"].as_i64().unwrap();
    let item_ids: Vec<i64> = order["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_i64().unwrap())
        .collect();

    let (status, item) = app
        .staff_post(
            &format!("/api/order-items/{}/status", item_ids[0]),
            json!({"status": "served"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["status"], "served");

    // Items disagree, the order keeps its status
    let (_, current) = app.staff_get(&format!("/api/orders/{order_id}")).await;
    assert_eq!(current["status"], "pending");
    assert!(current["served_at"].is_null());

    app.staff_post(
        &format!("/api/order-items/{}/status", item_ids[1]),
        json!({"status": "served"}),
    )
    .await;
    let (_, current) = app.staff_get(&format!("/api/orders/{order_id}")).await;
    assert_eq!(current["status"], "served");
    assert!(current["served_at"].is_i64());

    // Served is terminal
    let (status, body) = app
        .staff_post(
            &format!("/api/order-items/{}/status", item_ids[0]),
            json!({"status": "cooking"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4009);

    let (status, _) = app
        .staff_post(
            &format!("/api/orders/{order_id}/status"),
            json!({"status": "eaten"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_payment_request_cancel_request() {
    let app = TestApp::new().await;
    let opened = app.open_session(2, None).await;
    let session_id = opened["session"]["id"].as_i64().unwrap();
    let code = opened["session"]["session_code"].as_str().unwrap().to_string();

    let (status, body) = app
        .post("/api/payments", json!({"session_code": code}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5007);

    app.post(
        "/api/orders",
        json!({
            "session_code": code,
            "items": [{"menu_item_id": app.gyoza.id, "quantity": 3}],
        }),
    )
    .await;

    let (status, first) = app
        .post("/api/payments", json!({"session_code": code}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["total_amount"], "1500.00");

    // Session is now payment_requested
    let (status, _) = app
        .post("/api/payments", json!({"session_code": code}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let first_id = first["id"].as_i64().unwrap();
    let (status, cancelled) = app
        .staff_post(&format!("/api/payments/{first_id}/cancel"), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "cancelled");
    let (_, detail) = app.get(&format!("/api/sessions/{session_id}")).await;
    assert_eq!(detail["status"], "active");

    let (status, second) = app
        .post("/api/payments", json!({"session_code": code}))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(second["id"], first["id"]);

    let (status, pending) = app.staff_get("/api/payments?pending_only=true").await;
    assert_eq!(status, StatusCode::OK);
    let pending = pending.as_array().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["id"], second["id"]);
    assert_eq!(pending[0]["table_number"], "A-1");

    let second_id = second["id"].as_i64().unwrap();
    let (status, body) = app
        .staff_post(
            &format!("/api/payments/{second_id}/complete"),
            json!({"payment_method": "bitcoin"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 5003);

    let (status, _) = app
        .staff_post(&format!("/api/payments/{first_id}/complete"), json!({"payment_method": "cash"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_staff_call_respond_and_resolve() {
    let app = TestApp::new().await;
    let opened = app.open_session(2, Some("777")).await;
    let session_id = opened["session"]["id"].as_i64().unwrap();
    let code = opened["session"]["session_code"].as_str().unwrap().to_string();

    let (status, body) = app
        .post(
            "/api/staff-calls",
            json!({"session_code": code, "reason": "karaoke"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "reason");

    let (status, call) = app
        .post(
            "/api/staff-calls",
            json!({"session_code": code, "reason": "question", "message": "Is the ramen spicy?"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(call["status"], "pending");
    let call_id = call["id"].as_i64().unwrap();

    let (status, pending) = app.staff_get("/api/staff-calls?pending_only=true").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pending.as_array().unwrap().len(), 1);

    let (status, responded) = app
        .staff_post(&format!("/api/staff-calls/{call_id}/respond"), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(responded["status"], "in_progress");
    assert!(responded["responded_at"].is_i64());
    let (_, detail) = app.get(&format!("/api/sessions/{session_id}")).await;
    assert_eq!(detail["status"], "active");

    let (status, resolved) = app
        .staff_post(&format!("/api/staff-calls/{call_id}/resolve"), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resolved["status"], "resolved");

    let (status, _) = app
        .staff_post(&format!("/api/staff-calls/{call_id}/resolve"), json!({}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let sent = app.notifier.wait_for(1).await;
    assert_eq!(sent[0].0, "777");
    assert!(sent[0].1.contains("Has a question"));
}

#[tokio::test]
async fn test_closed_session_refuses_orders() {
    let app = TestApp::new().await;
    let opened = app.open_session(2, None).await;
    let session_id = opened["session"]["id"].as_i64().unwrap();
    let code = opened["session"]["session_code"].as_str().unwrap().to_string();

    let (status, detail) = app
        .staff_post(&format!("/api/sessions/{session_id}/complete"), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["status"], "completed");

    let (status, body) = app
        .post(
            "/api/orders",
            json!({
                "session_code": code,
                "items": [{"menu_item_id": app.ramen.id, "quantity": 1}],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3002);

    // Table is free again, a new scan starts a fresh session
    let reopened = app.open_session(3, None).await;
    assert_eq!(reopened["is_new"], true);
    assert_ne!(reopened["session"]["id"], opened["session"]["id"]);
}

#[tokio::test]
async fn test_staff_routes_require_token_and_role() {
    let app = TestApp::new().await;

    let (status, _) = app.get("/api/orders/dashboard").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .request("GET", "/api/orders/dashboard", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app.staff_get("/api/orders/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    let (status, _) = app.staff_get("/api/users").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, users) = app
        .request("GET", "/api/users", Some(&app.admin_token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users.as_array().unwrap().len(), 2);

    // Public menu needs no token
    let (status, menu) = app
        .get(&format!("/api/menu-items?store_id={}", app.store_id))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(menu.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_login_and_user_admin() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/auth/login",
            json!({"username": "kitchen", "password": "wrong-pass"}),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1002);

    let (status, login) = app
        .post(
            "/api/auth/login",
            json!({"username": "kitchen", "password": "secret-pass"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(login["user"]["role"], "chef");
    let token = login["token"].as_str().unwrap();

    let (status, me) = app.request("GET", "/api/auth/me", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "kitchen");

    let (status, created) = app
        .request(
            "POST",
            "/api/users",
            Some(&app.admin_token),
            Some(json!({
                "username": "floor",
                "password": "floor-pass",
                "role": "staff",
                "store_id": app.store_id,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["store_name"], "Sakura");

    let (status, body) = app
        .request(
            "POST",
            "/api/users",
            Some(&app.admin_token),
            Some(json!({"username": "floor", "password": "floor-pass", "role": "staff"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 8002);

    // Disabled accounts lose access immediately
    let floor_id = created["id"].as_i64().unwrap();
    let (_, floor_login) = app
        .post(
            "/api/auth/login",
            json!({"username": "floor", "password": "floor-pass"}),
        )
        .await;
    let floor_token = floor_login["token"].as_str().unwrap().to_string();
    let (status, updated) = app
        .request(
            "PUT",
            &format!("/api/users/{floor_id}"),
            Some(&app.admin_token),
            Some(json!({"is_active": false})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["is_active"], false);
    let (status, _) = app
        .request("GET", "/api/orders/dashboard", Some(&floor_token), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_webhook_answers_commands() {
    let app = TestApp::new().await;
    let opened = app.open_session(2, Some("4242")).await;
    let code = opened["session"]["session_code"].as_str().unwrap().to_string();
    app.post(
        "/api/orders",
        json!({
            "session_code": code,
            "items": [{"menu_item_id": app.ramen.id, "quantity": 1}],
        }),
    )
    .await;
    // Drain the order notification
    app.notifier.wait_for(1).await;

    let (status, body) = app
        .post(
            "/api/telegram/webhook",
            json!({
                "update_id": 1,
                "message": {
                    "message_id": 10,
                    "from": {"id": 4242, "first_name": "Ann"},
                    "chat": {"id": 4242},
                    "text": "/status"
                }
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let sent = app.notifier.wait_for(2).await;
    let (chat, text) = &sent[1];
    assert_eq!(chat, "4242");
    assert!(text.contains("Order #1"));

    // Plain text is ignored but still acknowledged
    let (status, body) = app
        .post(
            "/api/telegram/webhook",
            json!({
                "update_id": 2,
                "message": {"message_id": 11, "chat": {"id": 4242}, "text": "hello"}
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(app.notifier.sent().len(), 2);

    let request = http::Request::builder()
        .method("POST")
        .uri("/api/telegram/webhook")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_health_reports_database() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");

    let (status, page) = app
        .send(
            http::Request::builder()
                .uri("/miniapp")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    // HTML body is not JSON
    assert!(page.is_null());
}

#[tokio::test]
async fn test_repeated_order_status_keeps_first_timestamp() {
    let app = TestApp::new().await;
    let opened = app.open_session(2, None).await;
    let code = opened["session"]["session_code"].as_str().unwrap().to_string();
    let (_, order) = app
        .post(
            "/api/orders",
            json!({
                "session_code": code,
                "items": [{"menu_item_id": app.ramen.id, "quantity": 1}],
            }),
        )
        .await;
    let uri = format!("/api/orders/{}/status", order["id"]);

    let (status, first) = app.staff_post(&uri, json!({"status": "cooking"})).await;
    assert_eq!(status, StatusCode::OK);
    let cooking_started_at = first["cooking_started_at"].as_i64().unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let (status, again) = app.staff_post(&uri, json!({"status": "cooking"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["cooking_started_at"], cooking_started_at);

    let (_, served) = app.staff_post(&uri, json!({"status": "served"})).await;
    let served_at = served["served_at"].as_i64().unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let (status, again) = app.staff_post(&uri, json!({"status": "served"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["status"], "served");
    assert_eq!(again["served_at"], served_at);
    assert_eq!(again["cooking_started_at"], cooking_started_at);
}

#[tokio::test]
async fn test_repeated_item_status_keeps_order_timestamp() {
    let app = TestApp::new().await;
    let opened = app.open_session(2, None).await;
    let code = opened["session"]["session_code"].as_str().unwrap().to_string();
    let (_, order) = app
        .post(
            "/api/orders",
            json!({
                "session_code": code,
                "items": [
                    {"menu_item_id": app.ramen.id, "quantity": 1},
                    {"menu_item_id": app.gyoza.id, "quantity": 1},
                ],
            }),
        )
        .await;
    let order_uri = format!("/api/orders/{}", order["id"]);
    let item_uris: Vec<String> = order["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| format!("/api/order-items/{}/status", i["id"]))
        .collect();

    for uri in &item_uris {
        app.staff_post(uri, json!({"status": "cooking"})).await;
    }
    let (_, current) = app.staff_get(&order_uri).await;
    assert_eq!(current["status"], "cooking");
    let cooking_started_at = current["cooking_started_at"].as_i64().unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let (status, _) = app
        .staff_post(&item_uris[0], json!({"status": "cooking"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, current) = app.staff_get(&order_uri).await;
    assert_eq!(current["cooking_started_at"], cooking_started_at);

    for uri in &item_uris {
        app.staff_post(uri, json!({"status": "served"})).await;
    }
    let (_, current) = app.staff_get(&order_uri).await;
    assert_eq!(current["status"], "served");
    let served_at = current["served_at"].as_i64().unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let (status, item) = app
        .staff_post(&item_uris[1], json!({"status": "served"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["status"], "served");
    let (_, current) = app.staff_get(&order_uri).await;
    assert_eq!(current["served_at"], served_at);
}

#[tokio::test]
async fn test_completing_session_voids_pending_bill() {
    let app = TestApp::new().await;
    let opened = app.open_session(2, None).await;
    let session_id = opened["session"]["id"].as_i64().unwrap();
    let code = opened["session"]["session_code"].as_str().unwrap().to_string();
    app.post(
        "/api/orders",
        json!({
            "session_code": code,
            "items": [{"menu_item_id": app.ramen.id, "quantity": 1}],
        }),
    )
    .await;
    let (status, payment) = app
        .post("/api/payments", json!({"session_code": code}))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, detail) = app
        .staff_post(&format!("/api/sessions/{session_id}/complete"), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["status"], "completed");

    let (_, pending) = app.staff_get("/api/payments?pending_only=true").await;
    assert!(pending.as_array().unwrap().is_empty());
    let (_, voided) = app
        .staff_get(&format!("/api/payments/{}", payment["id"]))
        .await;
    assert_eq!(voided["status"], "cancelled");
}

#[tokio::test]
async fn test_menu_price_limited_to_ten_digits() {
    let app = TestApp::new().await;
    let item = |price: &str| {
        json!({
            "store_id": app.store_id,
            "name": "Wagyu",
            "price": price,
        })
    };

    let (status, body) = app
        .staff_post("/api/menu-items", item("79228162514264337593543950335"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "price");

    let (status, created) = app
        .staff_post("/api/menu-items", item("99999999.99"))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["price"], "99999999.99");

    let (status, body) = app
        .request(
            "PUT",
            &format!("/api/menu-items/{}", created["id"]),
            Some(&app.staff_token),
            Some(json!({"price": "100000000"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "price");
}
