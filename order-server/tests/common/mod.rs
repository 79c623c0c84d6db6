//! Shared fixtures: in-memory database, recording notifier, seed data

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use shared::models::{
    DiningTableCreate, MenuItem, MenuItemCreate, Money, StoreCreate, UserRole,
};
use tower::ServiceExt;

use order_server::auth::hash_password;
use order_server::core::build_router;
use order_server::db::{self, repository};
use order_server::notify::{ChatNotifier, InlineKeyboard, NotifyError};
use order_server::{Config, ServerState};

pub const TABLE_QR: &str = "https://example.test/t/A-1";

/// Captures every outbound chat message
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// Notifications are spawned off the request; poll until `count` arrived
    pub async fn wait_for(&self, count: usize) -> Vec<(String, String)> {
        for _ in 0..50 {
            let sent = self.sent();
            if sent.len() >= count {
                return sent;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.sent()
    }
}

#[async_trait]
impl ChatNotifier for RecordingNotifier {
    async fn send_text(
        &self,
        chat_id: &str,
        text: &str,
        _keyboard: Option<InlineKeyboard>,
    ) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .unwrap()
            .push((chat_id.to_string(), text.to_string()));
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: ServerState,
    pub notifier: Arc<RecordingNotifier>,
    pub store_id: i64,
    pub table_id: i64,
    /// ¥850, cap 10
    pub ramen: MenuItem,
    /// ¥500, cap 3
    pub gyoza: MenuItem,
    pub staff_token: String,
    pub admin_token: String,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_database("sqlite::memory:").await
    }

    /// Same fixtures on the given database, e.g. a WAL file with a real pool
    pub async fn with_database(database_url: &str) -> Self {
        let pool = db::connect(database_url).await.unwrap();
        let notifier = Arc::new(RecordingNotifier::default());
        let state = ServerState::new(Config::default(), pool, notifier.clone());

        let store = repository::store::create(
            &state.pool,
            &StoreCreate {
                name: "Sakura".into(),
                address: None,
                phone: None,
                business_hours: None,
            },
        )
        .await
        .unwrap();
        let table = repository::dining_table::create(
            &state.pool,
            &DiningTableCreate {
                store_id: store.id,
                table_number: "A-1".into(),
                qr_code_url: TABLE_QR.into(),
                capacity: Some(4),
            },
        )
        .await
        .unwrap();
        let ramen = seed_item(&state, store.id, "Ramen", 850, 10).await;
        let gyoza = seed_item(&state, store.id, "Gyoza", 500, 3).await;

        let staff_token = seed_user(&state, "kitchen", UserRole::Chef).await;
        let admin_token = seed_user(&state, "owner", UserRole::Admin).await;

        Self {
            router: build_router(state.clone()),
            state,
            notifier,
            store_id: store.id,
            table_id: table.id,
            ramen,
            gyoza,
            staff_token,
            admin_token,
        }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, None, Some(body)).await
    }

    pub async fn staff_get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, Some(&self.staff_token), None).await
    }

    pub async fn staff_post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, Some(&self.staff_token), Some(body))
            .await
    }

    /// Open (or resume) the session for table A-1
    pub async fn open_session(&self, party_size: i32, chat_id: Option<&str>) -> Value {
        let (status, body) = self
            .post(
                "/api/sessions",
                serde_json::json!({
                    "qr_code_url": TABLE_QR,
                    "party_size": party_size,
                    "telegram_chat_id": chat_id,
                }),
            )
            .await;
        assert!(status.is_success(), "open session failed: {body}");
        body
    }
}

/// A fresh database file under the system temp dir, removed on drop
pub struct TempDatabase {
    path: PathBuf,
}

impl TempDatabase {
    pub fn new(name: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "order-server-{name}-{}-{nanos}.db",
            std::process::id()
        ));
        Self { path }
    }

    pub fn url(&self) -> String {
        format!("sqlite://{}", self.path.display())
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

async fn seed_item(state: &ServerState, store_id: i64, name: &str, price: i64, cap: i32) -> MenuItem {
    repository::menu_item::create(
        &state.pool,
        &MenuItemCreate {
            store_id,
            category_id: None,
            name: name.into(),
            description: None,
            price: Money::from_units(price),
            image_path: None,
            image_thumbnail_path: None,
            max_quantity_per_order: Some(cap),
            display_order: None,
        },
    )
    .await
    .unwrap()
}

async fn seed_user(state: &ServerState, username: &str, role: UserRole) -> String {
    let password_hash = hash_password("secret-pass").unwrap();
    let id = repository::user::create(
        &state.pool,
        repository::user::NewUser {
            username,
            password_hash: &password_hash,
            email: None,
            role,
            store_id: None,
        },
    )
    .await
    .unwrap();
    let user = repository::user::find_by_id(&state.pool, id)
        .await
        .unwrap()
        .unwrap();
    state.jwt_service.generate_token(&user).unwrap()
}
