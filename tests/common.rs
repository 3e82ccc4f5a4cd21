use matchmaking_backend::{
    api::router::create_router,
    state::{AppState, Repositories},
    infra::factory::sqlite_repositories,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    Router,
};
use std::str::FromStr;
use tower::ServiceExt;
use serde_json::{json, Value};

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        Self::with_repositories(|repos| repos).await
    }

    /// Builds the app on a fresh SQLite file, letting the caller swap repositories.
    pub async fn with_repositories(customize: impl FnOnce(Repositories) -> Repositories) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let repos = customize(sqlite_repositories(pool.clone()));
        let state = Arc::new(AppState::new(repos));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        (status, parse_body(response).await)
    }

    pub async fn create_event(&self, status: &str) -> String {
        let (code, event) = self.request("POST", "/api/v1/events", Some(json!({
            "name": "Friday Speed Dating",
            "description": "Rooftop bar, 8pm",
            "event_date": "2026-11-20",
            "status": status,
        }))).await;
        assert_eq!(code, StatusCode::CREATED, "create event failed: {}", event);
        event["id"].as_str().unwrap().to_string()
    }

    pub async fn add_question(&self, event_id: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", &format!("/api/v1/events/{}/form-questions", event_id), Some(body)).await
    }

    pub async fn register(&self, event_id: &str, answers: Value) -> (StatusCode, Value) {
        self.request(
            "POST",
            &format!("/api/v1/events/{}/participants/register", event_id),
            Some(json!({ "answers": answers })),
        ).await
    }
}

/// A complete, valid set of standard-field answers for an adult.
#[allow(dead_code)]
pub fn adult_answers(email: &str) -> Value {
    json!({
        "name": "Ana Ruiz",
        "email": email,
        "phone": "+1 555 123 4567",
        "date_of_birth": "1990-05-17",
        "gender": "Female",
        "interested_in": "Men",
        "bio": "Climber and amateur cook",
    })
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
