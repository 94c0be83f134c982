use std::net::SocketAddr;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use roleplay::clock::FixedClock;
use roleplay::db::memory::{MemoryResetTokenRepo, MemoryUserRepo};
use roleplay::email::MailTrap;
use roleplay::reset::PasswordResetService;
use roleplay::state::AppState;

/// A running test server over in-memory repositories, with the mail trap and
/// a fixed clock exposed for assertions.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub users: Arc<MemoryUserRepo>,
    pub tokens: Arc<MemoryResetTokenRepo>,
    pub mail: Arc<MailTrap>,
    pub clock: Arc<FixedClock>,
}

pub async fn spawn_app() -> TestApp {
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    ));
    let users = Arc::new(MemoryUserRepo::new(clock.clone()));
    let tokens = Arc::new(MemoryResetTokenRepo::new(clock.clone()));
    let mail = Arc::new(MailTrap::new());

    let reset =
        PasswordResetService::new(users.clone(), tokens.clone(), mail.clone(), clock.clone());
    let state = Arc::new(AppState {
        users: users.clone(),
        reset,
    });

    let app = roleplay::build_app(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve test app");
    });

    TestApp {
        addr,
        client: Client::new(),
        users,
        tokens,
        mail,
        clock,
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST /users, return body + status.
    pub async fn create_user(
        &self,
        email: &str,
        name: &str,
        password: &str,
        avatar: Option<&str>,
    ) -> (Value, StatusCode) {
        let mut body = json!({ "email": email, "name": name, "password": password });
        if let Some(avatar) = avatar {
            body["avatar"] = json!(avatar);
        }
        self.post("/users", &body).await
    }

    /// POST /forgot-password, return body + status.
    pub async fn forgot_password(&self, email: &str, reset_password_url: &str) -> (Value, StatusCode) {
        self.post(
            "/forgot-password",
            &json!({ "email": email, "resetPasswordUrl": reset_password_url }),
        )
        .await
    }

    /// PUT /reset-password, return body + status.
    pub async fn reset_password(&self, token: &str, password: &str) -> (Value, StatusCode) {
        self.put(
            "/reset-password",
            &json!({ "token": token, "password": password }),
        )
        .await
    }

    pub async fn post(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn put(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}
