//! Router-level tests for the Auth crate
//! In-memory repository, requests driven through `tower::ServiceExt::oneshot`

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use axum::routing::get;
use chrono::Utc;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::services::sign_init_data;
use crate::domain::value_object::telegram_id::TelegramId;
use crate::error::{AuthError, AuthResult};
use crate::presentation::handlers;
use crate::presentation::router::{auth_router_generic, with_tma_auth};

const BOT_TOKEN: &str = "1234567890:ABCdefGHIjklMNOpqrsTUVwxyz";
const OTHER_TOKEN: &str = "9999999999:WRONGtokenHERE";

const IVAN: &str =
    r#"{"id":123456789,"first_name":"Ivan","last_name":"Petrov","username":"ivanpetrov"}"#;

/// `UserRepository` over a map keyed by Telegram ID
#[derive(Clone, Default)]
pub(crate) struct MemoryUserRepository {
    users: Arc<Mutex<HashMap<i64, User>>>,
}

impl MemoryUserRepository {
    pub(crate) fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub(crate) fn get(&self, telegram_id: i64) -> Option<User> {
        self.users.lock().unwrap().get(&telegram_id).cloned()
    }
}

impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&user.telegram_id.value()) {
            return Err(AuthError::UserAlreadyExists);
        }
        users.insert(user.telegram_id.value(), user.clone());
        Ok(())
    }

    async fn find_by_telegram_id(&self, telegram_id: TelegramId) -> AuthResult<Option<User>> {
        Ok(self.get(telegram_id.value()))
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        self.users
            .lock()
            .unwrap()
            .insert(user.telegram_id.value(), user.clone());
        Ok(())
    }
}

fn app(repo: &MemoryUserRepository) -> Router {
    auth_router_generic(Arc::new(repo.clone()), Arc::new(AuthConfig::new(BOT_TOKEN)))
}

fn init_data_at(user: &str, auth_date: i64, token: &str) -> String {
    sign_init_data(
        [
            ("query_id", "AAHdF6IQAAAAAN0XohDhrOrc".to_string()),
            ("user", user.to_string()),
            ("auth_date", auth_date.to_string()),
        ],
        token,
    )
}

fn fresh_init_data(user: &str) -> String {
    init_data_at(user, Utc::now().timestamp(), BOT_TOKEN)
}

async fn post_init(app: &Router, init_data: &str) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri("/auth/init")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "initData": init_data }).to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn get_me(app: &Router, authorization: Option<&str>) -> Response {
    let mut builder = Request::builder().method("GET").uri("/me");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

#[cfg(test)]
mod init_tests {
    use super::*;

    #[tokio::test]
    async fn test_init_creates_user() {
        let repo = MemoryUserRepository::default();
        let app = app(&repo);

        let response = post_init(&app, &fresh_init_data(IVAN)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let user = &body["data"]["user"];
        assert_eq!(user["telegramId"], 123456789);
        assert_eq!(user["firstName"], "Ivan");
        assert_eq!(user["lastName"], "Petrov");
        assert_eq!(user["username"], "ivanpetrov");

        let stored = repo.get(123456789).unwrap();
        assert_eq!(user["id"], stored.user_id.to_string());
        assert_eq!(repo.count(), 1);
    }

    #[tokio::test]
    async fn test_init_is_idempotent() {
        let repo = MemoryUserRepository::default();
        let app = app(&repo);

        let first = body_json(post_init(&app, &fresh_init_data(IVAN)).await).await;
        let second = body_json(post_init(&app, &fresh_init_data(IVAN)).await).await;

        assert_eq!(first["data"]["user"]["id"], second["data"]["user"]["id"]);
        assert_eq!(repo.count(), 1);
    }

    #[tokio::test]
    async fn test_init_syncs_changed_profile() {
        let repo = MemoryUserRepository::default();
        let app = app(&repo);

        post_init(&app, &fresh_init_data(IVAN)).await;
        let original = repo.get(123456789).unwrap();

        let renamed = r#"{"id":123456789,"first_name":"Ivan","username":"ivan_new"}"#;
        let response = post_init(&app, &fresh_init_data(renamed)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let stored = repo.get(123456789).unwrap();
        assert_eq!(stored.user_id, original.user_id);
        assert_eq!(stored.username.as_deref(), Some("ivan_new"));
        assert_eq!(stored.last_name, None);
        assert_eq!(stored.created_at, original.created_at);
        assert_eq!(repo.count(), 1);
    }

    #[tokio::test]
    async fn test_init_rejects_tampered_payload() {
        let repo = MemoryUserRepository::default();
        let app = app(&repo);

        let tampered = fresh_init_data(IVAN).replace("Ivan", "Oleg");
        let response = post_init(&app, &tampered).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(repo.count(), 0);
    }

    #[tokio::test]
    async fn test_init_rejects_wrong_token_and_expired() {
        let repo = MemoryUserRepository::default();
        let app = app(&repo);
        let now = Utc::now().timestamp();

        let wrong_token = init_data_at(IVAN, now, OTHER_TOKEN);
        assert_eq!(
            post_init(&app, &wrong_token).await.status(),
            StatusCode::UNAUTHORIZED
        );

        let expired = init_data_at(IVAN, now - 3600, BOT_TOKEN);
        assert_eq!(
            post_init(&app, &expired).await.status(),
            StatusCode::UNAUTHORIZED
        );

        assert_eq!(post_init(&app, "").await.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(repo.count(), 0);
    }

    #[tokio::test]
    async fn test_init_bad_body_is_problem_details() {
        let repo = MemoryUserRepository::default();
        let app = app(&repo);

        for (content_type, body, status, code) in [
            (None, r#"{"initData":"a=b"}"#, StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            (Some("application/json"), "{initData", StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            (
                Some("application/json"),
                r#"{"init_data":"a=b"}"#,
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
            ),
        ] {
            let mut builder = Request::builder().method("POST").uri("/auth/init");
            if let Some(content_type) = content_type {
                builder = builder.header(header::CONTENT_TYPE, content_type);
            }
            let response = app
                .clone()
                .oneshot(builder.body(Body::from(body)).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), status, "{body}");
            let problem = body_json(response).await;
            assert_eq!(problem["status"], status.as_u16());
            assert_eq!(problem["code"], code);
            assert!(problem["detail"].is_string());
        }
        assert_eq!(repo.count(), 0);
    }
}

#[cfg(test)]
mod middleware_tests {
    use super::*;

    #[tokio::test]
    async fn test_me_after_init() {
        let repo = MemoryUserRepository::default();
        let app = app(&repo);
        let init_data = fresh_init_data(IVAN);

        post_init(&app, &init_data).await;

        let response = get_me(&app, Some(&format!("tma {init_data}"))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let stored = repo.get(123456789).unwrap();
        assert_eq!(body["data"]["id"], stored.user_id.to_string());
        assert_eq!(body["data"]["telegramId"], 123456789);
        assert_eq!(body["data"]["firstName"], "Ivan");
    }

    #[tokio::test]
    async fn test_me_without_credentials() {
        let repo = MemoryUserRepository::default();
        let app = app(&repo);
        let init_data = fresh_init_data(IVAN);
        post_init(&app, &init_data).await;

        for authorization in [
            None,
            Some(String::new()),
            Some(format!("Bearer {init_data}")),
            Some(format!("TMA {init_data}")),
            Some(format!("tma{init_data}")),
            Some("tma".to_string()),
        ] {
            let response = get_me(&app, authorization.as_deref()).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn test_me_rejects_invalid_init_data() {
        let repo = MemoryUserRepository::default();
        let app = app(&repo);
        let init_data = fresh_init_data(IVAN);
        post_init(&app, &init_data).await;

        let tampered = init_data.replace("Petrov", "Sidorov");
        let expired = init_data_at(IVAN, Utc::now().timestamp() - 301, BOT_TOKEN);
        let wrong_token = init_data_at(IVAN, Utc::now().timestamp(), OTHER_TOKEN);

        for payload in [tampered, expired, wrong_token] {
            let response = get_me(&app, Some(&format!("tma {payload}"))).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn test_unknown_user_looks_like_bad_signature() {
        let repo = MemoryUserRepository::default();
        let app = app(&repo);

        // Valid signature, but /auth/init was never called.
        let unknown = get_me(&app, Some(&format!("tma {}", fresh_init_data(IVAN)))).await;
        let forged = get_me(
            &app,
            Some(&format!(
                "tma {}",
                init_data_at(IVAN, Utc::now().timestamp(), OTHER_TOKEN)
            )),
        )
        .await;
        let missing = get_me(&app, None).await;

        assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(forged.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

        let unknown = body_bytes(unknown).await;
        assert_eq!(unknown, body_bytes(forged).await);
        assert_eq!(unknown, body_bytes(missing).await);

        // The middleware never registers users.
        assert_eq!(repo.count(), 0);
    }

    #[tokio::test]
    async fn test_unauthorized_body_is_problem_details() {
        let repo = MemoryUserRepository::default();
        let body = body_json(get_me(&app(&repo), None).await).await;

        assert_eq!(body["status"], 401);
        assert_eq!(body["code"], "UNAUTHORIZED");
        assert_eq!(body["detail"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_with_tma_auth_protects_custom_routes() {
        let repo = MemoryUserRepository::default();
        let init_data = fresh_init_data(IVAN);
        post_init(&app(&repo), &init_data).await;

        let teams = Router::new().route("/teams", get(|user: crate::CurrentUser| async move {
            user.0.first_name
        }));
        let teams = with_tma_auth(
            teams,
            Arc::new(repo.clone()),
            Arc::new(AuthConfig::new(BOT_TOKEN)),
        );

        let request = Request::builder()
            .uri("/teams")
            .header(header::AUTHORIZATION, format!("tma {init_data}"))
            .body(Body::empty())
            .unwrap();
        let response = teams.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"Ivan");

        let request = Request::builder().uri("/teams").body(Body::empty()).unwrap();
        let response = teams.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let request = Request::builder().uri("/nope").body(Body::empty()).unwrap();
        let response = teams.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_current_user_without_middleware_is_unauthorized() {
        let unprotected = Router::new().route("/me", get(handlers::current_user));

        let request = Request::builder().uri("/me").body(Body::empty()).unwrap();
        let response = unprotected.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
