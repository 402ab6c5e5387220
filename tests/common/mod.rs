#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::StatusCode,
    test, web, App,
};
use serde_json::{json, Value};
use taskkeeper::{
    auth::{CredentialVerifier, LoginResponse},
    routes,
    store::MemoryStore,
    AppState,
};

/// bcrypt's minimum cost keeps the suites fast.
pub const TEST_BCRYPT_COST: u32 = 4;
pub const TOKEN_HEADER: &str = "token";
pub const TEST_PASSWORD: &str = "correct-horse";

/// Fresh state over an empty in-memory store.
pub fn memory_state() -> web::Data<AppState> {
    web::Data::new(AppState::new(
        Arc::new(MemoryStore::new()),
        CredentialVerifier::new(TEST_BCRYPT_COST),
        TOKEN_HEADER,
    ))
}

pub async fn init_app(
    state: web::Data<AppState>,
) -> impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
{
    test::init_service(
        App::new()
            .app_data(state)
            .configure(routes::config)
            .default_service(web::route().to(routes::health::not_found)),
    )
    .await
}

/// Registers a user through `/users/add` and returns the created user as JSON.
pub async fn register_user(
    app: &impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    name: &str,
    email: &str,
) -> Value {
    let req = test::TestRequest::post()
        .uri("/users/add")
        .set_json(json!({
            "name": name,
            "email": email,
            "password": TEST_PASSWORD,
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED, "registration of {} failed", email);
    test::read_body_json(resp).await
}

/// Logs in through `/login` and returns the session token.
pub async fn login(
    app: &impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    email: &str,
    password: &str,
) -> String {
    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED, "login of {} failed", email);
    let body: LoginResponse = test::read_body_json(resp).await;
    body.token
}

/// Registers a user with [`TEST_PASSWORD`] and logs in. Returns `(user_id, token)`.
pub async fn register_and_login(
    app: &impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    name: &str,
    email: &str,
) -> (String, String) {
    let user = register_user(app, name, email).await;
    let user_id = user["userId"]
        .as_str()
        .expect("userId missing from registration response")
        .to_string();
    let token = login(app, email, TEST_PASSWORD).await;
    (user_id, token)
}

/// Creates a task through `/tasks/add` and returns it as JSON.
pub async fn create_task(
    app: &impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    token: &str,
    description: &str,
) -> Value {
    let req = test::TestRequest::post()
        .uri("/tasks/add")
        .insert_header((TOKEN_HEADER, token))
        .set_json(json!({ "description": description }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED, "task creation failed");
    test::read_body_json(resp).await
}

/// Fetches `/tasks/list` for the given token.
pub async fn list_tasks(
    app: &impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    token: &str,
) -> Vec<Value> {
    let req = test::TestRequest::get()
        .uri("/tasks/list")
        .insert_header((TOKEN_HEADER, token))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK, "task listing failed");
    test::read_body_json(resp).await
}
