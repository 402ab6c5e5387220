use crate::{
    error::AppError,
    models::{user::normalize_email, NewUser, UserInput},
    state::AppState,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// Lists the user endpoints.
#[get("")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "user list -> GET": "/users/list",
        "Add user -> POST": "/users/add",
    }))
}

/// Retrieves every registered user. Password hashes are never included.
#[get("/list")]
pub async fn list_users(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let users = state.users.list_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

/// Register a new user
///
/// Hashes the password with bcrypt and stores the account.
///
/// ## Responses:
/// - `201 Created`: Returns the new `User` as JSON.
/// - `400 Bad Request`: If the body is not valid JSON or misses a field.
/// - `409 Conflict`: If the email is already registered.
/// - `422 Unprocessable Entity`: If a field fails validation.
#[post("/add")]
pub async fn create_user(
    state: web::Data<AppState>,
    user_data: web::Json<UserInput>,
) -> Result<impl Responder, AppError> {
    user_data.validate()?;
    let UserInput {
        name,
        email,
        password,
    } = user_data.into_inner();

    let verifier = state.verifier;
    let password_hash = web::block(move || verifier.hash(&password)).await??;

    let user = state
        .users
        .insert_user(NewUser {
            name: name.trim().to_string(),
            email: normalize_email(&email),
            password_hash,
        })
        .await
        .map_err(|e| match e {
            AppError::Conflict(_) => AppError::Conflict("Email already registered".into()),
            other => other,
        })?;

    log::info!("Registered user {}", user.id);
    Ok(HttpResponse::Created().json(user))
}
