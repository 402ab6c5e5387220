use crate::{
    auth::{middleware::session_token, LoginRequest, LoginResponse, LOGIN_SUCCESS},
    error::AppError,
    models::user::normalize_email,
    state::AppState,
};
use actix_web::{post, web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

/// Login user
///
/// Checks the password against the stored bcrypt hash and opens a new session. Every
/// successful login returns a fresh token; earlier sessions stay live.
///
/// ## Responses:
/// - `201 Created`: `{"status": "Login success", "token": "<uuid>"}`.
/// - `400 Bad Request`: If the body is not valid JSON or misses a field.
/// - `401 Unauthorized`: If the email is unknown or the password does not match.
/// - `422 Unprocessable Entity`: If the email is malformed or the password empty.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;
    let LoginRequest { email, password } = login_data.into_inner();

    let user = state.users.find_user_by_email(&normalize_email(&email)).await?;
    let user = match user {
        Some(user) => {
            let verifier = state.verifier;
            let stored_hash = user.password_hash.clone();
            let matches = web::block(move || verifier.verify(&password, &stored_hash)).await?;
            if !matches {
                log::debug!("Login rejected: password mismatch");
                return Err(AppError::Unauthorized("Invalid credentials".into()));
            }
            user
        }
        None => {
            log::debug!("Login rejected: unknown email");
            return Err(AppError::Unauthorized("Invalid credentials".into()));
        }
    };

    let token = state.sessions.create_session(user.id).await?;

    Ok(HttpResponse::Created().json(LoginResponse {
        status: LOGIN_SUCCESS.to_string(),
        token: token.to_string(),
    }))
}

/// Logout user
///
/// Revokes the session named in the token header. Revoking a session that is unknown or
/// already revoked still succeeds.
///
/// ## Responses:
/// - `204 No Content`: The session is no longer live.
/// - `401 Unauthorized`: If the token header is missing.
#[post("/logout")]
pub async fn logout(state: web::Data<AppState>, req: HttpRequest) -> Result<impl Responder, AppError> {
    let token = session_token(req.headers(), &state.token_header)
        .ok_or_else(|| AppError::InvalidSession("Missing session token".into()))?;

    state.sessions.revoke(token).await?;

    Ok(HttpResponse::NoContent().finish())
}
