use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::error::AppError;

/// The authenticated caller of a request.
///
/// `AuthMiddleware` resolves the session token and stores a `Principal` in the request
/// extensions; handlers take it as a parameter and hand `user_id` to the stores. On a
/// route that is not behind the middleware the extractor fails with 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
}

impl FromRequest for Principal {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Principal>().copied() {
            Some(principal) => ready(Ok(principal)),
            None => {
                let err = AppError::InvalidSession(
                    "No authenticated session for this request".to_string(),
                );
                ready(Err(err.into()))
            }
        }
    }
}
