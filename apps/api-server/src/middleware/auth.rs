//! Authentication extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};

use quill_core::Subject;
use quill_core::ports::AuthError;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Verified caller identity.
///
/// Taking this as a handler argument makes the route require a valid bearer
/// token; the request is rejected with 401 before the handler runs otherwise.
/// ```ignore
/// async fn create(identity: Identity) -> impl Responder {
///     format!("Hello, user {}!", identity.subject)
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub subject: Subject,
}

impl FromRequest for Identity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            return ready(Err(
                AppError::Internal("AppState not found in app data".to_string()).into(),
            ));
        };

        let header = match req.headers().get(header::AUTHORIZATION) {
            Some(value) => match value.to_str() {
                Ok(s) => Some(s),
                Err(_) => {
                    tracing::debug!("Rejected non-UTF-8 authorization header");
                    return ready(Err(AppError::from(AuthError::Malformed(
                        "invalid authorization header".to_string(),
                    ))
                    .into()));
                }
            },
            None => None,
        };

        let result: Result<Self, Self::Error> = state
            .gate
            .authenticate(header)
            .map(|subject| Identity { subject })
            .map_err(|e| AppError::from(e).into());

        ready(result)
    }
}
