//! Authentication gate - resolves a bearer token into a [`Subject`].

use std::sync::Arc;

use crate::domain::Subject;
use crate::ports::{AuthError, TokenService};

/// Verifies the `Authorization` header of a request.
///
/// Every failure is reported to the caller the same way; the precise reason is
/// only logged.
pub struct AuthGate {
    tokens: Arc<dyn TokenService>,
}

impl AuthGate {
    pub fn new(tokens: Arc<dyn TokenService>) -> Self {
        Self { tokens }
    }

    /// Resolve the subject from a raw `Authorization` header value.
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<Subject, AuthError> {
        let result = bearer_token(authorization).and_then(|token| self.tokens.verify(token));

        match result {
            Ok(claims) => Ok(claims.subject),
            Err(e) => {
                tracing::debug!(reason = e.reason(), "Rejected bearer token");
                Err(e)
            }
        }
    }
}

/// Extract the token from `Bearer <token>`. The scheme is case-insensitive.
fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.map(str::trim).filter(|h| !h.is_empty());
    let header = header.ok_or(AuthError::MissingAuth)?;

    // A bare scheme (`Bearer` with nothing after it) carries no token at all.
    let (scheme, token) = header.split_once(' ').unwrap_or((header, ""));

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::Malformed("expected Bearer token".to_string()));
    }

    match token.trim() {
        "" => Err(AuthError::MissingAuth),
        token => Ok(token),
    }
}
