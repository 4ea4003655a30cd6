//! Session identity for requests.
//!
//! Sessions are JWTs issued by the hosted auth service. The service only
//! verifies them; it never signs tokens itself. A request carries its token in
//! the `Authorization: Bearer` header or in the `access_token` cookie.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "access_token";

/// Claims the auth service puts in every session token. Unknown claims are
/// kept so they can be forwarded to the database's row-level policies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub exp: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The authenticated caller behind a verified session.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: Option<String>,
    claims: SessionClaims,
}

impl Identity {
    pub fn from_claims(claims: SessionClaims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email.clone(),
            claims,
        }
    }

    /// The full claim set as JSON, as Postgres RLS expects in `request.jwt.claims`.
    pub fn claims_json(&self) -> String {
        serde_json::to_string(&self.claims).unwrap_or_else(|_| {
            serde_json::json!({ "sub": self.user_id, "exp": self.claims.exp }).to_string()
        })
    }
}

pub struct SessionVerifier {
    decoding: DecodingKey,
    validation: Validation,
}

impl SessionVerifier {
    pub fn new(config: &SessionConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(std::slice::from_ref(&config.audience));
        Self {
            decoding: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<Identity, jsonwebtoken::errors::Error> {
        let data = decode::<SessionClaims>(token, &self.decoding, &self.validation)?;
        debug!(user_id = %data.claims.sub, "session verified");
        Ok(Identity::from_claims(data.claims))
    }
}

/// The caller's session, if any. Missing, malformed or expired tokens all
/// resolve to `None`; deciding what that means is up to the handler.
pub struct MaybeSession(pub Option<Identity>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = session_token(parts) else {
            return Ok(MaybeSession(None));
        };

        match state.sessions.verify(&token) {
            Ok(identity) => Ok(MaybeSession(Some(identity))),
            Err(e) => {
                debug!(error = %e, "session token rejected");
                Ok(MaybeSession(None))
            }
        }
    }
}

fn session_token(parts: &Parts) -> Option<String> {
    let bearer = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|auth| {
            auth.strip_prefix("Bearer ")
                .or_else(|| auth.strip_prefix("bearer "))
        })
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    parts
        .headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|t| !t.is_empty())
}
