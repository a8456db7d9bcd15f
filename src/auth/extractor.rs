// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for the per-call authentication context.
//!
//! Use the `AuthContext` extractor in handlers to receive the verified
//! principal, or `None` for anonymous callers:
//!
//! ```rust,ignore
//! async fn my_handler(ctx: AuthContext) -> impl IntoResponse {
//!     // ctx.principal() is Some(email) or None
//! }
//! ```
//!
//! The extractor is infallible: a missing, malformed, or expired token makes
//! the caller anonymous rather than rejecting the request. Operations that
//! require authentication fail inside the guard chain, with the taxonomy
//! error, and without touching the store.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::AuthContext;
use crate::state::AppState;

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|header| header.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "));

        let Some(token) = bearer else {
            return Ok(AuthContext::anonymous());
        };

        match state.tokens.verify(token.trim()) {
            Ok(claims) => Ok(AuthContext::authenticated(claims.sub)),
            Err(e) => {
                tracing::debug!(error = %e, "Token verification failed, treating caller as anonymous");
                Ok(AuthContext::anonymous())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_header(value: Option<String>) -> Parts {
        let mut builder = Request::builder().uri("/test");
        if let Some(value) = value {
            builder = builder.header("Authorization", value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn missing_header_is_anonymous() {
        let state = AppState::default();
        let mut parts = parts_with_header(None);

        let ctx = AuthContext::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert!(ctx.principal().is_none());
    }

    #[tokio::test]
    async fn valid_token_carries_principal() {
        let state = AppState::default();
        let token = state.tokens.mint("ada@example.com").unwrap();
        let mut parts = parts_with_header(Some(format!("Bearer {token}")));

        let ctx = AuthContext::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(ctx.principal(), Some("ada@example.com"));
    }

    #[tokio::test]
    async fn garbage_token_is_anonymous() {
        let state = AppState::default();
        let mut parts = parts_with_header(Some("Bearer not.a.token".to_string()));

        let ctx = AuthContext::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert!(ctx.principal().is_none());
    }

    #[tokio::test]
    async fn non_bearer_header_is_anonymous() {
        let state = AppState::default();
        let mut parts = parts_with_header(Some("Basic dXNlcjpwYXNz".to_string()));

        let ctx = AuthContext::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert!(ctx.principal().is_none());
    }
}
