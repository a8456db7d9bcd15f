// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims and the per-call authentication context.

use serde::{Deserialize, Serialize};

/// Claims carried by an issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the principal email the token was issued to.
    pub sub: String,

    /// Issued at timestamp.
    pub iat: i64,

    /// Expiration timestamp.
    pub exp: i64,
}

/// Per-call authentication context.
///
/// Carries the verified principal email for the duration of one request, or
/// `None` when no valid token was presented. Owned by the dispatcher, passed
/// by reference to every guard and operation, never persisted.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    principal: Option<String>,
}

impl AuthContext {
    /// Context for a caller with no verified principal.
    pub fn anonymous() -> Self {
        Self { principal: None }
    }

    /// Context for a caller whose token verified to the given email.
    pub fn authenticated(email: impl Into<String>) -> Self {
        Self {
            principal: Some(email.into()),
        }
    }

    /// The verified principal email, if any.
    pub fn principal(&self) -> Option<&str> {
        self.principal.as_deref()
    }
}
