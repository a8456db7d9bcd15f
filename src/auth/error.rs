// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token verification and issuance errors.
//!
//! These are internal to the auth collaborator: a verification failure is
//! surfaced to the rest of the service as an absent principal, and an
//! issuance failure maps to the `Unavailable` taxonomy kind.

/// Token error type.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Token is malformed or failed structural validation
    #[error("Token is malformed")]
    MalformedToken,
    /// Token signature is invalid
    #[error("Token signature is invalid")]
    InvalidSignature,
    /// Token has expired
    #[error("Token has expired")]
    TokenExpired,
    /// Token could not be signed
    #[error("Token signing failed: {0}")]
    SigningFailed(String),
}
