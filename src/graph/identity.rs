// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Principal identity resolution.

use crate::error::ApiError;
use crate::models::UserId;
use crate::store::GraphStore;

/// Resolve a verified principal email to its internal user id.
///
/// Tokens are only issued to existing accounts, so a miss here means the
/// store and the token issuer disagree. That is an integrity failure and is
/// surfaced as `Unavailable`, never mapped to a default identity.
pub fn resolve_user_id(store: &GraphStore, email: &str) -> Result<UserId, ApiError> {
    store
        .find_user(|user| user.email == email)
        .map(|user| user.id)
        .ok_or_else(|| ApiError::unavailable("Authenticated principal has no user record"))
}
