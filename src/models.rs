// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! This module defines the entities and the request/response data structures
//! used by the REST API. Response types derive `Serialize` and `ToSchema` for
//! automatic JSON handling and OpenAPI documentation.
//!
//! ## Identifier Types
//!
//! [`UserId`] and [`RequestId`] wrap the store-assigned integer identifiers.
//! They provide type safety and clear semantics at the operation boundaries.
//!
//! ## Model Categories
//!
//! - **Users**: internal records and the public profile projection
//! - **Friend Requests**: the status lifecycle entity and its DTOs
//! - **Accounts**: signup/login payloads and the bearer token response

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// =============================================================================
// Identifier Types
// =============================================================================

/// Store-assigned user identifier.
///
/// Unique and immutable for the lifetime of the account.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        UserId(value)
    }
}

/// Store-assigned friend-request identifier.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct RequestId(pub i64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RequestId {
    fn from(value: i64) -> Self {
        RequestId(value)
    }
}

// =============================================================================
// User Models
// =============================================================================

/// A user account as held by the store.
///
/// The credential hash never leaves this type; every representation that
/// crosses the API boundary is a [`UserProfile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Login email, unique, matched case-sensitively.
    pub email: String,
    /// Argon2 credential hash (owned by the auth collaborator).
    pub password_hash: String,
    /// Display name.
    pub full_name: String,
}

/// Public projection of a user account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserProfile {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Login email.
    pub email: String,
    /// Display name.
    pub full_name: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
        }
    }
}

// =============================================================================
// Friend Request Models
// =============================================================================

/// Status lifecycle of a friend request.
///
/// Cancellation is modeled as deletion of the record, not as a status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    /// Awaiting a decision by the receiver.
    Pending,
    /// Accepted by the receiver. Terminal for accept/reject.
    Accepted,
    /// Rejected by the receiver. Terminal for accept/reject.
    Rejected,
}

/// A friend request between two users.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct FriendRequest {
    /// Store-assigned identifier.
    pub id: RequestId,
    /// User who sent the request.
    pub sender_id: UserId,
    /// User the request was addressed to.
    pub receiver_id: UserId,
    /// When the request was created. Immutable.
    pub sent_at: DateTime<Utc>,
    /// Current lifecycle status.
    pub status: RequestStatus,
}

impl FriendRequest {
    /// Whether this request links the given pair, in either direction.
    pub fn connects(&self, a: UserId, b: UserId) -> bool {
        (self.sender_id == a && self.receiver_id == b)
            || (self.sender_id == b && self.receiver_id == a)
    }
}

/// Request to send a friend request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SendFriendRequestRequest {
    /// Identifier of the user to befriend.
    #[serde(default)]
    pub receiver_id: Option<UserId>,
}

/// Pending friend requests involving the caller, split by direction.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct FriendRequestsResponse {
    /// Pending requests the caller has sent.
    pub sent: Vec<FriendRequest>,
    /// Pending requests addressed to the caller.
    pub received: Vec<FriendRequest>,
}

/// Query parameters for user lookup.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct FindUserQuery {
    /// Email of the user to look up (exact match).
    pub email: String,
}

// =============================================================================
// Account Models
// =============================================================================

/// Signup payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    /// Login email. Must be well-formed and not already registered.
    pub email: String,
    /// Raw password (hashed with Argon2 before storage).
    pub password: String,
    /// Display name. Required.
    #[serde(default)]
    pub full_name: String,
}

/// Login payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Credentials {
    /// Login email.
    pub email: String,
    /// Raw password.
    pub password: String,
}

/// Bearer token issued on signup and login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Signed bearer token for the Authorization header.
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_and_convert() {
        let user: UserId = 7.into();
        assert_eq!(user.to_string(), "7");

        let request: RequestId = 12.into();
        assert_eq!(request.to_string(), "12");
    }

    #[test]
    fn status_serializes_screaming_case() {
        let json = serde_json::to_string(&RequestStatus::Pending).unwrap();
        assert_eq!(json, r#""PENDING""#);

        let parsed: RequestStatus = serde_json::from_str(r#""ACCEPTED""#).unwrap();
        assert_eq!(parsed, RequestStatus::Accepted);
    }

    #[test]
    fn connects_is_direction_blind() {
        let request = FriendRequest {
            id: RequestId(1),
            sender_id: UserId(1),
            receiver_id: UserId(2),
            sent_at: Utc::now(),
            status: RequestStatus::Pending,
        };

        assert!(request.connects(UserId(1), UserId(2)));
        assert!(request.connects(UserId(2), UserId(1)));
        assert!(!request.connects(UserId(1), UserId(3)));
    }

    #[test]
    fn profile_excludes_credential() {
        let user = User {
            id: UserId(4),
            email: "a@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            full_name: "Ada".to_string(),
        };

        let profile = UserProfile::from(&user);
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "a@example.com");
    }
}
