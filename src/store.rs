// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory relational store for users and friend requests.
//!
//! The store is the only shared mutable resource in the service. It is held
//! behind `Arc<RwLock<_>>` in [`crate::state::AppState`]; mutating operations
//! run their guard evaluation and their write inside a single write-lock
//! scope, so lookup-then-act sequences are not interleaved with other writers.
//!
//! Access goes through a small command set: find-one and find-many with a
//! filter predicate, plus keyed create, update, and delete.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::{FriendRequest, RequestId, RequestStatus, User, UserId};

#[derive(Debug, Default)]
pub struct GraphStore {
    users: HashMap<UserId, User>,
    requests: HashMap<RequestId, FriendRequest>,
    next_user_id: i64,
    next_request_id: i64,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Users ==========

    /// Find a single user matching the predicate.
    pub fn find_user(&self, pred: impl Fn(&User) -> bool) -> Option<&User> {
        self.users.values().find(|user| pred(user))
    }

    /// Get a user by identifier.
    pub fn get_user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    /// Create a user with a fresh identifier.
    pub fn create_user(
        &mut self,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        full_name: impl Into<String>,
    ) -> User {
        self.next_user_id += 1;
        let user = User {
            id: UserId(self.next_user_id),
            email: email.into(),
            password_hash: password_hash.into(),
            full_name: full_name.into(),
        };
        self.users.insert(user.id, user.clone());
        user
    }

    // ========== Friend Requests ==========

    /// Find a single friend request matching the predicate.
    pub fn find_request(&self, pred: impl Fn(&FriendRequest) -> bool) -> Option<&FriendRequest> {
        self.requests.values().find(|request| pred(request))
    }

    /// Find all friend requests matching the predicate.
    pub fn find_requests(&self, pred: impl Fn(&FriendRequest) -> bool) -> Vec<FriendRequest> {
        let mut matches: Vec<FriendRequest> = self
            .requests
            .values()
            .filter(|request| pred(request))
            .cloned()
            .collect();
        matches.sort_by_key(|request| request.id);
        matches
    }

    /// Get a friend request by identifier.
    pub fn get_request(&self, id: RequestId) -> Option<&FriendRequest> {
        self.requests.get(&id)
    }

    /// Create a PENDING friend request with a fresh identifier.
    pub fn create_request(
        &mut self,
        sender_id: UserId,
        receiver_id: UserId,
        sent_at: DateTime<Utc>,
    ) -> FriendRequest {
        self.next_request_id += 1;
        let request = FriendRequest {
            id: RequestId(self.next_request_id),
            sender_id,
            receiver_id,
            sent_at,
            status: RequestStatus::Pending,
        };
        self.requests.insert(request.id, request.clone());
        request
    }

    /// Update the status of a friend request. No other field changes.
    ///
    /// Returns the updated record, or `None` when the identifier is unknown.
    pub fn update_request_status(
        &mut self,
        id: RequestId,
        status: RequestStatus,
    ) -> Option<FriendRequest> {
        let request = self.requests.get_mut(&id)?;
        request.status = status;
        Some(request.clone())
    }

    /// Delete a friend request, returning its prior values.
    pub fn delete_request(&mut self, id: RequestId) -> Option<FriendRequest> {
        self.requests.remove(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_assigns_increasing_ids() {
        let mut store = GraphStore::new();
        let a = store.create_user("a@example.com", "hash-a", "Ada");
        let b = store.create_user("b@example.com", "hash-b", "Ben");

        assert_eq!(a.id, UserId(1));
        assert_eq!(b.id, UserId(2));
        assert_eq!(store.get_user(a.id).unwrap().email, "a@example.com");
    }

    #[test]
    fn find_user_matches_exact_email() {
        let mut store = GraphStore::new();
        store.create_user("a@example.com", "hash", "Ada");

        assert!(store.find_user(|u| u.email == "a@example.com").is_some());
        // Case-sensitive match only.
        assert!(store.find_user(|u| u.email == "A@example.com").is_none());
    }

    #[test]
    fn create_request_starts_pending() {
        let mut store = GraphStore::new();
        let request = store.create_request(UserId(1), UserId(2), Utc::now());

        assert_eq!(request.id, RequestId(1));
        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(store.get_request(request.id), Some(&request));
    }

    #[test]
    fn update_request_status_changes_only_status() {
        let mut store = GraphStore::new();
        let created = store.create_request(UserId(1), UserId(2), Utc::now());

        let updated = store
            .update_request_status(created.id, RequestStatus::Accepted)
            .unwrap();
        assert_eq!(updated.status, RequestStatus::Accepted);
        assert_eq!(updated.sender_id, created.sender_id);
        assert_eq!(updated.receiver_id, created.receiver_id);
        assert_eq!(updated.sent_at, created.sent_at);

        assert!(store
            .update_request_status(RequestId(99), RequestStatus::Rejected)
            .is_none());
    }

    #[test]
    fn delete_request_returns_prior_values() {
        let mut store = GraphStore::new();
        let created = store.create_request(UserId(1), UserId(2), Utc::now());

        let deleted = store.delete_request(created.id).unwrap();
        assert_eq!(deleted, created);
        assert!(store.get_request(created.id).is_none());
        assert!(store.delete_request(created.id).is_none());
    }

    #[test]
    fn find_requests_returns_matches_in_id_order() {
        let mut store = GraphStore::new();
        store.create_request(UserId(1), UserId(2), Utc::now());
        store.create_request(UserId(1), UserId(3), Utc::now());
        store.create_request(UserId(4), UserId(1), Utc::now());

        let sent = store.find_requests(|r| r.sender_id == UserId(1));
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].id, RequestId(1));
        assert_eq!(sent[1].id, RequestId(2));
    }
}
