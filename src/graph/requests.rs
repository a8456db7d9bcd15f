// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Friend-request state machine.
//!
//! States per record: PENDING, ACCEPTED, REJECTED, or absent (deleted).
//! Transitions: PENDING -> ACCEPTED (receiver), PENDING -> REJECTED
//! (receiver), any -> absent (sender cancel; status is deliberately not
//! checked there).
//!
//! Every operation evaluates its guard chain against the same store borrow it
//! mutates through, so the caller's lock scope makes check-then-act atomic.

use chrono::Utc;

use crate::auth::AuthContext;
use crate::error::ApiError;
use crate::models::{FriendRequest, FriendRequestsResponse, RequestId, RequestStatus, UserId};
use crate::store::GraphStore;

use super::guard::{
    Authenticated, AuthorizedForTransition, GuardChain, GuardContext, RequestParty, ValidTarget,
};

/// Create a PENDING request from the caller to `receiver_id`.
///
/// The self-request and duplicate checks are intrinsic to this operation
/// rather than guards; they need arguments no outer layer knows.
pub fn send_friend_request(
    store: &mut GraphStore,
    auth: &AuthContext,
    receiver_id: Option<UserId>,
) -> Result<FriendRequest, ApiError> {
    let mut ctx = GuardContext::new(auth);
    GuardChain::new()
        .with(Authenticated)
        .evaluate(store, &mut ctx)?;
    let sender = ctx.caller()?;

    let receiver = match receiver_id {
        Some(id) if id.0 > 0 => id,
        _ => return Err(ApiError::invalid_argument("Please provide a receiver")),
    };

    if sender == receiver {
        return Err(ApiError::invalid_argument("Sender cannot be the receiver"));
    }

    // One request per unordered pair, in either direction, in any status. A
    // rejected or accepted record still blocks a new request.
    if store
        .find_request(|request| request.connects(sender, receiver))
        .is_some()
    {
        return Err(ApiError::conflict("Duplicate friend request"));
    }

    let request = store.create_request(sender, receiver, Utc::now());
    tracing::info!(
        request_id = %request.id,
        sender_id = %sender,
        receiver_id = %receiver,
        "Friend request sent"
    );
    Ok(request)
}

/// Accept a PENDING request addressed to the caller.
pub fn accept_friend_request(
    store: &mut GraphStore,
    auth: &AuthContext,
    id: RequestId,
) -> Result<FriendRequest, ApiError> {
    handle_friend_request(store, auth, id, RequestStatus::Accepted)
}

/// Reject a PENDING request addressed to the caller.
pub fn reject_friend_request(
    store: &mut GraphStore,
    auth: &AuthContext,
    id: RequestId,
) -> Result<FriendRequest, ApiError> {
    handle_friend_request(store, auth, id, RequestStatus::Rejected)
}

fn handle_friend_request(
    store: &mut GraphStore,
    auth: &AuthContext,
    id: RequestId,
    status: RequestStatus,
) -> Result<FriendRequest, ApiError> {
    let mut ctx = GuardContext::new(auth).with_target(id);
    GuardChain::new()
        .with(Authenticated)
        .with(ValidTarget)
        .with(AuthorizedForTransition::for_party(RequestParty::Receiver).require_pending())
        .evaluate(store, &mut ctx)?;

    let target_id = ctx.target()?.id;
    let updated = store
        .update_request_status(target_id, status)
        .ok_or_else(|| ApiError::unavailable("Friend request vanished during update"))?;

    tracing::info!(request_id = %updated.id, status = ?updated.status, "Friend request handled");
    Ok(updated)
}

/// Delete a request the caller sent, returning its prior values.
///
/// Deliberately no status guard: the sender may withdraw a request the
/// receiver has already handled.
pub fn cancel_friend_request(
    store: &mut GraphStore,
    auth: &AuthContext,
    id: RequestId,
) -> Result<FriendRequest, ApiError> {
    let mut ctx = GuardContext::new(auth).with_target(id);
    GuardChain::new()
        .with(Authenticated)
        .with(ValidTarget)
        .with(AuthorizedForTransition::for_party(RequestParty::Sender))
        .evaluate(store, &mut ctx)?;

    let target_id = ctx.target()?.id;
    let deleted = store
        .delete_request(target_id)
        .ok_or_else(|| ApiError::unavailable("Friend request vanished during delete"))?;

    tracing::info!(request_id = %deleted.id, "Friend request cancelled");
    Ok(deleted)
}

/// List the caller's PENDING requests, split into sent and received.
///
/// ACCEPTED and REJECTED records are never returned here; clients observe
/// those outcomes in the mutation response.
pub fn get_friend_requests(
    store: &GraphStore,
    auth: &AuthContext,
) -> Result<FriendRequestsResponse, ApiError> {
    let mut ctx = GuardContext::new(auth);
    GuardChain::new()
        .with(Authenticated)
        .evaluate(store, &mut ctx)?;
    let caller = ctx.caller()?;

    let sent = store.find_requests(|request| {
        request.sender_id == caller && request.status == RequestStatus::Pending
    });
    let received = store.find_requests(|request| {
        request.receiver_id == caller && request.status == RequestStatus::Pending
    });

    Ok(FriendRequestsResponse { sent, received })
}
