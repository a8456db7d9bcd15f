// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Friend-request endpoints.
//!
//! Mutations hold the store write lock across guard evaluation and the write
//! itself, so a concurrent call cannot act on the same record between the
//! check and the mutation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::AuthContext,
    error::ApiError,
    graph::requests,
    models::{FriendRequest, FriendRequestsResponse, RequestId, SendFriendRequestRequest},
    state::AppState,
};

/// List the caller's pending requests, split into sent and received.
#[utoipa::path(
    get,
    path = "/v1/friend-requests",
    tag = "Friend Requests",
    responses(
        (status = 200, description = "Pending requests", body = FriendRequestsResponse),
        (status = 401, description = "Not logged in"),
    )
)]
pub async fn list_friend_requests(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<FriendRequestsResponse>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(requests::get_friend_requests(&store, &ctx)?))
}

#[utoipa::path(
    post,
    path = "/v1/friend-requests",
    request_body = SendFriendRequestRequest,
    tag = "Friend Requests",
    responses(
        (status = 201, description = "Request created", body = FriendRequest),
        (status = 400, description = "Missing receiver, or receiver is the caller"),
        (status = 401, description = "Not logged in"),
        (status = 409, description = "A request already links this pair"),
    )
)]
pub async fn send_friend_request(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(request): Json<SendFriendRequestRequest>,
) -> Result<(StatusCode, Json<FriendRequest>), ApiError> {
    let mut store = state.store.write().await;
    let created = requests::send_friend_request(&mut store, &ctx, request.receiver_id)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    post,
    path = "/v1/friend-requests/{id}/accept",
    params(("id" = i64, Path, description = "Identifier of the request to accept")),
    tag = "Friend Requests",
    responses(
        (status = 200, description = "Request accepted", body = FriendRequest),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Caller is not the receiver"),
        (status = 404, description = "No such request"),
        (status = 409, description = "Request already handled"),
    )
)]
pub async fn accept_friend_request(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<i64>,
) -> Result<Json<FriendRequest>, ApiError> {
    let mut store = state.store.write().await;
    Ok(Json(requests::accept_friend_request(
        &mut store,
        &ctx,
        RequestId(id),
    )?))
}

#[utoipa::path(
    post,
    path = "/v1/friend-requests/{id}/reject",
    params(("id" = i64, Path, description = "Identifier of the request to reject")),
    tag = "Friend Requests",
    responses(
        (status = 200, description = "Request rejected", body = FriendRequest),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Caller is not the receiver"),
        (status = 404, description = "No such request"),
        (status = 409, description = "Request already handled"),
    )
)]
pub async fn reject_friend_request(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<i64>,
) -> Result<Json<FriendRequest>, ApiError> {
    let mut store = state.store.write().await;
    Ok(Json(requests::reject_friend_request(
        &mut store,
        &ctx,
        RequestId(id),
    )?))
}

/// Withdraw a request the caller sent. Returns the deleted record's prior
/// values.
#[utoipa::path(
    delete,
    path = "/v1/friend-requests/{id}",
    params(("id" = i64, Path, description = "Identifier of the request to cancel")),
    tag = "Friend Requests",
    responses(
        (status = 200, description = "Request deleted", body = FriendRequest),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Caller is not the sender"),
        (status = 404, description = "No such request"),
    )
)]
pub async fn cancel_friend_request(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<i64>,
) -> Result<Json<FriendRequest>, ApiError> {
    let mut store = state.store.write().await;
    Ok(Json(requests::cancel_friend_request(
        &mut store,
        &ctx,
        RequestId(id),
    )?))
}
