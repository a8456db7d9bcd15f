// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints: signup, login, current user, and lookup.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::AuthContext,
    error::ApiError,
    graph::accounts,
    models::{CreateUserRequest, Credentials, FindUserQuery, TokenResponse, UserProfile},
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/v1/users",
    request_body = CreateUserRequest,
    tag = "Users",
    responses(
        (status = 201, description = "Account created", body = TokenResponse),
        (status = 400, description = "Invalid email, password, or name"),
        (status = 409, description = "Email already registered, or caller already logged in"),
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    let mut store = state.store.write().await;
    let token = accounts::create_user(&mut store, &ctx, request, &state.tokens)?;
    Ok((StatusCode::CREATED, Json(token)))
}

#[utoipa::path(
    post,
    path = "/v1/users/login",
    request_body = Credentials,
    tag = "Users",
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 401, description = "Wrong password"),
        (status = 404, description = "No account with that email"),
        (status = 409, description = "Caller already logged in"),
    )
)]
pub async fn login_user(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(credentials): Json<Credentials>,
) -> Result<Json<TokenResponse>, ApiError> {
    let store = state.store.read().await;
    let token = accounts::login_user(&store, &ctx, credentials, &state.tokens)?;
    Ok(Json(token))
}

/// Get the current authenticated user's profile.
#[utoipa::path(
    get,
    path = "/v1/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Caller's profile", body = UserProfile),
        (status = 401, description = "Not logged in"),
    )
)]
pub async fn current_user(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<UserProfile>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(accounts::current_user(&store, &ctx)?))
}

/// Look up another user by exact email.
#[utoipa::path(
    get,
    path = "/v1/users/find",
    params(FindUserQuery),
    tag = "Users",
    responses(
        (status = 200, description = "Public profile", body = UserProfile),
        (status = 400, description = "Caller looked up their own email"),
        (status = 401, description = "Not logged in"),
        (status = 404, description = "No such user"),
        (status = 409, description = "A request is already pending with this user"),
    )
)]
pub async fn find_user(
    State(state): State<AppState>,
    ctx: AuthContext,
    Query(params): Query<FindUserQuery>,
) -> Result<Json<UserProfile>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(accounts::find_user(&store, &ctx, &params.email)?))
}
