// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        CreateUserRequest, Credentials, FriendRequest, FriendRequestsResponse, RequestId,
        RequestStatus, SendFriendRequestRequest, TokenResponse, UserId, UserProfile,
    },
    state::AppState,
};

pub mod friend_requests;
pub mod health;
pub mod users;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/users", post(users::create_user))
        .route("/users/login", post(users::login_user))
        .route("/users/me", get(users::current_user))
        .route("/users/find", get(users::find_user))
        .route(
            "/friend-requests",
            get(friend_requests::list_friend_requests).post(friend_requests::send_friend_request),
        )
        .route(
            "/friend-requests/{id}/accept",
            post(friend_requests::accept_friend_request),
        )
        .route(
            "/friend-requests/{id}/reject",
            post(friend_requests::reject_friend_request),
        )
        .route(
            "/friend-requests/{id}",
            delete(friend_requests::cancel_friend_request),
        )
        .with_state(state.clone());

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    Router::new()
        .nest("/v1", v1_routes)
        .merge(health_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        users::create_user,
        users::login_user,
        users::current_user,
        users::find_user,
        friend_requests::list_friend_requests,
        friend_requests::send_friend_request,
        friend_requests::accept_friend_request,
        friend_requests::reject_friend_request,
        friend_requests::cancel_friend_request,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            UserId,
            RequestId,
            UserProfile,
            RequestStatus,
            FriendRequest,
            FriendRequestsResponse,
            SendFriendRequestRequest,
            CreateUserRequest,
            Credentials,
            TokenResponse
        )
    ),
    tags(
        (name = "Users", description = "Signup, login, and user lookup"),
        (name = "Friend Requests", description = "Friend request lifecycle"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = router(AppState::default());
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }
}
