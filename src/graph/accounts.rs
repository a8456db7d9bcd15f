// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account operations: signup, login, current user, and user lookup.

use crate::auth::{password, AuthContext, TokenService};
use crate::error::ApiError;
use crate::models::{CreateUserRequest, Credentials, RequestStatus, TokenResponse, UserProfile};
use crate::store::GraphStore;

use super::guard::{Authenticated, GuardChain, GuardContext, NotAlreadyAuthenticated};

/// Minimum password length accepted at signup.
const MIN_PASSWORD_LEN: usize = 8;

/// Register a new account and issue its first token.
pub fn create_user(
    store: &mut GraphStore,
    auth: &AuthContext,
    request: CreateUserRequest,
    tokens: &TokenService,
) -> Result<TokenResponse, ApiError> {
    let mut ctx = GuardContext::new(auth);
    GuardChain::new()
        .with(NotAlreadyAuthenticated)
        .evaluate(store, &mut ctx)?;

    let full_name = request.full_name.trim();
    if full_name.is_empty() {
        return Err(ApiError::invalid_argument("Full name required to sign up"));
    }

    if store
        .find_user(|user| user.email == request.email)
        .is_some()
    {
        return Err(ApiError::conflict("User with that email already exists"));
    }

    if !is_valid_email(&request.email) {
        return Err(ApiError::invalid_argument("Please provide a valid email"));
    }
    if !is_strong_password(&request.password) {
        return Err(ApiError::invalid_argument(
            "Password must be at least 8 characters with both letters and numbers",
        ));
    }

    let hash = password::hash_password(&request.password)?;
    let user = store.create_user(request.email, hash, full_name);
    tracing::info!(user_id = %user.id, "User created");

    mint_token(tokens, &user.email)
}

/// Verify credentials and issue a token.
pub fn login_user(
    store: &GraphStore,
    auth: &AuthContext,
    credentials: Credentials,
    tokens: &TokenService,
) -> Result<TokenResponse, ApiError> {
    let mut ctx = GuardContext::new(auth);
    GuardChain::new()
        .with(NotAlreadyAuthenticated)
        .evaluate(store, &mut ctx)?;

    let user = store
        .find_user(|user| user.email == credentials.email)
        .ok_or_else(|| {
            ApiError::not_found(format!("User {} does not exist", credentials.email))
        })?;

    if !password::verify_password(&credentials.password, &user.password_hash) {
        return Err(ApiError::unauthenticated("The password is incorrect"));
    }

    mint_token(tokens, &user.email)
}

/// Return the caller's own profile.
pub fn current_user(store: &GraphStore, auth: &AuthContext) -> Result<UserProfile, ApiError> {
    let mut ctx = GuardContext::new(auth);
    GuardChain::new()
        .with(Authenticated)
        .evaluate(store, &mut ctx)?;
    let caller = ctx.caller()?;

    store
        .get_user(caller)
        .map(UserProfile::from)
        .ok_or_else(|| ApiError::unavailable("Authenticated principal has no user record"))
}

/// Look up another user's public profile by exact email.
///
/// Reports `Conflict` when a request is already PENDING between caller and
/// target, so clients learn "already pending" before attempting to send.
pub fn find_user(
    store: &GraphStore,
    auth: &AuthContext,
    email: &str,
) -> Result<UserProfile, ApiError> {
    let mut ctx = GuardContext::new(auth);
    GuardChain::new()
        .with(Authenticated)
        .evaluate(store, &mut ctx)?;
    let caller = ctx.caller()?;

    let target = store
        .find_user(|user| user.email == email)
        .ok_or_else(|| ApiError::not_found(format!("User {email} does not exist")))?;

    if target.id == caller {
        return Err(ApiError::invalid_argument(
            "You cannot look up your own email",
        ));
    }

    if store
        .find_request(|request| {
            request.connects(caller, target.id) && request.status == RequestStatus::Pending
        })
        .is_some()
    {
        return Err(ApiError::conflict(
            "A friend request is already pending with this user",
        ));
    }

    Ok(UserProfile::from(target))
}

fn mint_token(tokens: &TokenService, email: &str) -> Result<TokenResponse, ApiError> {
    tokens
        .mint(email)
        .map(|token| TokenResponse { token })
        .map_err(|e| ApiError::unavailable(format!("Failed to issue token: {e}")))
}

/// Minimal well-formedness check: one `@`, non-empty local part, and a
/// dotted domain with non-empty labels.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || email.contains(char::is_whitespace) {
        return false;
    }
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}

/// At least 8 characters, with both letters and digits.
fn is_strong_password(password: &str) -> bool {
    password.len() >= MIN_PASSWORD_LEN
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::graph::requests::send_friend_request;
    use crate::models::UserId;

    fn tokens() -> TokenService {
        TokenService::new("test-secret")
    }

    fn signup(store: &mut GraphStore, email: &str, name: &str) {
        create_user(
            store,
            &AuthContext::anonymous(),
            CreateUserRequest {
                email: email.to_string(),
                password: "passw0rd".to_string(),
                full_name: name.to_string(),
            },
            &tokens(),
        )
        .unwrap();
    }

    #[test]
    fn signup_issues_a_verifiable_token() {
        let mut store = GraphStore::new();
        let tokens = tokens();

        let response = create_user(
            &mut store,
            &AuthContext::anonymous(),
            CreateUserRequest {
                email: "ada@example.com".to_string(),
                password: "passw0rd".to_string(),
                full_name: "Ada".to_string(),
            },
            &tokens,
        )
        .unwrap();

        let claims = tokens.verify(&response.token).unwrap();
        assert_eq!(claims.sub, "ada@example.com");
        assert!(store.find_user(|u| u.email == "ada@example.com").is_some());
    }

    #[test]
    fn signup_rejects_logged_in_callers() {
        let mut store = GraphStore::new();
        signup(&mut store, "ada@example.com", "Ada");

        let err = create_user(
            &mut store,
            &AuthContext::authenticated("ada@example.com"),
            CreateUserRequest {
                email: "other@example.com".to_string(),
                password: "passw0rd".to_string(),
                full_name: "Other".to_string(),
            },
            &tokens(),
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[test]
    fn signup_validates_its_inputs() {
        let mut store = GraphStore::new();
        let anon = AuthContext::anonymous();

        let base = CreateUserRequest {
            email: "ada@example.com".to_string(),
            password: "passw0rd".to_string(),
            full_name: "Ada".to_string(),
        };

        let mut request = base.clone();
        request.full_name = "   ".to_string();
        let err = create_user(&mut store, &anon, request, &tokens()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);

        let mut request = base.clone();
        request.email = "not-an-email".to_string();
        let err = create_user(&mut store, &anon, request, &tokens()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);

        let mut request = base.clone();
        request.password = "letters only".to_string();
        let err = create_user(&mut store, &anon, request, &tokens()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);

        let mut request = base.clone();
        request.password = "short1".to_string();
        let err = create_user(&mut store, &anon, request, &tokens()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);

        // No user was written by any failed attempt.
        assert!(store.find_user(|_| true).is_none());

        create_user(&mut store, &anon, base.clone(), &tokens()).unwrap();
        let err = create_user(&mut store, &anon, base, &tokens()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[test]
    fn login_checks_existence_then_credential() {
        let mut store = GraphStore::new();
        signup(&mut store, "ada@example.com", "Ada");
        let anon = AuthContext::anonymous();

        let err = login_user(
            &store,
            &anon,
            Credentials {
                email: "ghost@example.com".to_string(),
                password: "passw0rd".to_string(),
            },
            &tokens(),
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = login_user(
            &store,
            &anon,
            Credentials {
                email: "ada@example.com".to_string(),
                password: "wrong pass 1".to_string(),
            },
            &tokens(),
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);

        let response = login_user(
            &store,
            &anon,
            Credentials {
                email: "ada@example.com".to_string(),
                password: "passw0rd".to_string(),
            },
            &tokens(),
        )
        .unwrap();
        assert_eq!(tokens().verify(&response.token).unwrap().sub, "ada@example.com");
    }

    #[test]
    fn current_user_returns_profile_without_credential() {
        let mut store = GraphStore::new();
        signup(&mut store, "ada@example.com", "Ada");

        let profile =
            current_user(&store, &AuthContext::authenticated("ada@example.com")).unwrap();
        assert_eq!(profile.email, "ada@example.com");
        assert_eq!(profile.full_name, "Ada");

        let err = current_user(&store, &AuthContext::anonymous()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
    }

    #[test]
    fn find_user_covers_all_failure_kinds() {
        let mut store = GraphStore::new();
        signup(&mut store, "ada@example.com", "Ada");
        signup(&mut store, "ben@example.com", "Ben");
        let ada = AuthContext::authenticated("ada@example.com");

        let err = find_user(&store, &AuthContext::anonymous(), "ben@example.com").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);

        let err = find_user(&store, &ada, "ghost@example.com").unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = find_user(&store, &ada, "ada@example.com").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);

        let profile = find_user(&store, &ada, "ben@example.com").unwrap();
        assert_eq!(profile.full_name, "Ben");

        send_friend_request(&mut store, &ada, Some(UserId(2))).unwrap();
        let err = find_user(&store, &ada, "ben@example.com").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        // The pending conflict is reported to the receiver too.
        let ben = AuthContext::authenticated("ben@example.com");
        let err = find_user(&store, &ben, "ada@example.com").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[test]
    fn email_and_password_checks() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("plain"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@"));
        assert!(!is_valid_email("a@nodot"));
        assert!(!is_valid_email("a@b..co"));
        assert!(!is_valid_email("a b@c.co"));

        assert!(is_strong_password("passw0rd"));
        assert!(!is_strong_password("short1"));
        assert!(!is_strong_password("lettersonly"));
        assert!(!is_strong_password("12345678"));
    }
}
