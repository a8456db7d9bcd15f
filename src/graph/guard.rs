// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authorization guards and their composition.
//!
//! A guard is a value implementing [`Guard`]: one check against the current
//! call, with read access to the store and a mutable [`GuardContext`] it may
//! enrich for inner layers. Guards compose through [`GuardChain`], an ordered
//! list evaluated front to back; the first failure aborts the call and no
//! later guard or operation body runs.
//!
//! The chain for a mutating transition is typically:
//! `Authenticated` -> `ValidTarget` -> `AuthorizedForTransition`.

use crate::auth::AuthContext;
use crate::error::ApiError;
use crate::models::{FriendRequest, RequestId, RequestStatus, UserId};
use crate::store::GraphStore;

use super::identity;

/// Mutable per-call state threaded through a guard chain.
///
/// Guards deposit what they resolve (caller id, loaded target) so inner
/// guards and the operation body never repeat a lookup.
#[derive(Debug)]
pub struct GuardContext<'a> {
    auth: &'a AuthContext,
    target_id: Option<RequestId>,
    caller: Option<UserId>,
    target: Option<FriendRequest>,
}

impl<'a> GuardContext<'a> {
    pub fn new(auth: &'a AuthContext) -> Self {
        Self {
            auth,
            target_id: None,
            caller: None,
            target: None,
        }
    }

    /// Attach the friend-request identifier this call is addressed at.
    pub fn with_target(mut self, id: RequestId) -> Self {
        self.target_id = Some(id);
        self
    }

    /// The verified principal email, if any.
    pub fn principal(&self) -> Option<&'a str> {
        self.auth.principal()
    }

    /// Caller id resolved by the `Authenticated` guard.
    ///
    /// Errors if the chain was composed without it; that is a wiring bug, not
    /// a caller mistake, so it surfaces as `Unavailable`.
    pub fn caller(&self) -> Result<UserId, ApiError> {
        self.caller
            .ok_or_else(|| ApiError::unavailable("Caller identity was not resolved"))
    }

    /// Target record loaded by the `ValidTarget` guard.
    pub fn target(&self) -> Result<&FriendRequest, ApiError> {
        self.target
            .as_ref()
            .ok_or_else(|| ApiError::unavailable("Target record was not loaded"))
    }
}

/// A single authorization check.
pub trait Guard {
    /// Check the call, optionally enriching the context for inner layers.
    fn check(&self, store: &GraphStore, ctx: &mut GuardContext<'_>) -> Result<(), ApiError>;
}

/// Ordered guard composition with short-circuit evaluation.
#[derive(Default)]
pub struct GuardChain {
    guards: Vec<Box<dyn Guard>>,
}

impl GuardChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a guard; it runs after everything already in the chain.
    pub fn with(mut self, guard: impl Guard + 'static) -> Self {
        self.guards.push(Box::new(guard));
        self
    }

    /// Evaluate guards front to back, stopping at the first failure.
    pub fn evaluate(
        &self,
        store: &GraphStore,
        ctx: &mut GuardContext<'_>,
    ) -> Result<(), ApiError> {
        for guard in &self.guards {
            guard.check(store, ctx)?;
        }
        Ok(())
    }
}

// =============================================================================
// Guard Set
// =============================================================================

/// Requires a verified principal and resolves it to an internal user id.
pub struct Authenticated;

impl Guard for Authenticated {
    fn check(&self, store: &GraphStore, ctx: &mut GuardContext<'_>) -> Result<(), ApiError> {
        let Some(principal) = ctx.principal() else {
            return Err(ApiError::unauthenticated("Please log in to continue"));
        };

        ctx.caller = Some(identity::resolve_user_id(store, principal)?);
        Ok(())
    }
}

/// Requires an anonymous caller. Signup and login only make sense without a
/// session.
pub struct NotAlreadyAuthenticated;

impl Guard for NotAlreadyAuthenticated {
    fn check(&self, _store: &GraphStore, ctx: &mut GuardContext<'_>) -> Result<(), ApiError> {
        match ctx.principal() {
            Some(principal) => Err(ApiError::conflict(format!(
                "Already logged in as {principal}"
            ))),
            None => Ok(()),
        }
    }
}

/// Requires a usable friend-request identifier and loads the record once.
pub struct ValidTarget;

impl Guard for ValidTarget {
    fn check(&self, store: &GraphStore, ctx: &mut GuardContext<'_>) -> Result<(), ApiError> {
        let id = match ctx.target_id {
            None => return Err(ApiError::invalid_argument("Please provide a request ID")),
            Some(id) if id.0 <= 0 => {
                return Err(ApiError::invalid_argument("Please provide a request ID"))
            }
            Some(id) => id,
        };

        let request = store
            .get_request(id)
            .ok_or_else(|| ApiError::not_found("Friend request not found"))?;

        ctx.target = Some(request.clone());
        Ok(())
    }
}

/// Which party of a friend request a transition belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestParty {
    Sender,
    Receiver,
}

/// Requires the caller to be the named party of the loaded target, and
/// optionally requires the target to still be PENDING.
///
/// Must run after [`Authenticated`] and [`ValidTarget`].
pub struct AuthorizedForTransition {
    party: RequestParty,
    require_pending: bool,
}

impl AuthorizedForTransition {
    pub fn for_party(party: RequestParty) -> Self {
        Self {
            party,
            require_pending: false,
        }
    }

    /// Also fail with `Conflict` when the target has left PENDING.
    pub fn require_pending(mut self) -> Self {
        self.require_pending = true;
        self
    }
}

impl Guard for AuthorizedForTransition {
    fn check(&self, _store: &GraphStore, ctx: &mut GuardContext<'_>) -> Result<(), ApiError> {
        let caller = ctx.caller()?;
        let target = ctx.target()?;

        let (required, denial) = match self.party {
            RequestParty::Receiver => (
                target.receiver_id,
                "Not authorized to handle this request",
            ),
            RequestParty::Sender => (target.sender_id, "Not authorized to cancel this request"),
        };

        if caller != required {
            return Err(ApiError::forbidden(denial));
        }

        if self.require_pending && target.status != RequestStatus::Pending {
            return Err(ApiError::conflict("The request has already been handled"));
        }

        Ok(())
    }
}
