// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Social-Graph Core
//!
//! The authorization-guard composition and friend-request state machine.
//!
//! Every operation here takes the per-call [`crate::auth::AuthContext`] and a
//! reference to the store, evaluates an ordered guard chain, and only then
//! acts. Guards short-circuit: the first violation aborts the call before any
//! write happens.
//!
//! - `guard` - the `Guard` trait, the chain evaluator, and the guard set
//! - `identity` - principal email -> internal user id resolution
//! - `accounts` - signup, login, current-user, and user lookup
//! - `requests` - the friend-request state machine

pub mod accounts;
pub mod guard;
pub mod identity;
pub mod requests;

pub use guard::{Guard, GuardChain, GuardContext};
