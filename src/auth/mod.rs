// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! This module provides bearer-token authentication for the Amity API.
//!
//! ## Auth Flow
//!
//! 1. Client signs up or logs in and receives an HS256-signed token
//! 2. Client sends `Authorization: Bearer <token>` on every call
//! 3. Server:
//!    - Verifies the token signature and expiry
//!    - Extracts `sub` -> the principal email
//!    - Builds an [`AuthContext`] carrying the principal (or `None`)
//!
//! ## Security
//!
//! - Token verification failures yield an *absent* principal rather than a
//!   transport rejection; anonymous callers reach the guard chain and fail
//!   there with a taxonomy error
//! - Tokens are signed with the `JWT_SECRET` the server was started with
//! - Clock skew tolerance is 60 seconds
//! - Raw credentials are Argon2-hashed before they touch the store

pub mod claims;
pub mod error;
pub mod extractor;
pub mod password;
pub mod tokens;

pub use claims::{AuthContext, TokenClaims};
pub use error::AuthError;
pub use tokens::TokenService;
