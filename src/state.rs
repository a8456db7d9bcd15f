// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::TokenService;
use crate::store::GraphStore;

/// Shared application state.
///
/// The store handle is constructed once at process start and injected into
/// every handler; there is no module-level store anywhere in the crate.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<GraphStore>>,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(store: GraphStore, tokens: TokenService) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            tokens,
        }
    }
}

impl Default for AppState {
    /// State with an empty store and a fixed dev signing secret. For tests.
    fn default() -> Self {
        Self::new(GraphStore::new(), TokenService::new("amity-dev-secret"))
    }
}
