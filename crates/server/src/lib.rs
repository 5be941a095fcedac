//! # MamaSouk API Server
//!
//! Axum-based HTTP API for the MamaSouk marketplace.
//!
//! ## Modules
//!
//! - [`handlers`]: Request handlers for accounts, catalog, orders, companies
//!   and material suppliers
//! - [`dto`]: Request/response data transfer objects
//! - [`middleware`]: HTTP middleware (JWT auth, role gates)
//! - [`router`]: API route configuration

use std::sync::Arc;

use auth::{IdentityProvider, JwtConfig};

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod utils;

pub use router::create_app_router;

/// Application state shared across request handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db:         sea_orm::DbConn,
    /// JWT configuration
    pub jwt_config: JwtConfig,
    /// Injected credential validator used by the login endpoint
    pub identity:   Arc<dyn IdentityProvider>,
}

impl AppState {
    /// Create application state with the database-backed identity provider.
    #[must_use]
    pub fn new(db: sea_orm::DbConn, jwt_config: JwtConfig) -> Self {
        let identity: Arc<dyn IdentityProvider> = Arc::new(auth::DbIdentityProvider::new(db.clone()));
        Self {
            db,
            jwt_config,
            identity,
        }
    }

    /// Create application state with a custom identity provider.
    #[must_use]
    pub fn with_identity(db: sea_orm::DbConn, jwt_config: JwtConfig, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            db,
            jwt_config,
            identity,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("jwt_config", &self.jwt_config.issuer)
            .finish_non_exhaustive()
    }
}
