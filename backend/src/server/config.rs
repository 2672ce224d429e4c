//! HTTP server configuration object.

use actix_web::cookie::{Key, SameSite};
use rounds::outbound::persistence::DbPool;
use std::net::SocketAddr;

/// Everything needed to build the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) org_id: Option<i32>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            key,
            cookie_secure,
            same_site: SameSite::Lax,
            bind_addr,
            db_pool,
            org_id: None,
        }
    }

    /// Stamp new records with this organisation.
    #[must_use]
    pub fn with_org_id(mut self, org_id: Option<i32>) -> Self {
        self.org_id = org_id;
        self
    }
}
