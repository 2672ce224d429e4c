//! Driving port for zone administration.

use async_trait::async_trait;

use crate::domain::{Error, Zone};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ZoneService: Send + Sync {
    async fn list_zones(&self) -> Result<Vec<Zone>, Error>;

    async fn create_zone(&self, name: String) -> Result<Zone, Error>;

    async fn delete_zone(&self, id: i32) -> Result<(), Error>;
}
