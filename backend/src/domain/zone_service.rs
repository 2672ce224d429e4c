//! Zone administration service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{ZoneRepository, ZoneService};
use crate::domain::{Error, Zone, ZoneDraft};

#[derive(Clone)]
pub struct ZoneServiceImpl<R> {
    zones: Arc<R>,
    org_id: Option<i32>,
}

impl<R> ZoneServiceImpl<R> {
    pub fn new(zones: Arc<R>, org_id: Option<i32>) -> Self {
        Self { zones, org_id }
    }
}

#[async_trait]
impl<R> ZoneService for ZoneServiceImpl<R>
where
    R: ZoneRepository,
{
    async fn list_zones(&self) -> Result<Vec<Zone>, Error> {
        Ok(self.zones.list().await?)
    }

    async fn create_zone(&self, name: String) -> Result<Zone, Error> {
        let draft =
            ZoneDraft::try_new(&name).map_err(|err| Error::invalid_request(err.to_string()))?;
        let zone = self.zones.create(self.org_id, &draft).await?;
        info!(zone_id = zone.id, "zone created");
        Ok(zone)
    }

    async fn delete_zone(&self, id: i32) -> Result<(), Error> {
        if self.zones.delete(id).await? {
            info!(zone_id = id, "zone deleted");
            Ok(())
        } else {
            Err(Error::not_found(format!("zone {id} not found")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockZoneRepository;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[tokio::test]
    async fn blank_names_are_rejected(#[case] name: &str) {
        let mut repo = MockZoneRepository::new();
        repo.expect_create().times(0);

        let error = ZoneServiceImpl::new(Arc::new(repo), None)
            .create_zone(name.to_owned())
            .await
            .expect_err("blank name");

        assert!(error.is_validation());
    }

    #[tokio::test]
    async fn create_trims_name_and_stamps_org() {
        let mut repo = MockZoneRepository::new();
        repo.expect_create()
            .withf(|org_id, draft| *org_id == Some(3) && draft.name() == "North")
            .return_once(|org_id, draft| {
                Ok(Zone {
                    id: 1,
                    org_id,
                    name: Some(draft.name().to_owned()),
                })
            });

        let zone = ZoneServiceImpl::new(Arc::new(repo), Some(3))
            .create_zone(" North ".to_owned())
            .await
            .expect("zone created");

        assert_eq!(zone.name.as_deref(), Some("North"));
    }

    #[tokio::test]
    async fn deleting_unknown_zone_is_not_found() {
        let mut repo = MockZoneRepository::new();
        repo.expect_delete().return_once(|_| Ok(false));

        let error = ZoneServiceImpl::new(Arc::new(repo), None)
            .delete_zone(8)
            .await
            .expect_err("unknown zone");

        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
