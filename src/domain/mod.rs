pub mod aggregate;
pub mod entity;
pub mod error;
pub mod format;
pub mod pager;
pub mod prelude;
pub mod settings;

use entity::{Announcement, Asset, RepositoryRef};
use error::{AnnouncementError, ListingError};

#[derive(Clone, Debug)]
pub struct NetdiskService<RS, AS> {
    releases: RS,
    announcements: AS,
}

impl<RS, AS> NetdiskService<RS, AS> {
    pub fn new(releases: RS, announcements: AS) -> Self {
        Self {
            releases,
            announcements,
        }
    }
}

impl<RS, AS> prelude::Netdisk for NetdiskService<RS, AS>
where
    RS: prelude::ReleaseSource,
    AS: prelude::AnnouncementSource,
{
    #[tracing::instrument(skip_all, fields(repo = %repo), err(Display))]
    async fn aggregate(&self, repo: &RepositoryRef) -> Result<Vec<Asset>, ListingError> {
        let releases = self.releases.list_releases(repo).await?;
        let release_count = releases.len();
        for release in releases.iter().filter(|release| release.assets.is_empty()) {
            tracing::debug!(tag = %release.tag, "release without assets");
        }
        let assets = aggregate::flatten(releases);
        tracing::info!(releases = release_count, assets = assets.len(), "assets aggregated");
        Ok(assets)
    }

    #[tracing::instrument(skip(self), err(Display))]
    async fn announcement(&self, url: &str) -> Result<Announcement, AnnouncementError> {
        self.announcements.fetch_announcement(url).await
    }
}
