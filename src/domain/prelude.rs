use super::entity::*;
use super::error::{AnnouncementError, ListingError};
use super::settings::Settings;

/// Lists the releases of a repository with their assets (e.g., GitHub Releases).
pub trait ReleaseSource: Send + Sync + 'static {
    /// One listing call, never retried.
    fn list_releases(
        &self,
        repo: &RepositoryRef,
    ) -> impl Future<Output = Result<Vec<ReleaseWithAssets>, ListingError>> + Send;
}

#[cfg(test)]
mockall::mock! {
    pub ReleaseSource {}

    impl Clone for ReleaseSource {
        fn clone(&self) -> Self;
    }

    impl ReleaseSource for ReleaseSource {
        fn list_releases(
            &self,
            repo: &RepositoryRef,
        ) -> impl Future<Output = Result<Vec<ReleaseWithAssets>, ListingError>> + Send;
    }
}

/// Fetches an announcement from a caller supplied URL.
pub trait AnnouncementSource: Send + Sync + 'static {
    fn fetch_announcement(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<Announcement, AnnouncementError>> + Send;
}

#[cfg(test)]
mockall::mock! {
    pub AnnouncementSource {}

    impl Clone for AnnouncementSource {
        fn clone(&self) -> Self;
    }

    impl AnnouncementSource for AnnouncementSource {
        fn fetch_announcement(
            &self,
            url: &str,
        ) -> impl Future<Output = Result<Announcement, AnnouncementError>> + Send;
    }
}

/// Outcome of loading everything a netdisk page shows.
#[derive(Debug)]
pub struct Browse {
    pub listing: Result<Vec<Asset>, ListingError>,
    /// `None` when no announcement is configured
    pub announcement: Option<Result<Announcement, AnnouncementError>>,
}

/// Read side of a netdisk, as consumed by the presentation adapters.
pub trait Netdisk: Send + Sync + 'static {
    /// Flattened assets of all releases, newest first.
    fn aggregate(
        &self,
        repo: &RepositoryRef,
    ) -> impl Future<Output = Result<Vec<Asset>, ListingError>> + Send;

    fn announcement(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<Announcement, AnnouncementError>> + Send;

    /// Loads the asset list and the announcement concurrently.
    ///
    /// The announcement outcome never affects the listing.
    fn browse(&self, settings: &Settings) -> impl Future<Output = Browse> + Send {
        async move {
            let announcement = async {
                match settings.announcement.as_deref() {
                    Some(url) => Some(self.announcement(url).await),
                    None => None,
                }
            };
            let (listing, announcement) =
                tokio::join!(self.aggregate(&settings.repo), announcement);
            Browse {
                listing,
                announcement,
            }
        }
    }
}

#[cfg(test)]
mockall::mock! {
    pub NetdiskService {}

    impl Clone for NetdiskService {
        fn clone(&self) -> Self;
    }

    impl Netdisk for NetdiskService {
        fn aggregate(
            &self,
            repo: &RepositoryRef,
        ) -> impl Future<Output = Result<Vec<Asset>, ListingError>> + Send;

        fn announcement(
            &self,
            url: &str,
        ) -> impl Future<Output = Result<Announcement, AnnouncementError>> + Send;
    }
}
