use crate::adapter_github::entity::{Pagination, Release, Repository};
use crate::domain::error::ListingError;

impl super::Client {
    fn releases_url(&self, repo: Repository<'_>) -> Result<url::Url, ListingError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ListingError::network(None, "github base url cannot be a base"))?
            .pop_if_empty()
            .extend(["repos", repo.owner, repo.name, "releases"]);
        Ok(url)
    }

    /// Fetch the first page of releases, in the order GitHub returns them.
    pub(crate) async fn fetch_releases(
        &self,
        repo: Repository<'_>,
        page: Pagination,
    ) -> Result<Vec<Release>, ListingError> {
        let url = self.releases_url(repo)?;
        let res = self
            .inner
            .get(url)
            .query(&page)
            .send()
            .await
            .map_err(|err| {
                ListingError::network(err.status().map(|code| code.as_u16()), err.to_string())
            })?;
        if let Some(err) = ListingError::from_status(res.status().as_u16()) {
            return Err(err);
        }
        let body = res
            .bytes()
            .await
            .map_err(|err| ListingError::network(None, err.to_string()))?;
        serde_json::from_slice(&body).map_err(|err| ListingError::Malformed(err.to_string()))
    }
}

impl crate::domain::prelude::ReleaseSource for super::Client {
    #[tracing::instrument(skip_all, fields(repo = %repo), err(Display))]
    async fn list_releases(
        &self,
        repo: &crate::domain::entity::RepositoryRef,
    ) -> Result<Vec<crate::domain::entity::ReleaseWithAssets>, ListingError> {
        let releases = self
            .fetch_releases(Repository::from(repo), Pagination::new(1, self.per_page))
            .await?;
        tracing::debug!(count = releases.len(), "releases received");
        Ok(releases.into_iter().map(Release::into_domain).collect())
    }
}
