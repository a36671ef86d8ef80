use chrono::{DateTime, Utc};

/// A downloadable file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Asset {
    pub id: u64,
    /// file name as uploaded
    pub name: String,
    /// size in bytes
    pub size: u64,
    pub download_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// display name of the owning release, its tag when it has no name
    pub release_name: String,
    pub release_tag: String,
}

/// A release with the assets it bundles, in upstream order.
#[derive(Debug, Clone)]
pub struct ReleaseWithAssets {
    pub tag: String,
    pub assets: Vec<Asset>,
}

/// Identifies a source repository by its owner and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl RepositoryRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Content of an announcement, as decided by its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Announcement {
    /// Embedded as is.
    Html(String),
    /// Escaped and linkified when rendered.
    Text(String),
}
