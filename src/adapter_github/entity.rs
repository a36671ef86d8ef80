use chrono::{DateTime, Utc};

#[derive(Debug, serde::Deserialize)]
pub struct Asset {
    pub id: u64,
    pub name: String,
    pub browser_download_url: String,
    pub size: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, serde::Deserialize)]
pub struct Release {
    #[serde(default)]
    pub name: Option<String>,
    pub tag_name: String,
    #[serde(default)]
    pub assets: Option<Vec<Asset>>,
}

impl Release {
    /// The release name, or its tag when the name is missing or empty.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.tag_name)
    }

    pub fn into_domain(self) -> crate::domain::entity::ReleaseWithAssets {
        let release_name = self.display_name().to_string();
        let assets = self
            .assets
            .unwrap_or_default()
            .into_iter()
            .map(|asset| crate::domain::entity::Asset {
                id: asset.id,
                name: asset.name,
                size: asset.size,
                download_url: asset.browser_download_url,
                created_at: asset.created_at,
                updated_at: asset.updated_at,
                release_name: release_name.clone(),
                release_tag: self.tag_name.clone(),
            })
            .collect();
        crate::domain::entity::ReleaseWithAssets {
            tag: self.tag_name,
            assets,
        }
    }
}

#[derive(Clone, Copy, Debug, serde::Serialize)]
pub struct Pagination {
    pub per_page: u32,
    pub page: u32,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { per_page, page }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Repository<'a> {
    pub owner: &'a str,
    pub name: &'a str,
}

impl<'a> From<&'a crate::domain::entity::RepositoryRef> for Repository<'a> {
    fn from(value: &'a crate::domain::entity::RepositoryRef) -> Self {
        Self {
            owner: value.owner.as_str(),
            name: value.name.as_str(),
        }
    }
}
