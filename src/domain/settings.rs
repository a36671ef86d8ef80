use super::entity::RepositoryRef;
use super::error::ConfigError;
use super::pager::PageSize;

pub const DEFAULT_TITLE: &str = "GitHub网盘";

/// Parameters as received from a query string or a submitted form.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct RawSettings {
    pub repo: Option<String>,
    /// owner and name as separate form fields, used when `repo` is absent
    pub username: Option<String>,
    pub repository: Option<String>,
    pub name: Option<String>,
    pub announcement: Option<String>,
    #[serde(rename = "perPage")]
    pub per_page: Option<String>,
    pub page: Option<String>,
}

impl RawSettings {
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let repo = self.repository()?;
        let title = non_empty(self.name.as_deref())
            .unwrap_or(DEFAULT_TITLE)
            .to_string();
        let announcement = non_empty(self.announcement.as_deref()).map(String::from);
        Ok(Settings {
            repo,
            title,
            announcement,
            page_size: PageSize::parse(self.per_page.as_deref()),
        })
    }

    fn repository(&self) -> Result<RepositoryRef, ConfigError> {
        if non_empty(self.repo.as_deref()).is_some() {
            return parse_repository(self.repo.as_deref());
        }
        match (
            non_empty(self.username.as_deref()),
            non_empty(self.repository.as_deref()),
        ) {
            (Some(owner), Some(name)) => parse_repository(Some(&format!("{owner}/{name}"))),
            _ => Err(ConfigError::MissingRepository),
        }
    }

    /// Requested page, `None` when absent or not a number.
    pub fn requested_page(&self) -> Option<i64> {
        self.page
            .as_deref()
            .and_then(|value| value.trim().parse::<i64>().ok())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Splits `owner/name`, both parts trimmed and non empty.
pub fn parse_repository(value: Option<&str>) -> Result<RepositoryRef, ConfigError> {
    let value = non_empty(value).ok_or(ConfigError::MissingRepository)?;
    let mut parts = value.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(name), None)
            if !owner.trim().is_empty() && !name.trim().is_empty() =>
        {
            Ok(RepositoryRef::new(owner.trim(), name.trim()))
        }
        _ => Err(ConfigError::InvalidRepository(value.to_string())),
    }
}

/// Validated configuration of a netdisk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub repo: RepositoryRef,
    pub title: String,
    pub announcement: Option<String>,
    pub page_size: PageSize,
}

impl Settings {
    pub fn new(repo: RepositoryRef) -> Self {
        Self {
            repo,
            title: DEFAULT_TITLE.to_string(),
            announcement: None,
            page_size: PageSize::default(),
        }
    }

    /// Canonical parameters reproducing these settings, used for shareable links.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("repo", self.repo.to_string()),
            ("name", self.title.clone()),
        ];
        if let Some(ref announcement) = self.announcement {
            pairs.push(("announcement", announcement.clone()));
        }
        pairs.push(("perPage", self.page_size.to_string()));
        pairs
    }
}
