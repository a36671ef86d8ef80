use askama::Template;
use chrono::{DateTime, Utc};

use super::{AnnouncementView, PageBlock, Segment};
use crate::domain::entity::{Announcement, Asset};
use crate::domain::error::{AnnouncementError, ListingError};
use crate::domain::pager::all_pages;
use crate::domain::settings::Settings;

pub const FILENAME: &str = "github-netdisk.html";

/// Self-contained copy of a netdisk.
///
/// Every page is rendered up front and switched with `:target` anchors, so the file needs
/// neither a server nor scripts. The `<meta>` tags carry the configuration it was made from.
#[derive(Template)]
#[template(path = "document.html")]
pub struct StandaloneDocument<'a> {
    pub title: &'a str,
    pub repo: String,
    pub per_page: u32,
    pub announcement_url: Option<&'a str>,
    pub announcement: Option<AnnouncementView>,
    pub listing: Result<Vec<PageBlock>, String>,
    pub generated_at: String,
    pub generated_at_rfc3339: String,
    /// where the live version can be reached
    pub share_url: Option<String>,
}

impl<'a> StandaloneDocument<'a> {
    pub fn new(
        settings: &'a Settings,
        listing: Result<&[Asset], &ListingError>,
        announcement: Option<&Result<Announcement, AnnouncementError>>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let listing = listing
            .map(|assets| {
                all_pages(assets, settings.page_size)
                    .map(|page| PageBlock::new(&page, |number| format!("#page-{number}")))
                    .collect()
            })
            .map_err(ToString::to_string);
        Self {
            title: &settings.title,
            repo: settings.repo.to_string(),
            per_page: settings.page_size.get(),
            announcement_url: settings.announcement.as_deref(),
            announcement: announcement.map(AnnouncementView::new),
            listing,
            generated_at: generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            generated_at_rfc3339: generated_at.to_rfc3339(),
            share_url: None,
        }
    }

    pub fn with_share_url(mut self, url: impl Into<String>) -> Self {
        self.share_url = Some(url.into());
        self
    }
}
