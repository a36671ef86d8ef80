use askama::Template;

use super::{AnnouncementView, PageBlock, Segment};
use crate::domain::entity::Announcement;
use crate::domain::error::{AnnouncementError, ConfigError, ListingError};
use crate::domain::pager::PageView;
use crate::domain::settings::Settings;

/// Query string reproducing `settings` on the given page.
pub fn page_query(settings: &Settings, page_number: u32) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::from("?"));
    for (key, value) in settings.to_query_pairs() {
        serializer.append_pair(key, &value);
    }
    serializer.append_pair("page", &page_number.to_string());
    serializer.finish()
}

/// The live netdisk view.
#[derive(Template)]
#[template(path = "browse.html")]
pub struct BrowsePage<'a> {
    pub title: &'a str,
    pub announcement: Option<AnnouncementView>,
    /// the visible page, or why the listing failed
    pub listing: Result<PageBlock, String>,
}

impl<'a> BrowsePage<'a> {
    pub fn new(
        settings: &'a Settings,
        listing: Result<PageView<'_>, &ListingError>,
        announcement: Option<&Result<Announcement, AnnouncementError>>,
    ) -> Self {
        Self {
            title: &settings.title,
            announcement: announcement.map(AnnouncementView::new),
            listing: listing
                .map(|page| PageBlock::new(&page, |number| page_query(settings, number)))
                .map_err(ToString::to_string),
        }
    }
}

/// Shown when the repository is missing or malformed.
#[derive(Template)]
#[template(path = "config_error.html")]
pub struct ConfigErrorPage {
    pub title: &'static str,
    pub message: String,
}

impl ConfigErrorPage {
    pub fn new(err: &ConfigError) -> Self {
        Self {
            title: "配置错误",
            message: err.to_string(),
        }
    }
}
