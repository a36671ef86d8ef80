//! HTML rendering of netdisk pages, kept free of any I/O.
//!
//! Every page is an askama template under `templates/`, the structs here only carry
//! display ready values.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::entity::{Announcement, Asset};
use crate::domain::error::AnnouncementError;
use crate::domain::format::{extension_of, format_size, icon_for};
use crate::domain::pager::PageView;

mod document;
mod generate;
mod page;

pub use document::{FILENAME as DOCUMENT_FILENAME, StandaloneDocument};
pub use generate::GeneratorPage;
pub use page::{BrowsePage, ConfigErrorPage, page_query};

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s<]+").expect("valid url pattern"));

/// Piece of a plain text announcement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    LineBreak,
    Link(String),
}

/// Splits plain text into text runs, line breaks and bare URLs.
pub fn segments(text: &str) -> Vec<Segment> {
    let text = text.replace("\r\n", "\n");
    let mut result = Vec::new();
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            result.push(Segment::LineBreak);
        }
        let mut last = 0;
        for found in URL_PATTERN.find_iter(line) {
            if found.start() > last {
                result.push(Segment::Text(line[last..found.start()].to_string()));
            }
            result.push(Segment::Link(found.as_str().to_string()));
            last = found.end();
        }
        if last < line.len() {
            result.push(Segment::Text(line[last..].to_string()));
        }
    }
    result
}

/// What the announcement box shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnnouncementView {
    /// Embedded without escaping.
    Html(String),
    Text(Vec<Segment>),
    Failed(String),
}

impl AnnouncementView {
    pub fn new(outcome: &Result<Announcement, AnnouncementError>) -> Self {
        match outcome {
            Ok(Announcement::Html(content)) => Self::Html(content.clone()),
            Ok(Announcement::Text(content)) => Self::Text(segments(content)),
            Err(err) => Self::Failed(err.to_string()),
        }
    }
}

/// One line of the file list.
#[derive(Clone, Debug)]
pub struct FileRow {
    pub icon: &'static str,
    pub name: String,
    pub size: String,
    pub updated_at: String,
    pub release_name: String,
    pub download_url: String,
}

impl From<&Asset> for FileRow {
    fn from(asset: &Asset) -> Self {
        Self {
            icon: icon_for(&extension_of(&asset.name)),
            name: asset.name.clone(),
            size: format_size(asset.size),
            updated_at: asset.updated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            release_name: asset.release_name.clone(),
            download_url: asset.download_url.clone(),
        }
    }
}

/// A page of files with its prev/next controls.
#[derive(Clone, Debug)]
pub struct PageBlock {
    pub number: u32,
    pub display_total_pages: u32,
    pub prev: Option<String>,
    pub next: Option<String>,
    pub files: Vec<FileRow>,
    pub first_index: usize,
    pub last_index: usize,
    pub total_count: usize,
}

impl PageBlock {
    /// `link` gives the target of a page number.
    pub fn new(page: &PageView<'_>, link: impl Fn(u32) -> String) -> Self {
        Self {
            number: page.page_number,
            display_total_pages: page.display_total_pages,
            prev: page.has_prev.then(|| link(page.page_number - 1)),
            next: page.has_next.then(|| link(page.page_number + 1)),
            files: page.items.iter().map(FileRow::from).collect(),
            first_index: page.first_index,
            last_index: page.last_index,
            total_count: page.total_count,
        }
    }
}
