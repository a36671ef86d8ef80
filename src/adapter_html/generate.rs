use askama::Template;

use crate::domain::pager::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::domain::settings::DEFAULT_TITLE;

/// Form building a netdisk: preview it, download it, or get a shareable link.
#[derive(Template)]
#[template(path = "generate.html")]
pub struct GeneratorPage {
    pub title: &'static str,
    pub default_name: &'static str,
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for GeneratorPage {
    fn default() -> Self {
        Self {
            title: "生成GitHub网盘",
            default_name: DEFAULT_TITLE,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}
