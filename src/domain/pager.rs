use super::entity::Asset;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Number of assets per page, always within `1..=MAX_PAGE_SIZE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct PageSize(u32);

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_PAGE_SIZE)
    }
}

impl PageSize {
    /// Values below 1 fall back to the default, values above the maximum are clamped.
    pub fn new(value: i64) -> Self {
        if value < 1 {
            Self::default()
        } else {
            Self(value.min(MAX_PAGE_SIZE as i64) as u32)
        }
    }

    /// Parses a caller supplied value, absent or non numeric values give the default.
    ///
    /// The whole trimmed value must parse, `"10abc"` is non numeric.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.trim().parse::<i64>().ok())
            .map(Self::new)
            .unwrap_or_default()
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// `ceil(count / page_size)`, 0 for an empty list.
pub fn total_pages(count: usize, page_size: PageSize) -> u32 {
    count.div_ceil(page_size.get() as usize) as u32
}

/// Cursor of a browsing session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewState {
    pub page_number: u32,
    pub page_size: PageSize,
}

impl ViewState {
    pub fn initial(page_size: PageSize) -> Self {
        Self {
            page_number: 1,
            page_size,
        }
    }

    /// Moves to `requested` when it is within `1..=total_pages`.
    ///
    /// Out of range requests leave the state untouched, they are never clamped.
    pub fn navigate(self, total_count: usize, requested: i64) -> Self {
        let total = total_pages(total_count, self.page_size) as i64;
        if requested < 1 || requested > total {
            return self;
        }
        Self {
            page_number: requested as u32,
            page_size: self.page_size,
        }
    }
}

/// What is visible for a given page.
#[derive(Clone, Copy, Debug, serde::Serialize)]
pub struct PageView<'a> {
    pub page_number: u32,
    pub page_size: u32,
    pub items: &'a [Asset],
    pub total_count: usize,
    pub total_pages: u32,
    /// at least 1, an empty list still reads as "page 1 of 1"
    pub display_total_pages: u32,
    pub has_prev: bool,
    pub has_next: bool,
    /// 1-based position of the first visible item, 0 when nothing is visible
    pub first_index: usize,
    pub last_index: usize,
}

impl<'a> PageView<'a> {
    pub fn new(assets: &'a [Asset], state: ViewState) -> Self {
        let size = state.page_size.get() as usize;
        let total_pages = total_pages(assets.len(), state.page_size);
        let start = (state.page_number.max(1) as usize - 1)
            .saturating_mul(size)
            .min(assets.len());
        let end = start.saturating_add(size).min(assets.len());
        let items = &assets[start..end];
        Self {
            page_number: state.page_number,
            page_size: state.page_size.get(),
            items,
            total_count: assets.len(),
            total_pages,
            display_total_pages: total_pages.max(1),
            has_prev: state.page_number > 1,
            has_next: state.page_number < total_pages,
            first_index: if items.is_empty() { 0 } else { start + 1 },
            last_index: end,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Navigates from `state` to `requested` and computes the resulting page.
pub fn paginate(assets: &[Asset], state: ViewState, requested: i64) -> (ViewState, PageView<'_>) {
    let state = state.navigate(assets.len(), requested);
    (state, PageView::new(assets, state))
}

/// Every page of the list in order, a single empty page for an empty list.
pub fn all_pages(assets: &[Asset], page_size: PageSize) -> impl Iterator<Item = PageView<'_>> {
    let count = total_pages(assets.len(), page_size).max(1);
    (1..=count).map(move |page_number| {
        PageView::new(
            assets,
            ViewState {
                page_number,
                page_size,
            },
        )
    })
}
