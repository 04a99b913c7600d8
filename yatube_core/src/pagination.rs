//! Fixed-size paging over ordered post collections.
//!
//! Page numbers arrive as raw query strings. Anything that is not a
//! positive integer falls back to the first page and anything past the
//! end is clamped to the last one, so resolving a page never fails.

use sea_orm::{ConnectionTrait, DbErr, ItemsAndPagesNumber, Paginator, SelectorTrait};
use serde::Serialize;

/// Posts per page on every feed.
pub const PAGE_SIZE: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    /// 1-based number of the page actually served.
    pub number: u64,
    pub num_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PageMeta {
    pub fn resolve(requested: Option<&str>, total_items: u64) -> Self {
        // An empty listing still has one (empty) page.
        let num_pages = total_items.div_ceil(PAGE_SIZE).max(1);

        let number = match requested.map(str::trim).map(str::parse::<u64>) {
            Some(Ok(n)) if n >= 1 => n.min(num_pages),
            _ => 1,
        };

        PageMeta {
            number,
            num_pages,
            total_items,
            has_next: number < num_pages,
            has_previous: number > 1,
        }
    }

    pub fn offset(&self) -> u64 {
        (self.number - 1) * PAGE_SIZE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(flatten)]
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// Slices an already ordered, fully loaded collection.
    pub fn from_items(items: Vec<T>, requested: Option<&str>) -> Self {
        let meta = PageMeta::resolve(requested, items.len() as u64);
        let items = items
            .into_iter()
            .skip(meta.offset() as usize)
            .take(PAGE_SIZE as usize)
            .collect();
        Page { items, meta }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Counts through the datastore and loads only the resolved page.
pub async fn fetch_page<'db, C, S>(
    paginator: Paginator<'db, C, S>,
    requested: Option<&str>,
) -> Result<Page<S::Item>, DbErr>
where
    C: ConnectionTrait,
    S: SelectorTrait + 'db,
{
    let ItemsAndPagesNumber {
        number_of_items, ..
    } = paginator.num_items_and_pages().await?;
    let meta = PageMeta::resolve(requested, number_of_items);
    let items = paginator.fetch_page(meta.number - 1).await?;

    Ok(Page { items, meta })
}
