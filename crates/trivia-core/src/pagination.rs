//! Page arithmetic for question listings

use serde::{Deserialize, Serialize};

/// Questions per listing page
pub const QUESTIONS_PER_PAGE: usize = 10;

/// A 1-based page number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page(u64);

impl Page {
    pub const FIRST: Page = Page(1);
    /// Stands in for any positive page number too large to represent
    pub const LAST: Page = Page(u64::MAX);

    /// Returns `None` for page 0
    pub fn new(number: u64) -> Option<Self> {
        (number > 0).then_some(Page(number))
    }

    /// Parse a `?page=` value, falling back to the first page when it is
    /// absent, not an integer, or not positive. Positive integers beyond
    /// `u64::MAX` saturate to [`Page::LAST`].
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(text) = raw.map(str::trim) else {
            return Page::FIRST;
        };
        match text.parse::<u64>() {
            Ok(number) => Page::new(number).unwrap_or(Page::FIRST),
            Err(_) if is_huge_positive(text) => Page::LAST,
            Err(_) => Page::FIRST,
        }
    }

    pub fn number(&self) -> u64 {
        self.0
    }

    /// Half-open `[start, end)` item range covered by this page
    pub fn bounds(&self, per_page: usize) -> (usize, usize) {
        let skipped = usize::try_from(self.0 - 1).unwrap_or(usize::MAX);
        let start = skipped.saturating_mul(per_page);
        (start, start.saturating_add(per_page))
    }

    /// Take this page's slice out of an ordered list
    pub fn slice<T>(&self, items: Vec<T>, per_page: usize) -> Vec<T> {
        let (start, end) = self.bounds(per_page);
        items.into_iter().skip(start).take(end - start).collect()
    }
}

/// All digits (with an optional `+`) and not zero, but overflowed `u64`
fn is_huge_positive(text: &str) -> bool {
    let digits = text.strip_prefix('+').unwrap_or(text);
    !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && digits.bytes().any(|b| b != b'0')
}

impl Default for Page {
    fn default() -> Self {
        Page::FIRST
    }
}
