use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HadithBook {
    pub id: String,
    pub name: String,
    pub available: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hadith {
    pub number: u32,
    pub arabic: String,
    pub translation: String,
}

impl Hadith {
    /// Plain-text form used when copying a narration out of the reader.
    pub fn share_text(&self, book_name: &str) -> String {
        format!(
            "{}\n\n{}\n\n({} No. {})",
            self.arabic, self.translation, book_name, self.number
        )
    }
}

/// A 1-based inclusive window over a hadith book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HadithRange {
    pub start: u32,
    pub end: u32,
    pub page_size: u32,
}

impl HadithRange {
    pub fn first(page_size: u32) -> Self {
        let page_size = page_size.max(1);
        Self {
            start: 1,
            end: page_size,
            page_size,
        }
    }

    /// Page `page` (1-based), `page = 0` treated as the first page. Pages
    /// past the last one addressable in `u32` land on that last page.
    pub fn page(page: u32, page_size: u32) -> Self {
        let page_size = page_size.max(1);
        let page = page.clamp(1, u32::MAX / page_size);
        Self {
            start: (page - 1) * page_size + 1,
            end: page * page_size,
            page_size,
        }
    }

    /// The page that contains hadith `number`, e.g. 55 lands on 41-60.
    pub fn containing(number: u32, page_size: u32) -> Self {
        let page_size = page_size.max(1);
        Self::page(number.max(1).div_ceil(page_size), page_size)
    }

    pub fn page_number(&self) -> u32 {
        self.end.div_ceil(self.page_size)
    }

    /// Next window, or `None` once `end` has reached the book's available count.
    pub fn next(&self, available: Option<u32>) -> Option<Self> {
        if let Some(available) = available {
            if self.end >= available {
                return None;
            }
        }
        Some(Self {
            start: self.end.checked_add(1)?,
            end: self.end.saturating_add(self.page_size),
            page_size: self.page_size,
        })
    }

    pub fn prev(&self) -> Option<Self> {
        if self.start <= 1 {
            return None;
        }
        Some(Self {
            start: self.start.saturating_sub(self.page_size).max(1),
            end: self.end.saturating_sub(self.page_size).max(self.page_size),
            page_size: self.page_size,
        })
    }

    pub fn query_value(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }
}
