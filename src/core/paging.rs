//! Paging cursor
//!
//! Page numbers start at 1. Out-of-range requests are clamped rather than rejected.

/// Rows per page when none is configured
pub const DEFAULT_PAGE_SIZE: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagingConfig {
    /// When disabled the whole data set is one page
    pub enabled: bool,
    page_size: usize,
    data_length: usize,
    // 0-based
    current_page: usize,
}

impl Default for PagingConfig {
    fn default() -> Self {
        PagingConfig {
            enabled: true,
            page_size: DEFAULT_PAGE_SIZE,
            data_length: 0,
            current_page: 0,
        }
    }
}

impl PagingConfig {
    pub fn new(data_length: usize, page_size: usize) -> Self {
        let mut paging = Self::default();
        paging.set_page_size(page_size);
        paging.set_data_length(data_length);
        paging
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Sizes below 1 are clamped to 1
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.clamp_current_page();
    }

    pub fn data_length(&self) -> usize {
        self.data_length
    }

    pub fn set_data_length(&mut self, data_length: usize) {
        self.data_length = data_length;
        self.clamp_current_page();
    }

    /// Current 1-based page number
    pub fn current_page(&self) -> usize {
        self.current_page + 1
    }

    /// Move to `page`, clamped into `[1, max_page_number]`
    pub fn set_current_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.max_page_number()) - 1;
    }

    /// Last page number; at least 1 even for empty data
    pub fn max_page_number(&self) -> usize {
        if self.data_length == 0 {
            return 1;
        }
        self.data_length.div_ceil(self.page_size)
    }

    /// Number of rows before the current page
    pub fn num_entries_to_skip(&self) -> usize {
        if !self.enabled {
            return 0;
        }
        self.current_page * self.page_size
    }

    /// Number of rows on the current page
    pub fn num_entries_to_take(&self) -> usize {
        if !self.enabled {
            return self.data_length;
        }
        self.page_size
            .min(self.data_length.saturating_sub(self.page_size * self.current_page))
    }

    fn clamp_current_page(&mut self) {
        self.current_page = self.current_page.min(self.max_page_number() - 1);
    }
}
