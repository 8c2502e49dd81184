//! Filtered, paginated beneficiary listing.
//!
//! Everything shown is derived from `(records, category, search_term, current_page)` on demand;
//! the controller itself only stores those inputs plus the selection.

use shared::domain::{format_amount, BeneficiaryId, BeneficiaryRecord, Category};
use tracing::debug;

pub const PAGE_SIZE: usize = 10;
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load beneficiaries";

pub fn matches_category(record: &BeneficiaryRecord, category: Category) -> bool {
    record.category() == category
}

/// Case-insensitive substring match on name, surname and university. Empty terms match all.
pub fn matches_search(record: &BeneficiaryRecord, search_term: &str) -> bool {
    let needle = search_term.to_lowercase();
    needle.is_empty() || record.search_haystack().to_lowercase().contains(&needle)
}

pub fn filter_records<'a>(
    records: &'a [BeneficiaryRecord],
    category: Category,
    search_term: &str,
) -> Vec<&'a BeneficiaryRecord> {
    records
        .iter()
        .filter(|record| matches_category(record, category) && matches_search(record, search_term))
        .collect()
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// Slice for a 1-indexed page; out-of-range pages are empty.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub id: BeneficiaryId,
    pub title: String,
    pub university: String,
    pub total_label: String,
}

impl ListRow {
    fn from_record(record: &BeneficiaryRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.full_name(),
            university: record.university.clone(),
            total_label: format_amount(record.accumulated_total),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPage {
    pub category: Category,
    pub rows: Vec<ListRow>,
    pub current_page: usize,
    pub page_count: usize,
    pub total_matches: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl ListPage {
    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.page_count)
    }

    /// Paging controls are only rendered past a single page.
    pub fn shows_pagination(&self) -> bool {
        self.page_count > 1
    }
}

#[derive(Debug, Clone)]
pub struct ListView {
    active_category: Category,
    search_term: String,
    current_page: usize,
    page_size: usize,
    selected: Option<BeneficiaryId>,
    is_loading: bool,
    load_error: Option<String>,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl ListView {
    pub fn new(page_size: usize) -> Self {
        Self {
            active_category: Category::Granted,
            search_term: String::new(),
            current_page: 1,
            page_size: page_size.max(1),
            selected: None,
            is_loading: false,
            load_error: None,
        }
    }

    pub fn active_category(&self) -> Category {
        self.active_category
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn selected(&self) -> Option<&BeneficiaryId> {
        self.selected.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn set_category(&mut self, category: Category) {
        if self.active_category != category {
            self.active_category = category;
            self.current_page = 1;
        }
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if self.search_term != term {
            self.search_term = term;
            self.current_page = 1;
        }
    }

    pub fn filtered<'a>(&self, records: &'a [BeneficiaryRecord]) -> Vec<&'a BeneficiaryRecord> {
        filter_records(records, self.active_category, &self.search_term)
    }

    pub fn page_count(&self, records: &[BeneficiaryRecord]) -> usize {
        page_count(self.filtered(records).len(), self.page_size)
    }

    pub fn next_page(&mut self, records: &[BeneficiaryRecord]) {
        let pages = self.page_count(records);
        self.current_page = (self.current_page + 1).min(pages.max(1));
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    pub fn go_to_page(&mut self, page: usize, records: &[BeneficiaryRecord]) {
        let pages = self.page_count(records);
        self.current_page = page.clamp(1, pages.max(1));
    }

    /// Pulls the page back in range after the underlying records changed.
    pub fn clamp_page(&mut self, records: &[BeneficiaryRecord]) {
        let pages = self.page_count(records).max(1);
        if self.current_page > pages {
            debug!(from = self.current_page, to = pages, "clamping page after refresh");
            self.current_page = pages;
        }
    }

    pub fn derive(&self, records: &[BeneficiaryRecord]) -> ListPage {
        let filtered = self.filtered(records);
        let pages = page_count(filtered.len(), self.page_size);
        let rows = page_slice(&filtered, self.current_page, self.page_size)
            .iter()
            .map(|record| ListRow::from_record(record))
            .collect();

        ListPage {
            category: self.active_category,
            rows,
            current_page: self.current_page,
            page_count: pages,
            total_matches: filtered.len(),
            has_previous: self.current_page > 1,
            has_next: pages > 0 && self.current_page < pages,
        }
    }

    /// Selects a record and returns a snapshot of it for the detail modal.
    pub fn select(
        &mut self,
        records: &[BeneficiaryRecord],
        id: &BeneficiaryId,
    ) -> Option<BeneficiaryRecord> {
        let record = records.iter().find(|record| &record.id == id)?.clone();
        self.selected = Some(record.id.clone());
        Some(record)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn begin_loading(&mut self) {
        self.is_loading = true;
        self.load_error = None;
    }

    pub fn finish_loading(&mut self, failed: bool) {
        self.is_loading = false;
        self.load_error = failed.then(|| LOAD_FAILED_MESSAGE.to_string());
    }

    /// Back to the state of a freshly mounted view.
    pub fn reset(&mut self) {
        *self = Self::new(self.page_size);
    }
}

#[cfg(test)]
#[path = "tests/list_view_tests.rs"]
mod tests;
