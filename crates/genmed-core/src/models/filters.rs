//! Filter and pagination state for catalog browsing.

use serde::{Deserialize, Serialize};

/// Sort order for catalog queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Most recently modified first
    #[default]
    Newest,
    /// Brand name, alphabetical
    Name,
    /// Price ascending
    PriceAsc,
    /// Price descending
    PriceDesc,
    /// Salt composition, alphabetical
    SaltComposition,
    /// Strength label, alphabetical
    Strength,
    /// Upstream record id, descending
    Id,
    /// Creation time, descending
    Created,
}

impl SortKey {
    /// The order-by clause the upstream catalog source expects.
    pub fn order_by(self) -> &'static str {
        match self {
            SortKey::Newest => "modified desc",
            SortKey::Name => "brand_name asc",
            SortKey::PriceAsc => "price asc",
            SortKey::PriceDesc => "price desc",
            SortKey::SaltComposition => "salt_composition asc",
            SortKey::Strength => "strength asc",
            SortKey::Id => "name desc",
            SortKey::Created => "creation desc",
        }
    }
}

/// Active filter state for one catalog view.
///
/// Exactly one value is active per dimension; `None` on the optional
/// dimensions means "all".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SearchFilterState {
    /// Free-text search term (debounced by the controller)
    pub search_text: String,
    /// Selected manufacturer, or None for all
    pub manufacturer: Option<String>,
    /// Selected dosage form, or None for all
    pub dosage_form: Option<String>,
    /// Restrict to items carrying an image
    pub has_image_only: bool,
    /// Sort order
    pub sort: SortKey,
}

impl SearchFilterState {
    /// Restore every dimension to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether any dimension differs from its default.
    pub fn has_active_filters(&self) -> bool {
        !self.search_text.is_empty()
            || self.manufacturer.is_some()
            || self.dosage_form.is_some()
            || self.has_image_only
    }
}

/// Incremental pagination cursor.
///
/// `has_more` stays true only while every fetched page comes back full;
/// any short page latches it false until the next filter reset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PaginationCursor {
    /// Zero-based page index
    pub page: usize,
    /// Fixed page size
    pub page_size: usize,
    /// Whether another page may exist
    pub has_more: bool,
}

impl PaginationCursor {
    /// Cursor at page zero with the given page size.
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 0,
            page_size,
            has_more: true,
        }
    }

    /// Item offset of the current page.
    pub fn offset(&self) -> usize {
        self.page * self.page_size
    }

    /// Item offset of the page after the current one.
    pub fn next_offset(&self) -> usize {
        (self.page + 1) * self.page_size
    }

    /// Return to page zero and re-enable loading.
    pub fn reset(&mut self) {
        self.page = 0;
        self.has_more = true;
    }

    /// Record a fetched page's length. A page shorter than the page
    /// size terminates pagination for the current filter state.
    pub fn record_page(&mut self, fetched: usize) {
        if fetched < self.page_size {
            self.has_more = false;
        }
    }
}

/// Selectable values for the manufacturer and dosage-form dimensions,
/// listed by the upstream source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FilterOptions {
    pub manufacturers: Vec<String>,
    pub dosage_forms: Vec<String>,
}
