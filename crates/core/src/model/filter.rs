//
// ─── CATEGORY FILTER ───────────────────────────────────────────────────────────
//

/// Category selection: the "all" sentinel or one exact category value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// True when a card with the given category passes this filter.
    /// Comparison is exact and case-sensitive.
    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(selected) => selected == category,
        }
    }

    /// The selected category value, if one is selected.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Category(selected) => Some(selected),
        }
    }
}

//
// ─── FILTER STATE ──────────────────────────────────────────────────────────────
//

/// Transient per-session filter state. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub query: String,
    pub show_mastered: bool,
}

impl FilterState {
    /// True when the raw query is exactly the empty string.
    ///
    /// Mastery hiding keys off this raw check while the match stage trims;
    /// a whitespace-only query therefore disables hiding without matching
    /// anything.
    #[must_use]
    pub fn query_is_raw_empty(&self) -> bool {
        self.query.is_empty()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
