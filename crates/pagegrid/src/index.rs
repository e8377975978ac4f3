//! Visual grid positions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A visual position in the paginated grid: a page and a slot on that page.
///
/// `slot` is an index into the page's tile sequence. The one-past-the-end
/// slot of a page (and `(total_pages, 0)` for a brand new page) is a valid
/// *target* position for insertions even though no tile occupies it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct GridIndex {
    /// Page index, 0-based.
    pub page: usize,
    /// Slot within the page, 0-based.
    pub slot: usize,
}

impl GridIndex {
    /// The first slot of the first page.
    pub const ZERO: Self = Self { page: 0, slot: 0 };

    /// Build an index from a page and slot.
    #[must_use]
    pub const fn new(page: usize, slot: usize) -> Self {
        Self { page, slot }
    }
}

impl fmt::Display for GridIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.page, self.slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_page_major() {
        assert!(GridIndex::new(0, 5) < GridIndex::new(1, 0));
        assert!(GridIndex::new(1, 0) < GridIndex::new(1, 1));
    }

    #[test]
    fn display_formats_as_pair() {
        assert_eq!(GridIndex::new(2, 3).to_string(), "(2, 3)");
    }
}
