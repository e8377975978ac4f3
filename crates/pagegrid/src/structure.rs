//! The paginated placement structure.
//!
//! [`PagedLayout`] keeps an ordered sequence of pages, each an ordered
//! sequence of tile handles, synchronized with the host's flat
//! [`ViewModel`](crate::model::ViewModel) and break-marker-annotated
//! [`ItemList`](crate::model::ItemList). It answers both directions of
//! index translation (model index to `(page, slot)` and back) and keeps two
//! invariants across mutations:
//!
//! - no page is empty, and
//! - no page exceeds its host-supplied capacity.
//!
//! [`sanitize`](PagedLayout::sanitize) restores both after a mutation by
//! carrying overflow forward page by page; `add`/`remove`/`move_to` run it
//! automatically, the `_without_sanitize` variants leave it to the caller
//! so a batch of edits can pay for one pass.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::handle::TileHandle;
use crate::host::GridHost;
use crate::index::GridIndex;

/// Page/slot bookkeeping for a paginated grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedLayout {
    pages: Vec<Vec<TileHandle>>,
}

impl PagedLayout {
    /// Structure with zero pages.
    #[must_use]
    pub const fn new() -> Self {
        Self { pages: Vec::new() }
    }

    /// Number of pages.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    /// Number of tiles on the page at `page`.
    ///
    /// `page` must be in range; violating that is a caller bug.
    #[must_use]
    pub fn items_on_page(&self, page: usize) -> usize {
        debug_assert!(page < self.pages.len(), "page {page} out of range");
        self.pages.get(page).map_or(0, Vec::len)
    }

    /// Read-only view of the page sequence.
    #[must_use]
    pub fn pages(&self) -> &[Vec<TileHandle>] {
        &self.pages
    }

    /// Whether `index` addresses an existing, populated slot.
    #[must_use]
    pub fn is_valid_index(&self, index: GridIndex) -> bool {
        index.page < self.pages.len() && index.slot < self.pages[index.page].len()
    }

    /// Rebuild the page sequence from the host's item list.
    ///
    /// A break marker starts a new page unless the current page is already
    /// empty (a redundant marker is ignored rather than materializing an
    /// empty page). A page that reaches its capacity rolls subsequent tiles
    /// onto a new page even without a marker. A trailing empty page is
    /// dropped, so a list with no tiles loads as zero pages.
    pub fn load_from_metadata(&mut self, host: &impl GridHost) {
        let items = host.item_list();
        let views = host.view_model();
        let mut model_index = 0;

        self.pages.clear();
        self.pages.push(Vec::new());
        for entry in items.entries() {
            let mut current = self.pages.len() - 1;
            if entry.is_page_break() {
                if !self.pages[current].is_empty() {
                    self.pages.push(Vec::new());
                }
                continue;
            }

            if self.pages[current].len() == host.tiles_per_page(current) {
                self.pages.push(Vec::new());
                current += 1;
            }

            debug_assert_eq!(
                entry.handle(),
                views.handle_at(model_index),
                "item list and view model disagree at model index {model_index}"
            );
            if let Some(handle) = views.handle_at(model_index) {
                self.pages[current].push(handle);
                model_index += 1;
            }
        }

        if self.pages.last().is_some_and(Vec::is_empty) {
            self.pages.pop();
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            pages = self.pages.len(),
            tiles = model_index,
            "loaded page structure from metadata"
        );
    }

    /// Record this structure's page boundaries into the host's item list.
    ///
    /// Walks pages and the item list in lockstep and asks the host to
    /// insert a break marker wherever a page boundary has none. Existing
    /// markers are never removed here: the list visible to this structure
    /// may be filtered, so deduplication belongs to whatever service holds
    /// the complete list.
    pub fn save_to_metadata(&self, host: &mut impl GridHost) {
        let mut item_index = 0;

        for page in &self.pages {
            // Skip the markers between the previous page and this one.
            while host
                .item_list()
                .entry(item_index)
                .is_some_and(|entry| entry.is_page_break())
            {
                item_index += 1;
            }
            item_index += page.len();
            if host
                .item_list()
                .entry(item_index)
                .is_some_and(|entry| !entry.is_page_break())
            {
                // No marker at the end of this page; add one to push the
                // following tiles onto the next page.
                host.add_page_break_after(item_index - 1);
            }
        }
    }

    /// Restore the no-empty-page and capacity invariants.
    ///
    /// Single forward pass with an overflow carry list: tiles past a page's
    /// capacity are carried to the front of the next page (cascading as far
    /// as needed, appending pages at the end), and pages left empty are
    /// removed. Returns whether anything changed.
    pub fn sanitize(&mut self, host: &impl GridHost) -> bool {
        let mut changed = false;
        let mut overflow: Vec<TileHandle> = Vec::new();
        let mut page_index = 0;

        while page_index < self.pages.len() || !overflow.is_empty() {
            if page_index == self.pages.len() {
                // Overflowing tiles remain past the last page.
                self.pages.push(Vec::new());
                changed = true;
            }

            let capacity = host.tiles_per_page(page_index);
            if !overflow.is_empty() {
                let page = &mut self.pages[page_index];
                page.splice(0..0, overflow.drain(..));
                changed = true;
            }

            if self.pages[page_index].is_empty() {
                // The next page shifts into this slot; re-examine it.
                self.pages.remove(page_index);
                changed = true;
                continue;
            }

            let page = &mut self.pages[page_index];
            if page.len() > capacity {
                overflow.extend(page.drain(capacity..));
                changed = true;
            }

            page_index += 1;
        }

        #[cfg(feature = "tracing")]
        if changed {
            tracing::trace!(pages = self.pages.len(), "sanitize reshaped page structure");
        }

        changed
    }

    /// Insert `handle` at `target` and rebalance.
    pub fn add(&mut self, host: &impl GridHost, handle: TileHandle, target: GridIndex) {
        self.add_without_sanitize(handle, target);
        self.sanitize(host);
    }

    /// Insert `handle` at `target` without rebalancing.
    ///
    /// `target` must name an existing page with `slot <= items_on_page`, or
    /// be `(total_pages, 0)` to open a new page. Capacity is deliberately
    /// not checked here; [`sanitize`](Self::sanitize) owns overflow.
    pub fn add_without_sanitize(&mut self, handle: TileHandle, target: GridIndex) {
        let total = self.pages.len();
        debug_assert!(
            (target.page < total && target.slot <= self.pages[target.page].len())
                || (target.page == total && target.slot == 0),
            "add target {target} out of contract for {total} pages"
        );

        if target.page == total {
            self.pages.push(Vec::new());
        }
        self.pages[target.page].insert(target.slot, handle);
    }

    /// Remove the first occurrence of `handle` and rebalance.
    pub fn remove(&mut self, host: &impl GridHost, handle: TileHandle) {
        self.remove_without_sanitize(handle);
        self.sanitize(host);
    }

    /// Remove the first occurrence of `handle` without rebalancing.
    ///
    /// A handle that is not present is a no-op, not an error; callers may
    /// race removal against other mutation.
    pub fn remove_without_sanitize(&mut self, handle: TileHandle) {
        for page in &mut self.pages {
            if let Some(slot) = page.iter().position(|&h| h == handle) {
                page.remove(slot);
                break;
            }
        }
    }

    /// Move `handle` to `target`.
    ///
    /// Remove-without-sanitize followed by a full add, so exactly one
    /// rebalancing pass runs. The intermediate handle-in-no-page state is
    /// never observable from outside.
    pub fn move_to(&mut self, host: &impl GridHost, handle: TileHandle, target: GridIndex) {
        self.remove_without_sanitize(handle);
        self.add(host, handle, target);
    }

    /// Visual position of the tile at `model_index`.
    ///
    /// Falls back to [`last_target_index`](Self::last_target_index) when
    /// the handle cannot be located in any page. That should not happen
    /// once [`load_from_metadata`](Self::load_from_metadata) has run, but
    /// the permissive answer keeps a stale query harmless.
    #[must_use]
    pub fn index_from_model_index(&self, host: &impl GridHost, model_index: usize) -> GridIndex {
        if let Some(handle) = host.view_model().handle_at(model_index) {
            for (page_index, page) in self.pages.iter().enumerate() {
                if let Some(slot) = page.iter().position(|&h| h == handle) {
                    return GridIndex::new(page_index, slot);
                }
            }
        }
        self.last_target_index(host)
    }

    /// Model index of the tile at `index`.
    ///
    /// An out-of-range `index` yields the one-past-the-end sentinel
    /// (`view_model().len()`), not an error.
    #[must_use]
    pub fn model_index_from_index(&self, host: &impl GridHost, index: GridIndex) -> usize {
        let views = host.view_model();
        if index.page >= self.pages.len() || index.slot >= self.pages[index.page].len() {
            return views.len();
        }
        let handle = self.pages[index.page][index.slot];
        views.index_of(handle).unwrap_or(views.len())
    }

    /// The position just past the last placed tile.
    ///
    /// The dragged handle does not count toward occupancy: while a drag is
    /// in flight the tile's origin slot is going away, so a full-looking
    /// last page still has room. When the last page is genuinely full the
    /// answer is the first slot of the not-yet-created next page.
    #[must_use]
    pub fn last_target_index(&self, host: &impl GridHost) -> GridIndex {
        if host.view_model().is_empty() || self.pages.is_empty() {
            return GridIndex::ZERO;
        }

        let last_page = self.pages.len() - 1;
        let drag = host.drag_handle();
        let slot = self.pages[last_page]
            .iter()
            .filter(|&&h| Some(h) != drag)
            .count();

        if slot == host.tiles_per_page(last_page) {
            GridIndex::new(last_page + 1, 0)
        } else {
            GridIndex::new(last_page, slot)
        }
    }

    /// The last valid target slot on the page at `page`.
    ///
    /// `page == total_pages()` answers `(page, 0)`, the append position of
    /// a brand new page. Unlike [`last_target_index`](Self::last_target_index)
    /// a full page clamps to its own final slot rather than spilling onto
    /// the next page. The dragged handle is excluded from occupancy, as
    /// above.
    #[must_use]
    pub fn last_target_index_of_page(&self, host: &impl GridHost, page: usize) -> GridIndex {
        let total = self.pages.len();
        debug_assert!(page <= total, "page {page} out of range for {total} pages");

        if page >= total {
            return GridIndex::new(page, 0);
        }

        let drag = host.drag_handle();
        let mut slot = self.pages[page].iter().filter(|&&h| Some(h) != drag).count();
        if slot == host.tiles_per_page(page) {
            slot -= 1;
        }
        GridIndex::new(page, slot)
    }

    /// Model index `moved` would occupy after landing at `index`.
    ///
    /// Sums the page sizes before `index.page`, discounting `moved` if it
    /// currently sits on one of those pages (its departure shifts the rest
    /// left). A same-page move takes no discount: the tiles after the gap
    /// shift to fill it.
    #[must_use]
    pub fn target_model_index_for_move(&self, moved: TileHandle, index: GridIndex) -> usize {
        let mut target = 0;
        let max_page = index.page.min(self.pages.len());
        for page in &self.pages[..max_page] {
            target += page.len();
            if page.contains(&moved) {
                target -= 1;
            }
        }
        target + index.slot
    }

    /// Item list index `moved` would occupy after landing at `index`.
    ///
    /// Walks the item list with a synthetic `(page, slot)` cursor that
    /// advances per tile and rolls to the next page at each break-marker
    /// run. Passing `moved` on a page strictly before the target records a
    /// one-slot discount, mirroring
    /// [`target_model_index_for_move`](Self::target_model_index_for_move);
    /// a same-page move takes none.
    #[must_use]
    pub fn target_item_index_for_move(
        &self,
        host: &impl GridHost,
        moved: TileHandle,
        index: GridIndex,
    ) -> usize {
        let items = host.item_list();
        let mut cursor = GridIndex::ZERO;
        let mut item_index = 0;
        let mut offset = 0;

        let is_break = |i: usize| items.entry(i).is_some_and(|entry| entry.is_page_break());
        let is_tile = |i: usize| items.entry(i).is_some_and(|entry| !entry.is_page_break());

        // Leading markers belong to no page.
        while is_break(item_index) {
            item_index += 1;
        }

        while item_index < items.len() {
            while is_tile(item_index) && cursor != index {
                if items.entry(item_index).and_then(|entry| entry.handle()) == Some(moved)
                    && cursor.page < index.page
                {
                    // Moving to a later page vacates this slot, shifting
                    // the target left by one in the flat list. A same-page
                    // move leaves the gap to be filled by the tiles after
                    // it.
                    offset = 1;
                }
                cursor.slot += 1;
                item_index += 1;
            }

            if cursor == index {
                return item_index - offset;
            }

            // Markers at the end of this page.
            while is_break(item_index) {
                item_index += 1;
            }
            cursor.page += 1;
            cursor.slot = 0;
        }

        debug_assert_eq!(cursor, index, "walk ended before reaching {index}");
        item_index - offset
    }

    /// Whether `index` is a position a reorder may target.
    ///
    /// Occupied slots are valid, and so is the last target slot of any page
    /// up to and including the not-yet-created one past the end: dropping
    /// at a page's very end is always allowed.
    #[must_use]
    pub fn is_valid_reorder_target_index(&self, host: &impl GridHost, index: GridIndex) -> bool {
        if self.is_valid_index(index) {
            return true;
        }
        index.page <= self.pages.len() && self.last_target_index_of_page(host, index.page) == index
    }

    /// Whether the page at `page` holds exactly its capacity.
    ///
    /// A page that does not exist yet is never full.
    #[must_use]
    pub fn is_full_page(&self, host: &impl GridHost, page: usize) -> bool {
        if page >= self.pages.len() {
            return false;
        }
        self.pages[page].len() == host.tiles_per_page(page)
    }

    /// Check the structural invariants without repairing anything.
    ///
    /// Rejects empty pages, pages over their capacity, and a handle placed
    /// in more than one slot. [`sanitize`](Self::sanitize) repairs the
    /// first two; a duplicate handle can only come from caller misuse of
    /// the `_without_sanitize` entry points.
    pub fn validate(&self, host: &impl GridHost) -> Result<(), StructureValidationError> {
        let mut seen: FxHashMap<TileHandle, GridIndex> = FxHashMap::default();
        for (page_index, page) in self.pages.iter().enumerate() {
            if page.is_empty() {
                return Err(StructureValidationError::EmptyPage { page: page_index });
            }
            let capacity = host.tiles_per_page(page_index);
            if page.len() > capacity {
                return Err(StructureValidationError::PageOverCapacity {
                    page: page_index,
                    len: page.len(),
                    capacity,
                });
            }
            for (slot, &handle) in page.iter().enumerate() {
                let here = GridIndex::new(page_index, slot);
                if let Some(&first) = seen.get(&handle) {
                    return Err(StructureValidationError::DuplicateHandle {
                        handle,
                        first,
                        second: here,
                    });
                }
                seen.insert(handle, here);
            }
        }
        Ok(())
    }
}

/// Structural invariant violations reported by [`PagedLayout::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureValidationError {
    /// A page holds no tiles.
    EmptyPage { page: usize },
    /// A page holds more tiles than its capacity.
    PageOverCapacity {
        page: usize,
        len: usize,
        capacity: usize,
    },
    /// A handle occupies two slots at once.
    DuplicateHandle {
        handle: TileHandle,
        first: GridIndex,
        second: GridIndex,
    },
}

impl fmt::Display for StructureValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPage { page } => write!(f, "page {page} is empty"),
            Self::PageOverCapacity {
                page,
                len,
                capacity,
            } => {
                write!(f, "page {page} holds {len} tiles, capacity {capacity}")
            }
            Self::DuplicateHandle {
                handle,
                first,
                second,
            } => {
                write!(f, "handle {handle} placed at both {first} and {second}")
            }
        }
    }
}

impl std::error::Error for StructureValidationError {}
