//! The host seam.
//!
//! [`PagedLayout`](crate::structure::PagedLayout) never owns the tiles it
//! places. Everything it needs from the outside world goes through
//! [`GridHost`]: per-page capacities, the in-flight drag handle, and the
//! backing [`ItemList`]/[`ViewModel`] pair. Capacities are re-queried on
//! every use and must never be cached by implementors' callers, since a
//! viewport resize can change them between calls.

use crate::handle::TileHandle;
use crate::model::{ItemList, ViewModel};

/// Capabilities the paginated structure consumes from its host.
pub trait GridHost {
    /// Capacity of the page at `page`. Must be greater than zero. May vary
    /// by page (a first page with a search bar is smaller, say) and may
    /// change between calls.
    fn tiles_per_page(&self, page: usize) -> usize;

    /// The handle currently being dragged, if any.
    fn drag_handle(&self) -> Option<TileHandle> {
        None
    }

    /// The flat tile order.
    fn view_model(&self) -> &ViewModel;

    /// The persisted, break-marker-annotated order.
    fn item_list(&self) -> &ItemList;

    /// Insert a page break marker immediately after the item list entry at
    /// `item_index`. Called by
    /// [`save_to_metadata`](crate::structure::PagedLayout::save_to_metadata)
    /// only.
    fn add_page_break_after(&mut self, item_index: usize);
}

/// A self-contained [`GridHost`] with uniform page capacities.
///
/// Owns its item list and view model, allocates handles monotonically, and
/// tracks the dragged handle. Intended for tests, benches, and hosts whose
/// capacity does not depend on layout state; richer hosts implement
/// [`GridHost`] themselves.
#[derive(Debug, Clone)]
pub struct FixedGrid {
    items: ItemList,
    views: ViewModel,
    first_page_capacity: usize,
    page_capacity: usize,
    drag: Option<TileHandle>,
    next_handle: TileHandle,
}

impl FixedGrid {
    /// Host where every page holds `capacity` tiles.
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "page capacity must be positive");
        Self {
            items: ItemList::new(),
            views: ViewModel::new(),
            first_page_capacity: capacity,
            page_capacity: capacity,
            drag: None,
            next_handle: TileHandle::MIN,
        }
    }

    /// Use a different capacity for page 0.
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_first_page_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "page capacity must be positive");
        self.first_page_capacity = capacity;
        self
    }

    /// Allocate a fresh handle and append it to both backing collections.
    pub fn push_tile(&mut self) -> TileHandle {
        let handle = self.next_handle;
        self.next_handle = handle
            .checked_next()
            .expect("u64 handle space cannot be exhausted by appends");
        self.items.push_tile(handle);
        self.views.push(handle);
        handle
    }

    /// Append `count` fresh tiles, returning their handles in order.
    pub fn push_tiles(&mut self, count: usize) -> Vec<TileHandle> {
        (0..count).map(|_| self.push_tile()).collect()
    }

    /// Append a page break marker to the item list.
    pub fn push_page_break(&mut self) {
        self.items.push_page_break();
    }

    /// Mark `handle` as being dragged.
    pub fn set_drag_handle(&mut self, handle: TileHandle) {
        self.drag = Some(handle);
    }

    /// Clear the dragged handle.
    pub fn clear_drag_handle(&mut self) {
        self.drag = None;
    }

    /// Mutable access to the backing item list.
    pub fn items_mut(&mut self) -> &mut ItemList {
        &mut self.items
    }

    /// Mutable access to the backing view model.
    pub fn views_mut(&mut self) -> &mut ViewModel {
        &mut self.views
    }
}

impl GridHost for FixedGrid {
    fn tiles_per_page(&self, page: usize) -> usize {
        if page == 0 {
            self.first_page_capacity
        } else {
            self.page_capacity
        }
    }

    fn drag_handle(&self) -> Option<TileHandle> {
        self.drag
    }

    fn view_model(&self) -> &ViewModel {
        &self.views
    }

    fn item_list(&self) -> &ItemList {
        &self.items
    }

    fn add_page_break_after(&mut self, item_index: usize) {
        self.items.insert_page_break_after(item_index);
    }
}
