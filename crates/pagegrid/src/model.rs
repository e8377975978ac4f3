//! Flat backing collections for the paginated structure.
//!
//! Two parallel views of the same tiles exist at this layer:
//!
//! - [`ItemList`]: the persisted order, where page boundaries are recorded
//!   as explicit [`ItemEntry::PageBreak`] entries interleaved with tiles.
//! - [`ViewModel`]: the flat tile order with no break entries, addressed by
//!   *model index*.
//!
//! The i-th tile entry of the item list and the i-th handle of the view
//! model name the same tile. Keeping that correspondence is the host's
//! responsibility; the structure only reads both through
//! [`GridHost`](crate::host::GridHost).

use serde::{Deserialize, Serialize};

use crate::handle::TileHandle;

/// One entry of the persisted item order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemEntry {
    /// A placed tile.
    Tile { handle: TileHandle },
    /// A page boundary marker. Carries no tile and no identity of its own.
    PageBreak,
}

impl ItemEntry {
    /// Whether this entry is a page boundary marker.
    #[must_use]
    pub const fn is_page_break(&self) -> bool {
        matches!(self, Self::PageBreak)
    }

    /// The tile handle, if this entry is a tile.
    #[must_use]
    pub const fn handle(&self) -> Option<TileHandle> {
        match self {
            Self::Tile { handle } => Some(*handle),
            Self::PageBreak => None,
        }
    }
}

/// The persisted, break-marker-annotated item order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemList {
    entries: Vec<ItemEntry>,
}

impl ItemList {
    /// Empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of entries, break markers included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`, if in range.
    #[must_use]
    pub fn entry(&self, index: usize) -> Option<&ItemEntry> {
        self.entries.get(index)
    }

    /// Iterate over all entries in order.
    pub fn entries(&self) -> impl Iterator<Item = &ItemEntry> {
        self.entries.iter()
    }

    /// Number of tile entries (break markers excluded).
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| !entry.is_page_break())
            .count()
    }

    /// Append an entry.
    pub fn push(&mut self, entry: ItemEntry) {
        self.entries.push(entry);
    }

    /// Append a tile entry.
    pub fn push_tile(&mut self, handle: TileHandle) {
        self.entries.push(ItemEntry::Tile { handle });
    }

    /// Append a page break marker.
    pub fn push_page_break(&mut self) {
        self.entries.push(ItemEntry::PageBreak);
    }

    /// Insert a page break marker immediately after the entry at `index`.
    ///
    /// Later entries shift right by one. Panics if `index` is out of range,
    /// same as slice indexing.
    pub fn insert_page_break_after(&mut self, index: usize) {
        self.entries.insert(index + 1, ItemEntry::PageBreak);
    }

    /// Remove the entry at `index` and return it.
    ///
    /// Panics if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> ItemEntry {
        self.entries.remove(index)
    }
}

/// The flat tile order, addressed by model index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewModel {
    handles: Vec<TileHandle>,
}

impl ViewModel {
    /// Empty model.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            handles: Vec::new(),
        }
    }

    /// Number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether the model holds no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Handle at `model_index`, if in range.
    #[must_use]
    pub fn handle_at(&self, model_index: usize) -> Option<TileHandle> {
        self.handles.get(model_index).copied()
    }

    /// Model index of `handle`, if present.
    #[must_use]
    pub fn index_of(&self, handle: TileHandle) -> Option<usize> {
        self.handles.iter().position(|&h| h == handle)
    }

    /// Iterate over handles in model order.
    pub fn handles(&self) -> impl Iterator<Item = TileHandle> + '_ {
        self.handles.iter().copied()
    }

    /// Append a handle.
    pub fn push(&mut self, handle: TileHandle) {
        self.handles.push(handle);
    }

    /// Insert a handle at `model_index`, shifting later handles right.
    ///
    /// Panics if `model_index > len()`.
    pub fn insert(&mut self, model_index: usize, handle: TileHandle) {
        self.handles.insert(model_index, handle);
    }

    /// Remove the first occurrence of `handle`, if present.
    pub fn remove(&mut self, handle: TileHandle) -> Option<usize> {
        let index = self.index_of(handle)?;
        self.handles.remove(index);
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(raw: u64) -> TileHandle {
        TileHandle::new(raw).expect("test handle must be non-zero")
    }

    #[test]
    fn tile_count_skips_break_markers() {
        let mut items = ItemList::new();
        items.push_tile(handle(1));
        items.push_page_break();
        items.push_tile(handle(2));
        items.push_page_break();
        assert_eq!(items.len(), 4);
        assert_eq!(items.tile_count(), 2);
    }

    #[test]
    fn insert_page_break_after_shifts_later_entries() {
        let mut items = ItemList::new();
        items.push_tile(handle(1));
        items.push_tile(handle(2));
        items.insert_page_break_after(0);
        assert!(items.entry(1).expect("in range").is_page_break());
        assert_eq!(items.entry(2).and_then(ItemEntry::handle), Some(handle(2)));
    }

    #[test]
    fn view_model_reverse_lookup() {
        let mut views = ViewModel::new();
        views.push(handle(3));
        views.push(handle(5));
        assert_eq!(views.index_of(handle(5)), Some(1));
        assert_eq!(views.index_of(handle(9)), None);
        assert_eq!(views.handle_at(0), Some(handle(3)));
        assert_eq!(views.handle_at(2), None);
    }

    #[test]
    fn item_entry_serde_tags_kind() {
        let entry = ItemEntry::Tile { handle: handle(4) };
        let json = serde_json::to_string(&entry).expect("serialize");
        assert_eq!(json, r#"{"kind":"tile","handle":4}"#);
        let marker = serde_json::to_string(&ItemEntry::PageBreak).expect("serialize");
        assert_eq!(marker, r#"{"kind":"page_break"}"#);
    }
}
