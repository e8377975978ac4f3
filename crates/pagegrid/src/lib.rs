#![forbid(unsafe_code)]

//! Paginated grid placement model.
//!
//! `pagegrid` keeps track of *where tiles live* in a launcher-style
//! paginated grid: which page, which slot, what happens when a page
//! overflows or empties out, and how `(page, slot)` positions map back and
//! forth to the host's flat item order. It owns no tiles and draws nothing;
//! the host hands it opaque [`TileHandle`]s and capacity/drag state through
//! the [`GridHost`] trait and gets placement decisions back.
//!
//! The pieces:
//!
//! - [`PagedLayout`]: the page/slot structure itself, with load/save
//!   bridging to a break-marker-annotated item list, mutation operations
//!   that rebalance via [`sanitize`](PagedLayout::sanitize), and the index
//!   translation queries used for reordering.
//! - [`ItemList`] / [`ViewModel`]: the flat backing collections the host
//!   owns and the structure reads.
//! - [`GridHost`]: the capability seam, with [`FixedGrid`] as a
//!   batteries-included implementation for simple hosts and tests.
//!
//! # Example
//!
//! ```
//! use pagegrid::{FixedGrid, GridIndex, PagedLayout};
//!
//! let mut grid = FixedGrid::new(4);
//! grid.push_tiles(5);
//!
//! let mut layout = PagedLayout::new();
//! layout.load_from_metadata(&grid);
//! assert_eq!(layout.total_pages(), 2);
//!
//! // Inserting at the front of a full page cascades overflow forward.
//! let tile = grid.push_tile();
//! layout.add(&grid, tile, GridIndex::new(0, 0));
//! assert_eq!(layout.items_on_page(0), 4);
//! assert_eq!(layout.items_on_page(1), 2);
//!
//! // Persist the page boundaries back into the item list.
//! layout.save_to_metadata(&mut grid);
//! ```

pub mod handle;
pub mod host;
pub mod index;
pub mod model;
pub mod structure;

pub use handle::{TileHandle, TileHandleError};
pub use host::{FixedGrid, GridHost};
pub use index::GridIndex;
pub use model::{ItemEntry, ItemList, ViewModel};
pub use structure::{PagedLayout, StructureValidationError};
