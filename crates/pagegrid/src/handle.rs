//! Opaque tile handles.
//!
//! A [`TileHandle`] stands in for a placed element owned by the host (an
//! item view, a launcher tile, a cell widget). The placement model never
//! looks inside a handle; it only stores handles and compares them for
//! identity, so two handles are "the same tile" exactly when their raw ids
//! are equal.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier for placed tiles.
///
/// `0` is reserved/invalid so handles are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileHandle(u64);

impl TileHandle {
    /// Lowest valid tile handle.
    pub const MIN: Self = Self(1);

    /// Create a new tile handle, rejecting 0.
    pub fn new(raw: u64) -> Result<Self, TileHandleError> {
        if raw == 0 {
            return Err(TileHandleError::ZeroHandle);
        }
        Ok(Self(raw))
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Return the next handle, or an error on overflow.
    pub fn checked_next(self) -> Result<Self, TileHandleError> {
        let Some(next) = self.0.checked_add(1) else {
            return Err(TileHandleError::HandleOverflow { current: self });
        };
        Self::new(next)
    }
}

impl Default for TileHandle {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for TileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors from handle construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileHandleError {
    /// Handle id 0 is reserved.
    ZeroHandle,
    /// The handle space is exhausted.
    HandleOverflow { current: TileHandle },
}

impl fmt::Display for TileHandleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroHandle => write!(f, "tile handle 0 is invalid"),
            Self::HandleOverflow { current } => {
                write!(f, "tile handle space exhausted at {current}")
            }
        }
    }
}

impl std::error::Error for TileHandleError {}
