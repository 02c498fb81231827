// Copyright 2025 the Annotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zoom levels and their validation.

use core::fmt;

/// Highest zoom level annotations are indexed at.
///
/// Matches the upper drawing scale of the map: past this level the renderer
/// reuses the tiles of the last one.
pub const MAX_ZOOM_LEVEL: u8 = 17;

/// Errors produced while addressing tiles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TileError {
    /// Zoom level `0` or a level above [`MAX_ZOOM_LEVEL`].
    #[error("zoom level {level} is outside 1..={max}")]
    ZoomOutOfRange {
        /// The rejected level.
        level: u8,
        /// The highest accepted level.
        max: u8,
    },
}

/// A discrete resolution index. Higher values partition space into smaller tiles.
///
/// Always in `1..=MAX_ZOOM_LEVEL`; zoom `0` does not exist for annotation tiles.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoomLevel(u8);

impl ZoomLevel {
    /// The coarsest zoom level.
    pub const MIN: Self = Self(1);
    /// The finest zoom level.
    pub const MAX: Self = Self(MAX_ZOOM_LEVEL);

    /// Validate a raw zoom level.
    pub const fn new(level: u8) -> Result<Self, TileError> {
        if level == 0 || level > MAX_ZOOM_LEVEL {
            return Err(TileError::ZoomOutOfRange {
                level,
                max: MAX_ZOOM_LEVEL,
            });
        }
        Ok(Self(level))
    }

    /// The raw level.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Iterate from [`ZoomLevel::MIN`] up to and including `self`.
    pub const fn from_min(self) -> ZoomLevels {
        ZoomLevels {
            next: Self::MIN.0,
            last: self.0,
        }
    }
}

impl TryFrom<u8> for ZoomLevel {
    type Error = TileError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<ZoomLevel> for u8 {
    fn from(zoom: ZoomLevel) -> Self {
        zoom.0
    }
}

impl fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "z{}", self.0)
    }
}

/// Ascending iterator over a contiguous run of zoom levels.
///
/// Returned by [`ZoomLevel::from_min`] and
/// [`TileScheme::zoom_levels`](crate::TileScheme::zoom_levels).
#[derive(Clone, Debug)]
pub struct ZoomLevels {
    next: u8,
    last: u8,
}

impl Iterator for ZoomLevels {
    type Item = ZoomLevel;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.last {
            return None;
        }
        let zoom = ZoomLevel(self.next);
        self.next += 1;
        Some(zoom)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::from(self.last.saturating_add(1).saturating_sub(self.next));
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ZoomLevels {}
