// Copyright 2025 the Annotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tile addresses.

use core::fmt;

use crate::zoom::ZoomLevel;

/// Address of one tile: a zoom level plus integer column/row at that level.
///
/// Column and row are signed because the Mercator world is centered on the
/// origin. Keys order by zoom first, then column, then row.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileKey {
    /// Zoom level the tile belongs to.
    pub zoom: ZoomLevel,
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl TileKey {
    /// Create a key from its parts.
    pub const fn new(x: i32, y: i32, zoom: ZoomLevel) -> Self {
        Self { zoom, x, y }
    }
}

impl fmt::Display for TileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom.get(), self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_by_zoom_before_position() {
        let z1 = ZoomLevel::MIN;
        let z2 = ZoomLevel::new(2).unwrap();
        assert!(TileKey::new(5, 5, z1) < TileKey::new(-5, -5, z2));
        assert!(TileKey::new(0, 1, z2) < TileKey::new(1, 0, z2));
    }
}
