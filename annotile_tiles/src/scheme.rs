// Copyright 2025 the Annotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tiling schemes: how points map to tiles.

use core::fmt::Debug;

use kurbo::{Point, Rect};

use crate::key::TileKey;
use crate::zoom::{ZoomLevel, ZoomLevels};

/// Pluggable mapping from world coordinates to tiles.
///
/// Implementations must be deterministic: the same point and zoom always
/// yield the same key, and each point lies in exactly one tile per zoom.
pub trait TileScheme: Debug {
    /// The tile containing `point` at `zoom`.
    fn tile_of(&self, point: Point, zoom: ZoomLevel) -> TileKey;

    /// The finest zoom level this scheme is used at.
    fn upper_zoom(&self) -> ZoomLevel;

    /// World-space rectangle covered by `key`.
    fn tile_rect(&self, key: TileKey) -> Rect;

    /// All zoom levels from [`ZoomLevel::MIN`] through [`TileScheme::upper_zoom`].
    fn zoom_levels(&self) -> ZoomLevels {
        self.upper_zoom().from_min()
    }
}

/// Lower bound of the projected Mercator world on both axes.
pub const WORLD_MIN: f64 = -180.0;
/// Upper bound of the projected Mercator world on both axes.
pub const WORLD_MAX: f64 = 180.0;

/// Square Mercator tiling.
///
/// At zoom `z` the world `[WORLD_MIN, WORLD_MAX]²` is split into tiles of side
/// `(WORLD_MAX - WORLD_MIN) / 2^(z - 1)`, with tile `(0, 0)` starting at the
/// origin. Zoom 1 therefore has four tiles, one per quadrant.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MercatorScheme {
    upper_zoom: ZoomLevel,
}

impl Default for MercatorScheme {
    fn default() -> Self {
        Self::new()
    }
}

impl MercatorScheme {
    /// Create a scheme indexing every zoom level up to [`ZoomLevel::MAX`].
    pub const fn new() -> Self {
        Self {
            upper_zoom: ZoomLevel::MAX,
        }
    }

    /// Create a scheme that stops at `upper_zoom`.
    ///
    /// Fewer zoom levels make group replacement cheaper at the cost of
    /// coarser tiles at high zoom.
    pub const fn with_upper_zoom(upper_zoom: ZoomLevel) -> Self {
        Self { upper_zoom }
    }

    /// Side length of a tile at `zoom`, in world units.
    pub fn tile_size(zoom: ZoomLevel) -> f64 {
        let tiles_per_range = 1_u32 << (zoom.get() - 1);
        (WORLD_MAX - WORLD_MIN) / f64::from(tiles_per_range)
    }

    #[inline]
    fn floor_to_i32(v: f64) -> i32 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Tile columns fit in i32 inside the world square; farther points saturate."
        )]
        let i = v as i32;
        if f64::from(i) > v { i.saturating_sub(1) } else { i }
    }
}

impl TileScheme for MercatorScheme {
    fn tile_of(&self, point: Point, zoom: ZoomLevel) -> TileKey {
        debug_assert!(point.is_finite(), "tile coordinates must be finite");
        let size = Self::tile_size(zoom);
        TileKey::new(
            Self::floor_to_i32(point.x / size),
            Self::floor_to_i32(point.y / size),
            zoom,
        )
    }

    fn upper_zoom(&self) -> ZoomLevel {
        self.upper_zoom
    }

    fn tile_rect(&self, key: TileKey) -> Rect {
        let size = Self::tile_size(key.zoom);
        let x0 = f64::from(key.x) * size;
        let y0 = f64::from(key.y) * size;
        Rect::new(x0, y0, x0 + size, y0 + size)
    }
}
