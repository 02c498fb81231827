// Copyright 2025 the Annotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A ready-made [`GeometryCache`] for [`MarkParams`] and [`LineParams`].
//!
//! [`LocalGeometryCache`] converts a group's annotations into tile-local
//! geometry: positions are relative to the tile center, which keeps `f32`
//! vertex buffers precise at high zoom. Mark symbols are resolved against a
//! [`SymbolAtlas`] passed as the generator's resources.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use annotile_tiles::{MercatorScheme, TileKey, TileScheme};
use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::cache::{GeometryCache, GroupBatch};
use crate::types::{Anchor, GroupId, LineParams, MarkParams};

/// Failure to build tile geometry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    /// A visible mark names a symbol the atlas does not have.
    #[error("{group} uses symbol `{symbol}` which is not in the atlas")]
    MissingSymbol {
        /// Group of the offending mark.
        group: GroupId,
        /// The unknown symbol name.
        symbol: String,
    },
}

/// Where a symbol lives in the texture and how large it is drawn.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SymbolRegion {
    /// Normalized texture coordinates.
    pub uv: Rect,
    /// Drawn size in pixels.
    pub size: Size,
}

/// Symbol name → texture region lookup.
#[derive(Clone, Debug, Default)]
pub struct SymbolAtlas {
    regions: BTreeMap<String, SymbolRegion>,
}

impl SymbolAtlas {
    /// Create an empty atlas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a symbol.
    pub fn insert(&mut self, name: impl Into<String>, region: SymbolRegion) {
        self.regions.insert(name.into(), region);
    }

    /// Look up a symbol.
    pub fn get(&self, name: &str) -> Option<&SymbolRegion> {
        self.regions.get(name)
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// True if no symbols are registered.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// One mark ready to draw.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MarkQuad {
    /// Offset of the mark in its group's collection.
    pub position: u32,
    /// Pivot relative to the tile center, in world units.
    pub pivot: Point,
    /// Screen-space quad around the projected pivot, in pixels.
    pub quad: Rect,
    /// Texture coordinates of the symbol.
    pub uv: Rect,
    /// Draw order.
    pub depth: f32,
}

/// One stroke of one line ready to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct LineStrip {
    /// Offset of the line in its group's collection.
    pub position: u32,
    /// Vertices relative to the tile center, in world units.
    pub points: Vec<Point>,
    /// Stroke color as RGBA8.
    pub color: [u8; 4],
    /// Stroke width in pixels.
    pub width: f32,
    /// Draw order.
    pub depth: f32,
}

/// Everything one group draws in one tile.
#[derive(Clone, Debug, PartialEq)]
pub struct TileGeometry {
    /// The tile this geometry is local to.
    pub tile: TileKey,
    /// Tile center in world units; add it back to local positions.
    pub origin: Point,
    /// Marks, ascending by depth.
    pub marks: Vec<MarkQuad>,
    /// Line strokes, ascending by depth.
    pub lines: Vec<LineStrip>,
}

/// Builds [`TileGeometry`] for [`MarkParams`] and [`LineParams`].
///
/// Use the same scheme as the generator so tile centers line up.
#[derive(Clone, Debug, Default)]
pub struct LocalGeometryCache<S = MercatorScheme> {
    scheme: S,
}

impl LocalGeometryCache {
    /// Create a cache over the default [`MercatorScheme`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: TileScheme> LocalGeometryCache<S> {
    /// Create a cache over an explicit scheme.
    pub fn with_scheme(scheme: S) -> Self {
        Self { scheme }
    }
}

/// Quad of `size` placed against the pivot according to `anchor`, then shifted by `offset`.
fn anchored_quad(anchor: Anchor, size: Size, offset: Vec2) -> Rect {
    let x0 = if anchor.contains(Anchor::LEFT) {
        0.0
    } else if anchor.contains(Anchor::RIGHT) {
        -size.width
    } else {
        -0.5 * size.width
    };
    let y0 = if anchor.contains(Anchor::TOP) {
        0.0
    } else if anchor.contains(Anchor::BOTTOM) {
        -size.height
    } else {
        -0.5 * size.height
    };
    Rect::from_origin_size((x0, y0), size) + offset
}

impl<S: TileScheme> GeometryCache<MarkParams, LineParams> for LocalGeometryCache<S> {
    type Resources = SymbolAtlas;
    type Payload = TileGeometry;
    type Error = CacheError;

    fn cache_group(
        &mut self,
        tile: TileKey,
        atlas: &SymbolAtlas,
        batch: GroupBatch<'_, MarkParams, LineParams>,
    ) -> Result<TileGeometry, CacheError> {
        let origin = self.scheme.tile_rect(tile).center();
        let to_local = Affine::translate(-origin.to_vec2());

        let mut marks = Vec::with_capacity(batch.mark_positions.len());
        for (position, mark) in batch.selected_marks() {
            if !mark.visible {
                continue;
            }
            let Some(region) = atlas.get(&mark.symbol) else {
                return Err(CacheError::MissingSymbol {
                    group: batch.group,
                    symbol: mark.symbol.clone(),
                });
            };
            marks.push(MarkQuad {
                position,
                pivot: to_local * mark.pivot,
                quad: anchored_quad(mark.anchor, region.size, mark.pixel_offset),
                uv: region.uv,
                depth: mark.depth,
            });
        }
        marks.sort_by(|a, b| a.depth.total_cmp(&b.depth));

        let mut lines = Vec::new();
        for (position, line) in batch.selected_lines() {
            if line.points.len() < 2 {
                continue;
            }
            let points: Vec<Point> = line.points.iter().map(|&p| to_local * p).collect();
            for layer in &line.layers {
                lines.push(LineStrip {
                    position,
                    points: points.clone(),
                    color: layer.color,
                    width: layer.width,
                    depth: layer.depth,
                });
            }
        }
        lines.sort_by(|a, b| a.depth.total_cmp(&b.depth));

        Ok(TileGeometry {
            tile,
            origin,
            marks,
            lines,
        })
    }
}
