// Copyright 2025 the Annotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types: group identifiers, annotation traits, and the stock mark/line parameters.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Vec2};

/// Identifier of a logical annotation layer.
///
/// Opaque to the index: callers choose the values. Groups order by their raw id,
/// which is also the order payloads are flushed in for a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(pub u32);

impl GroupId {
    /// The raw id.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for GroupId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group {}", self.0)
    }
}

/// A point annotation: anything with a pivot coordinate.
///
/// The index reads nothing else; every other parameter is payload for the
/// [geometry cache](crate::cache::GeometryCache).
pub trait Anchored {
    /// World-space anchor point of the mark.
    fn pivot(&self) -> Point;
}

/// A polyline annotation: anything with an ordered vertex sequence.
pub trait Polyline {
    /// World-space vertices, in drawing order.
    fn vertices(&self) -> &[Point];
}

impl Anchored for Point {
    fn pivot(&self) -> Point {
        *self
    }
}

impl Polyline for Vec<Point> {
    fn vertices(&self) -> &[Point] {
        self
    }
}

bitflags::bitflags! {
    /// Which side of a mark's symbol sits on the pivot.
    ///
    /// The empty set centers the symbol. `LEFT` puts the pivot on the symbol's
    /// left edge, so the symbol extends to the right; `TOP` likewise extends it
    /// downwards.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Anchor: u8 {
        /// Pivot on the left edge.
        const LEFT   = 0b0000_0001;
        /// Pivot on the right edge.
        const RIGHT  = 0b0000_0010;
        /// Pivot on the top edge.
        const TOP    = 0b0000_0100;
        /// Pivot on the bottom edge.
        const BOTTOM = 0b0000_1000;
    }
}

impl Anchor {
    /// Symbol centered on the pivot.
    pub const CENTER: Self = Self::empty();
}

/// Rendering parameters of one mark.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkParams {
    /// World-space anchor point.
    pub pivot: Point,
    /// Screen-space offset applied after projecting the pivot, in pixels.
    pub pixel_offset: Vec2,
    /// Symbol alignment relative to the pivot.
    pub anchor: Anchor,
    /// Draw order; higher is drawn on top.
    pub depth: f32,
    /// Atlas name of the symbol to draw.
    pub symbol: String,
    /// Whether this mark is drawn at all. Hidden marks stay indexed.
    pub visible: bool,
}

impl MarkParams {
    /// A visible, centered mark with no offset.
    pub fn new(pivot: Point, symbol: impl Into<String>) -> Self {
        Self {
            pivot,
            pixel_offset: Vec2::ZERO,
            anchor: Anchor::CENTER,
            depth: 0.0,
            symbol: symbol.into(),
            visible: true,
        }
    }
}

impl Anchored for MarkParams {
    fn pivot(&self) -> Point {
        self.pivot
    }
}

/// One stroke of a line. Lines may be drawn as several stacked strokes (an outline under a fill).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineLayer {
    /// Stroke color as RGBA8.
    pub color: [u8; 4],
    /// Stroke width in pixels.
    pub width: f32,
    /// Draw order; higher is drawn on top.
    pub depth: f32,
}

/// Rendering parameters of one line.
#[derive(Clone, Debug, PartialEq)]
pub struct LineParams {
    /// World-space vertices.
    pub points: Vec<Point>,
    /// Strokes, in any order.
    pub layers: Vec<LineLayer>,
}

impl Polyline for LineParams {
    fn vertices(&self) -> &[Point] {
        &self.points
    }
}
