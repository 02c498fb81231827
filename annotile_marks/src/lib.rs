// Copyright 2025 the Annotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=annotile_marks --heading-base-level=0

//! Annotile Marks: a per-zoom tile index for map overlay annotations.
//!
//! Annotations are point **marks** and polyline **lines**, grouped into layers
//! identified by [`GroupId`]. The [`MarkGenerator`] owns each group's current
//! collections and keeps a sparse [`TileIndex`] recording, for every zoom level,
//! which annotations fall into which tile. When the renderer draws a tile it
//! calls [`MarkGenerator::generate`], and every visible group present there is
//! turned into drawable data by a [`GeometryCache`] and handed to a
//! [`FlushSink`].
//!
//! - Whole-collection updates: [`MarkGenerator::set_marks`] and
//!   [`MarkGenerator::set_lines`] take ownership of a group's new collection and
//!   rebuild that group's positions; no stale positions survive.
//! - Visibility is a separate toggle ([`MarkGenerator::set_visibility`]) that
//!   never touches the index.
//! - After every mutation the index is pruned: no tile without groups, no group
//!   entry without positions.
//!
//! ## Lines are bucketed by vertex
//!
//! A line is registered in each tile that holds at least one of its vertices.
//! A segment crossing a tile without a vertex in it is not registered there, so
//! long segments with sparse vertices can be missing from intermediate tiles.
//!
//! ## Threading
//!
//! The generator is meant to be owned and driven by a single context. Queue
//! [`AnnotationCommand`]s from elsewhere and [`MarkGenerator::apply`] them.
//!
//! # Example
//!
//! ```rust
//! use annotile_marks::{GroupId, LocalGeometryCache, MarkGenerator, MarkParams, LineParams};
//! use annotile_marks::{SymbolAtlas, SymbolRegion, TileGeometry};
//! use annotile_tiles::{TileScheme, ZoomLevel};
//! use kurbo::{Point, Rect, Size};
//!
//! let mut atlas = SymbolAtlas::new();
//! atlas.insert("pin", SymbolRegion { uv: Rect::new(0.0, 0.0, 1.0, 1.0), size: Size::new(16.0, 16.0) });
//!
//! let mut drawn: Vec<(GroupId, TileGeometry)> = Vec::new();
//! let mut generator: MarkGenerator<MarkParams, LineParams, _, _> =
//!     MarkGenerator::new(LocalGeometryCache::new(), |group: GroupId, geometry: TileGeometry| {
//!         drawn.push((group, geometry));
//!     });
//!
//! let bookmarks = GroupId(7);
//! let home = Point::new(37.6, 55.7);
//! generator.set_marks(bookmarks, vec![MarkParams::new(home, "pin")]);
//!
//! // Hidden groups produce nothing.
//! let tile = generator.scheme().tile_of(home, ZoomLevel::new(10).unwrap());
//! generator.generate(tile, &atlas).unwrap();
//!
//! generator.set_visibility(bookmarks, true);
//! generator.generate(tile, &atlas).unwrap();
//! drop(generator);
//!
//! assert_eq!(drawn.len(), 1);
//! assert_eq!(drawn[0].0, bookmarks);
//! assert_eq!(drawn[0].1.marks.len(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod cache;
pub mod command;
pub mod generator;
pub mod index;
pub mod local_cache;
pub mod types;

pub use cache::{FlushSink, GeometryCache, GroupBatch};
pub use command::AnnotationCommand;
pub use generator::MarkGenerator;
pub use index::{IndexEntry, IndexStats, TileIndex};
pub use local_cache::{
    CacheError, LineStrip, LocalGeometryCache, MarkQuad, SymbolAtlas, SymbolRegion, TileGeometry,
};
pub use types::{Anchor, Anchored, GroupId, LineLayer, LineParams, MarkParams, Polyline};
