// Copyright 2025 the Annotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=annotile_tiles --heading-base-level=0

//! Annotile Tiles: tile addressing for map overlays.
//!
//! This crate answers one question: which tile does a coordinate belong to at a given zoom level?
//!
//! - [`ZoomLevel`]: a validated zoom level in `1..=MAX_ZOOM_LEVEL`.
//! - [`TileKey`]: an ordered, hashable tile address `(zoom, x, y)`.
//! - [`TileScheme`]: the pluggable mapping from points to tiles, with
//!   [`MercatorScheme`] as the default.
//!
//! Coordinates are projected map units (a square world `[-180, 180]²` for the
//! Mercator scheme) carried as [`kurbo::Point`]. Float inputs are assumed to be
//! finite (no NaNs); debug builds assert.
//!
//! # Example
//!
//! ```rust
//! use annotile_tiles::{MercatorScheme, TileScheme, ZoomLevel};
//! use kurbo::Point;
//!
//! let scheme = MercatorScheme::default();
//! let z3 = ZoomLevel::new(3).unwrap();
//!
//! // At zoom 3 tiles are 90 units wide.
//! let key = scheme.tile_of(Point::new(100.0, -10.0), z3);
//! assert_eq!((key.x, key.y), (1, -1));
//! assert!(scheme.tile_rect(key).contains(Point::new(100.0, -10.0)));
//!
//! // Every zoom level the scheme indexes, lowest first.
//! assert_eq!(scheme.zoom_levels().count(), usize::from(scheme.upper_zoom().get()));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod key;
pub mod scheme;
pub mod zoom;

pub use key::TileKey;
pub use scheme::{MercatorScheme, TileScheme};
pub use zoom::{MAX_ZOOM_LEVEL, TileError, ZoomLevel, ZoomLevels};
