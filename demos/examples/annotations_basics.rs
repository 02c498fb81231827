// Copyright 2025 the Annotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Annotation basics.
//!
//! Add a bookmark layer, show it, draw a few tiles, then move the bookmarks.
//!
//! Run:
//! - `cargo run -p annotile_demos --example annotations_basics`

use annotile_marks::{
    GroupId, LineLayer, LineParams, LocalGeometryCache, MarkGenerator, MarkParams, SymbolAtlas,
    SymbolRegion,
};
use annotile_tiles::{TileScheme, ZoomLevel};
use kurbo::{Point, Rect, Size};

fn main() {
    let mut atlas = SymbolAtlas::new();
    atlas.insert(
        "pin",
        SymbolRegion {
            uv: Rect::new(0.0, 0.0, 0.5, 0.5),
            size: Size::new(24.0, 32.0),
        },
    );

    let mut generator: MarkGenerator<MarkParams, LineParams, _, _> =
        MarkGenerator::new(LocalGeometryCache::new(), |group, geometry| {
            println!("flush {group}: {geometry:?}");
        });

    let bookmarks = GroupId(1);
    let track = GroupId(2);
    let home = Point::new(37.62, 55.75);
    let work = Point::new(37.54, 55.70);

    generator.set_marks(
        bookmarks,
        vec![MarkParams::new(home, "pin"), MarkParams::new(work, "pin")],
    );
    generator.set_lines(
        track,
        vec![LineParams {
            points: vec![home, Point::new(37.58, 55.73), work],
            layers: vec![LineLayer {
                color: [220, 40, 40, 255],
                width: 3.0,
                depth: 0.0,
            }],
        }],
    );
    println!("index after updates: {:?}", generator.index());

    let z14 = ZoomLevel::new(14).unwrap();
    let tile = generator.scheme().tile_of(home, z14);

    // Nothing is visible yet.
    generator.generate(tile, &atlas).unwrap();

    generator.set_visibility(bookmarks, true);
    generator.set_visibility(track, true);
    println!("drawing {tile}");
    generator.generate(tile, &atlas).unwrap();

    // Move the bookmarks away: the old tile no longer has them.
    generator.set_marks(bookmarks, vec![MarkParams::new(Point::new(-0.12, 51.5), "pin")]);
    println!("drawing {tile} after moving bookmarks");
    generator.generate(tile, &atlas).unwrap();

    let tiles: Vec<_> = generator
        .index()
        .tiles_of(bookmarks)
        .filter(|t| t.zoom == z14)
        .collect();
    println!("bookmarks now live in {tiles:?}");
}
