// Copyright 2025 the Annotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Driving a generator from a command queue.
//!
//! A producer thread sends annotation updates over a channel; the render
//! thread owns the generator and applies them in order between frames.
//!
//! Run:
//! - `cargo run -p annotile_demos --example command_queue`

use std::sync::mpsc;
use std::thread;

use annotile_marks::{AnnotationCommand, GroupId, IndexStats, MarkGenerator};
use annotile_marks::{GeometryCache, GroupBatch};
use annotile_tiles::{TileKey, TileScheme, ZoomLevel};
use kurbo::Point;

/// Counts what would be drawn instead of building real geometry.
#[derive(Debug, Default)]
struct CountingCache;

impl GeometryCache<Point, Vec<Point>> for CountingCache {
    type Resources = ();
    type Payload = (usize, usize);
    type Error = std::convert::Infallible;

    fn cache_group(
        &mut self,
        _tile: TileKey,
        _resources: &(),
        batch: GroupBatch<'_, Point, Vec<Point>>,
    ) -> Result<(usize, usize), Self::Error> {
        Ok((batch.mark_positions.len(), batch.line_positions.len()))
    }
}

fn main() {
    let (tx, rx) = mpsc::channel::<AnnotationCommand<Point, Vec<Point>>>();

    let producer = thread::spawn(move || {
        let layer = GroupId(3);
        let pois: Vec<_> = (0..50)
            .map(|i| Point::new(2.35 + f64::from(i) * 0.001, 48.85))
            .collect();
        let route = vec![Point::new(2.35, 48.85), Point::new(2.30, 48.87)];
        for command in [
            AnnotationCommand::SetMarks(layer, pois),
            AnnotationCommand::SetLines(layer, vec![route]),
            AnnotationCommand::SetVisibility(layer, true),
        ] {
            tx.send(command).expect("render thread hung up");
        }
    });

    let mut generator = MarkGenerator::new(
        CountingCache,
        |group: GroupId, (marks, lines): (usize, usize)| {
            println!("{group}: {marks} marks, {lines} lines");
        },
    );

    producer.join().expect("producer panicked");
    for command in rx.try_iter() {
        println!("apply {} for {}", command_name(&command), command.group());
        generator.apply(command);
    }

    let stats: IndexStats = generator.index().stats();
    println!("index: {stats:?}");

    let tile = generator
        .scheme()
        .tile_of(Point::new(2.35, 48.85), ZoomLevel::new(12).unwrap());
    let Ok(()) = generator.generate(tile, &());
}

fn command_name<M, L>(command: &AnnotationCommand<M, L>) -> &'static str {
    match command {
        AnnotationCommand::Clear(_) => "clear",
        AnnotationCommand::SetMarks(..) => "set_marks",
        AnnotationCommand::SetLines(..) => "set_lines",
        AnnotationCommand::SetVisibility(..) => "set_visibility",
    }
}
