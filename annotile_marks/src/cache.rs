// Copyright 2025 the Annotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seams to the renderer: geometry caching and the flush sink.

use annotile_tiles::TileKey;

use crate::types::GroupId;

/// One group's annotations as seen from one tile.
///
/// `marks`/`lines` are the group's whole current collections; the position
/// lists say which of them fall into the tile.
#[derive(Debug)]
pub struct GroupBatch<'a, M, L> {
    /// The group being cached.
    pub group: GroupId,
    /// The group's current marks.
    pub marks: &'a [M],
    /// Offsets into `marks`, ascending.
    pub mark_positions: &'a [u32],
    /// The group's current lines.
    pub lines: &'a [L],
    /// Offsets into `lines`, ascending.
    pub line_positions: &'a [u32],
}

impl<M, L> Clone for GroupBatch<'_, M, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, L> Copy for GroupBatch<'_, M, L> {}

impl<'a, M, L> GroupBatch<'a, M, L> {
    /// The marks in the tile, with their positions.
    pub fn selected_marks(self) -> impl Iterator<Item = (u32, &'a M)> + 'a {
        let marks = self.marks;
        self.mark_positions.iter().filter_map(move |&p| {
            debug_assert!((p as usize) < marks.len(), "mark position {p} out of range");
            Some((p, marks.get(p as usize)?))
        })
    }

    /// The lines touching the tile, with their positions.
    pub fn selected_lines(self) -> impl Iterator<Item = (u32, &'a L)> + 'a {
        let lines = self.lines;
        self.line_positions.iter().filter_map(move |&p| {
            debug_assert!((p as usize) < lines.len(), "line position {p} out of range");
            Some((p, lines.get(p as usize)?))
        })
    }
}

/// Turns a group's annotations into drawable data for one tile.
///
/// Called by [`MarkGenerator::generate`](crate::MarkGenerator::generate) once
/// per visible group present in the requested tile. Errors are returned to the
/// caller of `generate` as-is.
pub trait GeometryCache<M, L> {
    /// Shared render resources, such as a texture atlas.
    type Resources: ?Sized;
    /// Drawable data handed to the [`FlushSink`].
    type Payload;
    /// Failure to build a payload.
    type Error;

    /// Build the payload for `batch` inside `tile`.
    fn cache_group(
        &mut self,
        tile: TileKey,
        resources: &Self::Resources,
        batch: GroupBatch<'_, M, L>,
    ) -> Result<Self::Payload, Self::Error>;
}

/// Receives finished payloads, one call per group and tile.
///
/// Implemented for every `FnMut(GroupId, P)`.
pub trait FlushSink<P> {
    /// Take ownership of `payload` built for `group`.
    fn flush(&mut self, group: GroupId, payload: P);
}

impl<P, F: FnMut(GroupId, P)> FlushSink<P> for F {
    fn flush(&mut self, group: GroupId, payload: P) {
        self(group, payload);
    }
}
