// Copyright 2025 the Annotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The annotation generator: group collections, visibility, and per-tile flushing.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use annotile_tiles::{MercatorScheme, TileKey, TileScheme};
use tracing::{debug, trace};

use crate::cache::{FlushSink, GeometryCache, GroupBatch};
use crate::command::AnnotationCommand;
use crate::index::TileIndex;
use crate::types::{Anchored, GroupId, Polyline};

/// Owns every group's marks and lines, indexes them per tile and zoom level,
/// and flushes drawable data for the tile a renderer asks for.
///
/// ## Threading
///
/// The generator is driven by exactly one context: every mutation and
/// [`generate`](Self::generate) take `&mut self`, so calls are serialized by
/// ownership and no locks are held. Frontends receiving updates from other
/// threads should queue [`AnnotationCommand`]s and [`apply`](Self::apply)
/// them on the thread owning the generator.
///
/// ## Sink
///
/// The flush sink is a constructor argument of a non-nullable type, so a
/// generator always has somewhere to deliver payloads.
pub struct MarkGenerator<M, L, C, F, S = MercatorScheme> {
    scheme: S,
    cache: C,
    sink: F,
    marks: BTreeMap<GroupId, Vec<M>>,
    lines: BTreeMap<GroupId, Vec<L>>,
    visible: BTreeSet<GroupId>,
    index: TileIndex,
}

impl<M, L, C, F, S: core::fmt::Debug> core::fmt::Debug for MarkGenerator<M, L, C, F, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MarkGenerator")
            .field("scheme", &self.scheme)
            .field("mark_groups", &self.marks.len())
            .field("line_groups", &self.lines.len())
            .field("visible", &self.visible)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl<M, L, C, F> MarkGenerator<M, L, C, F> {
    /// Create a generator over the default [`MercatorScheme`].
    pub fn new(cache: C, sink: F) -> Self {
        Self::with_scheme(MercatorScheme::new(), cache, sink)
    }
}

impl<M, L, C, F, S> MarkGenerator<M, L, C, F, S> {
    /// Create a generator with an explicit tiling scheme.
    pub fn with_scheme(scheme: S, cache: C, sink: F) -> Self {
        Self {
            scheme,
            cache,
            sink,
            marks: BTreeMap::new(),
            lines: BTreeMap::new(),
            visible: BTreeSet::new(),
            index: TileIndex::new(),
        }
    }

    /// Show or hide a group. Never touches the index.
    pub fn set_visibility(&mut self, group: GroupId, visible: bool) {
        if visible {
            self.visible.insert(group);
        } else {
            self.visible.remove(&group);
        }
    }

    /// Whether `group` is currently shown.
    pub fn is_visible(&self, group: GroupId) -> bool {
        self.visible.contains(&group)
    }

    /// Shown groups, ascending.
    pub fn visible_groups(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.visible.iter().copied()
    }

    /// The current marks of `group` (empty if it has none).
    pub fn marks(&self, group: GroupId) -> &[M] {
        self.marks.get(&group).map(Vec::as_slice).unwrap_or_default()
    }

    /// The current lines of `group` (empty if it has none).
    pub fn lines(&self, group: GroupId) -> &[L] {
        self.lines.get(&group).map(Vec::as_slice).unwrap_or_default()
    }

    /// The tile index.
    pub fn index(&self) -> &TileIndex {
        &self.index
    }

    /// The tiling scheme.
    pub fn scheme(&self) -> &S {
        &self.scheme
    }

    /// The geometry cache.
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// The geometry cache, mutably.
    pub fn cache_mut(&mut self) -> &mut C {
        &mut self.cache
    }

    /// The flush sink.
    pub fn sink(&self) -> &F {
        &self.sink
    }

    /// The flush sink, mutably.
    pub fn sink_mut(&mut self) -> &mut F {
        &mut self.sink
    }
}

impl<M, L, C, F, S> MarkGenerator<M, L, C, F, S>
where
    M: Anchored,
    L: Polyline,
    S: TileScheme,
{
    /// Take ownership of `marks` as `group`'s mark collection, dropping the
    /// previous one, and rebuild the group's mark positions at every zoom level.
    pub fn set_marks(&mut self, group: GroupId, marks: Vec<M>) {
        let slot = self.marks.entry(group).or_default();
        *slot = marks;
        let marks = slot.as_slice();
        self.index.replace_marks(group, marks, &self.scheme);
        debug!(
            group = group.get(),
            marks = marks.len(),
            tiles = self.index.len(),
            "replaced annotation marks"
        );
    }

    /// Take ownership of `lines` as `group`'s line collection, dropping the
    /// previous one, and rebuild the group's line positions at every zoom level.
    ///
    /// Lines are bucketed by their vertices only; see
    /// [`TileIndex::replace_lines`].
    pub fn set_lines(&mut self, group: GroupId, lines: Vec<L>) {
        let slot = self.lines.entry(group).or_default();
        *slot = lines;
        let lines = slot.as_slice();
        self.index.replace_lines(group, lines, &self.scheme);
        debug!(
            group = group.get(),
            lines = lines.len(),
            tiles = self.index.len(),
            "replaced annotation lines"
        );
    }

    /// Forget `group`: its visibility, both collections, and every index entry.
    ///
    /// Unknown groups are a no-op.
    pub fn clear_group(&mut self, group: GroupId) {
        self.visible.remove(&group);
        self.marks.remove(&group);
        self.lines.remove(&group);
        self.index.remove_group(group);
        debug!(
            group = group.get(),
            tiles = self.index.len(),
            "cleared annotation group"
        );
    }

    /// Apply one queued mutation.
    pub fn apply(&mut self, command: AnnotationCommand<M, L>) {
        match command {
            AnnotationCommand::Clear(group) => self.clear_group(group),
            AnnotationCommand::SetMarks(group, marks) => self.set_marks(group, marks),
            AnnotationCommand::SetLines(group, lines) => self.set_lines(group, lines),
            AnnotationCommand::SetVisibility(group, visible) => {
                self.set_visibility(group, visible);
            }
        }
    }
}

impl<M, L, C, F, S> MarkGenerator<M, L, C, F, S>
where
    C: GeometryCache<M, L>,
    F: FlushSink<C::Payload>,
{
    /// Build and flush geometry for `tile`.
    ///
    /// For every visible group with annotations in `tile`, ascending by id,
    /// the cache builds a payload which is handed to the sink right away.
    /// Unknown tiles produce nothing. A cache error stops the walk and is
    /// returned unchanged; groups flushed before it stay flushed.
    pub fn generate(&mut self, tile: TileKey, resources: &C::Resources) -> Result<(), C::Error> {
        let Some(groups) = self.index.groups_of_tile(&tile) else {
            trace!(%tile, "no annotations in tile");
            return Ok(());
        };

        let mut flushed = 0_usize;
        for (&group, entry) in groups {
            if !self.visible.contains(&group) {
                continue;
            }
            let batch = GroupBatch {
                group,
                marks: self.marks.get(&group).map(Vec::as_slice).unwrap_or_default(),
                mark_positions: entry.marks(),
                lines: self.lines.get(&group).map(Vec::as_slice).unwrap_or_default(),
                line_positions: entry.lines(),
            };
            let payload = self.cache.cache_group(tile, resources, batch)?;
            self.sink.flush(group, payload);
            flushed += 1;
        }
        trace!(%tile, flushed, "generated annotation geometry");
        Ok(())
    }
}
