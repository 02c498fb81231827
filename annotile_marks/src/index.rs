// Copyright 2025 the Annotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The sparse two-level tile index: tile → group → positions.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use annotile_tiles::{TileKey, TileScheme};

use crate::types::{Anchored, GroupId, Polyline};

/// Which annotations of one group fall into one tile.
///
/// Positions are offsets into the group's current mark and line collections,
/// in ascending order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexEntry {
    marks: Vec<u32>,
    lines: Vec<u32>,
}

impl IndexEntry {
    /// Positions of the marks in this tile.
    pub fn marks(&self) -> &[u32] {
        &self.marks
    }

    /// Positions of the lines with at least one vertex in this tile.
    pub fn lines(&self) -> &[u32] {
        &self.lines
    }

    /// True if the entry references neither marks nor lines.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty() && self.lines.is_empty()
    }
}

/// Size summary of a [`TileIndex`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Tiles holding at least one entry.
    pub tiles: usize,
    /// (tile, group) entries.
    pub entries: usize,
    /// Mark positions summed over all entries.
    pub mark_refs: usize,
    /// Line positions summed over all entries.
    pub line_refs: usize,
}

type TileGroups = BTreeMap<GroupId, IndexEntry>;

/// Per-zoom tile buckets for every group's marks and lines.
///
/// Every public mutation rebuilds the affected group's lists in full and then
/// prunes, so the index never holds a tile without groups nor a group entry
/// with both lists empty.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TileIndex {
    tiles: BTreeMap<TileKey, TileGroups>,
}

impl core::fmt::Debug for TileIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let stats = self.stats();
        f.debug_struct("TileIndex")
            .field("tiles", &stats.tiles)
            .field("entries", &stats.entries)
            .field("mark_refs", &stats.mark_refs)
            .field("line_refs", &stats.line_refs)
            .finish_non_exhaustive()
    }
}

impl TileIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything indexed for `group`'s marks.
    ///
    /// Each mark lands in exactly one tile per zoom level of `scheme`, so its
    /// position is appended once per level.
    pub fn replace_marks<M: Anchored, S: TileScheme + ?Sized>(
        &mut self,
        group: GroupId,
        marks: &[M],
        scheme: &S,
    ) {
        self.clear_marks(group);
        for (i, mark) in marks.iter().enumerate() {
            let position = to_position(i);
            let pivot = mark.pivot();
            for zoom in scheme.zoom_levels() {
                let tile = scheme.tile_of(pivot, zoom);
                self.entry_mut(tile, group).marks.push(position);
            }
        }
        self.prune();
    }

    /// Replace everything indexed for `group`'s lines.
    ///
    /// A line is registered in every tile holding at least one of its
    /// vertices, once per tile. Tiles a segment merely crosses are not
    /// registered.
    pub fn replace_lines<L: Polyline, S: TileScheme + ?Sized>(
        &mut self,
        group: GroupId,
        lines: &[L],
        scheme: &S,
    ) {
        self.clear_lines(group);
        let mut touched = BTreeSet::new();
        for (i, line) in lines.iter().enumerate() {
            let position = to_position(i);
            for zoom in scheme.zoom_levels() {
                touched.clear();
                touched.extend(line.vertices().iter().map(|&p| scheme.tile_of(p, zoom)));
                for &tile in &touched {
                    self.entry_mut(tile, group).lines.push(position);
                }
            }
        }
        self.prune();
    }

    /// Drop every entry of `group`.
    pub fn remove_group(&mut self, group: GroupId) {
        for groups in self.tiles.values_mut() {
            groups.remove(&group);
        }
        self.prune();
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    /// The entry for `group` in `tile`, if any.
    pub fn entry(&self, tile: TileKey, group: GroupId) -> Option<&IndexEntry> {
        self.tiles.get(&tile)?.get(&group)
    }

    /// Groups with entries in `tile`, ascending by id.
    pub fn groups_in(&self, tile: TileKey) -> impl Iterator<Item = (GroupId, &IndexEntry)> + '_ {
        self.tiles
            .get(&tile)
            .into_iter()
            .flat_map(|groups| groups.iter().map(|(&g, e)| (g, e)))
    }

    /// Every tile holding at least one entry, ascending.
    pub fn tiles(&self) -> impl Iterator<Item = TileKey> + '_ {
        self.tiles.keys().copied()
    }

    /// Tiles holding entries for `group`, ascending.
    ///
    /// Useful to invalidate already rendered tiles after replacing a group.
    pub fn tiles_of(&self, group: GroupId) -> impl Iterator<Item = TileKey> + '_ {
        self.tiles
            .iter()
            .filter(move |(_, groups)| groups.contains_key(&group))
            .map(|(&tile, _)| tile)
    }

    /// Number of non-empty tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// True if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Count tiles, entries, and stored positions.
    pub fn stats(&self) -> IndexStats {
        let mut stats = IndexStats {
            tiles: self.tiles.len(),
            ..IndexStats::default()
        };
        for entry in self.tiles.values().flat_map(BTreeMap::values) {
            stats.entries += 1;
            stats.mark_refs += entry.marks.len();
            stats.line_refs += entry.lines.len();
        }
        stats
    }

    pub(crate) fn groups_of_tile(&self, tile: &TileKey) -> Option<&TileGroups> {
        self.tiles.get(tile)
    }

    fn clear_marks(&mut self, group: GroupId) {
        for groups in self.tiles.values_mut() {
            if let Some(entry) = groups.get_mut(&group) {
                entry.marks.clear();
            }
        }
    }

    fn clear_lines(&mut self, group: GroupId) {
        for groups in self.tiles.values_mut() {
            if let Some(entry) = groups.get_mut(&group) {
                entry.lines.clear();
            }
        }
    }

    fn entry_mut(&mut self, tile: TileKey, group: GroupId) -> &mut IndexEntry {
        self.tiles
            .entry(tile)
            .or_default()
            .entry(group)
            .or_default()
    }

    /// Remove empty group entries, then tiles left without groups.
    fn prune(&mut self) {
        self.tiles.retain(|_, groups| {
            groups.retain(|_, entry| !entry.is_empty());
            !groups.is_empty()
        });
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "Positions are 32-bit; collections larger than u32::MAX are rejected in debug builds."
)]
fn to_position(i: usize) -> u32 {
    debug_assert!(u32::try_from(i).is_ok(), "collection too large to index");
    i as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use annotile_tiles::{MercatorScheme, ZoomLevel};
    use kurbo::Point;

    fn scheme(upper: u8) -> MercatorScheme {
        MercatorScheme::with_upper_zoom(ZoomLevel::new(upper).unwrap())
    }

    fn assert_pruned(index: &TileIndex) {
        for tile in index.tiles() {
            let mut groups = index.groups_in(tile).peekable();
            assert!(groups.peek().is_some(), "tile {tile} has no groups");
            for (group, entry) in groups {
                assert!(!entry.is_empty(), "{group} in {tile} is empty");
            }
        }
    }

    #[test]
    fn marks_land_once_per_zoom() {
        let s = scheme(4);
        let mut index = TileIndex::new();
        let g = GroupId(1);
        index.replace_marks(g, &[Point::new(10.0, 10.0), Point::new(100.0, 100.0)], &s);

        for zoom in s.zoom_levels() {
            let a = s.tile_of(Point::new(10.0, 10.0), zoom);
            let b = s.tile_of(Point::new(100.0, 100.0), zoom);
            if a == b {
                assert_eq!(index.entry(a, g).unwrap().marks(), &[0, 1]);
            } else {
                assert_eq!(index.entry(a, g).unwrap().marks(), &[0]);
                assert_eq!(index.entry(b, g).unwrap().marks(), &[1]);
            }
        }
        assert_eq!(index.stats().mark_refs, 2 * 4);
        assert_pruned(&index);
    }

    #[test]
    fn replacing_marks_drops_stale_tiles() {
        let s = scheme(3);
        let mut index = TileIndex::new();
        let g = GroupId(7);
        index.replace_marks(g, &[Point::new(10.0, 10.0)], &s);
        index.replace_marks(g, &[Point::new(-10.0, -10.0)], &s);

        let old = s.tile_of(Point::new(10.0, 10.0), ZoomLevel::MIN);
        assert!(index.entry(old, g).is_none());
        assert_eq!(index.len(), 3);
        assert_pruned(&index);
    }

    #[test]
    fn replacing_marks_keeps_lines_of_same_group() {
        let s = scheme(2);
        let mut index = TileIndex::new();
        let g = GroupId(3);
        index.replace_lines(g, &[vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)]], &s);
        index.replace_marks(g, &[Point::new(1.0, 1.0)], &s);
        index.replace_marks::<Point, _>(g, &[], &s);

        let tile = s.tile_of(Point::new(1.0, 1.0), ZoomLevel::MIN);
        let entry = index.entry(tile, g).unwrap();
        assert!(entry.marks().is_empty());
        assert_eq!(entry.lines(), &[0]);
    }

    #[test]
    fn line_registered_once_per_touched_tile() {
        let s = scheme(1);
        let mut index = TileIndex::new();
        let g = GroupId(2);
        // Three vertices in the same quadrant, one in another.
        let line = vec![
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(3.0, 3.0),
            Point::new(-1.0, 1.0),
        ];
        index.replace_lines(g, &[line], &s);

        let z1 = ZoomLevel::MIN;
        assert_eq!(index.len(), 2);
        assert_eq!(
            index.entry(s.tile_of(Point::new(1.0, 1.0), z1), g).unwrap().lines(),
            &[0]
        );
        assert_eq!(
            index.entry(s.tile_of(Point::new(-1.0, 1.0), z1), g).unwrap().lines(),
            &[0]
        );
    }

    #[test]
    fn line_skips_tiles_it_only_crosses() {
        let s = scheme(3);
        let z3 = ZoomLevel::new(3).unwrap();
        let mut index = TileIndex::new();
        let g = GroupId(4);
        // At zoom 3 tiles are 90 wide: vertices in columns 0 and 3, crossing 1 and 2.
        let line = vec![Point::new(10.0, 10.0), Point::new(300.0, 10.0)];
        index.replace_lines(g, &[line], &s);

        let at_z3: Vec<_> = index.tiles_of(g).filter(|t| t.zoom == z3).collect();
        assert_eq!(at_z3.len(), 2);
        assert_eq!((at_z3[0].x, at_z3[1].x), (0, 3));
    }

    #[test]
    fn remove_group_leaves_other_groups() {
        let s = scheme(2);
        let mut index = TileIndex::new();
        index.replace_marks(GroupId(1), &[Point::new(5.0, 5.0)], &s);
        index.replace_marks(GroupId(2), &[Point::new(5.0, 5.0)], &s);
        let before = index.len();

        index.remove_group(GroupId(1));
        assert_eq!(index.len(), before);
        assert_eq!(index.tiles_of(GroupId(1)).count(), 0);
        assert_eq!(index.tiles_of(GroupId(2)).count(), before);

        index.remove_group(GroupId(2));
        assert!(index.is_empty());
        // Unknown groups are a no-op.
        index.remove_group(GroupId(99));
        assert!(index.is_empty());
    }

    #[test]
    fn far_away_marks_are_indexed() {
        let s = MercatorScheme::new();
        let mut index = TileIndex::new();
        let g = GroupId(1);
        index.replace_marks(g, &[Point::new(-1.0e12, 0.0)], &s);

        assert_eq!(index.len(), 17);
        assert!(index.tiles_of(g).all(|t| t.x == i32::MIN && t.y == 0));
        assert_pruned(&index);
    }

    #[test]
    fn clear_drops_every_group() {
        let s = scheme(3);
        let mut index = TileIndex::new();
        index.replace_marks(GroupId(1), &[Point::new(5.0, 5.0)], &s);
        index.replace_lines(GroupId(2), &[vec![Point::new(-5.0, 5.0)]], &s);
        assert!(!index.is_empty());

        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.stats(), IndexStats::default());
        assert_eq!(index.tiles_of(GroupId(1)).count(), 0);

        // Still usable afterwards.
        index.replace_marks(GroupId(1), &[Point::new(5.0, 5.0)], &s);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn stats_count_entries_and_refs() {
        let s = scheme(1);
        let mut index = TileIndex::new();
        index.replace_marks(GroupId(1), &[Point::new(5.0, 5.0), Point::new(6.0, 6.0)], &s);
        index.replace_lines(GroupId(2), &[vec![Point::new(5.0, 5.0)]], &s);
        assert_eq!(
            index.stats(),
            IndexStats {
                tiles: 1,
                entries: 2,
                mark_refs: 2,
                line_refs: 1,
            }
        );
    }
}
