//! Same-colour cluster search and removal.

use crate::grid::{BubbleColor, ColumnPolicy, HexCoord, HexGrid};
use std::collections::{HashSet, VecDeque};

/// A hypothetical bubble that is not stored in the grid ("what if a bubble were here").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualCell {
    pub at: HexCoord,
    pub color: BubbleColor,
}

impl<P: ColumnPolicy> HexGrid<P> {
    /// Colour at `at`, letting a virtual cell shadow whatever is stored there.
    pub fn color_at(&self, at: HexCoord, virtual_cell: Option<VirtualCell>) -> Option<BubbleColor> {
        match virtual_cell {
            Some(v) if v.at == at => Some(v.color),
            _ => self.get_at(at).color(),
        }
    }

    /// FIFO breadth-first search from `start` over cells whose effective colour equals `color`.
    ///
    /// Every coordinate is marked visited once when dequeued; only matching coordinates are
    /// expanded and returned. The virtual cell coordinate is traversable even when it lies
    /// outside the stored rows.
    pub fn collect_cluster(
        &self,
        start: HexCoord,
        color: BubbleColor,
        virtual_cell: Option<VirtualCell>,
    ) -> Vec<HexCoord> {
        let mut queue = VecDeque::from([start]);
        let mut visited = HashSet::new();
        let mut cluster = Vec::new();

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            if self.color_at(current, virtual_cell) != Some(color) {
                continue;
            }
            cluster.push(current);

            for next in self.neighbors_of(current.row, current.col) {
                let is_virtual = virtual_cell.is_some_and(|v| v.at == next);
                if !is_virtual && !self.is_valid_coord(next) {
                    continue;
                }
                if !visited.contains(&next) {
                    queue.push_back(next);
                }
            }
        }
        cluster
    }

    /// Clear every in-range coordinate of `cells`.
    pub fn remove_cluster(&mut self, cells: &[HexCoord]) {
        for &at in cells {
            self.clear(at);
        }
    }
}
