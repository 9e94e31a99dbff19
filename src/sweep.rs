//! Ceiling connectivity: bubbles with no occupied path to row 0 fall and are removed.

use crate::grid::{ColumnPolicy, HexCoord, HexGrid};
use std::collections::{HashSet, VecDeque};

impl<P: ColumnPolicy> HexGrid<P> {
    /// Occupied coordinates reachable from any occupied cell of row 0 (colour irrelevant).
    pub fn anchored_cells(&self) -> HashSet<HexCoord> {
        let mut queue: VecDeque<HexCoord> = self
            .row(0)
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(col, _)| HexCoord::new(0, col as i32))
            .collect();
        let mut connected = HashSet::new();

        while let Some(current) = queue.pop_front() {
            if !connected.insert(current) {
                continue;
            }
            for next in self.neighbors_of(current.row, current.col) {
                if !self.is_valid_coord(next) || self.get_at(next).is_empty() {
                    continue;
                }
                if !connected.contains(&next) {
                    queue.push_back(next);
                }
            }
        }
        connected
    }

    /// Clear every occupied cell not anchored to the ceiling. Returns how many fell.
    pub fn remove_floating_bubbles(&mut self) -> usize {
        if self.row_count() == 0 {
            return 0;
        }
        let connected = self.anchored_cells();
        let floating: Vec<HexCoord> = self
            .bubbles()
            .map(|(at, _)| at)
            .filter(|at| !connected.contains(at))
            .collect();
        for &at in &floating {
            self.clear(at);
        }
        if !floating.is_empty() {
            log::debug!("{} floating bubbles dropped", floating.len());
        }
        floating.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::grid::tests::{BLUE, RED, grid_from};
    use crate::grid::{Cell, HexCoord};

    #[test]
    fn test_empty_ceiling_drops_everything_below() {
        let mut grid = grid_from(4, &["....", "rbrb"]);
        assert_eq!(grid.remove_floating_bubbles(), 4);
        assert!(grid.row(1).iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_attached_bubbles_of_any_colour_survive() {
        let mut grid = grid_from(4, &["r...", "b...", "r..."]);
        assert_eq!(grid.remove_floating_bubbles(), 0);
        assert_eq!(grid.occupied_count(), 3);
    }

    #[test]
    fn test_only_detached_island_falls() {
        // (2,3) touches row 1 only through (1,2)/(1,3), both empty.
        let mut grid = grid_from(4, &["rb..", "r...", "...b"]);
        assert_eq!(grid.remove_floating_bubbles(), 1);
        assert_eq!(grid.get(2, 3), Cell::Empty);
        assert_eq!(grid.get(0, 1), Cell::Bubble(BLUE));
        assert_eq!(grid.get(1, 0), Cell::Bubble(RED));
    }

    #[test]
    fn test_empty_grid_removes_nothing() {
        let mut grid = grid_from(4, &[]);
        assert_eq!(grid.remove_floating_bubbles(), 0);
    }

    #[test]
    fn test_after_sweep_everything_is_anchored() {
        let mut grid = grid_from(5, &["rr.bb", "..r..", "bb.rr", "r.b.r"]);
        let cluster = grid.collect_cluster(HexCoord::new(1, 2), RED, None);
        grid.remove_cluster(&cluster);
        grid.remove_floating_bubbles();
        let anchored = grid.anchored_cells();
        assert!(grid.bubbles().all(|(at, _)| anchored.contains(&at)));
    }
}
