//! Hex grid: staggered ("brick-offset") rows of optional bubbles, row lifecycle, neighbour topology.

use std::collections::{HashSet, VecDeque};
use std::fmt;

/// Neighbour offsets (d_row, d_col) for even rows.
pub const EVEN_NEIGHBOR_OFFSETS: [(i32, i32); 6] = [(-1, -1), (-1, 0), (0, -1), (0, 1), (1, -1), (1, 0)];

/// Neighbour offsets (d_row, d_col) for odd rows (shifted right by half a cell).
pub const ODD_NEIGHBOR_OFFSETS: [(i32, i32); 6] = [(-1, 0), (-1, 1), (0, -1), (0, 1), (1, 0), (1, 1)];

/// Opaque colour token. The engine only compares colours for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BubbleColor(pub u8);

/// Single cell: either empty or a bubble of one colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Bubble(BubbleColor),
}

impl Cell {
    #[inline]
    pub fn color(self) -> Option<BubbleColor> {
        match self {
            Self::Empty => None,
            Self::Bubble(c) => Some(c),
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }
}

/// Grid coordinate. Signed so that unvalidated neighbour candidates (e.g. col -1) are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HexCoord {
    pub row: i32,
    pub col: i32,
}

impl HexCoord {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Columns-per-row policy, injected into the grid (depends on viewport sizing).
pub trait ColumnPolicy {
    fn columns_for(&self, row: usize) -> usize;
}

impl<F> ColumnPolicy for F
where
    F: Fn(usize) -> usize,
{
    fn columns_for(&self, row: usize) -> usize {
        self(row)
    }
}

/// Fixed column count for even and odd rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowWidths {
    pub even: usize,
    pub odd: usize,
}

impl RowWidths {
    pub const fn uniform(cols: usize) -> Self {
        Self { even: cols, odd: cols }
    }
}

impl ColumnPolicy for RowWidths {
    fn columns_for(&self, row: usize) -> usize {
        if row % 2 == 0 { self.even } else { self.odd }
    }
}

/// Hex lattice. rows[0] is the ceiling; rows grow downwards.
#[derive(Clone)]
pub struct HexGrid<P: ColumnPolicy> {
    policy: P,
    rows: Vec<Vec<Cell>>,
}

impl<P: ColumnPolicy> fmt::Debug for HexGrid<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HexGrid")
            .field("rows", &self.rows.len())
            .field("occupied", &self.occupied_count())
            .finish()
    }
}

impl<P: ColumnPolicy> HexGrid<P> {
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            rows: Vec::new(),
        }
    }

    /// Rebuild from scratch: row `r` gets `columns_for(r)` cells produced by `factory(r, c)`.
    pub fn reset<F>(&mut self, initial_rows: usize, mut factory: F)
    where
        F: FnMut(usize, usize) -> Cell,
    {
        self.rows = (0..initial_rows)
            .map(|row| {
                (0..self.policy.columns_for(row))
                    .map(|col| factory(row, col))
                    .collect()
            })
            .collect();
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn columns_for(&self, row: usize) -> usize {
        self.policy.columns_for(row)
    }

    /// Stored cells of one row; empty slice when the row does not exist.
    pub fn row(&self, row: usize) -> &[Cell] {
        self.rows.get(row).map_or(&[], Vec::as_slice)
    }

    /// Append empty rows until `row_index` is addressable. Never shrinks.
    pub fn ensure_rows(&mut self, row_index: usize) {
        while self.rows.len() <= row_index {
            let row = self.rows.len();
            self.rows.push(vec![Cell::Empty; self.policy.columns_for(row)]);
        }
    }

    pub fn is_valid(&self, row: i32, col: i32) -> bool {
        if row < 0 || col < 0 || row as usize >= self.rows.len() {
            return false;
        }
        (col as usize) < self.policy.columns_for(row as usize)
    }

    #[inline]
    pub fn is_valid_coord(&self, at: HexCoord) -> bool {
        self.is_valid(at.row, at.col)
    }

    /// Cell at (row, col); `Cell::Empty` for anything out of range.
    pub fn get(&self, row: i32, col: i32) -> Cell {
        if !self.is_valid(row, col) {
            return Cell::Empty;
        }
        self.rows[row as usize]
            .get(col as usize)
            .copied()
            .unwrap_or_default()
    }

    #[inline]
    pub fn get_at(&self, at: HexCoord) -> Cell {
        self.get(at.row, at.col)
    }

    /// Write a cell, growing rows as needed. `col` is clamped into the row's range.
    pub fn set(&mut self, row: usize, col: i32, cell: Cell) {
        self.ensure_rows(row);
        let cols = self.policy.columns_for(row);
        if cols == 0 {
            return;
        }
        let safe_col = col.clamp(0, cols as i32 - 1) as usize;
        let cells = &mut self.rows[row];
        if cells.len() < cols {
            cells.resize(cols, Cell::Empty);
        }
        cells[safe_col] = cell;
    }

    /// Clear one cell if it is in range.
    pub fn clear(&mut self, at: HexCoord) {
        if self.is_valid_coord(at) {
            if let Some(cell) = self.rows[at.row as usize].get_mut(at.col as usize) {
                *cell = Cell::Empty;
            }
        }
    }

    /// The 6 neighbour candidates of (row, col). Not bounds-checked.
    pub fn neighbors_of(&self, row: i32, col: i32) -> [HexCoord; 6] {
        neighbors_of(row, col)
    }

    /// Insert a full row at index 0, shifting every existing row down by one.
    pub fn add_top_row<F>(&mut self, mut factory: F)
    where
        F: FnMut(usize, usize) -> Cell,
    {
        let row = (0..self.policy.columns_for(0))
            .map(|col| factory(0, col))
            .collect();
        self.rows.insert(0, row);
    }

    /// Remove trailing rows while they are entirely empty.
    pub fn drop_empty_rows(&mut self) {
        while self
            .rows
            .last()
            .is_some_and(|row| row.iter().all(|cell| cell.is_empty()))
        {
            self.rows.pop();
        }
    }

    /// BFS over all coordinates from (row, col); first empty in-range cell in BFS order.
    /// Out-of-range coordinates are visited but never returned or expanded.
    pub fn find_nearest_empty(&self, row: i32, col: i32) -> Option<HexCoord> {
        let mut queue = VecDeque::from([HexCoord::new(row, col)]);
        let mut visited = HashSet::new();

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            if !self.is_valid_coord(current) {
                continue;
            }
            if self.get_at(current).is_empty() {
                return Some(current);
            }
            for next in neighbors_of(current.row, current.col) {
                if !visited.contains(&next) {
                    queue.push_back(next);
                }
            }
        }
        None
    }

    /// Occupied cells in row-major order.
    pub fn bubbles(&self) -> impl Iterator<Item = (HexCoord, BubbleColor)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| {
                cell.color()
                    .map(|color| (HexCoord::new(row as i32, col as i32), color))
            })
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|c| !c.is_empty()).count())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied_count() == 0
    }
}

/// Parity-selected neighbour candidates, in fixed table order.
pub fn neighbors_of(row: i32, col: i32) -> [HexCoord; 6] {
    let offsets = if row.rem_euclid(2) == 0 {
        &EVEN_NEIGHBOR_OFFSETS
    } else {
        &ODD_NEIGHBOR_OFFSETS
    };
    offsets.map(|(dr, dc)| HexCoord::new(row + dr, col + dc))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub const RED: BubbleColor = BubbleColor(0);
    pub const BLUE: BubbleColor = BubbleColor(1);
    pub const GREEN: BubbleColor = BubbleColor(2);

    /// Build a grid of `cols` columns from rows of chars: '.' empty, 'r'/'b'/'g' colours.
    pub fn grid_from(cols: usize, rows: &[&str]) -> HexGrid<RowWidths> {
        let mut grid = HexGrid::new(RowWidths::uniform(cols));
        grid.reset(rows.len(), |r, c| {
            match rows[r].as_bytes().get(c) {
                Some(b'r') => Cell::Bubble(RED),
                Some(b'b') => Cell::Bubble(BLUE),
                Some(b'g') => Cell::Bubble(GREEN),
                _ => Cell::Empty,
            }
        });
        grid
    }

    #[test]
    fn test_neighbors_always_six() {
        for row in -3..6 {
            for col in -2..4 {
                assert_eq!(neighbors_of(row, col).len(), 6);
            }
        }
    }

    #[test]
    fn test_neighbor_table_depends_only_on_parity() {
        let even = neighbors_of(2, 3);
        let odd = neighbors_of(3, 3);
        assert_eq!(even[0], HexCoord::new(1, 2));
        assert_eq!(odd[0], HexCoord::new(2, 3));
        for (a, b) in neighbors_of(0, 3).iter().zip(even.iter()) {
            assert_eq!((a.row + 2, a.col), (b.row, b.col));
        }
        for (a, b) in neighbors_of(1, 0).iter().zip(odd.iter()) {
            assert_eq!((a.row + 2, a.col + 3), (b.row, b.col));
        }
    }

    #[test]
    fn test_reset_uses_policy_and_factory() {
        let mut grid = HexGrid::new(|row: usize| if row % 2 == 0 { 4 } else { 3 });
        grid.reset(3, |r, c| Cell::Bubble(BubbleColor((r * 10 + c) as u8)));
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.row(0).len(), 4);
        assert_eq!(grid.row(1).len(), 3);
        assert_eq!(grid.get(1, 2), Cell::Bubble(BubbleColor(12)));
        assert_eq!(grid.get(1, 3), Cell::Empty);
    }

    #[test]
    fn test_get_out_of_range_is_empty() {
        let grid = grid_from(3, &["rrr"]);
        assert_eq!(grid.get(-1, 0), Cell::Empty);
        assert_eq!(grid.get(0, -1), Cell::Empty);
        assert_eq!(grid.get(0, 3), Cell::Empty);
        assert_eq!(grid.get(5, 0), Cell::Empty);
    }

    #[test]
    fn test_set_grows_rows_and_clamps_column() {
        let mut grid = grid_from(4, &["rrrr"]);
        grid.set(3, 99, Cell::Bubble(BLUE));
        assert_eq!(grid.row_count(), 4);
        assert_eq!(grid.get(3, 3), Cell::Bubble(BLUE));
        grid.set(2, -5, Cell::Bubble(GREEN));
        assert_eq!(grid.get(2, 0), Cell::Bubble(GREEN));
    }

    #[test]
    fn test_set_then_get_round_trip() {
        let mut grid = grid_from(5, &["r....", "....."]);
        grid.set(1, 2, Cell::Bubble(GREEN));
        assert_eq!(grid.get(1, 2).color(), Some(GREEN));
    }

    #[test]
    fn test_ensure_rows_never_shrinks() {
        let mut grid = grid_from(3, &["rrr", "rrr", "rrr"]);
        grid.ensure_rows(0);
        assert_eq!(grid.row_count(), 3);
        grid.ensure_rows(5);
        assert_eq!(grid.row_count(), 6);
        assert!(grid.row(5).iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_add_top_row_shifts_rows_down() {
        let mut grid = grid_from(3, &["bbb", "g.."]);
        grid.add_top_row(|_, _| Cell::Bubble(RED));
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.get(0, 1), Cell::Bubble(RED));
        assert_eq!(grid.get(1, 1), Cell::Bubble(BLUE));
        assert_eq!(grid.get(2, 0), Cell::Bubble(GREEN));
    }

    #[test]
    fn test_drop_empty_rows_trims_trailing_only() {
        let mut grid = grid_from(3, &["r..", "...", "b..", "...", "..."]);
        grid.drop_empty_rows();
        assert_eq!(grid.row_count(), 3);
        assert!(grid.row(2).iter().any(|c| !c.is_empty()));

        let mut empty = grid_from(3, &["...", "..."]);
        empty.drop_empty_rows();
        assert_eq!(empty.row_count(), 0);
    }

    #[test]
    fn test_find_nearest_empty_returns_start_when_free() {
        let grid = grid_from(3, &["r.r"]);
        assert_eq!(grid.find_nearest_empty(0, 1), Some(HexCoord::new(0, 1)));
    }

    #[test]
    fn test_find_nearest_empty_bfs_order() {
        // (1,1) is odd: neighbours in order (0,1) (0,2) (1,0) (1,2) (2,1) (2,2).
        let grid = grid_from(3, &["rrr", "rrb", "..."]);
        assert_eq!(grid.find_nearest_empty(1, 1), Some(HexCoord::new(2, 1)));
    }

    #[test]
    fn test_find_nearest_empty_saturated() {
        let grid = grid_from(2, &["rr", "bb"]);
        assert_eq!(grid.find_nearest_empty(0, 0), None);
        assert_eq!(grid.find_nearest_empty(7, 7), None);
    }

    #[test]
    fn test_bubbles_row_major() {
        let grid = grid_from(3, &[".r.", "b.g"]);
        let cells: Vec<_> = grid.bubbles().collect();
        assert_eq!(
            cells,
            vec![
                (HexCoord::new(0, 1), RED),
                (HexCoord::new(1, 0), BLUE),
                (HexCoord::new(1, 2), GREEN),
            ]
        );
        assert_eq!(grid.occupied_count(), 3);
    }
}
