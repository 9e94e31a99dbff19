//! Move assistant: greedy one-ply search for the placement that pops the most bubbles.

use crate::cluster::VirtualCell;
use crate::grid::{BubbleColor, ColumnPolicy, HexCoord, HexGrid};
use crate::placement::MIN_CLUSTER_SIZE;

/// Best placement found for the current colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub cell: HexCoord,
    /// Cluster size the placement would produce.
    pub size: usize,
    /// Pressure relief term: larger the closer `cell` is to the ceiling.
    pub confidence: usize,
}

impl Suggestion {
    pub fn score(&self) -> usize {
        self.size * 10 + self.confidence
    }
}

/// Try every empty in-range neighbour of every `color` bubble as a virtual placement.
///
/// Score is `size * 10 + (row_count - row)`; candidates below `MIN_CLUSTER_SIZE` are skipped.
/// Scanning is row-major then neighbour-table order and only a strictly better score replaces
/// the current best, so the first candidate wins ties.
pub fn find_best_suggestion<P: ColumnPolicy>(
    grid: &HexGrid<P>,
    color: BubbleColor,
) -> Option<Suggestion> {
    let row_count = grid.row_count();
    let mut best: Option<Suggestion> = None;

    for (at, bubble) in grid.bubbles() {
        if bubble != color {
            continue;
        }
        for next in grid.neighbors_of(at.row, at.col) {
            if !grid.is_valid_coord(next) || !grid.get_at(next).is_empty() {
                continue;
            }
            let virtual_cell = VirtualCell { at: next, color };
            let size = grid.collect_cluster(next, color, Some(virtual_cell)).len();
            if size < MIN_CLUSTER_SIZE {
                continue;
            }
            let candidate = Suggestion {
                cell: next,
                size,
                confidence: row_count - next.row as usize,
            };
            if best.is_none_or(|b| candidate.score() > b.score()) {
                best = Some(candidate);
            }
        }
    }

    if let Some(s) = best {
        log::debug!("hint for {:?}: {} (size {})", color, s.cell, s.size);
    }
    best
}
