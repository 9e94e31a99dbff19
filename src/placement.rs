//! Placement resolver: continuous collision point -> grid cell, commit, match, sweep.

use crate::grid::{BubbleColor, Cell, ColumnPolicy, HexCoord, HexGrid};

/// A cluster must reach this size to pop.
pub const MIN_CLUSTER_SIZE: usize = 3;

/// Grid <-> world transform shared by the renderer and the resolver.
///
/// World units are arbitrary floats; the renderer decides how they map to terminal cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    pub padding: f32,
    pub radius: f32,
    pub row_height: f32,
    pub top_offset: f32,
    /// Total board width (both paddings included).
    pub width: f32,
    /// Bubbles whose lower edge reaches this y end the game. With `for_columns` the line sits
    /// below row `field_rows - SHOOTER_ROWS`, so the row limit trips first; it only decides for
    /// hand-built layouts with a higher shooter line.
    pub bottom_limit: f32,
    pub shooter_x: f32,
    pub shooter_y: f32,
}

impl BoardLayout {
    /// Layout for `cols` columns and a field `field_rows` rows tall, radius 1 and one row per
    /// two radii. The shooter sits on the last field row.
    pub fn for_columns(cols: usize, field_rows: usize) -> Self {
        let radius = 1.0;
        let padding = 0.0;
        let row_height = 2.0 * radius;
        let top_offset = radius;
        // Odd rows are shifted by one radius, so leave room for it.
        let width = padding * 2.0 + cols as f32 * radius * 2.0 + radius;
        let shooter_y = top_offset + field_rows.saturating_sub(1) as f32 * row_height;
        Self {
            padding,
            radius,
            row_height,
            top_offset,
            width,
            bottom_limit: shooter_y - radius * 1.45,
            shooter_x: width / 2.0,
            shooter_y,
        }
    }

    #[inline]
    fn parity_offset(&self, row: i32) -> f32 {
        if row.rem_euclid(2) == 0 { 0.0 } else { self.radius }
    }

    /// Centre of cell (row, col) in world units.
    pub fn grid_to_world(&self, row: i32, col: i32) -> (f32, f32) {
        let x = self.padding + self.radius + col as f32 * self.radius * 2.0 + self.parity_offset(row);
        let y = self.top_offset + row as f32 * self.row_height;
        (x, y)
    }

    /// Nearest cell to a world point; row and column are floored at 0 but not clamped above.
    pub fn world_to_grid(&self, x: f32, y: f32) -> HexCoord {
        let row = ((y - self.top_offset) / self.row_height).round().max(0.0) as i32;
        let col = ((x - self.padding - self.radius - self.parity_offset(row)) / (self.radius * 2.0))
            .round()
            .max(0.0) as i32;
        HexCoord::new(row, col)
    }

    pub fn left_bound(&self) -> f32 {
        self.padding + self.radius
    }

    pub fn right_bound(&self) -> f32 {
        self.width - self.padding - self.radius
    }
}

/// Result of committing one projectile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// No empty cell could be reached from the target; the grid was not touched.
    Dropped { target: HexCoord },
    Settled(Settled),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settled {
    pub cell: HexCoord,
    pub color: BubbleColor,
    /// Removed match (empty when the cluster was smaller than `MIN_CLUSTER_SIZE`).
    pub popped: Vec<HexCoord>,
    pub floating: usize,
}

impl Settled {
    #[inline]
    pub fn matched(&self) -> bool {
        !self.popped.is_empty()
    }
}

/// Map a world point to the cell a projectile should occupy.
///
/// Grows the grid so the target row exists, clamps the column, and falls back to the nearest
/// empty cell when the target is taken. `Err` carries the (occupied) target when nothing is free.
pub fn resolve_target<P: ColumnPolicy>(
    grid: &mut HexGrid<P>,
    layout: &BoardLayout,
    x: f32,
    y: f32,
) -> Result<HexCoord, HexCoord> {
    let raw = layout.world_to_grid(x, y);
    grid.ensure_rows(raw.row as usize);
    let cols = grid.columns_for(raw.row as usize).max(1) as i32;
    let target = HexCoord::new(raw.row, raw.col.clamp(0, cols - 1));

    if grid.get_at(target).is_empty() {
        return Ok(target);
    }
    grid.find_nearest_empty(target.row, target.col).ok_or(target)
}

/// Commit a bubble of `color` landing at world point (x, y), then pop and sweep.
pub fn place_bubble<P: ColumnPolicy>(
    grid: &mut HexGrid<P>,
    layout: &BoardLayout,
    x: f32,
    y: f32,
    color: BubbleColor,
) -> Placement {
    let cell = match resolve_target(grid, layout, x, y) {
        Ok(cell) => cell,
        Err(target) => {
            log::debug!("shot dropped: no empty cell reachable from {}", target);
            return Placement::Dropped { target };
        }
    };

    grid.set(cell.row as usize, cell.col, Cell::Bubble(color));

    let cluster = grid.collect_cluster(cell, color, None);
    if cluster.len() < MIN_CLUSTER_SIZE {
        log::debug!("placed {:?} at {} (cluster {})", color, cell, cluster.len());
        return Placement::Settled(Settled {
            cell,
            color,
            popped: Vec::new(),
            floating: 0,
        });
    }

    grid.remove_cluster(&cluster);
    let floating = grid.remove_floating_bubbles();
    grid.drop_empty_rows();
    log::debug!(
        "placed {:?} at {}: popped {}, floating {}",
        color,
        cell,
        cluster.len(),
        floating
    );
    Placement::Settled(Settled {
        cell,
        color,
        popped: cluster,
        floating,
    })
}
