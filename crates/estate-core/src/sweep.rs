//! Drone monitoring sweep planning.
//!
//! The drone flies a serpentine (lawnmower) pattern over the estate grid:
//! row `y = 1` west to east, row `y = 2` east to west, and so on. Each move
//! between neighbouring cells costs a fixed horizontal step plus the vertical
//! climb or descent needed to follow the canopy.

use std::collections::HashMap;

use crate::models::{EstateBounds, GridCell, SweepResult, Tree};

/// Fixed cost of moving one cell.
pub const STEP_COST: u64 = 10;
/// Baseline distance before the first move.
pub const TAKEOFF_COST: u64 = 1;
/// Added once after the sweep ends.
pub const LANDING_COST: u64 = 1;

/// Sparse tree heights keyed by cell. Empty cells read as height 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeHeightGrid {
    heights: HashMap<GridCell, u32>,
}

impl TreeHeightGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a grid from stored tree records.
    pub fn from_trees<'a>(trees: impl IntoIterator<Item = &'a Tree>) -> Self {
        trees
            .into_iter()
            .map(|tree| (tree.cell(), tree.height))
            .collect()
    }

    pub fn insert(&mut self, cell: GridCell, height: u32) -> Option<u32> {
        self.heights.insert(cell, height)
    }

    pub fn height(&self, cell: GridCell) -> u32 {
        self.heights.get(&cell).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }
}

impl FromIterator<(GridCell, u32)> for TreeHeightGrid {
    fn from_iter<I: IntoIterator<Item = (GridCell, u32)>>(iter: I) -> Self {
        Self {
            heights: iter.into_iter().collect(),
        }
    }
}

/// Cells of an estate in serpentine sweep order.
#[derive(Debug, Clone)]
pub struct SerpentinePath {
    bounds: EstateBounds,
    next: Option<GridCell>,
}

impl SerpentinePath {
    pub fn new(bounds: EstateBounds) -> Self {
        let next = (bounds.length >= 1 && bounds.width >= 1).then_some(GridCell::new(1, 1));
        Self { bounds, next }
    }

    fn successor(&self, cell: GridCell) -> Option<GridCell> {
        let eastbound = cell.y % 2 == 1;
        let row_end = if eastbound { self.bounds.length } else { 1 };

        if cell.x != row_end {
            let x = if eastbound { cell.x + 1 } else { cell.x - 1 };
            Some(GridCell::new(x, cell.y))
        } else if cell.y < self.bounds.width {
            Some(GridCell::new(cell.x, cell.y + 1))
        } else {
            None
        }
    }
}

impl Iterator for SerpentinePath {
    type Item = GridCell;

    fn next(&mut self) -> Option<GridCell> {
        let current = self.next?;
        self.next = self.successor(current);
        Some(current)
    }
}

/// Cost of flying from `from` to the adjacent cell `to`.
pub fn step_cost(grid: &TreeHeightGrid, from: GridCell, to: GridCell) -> u64 {
    STEP_COST + u64::from(grid.height(from).abs_diff(grid.height(to)))
}

/// Estimate the distance flown by a full serpentine sweep of the estate.
///
/// With a `max_distance` budget the sweep stops at the first step that would
/// push the running total past the budget; the drone stays on the cell it was
/// leaving. The reported distance never exceeds the budget.
pub fn plan_sweep(
    bounds: EstateBounds,
    grid: &TreeHeightGrid,
    max_distance: Option<u64>,
) -> SweepResult {
    let over_budget = |distance: u64| max_distance.is_some_and(|max| distance > max);

    let mut path = SerpentinePath::new(bounds);
    let mut distance = TAKEOFF_COST;
    let mut current = path.next().unwrap_or(GridCell::new(1, 1));

    for next in path {
        distance += step_cost(grid, current, next);
        if over_budget(distance) {
            break;
        }
        current = next;
    }

    distance += LANDING_COST;
    if let Some(max) = max_distance {
        distance = distance.min(max);
    }

    SweepResult {
        distance,
        last_cell: current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_tree_grid() -> TreeHeightGrid {
        [(GridCell::new(3, 1), 5), (GridCell::new(3, 2), 5)]
            .into_iter()
            .collect()
    }

    #[test]
    fn serpentine_alternates_row_direction() {
        let cells: Vec<_> = SerpentinePath::new(EstateBounds::new(3, 3))
            .map(|c| (c.x, c.y))
            .collect();
        assert_eq!(
            cells,
            vec![
                (1, 1),
                (2, 1),
                (3, 1),
                (3, 2),
                (2, 2),
                (1, 2),
                (1, 3),
                (2, 3),
                (3, 3)
            ]
        );
    }

    #[test]
    fn serpentine_covers_every_cell_once() {
        let bounds = EstateBounds::new(7, 4);
        let cells: Vec<_> = SerpentinePath::new(bounds).collect();
        assert_eq!(cells.len() as u64, bounds.cell_count());
        let unique: std::collections::HashSet<_> = cells.iter().collect();
        assert_eq!(unique.len(), cells.len());
        assert!(cells.iter().all(|c| bounds.contains(*c)));
    }

    #[test]
    fn single_column_estate_flies_straight_north() {
        let cells: Vec<_> = SerpentinePath::new(EstateBounds::new(1, 3)).collect();
        assert_eq!(
            cells,
            vec![GridCell::new(1, 1), GridCell::new(1, 2), GridCell::new(1, 3)]
        );
    }

    #[test]
    fn empty_estate_sweep_costs_only_steps() {
        let result = plan_sweep(EstateBounds::new(5, 2), &TreeHeightGrid::new(), None);
        assert_eq!(result.distance, 1 + 9 * 10 + 1);
        assert_eq!(result.last_cell, GridCell::new(1, 2));
    }

    #[test]
    fn odd_row_count_ends_on_east_edge() {
        let result = plan_sweep(EstateBounds::new(4, 3), &TreeHeightGrid::new(), None);
        assert_eq!(result.last_cell, GridCell::new(4, 3));
        assert_eq!(result.distance, 1 + 11 * 10 + 1);
    }

    #[test]
    fn trees_add_climb_and_descent() {
        let result = plan_sweep(EstateBounds::new(5, 2), &two_tree_grid(), None);
        assert_eq!(result.distance, 112);
        assert_eq!(result.last_cell, GridCell::new(1, 2));
    }

    #[test]
    fn budget_cuts_sweep_in_first_row() {
        let result = plan_sweep(EstateBounds::new(5, 2), &two_tree_grid(), Some(40));
        assert_eq!(result.distance, 40);
        assert_eq!(result.last_cell, GridCell::new(3, 1));
    }

    #[test]
    fn budget_cuts_sweep_after_turning() {
        let result = plan_sweep(EstateBounds::new(5, 2), &two_tree_grid(), Some(90));
        assert_eq!(result.distance, 90);
        assert_eq!(result.last_cell, GridCell::new(3, 2));
    }

    #[test]
    fn generous_budget_matches_unbounded_sweep() {
        let grid = two_tree_grid();
        let bounds = EstateBounds::new(5, 2);
        assert_eq!(plan_sweep(bounds, &grid, Some(112)), plan_sweep(bounds, &grid, None));
    }

    #[test]
    fn landing_cost_is_clamped_to_budget() {
        // full sweep is 111 before landing
        let result = plan_sweep(EstateBounds::new(5, 2), &two_tree_grid(), Some(111));
        assert_eq!(result.distance, 111);
        assert_eq!(result.last_cell, GridCell::new(1, 2));
    }

    #[test]
    fn single_cell_estate_takes_off_and_lands() {
        let bounds = EstateBounds::new(1, 1);
        let result = plan_sweep(bounds, &TreeHeightGrid::new(), None);
        assert_eq!(result.distance, 2);
        assert_eq!(result.last_cell, GridCell::new(1, 1));

        let capped = plan_sweep(bounds, &TreeHeightGrid::new(), Some(1));
        assert_eq!(capped.distance, 1);
    }

    #[test]
    fn tiny_budget_stops_on_first_cell() {
        let result = plan_sweep(EstateBounds::new(5, 2), &TreeHeightGrid::new(), Some(1));
        assert_eq!(result.distance, 1);
        assert_eq!(result.last_cell, GridCell::new(1, 1));
    }

    #[test]
    fn row_turn_follows_height_difference() {
        let grid: TreeHeightGrid = [(GridCell::new(2, 1), 7), (GridCell::new(2, 2), 3)]
            .into_iter()
            .collect();
        assert_eq!(step_cost(&grid, GridCell::new(2, 1), GridCell::new(2, 2)), 14);
        // (1,1)->(2,1)=17, (2,1)->(2,2)=14, (2,2)->(1,2)=13
        let result = plan_sweep(EstateBounds::new(2, 2), &grid, None);
        assert_eq!(result.distance, 1 + 17 + 14 + 13 + 1);
    }

    #[test]
    fn grid_built_from_trees_reads_zero_for_empty_cells() {
        let now = chrono::Utc::now();
        let tree = Tree {
            id: "t1".into(),
            estate_id: "e1".into(),
            x: 2,
            y: 3,
            height: 12,
            created_at: now,
            updated_at: now,
        };
        let grid = TreeHeightGrid::from_trees([&tree]);
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.height(GridCell::new(2, 3)), 12);
        assert_eq!(grid.height(GridCell::new(3, 2)), 0);
    }

    #[test]
    fn planning_is_repeatable() {
        let grid = two_tree_grid();
        let bounds = EstateBounds::new(5, 2);
        let first = plan_sweep(bounds, &grid, Some(90));
        let second = plan_sweep(bounds, &grid, Some(90));
        assert_eq!(first, second);
        assert_eq!(grid, two_tree_grid());
    }
}
