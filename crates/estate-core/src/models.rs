//! Core data models for estates and their trees.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A rectangular plot of land laid out as a `length x width` grid of unit cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estate {
    pub id: String,
    /// Extent along X (west to east)
    pub length: u32,
    /// Extent along Y (rows)
    pub width: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Estate {
    /// Grid extents used by the sweep planner.
    pub fn bounds(&self) -> EstateBounds {
        EstateBounds {
            length: self.length,
            width: self.width,
        }
    }
}

/// Grid extents of an estate, detached from its identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstateBounds {
    pub length: u32,
    pub width: u32,
}

impl EstateBounds {
    pub fn new(length: u32, width: u32) -> Self {
        Self { length, width }
    }

    /// Whether a 1-indexed cell lies inside the grid.
    pub fn contains(&self, cell: GridCell) -> bool {
        (1..=self.length).contains(&cell.x) && (1..=self.width).contains(&cell.y)
    }

    pub fn cell_count(&self) -> u64 {
        u64::from(self.length) * u64::from(self.width)
    }
}

/// A tree planted on one cell of an estate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    pub id: String,
    pub estate_id: String,
    pub x: u32,
    pub y: u32,
    pub height: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tree {
    pub fn cell(&self) -> GridCell {
        GridCell::new(self.x, self.y)
    }
}

/// A 1-indexed grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    pub x: u32,
    pub y: u32,
}

impl GridCell {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEstateRequest {
    pub length: i64,
    pub width: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTreeRequest {
    pub x: i64,
    pub y: i64,
    pub height: i64,
}

/// Identifier returned after creating an estate or a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// Summary of tree heights on an estate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResult {
    pub count: usize,
    pub min: u32,
    pub max: u32,
    pub median: u32,
}

/// Outcome of a monitoring sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepResult {
    pub distance: u64,
    /// Last cell the drone held before landing
    pub last_cell: GridCell,
}

/// Wire shape of a drone plan; `rest` is the cell the drone lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DronePlanResponse {
    pub distance: u64,
    pub rest: GridCell,
}

impl From<SweepResult> for DronePlanResponse {
    fn from(result: SweepResult) -> Self {
        Self {
            distance: result.distance,
            rest: result.last_cell,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_contain_only_one_indexed_cells() {
        let bounds = EstateBounds::new(5, 2);
        assert!(bounds.contains(GridCell::new(1, 1)));
        assert!(bounds.contains(GridCell::new(5, 2)));
        assert!(!bounds.contains(GridCell::new(0, 1)));
        assert!(!bounds.contains(GridCell::new(6, 1)));
        assert!(!bounds.contains(GridCell::new(1, 3)));
        assert_eq!(bounds.cell_count(), 10);
    }

    #[test]
    fn drone_plan_serializes_last_cell_as_rest() {
        let plan = DronePlanResponse::from(SweepResult {
            distance: 112,
            last_cell: GridCell::new(1, 2),
        });
        let json = serde_json::to_value(plan).unwrap();
        assert_eq!(json, serde_json::json!({"distance": 112, "rest": {"x": 1, "y": 2}}));
    }
}
