//! Local plot files for running the planner without a server.

use anyhow::{Context, Result};
use estate_core::{
    compute_stats, plan_sweep, validate_placement, EstateBounds, EstateRules, GridCell,
    StatsResult, SweepResult, TreeHeightGrid,
};
use serde::Deserialize;
use std::path::Path;

/// A tree entry in a plot file.
#[derive(Debug, Clone, Deserialize)]
pub struct TreePlacement {
    pub x: i64,
    pub y: i64,
    pub height: i64,
}

/// An estate with its trees, as read from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct PlotFile {
    pub length: i64,
    pub width: i64,
    #[serde(default)]
    pub trees: Vec<TreePlacement>,
}

/// A plot file that passed validation.
#[derive(Debug, Clone)]
pub struct Plot {
    pub bounds: EstateBounds,
    pub grid: TreeHeightGrid,
    pub heights: Vec<u32>,
}

impl PlotFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading plot file {}", path.display()))?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("parsing plot file")
    }

    /// Apply the same rules the server enforces on estates and trees.
    pub fn validate(&self, rules: &EstateRules) -> Result<Plot> {
        let bounds = rules.validate_dimensions(self.length, self.width)?;
        let mut grid = TreeHeightGrid::new();
        let mut heights = Vec::with_capacity(self.trees.len());

        for tree in &self.trees {
            let (cell, height) = rules
                .validate_tree_fields(tree.x, tree.y, tree.height)
                .with_context(|| format!("tree at ({}, {})", tree.x, tree.y))?;
            validate_placement(bounds, cell)
                .with_context(|| format!("tree at ({}, {})", tree.x, tree.y))?;
            if grid.insert(cell, height).is_some() {
                anyhow::bail!("plot already exist: ({}, {})", cell.x, cell.y);
            }
            heights.push(height);
        }

        Ok(Plot {
            bounds,
            grid,
            heights,
        })
    }
}

impl Plot {
    pub fn stats(&self) -> StatsResult {
        compute_stats(&self.heights)
    }

    pub fn sweep(&self, max_distance: Option<u64>) -> SweepResult {
        plan_sweep(self.bounds, &self.grid, max_distance)
    }

    pub fn height_at(&self, x: u32, y: u32) -> u32 {
        self.grid.height(GridCell::new(x, y))
    }
}
