//! Estate store: SQLite persistence with a DashMap estate cache.

use anyhow::Result;
use chrono::Utc;
use dashmap::DashMap;
use estate_core::{
    compute_stats, plan_sweep, Estate, EstateBounds, EstateRules, GridCell, StatsResult,
    SweepResult, Tree, TreeHeightGrid,
};
use uuid::Uuid;

use crate::config::Config;
use crate::persistence::{self, db::is_unique_violation, Database};

/// Result of planting a tree on a plot.
#[derive(Debug, Clone)]
pub enum PlantTreeOutcome {
    Planted(Tree),
    PlotTaken,
}

/// Application state shared by all request handlers.
///
/// Estates never change after creation, so cached entries stay valid.
pub struct AppState {
    db: Database,
    config: Config,
    rules: EstateRules,
    estates: DashMap<String, Estate>,
}

impl AppState {
    pub fn with_database(db: Database, config: Config) -> Self {
        let rules = config.rules();
        Self {
            db,
            config,
            rules,
            estates: DashMap::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rules(&self) -> &EstateRules {
        &self.rules
    }

    /// Create and persist a new estate.
    pub async fn create_estate(&self, bounds: EstateBounds) -> Result<Estate> {
        let now = Utc::now();
        let estate = Estate {
            id: Uuid::new_v4().to_string(),
            length: bounds.length,
            width: bounds.width,
            created_at: now,
            updated_at: now,
        };

        persistence::estates::insert_estate(self.db.pool(), &estate).await?;
        self.estates.insert(estate.id.clone(), estate.clone());
        Ok(estate)
    }

    /// Look up an estate, reading through the cache.
    pub async fn get_estate(&self, id: &str) -> Result<Option<Estate>> {
        if let Some(estate) = self.estates.get(id) {
            return Ok(Some(estate.value().clone()));
        }

        let estate = persistence::estates::get_estate(self.db.pool(), id).await?;
        if let Some(estate) = &estate {
            self.estates.insert(estate.id.clone(), estate.clone());
        }
        Ok(estate)
    }

    /// Plant a tree on a free plot of the estate.
    pub async fn plant_tree(
        &self,
        estate: &Estate,
        cell: GridCell,
        height: u32,
    ) -> Result<PlantTreeOutcome> {
        let pool = self.db.pool();
        if persistence::trees::get_tree_by_plot(pool, &estate.id, cell.x, cell.y)
            .await?
            .is_some()
        {
            return Ok(PlantTreeOutcome::PlotTaken);
        }

        let now = Utc::now();
        let tree = Tree {
            id: Uuid::new_v4().to_string(),
            estate_id: estate.id.clone(),
            x: cell.x,
            y: cell.y,
            height,
            created_at: now,
            updated_at: now,
        };

        match persistence::trees::insert_tree(pool, &tree).await {
            Ok(()) => Ok(PlantTreeOutcome::Planted(tree)),
            Err(err) if is_unique_violation(&err) => Ok(PlantTreeOutcome::PlotTaken),
            Err(err) => Err(err),
        }
    }

    pub async fn list_trees(&self, estate_id: &str) -> Result<Vec<Tree>> {
        persistence::trees::list_trees_by_estate(self.db.pool(), estate_id).await
    }

    /// Height statistics over every tree of the estate.
    pub async fn estate_stats(&self, estate: &Estate) -> Result<StatsResult> {
        let trees = self.list_trees(&estate.id).await?;
        let heights: Vec<u32> = trees.iter().map(|tree| tree.height).collect();
        Ok(compute_stats(&heights))
    }

    /// Monitoring sweep distance for the estate.
    ///
    /// The sweep visits every cell, so it runs off the async workers.
    pub async fn drone_plan(&self, estate: &Estate, max_distance: Option<u64>) -> Result<SweepResult> {
        let trees = self.list_trees(&estate.id).await?;
        let bounds = estate.bounds();
        let result = tokio::task::spawn_blocking(move || {
            let grid = TreeHeightGrid::from_trees(&trees);
            plan_sweep(bounds, &grid, max_distance)
        })
        .await?;
        Ok(result)
    }
}
