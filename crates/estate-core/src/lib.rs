pub mod models;
pub mod rules;
pub mod stats;
pub mod sweep;

pub use models::{
    CreateEstateRequest, CreateTreeRequest, CreatedResponse, DronePlanResponse, Estate,
    EstateBounds, GridCell, StatsResult, SweepResult, Tree,
};
pub use rules::{validate_max_distance, validate_placement, EstateRules, ValidationError};
pub use stats::compute_stats;
pub use sweep::{plan_sweep, step_cost, SerpentinePath, TreeHeightGrid};
