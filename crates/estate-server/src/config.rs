//! Server configuration from environment.

use estate_core::EstateRules;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub database_path: String,
    pub database_max_connections: u32,
    pub max_dimension: u32,
    pub max_tree_height: u32,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        let rules = EstateRules::default();
        Self {
            server_port: env_or("ESTATE_PORT", 8080),
            database_path: env::var("ESTATE_DB_PATH")
                .unwrap_or_else(|_| "data/estate.db".to_string()),
            database_max_connections: env_or("ESTATE_DB_MAX_CONNECTIONS", 5),
            max_dimension: env_or("ESTATE_MAX_DIMENSION", rules.max_dimension),
            max_tree_height: env_or("ESTATE_MAX_TREE_HEIGHT", rules.max_tree_height),
        }
    }

    pub fn rules(&self) -> EstateRules {
        EstateRules {
            max_dimension: self.max_dimension,
            max_tree_height: self.max_tree_height,
        }
    }
}
