//! Persistence layer for the estate server.
//!
//! SQLite-backed storage for estates and trees.

pub mod db;
pub mod estates;
pub mod trees;

pub use db::{init_database, Database};
