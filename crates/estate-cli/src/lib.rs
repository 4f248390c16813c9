//! Shared helpers for the estate CLI tools.

pub mod client;
pub mod plot;

pub use client::EstateClient;
pub use plot::{PlotFile, TreePlacement};
