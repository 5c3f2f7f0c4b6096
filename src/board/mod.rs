//! Board topology: cells, adjacency, and path queries

pub mod cell;
pub mod graph;

pub use cell::Cell;
pub use graph::{path_shield_sum, Board};
