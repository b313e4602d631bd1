//! Staffing engine that matches employee attribute profiles against the
//! vacancy capacity of business processes.
//!
//! The crate is organised around three surfaces: [`catalog`] imports and
//! validates the process table from CSV, [`placement`] owns the matching
//! rules and the assignment lifecycle, and [`report`] aggregates both into
//! operator-facing summaries.

pub mod catalog;
pub mod config;
pub mod error;
pub mod placement;
pub mod report;
pub mod telemetry;
