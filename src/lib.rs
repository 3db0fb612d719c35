//! `mkreport` library crate.
//!
//! The binary (`mkr`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., future scheduled runs, notebooks, etc.)
//! - code stays easy to navigate as the project grows

pub mod aggregate;
pub mod app;
pub mod chart;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod pdf;
pub mod report;
pub mod viewer;
