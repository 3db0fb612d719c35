//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the loaded table (`Dataset`, `CampaignRecord`, `RowError`)
//! - derived per-row metrics (`Metrics`)
//! - run configuration and output paths (`RunConfig`)
//! - rendered chart handles (`ChartArtifact`)

pub mod types;

pub use types::*;
