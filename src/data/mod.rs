//! Input/output helpers.
//!
//! - CSV ingest + validation (`load`)
//! - spreadsheet export of the augmented table (`export`)

pub mod export;
pub mod load;

pub use export::*;
pub use load::*;
