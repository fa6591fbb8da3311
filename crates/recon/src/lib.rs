//! `topocheck-recon` — set-overlap reconciliation between a CSV table and a
//! TopoJSON document.
//!
//! Loaders turn raw text into records; the engine is a pure function over
//! the loaded records. No CLI or terminal output.

pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod hierarchy;
pub mod model;
pub mod tabular;

pub use config::ReconConfig;
pub use engine::{reconcile, run};
pub use error::{ErrorKind, ReconError};
pub use model::{ComparisonResult, FieldComparison, FieldValue, ReconInput, ReconReport};
