//! State module for tracking analysis progress
//!
//! # Components
//!
//! - `AnalysisStage`: the linear stage machine one analysis call walks through

mod stage;

pub use stage::AnalysisStage;
