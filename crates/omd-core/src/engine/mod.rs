//! # Engine Module
//!
//! This module implements the validation stage that gates a combine run.
//!
//! ## Overview
//!
//! Before two structures may be merged, both preconditions of the merged
//! snapshot must hold: the periodic boxes have to share one geometry, and no
//! solute particle may sit on top of a solvent particle. The tasks here check
//! exactly those preconditions and report structured, fatal errors when one
//! fails.
//!
//! ## Architecture
//!
//! - **Validation Tasks** ([`tasks`]) - Box-geometry comparison and the
//!   all-pairs overlap scan
//! - **Error Handling** ([`error`]) - Engine-specific error types carrying the
//!   data needed for the user-facing reports

pub mod error;
pub mod tasks;
