//! # Snapshot Models Module
//!
//! Data structures representing one parsed OpenMD snapshot file.
//!
//! ## Key Components
//!
//! - [`cell`] - The periodic simulation cell (`Hmat`) and minimum-image wrapping
//! - [`particle`] - Individual integrable objects and their record layout tags
//! - [`structure`] - A complete parsed structure file: declaration blocks, frame
//!   data, cell, and particle list

pub mod cell;
pub mod particle;
pub mod structure;
