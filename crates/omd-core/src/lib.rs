//! # OpenMD Tools Core Library
//!
//! A library for reading, validating, and combining OpenMD (.omd) simulation
//! snapshot files.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models ([`core::models::structure::Structure`],
//!   [`core::models::cell::PeriodicBox`], [`core::models::particle::StuntDouble`]), the
//!   `.omd` reader/writer, and numeric formatting utilities.
//!
//! - **[`engine`]: The Logic Core.** The validation tasks that gate a merge: the
//!   box-geometry comparison and the all-pairs solute/solvent overlap scan.
//!
//! - **[`workflows`]: The Public API.** This is the highest-level, user-facing layer.
//!   It ties the `engine` and `core` together into the end-to-end combine pipeline:
//!   parse both inputs, validate them against each other, and serialize the merged
//!   snapshot.

pub mod core;
pub mod engine;
pub mod workflows;
