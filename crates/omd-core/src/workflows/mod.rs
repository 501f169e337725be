//! # Workflows Module
//!
//! High-level entry points that tie the `core` and `engine` layers together.
//!
//! ## Overview
//!
//! Workflows are the top-level API for users of this crate. The combine
//! workflow runs the whole pipeline for one invocation: parse the solute and
//! solvent files, validate them against each other, and serialize the merged
//! snapshot. It owns the hard invariant that the output file is either
//! written completely and correctly or not created at all.

pub mod combine;
