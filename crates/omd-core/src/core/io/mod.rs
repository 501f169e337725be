//! Provides input/output functionality for OpenMD snapshot files.
//!
//! This module contains the line-oriented `.omd` reader and writer together
//! with the trait-based interface they implement. Declaration and frame-data
//! blocks pass through verbatim; cell matrices and particle records are fully
//! interpreted.

pub mod omd;
pub mod traits;
