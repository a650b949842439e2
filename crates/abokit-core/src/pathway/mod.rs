//! Reaction-pathway post-processing.
//!
//! Containers flagged as nudged elastic band (NEB) pathways store only the
//! images of the band. This module checks that consecutive images describe
//! the same atoms in the same order and densifies the sequence with
//! Catmull-Rom splines so the reaction can be animated smoothly.

pub mod neb;
pub mod spline;
