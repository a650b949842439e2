//! # abokit
//!
//! Decoding, encoding and post-processing of ABO scene containers: multi-frame
//! molecular scenes with atoms, derived bonds, triangle-mesh models and
//! optional unit cells.
//!
//! ## Layout
//!
//! - **[`core`]: The Foundation.** Plain data models (`Container`, `Frame`,
//!   `Structure`, `Model`), the element table and bonding rules, and the
//!   binary I/O layer.
//!
//! - **[`pathway`]: Reaction Pathways.** Viability checks and Catmull-Rom
//!   densification for containers flagged as NEB pathways.
//!
//! - **[`workflows`]: The Public API.** One-call loading of a file with
//!   validated configuration and progress reporting.

pub mod core;
pub mod pathway;
pub mod progress;
pub mod workflows;
