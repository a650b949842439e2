//! # Workflows Module
//!
//! High-level entry points that tie the container decoder, bonding rules and
//! pathway post-processing together.
//!
//! - **Load Workflow** ([`load`]) - opens a container file, resolves the
//!   bonding rules from a [`config::LoadConfig`] and returns the decoded scene.

pub mod config;
pub mod error;
pub mod load;
