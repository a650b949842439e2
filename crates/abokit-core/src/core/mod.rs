//! # Core Module
//!
//! The building blocks shared by every layer of the library.
//!
//! - **Scene Representation** ([`models`]) - atoms, structures, meshes, frames and containers
//! - **Chemistry Tables** ([`topology`]) - element symbols, covalent radii and bonding rules
//! - **File I/O** ([`io`]) - the ABO/ABOF container codec and auxiliary exporters

pub mod io;
pub mod models;
pub mod topology;
