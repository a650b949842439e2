//! # Topology Module
//!
//! This module provides the chemical knowledge needed to derive connectivity
//! for the atoms stored in a container frame.
//!
//! ## Overview
//!
//! ABO containers store only atomic numbers and positions. Bonds are never
//! written to disk; they are reconstructed after decoding from a distance
//! criterion based on covalent radii. This module provides:
//!
//! - **Element table** - Chemical symbols and covalent radii indexed by atomic number
//! - **Bonding rules** - The pairwise distance criterion, optionally overridden from a TOML file
//!
//! ## Key Components
//!
//! - [`elements`] - Static element table
//! - [`bonding`] - Bond detection rules and their file loader
//!
//! ## Usage
//!
//! ```ignore
//! use abokit::core::topology::bonding::BondingRules;
//!
//! let rules = BondingRules::load(std::path::Path::new("bonding.toml"))?;
//! let cutoff = rules.max_bond_distance(6, 1);
//! ```

pub mod bonding;
pub mod elements;
