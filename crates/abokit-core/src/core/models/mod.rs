//! # Core Models Module
//!
//! This module contains the in-memory representation of a decoded scene
//! container.
//!
//! ## Overview
//!
//! Ownership is a plain tree: a [`container::Container`] owns its frames, and
//! each [`frame::Frame`] owns exactly one [`structure::Structure`] and any
//! number of [`model::Model`] meshes. There are no shared or back
//! references; consumers receive the finished container and read it.
//!
//! ## Key Components
//!
//! - [`atom`] - Atomic number plus Cartesian position
//! - [`topology`] - Bonds derived from interatomic distances
//! - [`structure`] - Ordered atom list with derived bonds and element tally
//! - [`model`] - Validated, colored triangle meshes
//! - [`frame`] - One time step: structure, models, description, unit cell
//! - [`container`] - Ordered frames plus the reaction-pathway flag
//!
//! ## Usage
//!
//! ```ignore
//! use abokit::core::models::{container::Container, frame::Frame, structure::Structure};
//!
//! let mut structure = Structure::new();
//! structure.add_atom(8, 0.0, 0.0, 0.0);
//! structure.add_atom(1, 0.96, 0.0, 0.0);
//! structure.update();
//!
//! let mut container = Container::new();
//! container.add_frame(Frame::new(structure, "water fragment"));
//! ```

pub mod atom;
pub mod container;
pub mod frame;
pub mod model;
pub mod structure;
pub mod topology;
