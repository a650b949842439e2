//! Reading and writing scene containers.
//!
//! The [`abo`] module implements the binary container on top of a small
//! fail-fast [`cursor`] and the Zstandard helpers in [`compression`].
//! [`xyz`] and [`table`] are one-way exporters for downstream tools.

pub mod abo;
pub mod compression;
pub mod cursor;
pub mod error;
pub mod normals;
pub mod table;
pub mod traits;
pub mod xyz;
