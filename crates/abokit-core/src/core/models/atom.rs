use crate::core::topology::elements;
use nalgebra::Point3;

/// Represents a single atom of a frame's structure.
///
/// An atom is identified by its atomic number and carries a Cartesian
/// position in Angstroms. Atoms are plain values: once created they are not
/// mutated, and their identity inside a structure is their ordinal index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atom {
    /// The atomic number (e.g., 1 for hydrogen, 6 for carbon).
    pub element: u8,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new `Atom` from an atomic number and Cartesian coordinates.
    ///
    /// # Arguments
    ///
    /// * `element` - The atomic number of the atom.
    /// * `x` - The x coordinate in Angstroms.
    /// * `y` - The y coordinate in Angstroms.
    /// * `z` - The z coordinate in Angstroms.
    pub fn new(element: u8, x: f64, y: f64, z: f64) -> Self {
        Self {
            element,
            position: Point3::new(x, y, z),
        }
    }

    /// Creates a new `Atom` from an atomic number and a position.
    pub fn at(element: u8, position: Point3<f64>) -> Self {
        Self { element, position }
    }

    /// Returns the chemical symbol of the atom, or `"X"` for unknown elements.
    pub fn symbol(&self) -> &'static str {
        elements::symbol(self.element)
    }

    /// Euclidean distance to another atom in Angstroms.
    pub fn distance(&self, other: &Atom) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared Euclidean distance to another atom.
    pub fn distance_squared(&self, other: &Atom) -> f64 {
        nalgebra::distance_squared(&self.position, &other.position)
    }
}
