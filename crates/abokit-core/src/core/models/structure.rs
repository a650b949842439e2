use super::atom::Atom;
use super::topology::Bond;
use crate::core::topology::bonding::BondingRules;
use nalgebra::{Point3, Vector3};
use std::collections::BTreeMap;

/// The atomic structure of a single frame.
///
/// A structure is an ordered list of atoms together with data derived from
/// it: the bond list and a per-element tally. Atom order is significant;
/// index `i` in one frame is expected to describe the same atom as index `i`
/// in the next frame of a reaction pathway.
///
/// Derived data is not kept in sync automatically. After all atoms have been
/// added, [`Structure::update`] (or [`Structure::update_with`]) must be called
/// once to materialize bonds and element statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    /// Atoms in file order.
    atoms: Vec<Atom>,
    /// Bonds derived from the distance criterion, ordered by `(atom1_idx, atom2_idx)`.
    bonds: Vec<Bond>,
    /// Number of atoms per chemical symbol.
    element_counts: BTreeMap<&'static str, usize>,
}

impl Structure {
    /// Creates a new, empty structure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a structure from a list of atoms and derives its bonds using
    /// the given rules.
    ///
    /// # Arguments
    ///
    /// * `atoms` - The atoms, in order.
    /// * `rules` - The bonding criterion used for [`Structure::update_with`].
    pub fn from_atoms(atoms: Vec<Atom>, rules: &BondingRules) -> Self {
        let mut structure = Self {
            atoms,
            ..Self::default()
        };
        structure.update_with(rules);
        structure
    }

    /// Appends an atom to the structure.
    ///
    /// # Arguments
    ///
    /// * `element` - The atomic number.
    /// * `x`, `y`, `z` - Cartesian coordinates in Angstroms.
    pub fn add_atom(&mut self, element: u8, x: f64, y: f64, z: f64) {
        self.atoms.push(Atom::new(element, x, y, z));
    }

    /// Recomputes bonds and element counts using the default bonding rules.
    pub fn update(&mut self) {
        self.update_with(&BondingRules::default());
    }

    /// Recomputes bonds and element counts using the given bonding rules.
    ///
    /// Bonds are enumerated in ascending `(i, j)` order with `i < j`, so the
    /// result is deterministic for a given atom list.
    pub fn update_with(&mut self, rules: &BondingRules) {
        self.count_elements();
        self.construct_bonds(rules);
    }

    fn count_elements(&mut self) {
        self.element_counts.clear();
        for atom in &self.atoms {
            *self.element_counts.entry(atom.symbol()).or_insert(0) += 1;
        }
    }

    fn construct_bonds(&mut self, rules: &BondingRules) {
        self.bonds.clear();
        for (i, atom1) in self.atoms.iter().enumerate() {
            for (j, atom2) in self.atoms.iter().enumerate().skip(i + 1) {
                if rules.is_bonded(atom1.element, atom2.element, atom1.distance_squared(atom2)) {
                    self.bonds.push(Bond::between(i, atom1, j, atom2));
                }
            }
        }
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, idx: usize) -> Option<&Atom> {
        self.atoms.get(idx)
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn nr_atoms(&self) -> usize {
        self.atoms.len()
    }

    pub fn nr_bonds(&self) -> usize {
        self.bonds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Returns the number of atoms per chemical symbol, sorted by symbol.
    pub fn element_counts(&self) -> &BTreeMap<&'static str, usize> {
        &self.element_counts
    }

    /// Returns the element tally as a human readable string, e.g. `"C (2); H (6)"`.
    ///
    /// Returns an empty string for a structure without atoms.
    pub fn elements_string(&self) -> String {
        self.element_counts
            .iter()
            .map(|(symbol, count)| format!("{} ({})", symbol, count))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Returns the element numbers in atom order.
    pub fn element_sequence(&self) -> impl Iterator<Item = u8> + '_ {
        self.atoms.iter().map(|atom| atom.element)
    }

    /// Geometric center of all atoms, or the origin for an empty structure.
    pub fn centroid(&self) -> Point3<f64> {
        if self.atoms.is_empty() {
            return Point3::origin();
        }
        let sum = self
            .atoms
            .iter()
            .fold(Vector3::zeros(), |acc, atom| acc + atom.position.coords);
        Point3::from(sum / self.atoms.len() as f64)
    }

    /// Translates all atoms so that the centroid sits at the origin.
    ///
    /// Bond lengths are translation invariant, so derived data stays valid.
    pub fn center(&mut self) {
        let shift = self.centroid().coords;
        for atom in &mut self.atoms {
            atom.position -= shift;
        }
    }

    /// Returns the position of the atom farthest from the origin, if any.
    pub fn largest_distance(&self) -> Option<Point3<f64>> {
        self.atoms
            .iter()
            .map(|atom| atom.position)
            .max_by(|a, b| a.coords.norm_squared().total_cmp(&b.coords.norm_squared()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn methane() -> Structure {
        let mut s = Structure::new();
        s.add_atom(6, 0.0, 0.0, 0.0);
        s.add_atom(1, 0.629, 0.629, 0.629);
        s.add_atom(1, -0.629, -0.629, 0.629);
        s.add_atom(1, -0.629, 0.629, -0.629);
        s.add_atom(1, 0.629, -0.629, -0.629);
        s.update();
        s
    }

    #[test]
    fn new_structure_is_empty() {
        let s = Structure::new();
        assert!(s.is_empty());
        assert_eq!(s.nr_atoms(), 0);
        assert_eq!(s.nr_bonds(), 0);
        assert_eq!(s.elements_string(), "");
    }

    #[test]
    fn update_derives_bonds_for_methane() {
        let s = methane();
        assert_eq!(s.nr_atoms(), 5);
        assert_eq!(s.nr_bonds(), 4);
        for bond in s.bonds() {
            assert_eq!(bond.atom1_idx, 0);
            assert!((bond.length - 1.0894).abs() < 1e-3);
        }
    }

    #[test]
    fn bonds_are_ordered_by_index_pairs() {
        let mut s = Structure::new();
        s.add_atom(6, 0.0, 0.0, 0.0);
        s.add_atom(6, 1.5, 0.0, 0.0);
        s.add_atom(6, 3.0, 0.0, 0.0);
        s.update();
        let pairs: Vec<_> = s
            .bonds()
            .iter()
            .map(|b| (b.atom1_idx, b.atom2_idx))
            .collect();
        assert_eq!(pairs, vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn update_counts_elements_sorted_by_symbol() {
        let s = methane();
        assert_eq!(s.element_counts().get("C"), Some(&1));
        assert_eq!(s.element_counts().get("H"), Some(&4));
        assert_eq!(s.elements_string(), "C (1); H (4)");
    }

    #[test]
    fn update_with_custom_rules_changes_connectivity() {
        let mut s = Structure::new();
        s.add_atom(6, 0.0, 0.0, 0.0);
        s.add_atom(6, 2.0, 0.0, 0.0);
        s.update();
        assert_eq!(s.nr_bonds(), 0);

        s.update_with(&BondingRules::new(1.5));
        assert_eq!(s.nr_bonds(), 1);
    }

    #[test]
    fn derived_data_is_stale_until_update() {
        let mut s = Structure::new();
        s.add_atom(1, 0.0, 0.0, 0.0);
        s.add_atom(1, 0.74, 0.0, 0.0);
        assert_eq!(s.nr_bonds(), 0);
        assert!(s.element_counts().is_empty());
        s.update();
        assert_eq!(s.nr_bonds(), 1);
    }

    #[test]
    fn from_atoms_derives_immediately() {
        let atoms = vec![Atom::new(1, 0.0, 0.0, 0.0), Atom::new(1, 0.74, 0.0, 0.0)];
        let s = Structure::from_atoms(atoms, &BondingRules::default());
        assert_eq!(s.nr_bonds(), 1);
        assert_eq!(s.elements_string(), "H (2)");
    }

    #[test]
    fn center_moves_centroid_to_origin() {
        let mut s = Structure::new();
        s.add_atom(8, 1.0, 1.0, 1.0);
        s.add_atom(8, 3.0, 1.0, 1.0);
        s.update();
        s.center();
        assert!(s.centroid().coords.norm() < 1e-12);
        assert_eq!(s.atom(0).unwrap().position, Point3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn largest_distance_returns_farthest_atom() {
        let mut s = Structure::new();
        assert_eq!(s.largest_distance(), None);
        s.add_atom(1, 0.5, 0.0, 0.0);
        s.add_atom(1, 0.0, -3.0, 0.0);
        s.add_atom(1, 1.0, 1.0, 1.0);
        assert_eq!(s.largest_distance(), Some(Point3::new(0.0, -3.0, 0.0)));
    }

    #[test]
    fn element_sequence_preserves_order() {
        let s = methane();
        assert_eq!(s.element_sequence().collect::<Vec<_>>(), vec![6, 1, 1, 1, 1]);
    }
}
