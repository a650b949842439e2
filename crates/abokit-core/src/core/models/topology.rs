use super::atom::Atom;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bond {
    pub atom1_idx: usize, // Index of the first atom in the structure
    pub atom2_idx: usize, // Index of the second atom (always > atom1_idx)
    pub length: f64,      // Bond length in Angstroms
}

impl Bond {
    pub fn between(atom1_idx: usize, atom1: &Atom, atom2_idx: usize, atom2: &Atom) -> Self {
        Self {
            atom1_idx,
            atom2_idx,
            length: atom1.distance(atom2),
        }
    }
}
