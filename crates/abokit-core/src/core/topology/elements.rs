use phf::{Map, phf_map};

/// Radius used for atomic numbers that have no entry in [`COVALENT_RADII`].
pub const FALLBACK_COVALENT_RADIUS: f64 = 1.5;

const UNKNOWN_SYMBOL: &str = "X";

// Index is the atomic number; slot 0 is a placeholder.
static SYMBOLS: [&str; 87] = [
    "X", "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S",
    "Cl", "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge",
    "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd",
    "In", "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd",
    "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg",
    "Tl", "Pb", "Bi", "Po", "At", "Rn",
];

// Single-bond covalent radii in Angstroms (Cordero et al., 2008; low-spin for Mn/Fe).
static COVALENT_RADII: Map<&'static str, f64> = phf_map! {
    "H" => 0.31, "He" => 0.28,
    "Li" => 1.28, "Be" => 0.96, "B" => 0.84, "C" => 0.76, "N" => 0.71, "O" => 0.66, "F" => 0.57, "Ne" => 0.58,
    "Na" => 1.66, "Mg" => 1.41, "Al" => 1.21, "Si" => 1.11, "P" => 1.07, "S" => 1.05, "Cl" => 1.02, "Ar" => 1.06,
    "K" => 2.03, "Ca" => 1.76, "Sc" => 1.70, "Ti" => 1.60, "V" => 1.53, "Cr" => 1.39, "Mn" => 1.39, "Fe" => 1.32,
    "Co" => 1.26, "Ni" => 1.24, "Cu" => 1.32, "Zn" => 1.22, "Ga" => 1.22, "Ge" => 1.20, "As" => 1.19, "Se" => 1.20,
    "Br" => 1.20, "Kr" => 1.16,
    "Rb" => 2.20, "Sr" => 1.95, "Y" => 1.90, "Zr" => 1.75, "Nb" => 1.64, "Mo" => 1.54, "Tc" => 1.47, "Ru" => 1.46,
    "Rh" => 1.42, "Pd" => 1.39, "Ag" => 1.45, "Cd" => 1.44, "In" => 1.42, "Sn" => 1.39, "Sb" => 1.39, "Te" => 1.38,
    "I" => 1.39, "Xe" => 1.40,
    "Cs" => 2.44, "Ba" => 2.15, "La" => 2.07, "Ce" => 2.04, "Pr" => 2.03, "Nd" => 2.01, "Pm" => 1.99, "Sm" => 1.98,
    "Eu" => 1.98, "Gd" => 1.96, "Tb" => 1.94, "Dy" => 1.92, "Ho" => 1.92, "Er" => 1.89, "Tm" => 1.90, "Yb" => 1.87,
    "Lu" => 1.87, "Hf" => 1.75, "Ta" => 1.70, "W" => 1.62, "Re" => 1.51, "Os" => 1.44, "Ir" => 1.41, "Pt" => 1.36,
    "Au" => 1.36, "Hg" => 1.32, "Tl" => 1.45, "Pb" => 1.46, "Bi" => 1.48, "Po" => 1.40, "At" => 1.50, "Rn" => 1.50,
};

/// Returns the chemical symbol for an atomic number, or `"X"` if unknown.
pub fn symbol(element: u8) -> &'static str {
    match SYMBOLS.get(element as usize) {
        Some(&symbol) if element != 0 => symbol,
        _ => UNKNOWN_SYMBOL,
    }
}

/// Looks up the atomic number for a chemical symbol (case-sensitive, e.g. `"Cl"`).
pub fn atomic_number(symbol: &str) -> Option<u8> {
    SYMBOLS
        .iter()
        .skip(1)
        .position(|&s| s == symbol)
        .map(|idx| (idx + 1) as u8)
}

/// Returns the tabulated covalent radius for an atomic number, if known.
pub fn covalent_radius(element: u8) -> Option<f64> {
    if element == 0 {
        return None;
    }
    COVALENT_RADII.get(symbol(element)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_symbol_has_a_radius() {
        for element in 1..SYMBOLS.len() as u8 {
            assert!(
                covalent_radius(element).is_some(),
                "missing radius for {}",
                symbol(element)
            );
        }
    }

    #[test]
    fn symbol_and_atomic_number_are_inverse() {
        for element in 1..SYMBOLS.len() as u8 {
            assert_eq!(atomic_number(symbol(element)), Some(element));
        }
    }

    #[test]
    fn unknown_elements_resolve_to_placeholder() {
        assert_eq!(symbol(0), "X");
        assert_eq!(symbol(87), "X");
        assert_eq!(covalent_radius(0), None);
        assert_eq!(covalent_radius(118), None);
        assert_eq!(atomic_number("X"), None);
        assert_eq!(atomic_number("Zz"), None);
    }

    #[test]
    fn common_radii_match_table() {
        assert_eq!(covalent_radius(1), Some(0.31));
        assert_eq!(covalent_radius(6), Some(0.76));
        assert_eq!(covalent_radius(8), Some(0.66));
        assert_eq!(covalent_radius(78), Some(1.36));
    }
}
