use super::elements::{self, FALLBACK_COVALENT_RADIUS};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Default multiplier applied to the sum of covalent radii.
pub const DEFAULT_BOND_TOLERANCE: f64 = 1.2;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BondingFile {
    tolerance: Option<f64>,
    #[serde(default)]
    radii: HashMap<String, f64>,
}

/// Distance criterion used to derive bonds from atomic positions.
///
/// Two atoms are considered bonded when their separation is strictly less
/// than `(r_a + r_b) * tolerance`, where `r` is the covalent radius of each
/// element. Radii come from the built-in element table unless overridden.
#[derive(Debug, Clone, PartialEq)]
pub struct BondingRules {
    tolerance: f64,
    overrides: HashMap<u8, f64>,
}

impl Default for BondingRules {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_BOND_TOLERANCE,
            overrides: HashMap::new(),
        }
    }
}

impl BondingRules {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            overrides: HashMap::new(),
        }
    }

    /// Loads bonding rules from a TOML file.
    ///
    /// The file may set a `tolerance` and a `[radii]` table keyed by chemical
    /// symbol. Missing values fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, names an
    /// unknown element, or contains a non-positive tolerance or radius.
    pub fn load(path: &Path) -> Result<Self, BondingLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| BondingLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let file: BondingFile = toml::from_str(&content).map_err(|e| BondingLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        let mut rules = Self::new(file.tolerance.unwrap_or(DEFAULT_BOND_TOLERANCE));
        if !(rules.tolerance > 0.0) {
            return Err(BondingLoadError::InvalidValue {
                key: "tolerance".to_string(),
                value: rules.tolerance,
            });
        }
        for (symbol, radius) in file.radii {
            let element = elements::atomic_number(&symbol)
                .ok_or_else(|| BondingLoadError::UnknownElement(symbol.clone()))?;
            if !(radius > 0.0) {
                return Err(BondingLoadError::InvalidValue {
                    key: format!("radii.{}", symbol),
                    value: radius,
                });
            }
            rules.overrides.insert(element, radius);
        }
        Ok(rules)
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_radius(mut self, element: u8, radius: f64) -> Self {
        self.overrides.insert(element, radius);
        self
    }

    pub fn radius(&self, element: u8) -> f64 {
        self.overrides
            .get(&element)
            .copied()
            .or_else(|| elements::covalent_radius(element))
            .unwrap_or(FALLBACK_COVALENT_RADIUS)
    }

    /// Largest separation at which two elements are still considered bonded.
    pub fn max_bond_distance(&self, element1: u8, element2: u8) -> f64 {
        (self.radius(element1) + self.radius(element2)) * self.tolerance
    }

    #[inline]
    pub fn is_bonded(&self, element1: u8, element2: u8, distance_squared: f64) -> bool {
        let cutoff = self.max_bond_distance(element1, element2);
        distance_squared < cutoff * cutoff
    }
}

#[derive(Debug, Error)]
pub enum BondingLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Unknown element symbol in bonding rules: '{0}'")]
    UnknownElement(String),
    #[error("Value for '{key}' must be positive (got {value})")]
    InvalidValue { key: String, value: f64 },
}
