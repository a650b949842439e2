use crate::pathway::neb::NEB_STEPS;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Settings for turning a container file into an in-memory scene.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadConfig {
    pub interpolate_neb: bool,
    pub neb_steps: usize,
    /// Overrides the tolerance from the default or loaded bonding rules.
    pub bond_tolerance: Option<f64>,
    /// TOML file with bonding tolerance and radius overrides.
    pub bonding_rules_path: Option<PathBuf>,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            interpolate_neb: true,
            neb_steps: NEB_STEPS,
            bond_tolerance: None,
            bonding_rules_path: None,
        }
    }
}

#[derive(Default)]
pub struct LoadConfigBuilder {
    interpolate_neb: Option<bool>,
    neb_steps: Option<usize>,
    bond_tolerance: Option<f64>,
    bonding_rules_path: Option<PathBuf>,
}

impl LoadConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interpolate_neb(mut self, enabled: bool) -> Self {
        self.interpolate_neb = Some(enabled);
        self
    }
    pub fn neb_steps(mut self, steps: usize) -> Self {
        self.neb_steps = Some(steps);
        self
    }
    pub fn bond_tolerance(mut self, tolerance: f64) -> Self {
        self.bond_tolerance = Some(tolerance);
        self
    }
    pub fn bonding_rules_path(mut self, path: PathBuf) -> Self {
        self.bonding_rules_path = Some(path);
        self
    }

    pub fn build(self) -> Result<LoadConfig, ConfigError> {
        let defaults = LoadConfig::default();

        let neb_steps = self.neb_steps.unwrap_or(defaults.neb_steps);
        if neb_steps == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "neb_steps",
                reason: "must be at least 1".to_string(),
            });
        }
        if let Some(tolerance) = self.bond_tolerance {
            if !(tolerance.is_finite() && tolerance > 0.0) {
                return Err(ConfigError::InvalidParameter {
                    name: "bond_tolerance",
                    reason: format!("must be a positive number, got {}", tolerance),
                });
            }
        }

        Ok(LoadConfig {
            interpolate_neb: self.interpolate_neb.unwrap_or(defaults.interpolate_neb),
            neb_steps,
            bond_tolerance: self.bond_tolerance,
            bonding_rules_path: self.bonding_rules_path,
        })
    }
}
