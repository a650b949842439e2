use crate::cli::{LoadArgs, TargetVersion};
use crate::error::{CliError, Result};
use abokit::workflows::config::{LoadConfig, LoadConfigBuilder};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PartialLoadConfig {
    pub interpolate_neb: Option<bool>,
    pub neb_steps: Option<usize>,
    pub bond_tolerance: Option<f64>,
    pub bonding_rules: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PartialConvertConfig {
    pub to: Option<TargetVersion>,
    pub compress: Option<bool>,
    pub level: Option<i32>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    #[serde(default)]
    pub load: PartialLoadConfig,
    #[serde(default)]
    pub convert: PartialConvertConfig,
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads the file if one was given, otherwise starts from an empty config.
    pub fn from_optional_file(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Applies `--set` overrides and CLI flags, then builds the library's
    /// load configuration. CLI flags take precedence over everything else.
    pub fn merge_with_cli(&mut self, args: &LoadArgs) -> Result<LoadConfig> {
        self.apply_set_values(&args.set_values)?;

        let file = &self.load;
        let mut builder = LoadConfigBuilder::new()
            .interpolate_neb(!args.no_interpolation && file.interpolate_neb.unwrap_or(true));
        if let Some(steps) = args.neb_steps.or(file.neb_steps) {
            builder = builder.neb_steps(steps);
        }
        if let Some(tolerance) = args.bond_tolerance.or(file.bond_tolerance) {
            builder = builder.bond_tolerance(tolerance);
        }
        if let Some(path) = args.bonding_rules.clone().or_else(|| file.bonding_rules.clone()) {
            builder = builder.bonding_rules_path(path);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "load.interpolate-neb" => {
                    self.load.interpolate_neb = Some(parse_value(key, value_str, "boolean")?)
                }
                "load.neb-steps" => {
                    self.load.neb_steps = Some(parse_value(key, value_str, "integer")?)
                }
                "load.bond-tolerance" => {
                    self.load.bond_tolerance = Some(parse_value(key, value_str, "float")?)
                }
                "load.bonding-rules" => self.load.bonding_rules = Some(PathBuf::from(value_str)),
                "convert.to" => {
                    self.convert.to = Some(match value_str {
                        "legacy" => TargetVersion::Legacy,
                        "v1" => TargetVersion::V1,
                        "v2" => TargetVersion::V2,
                        _ => {
                            return Err(CliError::Config(format!(
                                "Invalid value for {}: {} (expected legacy, v1 or v2)",
                                key, value_str
                            )));
                        }
                    })
                }
                "convert.compress" => {
                    self.convert.compress = Some(parse_value(key, value_str, "boolean")?)
                }
                "convert.level" => {
                    self.convert.level = Some(parse_value(key, value_str, "integer")?)
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}
