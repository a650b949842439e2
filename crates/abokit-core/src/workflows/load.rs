use super::config::LoadConfig;
use super::error::LoadError;
use crate::core::io::abo::{self, AboHeader, DecodeOptions};
use crate::core::models::container::Container;
use crate::core::topology::bonding::BondingRules;
use crate::progress::{Progress, ProgressReporter};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Resolves the bonding rules described by `config`.
///
/// Rules are read from `bonding_rules_path` when set, otherwise the built-in
/// table is used; an explicit `bond_tolerance` wins over both.
pub fn resolve_bonding_rules(config: &LoadConfig) -> Result<BondingRules, LoadError> {
    let rules = match &config.bonding_rules_path {
        Some(path) => {
            debug!("Loading bonding rules from {}.", path.display());
            BondingRules::load(path)?
        }
        None => BondingRules::default(),
    };
    Ok(match config.bond_tolerance {
        Some(tolerance) => rules.with_tolerance(tolerance),
        None => rules,
    })
}

/// Loads a container file into memory.
///
/// # Errors
///
/// Returns [`LoadError::BondingRules`] if the configured rules file cannot be
/// loaded, or [`LoadError::Container`] if the file cannot be opened or
/// decoded.
#[instrument(skip_all, name = "load_workflow", fields(path = %path.display()))]
pub fn run(
    path: &Path,
    config: &LoadConfig,
    reporter: &ProgressReporter,
) -> Result<(Container, AboHeader), LoadError> {
    reporter.report(Progress::PhaseStart {
        name: "Preparation",
    });
    let bonding = resolve_bonding_rules(config)?;
    let reader = abo::open(path)?;
    reporter.report(Progress::PhaseFinish);

    let options = DecodeOptions {
        interpolate_neb: config.interpolate_neb,
        neb_steps: config.neb_steps,
        bonding,
    };
    let (container, header) = abo::decode(reader, &options, reporter)?;

    info!(
        frames = container.nr_frames(),
        neb = container.is_neb_pathway(),
        "Loaded {}.",
        path.display()
    );
    reporter.report(Progress::Message(format!(
        "Loaded {} frame(s) from {} file.",
        container.nr_frames(),
        header.version
    )));
    Ok((container, header))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::abo::{AboFile, FormatVersion};
    use crate::core::io::error::AboError;
    use crate::core::io::traits::ContainerFile;
    use crate::core::models::frame::Frame;
    use crate::core::models::structure::Structure;
    use crate::core::topology::bonding::BondingLoadError;
    use crate::workflows::config::LoadConfigBuilder;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    fn write_pathway(dir: &TempDir) -> PathBuf {
        let container: Container = (0..3)
            .map(|k| {
                let mut structure = Structure::new();
                structure.add_atom(6, k as f64 * 0.1, 0.0, 0.0);
                structure.add_atom(6, 1.9 + k as f64 * 0.1, 0.0, 0.0);
                structure.update();
                Frame::new(structure, format!("image {}", k))
            })
            .collect();
        let path = dir.path().join("path.abo");
        let header = AboHeader::extended(FormatVersion::AbofV2)
            .with_neb_pathway(true)
            .with_compression(true);
        AboFile::write_to_path(&container, &header, &path).unwrap();
        path
    }

    #[test]
    fn default_config_interpolates_pathways() {
        let dir = tempdir().unwrap();
        let path = write_pathway(&dir);
        let (container, header) =
            run(&path, &LoadConfig::default(), &ProgressReporter::new()).unwrap();
        assert!(header.neb_pathway && header.compressed);
        assert_eq!(container.nr_frames(), 21);
        assert_eq!(container.frame(0).unwrap().structure().nr_bonds(), 0);
    }

    #[test]
    fn custom_steps_and_disabled_interpolation() {
        let dir = tempdir().unwrap();
        let path = write_pathway(&dir);

        let config = LoadConfigBuilder::new().neb_steps(3).build().unwrap();
        let (container, _) = run(&path, &config, &ProgressReporter::new()).unwrap();
        assert_eq!(container.nr_frames(), 7);

        let config = LoadConfigBuilder::new().interpolate_neb(false).build().unwrap();
        let (container, _) = run(&path, &config, &ProgressReporter::new()).unwrap();
        assert_eq!(container.nr_frames(), 3);
    }

    #[test]
    fn bond_tolerance_override_changes_derived_bonds() {
        let dir = tempdir().unwrap();
        let path = write_pathway(&dir);
        let config = LoadConfigBuilder::new().bond_tolerance(1.3).build().unwrap();
        let (container, _) = run(&path, &config, &ProgressReporter::new()).unwrap();
        assert_eq!(container.frame(0).unwrap().structure().nr_bonds(), 1);
    }

    #[test]
    fn rules_file_is_applied() {
        let dir = tempdir().unwrap();
        let path = write_pathway(&dir);
        let rules = dir.path().join("rules.toml");
        fs::write(&rules, "[radii]\nC = 0.9\n").unwrap();

        let config = LoadConfigBuilder::new()
            .bonding_rules_path(rules)
            .build()
            .unwrap();
        let (container, _) = run(&path, &config, &ProgressReporter::new()).unwrap();
        assert_eq!(container.frame(0).unwrap().structure().nr_bonds(), 1);
    }

    #[test]
    fn missing_rules_file_is_reported() {
        let dir = tempdir().unwrap();
        let path = write_pathway(&dir);
        let config = LoadConfigBuilder::new()
            .bonding_rules_path(dir.path().join("nope.toml"))
            .build()
            .unwrap();
        assert!(matches!(
            run(&path, &config, &ProgressReporter::new()),
            Err(LoadError::BondingRules {
                source: BondingLoadError::Io { .. }
            })
        ));
    }

    #[test]
    fn missing_container_is_unavailable() {
        let dir = tempdir().unwrap();
        let result = run(
            &dir.path().join("missing.abo"),
            &LoadConfig::default(),
            &ProgressReporter::new(),
        );
        assert!(matches!(
            result,
            Err(LoadError::Container(AboError::Unavailable { .. }))
        ));
    }
}
