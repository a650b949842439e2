use super::{Context, load_input};
use crate::cli::ConvertArgs;
use crate::config::PartialConvertConfig;
use crate::error::{CliError, Result};
use abokit::core::io::abo::{AboEncoder, AboHeader, FormatVersion};
use abokit::core::models::container::Container;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub fn run(mut args: ConvertArgs, ctx: &Context) -> Result<()> {
    if args.keep_neb {
        args.load.no_interpolation = true;
    }
    let input = load_input(&args.load, ctx)?;

    let encoder = target_encoder(&args, &input.config.convert, &input.header);
    let header = *encoder.header();
    if input.header.neb_pathway && !header.neb_pathway {
        info!("Writing the NEB pathway as a plain sequence of frames.");
    }

    info!(
        "Encoding {} frame(s) as {} (compressed: {}) to {:?}",
        input.container.nr_frames(),
        header.version,
        header.compressed,
        &args.output
    );
    write_container(&input.container, &encoder, &args.output)?;

    println!(
        "✓ Wrote {} frame(s) as {} to: {}",
        input.container.nr_frames(),
        header.version,
        args.output.display()
    );
    Ok(())
}

/// Chooses the output layout: CLI flags first, then configuration, then the
/// layout of the source file.
pub fn target_encoder(
    args: &ConvertArgs,
    config: &PartialConvertConfig,
    source: &AboHeader,
) -> AboEncoder {
    let version = args
        .to
        .or(config.to)
        .map(FormatVersion::from)
        .unwrap_or(source.version);

    let compress = if args.compress {
        true
    } else if args.no_compress {
        false
    } else if let Some(compress) = config.compress {
        compress
    } else {
        source.compressed && version.is_extended()
    };

    let header = if version.is_extended() {
        AboHeader::extended(version)
            .with_compression(compress)
            .with_neb_pathway(args.keep_neb && source.neb_pathway)
    } else {
        if args.keep_neb && source.neb_pathway {
            warn!("The legacy layout has no NEB flag; the pathway is written as plain frames.");
        }
        AboHeader::legacy().with_compression(compress)
    };

    let encoder = AboEncoder::new(header);
    match args.level.or(config.level) {
        Some(level) => encoder.with_compression_level(level),
        None => encoder,
    }
}

/// Encodes fully in memory so a failed encode never touches `path`.
fn write_container(container: &Container, encoder: &AboEncoder, path: &Path) -> Result<()> {
    let to_cli_error = |e: anyhow::Error| CliError::FileWriting {
        path: path.to_path_buf(),
        source: e,
    };
    let mut bytes = Vec::new();
    encoder
        .encode(container, &mut bytes)
        .map_err(|e| to_cli_error(e.into()))?;
    fs::write(path, bytes).map_err(|e| to_cli_error(e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{LoadArgs, TargetVersion};
    use crate::commands::test_support::{QUIET, neb_header, write_sample};
    use abokit::core::io::abo::AboFile;
    use abokit::core::io::traits::ContainerFile;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn args(input: PathBuf, output: PathBuf) -> ConvertArgs {
        ConvertArgs {
            load: LoadArgs {
                input,
                ..LoadArgs::default()
            },
            output,
            to: None,
            compress: false,
            no_compress: false,
            level: None,
            keep_neb: false,
        }
    }

    #[test]
    fn target_defaults_to_source_layout() {
        let source = AboHeader::extended(FormatVersion::AbofV1).with_compression(true);
        let a = args(PathBuf::new(), PathBuf::new());
        let encoder = target_encoder(&a, &PartialConvertConfig::default(), &source);
        assert_eq!(*encoder.header(), source);
    }

    #[test]
    fn cli_flags_win_over_config() {
        let config = PartialConvertConfig {
            to: Some(TargetVersion::V1),
            compress: Some(true),
            level: Some(3),
        };
        let mut a = args(PathBuf::new(), PathBuf::new());
        a.to = Some(TargetVersion::V2);
        a.no_compress = true;
        let encoder = target_encoder(&a, &config, &AboHeader::legacy());
        assert_eq!(*encoder.header(), AboHeader::extended(FormatVersion::AbofV2));

        let a = args(PathBuf::new(), PathBuf::new());
        let encoder = target_encoder(&a, &config, &AboHeader::legacy());
        assert_eq!(
            *encoder.header(),
            AboHeader::extended(FormatVersion::AbofV1).with_compression(true)
        );
    }

    #[test]
    fn legacy_target_does_not_inherit_compression() {
        let mut a = args(PathBuf::new(), PathBuf::new());
        a.to = Some(TargetVersion::Legacy);
        let encoder = target_encoder(&a, &PartialConvertConfig::default(), &neb_header());
        assert_eq!(*encoder.header(), AboHeader::legacy());
    }

    #[test]
    fn pathway_is_written_interpolated_without_flag() {
        let dir = tempdir().unwrap();
        let input = write_sample(dir.path(), "in.abo", neb_header());
        let output = dir.path().join("out.abo");
        run(args(input, output.clone()), &QUIET).unwrap();

        let (container, header) = AboFile::read_from_path(&output).unwrap();
        assert!(!header.neb_pathway);
        assert!(header.compressed);
        assert_eq!(container.nr_frames(), 21);
    }

    #[test]
    fn keep_neb_preserves_flag_and_frames() {
        let dir = tempdir().unwrap();
        let input = write_sample(dir.path(), "in.abo", neb_header());
        let output = dir.path().join("out.abo");
        let mut a = args(input, output.clone());
        a.keep_neb = true;
        a.no_compress = true;
        run(a, &QUIET).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(&bytes[..8], b"\0\0ABOF\x02\x02");
        assert_eq!(&bytes[8..10], &[3, 0]);
    }

    #[test]
    fn failed_conversion_leaves_existing_output_untouched() {
        let dir = tempdir().unwrap();
        let input = write_sample(dir.path(), "in.abo", AboHeader::legacy());
        let before = std::fs::read(&input).unwrap();

        let mut a = args(input.clone(), input.clone());
        a.compress = true;
        assert!(run(a, &QUIET).is_err());
        assert_eq!(std::fs::read(&input).unwrap(), before);
    }

    #[test]
    fn explicit_compression_for_legacy_is_a_write_error() {
        let dir = tempdir().unwrap();
        let input = write_sample(dir.path(), "in.abo", AboHeader::legacy());
        let output = dir.path().join("out.abo");
        let mut a = args(input, output.clone());
        a.compress = true;
        assert!(matches!(
            run(a, &QUIET),
            Err(CliError::FileWriting { path, .. }) if path == output
        ));
    }
}
