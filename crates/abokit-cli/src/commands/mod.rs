pub mod convert;
pub mod export;
pub mod info;

use crate::cli::LoadArgs;
use crate::config::PartialConfig;
use crate::error::Result;
use crate::progress::CliProgressHandler;
use abokit::core::io::abo::AboHeader;
use abokit::core::models::container::Container;
use abokit::progress::ProgressReporter;
use abokit::workflows;
use std::path::Path;
use tracing::info;

/// Settings shared by every subcommand.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub config_path: Option<&'a Path>,
    pub show_progress: bool,
}

pub struct LoadedInput {
    pub container: Container,
    pub header: AboHeader,
    /// The merged file and `--set` configuration, for command-specific keys.
    pub config: PartialConfig,
}

/// Merges configuration sources and runs the load workflow on `args.input`.
pub fn load_input(args: &LoadArgs, ctx: &Context) -> Result<LoadedInput> {
    let mut config = PartialConfig::from_optional_file(ctx.config_path)?;
    info!("Merging configuration from file and CLI arguments...");
    let load_config = config.merge_with_cli(args)?;

    let progress_handler = CliProgressHandler::new(ctx.show_progress);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Loading container from {:?}", &args.input);
    let result = workflows::load::run(&args.input, &load_config, &reporter);
    progress_handler.finish();
    let (container, header) = result?;

    Ok(LoadedInput {
        container,
        header,
        config,
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use abokit::core::io::abo::{AboFile, AboHeader, FormatVersion};
    use abokit::core::io::traits::ContainerFile;
    use abokit::core::models::container::Container;
    use abokit::core::models::frame::Frame;
    use abokit::core::models::structure::Structure;
    use nalgebra::Matrix3;
    use std::path::{Path, PathBuf};

    pub const QUIET: super::Context<'static> = super::Context {
        config_path: None,
        show_progress: false,
    };

    /// Three water-like frames; the middle one carries a unit cell.
    pub fn sample_container() -> Container {
        (0..3)
            .map(|k| {
                let dx = k as f64 * 0.05;
                let mut structure = Structure::new();
                structure.add_atom(8, dx, 0.0, 0.0);
                structure.add_atom(1, 0.96 + dx, 0.0, 0.0);
                structure.add_atom(1, -0.24 + dx, 0.93, 0.0);
                structure.update();
                let mut frame = Frame::new(structure, format!("image {}", k));
                if k == 1 {
                    frame.set_unit_cell(Some(Matrix3::identity() * 10.0));
                }
                frame
            })
            .collect()
    }

    pub fn write_sample(dir: &Path, name: &str, header: AboHeader) -> PathBuf {
        let path = dir.join(name);
        AboFile::write_to_path(&sample_container(), &header, &path).unwrap();
        path
    }

    pub fn neb_header() -> AboHeader {
        AboHeader::extended(FormatVersion::AbofV2)
            .with_compression(true)
            .with_neb_pathway(true)
    }
}
