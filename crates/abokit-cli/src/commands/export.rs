use super::{Context, load_input};
use crate::cli::{ExportArgs, ExportFormat};
use crate::error::{CliError, Result};
use abokit::core::io::{table, xyz};
use abokit::core::models::container::Container;
use std::fs;
use std::path::Path;
use tracing::info;

pub fn run(args: ExportArgs, ctx: &Context) -> Result<()> {
    let input = load_input(&args.load, ctx)?;
    info!(
        "Exporting {} frame(s) as {:?} to {:?}",
        input.container.nr_frames(),
        args.format,
        &args.output
    );
    export(&input.container, args.format, &args.output)?;
    println!(
        "✓ Exported {} frame(s) to: {}",
        input.container.nr_frames(),
        args.output.display()
    );
    Ok(())
}

fn export(container: &Container, format: ExportFormat, path: &Path) -> Result<()> {
    let to_cli_error = |e: anyhow::Error| CliError::FileWriting {
        path: path.to_path_buf(),
        source: e,
    };
    let mut bytes = Vec::new();
    match format {
        ExportFormat::Xyz => xyz::write_trajectory(container, &mut bytes),
        ExportFormat::Csv => table::write_atom_table(container, &mut bytes),
    }
    .map_err(|e| to_cli_error(e.into()))?;
    fs::write(path, bytes).map_err(|e| to_cli_error(e.into()))
}
