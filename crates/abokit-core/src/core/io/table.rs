use super::error::ExportError;
use crate::core::models::container::Container;
use serde::Serialize;
use std::io::Write;

/// One row of the flat atom table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtomRecord<'a> {
    pub frame: usize,
    pub atom: usize,
    pub element: u8,
    pub symbol: &'a str,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Iterates every atom of every frame as table rows.
pub fn records(container: &Container) -> impl Iterator<Item = AtomRecord<'static>> + '_ {
    container
        .frames()
        .iter()
        .enumerate()
        .flat_map(|(frame_idx, frame)| {
            frame
                .structure()
                .atoms()
                .iter()
                .enumerate()
                .map(move |(atom_idx, atom)| AtomRecord {
                    frame: frame_idx,
                    atom: atom_idx,
                    element: atom.element,
                    symbol: atom.symbol(),
                    x: atom.position.x,
                    y: atom.position.y,
                    z: atom.position.z,
                })
        })
}

/// Writes all atoms of `container` as CSV with a header row.
pub fn write_atom_table(container: &Container, writer: impl Write) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records(container) {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}
