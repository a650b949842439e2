//! The ABO scene container and its `ABOF` extension.
//!
//! All integers and floats are little-endian. A file either starts with a
//! non-zero `u16` frame count (legacy layout) or with a zero sentinel
//! followed by `"ABOF"`, a version byte (1 or 2) and a flags byte. Extended
//! bodies may be Zstandard-compressed as a whole, store normals as 16-bit
//! octahedral pairs, and (version 2) attach a unit cell to each frame.

pub mod decoder;
pub mod encoder;
pub mod header;

pub use decoder::{DecodeOptions, decode};
pub use encoder::AboEncoder;
pub use header::{AboHeader, FormatVersion};

use crate::core::io::error::AboError;
use crate::core::io::traits::ContainerFile;
use crate::core::models::container::Container;
use crate::progress::ProgressReporter;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

/// Opens a container file for decoding.
///
/// # Errors
///
/// Returns [`AboError::Unavailable`] if the file cannot be opened.
pub fn open(path: &Path) -> Result<BufReader<File>, AboError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| AboError::Unavailable {
            path: path.to_path_buf(),
            source,
        })
}

pub struct AboFile;

impl ContainerFile for AboFile {
    type Metadata = AboHeader;
    type Error = AboError;

    fn read_from(reader: &mut impl Read) -> Result<(Container, Self::Metadata), Self::Error> {
        decode(reader, &DecodeOptions::default(), &ProgressReporter::new())
    }

    fn write_to(
        container: &Container,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        AboEncoder::new(*metadata).encode(container, writer)
    }

    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<(Container, Self::Metadata), Self::Error> {
        let reader = open(path.as_ref())?;
        decode(reader, &DecodeOptions::default(), &ProgressReporter::new())
    }
}
