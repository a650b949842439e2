use crate::core::models::container::Container;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Defines the interface for reading and writing scene container formats.
///
/// Implementors handle format-specific parsing and serialization; callers
/// only ever see a [`Container`] and the format's metadata.
pub trait ContainerFile {
    /// Format-level information that is not part of the scene itself.
    type Metadata;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a container from a byte source.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl Read) -> Result<(Container, Self::Metadata), Self::Error>;

    /// Writes a container and its metadata to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the container cannot be represented with the
    /// given metadata or writing fails.
    fn write_to(
        container: &Container,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Reads a container from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<(Container, Self::Metadata), Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes a container and its metadata to a file path.
    ///
    /// The writer is flushed before returning so that write errors are not
    /// lost when the buffer is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(
        container: &Container,
        metadata: &Self::Metadata,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(container, metadata, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
