use super::header::{AboHeader, FRAME_FLAG_UNIT_CELL, FormatVersion, MAGIC};
use crate::core::io::compression::{self, DEFAULT_COMPRESSION_LEVEL};
use crate::core::io::error::AboError;
use crate::core::io::normals::{NormalEncoding, encode_octahedral};
use crate::core::models::container::Container;
use crate::core::models::frame::{Frame, unit_cell_to_row_major};
use crate::core::models::model::Model;
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Write;
use tracing::{debug, instrument, warn};

/// Serializes a [`Container`] in one of the supported layouts.
#[derive(Debug, Clone)]
pub struct AboEncoder {
    header: AboHeader,
    level: i32,
}

impl AboEncoder {
    pub fn new(header: AboHeader) -> Self {
        Self {
            header,
            level: DEFAULT_COMPRESSION_LEVEL,
        }
    }

    /// Sets the Zstandard level used when the header requests compression.
    pub fn with_compression_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    pub fn header(&self) -> &AboHeader {
        &self.header
    }

    /// Writes `container` to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`AboError::Unrepresentable`] if the header asks for something
    /// the chosen version cannot store, [`AboError::Overflow`] if a count
    /// does not fit its field, and [`AboError::Io`] if writing fails.
    #[instrument(skip_all, name = "abo_encode", fields(version = %self.header.version))]
    pub fn encode(&self, container: &Container, writer: &mut impl Write) -> Result<(), AboError> {
        let version = self.header.version;
        self.check_representable(container)?;

        if !version.has_frame_flags() {
            let dropped = container
                .frames()
                .iter()
                .filter(|f| f.unit_cell().is_some())
                .count();
            if dropped > 0 {
                warn!(
                    "{} frame(s) carry a unit cell, which {} cannot store; dropping.",
                    dropped, version
                );
            }
        }

        let Some(version_byte) = version.to_byte() else {
            return self.write_body(container, writer);
        };

        writer.write_u16::<LittleEndian>(0)?;
        writer.write_all(MAGIC)?;
        writer.write_u8(version_byte)?;
        writer.write_u8(self.header.flags())?;

        if self.header.compressed {
            let mut body = Vec::new();
            self.write_body(container, &mut body)?;
            let blob = compression::compress(&body, self.level)?;
            debug!(
                "Compressed {} byte body to {} bytes at level {}.",
                body.len(),
                blob.len(),
                self.level
            );
            writer.write_all(&blob)?;
        } else {
            self.write_body(container, writer)?;
        }
        Ok(())
    }

    fn check_representable(&self, container: &Container) -> Result<(), AboError> {
        if self.header.version != FormatVersion::LegacyV0 {
            return Ok(());
        }
        let unrepresentable = |feature| AboError::Unrepresentable {
            feature,
            version: FormatVersion::LegacyV0.name(),
        };
        if self.header.compressed {
            return Err(unrepresentable("compression"));
        }
        if self.header.neb_pathway {
            return Err(unrepresentable("the NEB pathway flag"));
        }
        // A zero frame count is the extended-format sentinel.
        if container.is_empty() {
            return Err(unrepresentable("an empty container"));
        }
        Ok(())
    }

    fn write_body<W: Write>(&self, container: &Container, w: &mut W) -> Result<(), AboError> {
        let nr_frames = to_u16("frames", container.nr_frames())?;
        w.write_u16::<LittleEndian>(nr_frames)?;
        for (idx, frame) in container.frames().iter().enumerate() {
            self.write_frame(idx as u16, frame, w)?;
        }
        Ok(())
    }

    fn write_frame<W: Write>(&self, idx: u16, frame: &Frame, w: &mut W) -> Result<(), AboError> {
        let version = self.header.version;
        w.write_u16::<LittleEndian>(idx)?;

        let description = frame.description().as_bytes();
        w.write_u16::<LittleEndian>(to_u16("description bytes", description.len())?)?;
        w.write_all(description)?;

        if version.has_frame_flags() {
            match frame.unit_cell() {
                Some(cell) => {
                    w.write_u8(FRAME_FLAG_UNIT_CELL)?;
                    for v in unit_cell_to_row_major(cell) {
                        w.write_f32::<LittleEndian>(v)?;
                    }
                }
                None => w.write_u8(0)?,
            }
        }

        let atoms = frame.structure().atoms();
        w.write_u16::<LittleEndian>(to_u16("atoms", atoms.len())?)?;
        for atom in atoms {
            w.write_u8(atom.element)?;
            for v in atom.position.coords.iter() {
                w.write_f32::<LittleEndian>(*v as f32)?;
            }
        }

        w.write_u16::<LittleEndian>(to_u16("models", frame.models().len())?)?;
        for (model_idx, model) in frame.models().iter().enumerate() {
            w.write_u16::<LittleEndian>(model_idx as u16)?;
            write_model(model, version.normal_encoding(), w)?;
        }
        Ok(())
    }
}

fn write_model<W: Write>(model: &Model, encoding: NormalEncoding, w: &mut W) -> Result<(), AboError> {
    for c in model.color() {
        w.write_f32::<LittleEndian>(c)?;
    }

    w.write_u32::<LittleEndian>(to_u32("vertices", model.nr_vertices())?)?;
    for (position, normal) in model.positions().iter().zip(model.normals()) {
        for v in position.coords.iter() {
            w.write_f32::<LittleEndian>(*v)?;
        }
        match encoding {
            NormalEncoding::Float32 => {
                for v in normal.iter() {
                    w.write_f32::<LittleEndian>(*v)?;
                }
            }
            NormalEncoding::Oct16 => {
                let (nx, ny) = encode_octahedral(normal);
                w.write_i16::<LittleEndian>(nx)?;
                w.write_i16::<LittleEndian>(ny)?;
            }
        }
    }

    w.write_u32::<LittleEndian>(to_u32("faces", model.nr_faces())?)?;
    for index in model.indices() {
        w.write_u32::<LittleEndian>(*index)?;
    }
    Ok(())
}

fn to_u16(field: &'static str, value: usize) -> Result<u16, AboError> {
    u16::try_from(value).map_err(|_| AboError::Overflow {
        field,
        value,
        limit: u16::MAX as usize,
    })
}

fn to_u32(field: &'static str, value: usize) -> Result<u32, AboError> {
    u32::try_from(value).map_err(|_| AboError::Overflow {
        field,
        value,
        limit: u32::MAX as usize,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::structure::Structure;

    fn container_of(nr_frames: usize, nr_atoms: usize) -> Container {
        (0..nr_frames)
            .map(|f| {
                let mut structure = Structure::new();
                for a in 0..nr_atoms {
                    structure.add_atom(6, a as f64 * 5.0, f as f64, 0.0);
                }
                structure.update();
                Frame::new(structure, format!("frame {}", f))
            })
            .collect()
    }

    fn encode(header: AboHeader, container: &Container) -> Result<Vec<u8>, AboError> {
        let mut out = Vec::new();
        AboEncoder::new(header).encode(container, &mut out)?;
        Ok(out)
    }

    #[test]
    fn legacy_output_starts_with_frame_count() {
        let bytes = encode(AboHeader::legacy(), &container_of(2, 1)).unwrap();
        assert_eq!(&bytes[..2], &[2, 0]);
        assert_eq!(&bytes[2..4], &[0, 0]);
        assert_eq!(&bytes[4..6], &[7, 0]);
        assert_eq!(&bytes[6..13], b"frame 0");
    }

    #[test]
    fn extended_output_starts_with_header() {
        let header = AboHeader::extended(FormatVersion::AbofV2).with_neb_pathway(true);
        let bytes = encode(header, &container_of(1, 1)).unwrap();
        assert_eq!(&bytes[..8], b"\0\0ABOF\x02\x02");
        assert_eq!(&bytes[8..10], &[1, 0]);
    }

    #[test]
    fn legacy_rejects_features_it_cannot_store() {
        let container = container_of(1, 1);
        for header in [
            AboHeader::legacy().with_compression(true),
            AboHeader::legacy().with_neb_pathway(true),
        ] {
            assert!(matches!(
                encode(header, &container),
                Err(AboError::Unrepresentable { version: "legacy", .. })
            ));
        }
        assert!(matches!(
            encode(AboHeader::legacy(), &Container::new()),
            Err(AboError::Unrepresentable {
                feature: "an empty container",
                ..
            })
        ));
    }

    #[test]
    fn too_many_atoms_overflow() {
        let mut structure = Structure::new();
        for a in 0..=u16::MAX as usize {
            structure.add_atom(1, a as f64, 0.0, 0.0);
        }
        let container: Container = [Frame::new(structure, "big")].into_iter().collect();
        assert!(matches!(
            encode(AboHeader::extended(FormatVersion::AbofV1), &container),
            Err(AboError::Overflow {
                field: "atoms",
                value: 65536,
                ..
            })
        ));
    }

    #[test]
    fn compressed_output_declares_content_size() {
        let container = container_of(3, 4);
        let plain = encode(AboHeader::extended(FormatVersion::AbofV2), &container).unwrap();
        let packed = encode(
            AboHeader::extended(FormatVersion::AbofV2).with_compression(true),
            &container,
        )
        .unwrap();
        assert_eq!(packed[7], 0b01);
        let body = compression::decompress(&packed[8..]).unwrap();
        assert_eq!(body.as_slice(), &plain[8..]);
    }
}
