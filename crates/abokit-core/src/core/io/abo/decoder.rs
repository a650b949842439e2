use super::header::{AboHeader, FRAME_FLAG_UNIT_CELL, FormatVersion, MAGIC};
use crate::core::io::compression;
use crate::core::io::cursor::{ByteCursor, capacity_hint};
use crate::core::io::error::{AboError, UnsupportedFormatKind};
use crate::core::io::normals::{NormalEncoding, decode_octahedral};
use crate::core::models::container::Container;
use crate::core::models::frame::{Frame, unit_cell_from_row_major};
use crate::core::models::model::Model;
use crate::core::models::structure::Structure;
use crate::core::topology::bonding::BondingRules;
use crate::pathway::neb::{self, NEB_STEPS};
use crate::progress::{Progress, ProgressReporter};
use nalgebra::{Point3, Vector3};
use std::io::{Cursor, Read};
use tracing::{debug, info, instrument, trace};

/// Knobs that affect how a decoded file is turned into a [`Container`].
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeOptions {
    /// Densify containers flagged as NEB pathways.
    pub interpolate_neb: bool,
    /// Synthetic frames per segment when interpolating.
    pub neb_steps: usize,
    /// Criterion used to derive bonds for every frame.
    pub bonding: BondingRules,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            interpolate_neb: true,
            neb_steps: NEB_STEPS,
            bonding: BondingRules::default(),
        }
    }
}

/// Decodes a complete ABO/ABOF container from `reader`.
///
/// The legacy layout is recognised by a non-zero leading frame count; a zero
/// count introduces the `ABOF` header. Compressed bodies are inflated in
/// memory and parsed from there. Decoding is all-or-nothing: any error
/// aborts the call and no partial container is returned.
///
/// # Errors
///
/// Returns [`AboError::Truncated`] on a short read anywhere in the input,
/// [`AboError::UnsupportedFormat`] for a bad magic or version,
/// [`AboError::CorruptPayload`] if decompression fails, and
/// [`AboError::InvalidModel`] for a mesh with out-of-range indices.
#[instrument(skip_all, name = "abo_decode")]
pub fn decode<R: Read>(
    reader: R,
    options: &DecodeOptions,
    reporter: &ProgressReporter,
) -> Result<(Container, AboHeader), AboError> {
    let mut cursor = ByteCursor::new(reader);
    let nr_frames_raw = cursor.read_u16()?;

    let (header, frames) = if nr_frames_raw != 0 {
        let header = AboHeader::legacy();
        debug!("No ABOF header; reading legacy container.");
        let frames = decode_frames(&mut cursor, nr_frames_raw, header.version, options, reporter)?;
        report_trailing(&mut cursor);
        (header, frames)
    } else {
        let header = read_extended_header(&mut cursor)?;
        debug!(
            compressed = header.compressed,
            neb = header.neb_pathway,
            "Read {} header.",
            header.version
        );
        let frames = if header.compressed {
            let blob = cursor.read_to_end()?;
            let payload = compression::decompress(&blob)?;
            let mut body = ByteCursor::new(Cursor::new(payload));
            decode_body(&mut body, header.version, options, reporter)?
        } else {
            decode_body(&mut cursor, header.version, options, reporter)?
        };
        (header, frames)
    };

    let frames = if header.neb_pathway && options.interpolate_neb {
        neb::interpolate(frames, options.neb_steps, &options.bonding, reporter)
    } else {
        frames
    };

    let mut container: Container = frames.into_iter().collect();
    container.set_is_neb_pathway(header.neb_pathway);
    info!(
        frames = container.nr_frames(),
        "Decoded {} container.", header.version
    );
    Ok((container, header))
}

fn read_extended_header<R: Read>(cursor: &mut ByteCursor<R>) -> Result<AboHeader, AboError> {
    let magic = cursor.read_array::<4>()?;
    if &magic != MAGIC {
        return Err(UnsupportedFormatKind::BadMagic(magic).into());
    }
    let [version_byte, flags] = cursor.read_array::<2>()?;
    let version = FormatVersion::from_byte(version_byte)?;
    Ok(AboHeader::from_flags(version, flags))
}

fn decode_body<R: Read>(
    cursor: &mut ByteCursor<R>,
    version: FormatVersion,
    options: &DecodeOptions,
    reporter: &ProgressReporter,
) -> Result<Vec<Frame>, AboError> {
    let nr_frames = cursor.read_u16()?;
    let frames = decode_frames(cursor, nr_frames, version, options, reporter)?;
    report_trailing(cursor);
    Ok(frames)
}

fn report_trailing<R: Read>(cursor: &mut ByteCursor<R>) {
    let end = cursor.offset();
    if cursor.read_u8().is_ok() {
        debug!("Ignoring trailing bytes after offset {}.", end);
    }
}

fn decode_frames<R: Read>(
    cursor: &mut ByteCursor<R>,
    nr_frames: u16,
    version: FormatVersion,
    options: &DecodeOptions,
    reporter: &ProgressReporter,
) -> Result<Vec<Frame>, AboError> {
    reporter.report(Progress::PhaseStart { name: "Decoding" });
    reporter.report(Progress::TaskStart {
        total_steps: nr_frames as u64,
    });

    let mut frames = Vec::with_capacity(nr_frames as usize);
    for frame_idx in 0..nr_frames as usize {
        frames.push(decode_frame(cursor, frame_idx, version, &options.bonding)?);
        reporter.report(Progress::TaskIncrement);
    }

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    Ok(frames)
}

fn decode_frame<R: Read>(
    cursor: &mut ByteCursor<R>,
    frame_idx: usize,
    version: FormatVersion,
    bonding: &BondingRules,
) -> Result<Frame, AboError> {
    // Stored index is redundant with record order.
    let _ = cursor.read_u16()?;

    let desc_len = cursor.read_u16()? as usize;
    let description = String::from_utf8_lossy(&cursor.read_bytes(desc_len)?).into_owned();

    let unit_cell = if version.has_frame_flags() {
        let frame_flags = cursor.read_u8()?;
        if frame_flags & FRAME_FLAG_UNIT_CELL != 0 {
            Some(unit_cell_from_row_major(&cursor.read_f32s::<9>()?))
        } else {
            None
        }
    } else {
        None
    };

    let nr_atoms = cursor.read_u16()?;
    let mut structure = Structure::new();
    for _ in 0..nr_atoms {
        let element = cursor.read_u8()?;
        let [x, y, z] = cursor.read_f32s::<3>()?;
        structure.add_atom(element, x as f64, y as f64, z as f64);
    }
    structure.update_with(bonding);

    let mut frame = Frame::new(structure, description);
    frame.set_unit_cell(unit_cell);

    let nr_models = cursor.read_u16()?;
    for model_idx in 0..nr_models as usize {
        if let Some(model) =
            decode_model(cursor, frame_idx, model_idx, version.normal_encoding())?
        {
            frame.add_model(model);
        }
    }

    trace!(
        frame = frame_idx,
        atoms = nr_atoms,
        models = frame.models().len(),
        "Decoded frame record."
    );
    Ok(frame)
}

fn decode_model<R: Read>(
    cursor: &mut ByteCursor<R>,
    frame_idx: usize,
    model_idx: usize,
    encoding: NormalEncoding,
) -> Result<Option<Model>, AboError> {
    let _ = cursor.read_u16()?;
    let color = cursor.read_f32s::<4>()?;

    let nr_vertices = cursor.read_u32()? as usize;
    let mut positions = Vec::with_capacity(capacity_hint(nr_vertices));
    let mut normals = Vec::with_capacity(capacity_hint(nr_vertices));
    for _ in 0..nr_vertices {
        positions.push(Point3::from(cursor.read_f32s::<3>()?));
        let normal = match encoding {
            NormalEncoding::Float32 => Vector3::from(cursor.read_f32s::<3>()?),
            NormalEncoding::Oct16 => {
                let nx = cursor.read_i16()?;
                let ny = cursor.read_i16()?;
                decode_octahedral(nx, ny)
            }
        };
        normals.push(normal);
    }

    let nr_faces = cursor.read_u32()? as usize;
    let nr_indices = nr_faces.checked_mul(3).ok_or(AboError::Overflow {
        field: "face indices",
        value: nr_faces,
        limit: usize::MAX / 3,
    })?;
    let indices = cursor.read_u32s(nr_indices)?;

    if nr_vertices == 0 || nr_faces == 0 {
        debug!(
            frame = frame_idx,
            model = model_idx,
            "Dropping empty model ({} vertices, {} faces).",
            nr_vertices,
            nr_faces
        );
        return Ok(None);
    }

    let model = Model::new(positions, normals, indices)
        .map_err(|source| AboError::InvalidModel {
            frame: frame_idx,
            model: model_idx,
            source,
        })?
        .with_color(color);
    Ok(Some(model))
}
