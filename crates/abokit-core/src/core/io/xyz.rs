use super::error::ExportError;
use crate::core::models::container::Container;
use crate::core::models::frame::Frame;
use std::io::Write;

/// Writes every frame of `container` as a multi-frame XYZ trajectory.
///
/// Each block is the atom count, a comment line holding the frame
/// description, and one `Symbol x y z` row per atom. Newlines inside the
/// description are replaced with spaces so the block layout stays intact.
pub fn write_trajectory(container: &Container, writer: &mut impl Write) -> Result<(), ExportError> {
    for frame in container.frames() {
        write_frame(frame, writer)?;
    }
    Ok(())
}

pub fn write_frame(frame: &Frame, writer: &mut impl Write) -> Result<(), ExportError> {
    let atoms = frame.structure().atoms();
    writeln!(writer, "{}", atoms.len())?;
    writeln!(writer, "{}", frame.description().replace(['\r', '\n'], " "))?;
    for atom in atoms {
        let p = &atom.position;
        writeln!(
            writer,
            "{:<2} {:>12.6} {:>12.6} {:>12.6}",
            atom.symbol(),
            p.x,
            p.y,
            p.z
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::structure::Structure;

    fn frame(description: &str, atoms: &[(u8, f64, f64, f64)]) -> Frame {
        let mut structure = Structure::new();
        for &(e, x, y, z) in atoms {
            structure.add_atom(e, x, y, z);
        }
        structure.update();
        Frame::new(structure, description)
    }

    #[test]
    fn writes_one_block_per_frame() {
        let container: Container = [
            frame("first", &[(8, 0.0, 0.0, 0.0), (1, 0.96, 0.0, 0.0)]),
            frame("second\nline", &[(17, -1.5, 2.25, 3.0)]),
        ]
        .into_iter()
        .collect();

        let mut out = Vec::new();
        write_trajectory(&container, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "2");
        assert_eq!(lines[1], "first");
        assert_eq!(lines[2], "O      0.000000     0.000000     0.000000");
        assert_eq!(lines[3], "H      0.960000     0.000000     0.000000");
        assert_eq!(lines[5], "second line");
        assert_eq!(lines[6], "Cl    -1.500000     2.250000     3.000000");
    }

    #[test]
    fn empty_frame_writes_count_and_comment() {
        let container: Container = [frame("", &[])].into_iter().collect();
        let mut out = Vec::new();
        write_trajectory(&container, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0\n\n");
    }
}
