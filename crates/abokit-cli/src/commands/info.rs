use super::{Context, load_input};
use crate::cli::InfoArgs;
use crate::error::Result;
use abokit::core::io::abo::AboHeader;
use abokit::core::models::container::Container;
use std::fmt::Write;
use tracing::info;

pub fn run(args: InfoArgs, ctx: &Context) -> Result<()> {
    let input = load_input(&args.load, ctx)?;
    info!("Rendering summary of {} frame(s).", input.container.nr_frames());
    print!("{}", render(&input.container, &input.header, args.atoms));
    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// Formats the header and a per-frame summary, optionally listing atoms.
pub fn render(container: &Container, header: &AboHeader, atoms: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Format:      {}", header.version);
    let _ = writeln!(out, "Compressed:  {}", yes_no(header.compressed));
    let _ = writeln!(out, "NEB pathway: {}", yes_no(header.neb_pathway));
    let _ = writeln!(out, "Frames:      {}", container.nr_frames());

    for (idx, frame) in container.frames().iter().enumerate() {
        let structure = frame.structure();
        let _ = writeln!(out);
        let _ = writeln!(out, "[{}] {}", idx, frame.description());
        let _ = writeln!(
            out,
            "    atoms: {}  bonds: {}  elements: {}",
            structure.nr_atoms(),
            structure.nr_bonds(),
            structure.elements_string()
        );
        let _ = writeln!(
            out,
            "    models: {}  unit cell: {}",
            frame.models().len(),
            yes_no(frame.unit_cell().is_some())
        );
        if atoms {
            for (atom_idx, atom) in structure.atoms().iter().enumerate() {
                let p = &atom.position;
                let _ = writeln!(
                    out,
                    "    {:>5} {:<2} {:>12.6} {:>12.6} {:>12.6}",
                    atom_idx,
                    atom.symbol(),
                    p.x,
                    p.y,
                    p.z
                );
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::LoadArgs;
    use crate::commands::test_support::{QUIET, neb_header, sample_container, write_sample};
    use tempfile::tempdir;

    #[test]
    fn summary_lists_header_and_frames() {
        let text = render(&sample_container(), &neb_header(), false);
        assert!(text.contains("Format:      ABOF v2"));
        assert!(text.contains("Compressed:  yes"));
        assert!(text.contains("NEB pathway: yes"));
        assert!(text.contains("Frames:      3"));
        assert!(text.contains("[1] image 1"));
        assert!(text.contains("atoms: 3  bonds: 2"));
        assert_eq!(text.matches("unit cell: yes").count(), 1);
        assert!(!text.contains("    0 O"));
    }

    #[test]
    fn atom_listing_is_optional() {
        let text = render(&sample_container(), &AboHeader::legacy(), true);
        assert!(text.contains("Format:      legacy"));
        assert!(text.contains("    0 O      0.000000"));
        assert_eq!(text.matches(" H  ").count(), 6);
    }

    #[test]
    fn run_reports_missing_input() {
        let dir = tempdir().unwrap();
        let args = InfoArgs {
            load: LoadArgs {
                input: dir.path().join("missing.abo"),
                ..LoadArgs::default()
            },
            atoms: false,
        };
        assert!(run(args, &QUIET).is_err());
    }

    #[test]
    fn run_succeeds_on_a_written_container() {
        let dir = tempdir().unwrap();
        let input = write_sample(dir.path(), "in.abo", neb_header());
        let args = InfoArgs {
            load: LoadArgs {
                input,
                ..LoadArgs::default()
            },
            atoms: true,
        };
        run(args, &QUIET).unwrap();
    }
}
