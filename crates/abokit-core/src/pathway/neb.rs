use super::spline::{catmull_rom, control_indices};
use crate::core::models::atom::Atom;
use crate::core::models::frame::Frame;
use crate::core::models::structure::Structure;
use crate::core::topology::bonding::BondingRules;
use crate::progress::{Progress, ProgressReporter};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Number of synthetic frames emitted per pair of consecutive images.
pub const NEB_STEPS: usize = 10;

/// Reason a frame sequence cannot be interpolated as a pathway.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViabilityError {
    #[error("pathway has {0} frame(s); at least 2 are required")]
    TooFewFrames(usize),
    #[error("the first frame has no atoms")]
    EmptyReference,
    #[error("frame {frame} has {found} atoms, expected {expected}")]
    AtomCountMismatch {
        frame: usize,
        expected: usize,
        found: usize,
    },
    #[error("atom {atom} of frame {frame} has element {found}, expected {expected}")]
    ElementMismatch {
        frame: usize,
        atom: usize,
        expected: u8,
        found: u8,
    },
}

/// Checks that every frame describes the same atoms, in the same order, as
/// the first frame.
pub fn check_viability(frames: &[Frame]) -> Result<(), ViabilityError> {
    if frames.len() < 2 {
        return Err(ViabilityError::TooFewFrames(frames.len()));
    }
    let reference = frames[0].structure().atoms();
    if reference.is_empty() {
        return Err(ViabilityError::EmptyReference);
    }

    for (frame_idx, frame) in frames.iter().enumerate().skip(1) {
        let atoms = frame.structure().atoms();
        if atoms.len() != reference.len() {
            return Err(ViabilityError::AtomCountMismatch {
                frame: frame_idx,
                expected: reference.len(),
                found: atoms.len(),
            });
        }
        if let Some((atom_idx, (expected, found))) = reference
            .iter()
            .zip(atoms)
            .enumerate()
            .find(|(_, (a, b))| a.element != b.element)
        {
            return Err(ViabilityError::ElementMismatch {
                frame: frame_idx,
                atom: atom_idx,
                expected: expected.element,
                found: found.element,
            });
        }
    }
    Ok(())
}

/// Densifies a reaction pathway.
///
/// For every pair of consecutive images `steps` synthetic frames are emitted
/// at `t = 0, 1/steps, ..., (steps-1)/steps`, followed by the last input
/// frame unchanged, for `(K-1) * steps + 1` frames in total. Synthetic
/// frames carry no models and no unit cell; their bonds are derived with
/// `rules`.
///
/// If the frames fail [`check_viability`] they are returned unchanged and a
/// warning is logged.
#[instrument(skip_all, name = "neb_interpolation", fields(frames = frames.len(), steps = steps))]
pub fn interpolate(
    frames: Vec<Frame>,
    steps: usize,
    rules: &BondingRules,
    reporter: &ProgressReporter,
) -> Vec<Frame> {
    if let Err(reason) = check_viability(&frames) {
        warn!("NEB interpolation skipped: {}. Using frames as stored.", reason);
        return frames;
    }

    let steps = steps.max(1);
    let nr_segments = frames.len() - 1;
    info!(
        segments = nr_segments,
        "Interpolating NEB pathway with {} steps per segment.", steps
    );

    reporter.report(Progress::PhaseStart {
        name: "NEB Interpolation",
    });
    reporter.report(Progress::TaskStart {
        total_steps: nr_segments as u64,
    });

    let mut output = Vec::with_capacity(nr_segments * steps + 1);
    for segment in 0..nr_segments {
        let [i0, i1, i2, i3] = control_indices(segment, frames.len());
        let controls = [
            frames[i0].structure().atoms(),
            frames[i1].structure().atoms(),
            frames[i2].structure().atoms(),
            frames[i3].structure().atoms(),
        ];

        for step in 0..steps {
            let t = step as f64 / steps as f64;
            let atoms = interpolate_atoms(&controls, t);
            let structure = Structure::from_atoms(atoms, rules);
            output.push(Frame::new(
                structure,
                format!("NEB interpolated frame {} t={}", segment, t),
            ));
        }
        debug!(segment, "Segment interpolated.");
        reporter.report(Progress::TaskIncrement);
    }

    if let Some(last) = frames.into_iter().last() {
        output.push(last);
    }

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    output
}

fn interpolate_atoms(controls: &[&[Atom]; 4], t: f64) -> Vec<Atom> {
    let [f0, f1, f2, f3] = controls;
    f1.iter()
        .enumerate()
        .map(|(idx, atom)| {
            let position = catmull_rom(
                &f0[idx].position,
                &atom.position,
                &f2[idx].position,
                &f3[idx].position,
                t,
            );
            Atom::at(atom.element, position)
        })
        .collect()
}
