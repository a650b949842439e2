use super::frame::Frame;

/// An ordered collection of frames loaded from one scene file.
///
/// Frames are identified solely by their index. A container is populated
/// once by the decoder (or the pathway interpolator) and then handed to
/// consumers for reading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    frames: Vec<Frame>,
    is_neb_pathway: bool,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn frame(&self, idx: usize) -> Option<&Frame> {
        self.frames.get(idx)
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn nr_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn set_is_neb_pathway(&mut self, is_neb_pathway: bool) {
        self.is_neb_pathway = is_neb_pathway;
    }

    pub fn is_neb_pathway(&self) -> bool {
        self.is_neb_pathway
    }

    /// Largest distance from the origin over every atom and model vertex in
    /// every frame. Useful for sizing a camera frustum.
    pub fn max_dim(&self) -> f64 {
        self.frames
            .iter()
            .flat_map(|frame| {
                let atoms = frame
                    .structure()
                    .atoms()
                    .iter()
                    .map(|atom| atom.position.coords.norm());
                let vertices = frame
                    .models()
                    .iter()
                    .map(|model| model.max_dim().coords.norm() as f64);
                atoms.chain(vertices)
            })
            .fold(0.0, f64::max)
    }
}

impl FromIterator<Frame> for Container {
    fn from_iter<I: IntoIterator<Item = Frame>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
            is_neb_pathway: false,
        }
    }
}
