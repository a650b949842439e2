use nalgebra::{Point3, Vector3};
use thiserror::Error;

/// RGBA color with components in `[0, 1]`.
pub type Color = [f32; 4];

const DEFAULT_COLOR: Color = [1.0, 1.0, 1.0, 1.0];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Model has no vertices or no faces")]
    Degenerate,
    #[error("Model has {positions} positions but {normals} normals")]
    NormalCountMismatch { positions: usize, normals: usize },
    #[error("Index buffer length {0} is not a multiple of 3")]
    RaggedIndices(usize),
    #[error("Index {index} at slot {slot} is out of range for {vertices} vertices")]
    IndexOutOfRange {
        slot: usize,
        index: u32,
        vertices: usize,
    },
}

/// A colored triangle mesh attached to a frame, such as an orbital isosurface.
///
/// Positions and normals are parallel arrays; `indices` is a flat triangle
/// list with stride 3. A model is validated on construction and cannot be
/// empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    positions: Vec<Point3<f32>>,
    normals: Vec<Vector3<f32>>,
    indices: Vec<u32>,
    color: Color,
}

impl Model {
    /// Creates a new model from vertex data and a triangle index buffer.
    ///
    /// The color defaults to opaque white; use [`Model::set_color`] to change it.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if the mesh is empty, the normal count does
    /// not match the position count, the index buffer is not a whole number of
    /// triangles, or an index refers to a vertex that does not exist.
    pub fn new(
        positions: Vec<Point3<f32>>,
        normals: Vec<Vector3<f32>>,
        indices: Vec<u32>,
    ) -> Result<Self, ModelError> {
        if positions.is_empty() || indices.is_empty() {
            return Err(ModelError::Degenerate);
        }
        if positions.len() != normals.len() {
            return Err(ModelError::NormalCountMismatch {
                positions: positions.len(),
                normals: normals.len(),
            });
        }
        if indices.len() % 3 != 0 {
            return Err(ModelError::RaggedIndices(indices.len()));
        }
        if let Some((slot, &index)) = indices
            .iter()
            .enumerate()
            .find(|&(_, &index)| index as usize >= positions.len())
        {
            return Err(ModelError::IndexOutOfRange {
                slot,
                index,
                vertices: positions.len(),
            });
        }

        Ok(Self {
            positions,
            normals,
            indices,
            color: DEFAULT_COLOR,
        })
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn positions(&self) -> &[Point3<f32>] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vector3<f32>] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn nr_vertices(&self) -> usize {
        self.positions.len()
    }

    pub fn nr_faces(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the vertex position farthest from the origin.
    pub fn max_dim(&self) -> Point3<f32> {
        self.positions
            .iter()
            .copied()
            .max_by(|a, b| a.coords.norm_squared().total_cmp(&b.coords.norm_squared()))
            .unwrap_or_else(Point3::origin)
    }
}
