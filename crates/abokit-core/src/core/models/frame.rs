use super::model::Model;
use super::structure::Structure;
use nalgebra::Matrix3;

/// Unit-cell matrix; each row is one lattice vector.
pub type UnitCell = Matrix3<f32>;

/// One time step of an animation or reaction pathway.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    structure: Structure,
    models: Vec<Model>,
    description: String,
    unit_cell: Option<UnitCell>,
}

impl Frame {
    /// Creates a frame holding the given structure and description, with no
    /// models and no unit cell.
    pub fn new(structure: Structure, description: impl Into<String>) -> Self {
        Self {
            structure,
            models: Vec::new(),
            description: description.into(),
            unit_cell: None,
        }
    }

    pub fn add_model(&mut self, model: Model) {
        self.models.push(model);
    }

    pub fn set_unit_cell(&mut self, unit_cell: Option<UnitCell>) {
        self.unit_cell = unit_cell;
    }

    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn unit_cell(&self) -> Option<&UnitCell> {
        self.unit_cell.as_ref()
    }
}

/// Builds a unit cell from nine values in row-major order.
pub fn unit_cell_from_row_major(values: &[f32; 9]) -> UnitCell {
    Matrix3::from_row_slice(values)
}

/// Flattens a unit cell into nine values in row-major order.
pub fn unit_cell_to_row_major(cell: &UnitCell) -> [f32; 9] {
    let mut values = [0.0; 9];
    for row in 0..3 {
        for col in 0..3 {
            values[row * 3 + col] = cell[(row, col)];
        }
    }
    values
}
