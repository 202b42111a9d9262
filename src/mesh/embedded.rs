//! Embedded-boundary geometry fractions.
//!
//! An embedded boundary cuts through the structured grid, leaving partially
//! open cells and faces. Its geometry is precomputed externally (from an
//! implicit surface description at grid-generation time) and consumed here
//! as two read-only fields:
//!
//! - per-face open-area fraction in `[0, 1]`, one field per direction;
//! - per-cell open-volume fraction in `[0, 1]`.
//!
//! A face with zero area fraction contributes no flux; a cell with zero
//! volume fraction is excluded from the conservative update.

use thiserror::Error;

use crate::mesh::{IndexBox, IVec};
use crate::state::Field;
use crate::types::Direction;

/// Error type for embedded-geometry construction.
#[derive(Debug, Error)]
pub enum EmbeddedError {
    /// A fraction value lies outside [0, 1].
    #[error("fraction out of range at {iv:?}: {value}")]
    FractionOutOfRange { iv: IVec, value: f64 },

    /// Wrong number of per-direction area fields.
    #[error("expected {expected} area-fraction fields, got {got}")]
    AreaCount { expected: usize, got: usize },

    /// A fraction field carries more than one component.
    #[error("fraction fields must have exactly one component, got {0}")]
    ComponentCount(usize),
}

/// Embedded-boundary open-area and open-volume fractions for one block.
#[derive(Clone, Debug)]
pub struct EmbeddedGeometry {
    /// Face-centered open-area fraction per direction (length = ndim)
    area: Vec<Field>,
    /// Cell-centered open-volume fraction
    volfrac: Field,
}

impl EmbeddedGeometry {
    /// Build from precomputed fraction fields, validating ranges.
    pub fn new(area: Vec<Field>, volfrac: Field, ndim: usize) -> Result<Self, EmbeddedError> {
        if area.len() != ndim {
            return Err(EmbeddedError::AreaCount {
                expected: ndim,
                got: area.len(),
            });
        }
        for field in area.iter().chain(std::iter::once(&volfrac)) {
            if field.ncomp() != 1 {
                return Err(EmbeddedError::ComponentCount(field.ncomp()));
            }
            for iv in field.region().iter() {
                let value = field.at(iv, 0);
                if !(0.0..=1.0).contains(&value) {
                    return Err(EmbeddedError::FractionOutOfRange {
                        iv,
                        value: value as f64,
                    });
                }
            }
        }
        Ok(Self { area, volfrac })
    }

    /// Geometry for a block untouched by the embedded boundary: every face
    /// and cell fully open.
    pub fn fully_open(cells: &IndexBox, ndim: usize) -> Self {
        let area = Direction::ALL[..ndim]
            .iter()
            .map(|&dir| {
                let mut f = Field::new(cells.surrounding_nodes(dir), 1);
                f.fill(1.0);
                f
            })
            .collect();
        let mut volfrac = Field::new(*cells, 1);
        volfrac.fill(1.0);
        Self { area, volfrac }
    }

    /// Open-area fraction field for faces normal to `dir`.
    #[inline]
    pub fn area(&self, dir: Direction) -> &Field {
        &self.area[dir.index()]
    }

    /// Open-volume fraction field.
    #[inline]
    pub fn volfrac(&self) -> &Field {
        &self.volfrac
    }

    /// Whether a cell is completely covered by the boundary.
    #[inline]
    pub fn is_covered(&self, iv: IVec) -> bool {
        self.volfrac.at(iv, 0) <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fully_open() {
        let bx = IndexBox::new_2d(0, 0, 3, 3);
        let eb = EmbeddedGeometry::fully_open(&bx, 2);
        assert_eq!(eb.area(Direction::X).region().size(), [5, 4, 1]);
        assert_eq!(eb.volfrac().region().size(), [4, 4, 1]);
        assert!(!eb.is_covered(IVec::new(2, 2, 0)));
        for iv in bx.iter() {
            assert_eq!(eb.volfrac().at(iv, 0), 1.0);
        }
    }

    #[test]
    fn test_rejects_out_of_range_fraction() {
        let bx = IndexBox::new_2d(0, 0, 1, 1);
        let mut vol = Field::new(bx, 1);
        vol.fill(1.5);
        let area = vec![
            Field::new(bx.surrounding_nodes(Direction::X), 1),
            Field::new(bx.surrounding_nodes(Direction::Y), 1),
        ];
        assert!(matches!(
            EmbeddedGeometry::new(area, vol, 2),
            Err(EmbeddedError::FractionOutOfRange { .. })
        ));
    }

    #[test]
    fn test_rejects_wrong_area_count() {
        let bx = IndexBox::new_2d(0, 0, 1, 1);
        let vol = Field::new(bx, 1);
        let area = vec![Field::new(bx.surrounding_nodes(Direction::X), 1)];
        assert!(matches!(
            EmbeddedGeometry::new(area, vol, 2),
            Err(EmbeddedError::AreaCount { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn test_covered_cell() {
        let bx = IndexBox::new_2d(0, 0, 1, 1);
        let mut vol = Field::new(bx, 1);
        vol.fill(1.0);
        vol.set(IVec::new(0, 0, 0), 0, 0.0);
        let area = vec![
            Field::new(bx.surrounding_nodes(Direction::X), 1),
            Field::new(bx.surrounding_nodes(Direction::Y), 1),
        ];
        let eb = EmbeddedGeometry::new(area, vol, 2).unwrap();
        assert!(eb.is_covered(IVec::new(0, 0, 0)));
        assert!(!eb.is_covered(IVec::new(1, 1, 0)));
    }
}
