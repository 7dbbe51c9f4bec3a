//! Grid shape and the equal-cells builder.

use serde::{Deserialize, Serialize};

use crate::support::hx::{Conductance, Stream};

use super::{cell::Cell, cell::CellKind, error::NetworkError};

/// Number of rows and columns of the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    #[must_use]
    pub const fn cells(&self) -> usize {
        self.rows * self.cols
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.cells() == 0
    }

    /// `(row, col)` of a row-major index.
    #[must_use]
    pub const fn position(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }
}

/// Baffle and tube-pass layout of a shell-and-tube exchanger.
///
/// Tube passes become rows and the compartments between baffles become
/// columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellLayout {
    pub baffles: usize,
    pub tube_passes: usize,
}

impl TryFrom<ShellLayout> for Shape {
    type Error = NetworkError;

    fn try_from(layout: ShellLayout) -> Result<Self, Self::Error> {
        let ShellLayout {
            baffles,
            tube_passes,
        } = layout;
        if tube_passes == 0 || (tube_passes == 1 && baffles == 1) {
            return Err(NetworkError::InvalidShellLayout {
                baffles,
                tube_passes,
            });
        }
        Ok(Shape::new(tube_passes, baffles + 1))
    }
}

/// Cells of the network in row-major order.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    shape: Shape,
    cells: Vec<Cell>,
}

impl Grid {
    /// Fills `shape` with identical cells sharing `total` equally.
    ///
    /// Every cell starts with independent copies of the two input streams.
    /// A shape without cells leaves the grid empty.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InputsNotDefined`] if either input is missing.
    pub fn fill(
        shape: Shape,
        kind: CellKind,
        total: &Conductance,
        inputs: [Option<&Stream>; 2],
    ) -> Result<Self, NetworkError> {
        let [Some(first), Some(second)] = inputs else {
            return Err(NetworkError::InputsNotDefined);
        };
        if shape.is_empty() {
            tracing::debug!(rows = shape.rows, cols = shape.cols, "grid has no area");
            return Ok(Self {
                shape,
                cells: Vec::new(),
            });
        }

        let conductance = total.split(shape.cells())?;
        let cells = (0..shape.cells())
            .map(|index| Cell::new(index, kind, conductance, [first.clone(), second.clone()]))
            .collect();
        tracing::debug!(
            rows = shape.rows,
            cols = shape.cols,
            cell_kind = %kind,
            "filled grid"
        );
        Ok(Self { shape, cells })
    }

    #[must_use]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub(super) fn cell_mut(&mut self, index: usize) -> Option<&mut Cell> {
        self.cells.get_mut(index)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use uom::si::{f64::ThermalConductance, thermal_conductance::watt_per_kelvin};

    use super::super::test_support::{hot_and_cold_water, total_ua};
    use super::*;

    #[test]
    fn cells_share_conductance() -> Result<(), NetworkError> {
        let [hot, cold] = hot_and_cold_water()?;
        let grid = Grid::fill(
            Shape::new(2, 3),
            CellKind::CrossFlowOneRow,
            &total_ua(6000.)?,
            [Some(&hot), Some(&cold)],
        )?;

        assert_eq!(grid.cells().len(), 6);
        for cell in grid.cells() {
            assert_relative_eq!(cell.conductance().ua().get::<watt_per_kelvin>(), 1000.);
            assert_eq!(cell.kind(), CellKind::CrossFlowOneRow);
        }
        Ok(())
    }

    #[test]
    fn missing_input() -> Result<(), NetworkError> {
        let [hot, _] = hot_and_cold_water()?;
        let filled = Grid::fill(
            Shape::new(2, 2),
            CellKind::CounterCurrentFlow,
            &total_ua(1000.)?,
            [Some(&hot), None],
        );
        assert!(matches!(filled, Err(NetworkError::InputsNotDefined)));
        Ok(())
    }

    #[test]
    fn empty_shape_is_a_no_op() -> Result<(), NetworkError> {
        let [hot, cold] = hot_and_cold_water()?;
        let grid = Grid::fill(
            Shape::new(0, 4),
            CellKind::ParallelFlow,
            &Conductance::from_ua(ThermalConductance::new::<watt_per_kelvin>(1000.))?,
            [Some(&hot), Some(&cold)],
        )?;
        assert!(grid.is_empty());
        Ok(())
    }

    #[test]
    fn shell_layout_to_shape() -> Result<(), NetworkError> {
        let shape = Shape::try_from(ShellLayout {
            baffles: 3,
            tube_passes: 2,
        })?;
        assert_eq!(shape, Shape::new(2, 4));

        let single = Shape::try_from(ShellLayout {
            baffles: 0,
            tube_passes: 1,
        })?;
        assert_eq!(single, Shape::new(1, 1));
        Ok(())
    }

    #[test]
    fn impossible_shell_layouts() {
        for (baffles, tube_passes) in [(1, 1), (2, 0)] {
            let layout = ShellLayout {
                baffles,
                tube_passes,
            };
            assert_eq!(
                Shape::try_from(layout),
                Err(NetworkError::InvalidShellLayout {
                    baffles,
                    tube_passes
                })
            );
        }
    }
}
