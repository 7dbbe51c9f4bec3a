//! Traversal orders of a stream through the grid.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{error::NetworkError, grid::Shape};

/// Vertical half of a grid corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Up,
    Down,
}

/// Horizontal half of a grid corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Right,
}

/// The corner through which a stream enters the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corner {
    pub vertical: Vertical,
    pub horizontal: Horizontal,
}

/// Direction of travel between two neighbouring cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Order in which a stream visits the cells of the grid.
///
/// The name reads as entry corner then sweep direction: `dr2u` enters at the
/// lower right corner and runs upwards along the first column it meets, then
/// turns back in a zig-zag. Horizontal sweeps run along rows, vertical sweeps
/// along columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FlowOrder {
    #[default]
    Ul2r,
    Dl2r,
    Ur2l,
    Dr2l,
    Ul2d,
    Ur2d,
    Dl2u,
    Dr2u,
}

impl FlowOrder {
    pub const ALL: [Self; 8] = [
        Self::Ul2r,
        Self::Dl2r,
        Self::Ur2l,
        Self::Dr2l,
        Self::Ul2d,
        Self::Ur2d,
        Self::Dl2u,
        Self::Dr2u,
    ];

    /// Every ordered pair of distinct orders, stream 1 first.
    #[must_use]
    pub fn arrangements() -> Vec<[Self; 2]> {
        Self::ALL
            .iter()
            .flat_map(|&first| {
                Self::ALL
                    .iter()
                    .filter(move |&&second| second != first)
                    .map(move |&second| [first, second])
            })
            .collect()
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Ul2r => "ul2r",
            Self::Dl2r => "dl2r",
            Self::Ur2l => "ur2l",
            Self::Dr2l => "dr2l",
            Self::Ul2d => "ul2d",
            Self::Ur2d => "ur2d",
            Self::Dl2u => "dl2u",
            Self::Dr2u => "dr2u",
        }
    }

    #[must_use]
    pub fn start_corner(self) -> Corner {
        let (vertical, horizontal) = match self {
            Self::Ul2r | Self::Ul2d => (Vertical::Up, Horizontal::Left),
            Self::Dl2r | Self::Dl2u => (Vertical::Down, Horizontal::Left),
            Self::Ur2l | Self::Ur2d => (Vertical::Up, Horizontal::Right),
            Self::Dr2l | Self::Dr2u => (Vertical::Down, Horizontal::Right),
        };
        Corner {
            vertical,
            horizontal,
        }
    }

    /// Direction of the first run through the grid.
    #[must_use]
    pub fn sweep(self) -> Direction {
        match self {
            Self::Ul2r | Self::Dl2r => Direction::Right,
            Self::Ur2l | Self::Dr2l => Direction::Left,
            Self::Ul2d | Self::Ur2d => Direction::Down,
            Self::Dl2u | Self::Dr2u => Direction::Up,
        }
    }

    fn is_vertical(self) -> bool {
        matches!(self.sweep(), Direction::Up | Direction::Down)
    }

    /// Row-major grid indices in visiting order.
    ///
    /// The grid of indices is transposed for vertical sweeps, flipped so the
    /// entry corner lands top left, then read row by row with every other
    /// row reversed. Every index in `0..shape.cells()` appears exactly once.
    #[must_use]
    pub fn flatten(self, shape: Shape) -> Vec<usize> {
        let Shape { rows, cols } = shape;
        let mut lines: Vec<Vec<usize>> = if self.is_vertical() {
            (0..cols)
                .map(|c| (0..rows).map(|r| r * cols + c).collect())
                .collect()
        } else {
            (0..rows)
                .map(|r| (0..cols).map(|c| r * cols + c).collect())
                .collect()
        };

        let Corner {
            vertical,
            horizontal,
        } = self.start_corner();
        // After a transpose the line index runs along columns, so the two
        // halves of the corner swap roles.
        let (flip_lines, flip_within) = if self.is_vertical() {
            (horizontal == Horizontal::Right, vertical == Vertical::Down)
        } else {
            (vertical == Vertical::Down, horizontal == Horizontal::Right)
        };
        if flip_lines {
            lines.reverse();
        }
        if flip_within {
            lines.iter_mut().for_each(|line| line.reverse());
        }

        lines
            .into_iter()
            .enumerate()
            .flat_map(|(i, mut line)| {
                if i % 2 == 1 {
                    line.reverse();
                }
                line
            })
            .collect()
    }

    /// Direction of each step along the path, one fewer than the cells.
    #[must_use]
    pub fn directions(self, shape: Shape) -> Vec<Direction> {
        let path = self.flatten(shape);
        path.windows(2)
            .map(|step| {
                let (from, to) = (shape.position(step[0]), shape.position(step[1]));
                if to.0 > from.0 {
                    Direction::Down
                } else if to.0 < from.0 {
                    Direction::Up
                } else if to.1 > from.1 {
                    Direction::Right
                } else {
                    Direction::Left
                }
            })
            .collect()
    }
}

impl fmt::Display for FlowOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FlowOrder {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|order| order.name() == s)
            .ok_or_else(|| NetworkError::UnknownFlowOrder { name: s.to_owned() })
    }
}

impl TryFrom<String> for FlowOrder {
    type Error = NetworkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FlowOrder> for String {
    fn from(order: FlowOrder) -> Self {
        order.name().to_owned()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::super::test_support::SHAPES;
    use super::*;

    #[test]
    fn two_by_two_paths() {
        let shape = Shape::new(2, 2);
        assert_eq!(FlowOrder::Ul2r.flatten(shape), [0, 1, 3, 2]);
        assert_eq!(FlowOrder::Dr2u.flatten(shape), [3, 1, 0, 2]);
        assert_eq!(FlowOrder::Ul2d.flatten(shape), [0, 2, 3, 1]);
        assert_eq!(FlowOrder::Dl2r.flatten(shape), [2, 3, 1, 0]);
    }

    #[test]
    fn three_by_three_snake() {
        let shape = Shape::new(3, 3);
        assert_eq!(
            FlowOrder::Ur2l.flatten(shape),
            [2, 1, 0, 3, 4, 5, 8, 7, 6]
        );
        assert_eq!(
            FlowOrder::Dl2u.flatten(shape),
            [6, 3, 0, 1, 4, 7, 8, 5, 2]
        );
    }

    #[test]
    fn every_cell_visited_once() {
        for (rows, cols) in SHAPES {
            let shape = Shape::new(rows, cols);
            for order in FlowOrder::ALL {
                let path = order.flatten(shape);
                let unique: HashSet<_> = path.iter().copied().collect();
                assert_eq!(path.len(), rows * cols, "{order} on {rows}x{cols}");
                assert_eq!(unique.len(), rows * cols, "{order} on {rows}x{cols}");
                assert!(path.iter().all(|&i| i < rows * cols));
            }
        }
    }

    #[test]
    fn consecutive_cells_are_neighbours() {
        for (rows, cols) in SHAPES {
            let shape = Shape::new(rows, cols);
            for order in FlowOrder::ALL {
                for step in order.flatten(shape).windows(2) {
                    let (a, b) = (shape.position(step[0]), shape.position(step[1]));
                    assert_eq!(a.0.abs_diff(b.0) + a.1.abs_diff(b.1), 1, "{order}");
                }
            }
        }
    }

    #[test]
    fn path_starts_at_entry_corner_and_follows_sweep() {
        let shape = Shape::new(3, 4);
        for order in FlowOrder::ALL {
            let Corner {
                vertical,
                horizontal,
            } = order.start_corner();
            let row = if vertical == Vertical::Up { 0 } else { 2 };
            let col = if horizontal == Horizontal::Left { 0 } else { 3 };
            assert_eq!(order.flatten(shape)[0], row * 4 + col, "{order}");
            assert_eq!(order.directions(shape)[0], order.sweep(), "{order}");
        }
    }

    #[test]
    fn directions_of_a_snake() {
        let directions = FlowOrder::Ul2r.directions(Shape::new(2, 3));
        assert_eq!(
            directions,
            [
                Direction::Right,
                Direction::Right,
                Direction::Down,
                Direction::Left,
                Direction::Left,
            ]
        );
    }

    #[test]
    fn names_round_trip() -> Result<(), NetworkError> {
        for order in FlowOrder::ALL {
            assert_eq!(order.to_string().parse::<FlowOrder>()?, order);
        }
        Ok(())
    }

    #[test]
    fn unknown_name() {
        assert_eq!(
            "u2l".parse::<FlowOrder>(),
            Err(NetworkError::UnknownFlowOrder {
                name: "u2l".to_owned()
            })
        );
    }

    #[test]
    fn fifty_six_arrangements() {
        let arrangements = FlowOrder::arrangements();
        assert_eq!(arrangements.len(), 56);
        assert!(arrangements.iter().all(|[a, b]| a != b));
        let unique: HashSet<_> = arrangements.iter().collect();
        assert_eq!(unique.len(), 56);
    }
}
