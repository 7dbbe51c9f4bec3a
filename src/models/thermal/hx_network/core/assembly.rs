//! Connection graphs and the block matrices of the linear model.
//!
//! Both streams share one node list: the two network inputs, the cells in
//! stream 1's visiting order, then the two network outputs. That cell order is
//! the canonical index `i` of the matrices; stream 1 values occupy rows
//! `0..N` and stream 2 values rows `N..2N`.

use nalgebra::DMatrix;
use petgraph::{graph::DiGraph, visit::EdgeRef};
use uom::si::ratio::ratio;

use super::{StreamId, error::NetworkError, flow_order::FlowOrder, grid::Grid, grid::Shape};

/// A node of a stream's connection graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Input(StreamId),
    /// A cell, by canonical index.
    Cell(usize),
    Output(StreamId),
}

/// Paths, graphs and structural matrices for one shape and pair of orders.
#[derive(Debug, Clone)]
pub struct Assembly {
    /// Row-major grid indices visited by each stream.
    paths: [Vec<usize>; 2],
    graphs: [DiGraph<Node, ()>; 2],
    adjacency: [DMatrix<f64>; 2],
    structure: DMatrix<f64>,
    input: DMatrix<f64>,
    output: DMatrix<f64>,
}

impl Assembly {
    pub fn new(shape: Shape, orders: [FlowOrder; 2]) -> Self {
        let paths = orders.map(|order| order.flatten(shape));
        let n = shape.cells();

        // Canonical index of each row-major grid index.
        let mut canonical = vec![0; n];
        for (i, &cell) in paths[0].iter().enumerate() {
            canonical[cell] = i;
        }

        let graphs = [StreamId::One, StreamId::Two].map(|id| {
            let visits: Vec<usize> = paths[id.index()].iter().map(|&g| canonical[g]).collect();
            connection_graph(n, id, &visits)
        });
        let adjacency = [adjacency(&graphs[0]), adjacency(&graphs[1])];

        let mut structure = DMatrix::zeros(2 * n, 2 * n);
        let mut input = DMatrix::zeros(2 * n, 2);
        let mut output = DMatrix::zeros(2, 2 * n);
        for (k, a) in adjacency.iter().enumerate() {
            let offset = k * n;
            structure
                .view_mut((offset, offset), (n, n))
                .copy_from(&a.view((2, 2), (n, n)).transpose());
            input
                .view_mut((offset, 0), (n, 2))
                .copy_from(&a.view((0, 2), (2, n)).transpose());
            output
                .view_mut((0, offset), (2, n))
                .copy_from(&a.view((2, n + 2), (n, 2)).transpose());
        }

        Self {
            paths,
            graphs,
            adjacency,
            structure,
            input,
            output,
        }
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.paths[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths[0].is_empty()
    }

    /// Row-major grid indices in the order `id` visits them.
    pub fn path(&self, id: StreamId) -> &[usize] {
        &self.paths[id.index()]
    }

    pub fn graph(&self, id: StreamId) -> &DiGraph<Node, ()> {
        &self.graphs[id.index()]
    }

    /// `(N + 4) × (N + 4)` adjacency of the stream's graph.
    pub fn adjacency(&self, id: StreamId) -> &DMatrix<f64> {
        &self.adjacency[id.index()]
    }

    /// `2N × 2N`: row `j` has a one in the column of the node feeding `j`.
    pub fn structure(&self) -> &DMatrix<f64> {
        &self.structure
    }

    /// `2N × 2`: which cells take a network input.
    pub fn input(&self) -> &DMatrix<f64> {
        &self.input
    }

    /// `2 × 2N`: which cells feed a network output.
    pub fn output(&self) -> &DMatrix<f64> {
        &self.output
    }

    /// Block matrix of cell effectivenesses, `[[I - Φ1, Φ1], [Φ2, I - Φ2]]`.
    ///
    /// # Errors
    ///
    /// Fails when a cell's effectiveness cannot be evaluated.
    pub fn phi(&self, grid: &Grid) -> Result<DMatrix<f64>, NetworkError> {
        let n = self.len();
        let mut phi = DMatrix::zeros(2 * n, 2 * n);
        for (i, &g) in self.paths[0].iter().enumerate() {
            let cell = grid.cell(g).ok_or(NetworkError::MissingCell { cell: g })?;
            let [p1, p2] = cell.effectiveness()?.map(|p| p.get::<ratio>());
            phi[(i, i)] = 1. - p1;
            phi[(i, n + i)] = p1;
            phi[(n + i, i)] = p2;
            phi[(n + i, n + i)] = 1. - p2;
        }
        Ok(phi)
    }
}

fn connection_graph(n: usize, id: StreamId, visits: &[usize]) -> DiGraph<Node, ()> {
    let mut graph = DiGraph::with_capacity(n + 4, n + 1);
    let inputs = [StreamId::One, StreamId::Two].map(|s| graph.add_node(Node::Input(s)));
    let cells: Vec<_> = (0..n).map(|i| graph.add_node(Node::Cell(i))).collect();
    let outputs = [StreamId::One, StreamId::Two].map(|s| graph.add_node(Node::Output(s)));

    let mut previous = inputs[id.index()];
    for &i in visits {
        graph.add_edge(previous, cells[i], ());
        previous = cells[i];
    }
    if !visits.is_empty() {
        graph.add_edge(previous, outputs[id.index()], ());
    }
    graph
}

fn adjacency(graph: &DiGraph<Node, ()>) -> DMatrix<f64> {
    let size = graph.node_count();
    let mut a = DMatrix::zeros(size, size);
    for edge in graph.edge_references() {
        a[(edge.source().index(), edge.target().index())] = 1.;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::super::test_support::SHAPES;
    use super::*;

    fn nonzero(row: impl Iterator<Item = f64>) -> usize {
        row.filter(|&x| x != 0.).count()
    }

    #[test]
    fn paths_are_simple_chains() {
        for (rows, cols) in SHAPES {
            let shape = Shape::new(rows, cols);
            let n = shape.cells();
            for [first, second] in FlowOrder::arrangements() {
                let assembly = Assembly::new(shape, [first, second]);
                for id in [StreamId::One, StreamId::Two] {
                    let a = assembly.adjacency(id);
                    assert_eq!(a.nrows(), n + 4);
                    for k in 0..a.nrows() {
                        assert!(nonzero(a.row(k).iter().copied()) <= 1, "{first}/{second}");
                        assert!(nonzero(a.column(k).iter().copied()) <= 1, "{first}/{second}");
                    }
                    // Every cell is entered once and left once.
                    for k in 2..n + 2 {
                        assert_eq!(nonzero(a.row(k).iter().copied()), 1);
                        assert_eq!(nonzero(a.column(k).iter().copied()), 1);
                    }
                    assert_eq!(assembly.graph(id).edge_count(), n + 1);
                }
            }
        }
    }

    #[test]
    fn grid_of_another_shape() {
        let assembly = Assembly::new(Shape::new(2, 2), [FlowOrder::Dr2u, FlowOrder::Ul2r]);
        assert_eq!(
            assembly.phi(&Grid::default()),
            Err(NetworkError::MissingCell { cell: 3 })
        );
    }

    #[test]
    fn two_by_two_blocks() {
        let assembly = Assembly::new(Shape::new(2, 2), [FlowOrder::Dr2u, FlowOrder::Ul2r]);
        assert_eq!(assembly.path(StreamId::One), [3, 1, 0, 2]);
        assert_eq!(assembly.path(StreamId::Two), [0, 1, 3, 2]);

        // Stream 1 runs through canonical cells 0, 1, 2, 3.
        let s = assembly.structure();
        for i in 1..4 {
            assert_eq!(s[(i, i - 1)], 1.);
        }
        // Stream 2 visits grid 0, 1, 3, 2, which are canonical 2, 1, 0, 3.
        assert_eq!(s[(4 + 1, 4 + 2)], 1.);
        assert_eq!(s[(4, 4 + 1)], 1.);
        assert_eq!(s[(4 + 3, 4)], 1.);
        assert_eq!(s.sum(), 6.);

        let input = assembly.input();
        assert_eq!(input[(0, 0)], 1.);
        assert_eq!(input[(4 + 2, 1)], 1.);
        assert_eq!(input.sum(), 2.);

        let output = assembly.output();
        assert_eq!(output[(0, 3)], 1.);
        assert_eq!(output[(1, 4 + 3)], 1.);
        assert_eq!(output.sum(), 2.);
    }

    #[test]
    fn single_cell() {
        let assembly = Assembly::new(Shape::new(1, 1), [FlowOrder::Ul2r, FlowOrder::Dr2u]);
        assert_eq!(assembly.structure().sum(), 0.);
        assert_eq!(assembly.input().as_slice(), [1., 0., 0., 1.]);
        assert_eq!(assembly.output().as_slice(), [1., 0., 0., 1.]);
    }
}
