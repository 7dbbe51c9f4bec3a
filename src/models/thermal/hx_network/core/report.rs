//! Plain-text summaries of a network.

use std::fmt::{self, Write};

use uom::si::{
    power::kilowatt, ratio::ratio, thermal_conductance::watt_per_kelvin,
    thermodynamic_temperature::kelvin,
};

use super::{Cell, HxNetwork, StreamId};

impl fmt::Display for HxNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape = self.shape();
        writeln!(
            f,
            "heat exchanger network: {} x {} {} cells, UA {:.1} W/K",
            shape.rows,
            shape.cols,
            self.cell_kind(),
            self.total_ua().ua().get::<watt_per_kelvin>(),
        )?;
        writeln!(
            f,
            "flow orders: stream 1 {}, stream 2 {}",
            self.flow_order(StreamId::One),
            self.flow_order(StreamId::Two),
        )?;

        let heat_rates = self.heat_rates().ok();
        for id in StreamId::BOTH {
            let Some(input) = self.input(id) else {
                writeln!(f, "stream {id}: not connected")?;
                continue;
            };
            write!(
                f,
                "stream {id}: {} in {:.2} K",
                input.inlet().substance(),
                input.inlet().temperature().get::<kelvin>(),
            )?;
            if let (Some(output), false) = (self.output(id), self.is_dirty()) {
                write!(
                    f,
                    ", out {:.2} K",
                    output.inlet().temperature().get::<kelvin>()
                )?;
            }
            if let Some(heat_rates) = heat_rates {
                write!(
                    f,
                    ", released {:.3} kW",
                    heat_rates[id.index()].get::<kilowatt>()
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl HxNetwork {
    /// The [`Display`](fmt::Display) summary followed by one line per cell in
    /// stream 1 order.
    #[must_use]
    pub fn extended_report(&self) -> String {
        let mut report = self.to_string();
        let Ok(assembly) = self.assembly() else {
            report.push_str("cells: not computed\n");
            return report;
        };
        for (i, &g) in assembly.path(StreamId::One).iter().enumerate() {
            if let Some(cell) = self.grid().cell(g) {
                // Writing to a `String` cannot fail.
                let _ = cell_line(&mut report, i, self.shape().position(g), cell);
            }
        }
        report
    }
}

fn cell_line(
    out: &mut String,
    i: usize,
    (row, col): (usize, usize),
    cell: &Cell,
) -> fmt::Result {
    write!(
        out,
        "cell {i} ({row}, {col}): UA {:.2} W/K",
        cell.conductance().ua().get::<watt_per_kelvin>()
    )?;
    match (cell.ntu(), cell.exchange()) {
        (Ok([n1, n2]), Ok(exchange)) => {
            let [p1, p2] = exchange.effectiveness;
            write!(
                out,
                ", NTU {:.4}/{:.4}, P {:.4}/{:.4}, isolated Q {:.3} kW",
                n1.get::<ratio>(),
                n2.get::<ratio>(),
                p1.get::<ratio>(),
                p2.get::<ratio>(),
                exchange.heat_rate.get::<kilowatt>(),
            )?;
        }
        (Err(error), _) | (_, Err(error)) => write!(out, ", {error}")?,
    }
    for id in StreamId::BOTH {
        let stream = cell.stream(id);
        write!(
            out,
            ", T{id} {:.2} -> {:.2} K",
            stream.inlet().temperature().get::<kelvin>(),
            stream.outlet().temperature().get::<kelvin>(),
        )?;
    }
    if let Ok([q, _]) = cell.heat_rates() {
        write!(out, ", Q {:.3} kW", q.get::<kilowatt>())?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::super::{
        CellKind, Iterations, NetworkError, Shape,
        test_support::{scenario, total_ua},
    };
    use super::*;

    #[test]
    fn summary_after_adjusting() -> Result<(), NetworkError> {
        let mut network = scenario()?;
        network.adjust(Iterations::Fixed(1))?;
        let summary = network.to_string();

        assert!(summary.contains("2 x 2 CrossFlowOneRow"));
        assert!(summary.contains("stream 1 dr2u, stream 2 ul2r"));
        assert!(summary.contains("stream 1: Water in 373.15 K, out 335.0"));
        assert!(summary.contains("released"));
        Ok(())
    }

    #[test]
    fn extended_report_lists_cells() -> Result<(), NetworkError> {
        let mut network = scenario()?;
        network.adjust(Iterations::Fixed(1))?;
        let report = network.extended_report();

        assert_eq!(report.matches("\ncell ").count(), 4);
        assert!(report.contains("cell 0 (1, 1)"));
        assert!(report.contains(", P 0.22"));
        assert_eq!(report.matches("isolated Q ").count(), 4);
        Ok(())
    }

    #[test]
    fn unconnected_network() -> Result<(), NetworkError> {
        let network = HxNetwork::new(Shape::new(1, 3), CellKind::ParallelFlow, total_ua(10.)?);
        let report = network.extended_report();

        assert!(report.contains("stream 1: not connected"));
        assert!(report.contains("cells: not computed"));
        Ok(())
    }
}
