use std::io::{self, Write};

use nalgebra::Vector3;

use crate::sim::runner::TickRecord;

/// Summary statistics computed from a recorded flight.
#[derive(Debug, Clone)]
pub struct FlightSummary {
    pub peak_altitude: f64,
    pub peak_time: f64,
    pub ground_distance: f64,
    pub blocked_ticks: usize,
    pub flight_time: f64,
    pub final_position: Vector3<f64>,
}

impl FlightSummary {
    /// Compute summary from flight records. Expects at least the initial
    /// record, which every simulation run produces.
    pub fn from_records(records: &[TickRecord]) -> Self {
        let peak = records
            .iter()
            .max_by(|a, b| a.position.y.partial_cmp(&b.position.y).unwrap())
            .unwrap();

        let ground_distance: f64 = records
            .windows(2)
            .map(|w| {
                let dx = w[1].position.x - w[0].position.x;
                let dz = w[1].position.z - w[0].position.z;
                (dx * dx + dz * dz).sqrt()
            })
            .sum();

        let blocked_ticks = records.iter().filter(|r| r.blocked).count();
        let last = records.last().unwrap();

        FlightSummary {
            peak_altitude: peak.position.y,
            peak_time: peak.time,
            ground_distance,
            blocked_ticks,
            flight_time: last.time,
            final_position: last.position,
        }
    }
}

/// Write flight summary as JSON to a writer.
pub fn write_summary<W: Write>(
    writer: &mut W,
    pilot_name: &str,
    summary: &FlightSummary,
) -> io::Result<()> {
    writeln!(writer, "{{")?;
    writeln!(writer, "  \"flight\": {{")?;
    writeln!(writer, "    \"pilot\": \"{}\",", pilot_name)?;
    writeln!(writer, "    \"time_units\": {:.2}", summary.flight_time)?;
    writeln!(writer, "  }},")?;
    writeln!(writer, "  \"performance\": {{")?;
    writeln!(writer, "    \"peak_altitude\": {:.3},", summary.peak_altitude)?;
    writeln!(writer, "    \"peak_time\": {:.2},", summary.peak_time)?;
    writeln!(writer, "    \"ground_distance\": {:.3},", summary.ground_distance)?;
    writeln!(writer, "    \"blocked_ticks\": {},", summary.blocked_ticks)?;
    writeln!(
        writer,
        "    \"final_position\": [{:.3}, {:.3}, {:.3}]",
        summary.final_position.x, summary.final_position.y, summary.final_position.z
    )?;
    writeln!(writer, "  }}")?;
    writeln!(writer, "}}")?;
    Ok(())
}

/// Write flight summary JSON to a file.
pub fn write_summary_file(
    path: &str,
    pilot_name: &str,
    summary: &FlightSummary,
) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_summary(&mut file, pilot_name, summary)
}
